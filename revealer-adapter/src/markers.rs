/// Scalar output markers. `None` means the target is absent (or not computed yet).
///
/// Per-element markers (visible, in-view) are queried on the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Markers {
    pub overlay_hidden: Option<bool>,
    pub secondary_overlay_hidden: Option<bool>,
    /// Progress bar width in percent.
    pub progress_width: Option<f64>,
    pub header_scrolled: Option<bool>,
    pub parallax_offset: Option<f64>,
    pub active_entry: Option<usize>,
}

/// A single output marker write, in the order the controller produced it.
///
/// Hosts that render incrementally drain these with
/// [`Controller::drain_changes`](crate::Controller::drain_changes). A change is only
/// recorded when the marker's value actually differs.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerChange<K> {
    Visible(K),
    Overlay { hidden: bool },
    SecondaryOverlay { hidden: bool },
    ProgressWidth(f64),
    HeaderScrolled(bool),
    ParallaxOffset(f64),
    ActiveEntry(Option<usize>),
    InView(K, bool),
}
