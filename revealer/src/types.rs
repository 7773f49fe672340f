/// Scroll geometry of the page as seen by the engines.
///
/// All values are in the host's length unit (CSS pixels on the web) along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Distance from the document start to the viewport start.
    pub scroll_offset: f64,
    /// Visible extent of the viewport.
    pub height: f64,
    /// Total scrollable extent of the document.
    pub document_height: f64,
}

impl Viewport {
    pub fn new(scroll_offset: f64, height: f64, document_height: f64) -> Self {
        Self {
            scroll_offset,
            height,
            document_height,
        }
    }

    pub fn with_scroll_offset(mut self, scroll_offset: f64) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    /// The document offset of the viewport end.
    pub fn end(&self) -> f64 {
        self.scroll_offset + self.height
    }

    /// How far the document can scroll. Zero for documents that fit the viewport.
    pub fn scrollable_extent(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }

    /// Converts document-space bounds into viewport-relative bounds (what a DOM
    /// `getBoundingClientRect` reports).
    pub fn to_viewport_space(&self, bounds: Bounds) -> Bounds {
        Bounds {
            top: bounds.top - self.scroll_offset,
            height: bounds.height,
        }
    }
}

/// Extent of an element along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A region of the document used as an intersection root (the viewport grown or shrunk by
/// a [`crate::RootMargin`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub start: f64,
    pub end: f64, // exclusive
}

impl Band {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}
