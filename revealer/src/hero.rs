use crate::{AttributeWatch, Bounds, ElementKey, IntersectionEntry, ObserverOptions};

/// Configuration for [`HeroFallback`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroOptions {
    pub observer: ObserverOptions,
}

impl Default for HeroOptions {
    fn default() -> Self {
        Self {
            observer: ObserverOptions::new(0.12),
        }
    }
}

impl HeroOptions {
    pub fn with_observer(mut self, observer: ObserverOptions) -> Self {
        self.observer = observer;
        self
    }
}

/// State of a fallback pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackState {
    /// The heading is out of view (or not known to be in view); the overlay is shown.
    #[default]
    Shown,
    /// The heading is in view but not revealed yet; the overlay is shown and the heading's
    /// attributes are being watched.
    AwaitingReveal,
    /// The heading is in view and revealed; the overlay is hidden.
    Hidden,
}

/// A change the host must apply to the overlay(s).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlayChange {
    Show,
    Hide,
}

impl OverlayChange {
    pub fn is_hidden(self) -> bool {
        matches!(self, Self::Hide)
    }
}

/// Keeps a fallback overlay shown until its heading is both in view and revealed.
///
/// Two notification channels feed the state machine: intersection entries for the heading,
/// and attribute changes on the heading (delivered through a one-shot [`AttributeWatch`]
/// that exists only while the pair is in [`FallbackState::AwaitingReveal`]).
///
/// Every method returns `Some` only when the overlay's shown/hidden state flips.
#[derive(Clone, Debug)]
pub struct HeroFallback<K> {
    options: HeroOptions,
    heading: K,
    state: FallbackState,
    watch: AttributeWatch<K>,
}

impl<K: ElementKey> HeroFallback<K> {
    pub fn new(heading: K, options: HeroOptions) -> Self {
        rdebug!(threshold = options.observer.threshold, "HeroFallback::new");
        Self {
            options,
            heading,
            state: FallbackState::Shown,
            watch: AttributeWatch::new(),
        }
    }

    pub fn options(&self) -> &HeroOptions {
        &self.options
    }

    pub fn heading(&self) -> &K {
        &self.heading
    }

    pub fn state(&self) -> FallbackState {
        self.state
    }

    pub fn is_overlay_hidden(&self) -> bool {
        self.state == FallbackState::Hidden
    }

    /// Whether an attribute-watch subscription on the heading is active.
    pub fn is_watching(&self) -> bool {
        self.watch.is_active()
    }

    pub fn watch(&self) -> &AttributeWatch<K> {
        &self.watch
    }

    /// Handles an intersection batch. Entries for other targets are ignored; entries for the
    /// heading are applied in order.
    pub fn on_intersections(
        &mut self,
        entries: &[IntersectionEntry<K>],
        heading_visible: bool,
    ) -> Option<OverlayChange> {
        let was_hidden = self.is_overlay_hidden();
        for entry in entries {
            if entry.target != self.heading {
                continue;
            }
            if entry.is_intersecting {
                self.enter_view(heading_visible);
            } else {
                self.leave_view();
            }
        }
        self.change_since(was_hidden)
    }

    /// Handles an attribute change on `target`.
    ///
    /// Fires only while awaiting the heading's reveal and only once the heading is visible;
    /// the watch disconnects itself when it fires.
    pub fn on_attributes_changed(
        &mut self,
        target: &K,
        heading_visible: bool,
    ) -> Option<OverlayChange> {
        if !self.watch.notify(target, heading_visible) {
            return None;
        }
        debug_assert_eq!(self.state, FallbackState::AwaitingReveal);
        rdebug!("HeroFallback: heading revealed while in view; hiding overlay");
        self.state = FallbackState::Hidden;
        Some(OverlayChange::Hide)
    }

    /// Startup check for pages loaded with the heading already in view.
    ///
    /// `heading` is the heading's viewport-relative bounds. Call this once the first reveal
    /// pass has completed. A pair that an intersection entry already moved out of
    /// [`FallbackState::Shown`] is left alone.
    pub fn catch_up(
        &mut self,
        heading: Bounds,
        viewport_height: f64,
        heading_visible: bool,
    ) -> Option<OverlayChange> {
        if self.state != FallbackState::Shown {
            return None;
        }
        let in_view = heading.top < viewport_height && heading.bottom() > 0.0;
        if !in_view {
            return None;
        }
        rtrace!(
            top = heading.top,
            viewport_height,
            heading_visible,
            "HeroFallback::catch_up"
        );
        let was_hidden = self.is_overlay_hidden();
        self.enter_view(heading_visible);
        self.change_since(was_hidden)
    }

    fn enter_view(&mut self, heading_visible: bool) {
        if heading_visible {
            self.watch.disconnect();
            self.state = FallbackState::Hidden;
            return;
        }
        // Keeps an existing subscription: at most one is active per pair.
        self.watch.observe(self.heading.clone());
        self.state = FallbackState::AwaitingReveal;
    }

    fn leave_view(&mut self) {
        self.watch.disconnect();
        self.state = FallbackState::Shown;
    }

    fn change_since(&self, was_hidden: bool) -> Option<OverlayChange> {
        match (was_hidden, self.is_overlay_hidden()) {
            (false, true) => Some(OverlayChange::Hide),
            (true, false) => Some(OverlayChange::Show),
            _ => None,
        }
    }
}
