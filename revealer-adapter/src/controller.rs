use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use revealer::{
    Bounds, ElementKey, FallbackState, HeroFallback, IntersectionObserver, NavigationTracker,
    OverlayChange, RevealEngine, ScrollMetrics, ScrollMetricsEngine, Viewport,
};

use crate::{EngineOptions, MarkerChange, Markers, Page, Targets};

#[derive(Clone, Debug)]
struct HeroPair<K> {
    fallback: HeroFallback<K>,
    observer: IntersectionObserver<K>,
    secondary: bool,
}

/// A framework-neutral controller that owns a page model and drives every engine.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `start` once the page is laid out
/// - `on_scroll` for every scroll notification, then `frame(now_ms)` on the next rendered
///   frame when `on_scroll` asked for one
/// - `advance_timers(now_ms)` from a timer, for delayed stagger reveals (`frame` also
///   advances them)
///
/// Each of the three observer instances (reveal, hero heading, navigation band) is evaluated
/// geometrically against the page model on every frame. The reveal engine's visible flag is
/// the attribute the hero synchronizer watches, so reveals are forwarded to it as attribute
/// changes.
#[derive(Clone, Debug)]
pub struct Controller<K> {
    options: EngineOptions,
    page: Page<K>,
    targets: Targets,
    viewport: Viewport,
    started: bool,

    reveal: RevealEngine<K>,
    reveal_observer: IntersectionObserver<K>,
    hero: Option<HeroPair<K>>,
    metrics: ScrollMetricsEngine,
    nav: NavigationTracker<K>,
    nav_observer: IntersectionObserver<K>,

    markers: Markers,
    changes: Vec<MarkerChange<K>>,
}

impl<K: ElementKey> Controller<K> {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            page: Page::new(),
            targets: Targets::default(),
            viewport: Viewport::default(),
            started: false,
            reveal: RevealEngine::new(options.reveal),
            reveal_observer: IntersectionObserver::new(options.reveal.observer),
            hero: None,
            metrics: ScrollMetricsEngine::new(options.metrics),
            nav: NavigationTracker::new(options.nav),
            nav_observer: IntersectionObserver::new(options.nav.observer),
            markers: Markers::default(),
            changes: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn page(&self) -> &Page<K> {
        &self.page
    }

    /// Mutable access to the layout, e.g. after a relayout or when elements are removed.
    pub fn page_mut(&mut self) -> &mut Page<K> {
        &mut self.page
    }

    pub fn set_targets(&mut self, targets: Targets) {
        self.targets = targets;
    }

    pub fn targets(&self) -> Targets {
        self.targets
    }

    pub fn add_element(&mut self, key: K, bounds: Bounds) {
        self.page.set_bounds(key, bounds);
    }

    /// Registers an element for viewport-triggered reveal.
    pub fn observe_reveal(&mut self, key: K) {
        self.reveal.observe(key.clone());
        self.reveal_observer.observe(key);
    }

    /// Registers a stagger group; `children` are revealed in order after the group.
    pub fn observe_stagger_group(&mut self, key: K, children: impl IntoIterator<Item = K>) {
        self.reveal.observe_group(key.clone(), children);
        self.reveal_observer.observe(key);
    }

    /// Installs the fallback pair for `heading`. The overlay starts shown.
    pub fn set_hero(&mut self, heading: K, secondary_overlay: bool) {
        let mut observer = IntersectionObserver::new(self.options.hero.observer);
        observer.observe(heading.clone());
        self.hero = Some(HeroPair {
            fallback: HeroFallback::new(heading, self.options.hero),
            observer,
            secondary: secondary_overlay,
        });
        self.markers.overlay_hidden = Some(false);
        self.markers.secondary_overlay_hidden = secondary_overlay.then_some(false);
    }

    pub fn add_section(&mut self, key: K, id: impl Into<String>) {
        self.nav.add_section(key.clone(), id);
        self.nav_observer.observe(key);
    }

    /// Adds a navigation entry and returns its index.
    pub fn add_nav_entry(&mut self, href: &str) -> usize {
        self.nav.add_entry(href)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Updates geometry without a scroll notification (e.g. after a resize). Observers pick it
    /// up on the next frame.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Applies the startup pass: baseline metrics, the first evaluation of every observer, and
    /// the hero catch-up check once the first reveal pass completed.
    pub fn start(&mut self, viewport: Viewport, now_ms: u64) {
        if self.started {
            return;
        }
        adebug!(
            elements = self.page.len(),
            reveal = self.reveal.registered_len(),
            sections = self.nav.sections_len(),
            hero = self.hero.is_some(),
            "Controller::start"
        );
        self.started = true;
        self.viewport = viewport;
        let m = self.metrics.baseline(&viewport);
        self.apply_metrics(m);
        self.observe_intersections(now_ms);
        self.advance_timers(now_ms);
    }

    /// Call this for every scroll notification.
    ///
    /// Returns `true` when the adapter must schedule a frame (and later call
    /// [`frame`](Self::frame)); `false` when one is already pending.
    pub fn on_scroll(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.metrics.on_scroll()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.metrics.is_frame_pending()
    }

    /// Runs one rendered frame: observers, the coalesced metrics recomputation, and due
    /// stagger tasks.
    pub fn frame(&mut self, now_ms: u64) {
        if !self.started {
            return;
        }
        self.observe_intersections(now_ms);
        if let Some(m) = self.metrics.on_frame(&self.viewport) {
            self.apply_metrics(m);
        }
        self.advance_timers(now_ms);
    }

    /// Fires every stagger task due at `now_ms`. Tasks for elements no longer on the page are
    /// skipped.
    pub fn advance_timers(&mut self, now_ms: u64) {
        let page = &self.page;
        let revealed = self.reveal.advance(now_ms, |k| page.contains(k));
        self.after_reveal(revealed);
    }

    /// When the next stagger task is due, for adapters that arm a real timer.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.reveal.next_due()
    }

    fn observe_intersections(&mut self, now_ms: u64) {
        let viewport = self.viewport;

        let page = &self.page;
        let batch = self
            .reveal_observer
            .take_records(&viewport, |k| page.bounds(k));
        if !batch.is_empty() || !self.reveal.has_completed_first_pass() {
            let revealed = self.reveal.on_intersections(&batch, now_ms);
            // A nested group made visible earlier by its parent settles here, without being
            // reported as revealed.
            for entry in batch.iter().filter(|e| e.is_intersecting) {
                self.unobserve_settled(&entry.target);
            }
            self.after_reveal(revealed);
        }

        let page = &self.page;
        let reveal = &self.reveal;
        let change = self.hero.as_mut().and_then(|hero| {
            let entries = hero.observer.take_records(&viewport, |k| page.bounds(k));
            if entries.is_empty() {
                return None;
            }
            let visible = reveal.is_visible(hero.fallback.heading());
            hero.fallback.on_intersections(&entries, visible)
        });
        if let Some(change) = change {
            self.apply_overlay(change);
        }

        if self.reveal.take_first_pass_complete() {
            self.catch_up_hero();
        }

        let page = &self.page;
        let entries = self
            .nav_observer
            .take_records(&viewport, |k| page.bounds(k));
        if !entries.is_empty() {
            let update = self.nav.on_intersections(&entries);
            if let Some(active) = update.active {
                self.markers.active_entry = active;
                self.changes.push(MarkerChange::ActiveEntry(active));
            }
            for (key, in_view) in update.in_view {
                self.changes.push(MarkerChange::InView(key, in_view));
            }
        }
    }

    fn catch_up_hero(&mut self) {
        let Some(hero) = self.hero.as_mut() else {
            return;
        };
        let Some(bounds) = self.page.bounds(hero.fallback.heading()) else {
            adebug!("Controller: hero heading is not on the page; skipping catch-up");
            return;
        };
        let rect = self.viewport.to_viewport_space(bounds);
        let visible = self.reveal.is_visible(hero.fallback.heading());
        if let Some(change) = hero.fallback.catch_up(rect, self.viewport.height, visible) {
            self.apply_overlay(change);
        }
    }

    fn after_reveal(&mut self, revealed: Vec<K>) {
        for key in revealed {
            self.unobserve_settled(&key);
            let reveal = &self.reveal;
            let change = self.hero.as_mut().and_then(|hero| {
                let visible = reveal.is_visible(hero.fallback.heading());
                hero.fallback.on_attributes_changed(&key, visible)
            });
            self.changes.push(MarkerChange::Visible(key));
            if let Some(change) = change {
                self.apply_overlay(change);
            }
        }
    }

    fn unobserve_settled(&mut self, key: &K) {
        if self.reveal.is_settled(key) {
            self.reveal_observer.unobserve(key);
        }
    }

    fn apply_overlay(&mut self, change: OverlayChange) {
        let hidden = change.is_hidden();
        adebug!(hidden, "Controller: overlay changed");
        self.markers.overlay_hidden = Some(hidden);
        self.changes.push(MarkerChange::Overlay { hidden });
        if self.hero.as_ref().is_some_and(|h| h.secondary) {
            self.markers.secondary_overlay_hidden = Some(hidden);
            self.changes.push(MarkerChange::SecondaryOverlay { hidden });
        }
    }

    fn apply_metrics(&mut self, m: ScrollMetrics) {
        atrace!(
            progress = m.progress_percent,
            header_scrolled = m.header_scrolled,
            parallax = m.parallax_offset,
            "Controller::apply_metrics"
        );
        if self.targets.progress_bar && self.markers.progress_width != Some(m.progress_percent) {
            self.markers.progress_width = Some(m.progress_percent);
            self.changes
                .push(MarkerChange::ProgressWidth(m.progress_percent));
        }
        if self.targets.header && self.markers.header_scrolled != Some(m.header_scrolled) {
            self.markers.header_scrolled = Some(m.header_scrolled);
            self.changes.push(MarkerChange::HeaderScrolled(m.header_scrolled));
        }
        if self.targets.parallax && self.markers.parallax_offset != Some(m.parallax_offset) {
            self.markers.parallax_offset = Some(m.parallax_offset);
            self.changes.push(MarkerChange::ParallaxOffset(m.parallax_offset));
        }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Takes the marker writes recorded since the previous call.
    pub fn drain_changes(&mut self) -> Vec<MarkerChange<K>> {
        mem::take(&mut self.changes)
    }

    pub fn is_visible(&self, key: &K) -> bool {
        self.reveal.is_visible(key)
    }

    pub fn is_in_view(&self, key: &K) -> bool {
        self.nav.is_in_view(key)
    }

    pub fn hero_state(&self) -> Option<FallbackState> {
        self.hero.as_ref().map(|h| h.fallback.state())
    }

    pub fn is_hero_watching(&self) -> bool {
        self.hero.as_ref().is_some_and(|h| h.fallback.is_watching())
    }

    pub fn reveal(&self) -> &RevealEngine<K> {
        &self.reveal
    }

    pub fn nav(&self) -> &NavigationTracker<K> {
        &self.nav
    }

    pub fn metrics(&self) -> &ScrollMetricsEngine {
        &self.metrics
    }
}
