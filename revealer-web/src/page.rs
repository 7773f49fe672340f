use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Array;
use revealer::{
    FallbackState, HeroFallback, IntersectionEntry, NavigationTracker, ObserverOptions,
    OverlayChange, RevealEngine, ScrollMetrics, ScrollMetricsEngine,
};
use revealer_adapter::EngineOptions;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MutationObserver, MutationObserverInit, Window,
};

use crate::bindings;
use crate::dom::{self, Registry};
use crate::embed;
use crate::listener::EventListener;
use crate::selectors::{STAGGER_ATTRIBUTE, Selectors, class};

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;
type WatchClosure = Closure<dyn FnMut(Array, MutationObserver)>;

/// Platform ratios reported right at a threshold crossing can land a hair below it.
const RATIO_EPSILON: f64 = 1e-3;

struct Hero {
    key: u32,
    heading: Element,
    fallback: HeroFallback<u32>,
    overlay: Element,
    secondary: Option<Element>,
}

impl Hero {
    fn heading_visible(&self) -> bool {
        dom::has_class(&self.heading, class::VISIBLE)
    }

    fn apply(&self, change: OverlayChange) {
        let hidden = change.is_hidden();
        wdebug!(hidden, "hero overlay changed");
        dom::set_class(&self.overlay, class::HIDDEN, hidden);
        if let Some(el) = &self.secondary {
            dom::set_class(el, class::HIDDEN, hidden);
        }
    }
}

struct Targets {
    progress: Option<HtmlElement>,
    header: Option<Element>,
    parallax: Option<HtmlElement>,
}

impl Targets {
    fn apply(&self, m: ScrollMetrics) {
        if let Some(el) = &self.progress {
            dom::set_style(el, "width", &dom::percent(m.progress_percent));
        }
        if let Some(el) = &self.header {
            dom::set_class(el, class::SCROLLED, m.header_scrolled);
        }
        if let Some(el) = &self.parallax {
            dom::set_style(
                el,
                "background-position",
                &dom::parallax_position(m.parallax_offset),
            );
        }
    }
}

struct PageState {
    options: EngineOptions,
    registry: Registry,
    reveal: RevealEngine<u32>,
    reveal_elements: Vec<Element>,
    hero: Option<Hero>,
    metrics: ScrollMetricsEngine,
    nav: NavigationTracker<u32>,
    sections: Vec<Element>,
    nav_links: Vec<Element>,
    targets: Targets,
}

impl PageState {
    fn read(document: &Document, selectors: &Selectors, options: EngineOptions) -> Result<Self, JsValue> {
        let mut registry = Registry::default();

        let mut reveal = RevealEngine::new(options.reveal);
        let reveal_elements = dom::query_all(document, &selectors.reveal)?;
        for el in &reveal_elements {
            let key = registry.key_of(el);
            if dom::has_class(el, class::STAGGER) || el.has_attribute(STAGGER_ATTRIBUTE) {
                let children: Vec<u32> = dom::children(el)
                    .iter()
                    .map(|child| registry.key_of(child))
                    .collect();
                reveal.observe_group(key, children);
            } else {
                reveal.observe(key);
            }
        }

        let heading = dom::query(document, &selectors.hero_heading)?;
        let overlay = dom::query(document, &selectors.hero_overlay)?;
        let hero = match (heading, overlay) {
            (Some(heading), Some(overlay)) => {
                let key = registry.key_of(&heading);
                Some(Hero {
                    key,
                    fallback: HeroFallback::new(key, options.hero),
                    heading,
                    overlay,
                    secondary: dom::query(document, &selectors.secondary_overlay)?,
                })
            }
            _ => {
                wdebug!("hero heading or overlay missing; fallback disabled");
                None
            }
        };

        let mut nav = NavigationTracker::new(options.nav);
        let sections = dom::query_all(document, &selectors.sections)?;
        for section in &sections {
            let key = registry.key_of(section);
            nav.add_section(key, section.id());
        }
        let nav_links = dom::query_all(document, &selectors.nav_links)?;
        for link in &nav_links {
            nav.add_entry(&link.get_attribute("href").unwrap_or_default());
        }

        let html = |el: Option<Element>| el.and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let targets = Targets {
            progress: html(dom::query(document, &selectors.progress)?),
            header: dom::query(document, &selectors.header)?,
            parallax: html(dom::query(document, &selectors.parallax)?),
        };

        wdebug!(
            reveal = reveal_elements.len(),
            hero = hero.is_some(),
            sections = sections.len(),
            nav_links = nav_links.len(),
            "page read"
        );
        Ok(Self {
            options,
            registry,
            reveal,
            reveal_elements,
            hero,
            metrics: ScrollMetricsEngine::new(options.metrics),
            nav,
            sections,
            nav_links,
            targets,
        })
    }
}

/// Converts a platform batch into engine entries.
///
/// Entries for unregistered elements are dropped.
fn entries(records: &Array, registry: &Registry, threshold: f32) -> Vec<IntersectionEntry<u32>> {
    records
        .iter()
        .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
        .filter_map(|e| {
            let key = registry.lookup(&e.target())?;
            let hit = is_hit(e.is_intersecting(), e.intersection_ratio(), threshold);
            Some(IntersectionEntry::new(key, hit))
        })
        .collect()
}

/// With a zero threshold the platform flag alone decides; an edge-adjacent element reports
/// `isIntersecting` with a zero ratio and gets no further callback until it leaves.
pub(crate) fn is_hit(is_intersecting: bool, ratio: f64, threshold: f32) -> bool {
    if !is_intersecting {
        return false;
    }
    threshold <= 0.0 || (ratio > 0.0 && ratio + RATIO_EPSILON >= f64::from(threshold))
}

fn platform_observer(
    callback: &ObserverClosure,
    options: &ObserverOptions,
) -> Result<IntersectionObserver, JsValue> {
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin.to_string());
    init.set_threshold(&JsValue::from_f64(f64::from(options.threshold)));
    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
}

fn observer_closure(inner: &Rc<Inner>, handler: fn(&Inner, &Array)) -> ObserverClosure {
    let weak = Rc::downgrade(inner);
    Closure::wrap(Box::new(move |records: Array, _observer: IntersectionObserver| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner, &records);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>)
}

/// Page state plus every platform object and closure it registered.
///
/// Callbacks hold a `Weak` to this value; the [`PageHandle`] holds the only strong
/// reference. State is never borrowed across a call back into the platform that could
/// re-enter a callback.
struct Inner {
    window: Window,
    document: Document,
    state: RefCell<PageState>,

    reveal_observer: RefCell<Option<IntersectionObserver>>,
    hero_observer: RefCell<Option<IntersectionObserver>>,
    nav_observer: RefCell<Option<IntersectionObserver>>,
    heading_watch: RefCell<Option<MutationObserver>>,

    reveal_cb: RefCell<Option<ObserverClosure>>,
    hero_cb: RefCell<Option<ObserverClosure>>,
    nav_cb: RefCell<Option<ObserverClosure>>,
    watch_cb: RefCell<Option<WatchClosure>>,
    frame_cb: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    timer_cb: RefCell<Option<Closure<dyn FnMut()>>>,

    raf_id: Cell<Option<i32>>,
    timer_id: Cell<Option<i32>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Inner {
    fn new(window: Window, document: Document, state: PageState) -> Rc<Self> {
        Rc::new(Self {
            window,
            document,
            state: RefCell::new(state),
            reveal_observer: RefCell::new(None),
            hero_observer: RefCell::new(None),
            nav_observer: RefCell::new(None),
            heading_watch: RefCell::new(None),
            reveal_cb: RefCell::new(None),
            hero_cb: RefCell::new(None),
            nav_cb: RefCell::new(None),
            watch_cb: RefCell::new(None),
            frame_cb: RefCell::new(None),
            timer_cb: RefCell::new(None),
            raf_id: Cell::new(None),
            timer_id: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Registers closures, observers and listeners, then applies the baseline pass.
    fn connect(self: &Rc<Self>, selectors: &Selectors) -> Result<(), JsValue> {
        let weak = Rc::downgrade(self);
        *self.watch_cb.borrow_mut() = Some(Closure::wrap(Box::new(
            move |_records: Array, _observer: MutationObserver| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_heading_attributes();
                }
            },
        ) as Box<dyn FnMut(Array, MutationObserver)>));

        let weak = Rc::downgrade(self);
        *self.frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame();
            }
        }) as Box<dyn FnMut(f64)>));

        let weak = Rc::downgrade(self);
        *self.timer_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_timer();
            }
        }) as Box<dyn FnMut()>));

        let (reveal_opts, hero_opts, nav_opts) = {
            let o = self.state.borrow().options;
            (o.reveal.observer, o.hero.observer, o.nav.observer)
        };

        let reveal_cb = observer_closure(self, Self::on_reveal_records);
        let reveal_observer = platform_observer(&reveal_cb, &reveal_opts)?;
        *self.reveal_cb.borrow_mut() = Some(reveal_cb);

        let hero_cb = observer_closure(self, Self::on_hero_records);
        let hero_observer = platform_observer(&hero_cb, &hero_opts)?;
        *self.hero_cb.borrow_mut() = Some(hero_cb);

        let nav_cb = observer_closure(self, Self::on_nav_records);
        let nav_observer = platform_observer(&nav_cb, &nav_opts)?;
        *self.nav_cb.borrow_mut() = Some(nav_cb);

        let first_pass_done = {
            let mut state = self.state.borrow_mut();
            for el in &state.reveal_elements {
                reveal_observer.observe(el);
            }
            if let Some(hero) = &state.hero {
                hero_observer.observe(&hero.heading);
            }
            for section in &state.sections {
                nav_observer.observe(section);
            }
            // Nothing to reveal means no reveal batch will ever arrive.
            if state.reveal_elements.is_empty() {
                state.reveal.on_intersections(&[], bindings::now_ms());
                state.reveal.take_first_pass_complete()
            } else {
                false
            }
        };
        *self.reveal_observer.borrow_mut() = Some(reveal_observer);
        *self.hero_observer.borrow_mut() = Some(hero_observer);
        *self.nav_observer.borrow_mut() = Some(nav_observer);

        let weak = Rc::downgrade(self);
        let scroll = EventListener::new(self.window.as_ref(), "scroll", true, move |_e: Event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_scroll();
            }
        })?;
        let cards = embed::install_cards(&self.document, &selectors.social_cards)?;
        {
            let mut listeners = self.listeners.borrow_mut();
            listeners.push(scroll);
            listeners.extend(cards);
        }

        let viewport = dom::viewport(&self.window, &self.document);
        {
            let mut state = self.state.borrow_mut();
            let m = state.metrics.baseline(&viewport);
            state.targets.apply(m);
        }
        if first_pass_done {
            self.catch_up_hero();
        }
        Ok(())
    }

    fn on_reveal_records(&self, records: &Array) {
        let now = bindings::now_ms();
        let (revealed, triggered, first_pass_done) = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let threshold = state.options.reveal.observer.threshold;
            let batch = entries(records, &state.registry, threshold);
            let revealed = state.reveal.on_intersections(&batch, now);
            let triggered: Vec<u32> = batch
                .iter()
                .filter(|e| e.is_intersecting)
                .map(|e| e.target)
                .collect();
            (revealed, triggered, state.reveal.take_first_pass_complete())
        };
        // Covers nested groups that were already visible through their parent.
        self.unobserve_settled(&triggered);
        self.show(&revealed);
        self.arm_timer();
        if first_pass_done {
            self.catch_up_hero();
        }
    }

    /// Sets the visible flag on `keys` and stops observing those that are settled.
    fn show(&self, keys: &[u32]) {
        {
            let state = self.state.borrow();
            for &key in keys {
                if let Some(el) = state.registry.element(key) {
                    dom::set_class(el, class::VISIBLE, true);
                }
            }
        }
        self.unobserve_settled(keys);
    }

    fn unobserve_settled(&self, keys: &[u32]) {
        let state = self.state.borrow();
        let observer = self.reveal_observer.borrow();
        let Some(observer) = observer.as_ref() else {
            return;
        };
        for &key in keys {
            if !state.reveal.is_settled(&key) {
                continue;
            }
            if let Some(el) = state.registry.element(key) {
                observer.unobserve(el);
            }
        }
    }

    fn arm_timer(&self) {
        let Some(due) = self.state.borrow().reveal.next_due() else {
            return;
        };
        if let Some(id) = self.timer_id.take() {
            bindings::clear_timeout(id);
        }
        if let Some(cb) = self.timer_cb.borrow().as_ref() {
            let delay = bindings::delay_until(due, bindings::now_ms());
            let id = bindings::set_timeout(cb.as_ref().unchecked_ref(), delay);
            self.timer_id.set(Some(id));
        }
    }

    fn on_timer(&self) {
        self.timer_id.set(None);
        let now = bindings::now_ms();
        let revealed = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let registry = &state.registry;
            state.reveal.advance(now, |key| registry.is_alive(*key))
        };
        self.show(&revealed);
        self.arm_timer();
    }

    fn on_hero_records(&self, records: &Array) {
        let watching = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let threshold = state.options.hero.observer.threshold;
            let batch = entries(records, &state.registry, threshold);
            let Some(hero) = state.hero.as_mut() else {
                return;
            };
            let visible = hero.heading_visible();
            if let Some(change) = hero.fallback.on_intersections(&batch, visible) {
                hero.apply(change);
            }
            hero.fallback.is_watching()
        };
        self.sync_watch(watching);
    }

    fn on_heading_attributes(&self) {
        let watching = {
            let mut state = self.state.borrow_mut();
            let Some(hero) = state.hero.as_mut() else {
                return;
            };
            let visible = hero.heading_visible();
            if let Some(change) = hero.fallback.on_attributes_changed(&hero.key, visible) {
                hero.apply(change);
            }
            hero.fallback.is_watching()
        };
        self.sync_watch(watching);
    }

    /// Startup check for a heading already in view; runs once the first reveal pass is done.
    fn catch_up_hero(&self) {
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let watching = {
            let mut state = self.state.borrow_mut();
            let Some(hero) = state.hero.as_mut() else {
                return;
            };
            let bounds = dom::client_bounds(&hero.heading);
            let visible = hero.heading_visible();
            if let Some(change) = hero.fallback.catch_up(bounds, height, visible) {
                hero.apply(change);
            }
            hero.fallback.is_watching()
        };
        self.sync_watch(watching);
    }

    /// Keeps the platform attribute observer in step with the fallback's subscription.
    fn sync_watch(&self, watching: bool) {
        let mut slot = self.heading_watch.borrow_mut();
        if watching && slot.is_none() {
            match self.watch_heading() {
                Ok(observer) => *slot = Some(observer),
                Err(_err) => {
                    wwarn!(err = ?_err, "could not watch the hero heading");
                }
            }
        } else if !watching {
            if let Some(observer) = slot.take() {
                observer.disconnect();
            }
        }
    }

    fn watch_heading(&self) -> Result<MutationObserver, JsValue> {
        let callback = self.watch_cb.borrow();
        let state = self.state.borrow();
        let (Some(callback), Some(hero)) = (callback.as_ref(), state.hero.as_ref()) else {
            return Err(JsValue::from_str("revealer-web: page is not connected"));
        };
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&Array::of1(&JsValue::from_str("class")));
        observer.observe_with_options(&hero.heading, &init)?;
        Ok(observer)
    }

    fn on_nav_records(&self, records: &Array) {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let threshold = state.options.nav.observer.threshold;
        let batch = entries(records, &state.registry, threshold);
        let update = state.nav.on_intersections(&batch);
        if let Some(active) = update.active {
            for (i, link) in state.nav_links.iter().enumerate() {
                dom::set_class(link, class::ACTIVE, active == Some(i));
            }
        }
        for (key, in_view) in update.in_view {
            if let Some(el) = state.registry.element(key) {
                dom::set_class(el, class::IN_VIEW, in_view);
            }
        }
    }

    fn on_scroll(&self) {
        let schedule = self.state.borrow_mut().metrics.on_scroll();
        if !schedule {
            return;
        }
        if let Some(cb) = self.frame_cb.borrow().as_ref() {
            let id = bindings::request_animation_frame(cb.as_ref().unchecked_ref());
            self.raf_id.set(Some(id));
        }
    }

    fn on_frame(&self) {
        self.raf_id.set(None);
        let viewport = dom::viewport(&self.window, &self.document);
        let mut state = self.state.borrow_mut();
        if let Some(m) = state.metrics.on_frame(&viewport) {
            state.targets.apply(m);
        }
    }

    fn disconnect(&self) {
        for slot in [&self.reveal_observer, &self.hero_observer, &self.nav_observer] {
            if let Some(observer) = slot.borrow_mut().take() {
                observer.disconnect();
            }
        }
        if let Some(observer) = self.heading_watch.borrow_mut().take() {
            observer.disconnect();
        }
        if let Some(id) = self.raf_id.take() {
            bindings::cancel_animation_frame(id);
        }
        if let Some(id) = self.timer_id.take() {
            bindings::clear_timeout(id);
        }
        self.listeners.borrow_mut().clear();

        self.reveal_cb.borrow_mut().take();
        self.hero_cb.borrow_mut().take();
        self.nav_cb.borrow_mut().take();
        self.watch_cb.borrow_mut().take();
        self.frame_cb.borrow_mut().take();
        self.timer_cb.borrow_mut().take();
    }
}

/// Owns everything [`install`](crate::install) registered on the page.
///
/// Dropping the handle disconnects every observer, removes every listener and cancels pending
/// frame and timer callbacks. Markers already written to the page stay as they are.
pub struct PageHandle {
    inner: Rc<Inner>,
}

impl PageHandle {
    /// Whether the hero overlay is hidden; `None` when the page has no hero fallback.
    pub fn is_overlay_hidden(&self) -> Option<bool> {
        let state = self.inner.state.borrow();
        state.hero.as_ref().map(|h| h.fallback.is_overlay_hidden())
    }

    pub fn hero_state(&self) -> Option<FallbackState> {
        let state = self.inner.state.borrow();
        state.hero.as_ref().map(|h| h.fallback.state())
    }

    /// Number of elements whose visible flag is set.
    pub fn visible_len(&self) -> usize {
        self.inner.state.borrow().reveal.visible_len()
    }

    /// Index of the active navigation link.
    pub fn active_entry(&self) -> Option<usize> {
        self.inner.state.borrow().nav.active_entry()
    }

    pub fn metrics(&self) -> Option<ScrollMetrics> {
        self.inner.state.borrow().metrics.current()
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        wdebug!("disconnecting page");
        self.inner.disconnect();
    }
}

impl core::fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("PageHandle")
            .field("registered", &state.reveal.registered_len())
            .field("visible", &state.reveal.visible_len())
            .field("hero", &state.hero.as_ref().map(|h| h.fallback.state()))
            .field("active_entry", &state.nav.active_entry())
            .finish()
    }
}

pub(crate) fn install(selectors: &Selectors, options: EngineOptions) -> Result<PageHandle, JsValue> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let state = PageState::read(&document, selectors, options)?;
    let inner = Inner::new(window, document, state);
    let handle = PageHandle {
        inner: Rc::clone(&inner),
    };
    // On error the handle drops here and tears down whatever was registered.
    inner.connect(selectors)?;
    Ok(handle)
}
