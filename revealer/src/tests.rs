use crate::*;

use alloc::vec;
use alloc::vec::Vec;

fn hit<K>(target: K) -> IntersectionEntry<K> {
    IntersectionEntry::new(target, true)
}

fn miss<K>(target: K) -> IntersectionEntry<K> {
    IntersectionEntry::new(target, false)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn ratio_counts_overlap_fraction() {
    let band = Band {
        start: 100.0,
        end: 900.0,
    };
    assert_eq!(intersection_ratio(Bounds::new(0.0, 100.0), band), 0.0);
    assert_eq!(intersection_ratio(Bounds::new(850.0, 100.0), band), 0.5);
    assert_eq!(intersection_ratio(Bounds::new(200.0, 100.0), band), 1.0);
    // Zero-height elements count as fully visible while inside the band.
    assert_eq!(intersection_ratio(Bounds::new(500.0, 0.0), band), 1.0);
    assert_eq!(intersection_ratio(Bounds::new(950.0, 0.0), band), 0.0);
}

#[test]
fn threshold_gates_intersecting() {
    let opts = ObserverOptions::new(0.12);
    let vp = Viewport::new(0.0, 800.0, 4000.0);

    // 10% of a 1000-tall element is in view: below the 12% threshold.
    let (hit, ratio) = opts.evaluate(Bounds::new(700.0, 1000.0), &vp);
    assert!(!hit);
    assert!((ratio - 0.1).abs() < 1e-6);

    // 20% in view.
    let (hit, _) = opts.evaluate(Bounds::new(600.0, 1000.0), &vp);
    assert!(hit);

    // Threshold zero still requires some overlap.
    let zero = ObserverOptions::new(0.0);
    assert!(!zero.evaluate(Bounds::new(800.0, 50.0), &vp).0);
    assert!(zero.evaluate(Bounds::new(799.0, 50.0), &vp).0);
}

#[test]
fn observer_reports_first_evaluation_then_only_changes() {
    let mut obs = IntersectionObserver::new(ObserverOptions::new(0.12));
    obs.observe("a");
    obs.observe("b");
    obs.observe("a");
    assert_eq!(obs.len(), 2);

    let bounds = |k: &&str| match *k {
        "a" => Some(Bounds::new(100.0, 100.0)),
        "b" => Some(Bounds::new(2000.0, 100.0)),
        _ => None,
    };

    let vp = Viewport::new(0.0, 800.0, 4000.0);
    let first = obs.take_records(&vp, bounds);
    assert_eq!(first.len(), 2);
    assert!(first[0].is_intersecting);
    assert!(!first[1].is_intersecting);

    assert!(obs.take_records(&vp, bounds).is_empty());

    let vp = vp.with_scroll_offset(1500.0);
    let changed = obs.take_records(&vp, bounds);
    let targets: Vec<(&str, bool)> = changed
        .iter()
        .map(|e| (e.target, e.is_intersecting))
        .collect();
    assert_eq!(targets, vec![("a", false), ("b", true)]);
}

#[test]
fn observer_skips_targets_without_bounds() {
    let mut obs = IntersectionObserver::new(ObserverOptions::new(0.0));
    obs.observe(1u32);
    obs.observe(2u32);
    let vp = Viewport::new(0.0, 800.0, 4000.0);
    let out = obs.take_records(&vp, |k| (*k == 1).then(|| Bounds::new(0.0, 10.0)));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].target, 1);

    obs.unobserve(&1);
    assert!(!obs.is_observing(&1));
    assert!(obs.is_observing(&2));
}

#[test]
fn reveal_sets_visible_on_first_intersection() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe("card");
    assert!(!r.is_visible(&"card"));

    let out = r.on_intersections(&[hit("card")], 0);
    assert_eq!(out, vec!["card"]);
    assert!(r.is_visible(&"card"));
}

#[test]
fn reveal_is_monotonic() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe("card");
    r.on_intersections(&[hit("card")], 0);

    for now in [10, 20, 30] {
        assert!(r.on_intersections(&[miss("card")], now).is_empty());
        assert!(r.is_visible(&"card"));
    }
    // Re-entering does not report the element again.
    assert!(r.on_intersections(&[hit("card")], 40).is_empty());
    assert!(r.is_visible(&"card"));
}

#[test]
fn reveal_ignores_non_intersecting_and_unregistered_entries() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe("card");
    assert!(r.on_intersections(&[miss("card")], 0).is_empty());
    assert!(!r.is_visible(&"card"));

    assert!(r.on_intersections(&[hit("stranger")], 0).is_empty());
    assert!(!r.is_visible(&"stranger"));
}

#[test]
fn stagger_group_reveals_children_in_index_order() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe_group("list", ["a", "b", "c", "d"]);

    let out = r.on_intersections(&[hit("list")], 1000);
    assert_eq!(out, vec!["list"]);
    assert!(r.is_visible(&"list"));
    assert_eq!(r.pending_len(), 4);
    assert_eq!(r.next_due(), Some(1000));

    let mut log = Vec::new();
    for now in (1000..=1300).step_by(10) {
        for child in r.advance(now, |_| true) {
            log.push((child, now));
        }
    }
    assert_eq!(
        log,
        vec![("a", 1000), ("b", 1080), ("c", 1160), ("d", 1240)]
    );
    assert_eq!(r.pending_len(), 0);
}

#[test]
fn stagger_children_never_fire_early() {
    let mut r = RevealEngine::new(RevealOptions::default().with_stagger_interval_ms(80));
    r.observe_group(0u32, [1, 2, 3]);
    r.on_intersections(&[hit(0)], 0);

    assert_eq!(r.advance(79, |_| true), vec![1]);
    assert!(!r.is_visible(&2));
    assert_eq!(r.advance(80, |_| true), vec![2]);
    assert_eq!(r.advance(159, |_| true), Vec::<u32>::new());
    assert_eq!(r.advance(160, |_| true), vec![3]);
}

#[test]
fn stagger_task_for_removed_child_is_a_noop() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe_group("list", ["a", "gone", "c"]);
    r.on_intersections(&[hit("list")], 0);

    let out = r.advance(1_000, |k| *k != "gone");
    assert_eq!(out, vec!["a", "c"]);
    assert!(!r.is_visible(&"gone"));
    assert_eq!(r.pending_len(), 0);
}

#[test]
fn stagger_group_does_not_restagger_on_reentry() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe_group("list", ["a", "b"]);
    r.on_intersections(&[hit("list")], 0);
    r.advance(1_000, |_| true);

    r.on_intersections(&[miss("list")], 2_000);
    r.on_intersections(&[hit("list")], 3_000);
    assert_eq!(r.pending_len(), 0);
}

#[test]
fn nested_group_revealed_by_parent_still_staggers_on_its_own_intersection() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe_group("outer", ["inner"]);
    r.observe_group("inner", ["x", "y"]);

    r.on_intersections(&[hit("outer")], 0);
    assert_eq!(r.advance(0, |_| true), vec!["inner"]);
    assert!(!r.is_visible(&"x"));

    // Already visible, so nothing new is reported, but its children are scheduled.
    assert!(r.on_intersections(&[hit("inner")], 10).is_empty());
    assert_eq!(r.advance(90, |_| true), vec!["x", "y"]);
}

#[test]
fn nested_group_settles_only_after_its_own_intersection() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe_group("outer", ["inner", "card"]);
    r.observe_group("inner", ["x"]);

    r.on_intersections(&[hit("outer")], 0);
    assert!(r.is_settled(&"outer"));
    r.advance(80, |_| true);
    assert!(r.is_visible(&"inner"));
    assert!(!r.is_settled(&"inner"), "visible but its children are not scheduled");
    assert!(r.is_settled(&"card"));

    r.on_intersections(&[hit("inner")], 100);
    assert!(r.is_settled(&"inner"));
    assert!(!r.is_settled(&"x"));
    r.advance(100, |_| true);
    assert!(r.is_settled(&"x"));
}

#[test]
fn first_pass_signal_fires_once() {
    let mut r: RevealEngine<u32> = RevealEngine::new(RevealOptions::default());
    assert!(!r.has_completed_first_pass());
    assert!(!r.take_first_pass_complete());

    r.on_intersections(&[], 0);
    assert!(r.has_completed_first_pass());
    assert!(r.take_first_pass_complete());
    assert!(!r.take_first_pass_complete());

    r.on_intersections(&[], 10);
    assert!(!r.take_first_pass_complete());
}

#[test]
fn duplicate_registration_keeps_the_first_kind() {
    let mut r = RevealEngine::new(RevealOptions::default());
    r.observe_group("g", ["a"]);
    r.observe("g");
    assert_eq!(r.kind(&"g"), Some(&RevealKind::Stagger(vec!["a"])));
    assert_eq!(r.registered_len(), 1);
}

#[test]
fn hero_never_entering_view_keeps_overlay_shown() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    assert_eq!(h.state(), FallbackState::Shown);
    assert_eq!(h.on_intersections(&[miss("h2")], false), None);
    assert_eq!(h.on_intersections(&[miss("h2")], true), None);
    assert!(!h.is_overlay_hidden());
    assert!(!h.is_watching());
}

#[test]
fn hero_entering_view_already_revealed_hides_on_same_notification() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    assert_eq!(
        h.on_intersections(&[hit("h2")], true),
        Some(OverlayChange::Hide)
    );
    assert!(h.is_overlay_hidden());
    assert!(!h.is_watching());
}

#[test]
fn hero_waits_for_lagging_reveal_then_hides_exactly_once() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    assert_eq!(h.on_intersections(&[hit("h2")], false), None);
    assert_eq!(h.state(), FallbackState::AwaitingReveal);
    assert!(h.is_watching());

    // Unrelated elements and unsatisfied changes keep the subscription.
    assert_eq!(h.on_attributes_changed(&"other", true), None);
    assert_eq!(h.on_attributes_changed(&"h2", false), None);
    assert!(h.is_watching());

    assert_eq!(
        h.on_attributes_changed(&"h2", true),
        Some(OverlayChange::Hide)
    );
    assert!(!h.is_watching());
    assert_eq!(h.watch().fired(), 1);

    // One-shot: later changes are not delivered.
    assert_eq!(h.on_attributes_changed(&"h2", true), None);
    assert_eq!(h.watch().fired(), 1);
}

#[test]
fn hero_leaving_view_reshows_and_drops_the_watch() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    h.on_intersections(&[hit("h2")], false);
    assert!(h.is_watching());

    assert_eq!(h.on_intersections(&[miss("h2")], false), None);
    assert_eq!(h.state(), FallbackState::Shown);
    assert!(!h.is_watching());
    // The reveal landing while out of view must not hide the overlay.
    assert_eq!(h.on_attributes_changed(&"h2", true), None);
    assert!(!h.is_overlay_hidden());

    h.on_intersections(&[hit("h2")], true);
    assert!(h.is_overlay_hidden());
    assert_eq!(
        h.on_intersections(&[miss("h2")], true),
        Some(OverlayChange::Show)
    );
    assert!(!h.is_overlay_hidden());
}

#[test]
fn hero_keeps_at_most_one_watch() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    h.on_intersections(&[hit("h2")], false);
    h.on_intersections(&[hit("h2")], false);
    h.catch_up(Bounds::new(10.0, 40.0), 800.0, false);
    assert!(h.is_watching());
    assert_eq!(h.on_attributes_changed(&"h2", true), Some(OverlayChange::Hide));
    assert_eq!(h.on_attributes_changed(&"h2", true), None);
}

#[test]
fn hero_ignores_entries_for_other_targets() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    assert_eq!(h.on_intersections(&[hit("card"), miss("intro")], true), None);
    assert_eq!(h.state(), FallbackState::Shown);
    assert_eq!(
        h.on_intersections(&[miss("card"), hit("h2"), miss("intro")], true),
        Some(OverlayChange::Hide)
    );
}

#[test]
fn hero_applies_last_entry_of_a_batch() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    assert_eq!(
        h.on_intersections(&[hit("h2"), miss("h2")], true),
        None,
        "hide then show within one batch is not a visible change"
    );
    assert!(!h.is_overlay_hidden());
}

#[test]
fn hero_catch_up_covers_pages_loaded_mid_scroll() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    assert_eq!(
        h.catch_up(Bounds::new(120.0, 60.0), 800.0, true),
        Some(OverlayChange::Hide)
    );

    let mut h = HeroFallback::new("h2", HeroOptions::default());
    assert_eq!(h.catch_up(Bounds::new(120.0, 60.0), 800.0, false), None);
    assert!(h.is_watching());
    assert_eq!(h.on_attributes_changed(&"h2", true), Some(OverlayChange::Hide));
}

#[test]
fn hero_catch_up_ignores_headings_outside_the_viewport() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    // Scrolled far past: the heading is above the viewport.
    assert_eq!(h.catch_up(Bounds::new(-900.0, 60.0), 800.0, true), None);
    // Not reached yet.
    assert_eq!(h.catch_up(Bounds::new(900.0, 60.0), 800.0, true), None);
    assert!(!h.is_overlay_hidden());
    assert!(!h.is_watching());
}

#[test]
fn hero_catch_up_is_idempotent_after_observer_callback() {
    let mut h = HeroFallback::new("h2", HeroOptions::default());
    h.on_intersections(&[hit("h2")], true);
    assert_eq!(h.catch_up(Bounds::new(10.0, 60.0), 800.0, true), None);
    assert!(h.is_overlay_hidden());
}

/// The overlay is hidden exactly when the heading intersects and is visible.
#[test]
fn hero_invariant_holds_over_random_event_sequences() {
    let mut seed = 0x2545_f491_4f6c_dd1du64;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    for _ in 0..200 {
        let mut h = HeroFallback::new(0u32, HeroOptions::default());
        let mut intersecting = false;
        let mut visible = false;
        for _ in 0..40 {
            match next() % 4 {
                0 => {
                    intersecting = !intersecting;
                    h.on_intersections(&[IntersectionEntry::new(0, intersecting)], visible);
                }
                1 if !visible => {
                    visible = true;
                    h.on_attributes_changed(&0, visible);
                }
                2 => {
                    h.on_attributes_changed(&1, true);
                }
                _ => {}
            }
            assert_eq!(h.is_overlay_hidden(), intersecting && visible);
            assert!(!h.is_watching() || (intersecting && !visible));
        }
    }
}

#[test]
fn metrics_progress_matches_scroll_fraction() {
    let m = ScrollMetrics::compute(
        &Viewport::new(600.0, 800.0, 2000.0),
        &MetricsOptions::default(),
    );
    assert!(approx(m.progress_percent, 50.0));
    assert!(approx(m.parallax_offset, 72.0));
    assert!(m.header_scrolled);
}

#[test]
fn metrics_progress_is_zero_when_not_scrollable() {
    let opts = MetricsOptions::default();
    let m = ScrollMetrics::compute(&Viewport::new(0.0, 800.0, 800.0), &opts);
    assert_eq!(m.progress_percent, 0.0);
    let m = ScrollMetrics::compute(&Viewport::new(0.0, 800.0, 500.0), &opts);
    assert_eq!(m.progress_percent, 0.0);
    assert!(!m.progress_percent.is_nan());
}

#[test]
fn metrics_progress_stays_in_range_on_overscroll() {
    let opts = MetricsOptions::default();
    let m = ScrollMetrics::compute(&Viewport::new(-40.0, 800.0, 2000.0), &opts);
    assert_eq!(m.progress_percent, 0.0);
    let m = ScrollMetrics::compute(&Viewport::new(1300.0, 800.0, 2000.0), &opts);
    assert_eq!(m.progress_percent, 100.0);
}

#[test]
fn header_threshold_is_strict() {
    let opts = MetricsOptions::default();
    let at = |off| ScrollMetrics::compute(&Viewport::new(off, 800.0, 4000.0), &opts);
    assert!(!at(0.0).header_scrolled);
    assert!(!at(18.0).header_scrolled);
    assert!(at(19.0).header_scrolled);
}

#[test]
fn frame_scheduler_drops_notifications_while_pending() {
    let mut s = FrameScheduler::new();
    assert!(s.request());
    assert!(!s.request());
    assert!(!s.request());
    assert!(s.is_pending());
    assert_eq!(s.coalesced(), 2);

    let mut runs = 0;
    assert_eq!(s.run(|| runs += 1), Some(()));
    assert_eq!(s.run(|| runs += 1), None);
    assert_eq!(runs, 1);
    assert!(s.request());
}

#[test]
fn n_scroll_notifications_in_one_frame_recompute_once() {
    let mut m = ScrollMetricsEngine::new(MetricsOptions::default());
    let vp = Viewport::new(0.0, 800.0, 2000.0);
    m.baseline(&vp);
    assert_eq!(m.recomputations(), 1);

    let requested = (0..50).filter(|_| m.on_scroll()).count();
    assert_eq!(requested, 1);

    let out = m.on_frame(&vp.with_scroll_offset(600.0)).unwrap();
    assert!(approx(out.progress_percent, 50.0));
    assert_eq!(m.recomputations(), 2);
    assert_eq!(m.on_frame(&vp), None);
    assert_eq!(m.recomputations(), 2);
    assert_eq!(m.current(), Some(out));
}

#[test]
fn nav_entry_parses_in_page_links_only() {
    assert_eq!(NavEntry::from_href("#contact"), Some(NavEntry::new("contact")));
    assert_eq!(NavEntry::from_href("#"), None);
    assert_eq!(NavEntry::from_href("/about"), None);
    assert_eq!(NavEntry::new("about").href(), "#about");
}

fn tracker() -> NavigationTracker<&'static str> {
    let mut t = NavigationTracker::new(NavOptions::default());
    for id in ["home", "about", "contact"] {
        t.add_section(id, id);
    }
    t.add_entry("#home");
    t.add_entry("#about");
    t.add_entry("#contact");
    t
}

#[test]
fn nav_marks_exactly_the_referencing_entry_active() {
    let mut t = tracker();
    let update = t.on_intersections(&[hit("contact")]);
    assert_eq!(update.active, Some(Some(2)));
    assert_eq!(t.active_section_id(), Some("contact"));
    assert!(t.is_active(2));
    assert!(!t.is_active(0));
    assert!(!t.is_active(1));
}

#[test]
fn nav_last_intersecting_section_in_a_batch_wins() {
    let mut t = tracker();
    let update = t.on_intersections(&[hit("home"), hit("about")]);
    assert_eq!(update.active, Some(Some(1)));
    assert_eq!(t.in_view_len(), 2);
    assert!(t.is_in_view(&"home"));
    assert!(t.is_in_view(&"about"));
}

#[test]
fn nav_leaving_the_band_clears_in_view_but_keeps_active() {
    let mut t = tracker();
    t.on_intersections(&[hit("about")]);
    let update = t.on_intersections(&[miss("about")]);
    assert_eq!(update.active, None);
    assert_eq!(update.in_view, vec![("about", false)]);
    assert_eq!(t.active_entry(), Some(1));
    assert!(!t.is_in_view(&"about"));
}

#[test]
fn nav_section_without_entry_clears_active() {
    let mut t = tracker();
    t.add_section("footer", "footer");
    t.on_intersections(&[hit("home")]);
    let update = t.on_intersections(&[hit("footer")]);
    assert_eq!(update.active, Some(None));
    assert_eq!(t.active_entry(), None);
}

#[test]
fn nav_ignores_unknown_targets() {
    let mut t = tracker();
    assert!(t.on_intersections(&[hit("nowhere")]).is_empty());
}

#[test]
fn nav_band_selects_the_mid_viewport_section() {
    let opts = NavOptions::default().observer;
    let vp = Viewport::new(0.0, 1000.0, 5000.0);
    // Band is [350, 550).
    assert!(!opts.evaluate(Bounds::new(0.0, 300.0), &vp).0);
    assert!(opts.evaluate(Bounds::new(300.0, 100.0), &vp).0);
    assert!(opts.evaluate(Bounds::new(500.0, 800.0), &vp).0);
    assert!(!opts.evaluate(Bounds::new(560.0, 800.0), &vp).0);
}

#[test]
fn attribute_watch_is_one_shot() {
    let mut w = AttributeWatch::new();
    assert!(w.observe("h2"));
    assert!(!w.observe("other"));
    assert_eq!(w.target(), Some(&"h2"));
    assert!(w.notify(&"h2", true));
    assert!(!w.is_active());
    assert!(!w.notify(&"h2", true));
}

#[test]
fn timer_queue_orders_by_due_then_insertion() {
    let mut q = TimerQueue::new();
    q.schedule(10, "b");
    q.schedule(5, "a");
    q.schedule(10, "c");
    assert_eq!(q.next_due(), Some(5));
    assert_eq!(q.pop_due(4), None);
    assert_eq!(q.pop_due(20), Some((5, "a")));
    assert_eq!(q.pop_due(20), Some((10, "b")));
    assert_eq!(q.pop_due(20), Some((10, "c")));
    assert!(q.is_empty());
}
