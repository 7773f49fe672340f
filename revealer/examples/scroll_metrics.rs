// Example: coalescing scroll notifications and tracking the active navigation entry.
use revealer::{
    IntersectionObserver, MetricsOptions, NavOptions, NavigationTracker, ScrollMetricsEngine,
    Viewport,
};

fn main() {
    let mut metrics = ScrollMetricsEngine::new(MetricsOptions::default());
    let mut nav = NavigationTracker::new(NavOptions::default());
    let mut observer = IntersectionObserver::new(nav.options().observer);

    let sections = [("about", 800.0), ("work", 1600.0), ("contact", 2400.0)];
    for (i, (id, _)) in sections.iter().enumerate() {
        nav.add_section(i, *id);
        nav.add_entry(&format!("#{id}"));
        observer.observe(i);
    }
    println!("tracking margin: {}", nav.options().observer.root_margin);

    let vp = Viewport::new(0.0, 800.0, 4000.0);
    println!("baseline: {:?}", metrics.baseline(&vp));

    for frame in 1..=4u32 {
        let scroll = 700.0 * f64::from(frame);
        let vp = vp.with_scroll_offset(scroll);
        // Several notifications per frame; only the first one asks for a frame.
        let requested = (0..5).filter(|_| metrics.on_scroll()).count();
        let m = metrics.on_frame(&vp);

        let batch = observer.take_records(&vp, |k| {
            sections
                .get(*k)
                .map(|(_, top)| revealer::Bounds::new(*top, 800.0))
        });
        let update = nav.on_intersections(&batch);
        println!(
            "frame={frame} scroll={scroll} requested={requested} metrics={m:?} active={:?}",
            update.active.map(|_| nav.active_section_id())
        );
    }
    println!("recomputations={}", metrics.recomputations());
}
