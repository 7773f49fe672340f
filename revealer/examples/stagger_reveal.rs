// Example: driving the reveal engine with a geometric observer and a simulated clock.
use revealer::{Bounds, IntersectionObserver, RevealEngine, RevealOptions, Viewport};

fn main() {
    let options = RevealOptions::default();
    let mut engine = RevealEngine::new(options);
    let mut observer = IntersectionObserver::new(options.observer);

    // Element 0 is a group whose children are 1..=4; element 5 is a plain card.
    let layout = [
        Bounds::new(1200.0, 300.0),
        Bounds::new(1200.0, 60.0),
        Bounds::new(1260.0, 60.0),
        Bounds::new(1320.0, 60.0),
        Bounds::new(1380.0, 60.0),
        Bounds::new(200.0, 120.0),
    ];
    engine.observe_group(0usize, [1, 2, 3, 4]);
    engine.observe(5);
    observer.observe(0);
    observer.observe(5);

    let mut now_ms = 0u64;
    for scroll in [0.0, 400.0, 900.0] {
        let vp = Viewport::new(scroll, 800.0, 3000.0);
        let batch = observer.take_records(&vp, |k| layout.get(*k).copied());
        for k in engine.on_intersections(&batch, now_ms) {
            observer.unobserve(&k);
            println!("t={now_ms} scroll={scroll} revealed={k}");
        }
        now_ms += 16;
    }

    while let Some(due) = engine.next_due() {
        now_ms = now_ms.max(due);
        for k in engine.advance(now_ms, |_| true) {
            println!("t={now_ms} revealed={k} (stagger)");
        }
    }
    println!("visible={}", engine.visible_len());
}
