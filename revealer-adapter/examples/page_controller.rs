use revealer::{Bounds, Viewport};
use revealer_adapter::{CardAction, Controller, EngineOptions, MarkerChange, SocialCard};

fn main() {
    // Example: a controller driving a simulated landing page without holding any UI objects.
    //
    // An adapter would:
    // - register elements and their layout, then call start()
    // - forward scroll notifications, and call frame(now_ms) when on_scroll() asks for one
    // - arm a timer for next_timer_due() and call advance_timers(now_ms)
    // - apply drain_changes() to the real page
    let mut c = Controller::new(EngineOptions::default());

    c.add_element("heading", Bounds::new(320.0, 64.0));
    c.observe_reveal("heading");
    c.set_hero("heading", true);

    c.add_element("features", Bounds::new(1400.0, 400.0));
    let cards = ["card-a", "card-b", "card-c"];
    for (i, card) in cards.iter().enumerate() {
        c.add_element(*card, Bounds::new(1400.0 + 120.0 * i as f64, 120.0));
    }
    c.observe_stagger_group("features", cards);

    for (i, id) in ["about", "work", "contact"].iter().enumerate() {
        c.add_element(*id, Bounds::new(1000.0 * (i as f64 + 1.0), 1000.0));
        c.add_section(*id, *id);
        c.add_nav_entry(&format!("#{id}"));
    }

    let vp = Viewport::new(0.0, 800.0, 4000.0);
    c.start(vp, 0);
    print_changes(0, c.drain_changes());

    let mut now_ms = 0u64;
    for scroll in [300.0, 900.0, 1500.0, 2600.0] {
        now_ms += 16;
        if c.on_scroll(vp.with_scroll_offset(scroll)) {
            c.frame(now_ms);
        }
        while let Some(due) = c.next_timer_due() {
            now_ms = now_ms.max(due);
            c.advance_timers(now_ms);
        }
        print_changes(now_ms, c.drain_changes());
    }
    println!("markers={:?}", c.markers());

    let mut card = SocialCard::new().with_src("https://video.example/embed/42");
    for _ in 0..2 {
        match card.activate() {
            CardAction::InjectEmbed(src) => println!("inject embed for {src}"),
            other => println!("card action: {other:?}"),
        }
    }
}

fn print_changes(now_ms: u64, changes: Vec<MarkerChange<&str>>) {
    for change in changes {
        println!("t={now_ms} {change:?}");
    }
}
