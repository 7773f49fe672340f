use crate::*;

#[test]
fn default_selectors_match_landing_page_markup() {
    let s = Selectors::default();
    assert_eq!(
        s.reveal,
        ".fade-in, .slide-left, .slide-right, .zoom-in, .stagger, .appear, [data-stagger]"
    );
    assert_eq!(s.hero_heading, "#bienvenida .contenido-bienvenida h2.fade-in");
    assert_eq!(s.hero_overlay, "#bienvenida .hero-fallback");
    assert_eq!(s.secondary_overlay, ".header-welcome");
    assert_eq!(s.progress, "#scroll-progress");
    assert_eq!(s.header, "#site-header");
    assert_eq!(s.sections, "main section[id]");
    assert_eq!(s.nav_links, ".main-nav a");
    assert_eq!(s.parallax, ".hero");
    assert_eq!(s.social_cards, ".social-card");
}

#[test]
fn selector_builders_override_defaults() {
    let s = Selectors::new()
        .with_reveal(".reveal")
        .with_hero("#top h1", "#top .cover", ".banner")
        .with_navigation("article[id]", "nav a")
        .with_social_cards(".card");
    assert_eq!(s.reveal, ".reveal");
    assert_eq!(s.hero_heading, "#top h1");
    assert_eq!(s.hero_overlay, "#top .cover");
    assert_eq!(s.secondary_overlay, ".banner");
    assert_eq!(s.sections, "article[id]");
    assert_eq!(s.nav_links, "nav a");
    assert_eq!(s.social_cards, ".card");
    assert_eq!(s.progress, Selectors::default().progress);
}

#[test]
fn reveal_selector_covers_stagger_markers() {
    let s = Selectors::default();
    assert!(s.reveal.contains(&format!(".{}", class::STAGGER)));
    assert!(s.reveal.contains(&format!("[{STAGGER_ATTRIBUTE}]")));
}

#[test]
fn style_values_are_css() {
    assert_eq!(dom::percent(50.0), "50%");
    assert_eq!(dom::percent(0.0), "0%");
    assert_eq!(dom::percent(12.5), "12.5%");
    assert_eq!(dom::parallax_position(72.0), "center calc(50% + 72px)");
    assert_eq!(dom::parallax_position(0.0), "center calc(50% + 0px)");
}

#[test]
fn timer_delay_is_clamped() {
    assert_eq!(bindings::delay_until(1080, 1000), 80);
    assert_eq!(bindings::delay_until(1000, 1000), 0);
    assert_eq!(bindings::delay_until(900, 1000), 0);
    assert_eq!(bindings::delay_until(u64::MAX, 0), i32::MAX);
}

#[test]
fn zero_threshold_trusts_the_platform_flag() {
    assert!(page::is_hit(true, 0.0, 0.0));
    assert!(page::is_hit(true, 0.4, 0.0));
    assert!(!page::is_hit(false, 0.0, 0.0));
}

#[test]
fn positive_threshold_needs_enough_overlap() {
    assert!(!page::is_hit(true, 0.0, 0.12));
    assert!(!page::is_hit(true, 0.05, 0.12));
    assert!(page::is_hit(true, 0.1195, 0.12));
    assert!(page::is_hit(true, 1.0, 0.12));
    assert!(!page::is_hit(false, 1.0, 0.12));
}
