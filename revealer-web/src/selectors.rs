/// Marker classes written to (and read from) the page.
pub mod class {
    pub const VISIBLE: &str = "visible";
    pub const HIDDEN: &str = "hidden";
    pub const SCROLLED: &str = "scrolled";
    pub const ACTIVE: &str = "active";
    pub const IN_VIEW: &str = "in-view";
    /// Marks a stagger group (as does [`super::STAGGER_ATTRIBUTE`]).
    pub const STAGGER: &str = "stagger";
    /// Social card that opens its address instead of embedding it.
    pub const REDIRECT: &str = "redirect";
}

pub const STAGGER_ATTRIBUTE: &str = "data-stagger";
pub const SOURCE_ATTRIBUTE: &str = "data-src";

/// CSS selectors locating the page's input markers.
///
/// Every selector except `reveal`, `sections`, `nav_links` and `social_cards` is resolved to at
/// most one element; a selector that matches nothing disables its component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Selectors {
    /// Elements eligible for reveal, stagger groups included.
    pub reveal: String,
    pub hero_heading: String,
    pub hero_overlay: String,
    pub secondary_overlay: String,
    pub progress: String,
    pub header: String,
    pub sections: String,
    pub nav_links: String,
    pub parallax: String,
    pub social_cards: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            reveal: ".fade-in, .slide-left, .slide-right, .zoom-in, .stagger, .appear, [data-stagger]"
                .into(),
            hero_heading: "#bienvenida .contenido-bienvenida h2.fade-in".into(),
            hero_overlay: "#bienvenida .hero-fallback".into(),
            secondary_overlay: ".header-welcome".into(),
            progress: "#scroll-progress".into(),
            header: "#site-header".into(),
            sections: "main section[id]".into(),
            nav_links: ".main-nav a".into(),
            parallax: ".hero".into(),
            social_cards: ".social-card".into(),
        }
    }
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reveal(mut self, selector: impl Into<String>) -> Self {
        self.reveal = selector.into();
        self
    }

    pub fn with_hero(
        mut self,
        heading: impl Into<String>,
        overlay: impl Into<String>,
        secondary_overlay: impl Into<String>,
    ) -> Self {
        self.hero_heading = heading.into();
        self.hero_overlay = overlay.into();
        self.secondary_overlay = secondary_overlay.into();
        self
    }

    pub fn with_navigation(
        mut self,
        sections: impl Into<String>,
        nav_links: impl Into<String>,
    ) -> Self {
        self.sections = sections.into();
        self.nav_links = nav_links.into();
        self
    }

    pub fn with_social_cards(mut self, selector: impl Into<String>) -> Self {
        self.social_cards = selector.into();
        self
    }
}
