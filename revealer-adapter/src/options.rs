use revealer::{HeroOptions, MetricsOptions, NavOptions, RevealOptions};

/// Configuration for every engine a [`crate::Controller`] drives.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so a page can
/// ship its tuning as data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    pub reveal: RevealOptions,
    pub hero: HeroOptions,
    pub metrics: MetricsOptions,
    pub nav: NavOptions,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reveal(mut self, reveal: RevealOptions) -> Self {
        self.reveal = reveal;
        self
    }

    pub fn with_hero(mut self, hero: HeroOptions) -> Self {
        self.hero = hero;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsOptions) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_nav(mut self, nav: NavOptions) -> Self {
        self.nav = nav;
        self
    }
}
