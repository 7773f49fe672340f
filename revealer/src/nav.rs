use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::key::{KeyMap, KeySet};
use crate::{ElementKey, IntersectionEntry, Length, ObserverOptions, RootMargin};

/// Configuration for [`NavigationTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavOptions {
    pub observer: ObserverOptions,
}

impl Default for NavOptions {
    /// The tracking band covers 35%..55% of the viewport height.
    fn default() -> Self {
        Self {
            observer: ObserverOptions::new(0.0).with_root_margin(RootMargin::vertical(
                Length::Percent(-35.0),
                Length::Percent(-45.0),
            )),
        }
    }
}

impl NavOptions {
    pub fn with_observer(mut self, observer: ObserverOptions) -> Self {
        self.observer = observer;
        self
    }
}

/// A navigation entry referencing a section by identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavEntry {
    section_id: String,
}

impl NavEntry {
    pub fn new(section_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
        }
    }

    /// Parses an in-page link (`"#contact"`). Returns `None` for anything else.
    pub fn from_href(href: &str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        Some(Self::new(id))
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn href(&self) -> String {
        format!("#{}", self.section_id)
    }
}

/// Result of a navigation intersection batch.
#[derive(Clone, Debug, PartialEq)]
pub struct NavUpdate<K> {
    /// Set when the active entry changed; carries the new active entry index.
    pub active: Option<Option<usize>>,
    /// In-view marker changes, in batch order.
    pub in_view: Vec<(K, bool)>,
}

impl<K> NavUpdate<K> {
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.in_view.is_empty()
    }
}

/// Tracks which navigation entry is active from section intersections with a tracking band.
///
/// The active marker is exclusive (zero or one entry). The in-view marker is per section and
/// not exclusive.
#[derive(Clone, Debug)]
pub struct NavigationTracker<K> {
    options: NavOptions,
    sections: KeyMap<K, String>,
    entries: Vec<Option<NavEntry>>,
    active: Option<usize>,
    in_view: KeySet<K>,
}

impl<K: ElementKey> NavigationTracker<K> {
    pub fn new(options: NavOptions) -> Self {
        rdebug!(
            threshold = options.observer.threshold,
            "NavigationTracker::new"
        );
        Self {
            options,
            sections: KeyMap::new(),
            entries: Vec::new(),
            active: None,
            in_view: KeySet::new(),
        }
    }

    pub fn options(&self) -> &NavOptions {
        &self.options
    }

    pub fn add_section(&mut self, key: K, id: impl Into<String>) {
        self.sections.insert(key, id.into());
    }

    /// Adds a navigation entry from its link target and returns its index.
    ///
    /// Links that do not point at an in-page section are kept (so indexes match the host's
    /// entry list) but can never become active.
    pub fn add_entry(&mut self, href: &str) -> usize {
        self.entries.push(NavEntry::from_href(href));
        self.entries.len() - 1
    }

    pub fn section_id(&self, key: &K) -> Option<&str> {
        self.sections.get(key).map(String::as_str)
    }

    pub fn sections_len(&self) -> usize {
        self.sections.len()
    }

    pub fn entries_len(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, index: usize) -> Option<&NavEntry> {
        self.entries.get(index)?.as_ref()
    }

    pub fn active_entry(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn active_section_id(&self) -> Option<&str> {
        self.entry(self.active?).map(NavEntry::section_id)
    }

    pub fn is_in_view(&self, key: &K) -> bool {
        self.in_view.contains(key)
    }

    pub fn in_view_len(&self) -> usize {
        self.in_view.len()
    }

    fn entry_for(&self, id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.as_ref().is_some_and(|e| e.section_id == id))
    }

    /// Handles an intersection batch over sections.
    ///
    /// Each intersecting section makes the entry referencing it the only active one (the last
    /// such section in the batch wins). Every section entry updates that section's in-view
    /// marker. Targets that are not registered sections are ignored.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry<K>]) -> NavUpdate<K> {
        let before = self.active;
        let mut in_view = Vec::new();
        for e in entries {
            let Some(id) = self.sections.get(&e.target) else {
                continue;
            };
            if e.is_intersecting {
                self.active = self.entry_for(id);
            }
            let changed = if e.is_intersecting {
                self.in_view.insert(e.target.clone())
            } else {
                self.in_view.remove(&e.target)
            };
            if changed {
                in_view.push((e.target.clone(), e.is_intersecting));
            }
        }

        let active = (self.active != before).then_some(self.active);
        if let Some(_next) = active {
            rdebug!(
                active = ?_next,
                section = self.active_section_id(),
                "NavigationTracker: active entry changed"
            );
        }
        NavUpdate { active, in_view }
    }
}
