use revealer::{Bounds, ElementKey};

use crate::key::BoundsMap;

/// Which optional presentation targets exist on the page.
///
/// A missing target disables the matching output; nothing else changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Targets {
    pub progress_bar: bool,
    pub header: bool,
    pub parallax: bool,
}

impl Default for Targets {
    fn default() -> Self {
        Self::all()
    }
}

impl Targets {
    pub fn all() -> Self {
        Self {
            progress_bar: true,
            header: true,
            parallax: true,
        }
    }

    pub fn none() -> Self {
        Self {
            progress_bar: false,
            header: false,
            parallax: false,
        }
    }
}

/// Layout of the page: document-space bounds of every element the engines care about.
///
/// Elements absent from the page have no bounds; observers skip them and delayed reveal tasks
/// targeting them become no-ops.
#[derive(Clone, Debug)]
pub struct Page<K> {
    bounds: BoundsMap<K>,
}

impl<K> Default for Page<K> {
    fn default() -> Self {
        Self {
            bounds: BoundsMap::default(),
        }
    }
}

impl<K: ElementKey> Page<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or moves an element.
    pub fn set_bounds(&mut self, key: K, bounds: Bounds) {
        self.bounds.insert(key, bounds);
    }

    pub fn remove(&mut self, key: &K) -> Option<Bounds> {
        self.bounds.remove(key)
    }

    pub fn bounds(&self, key: &K) -> Option<Bounds> {
        self.bounds.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.bounds.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}
