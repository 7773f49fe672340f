#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub(crate) type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<K> = BTreeSet<K>;

/// Identity of a page element tracked by the engines.
///
/// Adapters pick whatever is cheap for them: an index into their own element table, a
/// string id, a node handle. With `std` the key must be hashable; without it, ordered.
#[cfg(feature = "std")]
pub trait ElementKey: Clone + core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: Clone + core::hash::Hash + Eq> ElementKey for K {}

#[cfg(not(feature = "std"))]
pub trait ElementKey: Clone + Ord {}
#[cfg(not(feature = "std"))]
impl<K: Clone + Ord> ElementKey for K {}
