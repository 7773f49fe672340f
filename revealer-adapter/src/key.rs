#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type BoundsMap<K> = HashMap<K, revealer::Bounds>;
#[cfg(not(feature = "std"))]
pub(crate) type BoundsMap<K> = BTreeMap<K, revealer::Bounds>;
