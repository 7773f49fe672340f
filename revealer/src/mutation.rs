use crate::ElementKey;

/// A one-shot subscription to attribute changes on a single element.
///
/// The subscription stays active across changes that do not satisfy the caller's condition
/// and disconnects itself the first time one does. At most one target is watched at a time.
#[derive(Clone, Debug)]
pub struct AttributeWatch<K> {
    target: Option<K>,
    fired: u64,
}

impl<K> Default for AttributeWatch<K> {
    fn default() -> Self {
        Self {
            target: None,
            fired: 0,
        }
    }
}

impl<K: ElementKey> AttributeWatch<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `target`. Returns `false` (and keeps the existing subscription) if one
    /// is already active.
    pub fn observe(&mut self, target: K) -> bool {
        if self.target.is_some() {
            return false;
        }
        self.target = Some(target);
        true
    }

    pub fn disconnect(&mut self) {
        self.target = None;
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&K> {
        self.target.as_ref()
    }

    /// How many times the subscription has fired.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Delivers an attribute change on `changed`.
    ///
    /// Returns `true` when the watch fired: `changed` is the watched element and `satisfied`
    /// holds. The subscription is disconnected in that case.
    pub fn notify(&mut self, changed: &K, satisfied: bool) -> bool {
        if self.target.as_ref() != Some(changed) || !satisfied {
            return false;
        }
        self.target = None;
        self.fired = self.fired.saturating_add(1);
        true
    }
}
