use alloc::vec::Vec;
use core::mem;

use crate::key::{KeyMap, KeySet};
use crate::{ElementKey, IntersectionEntry, ObserverOptions, TimerQueue};

/// Configuration for [`RevealEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealOptions {
    pub observer: ObserverOptions,
    /// Delay between consecutive children of a stagger group.
    pub stagger_interval_ms: u64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            observer: ObserverOptions::new(0.12),
            stagger_interval_ms: 80,
        }
    }
}

impl RevealOptions {
    pub fn with_observer(mut self, observer: ObserverOptions) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_stagger_interval_ms(mut self, interval_ms: u64) -> Self {
        self.stagger_interval_ms = interval_ms;
        self
    }
}

/// How a registered element reveals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealKind<K> {
    /// The element itself is marked visible.
    Single,
    /// The element is marked visible, then each child in order after `index × interval`.
    Stagger(Vec<K>),
}

/// Marks elements visible the first time they intersect the viewport.
///
/// The visible flag is monotonic: nothing in the engine ever clears it. Stagger children are
/// revealed by delayed tasks that the host drives with [`advance`](Self::advance).
#[derive(Clone, Debug)]
pub struct RevealEngine<K> {
    options: RevealOptions,
    kinds: KeyMap<K, RevealKind<K>>,
    /// Registered elements whose own intersection already fired.
    triggered: KeySet<K>,
    visible: KeySet<K>,
    pending: TimerQueue<K>,
    batches: u64,
    first_pass_signal: bool,
}

impl<K: ElementKey> RevealEngine<K> {
    pub fn new(options: RevealOptions) -> Self {
        rdebug!(
            threshold = options.observer.threshold,
            stagger_interval_ms = options.stagger_interval_ms,
            "RevealEngine::new"
        );
        Self {
            options,
            kinds: KeyMap::new(),
            triggered: KeySet::new(),
            visible: KeySet::new(),
            pending: TimerQueue::new(),
            batches: 0,
            first_pass_signal: false,
        }
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Registers an element that reveals on its own.
    pub fn observe(&mut self, key: K) {
        self.register(key, RevealKind::Single);
    }

    /// Registers a stagger group with its children in document order.
    pub fn observe_group(&mut self, key: K, children: impl IntoIterator<Item = K>) {
        self.register(key, RevealKind::Stagger(children.into_iter().collect()));
    }

    fn register(&mut self, key: K, kind: RevealKind<K>) {
        if self.kinds.contains_key(&key) {
            rwarn!("RevealEngine: element registered twice; keeping the first registration");
            return;
        }
        self.kinds.insert(key, kind);
    }

    pub fn is_registered(&self, key: &K) -> bool {
        self.kinds.contains_key(key)
    }

    pub fn kind(&self, key: &K) -> Option<&RevealKind<K>> {
        self.kinds.get(key)
    }

    pub fn registered_len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_visible(&self, key: &K) -> bool {
        self.visible.contains(key)
    }

    /// Whether `key` no longer needs its own intersection.
    ///
    /// A stagger group is settled once its own intersection scheduled its children, even when
    /// a parent group's task already made it visible. Anything else is settled once visible.
    /// Hosts stop observing an element only when it is settled.
    pub fn is_settled(&self, key: &K) -> bool {
        match self.kinds.get(key) {
            Some(RevealKind::Stagger(_)) => self.triggered.contains(key),
            _ => self.visible.contains(key),
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Number of stagger tasks that have not fired yet.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.next_due()
    }

    /// Handles an intersection batch.
    ///
    /// Returns the elements whose visible flag was newly set, in the order they were set.
    /// Non-intersecting entries and unregistered targets are ignored.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry<K>], now_ms: u64) -> Vec<K> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !entry.is_intersecting || self.triggered.contains(&entry.target) {
                continue;
            }
            let Some(kind) = self.kinds.get(&entry.target) else {
                continue;
            };
            self.triggered.insert(entry.target.clone());
            if let RevealKind::Stagger(children) = kind {
                let interval = self.options.stagger_interval_ms;
                rtrace!(
                    children = children.len(),
                    interval,
                    now_ms,
                    "RevealEngine: staggering group"
                );
                for (i, child) in children.iter().enumerate() {
                    let due = now_ms.saturating_add(interval.saturating_mul(i as u64));
                    self.pending.schedule(due, child.clone());
                }
            }
            if self.visible.insert(entry.target.clone()) {
                revealed.push(entry.target.clone());
            }
        }

        if self.batches == 0 {
            self.first_pass_signal = true;
        }
        self.batches = self.batches.saturating_add(1);
        revealed
    }

    /// Fires every stagger task due at `now_ms`.
    ///
    /// `is_alive` reports whether a child still exists; tasks for removed children are
    /// dropped silently. Returns the newly revealed children.
    pub fn advance(&mut self, now_ms: u64, mut is_alive: impl FnMut(&K) -> bool) -> Vec<K> {
        let mut revealed = Vec::new();
        while let Some((_due, child)) = self.pending.pop_due(now_ms) {
            if !is_alive(&child) {
                rdebug!("RevealEngine: stagger target is gone; skipping");
                continue;
            }
            if self.visible.insert(child.clone()) {
                revealed.push(child);
            }
        }
        revealed
    }

    /// Whether at least one intersection batch has been processed.
    pub fn has_completed_first_pass(&self) -> bool {
        self.batches > 0
    }

    /// Returns `true` exactly once, after the first intersection batch was processed.
    ///
    /// Hosts use this as the completion signal for startup checks that must observe the
    /// result of the first reveal pass.
    pub fn take_first_pass_complete(&mut self) -> bool {
        mem::replace(&mut self.first_pass_signal, false)
    }
}
