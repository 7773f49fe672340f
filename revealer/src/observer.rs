use alloc::vec::Vec;

use crate::{Band, Bounds, ElementKey, RootMargin, Viewport};

/// Configuration for an intersection observer instance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Minimum visible fraction of the element (0.0..=1.0) for it to count as intersecting.
    pub threshold: f32,
}

impl ObserverOptions {
    pub fn new(threshold: f32) -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            threshold,
        }
    }

    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Evaluates one element against the viewport. Returns `(is_intersecting, ratio)`.
    pub fn evaluate(&self, bounds: Bounds, viewport: &Viewport) -> (bool, f32) {
        let ratio = intersection_ratio(bounds, self.root_margin.band(viewport));
        (ratio > 0.0 && ratio >= self.threshold, ratio)
    }
}

/// Fraction of `bounds` that lies inside `band`.
///
/// A zero-height element counts as fully visible while its position is inside the band.
pub fn intersection_ratio(bounds: Bounds, band: Band) -> f32 {
    if bounds.height <= 0.0 {
        return if bounds.top >= band.start && bounds.top <= band.end {
            1.0
        } else {
            0.0
        };
    }
    let start = bounds.top.max(band.start);
    let end = bounds.bottom().min(band.end);
    if end <= start {
        return 0.0;
    }
    ((end - start) / bounds.height).min(1.0) as f32
}

/// One record of an intersection batch.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<K> {
    pub target: K,
    pub is_intersecting: bool,
    pub ratio: f32,
}

impl<K> IntersectionEntry<K> {
    pub fn new(target: K, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }
}

#[derive(Clone, Debug)]
struct Observed<K> {
    key: K,
    /// Last reported intersecting state; `None` until the first evaluation.
    last: Option<bool>,
}

/// A geometric intersection observer for hosts without a platform primitive.
///
/// Targets are evaluated on demand with [`take_records`](Self::take_records), which returns
/// only the targets whose intersecting state changed since the previous call. A target is
/// always reported on its first evaluation, like the platform observer's initial callback.
#[derive(Clone, Debug)]
pub struct IntersectionObserver<K> {
    options: ObserverOptions,
    targets: Vec<Observed<K>>,
}

impl<K: ElementKey> IntersectionObserver<K> {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Starts observing `key`. Observing the same key twice is a no-op.
    pub fn observe(&mut self, key: K) {
        if self.is_observing(&key) {
            return;
        }
        self.targets.push(Observed { key, last: None });
    }

    pub fn unobserve(&mut self, key: &K) {
        self.targets.retain(|t| t.key != *key);
    }

    pub fn is_observing(&self, key: &K) -> bool {
        self.targets.iter().any(|t| t.key == *key)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Evaluates all targets and returns the batch of changed entries, in observe order.
    ///
    /// `bounds_of` returns the document-space bounds of a target, or `None` when the target
    /// is no longer laid out; such targets are skipped.
    pub fn take_records(
        &mut self,
        viewport: &Viewport,
        mut bounds_of: impl FnMut(&K) -> Option<Bounds>,
    ) -> Vec<IntersectionEntry<K>> {
        let mut out = Vec::new();
        for t in &mut self.targets {
            let Some(bounds) = bounds_of(&t.key) else {
                continue;
            };
            let (is_intersecting, ratio) = self.options.evaluate(bounds, viewport);
            if t.last == Some(is_intersecting) {
                continue;
            }
            t.last = Some(is_intersecting);
            out.push(IntersectionEntry {
                target: t.key.clone(),
                is_intersecting,
                ratio,
            });
        }
        if !out.is_empty() {
            rtrace!(
                entries = out.len(),
                scroll_offset = viewport.scroll_offset,
                "IntersectionObserver::take_records"
            );
        }
        out
    }
}
