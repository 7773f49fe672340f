use alloc::collections::BTreeMap;

/// A queue of fire-and-forget delayed tasks, driven by the host clock.
///
/// Tasks fire in due-time order; tasks due at the same time fire in scheduling order.
/// There is no cancellation: a task whose target went away is expected to be a no-op.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    tasks: BTreeMap<(u64, u64), T>,
    seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, task: T) {
        self.tasks.insert((due_ms, self.seq), task);
        self.seq = self.seq.wrapping_add(1);
    }

    pub fn next_due(&self) -> Option<u64> {
        self.tasks.first_key_value().map(|(&(due, _), _)| due)
    }

    /// Removes and returns the earliest task if it is due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, T)> {
        if self.next_due()? > now_ms {
            return None;
        }
        self.tasks.pop_first().map(|((due, _), task)| (due, task))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
