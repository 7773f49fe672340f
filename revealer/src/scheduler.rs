/// Coalesces high-frequency notifications into at most one pending run per rendered frame.
///
/// The host calls [`request`](Self::request) on every notification and schedules a frame
/// callback only when it returns `true`. Inside the frame callback it calls
/// [`run`](Self::run), which clears the in-flight guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    pending: bool,
    requests: u64,
    coalesced: u64,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a notification. Returns `true` when the host must request a frame; returns
    /// `false` when a frame is already pending and the notification was dropped.
    pub fn request(&mut self) -> bool {
        self.requests = self.requests.saturating_add(1);
        if self.pending {
            self.coalesced = self.coalesced.saturating_add(1);
            return false;
        }
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Runs `f` if a frame was requested, clearing the guard. Returns `None` otherwise.
    pub fn run<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
        if !self.pending {
            return None;
        }
        let out = f();
        self.pending = false;
        self.frames = self.frames.saturating_add(1);
        Some(out)
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Notifications dropped because a frame was already pending.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
