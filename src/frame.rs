/// Coalesces bursts of events into at most one callback per animation frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller should schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called from the scheduled frame before recomputing.
    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Pause and schedule bookkeeping for a self-rescheduling render loop.
///
/// At most one frame is ever queued: `play` only asks for a frame when none
/// is outstanding, and a frame that finds the loop paused drops the chain.
#[derive(Debug)]
pub struct LoopState {
    paused: bool,
    scheduled: bool,
}

impl Default for LoopState {
    fn default() -> Self {
        Self {
            paused: true,
            scheduled: false,
        }
    }
}

impl LoopState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Resumes the loop. Returns `true` when the caller must queue a frame.
    pub fn play(&mut self) -> bool {
        self.paused = false;
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    pub fn stop(&mut self) {
        self.paused = true;
    }

    /// Called when a queued frame fires. Returns `true` when the frame should
    /// render and queue its successor.
    pub fn begin_frame(&mut self) -> bool {
        self.scheduled = !self.paused;
        self.scheduled
    }

    /// The frame request was rejected; nothing is queued any more.
    pub fn schedule_failed(&mut self) {
        self.scheduled = false;
    }
}
