//! Real-time pacing for human render mode.
//!
//! An environment rendering for a person holds a `FramePacer` and calls `wait` at the
//! end of `step`/`render`; the calling thread then sleeps out whatever is left of the
//! frame interval since the previous frame.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    /// A pacer targeting `fps` frames per second. `fps == 0` disables pacing.
    pub fn new(fps: u32) -> Self {
        let interval = if fps == 0 { Duration::ZERO } else { Duration::from_nanos(1_000_000_000 / u64::from(fps)) };
        Self { interval, last_frame: None }
    }

    pub fn interval(&self) -> Duration { self.interval }

    /// Time still to wait before the next frame may be delivered.
    pub fn remaining(&self) -> Duration {
        match self.last_frame {
            Some(last) => self.interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Sleep for the remainder of the current frame, then start the next one.
    pub fn wait(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last_frame = Some(Instant::now());
    }

    /// Forget the previous frame so the next `wait` returns immediately.
    pub fn restart(&mut self) { self.last_frame = None; }
}
