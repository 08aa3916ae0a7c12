//! Animation time shared by everything drawn in one tick.
//!
//! The render samples the host clock once per tick into a [`FrameClock`] and
//! threads the resulting [`FrameContext`] through every shape update, so all
//! sprites advance in lockstep without a process-wide static.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use crate::consts::{CLOCK_GRANULARITY_MS, FPS_WINDOW_MS, FRAME_DURATION_MS};

/// Per-tick context handed to shape updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Shared animation timestamp in milliseconds.
    pub time: f64,
    /// Base sprite frame budget in milliseconds, before the speed multiplier.
    pub frame_duration: f64,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::at(0.0)
    }
}

impl FrameContext {
    #[must_use]
    pub const fn at(time: f64) -> Self {
        Self { time, frame_duration: FRAME_DURATION_MS }
    }
}

/// Coarse animation clock. The stored time only moves once the host clock
/// has run ahead of it by more than the refresh granularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    time: f64,
    frame_duration: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_DURATION_MS)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(frame_duration: f64) -> Self {
        Self { time: 0.0, frame_duration }
    }

    /// Feed the host timestamp and get the context for this tick.
    pub fn sample(&mut self, now: f64) -> FrameContext {
        if now - self.time > CLOCK_GRANULARITY_MS {
            self.time = now;
        }
        FrameContext { time: self.time, frame_duration: self.frame_duration }
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Frames-per-second estimate over a rolling one-second window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame at `now`. Returns the latest published estimate.
    pub fn frame(&mut self, now: f64) -> u32 {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        let elapsed = now - start;
        if elapsed >= FPS_WINDOW_MS {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let fps = (f64::from(self.frames) * 1000.0 / elapsed).round() as u32;
            self.fps = fps;
            self.frames = 0;
            self.window_start = Some(now);
        }
        self.fps
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Host frame request bookkeeping: at most one frame is scheduled at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSchedule {
    pending: Option<i32>,
}

impl FrameSchedule {
    /// True when no frame is scheduled and a new request must be made.
    #[must_use]
    pub fn needs_request(&self) -> bool {
        self.pending.is_none()
    }

    /// Record the host id of a frame just requested.
    pub fn scheduled(&mut self, id: i32) {
        self.pending = Some(id);
    }

    /// The scheduled frame is running.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Id of the scheduled frame to cancel, clearing it.
    pub fn cancel(&mut self) -> Option<i32> {
        self.pending.take()
    }
}
