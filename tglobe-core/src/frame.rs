/// Fixed-timestep frame pacing.
///
/// Both types take explicit `Instant`s instead of reading the clock, so the
/// render loop decides when to sleep and tests can step time by hand.
use std::time::{Duration, Instant};

/// Fixed-period frame ticker
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    frame_start: Option<Instant>,
    frame_index: u64,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            frame_start: None,
            frame_index: 0,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of frames started so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Mark the start of a new frame
    pub fn begin(&mut self, now: Instant) {
        self.frame_start = Some(now);
        self.frame_index += 1;
    }

    /// Time left in the current frame's period, zero once it has overrun
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.frame_start {
            Some(start) => self.period.saturating_sub(now.saturating_duration_since(start)),
            None => Duration::ZERO,
        }
    }
}

/// Frames-per-second counter, refreshed once per elapsed second
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a finished frame
    pub fn frame(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
