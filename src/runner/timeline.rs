//! One-axis motion timelines: linear travel from an origin to an end
//! offset, optionally after a start delay, repeating forever.

use rand::Rng;

/// Where a timeline starts its next pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RestartPolicy {
    /// Always the path's own start offset.
    Fixed,
    /// A fresh random offset in `[min, max]` every pass.
    Randomized { min: f64, max: f64 },
}

/// Static description of a looped path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPath {
    /// Origin of the very first pass.
    pub start: f64,
    pub end: f64,
    /// Time spent holding at the origin before travel begins.
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub restart: RestartPolicy,
}

impl MotionPath {
    /// Length of one full pass, delay included. Never zero.
    pub fn cycle_ms(&self) -> u64 {
        (self.delay_ms + self.duration_ms).max(1)
    }

    /// Origin for the next pass.
    pub fn restart_offset<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.restart {
            RestartPolicy::Fixed => self.start,
            RestartPolicy::Randomized { min, max } if max > min => rng.gen_range(min..=max),
            RestartPolicy::Randomized { min, .. } => min,
        }
    }
}

/// A running instance of a [`MotionPath`].
///
/// Time only moves when [`Timeline::advance`] is called, so a paused
/// owner keeps the exact position it had.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    path: MotionPath,
    origin: f64,
    elapsed_ms: u64,
    /// Passes completed or recycled since the last reset.
    pub passes: u32,
}

impl Timeline {
    pub fn new(path: MotionPath) -> Self {
        Self {
            path,
            origin: path.start,
            elapsed_ms: 0,
            passes: 0,
        }
    }

    pub fn path(&self) -> &MotionPath {
        &self.path
    }

    /// Origin of the current pass.
    pub fn origin(&self) -> f64 {
        self.origin
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// True while the current pass is still holding at its origin.
    pub fn is_delayed(&self) -> bool {
        self.elapsed_ms < self.path.delay_ms
    }

    /// Current position, read fresh from the timeline state.
    pub fn position(&self) -> f64 {
        if self.is_delayed() {
            return self.origin;
        }
        if self.path.duration_ms == 0 {
            return self.path.end;
        }
        let travelled = (self.elapsed_ms - self.path.delay_ms) as f64;
        let t = (travelled / self.path.duration_ms as f64).min(1.0);
        self.origin + (self.path.end - self.origin) * t
    }

    /// Move time forward. Completed passes wrap around using the restart
    /// policy, carrying over any leftover time. Returns true if at least
    /// one pass completed.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> bool {
        self.elapsed_ms += dt_ms;
        let cycle = self.path.cycle_ms();
        let mut wrapped = false;
        while self.elapsed_ms >= cycle {
            self.elapsed_ms -= cycle;
            self.origin = self.path.restart_offset(rng);
            self.passes += 1;
            wrapped = true;
        }
        wrapped
    }

    /// Abandon the current pass and start a new one right away.
    pub fn recycle<R: Rng>(&mut self, rng: &mut R) {
        self.origin = self.path.restart_offset(rng);
        self.elapsed_ms = 0;
        self.passes += 1;
    }

    /// Back to the first pass of the path.
    pub fn reset(&mut self) {
        self.origin = self.path.start;
        self.elapsed_ms = 0;
        self.passes = 0;
    }
}
