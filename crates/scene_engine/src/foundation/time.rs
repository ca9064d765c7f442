//! Time management utilities

use std::time::Instant;

/// Source of elapsed time, queried once per tick by the frame driver
pub trait Clock {
    /// Advance the clock and return the seconds elapsed since the previous tick
    fn tick(&mut self) -> f32;
}

/// High-precision timer for frame timing
#[derive(Debug)]
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

impl Clock for Timer {
    fn tick(&mut self) -> f32 {
        self.update();
        self.delta_time
    }
}

/// Deterministic clock that advances by the same step every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    total_time: f32,
}

impl FixedTimestep {
    /// Create a clock advancing `step` seconds per tick
    pub fn new(step: f32) -> Self {
        Self { step, total_time: 0.0 }
    }

    /// Seconds added per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }
}

impl Clock for FixedTimestep {
    fn tick(&mut self) -> f32 {
        self.total_time += self.step;
        self.step
    }
}

/// One-shot countdown decremented by elapsed tick time
///
/// Used for the hover delay: armed on entering a state, fires once when it runs out,
/// then stays spent until re-armed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    remaining: f32,
    armed: bool,
}

impl Countdown {
    /// Create a disarmed countdown of the given duration in seconds
    pub fn new(duration: f32) -> Self {
        Self { duration, remaining: duration, armed: false }
    }

    /// Restart from the full duration
    pub fn arm(&mut self) {
        self.remaining = self.duration;
        self.armed = true;
    }

    /// Stop without firing
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Whether the countdown is running
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds left before firing
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance by `elapsed` seconds; returns `true` exactly once, on the tick it runs out
    pub fn advance(&mut self, elapsed: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining -= elapsed;
        if self.remaining <= 0.0 {
            self.armed = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut clock = FixedTimestep::new(0.25);
        assert_eq!(clock.tick(), 0.25);
        assert_eq!(clock.tick(), 0.25);
        assert_eq!(clock.total_time(), 0.5);
    }

    #[test]
    fn test_countdown_fires_once() {
        let mut countdown = Countdown::new(0.5);
        assert!(!countdown.advance(1.0), "disarmed countdown never fires");

        countdown.arm();
        assert!(!countdown.advance(0.25));
        assert!(countdown.advance(0.25));
        assert!(!countdown.advance(0.25), "spent until re-armed");

        countdown.arm();
        assert_eq!(countdown.remaining(), 0.5);
        assert!(countdown.is_armed());
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.tick();
        timer.tick();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= 0.0);
    }
}
