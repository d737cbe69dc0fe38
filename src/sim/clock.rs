//! Simulation clock
//!
//! Driven by an external timer: every callback passes the current timestamp and
//! the clock reports how much simulated time has passed since the previous tick.

use serde::{Deserialize, Serialize};

/// Run state of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    state: ClockState,
    /// Timestamp of the previous tick; `None` right after a start or resume
    last_tick: Option<f64>,
    /// Seconds covered by the most recent tick
    elapsed: f32,
    /// Seconds of running time accumulated
    total: f64,
    fps: u32,
    frame_count: u32,
    frame_time: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped,
            last_tick: None,
            elapsed: 0.0,
            total: 0.0,
            fps: 0,
            frame_count: 0,
            frame_time: 0.0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Stopped -> Running. Returns false if already started.
    pub fn start(&mut self) -> bool {
        if self.state != ClockState::Stopped {
            return false;
        }
        self.state = ClockState::Running;
        self.last_tick = None;
        self.total = 0.0;
        self.elapsed = 0.0;
        true
    }

    /// Running <-> Paused. No effect while stopped.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            ClockState::Running => {
                self.state = ClockState::Paused;
                self.elapsed = 0.0;
                true
            }
            ClockState::Paused => {
                self.state = ClockState::Running;
                self.last_tick = None;
                true
            }
            ClockState::Stopped => false,
        }
    }

    /// Running/Paused -> Stopped
    pub fn stop(&mut self) -> bool {
        if self.state == ClockState::Stopped {
            return false;
        }
        self.state = ClockState::Stopped;
        self.elapsed = 0.0;
        true
    }

    /// Advance to timestamp `now` (seconds).
    ///
    /// Returns the elapsed seconds for this tick, or `None` unless running. The
    /// first tick after a start or resume covers zero time.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        if self.state != ClockState::Running {
            return None;
        }
        // Timestamps going backwards are treated as no time passing
        let elapsed = self
            .last_tick
            .map(|prev| (now - prev).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.elapsed = elapsed;
        self.total += elapsed as f64;
        self.count_frame(elapsed);
        Some(elapsed)
    }

    fn count_frame(&mut self, elapsed: f32) {
        self.frame_time += elapsed;
        if self.frame_time < 1.0 {
            self.frame_count += 1;
        } else {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.frame_time = 0.0;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Ticks counted over the last full second of running time
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
