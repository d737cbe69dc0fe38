//! Simulation driver
//!
//! Owns the configuration, clock and state. An external timer calls `frame` with
//! the current timestamp and input; the driver handles the start/pause symbol,
//! advances the clock, runs one tick and hands every live entity to the draw
//! callback.

use glam::Vec2;
use serde::Serialize;

use super::clock::{ClockState, SimulationClock};
use super::entity::DrawCommand;
use super::state::SimulationState;
use super::tick::{InputSnapshot, Symbol, TickOutcome, tick};
use crate::config::{ConfigError, SimConfig};

/// Read-only snapshot for HUDs and logs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Telemetry {
    pub score: u64,
    /// Never below zero
    pub shield: f32,
    pub elapsed: f32,
    pub total_time: f64,
    pub fps: u32,
    pub ship_position: [f32; 2],
    pub ship_speed: f32,
    pub ship_thrust: f32,
    pub camera: [f32; 2],
    pub asteroids: usize,
    pub projectiles: usize,
    pub clock: ClockState,
}

/// Result of one frame that actually ticked
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub elapsed: f32,
    pub outcome: TickOutcome,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    clock: SimulationClock,
    state: SimulationState,
}

impl Simulation {
    /// Validate `config` and build a stopped simulation
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let state = SimulationState::new(&config)?;
        Ok(Self {
            config,
            clock: SimulationClock::new(),
            state,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Start from a fresh state. Returns `Ok(false)` if already running or paused.
    ///
    /// The clock only starts once the new state is built.
    pub fn start(&mut self) -> Result<bool, ConfigError> {
        if self.clock.state() != ClockState::Stopped {
            return Ok(false);
        }
        self.state = SimulationState::new(&self.config)?;
        self.clock.start();
        log::info!("Simulation started (seed {})", self.config.seed);
        Ok(true)
    }

    pub fn stop(&mut self) -> bool {
        let stopped = self.clock.stop();
        if stopped {
            log::info!("Simulation stopped with score {}", self.state.score);
        }
        stopped
    }

    pub fn toggle_pause(&mut self) -> bool {
        let toggled = self.clock.toggle_pause();
        if toggled {
            log::info!("Simulation {:?}", self.clock.state());
        }
        toggled
    }

    /// Re-initialize entities and score; the run state is left alone.
    ///
    /// On error the previous state is kept.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.state = SimulationState::new(&self.config)?;
        log::info!("Simulation reset");
        Ok(())
    }

    /// Change the viewport extents used by the camera
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let mut world = self.config.world.clone();
        world.viewport_width = width;
        world.viewport_height = height;
        let candidate = SimConfig {
            world,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// One timer callback at timestamp `now` (seconds).
    ///
    /// A `Pause` press starts a stopped simulation (with a fresh state) and
    /// otherwise toggles pause. Returns `None` unless the clock is running. When
    /// the main ship is destroyed the clock stops after this frame's draw.
    pub fn frame(
        &mut self,
        now: f64,
        input: &InputSnapshot,
        draw: impl FnMut(&DrawCommand<'_>),
    ) -> Option<FrameReport> {
        if input.was_pressed(Symbol::Pause) {
            if self.clock.state() == ClockState::Stopped {
                if let Err(e) = self.start() {
                    log::error!("Failed to start: {}", e);
                    return None;
                }
            } else {
                self.toggle_pause();
            }
        }

        let elapsed = self.clock.tick(now)?;
        let outcome = tick(&mut self.state, &self.config, input, elapsed);
        self.state.draw(draw);

        if outcome.ship_destroyed {
            log::info!("Ship destroyed at {:.1}s, final score {}", self.clock.total(), self.state.score);
            self.stop();
        }
        Some(FrameReport { elapsed, outcome })
    }

    pub fn telemetry(&self) -> Telemetry {
        let ship = self.state.main_ship();
        let pos = ship.body.pos;
        let camera = self.state.camera.pos;
        Telemetry {
            score: self.state.score,
            shield: ship.display_shield(),
            elapsed: self.clock.elapsed(),
            total_time: self.clock.total(),
            fps: self.clock.fps(),
            ship_position: [pos.x, pos.y],
            ship_speed: ship.speed(),
            ship_thrust: ship.thrust,
            camera: camera.to_array(),
            asteroids: self.state.active_asteroids().count(),
            projectiles: self.state.ammo.active_count(),
            clock: self.clock.state(),
        }
    }

    /// Camera center in map coordinates
    pub fn camera_position(&self) -> Vec2 {
        self.state.camera.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_DT;
    use crate::sim::entity::EntityKind;

    fn quiet() -> SimConfig {
        let mut config = SimConfig::default();
        config.asteroids.spawn_interval = 1.0e9;
        config
    }

    fn pause() -> InputSnapshot {
        InputSnapshot::new().with_pressed(Symbol::Pause)
    }

    #[test]
    fn test_invalid_config_never_builds() {
        let mut config = SimConfig::default();
        config.ship.mass = 0.0;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_stopped_frame_does_nothing() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let mut drawn = 0;
        assert!(sim.frame(0.0, &InputSnapshot::new(), |_| drawn += 1).is_none());
        assert_eq!(drawn, 0);
        assert_eq!(sim.state().time_ticks, 0);
    }

    #[test]
    fn test_pause_symbol_starts_then_toggles() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let report = sim.frame(0.0, &pause(), |_| {}).unwrap();
        assert_eq!(report.elapsed, 0.0);
        assert_eq!(sim.clock().state(), ClockState::Running);

        assert!(sim.frame(0.1, &pause(), |_| {}).is_none());
        assert_eq!(sim.clock().state(), ClockState::Paused);

        // resuming after a long pause reports no elapsed time
        let report = sim.frame(5.0, &pause(), |_| {}).unwrap();
        assert_eq!(report.elapsed, 0.0);
        let report = sim.frame(5.0 + TICK_DT as f64, &InputSnapshot::new(), |_| {}).unwrap();
        assert!((report.elapsed - TICK_DT).abs() < 1e-6);
    }

    #[test]
    fn test_frame_draws_live_entities() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.start().unwrap();
        let mut kinds = Vec::new();
        sim.frame(0.0, &InputSnapshot::new().with_pressed(Symbol::Fire), |cmd| kinds.push(cmd.kind))
            .unwrap();
        assert_eq!(kinds, vec![EntityKind::Well, EntityKind::Ship, EntityKind::Projectile]);
    }

    #[test]
    fn test_destroyed_ship_stops_clock() {
        let mut config = quiet();
        config.ship.start = [2.0, 0.0];
        let mut sim = Simulation::new(config).unwrap();
        sim.start().unwrap();
        let mut drawn = 0;
        let report = sim.frame(0.0, &InputSnapshot::new(), |_| drawn += 1).unwrap();
        assert!(report.outcome.ship_destroyed);
        // the destroying frame is still drawn
        assert!(drawn > 0);
        assert_eq!(sim.clock().state(), ClockState::Stopped);
        assert_eq!(sim.telemetry().shield, 0.0);
        assert!(sim.frame(0.1, &InputSnapshot::new(), |_| {}).is_none());
    }

    #[test]
    fn test_start_resets_state() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.start().unwrap();
        sim.state_mut().score = 50;
        sim.stop();
        assert_eq!(sim.state().score, 50);
        sim.start().unwrap();
        assert_eq!(sim.state().score, 0);
    }

    #[test]
    fn test_reset_keeps_run_state() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.start().unwrap();
        sim.toggle_pause();
        sim.state_mut().score = 12;
        sim.reset().unwrap();
        assert_eq!(sim.state().score, 0);
        assert_eq!(sim.clock().state(), ClockState::Paused);
    }

    #[test]
    fn test_start_and_reset_report_bad_config() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.state_mut().score = 3;
        sim.config.ammo.pool_size = 0;

        assert!(matches!(sim.reset(), Err(ConfigError::ZeroCapacity { .. })));
        assert!(sim.start().is_err());
        // nothing changed: old state kept, clock never started
        assert_eq!(sim.state().score, 3);
        assert_eq!(sim.clock().state(), ClockState::Stopped);
        assert!(sim.frame(0.0, &pause(), |_| {}).is_none());
        assert_eq!(sim.clock().state(), ClockState::Stopped);
    }

    #[test]
    fn test_start_twice_is_a_no_op() {
        let mut sim = Simulation::new(quiet()).unwrap();
        assert!(sim.start().unwrap());
        sim.state_mut().score = 8;
        assert!(!sim.start().unwrap());
        assert_eq!(sim.state().score, 8);
    }

    #[test]
    fn test_set_viewport_validates() {
        let mut sim = Simulation::new(quiet()).unwrap();
        assert!(sim.set_viewport(0.0, 480.0).is_err());
        assert_eq!(sim.config().world.viewport_width, 640.0);
        sim.set_viewport(800.0, 600.0).unwrap();
        assert_eq!(sim.config().world.viewport_half(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_telemetry_serializes() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.start().unwrap();
        let mut now = 0.0;
        for _ in 0..70 {
            sim.frame(now, &InputSnapshot::new().with_held(Symbol::Thrust), |_| {});
            now += TICK_DT as f64;
        }
        let t = sim.telemetry();
        assert!(t.ship_thrust > 0.0);
        assert!(t.total_time > 1.9);
        assert_eq!(t.clock, ClockState::Running);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["clock"], "Running");
        assert_eq!(json["score"], 0);
    }
}
