//! Drift Well headless driver
//!
//! Runs the simulation with a scripted pilot at the fixed timer rate and prints
//! the final telemetry as JSON.
//!
//! Usage: `drift-well [config.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use drift_well::consts::TICK_DT;
    use drift_well::sim::{InputSnapshot, Simulation, SimulationState, Symbol};
    use drift_well::{SimConfig, TurnDirection};

    const DEFAULT_SECONDS: f64 = 30.0;
    /// Keep thrusting while the nearest target is further than this
    const CHASE_DISTANCE: f32 = 150.0;
    /// Heading error (radians) tolerated before turning
    const AIM_TOLERANCE: f32 = 0.1;

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args: Vec<String> = std::env::args().skip(1).collect();
        let config = match args.first() {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        let seconds = match args.get(1) {
            Some(s) => s.parse::<f64>()?,
            None => DEFAULT_SECONDS,
        };

        log::info!("Drift Well (headless) starting, {:.0}s at {:.0} Hz", seconds, 1.0 / TICK_DT);
        let mut sim = Simulation::new(config)?;
        sim.start()?;

        let dt = TICK_DT as f64;
        let ticks = (seconds / dt).ceil() as u64;
        let mut drawn = 0usize;
        for i in 0..ticks {
            let input = autopilot(sim.state(), sim.config().ship.turn_direction, i);
            let now = i as f64 * dt;
            if sim.frame(now, &input, |_| drawn += 1).is_none() {
                break;
            }
            if i % 35 == 34 {
                let t = sim.telemetry();
                log::info!(
                    "t={:.1}s score={} shield={:.0} speed={:.1} asteroids={} shots={} fps={}",
                    t.total_time,
                    t.score,
                    t.shield,
                    t.ship_speed,
                    t.asteroids,
                    t.projectiles,
                    t.fps
                );
            }
        }
        sim.stop();
        log::debug!("{} draw commands issued", drawn);

        println!("{}", serde_json::to_string_pretty(&sim.telemetry())?);
        Ok(())
    }

    /// Turn toward the nearest asteroid, thrust while it is far, fire on alternate ticks
    fn autopilot(state: &SimulationState, turn: TurnDirection, tick: u64) -> InputSnapshot {
        let mut input = InputSnapshot::new();
        let ship = state.main_ship();
        let pos = ship.body.pos;

        let nearest = state
            .active_asteroids()
            .map(|a| a.body.pos)
            .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)));
        let Some(target) = nearest else {
            return input;
        };

        let to_target = (target - pos).truncate();
        let heading = ship.forward().truncate();
        // Positive angle: target lies counter-clockwise of the heading
        let error = heading.angle_to(to_target);
        if error.abs() > AIM_TOLERANCE {
            // A left turn is counter-clockwise when right turns are clockwise
            let left_is_ccw = turn == TurnDirection::Clockwise;
            let want_ccw = error > 0.0;
            input.hold(if want_ccw == left_is_ccw {
                Symbol::TurnLeft
            } else {
                Symbol::TurnRight
            });
        }
        if to_target.length() > CHASE_DISTANCE {
            input.hold(Symbol::Thrust);
        }
        if tick % 2 == 0 {
            input.press(Symbol::Fire);
        }
        input
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
