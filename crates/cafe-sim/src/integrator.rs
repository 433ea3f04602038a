//! `GoalSeekIntegrator`: explicit Euler over the weighted goal force.
//!
//! ```text
//! v ← clamp(v + Σ wᵢ·fᵢ · dt, max_speed)
//! p ← p + v · dt
//! ```
//!
//! Velocity and the wander angle persist per agent between ticks.  There is
//! no collision response; agents walk through each other.

use cafe_behavior::MovementIntegrator;
use cafe_core::{AgentId, SimRng, Vec2};
use cafe_steer::{GoalSet, Kinematics, combined_force};

#[cfg(feature = "fx-hash")]
type MotionMap = rustc_hash::FxHashMap<AgentId, Motion>;
#[cfg(not(feature = "fx-hash"))]
type MotionMap = std::collections::HashMap<AgentId, Motion>;

/// Radians per second the wander circle may drift.
const WANDER_TURN_RATE: f64 = 3.0;

/// Below this speed a braking agent is snapped to rest.
const SETTLE_SPEED: f64 = 1.0;

#[derive(Copy, Clone, Debug, Default)]
struct Motion {
    velocity:     Vec2,
    wander_angle: f64,
}

#[derive(Clone, Debug)]
pub struct GoalSeekIntegrator {
    max_speed: f64,
    rng:       SimRng,
    motion:    MotionMap,
}

impl GoalSeekIntegrator {
    pub fn new(max_speed: f64, seed: u64) -> Self {
        Self { max_speed, rng: SimRng::new(seed), motion: MotionMap::default() }
    }

    pub fn velocity(&self, agent: AgentId) -> Vec2 {
        self.motion.get(&agent).map_or(Vec2::ZERO, |m| m.velocity)
    }

    pub fn tracked(&self) -> usize {
        self.motion.len()
    }
}

impl MovementIntegrator for GoalSeekIntegrator {
    fn integrate(&mut self, agent: AgentId, position: Vec2, goals: &GoalSet, dt_secs: f64) -> Vec2 {
        let drift = self.rng.gen_range(-1.0..=1.0) * WANDER_TURN_RATE * dt_secs;
        let state = self.motion.entry(agent).or_default();
        state.wander_angle += drift;

        let k = Kinematics { position, velocity: state.velocity, max_speed: self.max_speed };
        let force = combined_force(goals, &k, state.wander_angle);

        let mut velocity = state.velocity + force * dt_secs;
        let speed = velocity.length();
        if speed > self.max_speed {
            velocity = velocity.normalized() * self.max_speed;
        }
        if goals.is_stop() && speed < SETTLE_SPEED {
            velocity = Vec2::ZERO;
        }
        state.velocity = velocity;
        position + velocity * dt_secs
    }

    fn forget(&mut self, agent: AgentId) {
        self.motion.remove(&agent);
    }
}
