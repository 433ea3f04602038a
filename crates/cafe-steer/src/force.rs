//! Steering forces.
//!
//! Each goal yields a force in velocity units per second; the integrator
//! sums `weight * force` over the set.  All forces are pure functions of the
//! agent's kinematic state, except `Wander`, which takes its heading jitter
//! as an argument so the caller owns the randomness.

use cafe_core::Vec2;
use cafe_core::geom::EPSILON;

use crate::goal::{Goal, GoalKind, GoalSet};

/// An agent's instantaneous motion state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Kinematics {
    pub position:  Vec2,
    pub velocity:  Vec2,
    pub max_speed: f64,
}

impl Kinematics {
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Unit heading; +X when standing still.
    pub fn heading(&self) -> Vec2 {
        if self.speed() <= EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            self.velocity.normalized()
        }
    }

    fn predicted(&self, secs: f64) -> Vec2 {
        self.position + self.velocity * secs
    }

    fn seek(&self, target: Vec2) -> Vec2 {
        let to = target - self.position;
        if to.length() <= EPSILON {
            return -self.velocity;
        }
        to.normalized() * self.max_speed - self.velocity
    }
}

/// Force for one goal.  `wander_angle` is the wander circle's current angle
/// in radians and only matters for `Wander`.
pub fn goal_force(kind: &GoalKind, k: &Kinematics, wander_angle: f64) -> Vec2 {
    match kind {
        GoalKind::Seek { target } => k.seek(*target),

        GoalKind::FollowPath { path, prediction_secs } => {
            let future = k.predicted(*prediction_secs);
            // Look at least one path radius ahead so a stationary agent still
            // gets pulled forward.
            let ahead = (k.speed() * prediction_secs).max(path.radius());
            match path.point_ahead(future, ahead) {
                Some(target) => k.seek(target),
                None => Vec2::ZERO,
            }
        }

        GoalKind::StayOnPath { path, prediction_secs } => {
            let future = k.predicted(*prediction_secs);
            match path.project(future) {
                Some((_, on_path)) if future.distance(on_path) > path.radius() => k.seek(on_path),
                _ => Vec2::ZERO,
            }
        }

        GoalKind::Avoid { horizon_secs, obstacles } => {
            let ahead = k.predicted(*horizon_secs);
            let reach = (k.speed() * horizon_secs).max(1.0);
            obstacles.iter().fold(Vec2::ZERO, |acc, o| {
                let clearance = o.clearance(ahead);
                if clearance >= reach {
                    return acc;
                }
                let away = ahead - o.shape.centroid();
                let dir = if away.length() <= EPSILON { -k.heading() } else { away.normalized() };
                acc + dir * (k.max_speed * (1.0 - clearance / reach))
            })
        }

        GoalKind::Wander { strength } => {
            let jitter = Vec2::new(wander_angle.cos(), wander_angle.sin());
            (k.heading() + jitter) * (*strength * 0.5)
        }

        GoalKind::Decelerate { target_speed } => {
            let speed = k.speed();
            if speed <= *target_speed || speed <= EPSILON {
                Vec2::ZERO
            } else {
                -k.velocity.normalized() * (speed - target_speed)
            }
        }
    }
}

/// Weighted sum of every goal's force.
pub fn combined_force(goals: &GoalSet, k: &Kinematics, wander_angle: f64) -> Vec2 {
    goals
        .goals()
        .iter()
        .fold(Vec2::ZERO, |acc, Goal { kind, weight }| {
            acc + goal_force(kind, k, wander_angle) * *weight
        })
}
