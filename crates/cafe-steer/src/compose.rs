//! Goal-set composers.
//!
//! | Composer              | Goals (weight)                                            |
//! |-----------------------|-----------------------------------------------------------|
//! | `compose_path_goals`  | FollowPath 0.5 s (1.0), StayOnPath 0.5 s (5.0), Decelerate to max speed (1.5), Avoid 0.7 s (1.1) |
//! | `compose_wander_goals`| Wander 80 (50), Avoid (1000), Decelerate 100 (50), Seek center (0.2) |
//! | `stop_goals`          | Decelerate 0 (10), alone                                  |

use cafe_core::Vec2;
use cafe_nav::{Obstacle, Path};

use crate::goal::{Goal, GoalKind, GoalSet};

pub const PATH_PREDICTION_SECS: f64 = 0.5;
pub const AVOID_HORIZON_SECS: f64 = 0.7;
pub const WANDER_STRENGTH: f64 = 80.0;
pub const WANDER_SPEED: f64 = 100.0;

pub fn compose_path_goals(path: &Path, max_speed: f64, obstacles: &[Obstacle]) -> GoalSet {
    GoalSet::new(vec![
        Goal::new(
            GoalKind::FollowPath { path: path.clone(), prediction_secs: PATH_PREDICTION_SECS },
            1.0,
        ),
        Goal::new(
            GoalKind::StayOnPath { path: path.clone(), prediction_secs: PATH_PREDICTION_SECS },
            5.0,
        ),
        Goal::new(GoalKind::Decelerate { target_speed: max_speed }, 1.5),
        Goal::new(avoid(obstacles), 1.1),
    ])
}

pub fn compose_wander_goals(center: Vec2, obstacles: &[Obstacle]) -> GoalSet {
    GoalSet::new(vec![
        Goal::new(GoalKind::Wander { strength: WANDER_STRENGTH }, 50.0),
        Goal::new(avoid(obstacles), 1000.0),
        Goal::new(GoalKind::Decelerate { target_speed: WANDER_SPEED }, 50.0),
        Goal::new(GoalKind::Seek { target: center }, 0.2),
    ])
}

pub fn stop_goals() -> GoalSet {
    GoalSet::new(vec![Goal::new(GoalKind::Decelerate { target_speed: 0.0 }, 10.0)])
}

fn avoid(obstacles: &[Obstacle]) -> GoalKind {
    GoalKind::Avoid { horizon_secs: AVOID_HORIZON_SECS, obstacles: obstacles.to_vec() }
}
