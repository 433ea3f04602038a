//! `cafe-steer`: weighted steering goals.
//!
//! Behaviour code never moves an agent directly.  It hands the movement
//! integrator a [`GoalSet`]: a list of weighted goals whose forces are summed
//! each tick.  Goal sets are replaced wholesale whenever behaviour changes;
//! there is no API for editing one in place.
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`goal`]    | `Goal`, `GoalKind`, `GoalSet`                            |
//! | [`compose`] | `compose_path_goals`, `compose_wander_goals`, `stop_goals` |
//! | [`force`]   | `Kinematics`, per-goal steering force, weighted sum      |

pub mod compose;
pub mod force;
pub mod goal;


pub use compose::{compose_path_goals, compose_wander_goals, stop_goals};
pub use force::{Kinematics, combined_force, goal_force};
pub use goal::{Goal, GoalKind, GoalSet};
