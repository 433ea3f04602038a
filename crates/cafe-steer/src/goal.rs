//! Goal types.

use cafe_core::Vec2;
use cafe_nav::{Obstacle, Path};

/// What a single goal steers toward or away from.
#[derive(Clone, Debug, PartialEq)]
pub enum GoalKind {
    /// Head straight for a point.
    Seek { target: Vec2 },
    /// Chase a point ahead of the agent's predicted position on the path.
    FollowPath { path: Path, prediction_secs: f64 },
    /// Pull back toward the path when the predicted position leaves its
    /// radius.
    StayOnPath { path: Path, prediction_secs: f64 },
    /// Push away from obstacles the agent would reach within the horizon.
    Avoid { horizon_secs: f64, obstacles: Vec<Obstacle> },
    /// Meander; `strength` is the wander circle's reach.
    Wander { strength: f64 },
    /// Brake while moving faster than `target_speed`.
    Decelerate { target_speed: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Goal {
    pub kind:   GoalKind,
    pub weight: f64,
}

impl Goal {
    pub fn new(kind: GoalKind, weight: f64) -> Self {
        Self { kind, weight }
    }
}

/// An agent's complete steering instruction for now.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalSet {
    goals: Vec<Goal>,
}

impl GoalSet {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    /// No goals: the integrator coasts the agent to a halt.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// The path being followed, if any goal carries one.
    pub fn path(&self) -> Option<&Path> {
        self.goals.iter().find_map(|g| match &g.kind {
            GoalKind::FollowPath { path, .. } => Some(path),
            _ => None,
        })
    }

    /// `true` for the single-goal braking set produced by `stop_goals`.
    pub fn is_stop(&self) -> bool {
        matches!(
            self.goals.as_slice(),
            [Goal { kind: GoalKind::Decelerate { target_speed }, .. }] if *target_speed == 0.0
        )
    }
}
