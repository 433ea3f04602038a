//! `TimedExecutor`: plays movement sequences on a timer.
//!
//! A sequence's duration is the sum of its steps:
//!
//! | Command          | Duration                          |
//! |------------------|-----------------------------------|
//! | `MoveTo`         | straight-line distance / speed    |
//! | `Face`           | instant                           |
//! | `Wait`, `Fade`   | the given seconds                 |
//!
//! The agent ends up at the last `MoveTo` target (or where it started).
//! Nothing is interpolated in between; hosts that animate supply their own
//! executor.

use cafe_behavior::{MotionCommand, MovementExecutor, TaskCompletion};
use cafe_core::{AgentId, TaskId, Vec2};
use cafe_core::geom::EPSILON;

#[derive(Clone, Debug)]
struct RunningTask {
    id:      TaskId,
    agent:   AgentId,
    end:     Vec2,
    done_at: f64,
}

#[derive(Clone, Debug, Default)]
pub struct TimedExecutor {
    running: Vec<RunningTask>,
    next_id: u64,
}

impl TimedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks dispatched but not yet reported.
    pub fn in_flight(&self) -> usize {
        self.running.len()
    }

    /// Final position and duration of a sequence started at `from`.
    pub fn plan(from: Vec2, commands: &[MotionCommand]) -> (Vec2, f64) {
        commands.iter().fold((from, 0.0), |(at, secs), cmd| match *cmd {
            MotionCommand::MoveTo { target, speed } => {
                let travel = if speed > EPSILON { at.distance(target) / speed } else { 0.0 };
                (target, secs + travel)
            }
            MotionCommand::Face { .. } => (at, secs),
            MotionCommand::Wait { secs: s } | MotionCommand::Fade { secs: s } => (at, secs + s.max(0.0)),
        })
    }
}

impl MovementExecutor for TimedExecutor {
    fn dispatch(&mut self, agent: AgentId, from: Vec2, commands: Vec<MotionCommand>, now: f64) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let (end, secs) = Self::plan(from, &commands);
        self.running.push(RunningTask { id, agent, end, done_at: now + secs });
        id
    }

    fn poll_completed(&mut self, now: f64) -> Vec<TaskCompletion> {
        let (mut done, running): (Vec<_>, Vec<_>) = self.running.drain(..).partition(|t| t.done_at <= now);
        self.running = running;
        done.sort_by(|a, b| a.done_at.total_cmp(&b.done_at).then(a.id.cmp(&b.id)));
        done.into_iter()
            .map(|t| TaskCompletion { task: t.id, agent: t.agent, position: t.end })
            .collect()
    }
}
