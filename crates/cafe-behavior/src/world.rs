//! Collaborator traits: everything the behavior layer needs from the host.
//!
//! The engine never renders, animates or resolves collisions itself.  The
//! host supplies a scene ([`WorldQuery`]), something that plays movement
//! sequences ([`MovementExecutor`]) and something that turns steering goals
//! into positions ([`MovementIntegrator`]).  `cafe-sim` ships a reference
//! implementation of each.

use cafe_core::{AgentId, NodeId, TaskId, Vec2};
use cafe_nav::{NavigationGraph, Obstacle};
use cafe_steer::GoalSet;

// ── Scene ─────────────────────────────────────────────────────────────────────

/// A resolved scene node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRef {
    pub id:       NodeId,
    pub position: Vec2,
    /// Scene path, e.g. `floor/counter`.
    pub path:     String,
}

pub trait WorldQuery {
    /// Every node registered under `path`, in scene order.
    fn find_nodes(&self, path: &str) -> Vec<NodeRef>;

    fn node(&self, id: NodeId) -> Option<NodeRef>;

    /// Whether the node is usable right now (a closed till, a broken chair).
    fn is_available(&self, node: NodeId) -> bool;

    /// Obstacles belonging to `node`.  `None` when the node is unknown to the
    /// scene; an empty list is a valid answer for a node with no furniture.
    fn obstacles_near(&self, node: NodeId) -> Option<Vec<Obstacle>>;

    /// A fresh graph carrying the current obstacle layout, or `None` when the
    /// scene has no walkable area.
    fn navigation_graph(&self) -> Option<NavigationGraph>;

    /// Whether an agent at `position` is physically touching something.
    fn in_contact(&self, agent: AgentId, position: Vec2) -> bool;
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// One step of a scripted movement sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MotionCommand {
    MoveTo { target: Vec2, speed: f64 },
    Face { toward: Vec2 },
    Wait { secs: f64 },
    Fade { secs: f64 },
}

/// Reported when a dispatched sequence finishes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TaskCompletion {
    pub task:     TaskId,
    pub agent:    AgentId,
    /// Where the agent ended up; handlers accept whatever this is.
    pub position: Vec2,
}

/// Plays scripted sequences (walk into a slot, sit down, fade out).
pub trait MovementExecutor {
    fn dispatch(&mut self, agent: AgentId, from: Vec2, commands: Vec<MotionCommand>, now: f64) -> TaskId;

    /// Tasks that finished at or before `now`, in completion order.
    fn poll_completed(&mut self, now: f64) -> Vec<TaskCompletion>;
}

/// Free movement: consumes an agent's goal set once per tick and returns
/// its next position.
pub trait MovementIntegrator {
    fn integrate(&mut self, agent: AgentId, position: Vec2, goals: &GoalSet, dt_secs: f64) -> Vec2;

    /// Drop any per-agent state once the agent is gone.
    fn forget(&mut self, _agent: AgentId) {}
}

// ── Debug output ──────────────────────────────────────────────────────────────

/// Receives visual diagnostics.  Every method defaults to a no-op.
pub trait DebugSink {
    fn path(&mut self, _agent: AgentId, _points: &[Vec2]) {}
    fn queue_slots(&mut self, _node: NodeId, _slots: &[Vec2]) {}
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopDebugSink;

impl DebugSink for NoopDebugSink {}
