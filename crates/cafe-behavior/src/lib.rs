//! `cafe-behavior`: what each customer is trying to do, and the seams to
//! the outside world.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`mandate`] | `Mandate`, `MandateKind` (transition table), `WaitInfo`, `Occupancy` |
//! | [`agent`]   | `Agent` record, `AgentStore` arena, `PendingTask`, `CompletionAction` |
//! | [`world`]   | `WorldQuery`, `MovementExecutor`, `MovementIntegrator`, `DebugSink` |
//! | [`context`] | `SimulationContext`: queue registry and seat claims            |
//! | [`intent`]  | `Intent`: cross-agent effects applied by the driver            |
//! | [`pathing`] | Two-tier path planning with obstacle-filter fallback            |
//! | [`machine`] | `MandateMachine`: per-tick handlers                            |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The world driver owns every agent and the [`SimulationContext`].  Each
//! tick it hands one agent at a time to [`MandateMachine::step`], which may
//! only write that agent's record and the single queue the agent stands in.
//! Anything that touches another agent (shuffling a queue forward, removing
//! an agent that keeps faulting) comes back as an [`Intent`] which the
//! driver applies before moving on to the next agent.

pub mod agent;
pub mod context;
pub mod error;
pub mod intent;
pub mod machine;
pub mod mandate;
pub mod pathing;
pub mod world;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentStore, CompletionAction, PendingTask};
pub use context::SimulationContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use machine::{MandateMachine, TickEnv};
pub use mandate::{Mandate, MandateKind, Occupancy, WaitInfo};
pub use pathing::{PlannedRoute, plan_with_fallback};
pub use world::{
    DebugSink, MotionCommand, MovementExecutor, MovementIntegrator, NodeRef, NoopDebugSink,
    TaskCompletion, WorldQuery,
};
