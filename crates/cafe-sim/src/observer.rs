//! Simulation observer trait for progress reporting and data collection.

use cafe_behavior::{AgentStore, MandateKind, SimulationContext};
use cafe_core::{AgentId, Tick};

/// Why an agent left the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DespawnReason {
    /// Walked out through the exit.
    Exited,
    /// Removed after too many consecutive behavior faults.
    Faulted,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: occupancy printer
///
/// ```rust,ignore
/// struct Occupancy;
///
/// impl SimObserver for Occupancy {
///     fn on_tick_end(&mut self, tick: Tick, agents: &AgentStore, ctx: &SimulationContext) {
///         if tick.0 % 300 == 0 {
///             println!("{tick}: {} in, {} seated", agents.len(), ctx.claimed_seats());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick, _now: f64) {}

    fn on_spawn(&mut self, _agent: AgentId, _now: f64) {}

    /// An agent's mandate changed during its update.
    fn on_transition(&mut self, _agent: AgentId, _from: MandateKind, _to: MandateKind, _now: f64) {}

    /// The agent has already released its queue slot or seat.
    fn on_despawn(&mut self, _agent: AgentId, _reason: DespawnReason, _now: f64) {}

    /// Called at the end of each tick with read-only access to the floor.
    fn on_tick_end(&mut self, _tick: Tick, _agents: &AgentStore, _ctx: &SimulationContext) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
