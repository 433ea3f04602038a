//! Cross-agent effects returned by the mandate machine.

use cafe_core::{AgentId, NodeId, Vec2};

/// An effect on some agent other than the one being updated.
///
/// The driver applies intents right after the update that produced them,
/// before the next agent runs.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Move a queued agent to a new slot.  The agent is suspended until the
    /// move completes; `reset_arrival` clears its queue arrival timestamp at
    /// that point.
    Relocate {
        agent:         AgentId,
        node:          NodeId,
        slot_index:    usize,
        target:        Vec2,
        reset_arrival: bool,
    },

    /// Take the agent out of the simulation after releasing what it holds.
    Remove(AgentId),
}
