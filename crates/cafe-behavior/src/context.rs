//! Shared floor resources, owned by the driver and passed to each update.

use tracing::debug;

use cafe_core::{AgentId, NodeId};
use cafe_queue::QueueRegistry;

use crate::mandate::Occupancy;

#[cfg(feature = "fx-hash")]
type SeatMap = rustc_hash::FxHashMap<NodeId, AgentId>;
#[cfg(not(feature = "fx-hash"))]
type SeatMap = std::collections::HashMap<NodeId, AgentId>;

/// Queues and seat claims.  Nothing else in the engine is shared between
/// agents.
#[derive(Clone, Debug, Default)]
pub struct SimulationContext {
    pub queues: QueueRegistry,
    seats:      SeatMap,
}

impl SimulationContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Seats ─────────────────────────────────────────────────────────────

    /// Claim `seat` for `agent`.  Fails if someone else holds it.
    pub fn claim_seat(&mut self, seat: NodeId, agent: AgentId) -> bool {
        match self.seats.get(&seat) {
            Some(&holder) => holder == agent,
            None => {
                self.seats.insert(seat, agent);
                true
            }
        }
    }

    /// Release `seat` if `agent` holds it.
    pub fn release_seat(&mut self, seat: NodeId, agent: AgentId) -> bool {
        if self.seats.get(&seat) == Some(&agent) {
            self.seats.remove(&seat);
            true
        } else {
            false
        }
    }

    pub fn seat_holder(&self, seat: NodeId) -> Option<AgentId> {
        self.seats.get(&seat).copied()
    }

    pub fn claimed_seats(&self) -> usize {
        self.seats.len()
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Give back whatever `occupancy` refers to.
    pub fn release(&mut self, agent: AgentId, occupancy: Occupancy) {
        match occupancy {
            Occupancy::QueueSlot { node, .. } => {
                if let Some(mut queue) = self.queues.fetch(node) {
                    if queue.remove_agent(agent) {
                        debug!(agent = %agent, node = %node, "left queue");
                    }
                    self.queues.store(queue);
                }
            }
            Occupancy::Seat(node) => {
                if self.release_seat(node, agent) {
                    debug!(agent = %agent, seat = %node, "seat released");
                }
            }
        }
    }

    /// Whether any queue or seat still references `agent`.
    pub fn references(&self, agent: AgentId) -> bool {
        self.seats.values().any(|&a| a == agent)
            || self
                .queues
                .nodes()
                .into_iter()
                .filter_map(|n| self.queues.peek(n))
                .any(|q| q.index_of(agent).is_some())
    }
}
