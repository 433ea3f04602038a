//! Node-keyed queue registry.
//!
//! Queues are only ever changed by read-modify-replace: [`QueueRegistry::fetch`]
//! hands out a copy, the caller mutates it, and [`QueueRegistry::store`] puts
//! the whole value back.  Storing an empty queue discards it.

use tracing::debug;

use cafe_core::{AgentId, NodeId, Vec2};

use crate::manager::{QueueManagement, SlotPosition};

#[cfg(feature = "fx-hash")]
type QueueMap = rustc_hash::FxHashMap<NodeId, QueueManagement>;
#[cfg(not(feature = "fx-hash"))]
type QueueMap = std::collections::HashMap<NodeId, QueueManagement>;

#[derive(Clone, Debug, Default)]
pub struct QueueRegistry {
    queues: QueueMap,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch(&self, node: NodeId) -> Option<QueueManagement> {
        self.queues.get(&node).cloned()
    }

    /// Borrow without cloning, for read-only checks.
    pub fn peek(&self, node: NodeId) -> Option<&QueueManagement> {
        self.queues.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.queues.contains_key(&node)
    }

    /// Replace the stored queue for `queue.destination()`.  An empty queue
    /// removes the entry instead.
    pub fn store(&mut self, queue: QueueManagement) {
        let node = queue.destination();
        if queue.is_empty() {
            if self.queues.remove(&node).is_some() {
                debug!(node = %node, "queue emptied and discarded");
            }
        } else {
            self.queues.insert(node, queue);
        }
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Destinations with a live queue, ascending.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.queues.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

}

/// Result of [`join_or_create`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JoinOutcome {
    pub queued:  bool,
    pub created: bool,
    pub slot:    Option<SlotPosition>,
}

/// Put `agent` in line at `destination`.
///
/// With an existing queue this is `next_position`.  Otherwise `probe` is
/// called once with the destination centre to lay out the slots; the new
/// queue is stored only if it received at least one slot.
pub fn join_or_create(
    registry: &mut QueueRegistry,
    destination: NodeId,
    center: Vec2,
    agent: AgentId,
    probe: impl FnOnce(Vec2) -> Vec<Vec2>,
) -> JoinOutcome {
    let (mut queue, created) = match registry.fetch(destination) {
        Some(queue) => (queue, false),
        None => {
            let slots = probe(center);
            if slots.is_empty() {
                debug!(node = %destination, "no room for a queue");
                return JoinOutcome { queued: false, created: false, slot: None };
            }
            debug!(node = %destination, slots = slots.len(), "queue created");
            (QueueManagement::new(destination, slots), true)
        }
    };

    let slot = queue.next_position(agent);
    registry.store(queue);
    JoinOutcome { queued: slot.is_some(), created, slot }
}
