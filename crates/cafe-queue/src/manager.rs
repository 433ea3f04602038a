//! One destination's queue.

use std::collections::VecDeque;

use cafe_core::{AgentId, NodeId, Vec2};

/// A slot handed to an agent: its index in the line and where to stand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotPosition {
    pub index: usize,
    pub point: Vec2,
}

/// Relocation order produced by [`QueueManagement::move_forward`].
///
/// `reset_arrival` is set only for the agent that just became head of the
/// line: its arrival timestamp must be cleared once the move completes so
/// its service wait starts from the moment it reaches the counter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementCommand {
    pub agent:         AgentId,
    pub slot_index:    usize,
    pub target:        Vec2,
    pub reset_arrival: bool,
}

/// The line of agents waiting at one destination node.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueManagement {
    destination: NodeId,
    slots:       Vec<Vec2>,
    waiting:     VecDeque<AgentId>,
}

impl QueueManagement {
    pub fn new(destination: NodeId, slots: Vec<Vec2>) -> Self {
        Self { destination, slots, waiting: VecDeque::new() }
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn slots(&self) -> &[Vec2] {
        &self.slots
    }

    pub fn waiting(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn head(&self) -> Option<AgentId> {
        self.waiting.front().copied()
    }

    /// Room for at least one more agent.
    pub fn has_capacity(&self) -> bool {
        self.slots.len() > self.waiting.len()
    }

    pub fn index_of(&self, agent: AgentId) -> Option<usize> {
        self.waiting.iter().position(|&a| a == agent)
    }

    /// The slot `agent` should currently stand at.
    pub fn slot_of(&self, agent: AgentId) -> Option<SlotPosition> {
        let index = self.index_of(agent)?;
        self.slots.get(index).map(|&point| SlotPosition { index, point })
    }

    /// Append `agent` to the line and return its slot, or `None` when every
    /// slot is taken.  An agent already in line gets its current slot back.
    pub fn next_position(&mut self, agent: AgentId) -> Option<SlotPosition> {
        if let Some(existing) = self.slot_of(agent) {
            return Some(existing);
        }
        if !self.has_capacity() {
            return None;
        }
        let index = self.waiting.len();
        self.waiting.push_back(agent);
        Some(SlotPosition { index, point: self.slots[index] })
    }

    /// Serve the head: pop it and order everyone else one slot forward.
    ///
    /// A head with nobody behind it stays listed and nothing moves; it
    /// leaves the line when its owner releases the slot.
    pub fn move_forward(&mut self) -> Vec<MovementCommand> {
        if self.waiting.len() < 2 {
            return Vec::new();
        }
        self.waiting.pop_front();
        self.waiting
            .iter()
            .zip(&self.slots)
            .enumerate()
            .map(|(i, (&agent, &target))| MovementCommand {
                agent,
                slot_index: i,
                target,
                reset_arrival: i == 0,
            })
            .collect()
    }

    /// Drop `agent` from anywhere in the line.  No relocation is issued; the
    /// agents behind notice their new index on their next update.
    pub fn remove_agent(&mut self, agent: AgentId) -> bool {
        match self.index_of(agent) {
            Some(i) => self.waiting.remove(i).is_some(),
            None => false,
        }
    }
}
