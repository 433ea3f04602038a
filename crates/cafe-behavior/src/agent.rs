//! Agent records and the arena that owns them.

use cafe_core::{AgentId, AgentRng, TaskId, Vec2};
use cafe_nav::Path;
use cafe_steer::{GoalSet, stop_goals};

use crate::mandate::{Mandate, Occupancy};
use crate::world::TaskCompletion;

// ── Tasks ─────────────────────────────────────────────────────────────────────

/// What to do when a dispatched movement task completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompletionAction {
    /// Just clear the suspension.
    Resume,
    /// Clear the suspension and forget the queue arrival timestamp.
    ResetArrival,
    /// The agent is done; remove it.
    Despawn,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingTask {
    pub id:     TaskId,
    pub action: CompletionAction,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Agent {
    pub id:            AgentId,
    pub mandate:       Mandate,
    pub position:      Vec2,
    pub heading:       Vec2,
    pub occupancy:     Option<Occupancy>,
    pub goals:         GoalSet,
    pub path:          Option<Path>,
    /// While set, the mandate machine skips this agent entirely.
    pub suspended:     bool,
    pub task:          Option<PendingTask>,
    /// Start of the current uninterrupted physical contact.
    pub contact_since: Option<f64>,
    /// Consecutive ticks aborted by a behavior error.
    pub config_faults: u32,
    pub rng:           AgentRng,
    /// The current mandate's entry action has run.
    pub(crate) entered: bool,
}

impl Agent {
    pub fn new(id: AgentId, position: Vec2, mandate: Mandate, seed: u64) -> Self {
        Self {
            id,
            mandate,
            position,
            heading: Vec2::new(1.0, 0.0),
            occupancy: None,
            goals: GoalSet::empty(),
            path: None,
            suspended: false,
            task: None,
            contact_since: None,
            config_faults: 0,
            rng: AgentRng::new(seed, id),
            entered: false,
        }
    }

    /// Replace the goal set with the sole braking goal.  In-flight tasks keep
    /// running.
    pub fn stop(&mut self) {
        self.goals = stop_goals();
    }

    pub fn set_goals(&mut self, goals: GoalSet) {
        self.goals = goals;
    }

    /// Move freely to `position`, tracking heading.
    pub fn move_to(&mut self, position: Vec2) {
        let delta = position - self.position;
        if delta.length() > cafe_core::geom::EPSILON {
            self.heading = delta.normalized();
        }
        self.position = position;
    }

    /// Record a dispatched task and suspend until it completes.
    pub fn begin_task(&mut self, id: TaskId, action: CompletionAction) {
        self.task = Some(PendingTask { id, action });
        self.suspended = true;
    }

    /// Apply a task completion.  Returns `true` when the agent should now be
    /// removed.  Completions for a task the agent is not waiting on are
    /// ignored.
    pub fn complete_task(&mut self, done: &TaskCompletion) -> bool {
        let Some(pending) = self.task.filter(|t| t.id == done.task) else {
            return false;
        };
        self.task = None;
        self.suspended = false;
        self.move_to(done.position);

        match pending.action {
            CompletionAction::Resume => false,
            CompletionAction::ResetArrival => {
                if let Mandate::Queue { wait, .. } = &mut self.mandate {
                    wait.arrival = None;
                }
                false
            }
            CompletionAction::Despawn => true,
        }
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Arena of agents indexed by `AgentId`.
///
/// Ids are handed out sequentially and slots are never reused, so iteration
/// order (ascending id) is also spawn order.
#[derive(Debug, Default)]
pub struct AgentStore {
    slots: Vec<Option<Agent>>,
    live:  usize,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next `spawn` will return.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.slots.len() as u32)
    }

    pub fn spawn(&mut self, position: Vec2, mandate: Mandate, seed: u64) -> AgentId {
        let id = self.next_id();
        self.slots.push(Some(Agent::new(id, position, mandate, seed)));
        self.live += 1;
        id
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        let agent = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(agent)
    }

    /// Live agent ids, ascending.
    pub fn ids(&self) -> Vec<AgentId> {
        self.iter().map(|a| a.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total ids ever issued.
    pub fn spawned(&self) -> usize {
        self.slots.len()
    }
}
