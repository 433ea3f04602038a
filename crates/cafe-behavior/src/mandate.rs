//! Mandates: the one thing an agent is currently trying to do.
//!
//! # Lifecycle
//!
//! ```text
//! EnterScene ─► Queue ─► Served ─► WalkTo ─► ConsumeSitting ─► Leave ─► (removed)
//!      │          │         │         │                          │
//!      └──────────┴────► Wander(retry) ◄─────────────────────────┘
//!                            │
//!                            └─► retry target, or Leave when there is none
//! ```
//!
//! Every transition is checked against [`MandateKind::allows`].

use std::fmt;

use cafe_core::{NodeId, Vec2};

/// Queue timing carried by [`Mandate::Queue`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaitInfo {
    pub wait_secs: f64,
    /// Set the first tick the agent is judged to have reached its slot.
    pub arrival:   Option<f64>,
}

impl WaitInfo {
    pub fn new(wait_secs: f64) -> Self {
        Self { wait_secs, arrival: None }
    }
}

/// A physical resource an agent holds on to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Occupancy {
    QueueSlot { node: NodeId, index: usize },
    Seat(NodeId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Mandate {
    EnterScene { route: Vec<Vec2> },
    Queue { destination: NodeId, wait: WaitInfo },
    Served { destination: NodeId, duration_secs: f64, arrival: Option<f64> },
    WalkTo { destination: NodeId, consume_secs: f64 },
    ConsumeSitting { seat: NodeId, duration_secs: f64, since: Option<f64> },
    Wander { retry: Option<Box<Mandate>>, since: f64, wait_secs: f64 },
    Leave { exit: NodeId },
}

impl Mandate {
    pub fn kind(&self) -> MandateKind {
        match self {
            Mandate::EnterScene { .. } => MandateKind::EnterScene,
            Mandate::Queue { .. } => MandateKind::Queue,
            Mandate::Served { .. } => MandateKind::Served,
            Mandate::WalkTo { .. } => MandateKind::WalkTo,
            Mandate::ConsumeSitting { .. } => MandateKind::ConsumeSitting,
            Mandate::Wander { .. } => MandateKind::Wander,
            Mandate::Leave { .. } => MandateKind::Leave,
        }
    }

    pub fn wander(retry: Option<Mandate>, since: f64, wait_secs: f64) -> Mandate {
        Mandate::Wander { retry: retry.map(Box::new), since, wait_secs }
    }

    /// Whether this mandate keeps `occupancy` across a transition into it.
    ///
    /// A seat survives `WalkTo → ConsumeSitting` and a wander that will
    /// retry the walk; a queue slot never survives leaving the queue.
    pub fn holds(&self, occupancy: &Occupancy) -> bool {
        match (self, occupancy) {
            (Mandate::Queue { destination, .. }, Occupancy::QueueSlot { node, .. }) => destination == node,
            (Mandate::WalkTo { destination, .. }, Occupancy::Seat(node)) => destination == node,
            (Mandate::ConsumeSitting { seat, .. }, Occupancy::Seat(node)) => seat == node,
            (Mandate::Wander { retry: Some(retry), .. }, Occupancy::Seat(_)) => retry.holds(occupancy),
            _ => false,
        }
    }
}

/// Payload-free mandate tag, used for the transition table and logging.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MandateKind {
    EnterScene,
    Queue,
    Served,
    WalkTo,
    ConsumeSitting,
    Wander,
    Leave,
}

impl MandateKind {
    pub const ALL: [MandateKind; 7] = [
        MandateKind::EnterScene,
        MandateKind::Queue,
        MandateKind::Served,
        MandateKind::WalkTo,
        MandateKind::ConsumeSitting,
        MandateKind::Wander,
        MandateKind::Leave,
    ];

    /// The transition table.
    pub fn allows(self, to: MandateKind) -> bool {
        use MandateKind::*;
        matches!(
            (self, to),
            (EnterScene, Queue | Wander | Leave)
                | (Queue, Served | Wander)
                | (Served, WalkTo | Leave)
                | (WalkTo, ConsumeSitting | Wander)
                | (ConsumeSitting, Leave)
                | (Wander, Queue | WalkTo | Leave)
                | (Leave, Wander)
        )
    }
}

impl fmt::Display for MandateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MandateKind::EnterScene => "EnterScene",
            MandateKind::Queue => "Queue",
            MandateKind::Served => "Served",
            MandateKind::WalkTo => "WalkTo",
            MandateKind::ConsumeSitting => "ConsumeSitting",
            MandateKind::Wander => "Wander",
            MandateKind::Leave => "Leave",
        };
        f.write_str(name)
    }
}
