use thiserror::Error;

use cafe_core::NodeId;

use crate::MandateKind;

/// Faults that abort one agent's tick.  Path-planning failures are not
/// errors at this level: they degrade to wandering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BehaviorError {
    #[error("world has no navigation graph")]
    MissingNavigationGraph,

    #[error("no scene node found for {0}")]
    MissingNode(String),

    #[error("obstacles of {0} could not be resolved")]
    MissingObstacles(NodeId),

    #[error("illegal mandate transition {from} -> {to}")]
    IllegalTransition { from: MandateKind, to: MandateKind },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
