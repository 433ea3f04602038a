//! Path-planning error type.

use thiserror::Error;

use cafe_core::Vec2;

/// Planner failures.  Both are recoverable: callers retry with a looser
/// obstacle filter and, failing that, let the agent wander.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// Start and end coincide, or the end is unreachable from the start.
    #[error("no path from {from} to {to}")]
    NoPathFound { from: Vec2, to: Vec2 },

    /// The end point could not be connected to the graph at all.
    #[error("destination {to} cannot be connected to the navigation graph")]
    BadPathDestination { to: Vec2 },
}

pub type PathResult<T> = Result<T, PathError>;
