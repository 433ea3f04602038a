//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CafeError` where a
//! setup problem (bad configuration, unknown id) has to travel through them.

use thiserror::Error;

use crate::{AgentId, NodeId};

/// Setup and lookup failures shared by every `cafe-*` crate.
#[derive(Debug, Error)]
pub enum CafeError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `cafe-*` crates.
pub type CafeResult<T> = Result<T, CafeError>;
