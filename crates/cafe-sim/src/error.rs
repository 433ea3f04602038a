use cafe_core::CafeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CafeError),

    #[error("scene has no entry route under {0}")]
    MissingEntry(String),

    #[error("scene has no node under {0}")]
    MissingNodes(String),
}

pub type SimResult<T> = Result<T, SimError>;
