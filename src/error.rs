use thiserror::Error;

/// Failures the caller is expected to catch and surface. Anything not listed
/// here is handled leniently inside the engine (bad connections are dropped
/// with a warning, non-converged force layouts are still returned).
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown layout algorithm: {0:?}")]
    UnknownAlgorithm(String),

    #[error("duplicate node id: {0:?}")]
    DuplicateNodeId(String),

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}
