//! Error types for passage_platform_android

use thiserror::Error;

/// Errors raised while routing platform callbacks to the orchestrator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// No orchestrator was installed on this thread
    #[error("No transition orchestrator installed")]
    NotInstalled,

    /// The orchestrator is already borrowed further up the stack
    #[error("Transition orchestrator is busy")]
    Busy,
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
