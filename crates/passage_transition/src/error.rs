//! Error types for passage_transition

use passage_core::HostId;
use passage_platform::{ListenerHandle, PlatformError};
use thiserror::Error;

/// Errors raised by the transition orchestrator
#[derive(Error, Debug)]
pub enum TransitionError {
    /// `prepare` was called while the host still has transitions in flight
    #[error("Calling navigation on {host_id} before previous navigation finished")]
    OverlappingNavigation { host_id: HostId },

    /// An entry that must carry a native fragment has none
    #[error("Entry {tag} has no native fragment")]
    MissingFragment { tag: String },

    /// A listener event arrived for a listener that was already released
    #[error("Unknown transition listener {0}")]
    UnknownListener(ListenerHandle),

    /// Configuration could not be parsed
    #[error("Invalid orchestrator configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// Platform error (JNI, missing native objects, etc.)
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for passage_transition operations
pub type Result<T> = std::result::Result<T, TransitionError>;
