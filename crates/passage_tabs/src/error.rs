//! Error types for passage_tabs

use passage_platform::PlatformError;
use thiserror::Error;

use crate::registry::TabHostId;

/// Tab host errors
#[derive(Error, Debug)]
pub enum TabsError {
    /// A tab fragment refers to a host that is not registered
    #[error("Cannot find tab host {id}")]
    TabHostNotFound { id: TabHostId },

    /// The pager container has no view id, so fragments cannot be named
    #[error("Pager adapter requires a container with a view id")]
    ContainerWithoutId,

    /// An index outside the host's items
    #[error("Tab index {index} out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },

    /// Configuration could not be parsed
    #[error("Invalid tab host configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// Platform error (JNI, fragment manager, etc.)
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for passage_tabs operations
pub type Result<T> = std::result::Result<T, TabsError>;
