//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// An operation needed a native fragment the entry does not have
    #[error("No native fragment attached to {0}")]
    MissingFragment(String),

    /// A JNI call failed
    #[error("JNI error: {0}")]
    Jni(String),

    /// Operation not supported on this platform
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
