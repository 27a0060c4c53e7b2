//! Passage Android Platform
//!
//! Implements the `passage_platform` traits over JNI: framework transitions,
//! `androidx` fragments and fragment managers, and the Java navigation host.
//! Listener callbacks and deferred ticks are routed into a main-thread
//! [`EventDispatcher`].
//!
//! # Example
//!
//! ```ignore
//! use passage_platform_android::jni_bridge::{install, with_orchestrator};
//! use passage_transition::OrchestratorConfig;
//!
//! install(OrchestratorConfig::default())?;
//! with_orchestrator(|orchestrator| orchestrator.attach_host(host_id, host))?;
//! ```

pub mod dispatcher;
pub mod error;
pub mod fragment;
pub mod jni_bridge;
pub mod jni_utils;
pub mod navigation;
pub mod transition;

pub use dispatcher::EventDispatcher;
pub use error::{BridgeError, Result};
pub use fragment::slot_accessors;
pub use navigation::{navigation_type_code, navigation_type_from_code};
pub use transition::{interpolator_for, InterpolatorSpec};

#[cfg(target_os = "android")]
pub use fragment::{AndroidFragment, AndroidFragmentManager, AndroidFragmentTransaction};
#[cfg(target_os = "android")]
pub use navigation::AndroidNavigationHost;
#[cfg(target_os = "android")]
pub use transition::{AndroidBackend, AndroidTransition};

/// Route logging to logcat
#[cfg(target_os = "android")]
pub fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("Passage"),
    );
}

/// Route logging to stderr, filtered by `RUST_LOG`
#[cfg(not(target_os = "android"))]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
