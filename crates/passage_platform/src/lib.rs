//! Passage Platform Abstraction Layer
//!
//! This crate provides the traits the transition orchestrator and tab host
//! drive the native UI toolkit through.
//!
//! # Architecture
//!
//! - [`TransitionBackend`] - Creates native transitions from a [`TransitionSpec`]
//! - [`NativeTransition`] - Duration, interpolator and listener registration
//! - [`Fragment`] - The four transition slots of a native fragment
//! - [`NavigationHost`] - The container owning a backstack
//! - [`FragmentManager`] / [`FragmentTransaction`] - Fragment lifecycle for tab pagers
//!
//! # Platform Implementations
//!
//! - [`headless`] - In-memory backend for tests and tooling
//! - `passage_platform_android` - Android using JNI
//!
//! # Example
//!
//! ```ignore
//! use passage_platform::prelude::*;
//! use passage_platform::headless::{HeadlessBackend, HeadlessFragment};
//!
//! let backend = HeadlessBackend::new();
//! let fade = backend.create_transition(&TransitionSpec::Fade(FadeMode::In))?;
//! fade.set_duration(300)?;
//!
//! let fragment = HeadlessFragment::new("details");
//! fragment.set_transition(TransitionSlot::Enter, Some(&fade))?;
//! ```

mod error;
mod fragment;
pub mod headless;
mod navigation;
mod transition;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use fragment::{Fragment, FragmentArgs, FragmentManager, FragmentTransaction, HostedFragment};
pub use navigation::NavigationHost;
pub use transition::{Edge, FadeMode, ListenerHandle, NativeTransition, TransitionBackend, TransitionSpec};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::fragment::{Fragment, FragmentArgs, FragmentManager, FragmentTransaction, HostedFragment};
    pub use crate::navigation::NavigationHost;
    pub use crate::transition::{
        Edge, FadeMode, ListenerHandle, NativeTransition, TransitionBackend, TransitionSpec,
    };
    pub use passage_core::TransitionSlot;
}
