//! Passage Transition Orchestrator
//!
//! Drives enter/exit/reenter/return fragment transitions during stack
//! navigation and decides which entry is current once every transition of a
//! navigation has finished.
//!
//! # Protocol
//!
//! 1. [`TransitionOrchestrator::prepare`] resolves the [`TransitionKind`](passage_core::TransitionKind),
//!    creates native transitions and registers one [`TransitionListener`] per slot.
//! 2. The platform reports listener events through
//!    [`TransitionOrchestrator::handle_event`]. A start adds the entry to its
//!    host's [`WaitingQueue`]; an end removes it.
//! 3. When a host's queue drains, the orchestrator picks the entry that
//!    becomes current (preferring the [`CompletionTracker`]'s entry when the
//!    completed one is already current) and schedules the delivery.
//! 4. [`TransitionOrchestrator::run_deferred`] runs scheduled work on the
//!    next tick, outside any platform callback.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use passage_platform::headless::{HeadlessBackend, HeadlessFragment, HeadlessNavigationHost};
//! use passage_transition::prelude::*;
//!
//! let host = Rc::new(HeadlessNavigationHost::new());
//! let mut orchestrator = TransitionOrchestrator::with_backend(HeadlessBackend::new());
//! orchestrator.attach_host(HostId(1), host.clone());
//!
//! let mut details = BackstackEntry::with_fragment(HostId(1), "details", HeadlessFragment::new("details"));
//! orchestrator.prepare(true, None, None, &mut details, HostId(1), false)?;
//! ```

pub mod config;
pub mod deferred;
pub mod entry;
pub mod error;
pub mod listener;
pub mod orchestrator;
pub mod presets;
pub mod queue;
pub mod tracker;

pub use config::OrchestratorConfig;
pub use deferred::{DeferredQueue, DeferredTask, Delivery, Tick, WakeCallback};
pub use entry::BackstackEntry;
pub use error::{Result, TransitionError};
pub use listener::{ListenerEffect, ListenerId, ListenerState, TransitionEvent, TransitionListener};
pub use orchestrator::{Entry, TransitionOrchestrator};
pub use presets::{FlipTransition, NoTransition};
pub use queue::{QueueRemoval, WaitingQueue};
pub use tracker::CompletionTracker;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BackstackEntry, ListenerId, OrchestratorConfig, TransitionError, TransitionEvent,
        TransitionOrchestrator,
    };
    pub use passage_core::{
        resolve_kind, AnimationCurve, Direction, HostId, NavigationTransition, NavigationType,
        TransitionKind, TransitionSlot,
    };
    pub use passage_platform::{ListenerHandle, TransitionBackend};
}
