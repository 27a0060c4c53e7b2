//! Transition listener state machine
//!
//! One listener is bound to exactly one (entry, native transition) pair. The
//! platform reports lifecycle events for it by [`ListenerHandle`]; the
//! listener folds them into its [`ListenerState`] and tells the orchestrator
//! what the event means for the waiting queue.
//!
//! ```text
//!            start            end
//!   Idle ──────────► Started ─────► Ended
//!                     │   ▲  \
//!               pause │   │ resume   cancel
//!                     ▼   │    \
//!                    Paused     ► Cancelled ──end──► Ended
//! ```
//!
//! `Ended` and `Cancelled` end a run. A later `start` begins a new run, since
//! the same native transition plays again on back navigation.

use std::fmt;

use passage_core::{EntryId, HostId, TransitionSlot};
use passage_platform::ListenerHandle;
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a registered transition listener
    pub struct ListenerId;
}

impl ListenerId {
    /// Convert to raw u64 for FFI transport
    pub fn to_raw(self) -> u64 {
        self.0.as_ffi()
    }

    /// Reconstruct from a raw value produced by [`ListenerId::to_raw`]
    pub fn from_raw(raw: u64) -> Self {
        ListenerId::from(slotmap::KeyData::from_ffi(raw))
    }

    /// The handle the platform reports events with
    pub fn handle(self) -> ListenerHandle {
        ListenerHandle(self.to_raw())
    }

    pub fn from_handle(handle: ListenerHandle) -> Self {
        Self::from_raw(handle.0)
    }
}

/// Lifecycle event fired by a native transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionEvent {
    Start,
    End,
    Pause,
    Resume,
    Cancel,
}

impl TransitionEvent {
    /// Decode the integer code used across the JNI boundary
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TransitionEvent::Start),
            1 => Some(TransitionEvent::End),
            2 => Some(TransitionEvent::Pause),
            3 => Some(TransitionEvent::Resume),
            4 => Some(TransitionEvent::Cancel),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TransitionEvent::Start => 0,
            TransitionEvent::End => 1,
            TransitionEvent::Pause => 2,
            TransitionEvent::Resume => 3,
            TransitionEvent::Cancel => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransitionEvent::Start => "START",
            TransitionEvent::End => "END",
            TransitionEvent::Pause => "PAUSE",
            TransitionEvent::Resume => "RESUME",
            TransitionEvent::Cancel => "CANCEL",
        }
    }
}

impl fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a listener is in its current run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListenerState {
    #[default]
    Idle,
    Started,
    /// Sub-state of `Started`
    Paused,
    Ended,
    Cancelled,
}

impl ListenerState {
    /// Whether the transition is running (paused counts as running)
    pub fn is_running(self) -> bool {
        matches!(self, ListenerState::Started | ListenerState::Paused)
    }
}

/// What an event means for the waiting queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerEffect {
    /// Nothing to do beyond logging
    None,
    /// Add the entry to its host's waiting queue
    Enqueue,
    /// Remove the entry from its host's waiting queue
    Complete,
}

/// Observer bound to one native transition of one entry
pub struct TransitionListener<T> {
    entry: EntryId,
    host_id: HostId,
    fragment_tag: String,
    slot: TransitionSlot,
    transition: T,
    state: ListenerState,
}

impl<T> TransitionListener<T> {
    pub fn new(
        entry: EntryId,
        host_id: HostId,
        fragment_tag: impl Into<String>,
        slot: TransitionSlot,
        transition: T,
    ) -> Self {
        Self {
            entry,
            host_id,
            fragment_tag: fragment_tag.into(),
            slot,
            transition,
            state: ListenerState::Idle,
        }
    }

    pub fn entry(&self) -> EntryId {
        self.entry
    }

    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    pub fn fragment_tag(&self) -> &str {
        &self.fragment_tag
    }

    pub fn slot(&self) -> TransitionSlot {
        self.slot
    }

    /// The native transition this listener is registered with
    pub fn transition(&self) -> &T {
        &self.transition
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Fold a platform event into the listener state
    ///
    /// `Start` always enqueues and `End` always completes; whether a completion
    /// is a duplicate is decided by the waiting queue, which knows whether the
    /// host still has a navigation in flight.
    pub fn apply(&mut self, event: TransitionEvent) -> ListenerEffect {
        use ListenerState::*;

        match (self.state, event) {
            (_, TransitionEvent::Start) => {
                self.state = Started;
                ListenerEffect::Enqueue
            }
            (_, TransitionEvent::End) => {
                self.state = Ended;
                ListenerEffect::Complete
            }
            (Started, TransitionEvent::Pause) => {
                self.state = Paused;
                ListenerEffect::None
            }
            (Paused, TransitionEvent::Resume) => {
                self.state = Started;
                ListenerEffect::None
            }
            (Started | Paused, TransitionEvent::Cancel) => {
                self.state = Cancelled;
                ListenerEffect::None
            }
            _ => ListenerEffect::None,
        }
    }
}
