//! Next-tick task queue
//!
//! Work that must not run inside a platform listener callback is queued here
//! and executed by [`TransitionOrchestrator::run_deferred`](crate::TransitionOrchestrator::run_deferred)
//! once the callback has returned. On Android the wake callback posts a
//! runnable to the main looper; in tests the caller drains the queue itself.

use std::collections::VecDeque;
use std::rc::Rc;

use passage_core::{EntryId, HostId, NavigationType};
use passage_platform::NavigationHost;

/// Callback invoked when the queue goes from empty to non-empty
pub type WakeCallback = Rc<dyn Fn()>;

/// A unit of deferred orchestrator work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Synthetic transition start for an un-animated nested navigation
    Start { host_id: HostId, entry: EntryId },
    /// Synthetic transition end for an un-animated nested navigation
    Complete { host_id: HostId, entry: EntryId },
    /// Deliver the reconciled current entry to its navigation host
    SetCurrent {
        host_id: HostId,
        entry: EntryId,
        navigation_type: NavigationType,
    },
}

/// A settled entry on its way to the navigation host
///
/// Collected by [`TransitionOrchestrator::run_tick`](crate::TransitionOrchestrator::run_tick)
/// so the host can be called after the orchestrator is released. Hosts
/// commonly call back into the orchestrator while committing an entry.
pub struct Delivery {
    pub host_id: HostId,
    pub entry: EntryId,
    pub navigation_type: NavigationType,
    host: Rc<dyn NavigationHost>,
}

impl Delivery {
    pub(crate) fn new(host_id: HostId, entry: EntryId, navigation_type: NavigationType, host: Rc<dyn NavigationHost>) -> Self {
        Self {
            host_id,
            entry,
            navigation_type,
            host,
        }
    }

    /// Commit the entry on its host
    pub fn deliver(self) {
        tracing::debug!(
            target: "passage::transition",
            "{} current is now {} ({})",
            self.host_id,
            self.entry,
            self.navigation_type
        );
        self.host.set_current(self.entry, self.navigation_type);
    }
}

/// Result of one tick of deferred work
#[derive(Default)]
pub struct Tick {
    /// Tasks that ran
    pub ran: usize,
    /// Entries to commit once the orchestrator is no longer borrowed
    pub deliveries: Vec<Delivery>,
}

impl Tick {
    /// Commit every collected entry in order, returning the task count
    pub fn deliver(self) -> usize {
        self.deliveries.into_iter().for_each(Delivery::deliver);
        self.ran
    }
}

/// FIFO of deferred tasks, drained one tick at a time
#[derive(Default)]
pub struct DeferredQueue {
    tasks: VecDeque<DeferredTask>,
    wake: Option<WakeCallback>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback used to request a tick from the event loop
    pub fn set_wake_callback(&mut self, wake: WakeCallback) {
        self.wake = Some(wake);
    }

    pub fn push(&mut self, task: DeferredTask) {
        let was_empty = self.tasks.is_empty();
        self.tasks.push_back(task);
        if was_empty {
            if let Some(wake) = &self.wake {
                wake();
            }
        }
    }

    /// Take every task queued so far; tasks pushed while running them wait
    /// for the next tick
    pub fn take_tick(&mut self) -> VecDeque<DeferredTask> {
        std::mem::take(&mut self.tasks)
    }

    pub fn pending(&self) -> impl Iterator<Item = &DeferredTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
