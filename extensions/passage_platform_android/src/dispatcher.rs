//! Listener event dispatch
//!
//! Native transitions may fire listener callbacks synchronously, for example
//! while the orchestrator is still assigning transitions in `prepare`. Events
//! that arrive while the orchestrator is borrowed are queued and handled as
//! soon as the outer borrow ends, in arrival order. Deferred ticks commit
//! settled entries on their navigation hosts only after the borrow ends.

use std::cell::RefCell;
use std::collections::VecDeque;

use passage_platform::{ListenerHandle, TransitionBackend};
use passage_transition::{TransitionEvent, TransitionOrchestrator};

use crate::error::{BridgeError, Result};

const LOG_TARGET: &str = "passage::android";

/// Owns a thread's orchestrator and serializes platform callbacks into it
pub struct EventDispatcher<B: TransitionBackend> {
    orchestrator: RefCell<Option<TransitionOrchestrator<B>>>,
    pending: RefCell<VecDeque<(ListenerHandle, TransitionEvent)>>,
}

impl<B: TransitionBackend> EventDispatcher<B> {
    pub fn new() -> Self {
        Self {
            orchestrator: RefCell::new(None),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Install `orchestrator`, returning the one it replaces
    pub fn install(&self, orchestrator: TransitionOrchestrator<B>) -> Result<Option<TransitionOrchestrator<B>>> {
        let mut slot = self.orchestrator.try_borrow_mut().map_err(|_| BridgeError::Busy)?;
        Ok(slot.replace(orchestrator))
    }

    pub fn uninstall(&self) -> Result<Option<TransitionOrchestrator<B>>> {
        let mut slot = self.orchestrator.try_borrow_mut().map_err(|_| BridgeError::Busy)?;
        self.pending.borrow_mut().clear();
        Ok(slot.take())
    }

    pub fn is_installed(&self) -> bool {
        self.orchestrator
            .try_borrow()
            .map(|slot| slot.is_some())
            .unwrap_or(true)
    }

    /// Run `f` against the orchestrator, then handle events it caused
    pub fn with<R>(&self, f: impl FnOnce(&mut TransitionOrchestrator<B>) -> R) -> Result<R> {
        let result = {
            let mut slot = self.orchestrator.try_borrow_mut().map_err(|_| BridgeError::Busy)?;
            let orchestrator = slot.as_mut().ok_or(BridgeError::NotInstalled)?;
            f(orchestrator)
        };
        self.drain();
        Ok(result)
    }

    /// Route a listener callback carrying a raw event code
    pub fn dispatch(&self, handle: ListenerHandle, code: i32) {
        let Some(event) = TransitionEvent::from_code(code) else {
            tracing::warn!(target: LOG_TARGET, "unknown transition event code {} for {}", code, handle);
            return;
        };
        self.pending.borrow_mut().push_back((handle, event));
        self.drain();
    }

    /// Run one tick of deferred work
    ///
    /// Settled entries are committed after the orchestrator is released, so
    /// a navigation host may call back in from `set_current`.
    pub fn tick(&self) -> Result<usize> {
        let tick = self.with(|orchestrator| orchestrator.run_tick())?;
        Ok(tick.deliver())
    }

    /// Events waiting for the orchestrator to become available
    pub fn pending_events(&self) -> usize {
        self.pending.borrow().len()
    }

    fn drain(&self) {
        let Ok(mut slot) = self.orchestrator.try_borrow_mut() else {
            return;
        };
        let Some(orchestrator) = slot.as_mut() else {
            let dropped = std::mem::take(&mut *self.pending.borrow_mut());
            if !dropped.is_empty() {
                tracing::warn!(target: LOG_TARGET, "dropped {} events, no orchestrator installed", dropped.len());
            }
            return;
        };

        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((handle, event)) = next else {
                break;
            };
            if let Err(e) = orchestrator.handle_event(handle, event) {
                tracing::warn!(target: LOG_TARGET, "{} for {} ignored: {}", event, handle, e);
            }
        }
    }
}

impl<B: TransitionBackend> Default for EventDispatcher<B> {
    fn default() -> Self {
        Self::new()
    }
}
