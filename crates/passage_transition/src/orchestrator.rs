//! Transition orchestrator
//!
//! Owns the listener registry, the per-host waiting queue and completion
//! tracker, and the next-tick task queue. All methods run on the UI thread;
//! platform callbacks reach the orchestrator through [`TransitionOrchestrator::handle_event`]
//! and scheduled work runs from [`TransitionOrchestrator::run_deferred`].
//!
//! # Example
//!
//! ```ignore
//! use passage_transition::prelude::*;
//!
//! let mut orchestrator = TransitionOrchestrator::with_backend(backend);
//! orchestrator.attach_host(HostId(1), frame.clone());
//!
//! orchestrator.prepare(true, Some(&NavigationTransition::named("slideLeft")), Some(&mut home), &mut details, HostId(1), false)?;
//!
//! // later, from the platform listener callbacks
//! orchestrator.handle_event(handle, TransitionEvent::End)?;
//! orchestrator.run_deferred();
//! ```

use std::fmt::Write as _;
use std::rc::Rc;
use std::sync::Arc;

use passage_core::{
    resolve_kind, AnimationCurve, AnimatorPhase, CustomTransition, EntryId, HostId,
    NavigationTransition, TransitionKind, TransitionSlot,
};
use passage_platform::{
    Edge, FadeMode, Fragment, ListenerHandle, NativeTransition, NavigationHost, TransitionBackend,
    TransitionSpec,
};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::config::OrchestratorConfig;
use crate::deferred::{DeferredQueue, DeferredTask, Delivery, Tick, WakeCallback};
use crate::entry::BackstackEntry;
use crate::error::{Result, TransitionError};
use crate::listener::{ListenerEffect, ListenerId, TransitionEvent, TransitionListener};
use crate::presets::{FlipTransition, NoTransition};
use crate::queue::{QueueRemoval, WaitingQueue};
use crate::tracker::CompletionTracker;

const LOG_TARGET: &str = "passage::transition";

/// Entry type used with backend `B`
pub type Entry<B> = BackstackEntry<<B as TransitionBackend>::Fragment>;

/// Duration and curve applied to every native transition of one navigation
#[derive(Clone, Copy, Debug, PartialEq)]
struct Timing {
    duration_ms: u32,
    curve: AnimationCurve,
}

/// Where the native transitions of one navigation come from
enum SlotSource {
    /// A built-in platform transition (slide, fade, explode)
    Preset(TransitionKind),
    /// Per-phase animators from a factory (custom, flip, none)
    Factory(Arc<dyn CustomTransition>),
}

impl SlotSource {
    fn spec_for(&self, slot: TransitionSlot) -> TransitionSpec {
        use TransitionSlot::*;

        match self {
            SlotSource::Factory(factory) => {
                let phase = phase_for(slot);
                TransitionSpec::Custom {
                    animator: factory.create_animator(phase),
                    name: format!("{}{}", factory.name(), phase.as_str()),
                }
            }
            // Incoming content slides in from the opposite edge, outgoing
            // content leaves towards the named edge.
            SlotSource::Preset(TransitionKind::Slide(direction)) => match slot {
                Enter | Return => TransitionSpec::Slide(Edge::from(direction.opposite())),
                Exit | Reenter => TransitionSpec::Slide(Edge::from(*direction)),
            },
            SlotSource::Preset(TransitionKind::Explode) => TransitionSpec::Explode,
            // Fade and default. All four slots get a fade, otherwise the
            // platform does not run the reverse fade on back navigation.
            SlotSource::Preset(_) => match slot {
                Enter | Reenter => TransitionSpec::Fade(FadeMode::In),
                Exit | Return => TransitionSpec::Fade(FadeMode::Out),
            },
        }
    }
}

fn phase_for(slot: TransitionSlot) -> AnimatorPhase {
    match slot {
        TransitionSlot::Enter => AnimatorPhase::Enter,
        TransitionSlot::Exit => AnimatorPhase::Exit,
        TransitionSlot::Reenter => AnimatorPhase::PopEnter,
        TransitionSlot::Return => AnimatorPhase::PopExit,
    }
}

fn allow_overlap<F: Fragment>(fragment: &F) -> Result<()> {
    fragment.set_allow_enter_transition_overlap(true)?;
    fragment.set_allow_return_transition_overlap(true)?;
    Ok(())
}

/// Coordinates fragment transitions and settles the current entry per host
pub struct TransitionOrchestrator<B: TransitionBackend> {
    backend: B,
    config: OrchestratorConfig,
    listeners: SlotMap<ListenerId, TransitionListener<B::Transition>>,
    waiting: WaitingQueue,
    completed: CompletionTracker,
    deferred: DeferredQueue,
    hosts: FxHashMap<HostId, Rc<dyn NavigationHost>>,
}

impl<B: TransitionBackend> TransitionOrchestrator<B> {
    pub fn new(backend: B, config: OrchestratorConfig) -> Self {
        tracing::debug!(target: LOG_TARGET, "creating orchestrator on {} backend", backend.name());
        Self {
            backend,
            config,
            listeners: SlotMap::with_key(),
            waiting: WaitingQueue::new(),
            completed: CompletionTracker::new(),
            deferred: DeferredQueue::new(),
            hosts: FxHashMap::default(),
        }
    }

    /// Create an orchestrator with the default configuration
    pub fn with_backend(backend: B) -> Self {
        Self::new(backend, OrchestratorConfig::default())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Register the navigation host that owns `host_id`'s backstack
    pub fn attach_host(&mut self, host_id: HostId, host: Rc<dyn NavigationHost>) {
        self.hosts.insert(host_id, host);
    }

    /// Forget a host, e.g. when its frame was dismissed
    ///
    /// Navigations of a detached host still drain their waiting queue, but
    /// the settled entry is not delivered anywhere.
    pub fn detach_host(&mut self, host_id: HostId) -> Option<Rc<dyn NavigationHost>> {
        self.hosts.remove(&host_id)
    }

    /// Set the callback that asks the event loop for a tick
    pub fn set_wake_callback(&mut self, wake: WakeCallback) {
        self.deferred.set_wake_callback(wake);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Configure transitions for a navigation from `outgoing` to `incoming`
    ///
    /// Fails with [`TransitionError::OverlappingNavigation`] while `host_id`
    /// still has transitions in flight.
    pub fn prepare(
        &mut self,
        animated: bool,
        transition: Option<&NavigationTransition>,
        mut outgoing: Option<&mut Entry<B>>,
        incoming: &mut Entry<B>,
        host_id: HostId,
        nested: bool,
    ) -> Result<()> {
        if self.waiting.is_waiting(host_id) {
            return Err(TransitionError::OverlappingNavigation { host_id });
        }

        if let Some(fragment) = outgoing.as_deref().and_then(|entry| entry.try_fragment()) {
            allow_overlap(fragment)?;
        }
        allow_overlap(incoming.fragment()?)?;

        let kind = resolve_kind(animated, transition);
        let custom = match kind {
            TransitionKind::Custom => transition.and_then(|t| t.instance.clone()),
            _ => None,
        };

        let mut outgoing_changed = false;
        if let Some(current) = outgoing.as_deref_mut() {
            self.update_transitions(current)?;
            if current.transition_kind() != Some(kind)
                || !NavigationTransition::same_instance(current.custom_transition(), custom.as_ref())
            {
                self.clear_exit_and_reenter_transitions(current, true)?;
                outgoing_changed = true;
            }
        }

        let timing = self.timing(kind, transition);
        let source = match (kind, custom.as_ref()) {
            (TransitionKind::None, _) => SlotSource::Factory(Arc::new(NoTransition)),
            (TransitionKind::Custom, Some(instance)) => SlotSource::Factory(instance.clone()),
            (TransitionKind::Flip(direction), _) => SlotSource::Factory(Arc::new(
                FlipTransition::new(direction)
                    .with_duration(timing.duration_ms)
                    .with_curve(timing.curve),
            )),
            (kind, _) => SlotSource::Preset(kind),
        };

        self.configure_slots(incoming, &source, timing, &TransitionSlot::ALL)?;
        if outgoing_changed {
            if let Some(current) = outgoing.as_deref_mut() {
                self.configure_slots(
                    current,
                    &source,
                    timing,
                    &[TransitionSlot::Exit, TransitionSlot::Reenter],
                )?;
            }
        }

        incoming.record_transition(kind, custom.clone());
        if let Some(current) = outgoing.as_deref_mut() {
            current.record_transition(kind, custom);
        }

        if kind == TransitionKind::None && nested {
            let mut affected = vec![(incoming.host_id(), incoming.id())];
            if outgoing_changed {
                if let Some(current) = outgoing.as_deref() {
                    affected.push((current.host_id(), current.id()));
                }
            }
            // All starts before any completion, so the host reconciles once.
            for &(host_id, entry) in &affected {
                self.deferred.push(DeferredTask::Start { host_id, entry });
            }
            for &(host_id, entry) in &affected {
                self.deferred.push(DeferredTask::Complete { host_id, entry });
            }
        }

        if let Some(current) = outgoing.as_deref() {
            self.log_transitions(current);
        }
        self.log_transitions(incoming);
        Ok(())
    }

    fn timing(&self, kind: TransitionKind, transition: Option<&NavigationTransition>) -> Timing {
        let config = &self.config;
        let requested_curve = transition.and_then(|t| t.curve);

        match kind {
            TransitionKind::None => Timing {
                duration_ms: 0,
                curve: config.default_curve,
            },
            TransitionKind::Default => Timing {
                duration_ms: config.default_kind_duration_ms,
                curve: config.default_curve,
            },
            TransitionKind::Custom => {
                let instance = transition.and_then(|t| t.instance.as_ref());
                Timing {
                    duration_ms: transition
                        .and_then(|t| t.duration_ms)
                        .or_else(|| instance.and_then(|i| i.duration()))
                        .unwrap_or(config.preset_duration_ms),
                    curve: requested_curve
                        .or_else(|| instance.and_then(|i| i.curve()))
                        .unwrap_or(config.default_curve),
                }
            }
            _ => Timing {
                duration_ms: transition
                    .and_then(|t| t.duration_ms)
                    .unwrap_or(config.preset_duration_ms),
                curve: requested_curve.unwrap_or(config.default_curve),
            },
        }
    }

    fn configure_slots(
        &mut self,
        entry: &mut Entry<B>,
        source: &SlotSource,
        timing: Timing,
        slots: &[TransitionSlot],
    ) -> Result<()> {
        for &slot in slots {
            let transition = self.backend.create_transition(&source.spec_for(slot))?;
            self.set_slot(entry, slot, transition, timing)?;
        }
        Ok(())
    }

    /// Bind `transition` to `slot`: configure it, register a fresh listener,
    /// store the listener on the entry and assign the transition to the fragment
    fn set_slot(
        &mut self,
        entry: &mut Entry<B>,
        slot: TransitionSlot,
        transition: B::Transition,
        timing: Timing,
    ) -> Result<()> {
        entry.fragment()?;

        if let Some(previous) = entry.take_listener(slot) {
            self.release_listener(previous)?;
        }

        transition.set_duration(timing.duration_ms)?;
        transition.set_interpolator(timing.curve)?;

        let id = self.listeners.insert(TransitionListener::new(
            entry.id(),
            entry.host_id(),
            entry.fragment_tag(),
            slot,
            transition.clone(),
        ));
        transition.add_listener(id.handle())?;
        entry.set_listener(slot, id);
        entry.fragment()?.set_transition(slot, Some(&transition))?;
        Ok(())
    }

    fn release_listener(&mut self, id: ListenerId) -> Result<()> {
        if let Some(listener) = self.listeners.remove(id) {
            listener.transition().remove_listener(id.handle())?;
        }
        Ok(())
    }

    // ========================================================================
    // Listener events
    // ========================================================================

    /// Feed a platform listener callback into the state machine
    pub fn handle_event(&mut self, handle: ListenerHandle, event: TransitionEvent) -> Result<()> {
        let id = ListenerId::from_handle(handle);
        let listener = self
            .listeners
            .get_mut(id)
            .ok_or(TransitionError::UnknownListener(handle))?;

        let effect = listener.apply(event);
        if self.config.trace_events {
            tracing::trace!(
                target: LOG_TARGET,
                "{} {} transition for {}",
                event,
                listener.transition().short_string(),
                listener.fragment_tag()
            );
        }

        let (host_id, entry) = (listener.host_id(), listener.entry());
        match effect {
            ListenerEffect::Enqueue => self.waiting.insert(host_id, entry),
            ListenerEffect::Complete => self.complete(host_id, entry),
            ListenerEffect::None => {}
        }
        Ok(())
    }

    fn complete(&mut self, host_id: HostId, entry: EntryId) {
        match self.waiting.remove(host_id, entry) {
            QueueRemoval::Untracked => {
                // Platforms have been seen firing a second end event after
                // the navigation settled.
                tracing::debug!(
                    target: LOG_TARGET,
                    "{} completed after {} settled, ignoring",
                    entry,
                    host_id
                );
            }
            QueueRemoval::Remaining => self.completed.record(host_id, entry),
            QueueRemoval::Drained => {
                let previous = self.completed.take(host_id);
                self.reconcile(host_id, entry, previous);
            }
        }
    }

    /// Pick the entry that becomes current once `host_id` stopped animating
    fn reconcile(&mut self, host_id: HostId, completed: EntryId, previous: Option<EntryId>) {
        let Some(host) = self.hosts.get(&host_id) else {
            tracing::debug!(target: LOG_TARGET, "{} has no navigation host, skipping", host_id);
            return;
        };

        let navigation_type = host
            .executing_context()
            .map(|context| context.navigation_type)
            .unwrap_or_default();
        let entry = if host.is_current(completed) {
            previous.unwrap_or(completed)
        } else {
            completed
        };

        self.deferred.push(DeferredTask::SetCurrent {
            host_id,
            entry,
            navigation_type,
        });
    }

    /// Run the tasks queued before this call and return how many ran
    ///
    /// Tasks queued while running wait for the next call. Settled entries are
    /// committed on their hosts before returning.
    pub fn run_deferred(&mut self) -> usize {
        self.run_tick().deliver()
    }

    /// Run the tasks queued before this call, collecting settled entries
    /// instead of committing them
    ///
    /// Callers that share the orchestrator behind a borrow release it before
    /// calling [`Tick::deliver`], so a host may call back in while committing.
    pub fn run_tick(&mut self) -> Tick {
        let tasks = self.deferred.take_tick();
        let mut tick = Tick {
            ran: tasks.len(),
            deliveries: Vec::new(),
        };

        for task in tasks {
            match task {
                DeferredTask::Start { host_id, entry } => self.waiting.insert(host_id, entry),
                DeferredTask::Complete { host_id, entry } => self.complete(host_id, entry),
                DeferredTask::SetCurrent {
                    host_id,
                    entry,
                    navigation_type,
                } => match self.hosts.get(&host_id) {
                    Some(host) => tick
                        .deliveries
                        .push(Delivery::new(host_id, entry, navigation_type, host.clone())),
                    None => {
                        tracing::debug!(target: LOG_TARGET, "{} detached before delivery of {}", host_id, entry);
                    }
                },
            }
        }

        tick
    }

    /// Run ticks until no task is left
    pub fn run_until_idle(&mut self) -> usize {
        let mut total = 0;
        while !self.deferred.is_empty() {
            total += self.run_deferred();
        }
        total
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Entries of `host_id` with a transition in flight
    pub fn animated_entries(&self, host_id: HostId) -> Option<&FxHashSet<EntryId>> {
        self.waiting.entries(host_id)
    }

    /// Entry that completed last while others of `host_id` were still running
    pub fn tracked_completion(&self, host_id: HostId) -> Option<EntryId> {
        self.completed.get(host_id)
    }

    pub fn is_navigating(&self, host_id: HostId) -> bool {
        self.waiting.is_waiting(host_id)
    }

    pub fn listener(&self, id: ListenerId) -> Option<&TransitionListener<B::Transition>> {
        self.listeners.get(id)
    }

    /// Number of live listeners across all entries
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ========================================================================
    // Slot maintenance
    // ========================================================================

    /// Re-apply the entry's stored transitions to its (possibly recreated) fragment
    pub fn update_transitions(&self, entry: &Entry<B>) -> Result<()> {
        let Some(fragment) = entry.try_fragment() else {
            return Ok(());
        };

        for (slot, id) in entry.populated_slots() {
            if let Some(listener) = self.listeners.get(id) {
                fragment.set_transition(slot, Some(listener.transition()))?;
            }
        }
        Ok(())
    }

    /// Swap in the back-navigation transitions after the fact
    ///
    /// `current` exits with its return transition and `previous` enters with
    /// its reenter transition. Returns whether any transition was applied, so
    /// the caller can fall back to an instant switch.
    pub fn reverse_transitions(&self, previous: &Entry<B>, current: &Entry<B>) -> Result<bool> {
        let returning = self.slot_transition(current, TransitionSlot::Return);
        current
            .fragment()?
            .set_transition(TransitionSlot::Exit, returning)?;

        let reentering = self.slot_transition(previous, TransitionSlot::Reenter);
        previous
            .fragment()?
            .set_transition(TransitionSlot::Enter, reentering)?;

        Ok(returning.is_some() || reentering.is_some())
    }

    fn slot_transition(&self, entry: &Entry<B>, slot: TransitionSlot) -> Option<&B::Transition> {
        entry
            .listener(slot)
            .and_then(|id| self.listeners.get(id))
            .map(|listener| listener.transition())
    }

    /// Clear the exit and reenter slots
    ///
    /// With `remove_listener` the listeners are also unregistered and
    /// released, so the entry can take fresh ones.
    pub fn clear_exit_and_reenter_transitions(
        &mut self,
        entry: &mut Entry<B>,
        remove_listener: bool,
    ) -> Result<()> {
        self.clear_slots(
            entry,
            &[TransitionSlot::Exit, TransitionSlot::Reenter],
            remove_listener,
        )
    }

    /// Clear all four fragment slots but keep the listeners for a later
    /// [`update_transitions`](Self::update_transitions) or
    /// [`reverse_transitions`](Self::reverse_transitions)
    pub fn clear_fragment(&mut self, entry: &mut Entry<B>) -> Result<()> {
        self.clear_slots(entry, &TransitionSlot::ALL, false)
    }

    /// Clear all four slots and release every listener of the entry
    pub fn clear_entry(&mut self, entry: &mut Entry<B>) -> Result<()> {
        self.clear_slots(entry, &TransitionSlot::ALL, true)
    }

    fn clear_slots(
        &mut self,
        entry: &mut Entry<B>,
        slots: &[TransitionSlot],
        remove_listener: bool,
    ) -> Result<()> {
        for &slot in slots {
            let Some(id) = entry.listener(slot) else {
                continue;
            };

            if let Some(fragment) = entry.try_fragment() {
                if let Some(assigned) = fragment.transition(slot)? {
                    if remove_listener {
                        assigned.remove_listener(id.handle())?;
                    }
                    fragment.set_transition(slot, None)?;
                    tracing::trace!(
                        target: LOG_TARGET,
                        "Cleared {} {} transition for {}",
                        slot,
                        assigned.short_string(),
                        entry.fragment_tag()
                    );
                }
            }

            if remove_listener {
                entry.take_listener(slot);
                self.release_listener(id)?;
            }
        }
        Ok(())
    }

    /// Log the entry's resolved kind and assigned transitions
    pub fn log_transitions(&self, entry: &Entry<B>) {
        let Some(fragment) = entry.try_fragment() else {
            return;
        };

        let mut line = format!("{} Transitions:", entry.fragment_tag());
        if let Some(kind) = entry.transition_kind() {
            let _ = write!(line, " transitionName={},", kind);
        }
        for slot in [
            TransitionSlot::Enter,
            TransitionSlot::Exit,
            TransitionSlot::Reenter,
            TransitionSlot::Return,
        ] {
            if let Ok(Some(transition)) = fragment.transition(slot) {
                let _ = write!(line, " {}={}", slot, transition.short_string());
            }
        }
        tracing::debug!(target: LOG_TARGET, "{}", line);
    }
}
