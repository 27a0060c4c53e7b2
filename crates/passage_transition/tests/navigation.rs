//! Navigation scenarios against the headless backend

use std::rc::Rc;
use std::sync::Arc;

use passage_core::{
    AnimatedProperty, AnimatorPhase, AnimatorSpec, CustomTransition, HostId, NavigationTransition,
    NavigationType, TransitionKind, TransitionSlot,
};
use passage_platform::headless::{HeadlessBackend, HeadlessFragment, HeadlessNavigationHost};
use passage_platform::{NativeTransition, TransitionSpec};
use passage_transition::{
    BackstackEntry, ListenerState, OrchestratorConfig, TransitionError, TransitionEvent,
    TransitionOrchestrator,
};
use tracing_subscriber::EnvFilter;

type Orchestrator = TransitionOrchestrator<HeadlessBackend>;
type Entry = BackstackEntry<HeadlessFragment>;

const HOST: HostId = HostId(1);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup() -> (Orchestrator, Rc<HeadlessNavigationHost>) {
    init_tracing();
    let host = Rc::new(HeadlessNavigationHost::new());
    let mut orchestrator = TransitionOrchestrator::with_backend(HeadlessBackend::new());
    orchestrator.attach_host(HOST, host.clone());
    (orchestrator, host)
}

fn entry(host_id: HostId, tag: &str) -> Entry {
    BackstackEntry::with_fragment(host_id, tag, HeadlessFragment::new(tag))
}

fn fire(orchestrator: &mut Orchestrator, entry: &Entry, slot: TransitionSlot, event: TransitionEvent) {
    let listener = entry.listener(slot).expect("slot has a listener");
    orchestrator
        .handle_event(listener.handle(), event)
        .expect("listener is registered");
}

fn run(orchestrator: &mut Orchestrator, entry: &Entry, slot: TransitionSlot) {
    fire(orchestrator, entry, slot, TransitionEvent::Start);
    fire(orchestrator, entry, slot, TransitionEvent::End);
}

struct Spin;

impl CustomTransition for Spin {
    fn name(&self) -> &str {
        "Spin"
    }

    fn duration(&self) -> Option<u32> {
        Some(420)
    }

    fn create_animator(&self, _phase: AnimatorPhase) -> AnimatorSpec {
        AnimatorSpec::new(420).track(AnimatedProperty::RotationY, [0.0, 360.0])
    }
}

// ============================================================================
// Forward navigation
// ============================================================================

#[test]
fn test_single_forward_navigation() {
    let (mut orchestrator, host) = setup();
    host.set_executing(Some(NavigationType::Forward));
    let mut b = entry(HOST, "b");

    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();
    assert_eq!(b.transition_kind(), Some(TransitionKind::Default));
    assert!(b.listener(TransitionSlot::Enter).is_some());
    assert!(b.listener(TransitionSlot::Return).is_some());

    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);
    assert!(orchestrator.animated_entries(HOST).unwrap().contains(&b.id()));

    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);
    assert!(orchestrator.animated_entries(HOST).is_none());

    // Delivery waits for the next tick
    assert!(host.deliveries().is_empty());
    assert_eq!(orchestrator.run_deferred(), 1);
    assert_eq!(host.deliveries(), vec![(b.id(), NavigationType::Forward)]);

    assert_eq!(orchestrator.run_until_idle(), 0);
    assert_eq!(host.deliveries().len(), 1);
}

#[test]
fn test_tick_collects_deliveries() {
    let (mut orchestrator, host) = setup();
    host.set_executing(Some(NavigationType::Forward));
    let mut b = entry(HOST, "b");

    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();
    run(&mut orchestrator, &b, TransitionSlot::Enter);

    let tick = orchestrator.run_tick();
    assert_eq!(tick.ran, 1);
    assert_eq!(tick.deliveries.len(), 1);
    assert_eq!(tick.deliveries[0].host_id, HOST);
    assert_eq!(tick.deliveries[0].entry, b.id());

    // Nothing reaches the host until the tick is delivered
    assert!(host.deliveries().is_empty());
    assert_eq!(orchestrator.pending_tasks(), 0);
    assert_eq!(tick.deliver(), 1);
    assert_eq!(host.deliveries(), vec![(b.id(), NavigationType::Forward)]);
}

#[test]
fn test_tick_skips_detached_host() {
    let (mut orchestrator, host) = setup();
    let mut b = entry(HOST, "b");

    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();
    run(&mut orchestrator, &b, TransitionSlot::Enter);
    orchestrator.detach_host(HOST);

    let tick = orchestrator.run_tick();
    assert_eq!(tick.ran, 1);
    assert!(tick.deliveries.is_empty());
    assert!(host.deliveries().is_empty());
}

#[test]
fn test_default_kind_timing() {
    let (mut orchestrator, _host) = setup();
    let mut b = entry(HOST, "b");

    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();

    let fragment = b.fragment().unwrap();
    for slot in TransitionSlot::ALL {
        let transition = fragment.slot(slot).expect("slot populated");
        assert_eq!(transition.duration_ms(), Some(150));
        assert_eq!(transition.curve(), Some(passage_core::AnimationCurve::EaseInOut));
    }
    assert_eq!(
        fragment.slot(TransitionSlot::Enter).unwrap().spec(),
        &TransitionSpec::Fade(passage_platform::FadeMode::In)
    );
    assert!(fragment.allows_enter_overlap());
    assert!(fragment.allows_return_overlap());
}

#[test]
fn test_preset_timing_from_descriptor_and_config() {
    init_tracing();
    let config = OrchestratorConfig::new().preset_duration(250);
    let mut orchestrator = TransitionOrchestrator::new(HeadlessBackend::new(), config);
    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");

    orchestrator
        .prepare(true, Some(&NavigationTransition::named("explode")), None, &mut a, HOST, false)
        .unwrap();
    let exploded = a.fragment().unwrap().slot(TransitionSlot::Enter).unwrap();
    assert_eq!(exploded.spec(), &TransitionSpec::Explode);
    assert_eq!(exploded.duration_ms(), Some(250));

    let slide = NavigationTransition::named("slideRight")
        .with_duration(500)
        .with_curve(passage_core::AnimationCurve::Linear);
    orchestrator
        .prepare(true, Some(&slide), None, &mut b, HOST, false)
        .unwrap();
    let enter = b.fragment().unwrap().slot(TransitionSlot::Enter).unwrap();
    assert_eq!(enter.duration_ms(), Some(500));
    assert_eq!(enter.curve(), Some(passage_core::AnimationCurve::Linear));
    assert_eq!(b.transition_kind(), Some(TransitionKind::Slide(passage_core::Direction::Right)));
}

#[test]
fn test_forward_with_outgoing_entry_settles_on_incoming() {
    let (mut orchestrator, host) = setup();
    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");
    host.show(a.id());
    host.set_executing(Some(NavigationType::Forward));

    let slide = NavigationTransition::named("slideLeft");
    orchestrator
        .prepare(true, Some(&slide), Some(&mut a), &mut b, HOST, false)
        .unwrap();

    // Outgoing gets exit/reenter only
    assert!(a.listener(TransitionSlot::Exit).is_some());
    assert!(a.listener(TransitionSlot::Reenter).is_some());
    assert!(a.listener(TransitionSlot::Enter).is_none());
    assert_eq!(a.transition_kind(), Some(TransitionKind::Slide(passage_core::Direction::Left)));

    fire(&mut orchestrator, &a, TransitionSlot::Exit, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);
    assert_eq!(orchestrator.tracked_completion(HOST), Some(b.id()));

    fire(&mut orchestrator, &a, TransitionSlot::Exit, TransitionEvent::End);
    assert!(orchestrator.tracked_completion(HOST).is_none());

    orchestrator.run_until_idle();
    // `a` was current, so the tracked entry `b` wins
    assert_eq!(host.deliveries(), vec![(b.id(), NavigationType::Forward)]);
}

// ============================================================================
// Overlap and idempotence
// ============================================================================

#[test]
fn test_overlapping_navigation_is_rejected() {
    let (mut orchestrator, _host) = setup();
    let mut b = entry(HOST, "b");
    let mut c = entry(HOST, "c");

    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);

    let err = orchestrator
        .prepare(true, None, Some(&mut b), &mut c, HOST, false)
        .unwrap_err();
    assert!(matches!(err, TransitionError::OverlappingNavigation { host_id } if host_id == HOST));

    // Once settled the host accepts a new navigation
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);
    orchestrator.run_until_idle();
    orchestrator
        .prepare(true, None, Some(&mut b), &mut c, HOST, false)
        .unwrap();
}

#[test]
fn test_duplicate_end_is_a_no_op() {
    let (mut orchestrator, host) = setup();
    let mut b = entry(HOST, "b");
    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();

    run(&mut orchestrator, &b, TransitionSlot::Enter);
    orchestrator.run_until_idle();
    assert_eq!(host.deliveries().len(), 1);

    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);
    assert!(orchestrator.animated_entries(HOST).is_none());
    assert!(orchestrator.tracked_completion(HOST).is_none());
    assert_eq!(orchestrator.pending_tasks(), 0);
    assert_eq!(host.deliveries().len(), 1);
}

#[test]
fn test_disjoint_hosts_are_independent() {
    let (mut orchestrator, host_one) = setup();
    let host_two = Rc::new(HeadlessNavigationHost::new());
    orchestrator.attach_host(HostId(2), host_two.clone());

    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");
    let mut x = entry(HostId(2), "x");

    orchestrator.prepare(true, None, Some(&mut a), &mut b, HOST, false).unwrap();
    orchestrator.prepare(true, None, None, &mut x, HostId(2), false).unwrap();

    fire(&mut orchestrator, &a, TransitionSlot::Exit, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);
    fire(&mut orchestrator, &x, TransitionSlot::Enter, TransitionEvent::Start);

    fire(&mut orchestrator, &a, TransitionSlot::Exit, TransitionEvent::End);
    assert_eq!(orchestrator.tracked_completion(HOST), Some(a.id()));
    assert!(orchestrator.tracked_completion(HostId(2)).is_none());

    fire(&mut orchestrator, &x, TransitionSlot::Enter, TransitionEvent::End);
    orchestrator.run_until_idle();
    assert_eq!(host_two.deliveries(), vec![(x.id(), NavigationType::Back)]);
    assert!(host_one.deliveries().is_empty());
    assert!(orchestrator.is_navigating(HOST));
    assert!(!orchestrator.is_navigating(HostId(2)));
    assert_eq!(orchestrator.tracked_completion(HOST), Some(a.id()));
}

#[test]
fn test_queue_and_tracker_cleared_together() {
    let (mut orchestrator, _host) = setup();
    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");
    orchestrator
        .prepare(true, Some(&NavigationTransition::named("fade")), Some(&mut a), &mut b, HOST, false)
        .unwrap();

    fire(&mut orchestrator, &a, TransitionSlot::Exit, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);
    fire(&mut orchestrator, &a, TransitionSlot::Exit, TransitionEvent::End);
    assert!(orchestrator.animated_entries(HOST).is_some());
    assert!(orchestrator.tracked_completion(HOST).is_some());

    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);
    assert!(orchestrator.animated_entries(HOST).is_none());
    assert!(orchestrator.tracked_completion(HOST).is_none());
}

#[test]
fn test_cancel_keeps_entry_waiting() {
    let (mut orchestrator, host) = setup();
    let mut b = entry(HOST, "b");
    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();

    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Pause);
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Resume);
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Cancel);
    assert!(orchestrator.is_navigating(HOST));

    let listener = b.listener(TransitionSlot::Enter).unwrap();
    assert_eq!(
        orchestrator.listener(listener).unwrap().state(),
        ListenerState::Cancelled
    );

    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);
    orchestrator.run_until_idle();
    assert_eq!(host.deliveries().len(), 1);
}

// ============================================================================
// Back navigation
// ============================================================================

/// Navigate a → b and settle, leaving `b` current
fn forward_to_b(orchestrator: &mut Orchestrator, host: &HeadlessNavigationHost) -> (Entry, Entry) {
    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");
    host.show(a.id());
    host.set_executing(Some(NavigationType::Forward));

    let fade = NavigationTransition::named("fade");
    orchestrator
        .prepare(true, Some(&fade), Some(&mut a), &mut b, HOST, false)
        .unwrap();
    fire(orchestrator, &a, TransitionSlot::Exit, TransitionEvent::Start);
    fire(orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);
    fire(orchestrator, &a, TransitionSlot::Exit, TransitionEvent::End);
    fire(orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);
    orchestrator.run_until_idle();
    assert_eq!(host.current(), Some(b.id()));
    (a, b)
}

#[test]
fn test_back_navigation_reenter_finishes_last() {
    let (mut orchestrator, host) = setup();
    let (a, b) = forward_to_b(&mut orchestrator, &host);
    host.set_executing(Some(NavigationType::Back));

    fire(&mut orchestrator, &a, TransitionSlot::Reenter, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Return, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Return, TransitionEvent::End);
    assert_eq!(orchestrator.pending_tasks(), 0);
    fire(&mut orchestrator, &a, TransitionSlot::Reenter, TransitionEvent::End);

    assert_eq!(orchestrator.run_until_idle(), 1);
    assert_eq!(host.deliveries().last(), Some(&(a.id(), NavigationType::Back)));
    assert_eq!(host.deliveries().len(), 2);
}

#[test]
fn test_back_navigation_return_finishes_last() {
    let (mut orchestrator, host) = setup();
    let (a, b) = forward_to_b(&mut orchestrator, &host);
    host.set_executing(None);

    fire(&mut orchestrator, &a, TransitionSlot::Reenter, TransitionEvent::Start);
    fire(&mut orchestrator, &b, TransitionSlot::Return, TransitionEvent::Start);
    fire(&mut orchestrator, &a, TransitionSlot::Reenter, TransitionEvent::End);
    fire(&mut orchestrator, &b, TransitionSlot::Return, TransitionEvent::End);

    // `b` is current, so the tracked entry `a` wins; no context means back
    assert_eq!(orchestrator.run_until_idle(), 1);
    assert_eq!(host.deliveries().last(), Some(&(a.id(), NavigationType::Back)));
    assert_eq!(host.deliveries().len(), 2);
}

#[test]
fn test_reverse_transitions() {
    let (mut orchestrator, host) = setup();
    let (a, b) = forward_to_b(&mut orchestrator, &host);

    assert!(orchestrator.reverse_transitions(&a, &b).unwrap());

    let b_return = b.fragment().unwrap().slot(TransitionSlot::Return).unwrap();
    let b_exit = b.fragment().unwrap().slot(TransitionSlot::Exit).unwrap();
    assert!(b_exit.same_as(&b_return));

    let a_reenter = a.fragment().unwrap().slot(TransitionSlot::Reenter).unwrap();
    let a_enter = a.fragment().unwrap().slot(TransitionSlot::Enter).unwrap();
    assert!(a_enter.same_as(&a_reenter));
}

#[test]
fn test_reverse_transitions_without_listeners() {
    let (orchestrator, _host) = setup();
    let a = entry(HOST, "a");
    let b = entry(HOST, "b");

    assert!(!orchestrator.reverse_transitions(&a, &b).unwrap());
    assert!(b.fragment().unwrap().slot(TransitionSlot::Exit).is_none());
    assert!(a.fragment().unwrap().slot(TransitionSlot::Enter).is_none());
}

// ============================================================================
// Kind changes and custom transitions
// ============================================================================

#[test]
fn test_kind_change_replaces_outgoing_listeners() {
    let (mut orchestrator, host) = setup();
    let (_a, mut b) = forward_to_b(&mut orchestrator, &host);
    let old_exit = b.listener(TransitionSlot::Exit).unwrap();
    let old_transition = b.fragment().unwrap().slot(TransitionSlot::Exit).unwrap();

    let mut c = entry(HOST, "c");
    orchestrator
        .prepare(true, Some(&NavigationTransition::named("explode")), Some(&mut b), &mut c, HOST, false)
        .unwrap();

    let new_exit = b.listener(TransitionSlot::Exit).unwrap();
    assert_ne!(old_exit, new_exit);
    assert!(orchestrator.listener(old_exit).is_none());
    assert!(!old_transition.has_listeners());
    assert_eq!(
        b.fragment().unwrap().slot(TransitionSlot::Exit).unwrap().spec(),
        &TransitionSpec::Explode
    );
    assert_eq!(b.transition_kind(), Some(TransitionKind::Explode));

    // Stale handles are rejected
    let err = orchestrator
        .handle_event(old_exit.handle(), TransitionEvent::Start)
        .unwrap_err();
    assert!(matches!(err, TransitionError::UnknownListener(_)));
}

#[test]
fn test_same_kind_keeps_outgoing_listeners() {
    let (mut orchestrator, _host) = setup();
    let mut b = entry(HOST, "b");
    let mut c = entry(HOST, "c");
    let fade = NavigationTransition::named("fade");

    orchestrator.prepare(true, Some(&fade), None, &mut b, HOST, false).unwrap();
    let exit = b.listener(TransitionSlot::Exit).unwrap();

    orchestrator
        .prepare(true, Some(&fade), Some(&mut b), &mut c, HOST, false)
        .unwrap();
    assert_eq!(b.listener(TransitionSlot::Exit), Some(exit));
    assert_eq!(c.transition_kind(), Some(TransitionKind::Fade));
}

#[test]
fn test_custom_transition_slots() {
    let (mut orchestrator, _host) = setup();
    let spin: Arc<dyn CustomTransition> = Arc::new(Spin);
    let custom = NavigationTransition::custom(spin.clone());
    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");
    let mut c = entry(HOST, "c");

    orchestrator
        .prepare(true, Some(&custom), Some(&mut a), &mut b, HOST, false)
        .unwrap();
    assert_eq!(b.transition_kind(), Some(TransitionKind::Custom));
    assert!(Arc::ptr_eq(a.custom_transition().unwrap(), &spin));

    let fragment = b.fragment().unwrap();
    let mut names = Vec::new();
    for slot in TransitionSlot::ALL {
        let transition = fragment.slot(slot).unwrap();
        assert_eq!(transition.duration_ms(), Some(420));
        match transition.spec() {
            TransitionSpec::Custom { name, animator } => {
                assert_eq!(animator.duration_ms(), 420);
                names.push(name.clone());
            }
            other => panic!("expected a custom transition, got {:?}", other),
        }
    }
    names.sort();
    assert_eq!(names, vec!["Spinenter", "Spinexit", "SpinpopEnter", "SpinpopExit"]);

    // Same instance again: outgoing listeners survive
    let exit = b.listener(TransitionSlot::Exit).unwrap();
    orchestrator
        .prepare(true, Some(&custom), Some(&mut b), &mut c, HOST, false)
        .unwrap();
    assert_eq!(b.listener(TransitionSlot::Exit), Some(exit));
}

#[test]
fn test_flip_routes_through_factory() {
    let (mut orchestrator, _host) = setup();
    let mut b = entry(HOST, "b");

    orchestrator
        .prepare(true, Some(&NavigationTransition::named("flip")), None, &mut b, HOST, false)
        .unwrap();
    assert_eq!(b.transition_kind(), Some(TransitionKind::Flip(passage_core::Direction::Right)));

    let enter = b.fragment().unwrap().slot(TransitionSlot::Enter).unwrap();
    match enter.spec() {
        TransitionSpec::Custom { name, animator } => {
            assert_eq!(name, "FlipTransitionenter");
            assert_eq!(animator.tracks()[0].property, AnimatedProperty::RotationY);
        }
        other => panic!("expected flip animator, got {:?}", other),
    }
}

// ============================================================================
// Un-animated navigation
// ============================================================================

#[test]
fn test_not_animated_uses_zero_duration_transitions() {
    let (mut orchestrator, host) = setup();
    let mut b = entry(HOST, "b");

    orchestrator.prepare(false, None, None, &mut b, HOST, false).unwrap();
    assert_eq!(b.transition_kind(), Some(TransitionKind::None));
    assert_eq!(orchestrator.pending_tasks(), 0);

    let enter = b.fragment().unwrap().slot(TransitionSlot::Enter).unwrap();
    assert_eq!(enter.duration_ms(), Some(0));
    match enter.spec() {
        TransitionSpec::Custom { animator, .. } => assert_eq!(animator.total_duration_ms(), 0),
        other => panic!("expected no-op animator, got {:?}", other),
    }

    run(&mut orchestrator, &b, TransitionSlot::Enter);
    orchestrator.run_until_idle();
    assert_eq!(host.deliveries().len(), 1);
}

#[test]
fn test_nested_not_animated_synthesizes_completion() {
    let (mut orchestrator, host) = setup();
    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");
    host.show(a.id());
    host.set_executing(Some(NavigationType::Replace));

    orchestrator
        .prepare(false, None, Some(&mut a), &mut b, HOST, true)
        .unwrap();
    assert_eq!(orchestrator.pending_tasks(), 4);
    assert!(host.deliveries().is_empty());

    // First tick: both start, then both complete
    assert_eq!(orchestrator.run_deferred(), 4);
    assert!(!orchestrator.is_navigating(HOST));
    assert_eq!(orchestrator.pending_tasks(), 1);

    orchestrator.run_deferred();
    assert_eq!(host.deliveries(), vec![(b.id(), NavigationType::Replace)]);
}

// ============================================================================
// Clearing
// ============================================================================

#[test]
fn test_clear_entry_releases_everything() {
    let (mut orchestrator, _host) = setup();
    let mut a = entry(HOST, "a");
    let mut b = entry(HOST, "b");
    orchestrator
        .prepare(true, Some(&NavigationTransition::named("slideTop")), Some(&mut a), &mut b, HOST, false)
        .unwrap();

    let assigned: Vec<_> = TransitionSlot::ALL
        .into_iter()
        .filter_map(|slot| b.fragment().unwrap().slot(slot))
        .collect();
    assert_eq!(assigned.len(), 4);
    let handles: Vec<_> = b.populated_slots().map(|(_, id)| id.handle()).collect();

    orchestrator.clear_entry(&mut b).unwrap();

    for slot in TransitionSlot::ALL {
        assert!(b.listener(slot).is_none());
        assert!(b.fragment().unwrap().slot(slot).is_none());
    }
    assert!(assigned.iter().all(|t| !t.has_listeners()));
    for handle in handles {
        assert!(orchestrator.handle_event(handle, TransitionEvent::End).is_err());
    }

    // The outgoing entry is untouched
    assert_eq!(a.populated_slots().count(), 2);

    // The entry can be prepared again
    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();
    assert_eq!(b.populated_slots().count(), 4);
}

#[test]
fn test_clear_fragment_keeps_listeners_for_update() {
    let (mut orchestrator, _host) = setup();
    let mut b = entry(HOST, "b");
    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();
    let listeners = orchestrator.listener_count();

    orchestrator.clear_fragment(&mut b).unwrap();
    assert!(b.fragment().unwrap().slot(TransitionSlot::Enter).is_none());
    assert_eq!(b.populated_slots().count(), 4);
    assert_eq!(orchestrator.listener_count(), listeners);

    orchestrator.update_transitions(&b).unwrap();
    let enter = b.fragment().unwrap().slot(TransitionSlot::Enter).unwrap();
    let id = b.listener(TransitionSlot::Enter).unwrap();
    assert!(enter.same_as(orchestrator.listener(id).unwrap().transition()));
    assert!(enter.listeners().contains(&id.handle()));
}

#[test]
fn test_update_transitions_after_fragment_recreation() {
    let (mut orchestrator, _host) = setup();
    let mut b = entry(HOST, "b");
    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();

    b.set_fragment(HeadlessFragment::new("b"));
    assert!(b.fragment().unwrap().slot(TransitionSlot::Return).is_none());

    orchestrator.update_transitions(&b).unwrap();
    for slot in TransitionSlot::ALL {
        assert!(b.fragment().unwrap().slot(slot).is_some());
    }
}

// ============================================================================
// Hosts and errors
// ============================================================================

#[test]
fn test_detached_host_skips_delivery() {
    let (mut orchestrator, host) = setup();
    let mut b = entry(HOST, "b");
    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();

    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::Start);
    assert!(orchestrator.detach_host(HOST).is_some());
    fire(&mut orchestrator, &b, TransitionSlot::Enter, TransitionEvent::End);

    assert_eq!(orchestrator.run_until_idle(), 0);
    assert!(host.deliveries().is_empty());
    assert!(!orchestrator.is_navigating(HOST));
}

#[test]
fn test_missing_fragment() {
    let (mut orchestrator, _host) = setup();
    let mut b: Entry = BackstackEntry::new(HOST, "b");

    let err = orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap_err();
    assert!(matches!(err, TransitionError::MissingFragment { ref tag } if tag == "b"));
    assert_eq!(orchestrator.listener_count(), 0);
}

#[test]
fn test_kind_resolution_is_pure() {
    use passage_core::resolve_kind;

    let custom = NavigationTransition::custom(Arc::new(Spin));
    assert_eq!(resolve_kind(false, Some(&custom)), TransitionKind::None);
    assert_eq!(resolve_kind(true, Some(&custom)), TransitionKind::Custom);
    assert_eq!(
        resolve_kind(true, Some(&NavigationTransition::named("slideRight"))).as_str(),
        "slideRight"
    );
    assert_eq!(
        resolve_kind(true, Some(&NavigationTransition::named("bogus"))),
        TransitionKind::Default
    );
}

#[test]
fn test_wake_callback_requests_tick() {
    use std::cell::Cell;

    let (mut orchestrator, _host) = setup();
    let wakes = Rc::new(Cell::new(0));
    let counter = wakes.clone();
    orchestrator.set_wake_callback(Rc::new(move || counter.set(counter.get() + 1)));

    let mut b = entry(HOST, "b");
    orchestrator.prepare(true, None, None, &mut b, HOST, false).unwrap();
    run(&mut orchestrator, &b, TransitionSlot::Enter);
    assert_eq!(wakes.get(), 1);
}
