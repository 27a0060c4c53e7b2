//! Headless platform backend
//!
//! In-memory implementation of every platform trait. Nothing animates: the
//! embedder (usually a test) decides when a transition starts and ends by
//! feeding events for the registered [`ListenerHandle`]s to the orchestrator.
//! Every object records what was done to it so callers can assert on slot
//! assignments, listener registrations and fragment transactions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use passage_core::{AnimationCurve, EntryId, NavigationContext, NavigationType, TransitionSlot};

use crate::error::Result;
use crate::fragment::{Fragment, FragmentArgs, FragmentManager, FragmentTransaction, HostedFragment};
use crate::navigation::NavigationHost;
use crate::transition::{ListenerHandle, NativeTransition, TransitionBackend, TransitionSpec};

// ============================================================================
// Transitions
// ============================================================================

struct TransitionState {
    id: u64,
    spec: TransitionSpec,
    duration_ms: Cell<Option<u32>>,
    curve: Cell<Option<AnimationCurve>>,
    listeners: RefCell<Vec<ListenerHandle>>,
}

/// In-memory transition
#[derive(Clone)]
pub struct HeadlessTransition(Rc<TransitionState>);

impl HeadlessTransition {
    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn spec(&self) -> &TransitionSpec {
        &self.0.spec
    }

    pub fn duration_ms(&self) -> Option<u32> {
        self.0.duration_ms.get()
    }

    pub fn curve(&self) -> Option<AnimationCurve> {
        self.0.curve.get()
    }

    /// Listeners currently registered, in registration order
    pub fn listeners(&self) -> Vec<ListenerHandle> {
        self.0.listeners.borrow().clone()
    }

    pub fn has_listeners(&self) -> bool {
        !self.0.listeners.borrow().is_empty()
    }
}

impl NativeTransition for HeadlessTransition {
    fn set_duration(&self, duration_ms: u32) -> Result<()> {
        self.0.duration_ms.set(Some(duration_ms));
        Ok(())
    }

    fn set_interpolator(&self, curve: AnimationCurve) -> Result<()> {
        self.0.curve.set(Some(curve));
        Ok(())
    }

    fn add_listener(&self, listener: ListenerHandle) -> Result<()> {
        self.0.listeners.borrow_mut().push(listener);
        Ok(())
    }

    fn remove_listener(&self, listener: ListenerHandle) -> Result<()> {
        self.0.listeners.borrow_mut().retain(|l| *l != listener);
        Ok(())
    }

    fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn short_string(&self) -> String {
        format!("{}@{:x}", self.0.spec.class_name(), self.0.id)
    }
}

/// Backend creating [`HeadlessTransition`]s
#[derive(Default)]
pub struct HeadlessBackend {
    next_id: Cell<u64>,
    created: RefCell<Vec<HeadlessTransition>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every transition created so far
    pub fn created(&self) -> Vec<HeadlessTransition> {
        self.created.borrow().clone()
    }

    /// Number of created transitions that still have a listener registered
    pub fn transitions_with_listeners(&self) -> usize {
        self.created.borrow().iter().filter(|t| t.has_listeners()).count()
    }
}

impl TransitionBackend for HeadlessBackend {
    type Transition = HeadlessTransition;
    type Fragment = HeadlessFragment;

    fn create_transition(&self, spec: &TransitionSpec) -> Result<HeadlessTransition> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let transition = HeadlessTransition(Rc::new(TransitionState {
            id,
            spec: spec.clone(),
            duration_ms: Cell::new(None),
            curve: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        }));
        self.created.borrow_mut().push(transition.clone());
        Ok(transition)
    }

    fn name(&self) -> &'static str {
        "headless"
    }
}

// ============================================================================
// Fragments
// ============================================================================

struct FragmentState {
    tag: String,
    args: Option<FragmentArgs>,
    slots: RefCell<[Option<HeadlessTransition>; 4]>,
    allow_enter_overlap: Cell<bool>,
    allow_return_overlap: Cell<bool>,
    menu_visible: Cell<bool>,
    user_visible_hint: Cell<bool>,
}

/// In-memory fragment
#[derive(Clone)]
pub struct HeadlessFragment(Rc<FragmentState>);

impl HeadlessFragment {
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_args(tag, None)
    }

    fn with_args(tag: impl Into<String>, args: Option<FragmentArgs>) -> Self {
        HeadlessFragment(Rc::new(FragmentState {
            tag: tag.into(),
            args,
            slots: RefCell::new([None, None, None, None]),
            allow_enter_overlap: Cell::new(false),
            allow_return_overlap: Cell::new(false),
            menu_visible: Cell::new(true),
            user_visible_hint: Cell::new(true),
        }))
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn args(&self) -> Option<FragmentArgs> {
        self.0.args
    }

    /// Transition assigned to `slot`, without going through the trait
    pub fn slot(&self, slot: TransitionSlot) -> Option<HeadlessTransition> {
        self.0.slots.borrow()[slot.index()].clone()
    }

    pub fn allows_enter_overlap(&self) -> bool {
        self.0.allow_enter_overlap.get()
    }

    pub fn allows_return_overlap(&self) -> bool {
        self.0.allow_return_overlap.get()
    }

    pub fn menu_visible(&self) -> bool {
        self.0.menu_visible.get()
    }

    pub fn user_visible_hint(&self) -> bool {
        self.0.user_visible_hint.get()
    }
}

impl Fragment for HeadlessFragment {
    type Transition = HeadlessTransition;

    fn transition(&self, slot: TransitionSlot) -> Result<Option<HeadlessTransition>> {
        Ok(self.slot(slot))
    }

    fn set_transition(&self, slot: TransitionSlot, transition: Option<&HeadlessTransition>) -> Result<()> {
        self.0.slots.borrow_mut()[slot.index()] = transition.cloned();
        Ok(())
    }

    fn set_allow_enter_transition_overlap(&self, allow: bool) -> Result<()> {
        self.0.allow_enter_overlap.set(allow);
        Ok(())
    }

    fn set_allow_return_transition_overlap(&self, allow: bool) -> Result<()> {
        self.0.allow_return_overlap.set(allow);
        Ok(())
    }
}

impl HostedFragment for HeadlessFragment {
    fn set_menu_visibility(&self, visible: bool) -> Result<()> {
        self.0.menu_visible.set(visible);
        Ok(())
    }

    fn set_user_visible_hint(&self, visible: bool) -> Result<()> {
        self.0.user_visible_hint.set(visible);
        Ok(())
    }

    fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Fragment manager
// ============================================================================

/// A recorded fragment operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentOp {
    Add { container_id: i32, tag: String },
    Attach { tag: String },
    Detach { tag: String },
    Remove { tag: String },
}

struct ManagedFragment {
    tag: String,
    fragment: HeadlessFragment,
    attached: bool,
}

#[derive(Default)]
struct ManagerState {
    fragments: RefCell<Vec<ManagedFragment>>,
    committed: RefCell<Vec<FragmentOp>>,
    commits: Cell<usize>,
}

/// In-memory fragment manager
#[derive(Clone, Default)]
pub struct HeadlessFragmentManager(Rc<ManagerState>);

impl HeadlessFragmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every committed operation, in commit order
    pub fn committed(&self) -> Vec<FragmentOp> {
        self.0.committed.borrow().clone()
    }

    /// Number of committed transactions
    pub fn commits(&self) -> usize {
        self.0.commits.get()
    }

    /// Whether a fragment with `tag` is added and attached
    pub fn is_attached(&self, tag: &str) -> bool {
        self.0
            .fragments
            .borrow()
            .iter()
            .any(|f| f.tag == tag && f.attached)
    }

    /// Number of added fragments, attached or not
    pub fn len(&self) -> usize {
        self.0.fragments.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tag the fragment was added under, or its own tag if not added yet
    fn tag_of(&self, fragment: &HeadlessFragment) -> String {
        self.0
            .fragments
            .borrow()
            .iter()
            .find(|f| f.fragment.same_as(fragment))
            .map(|f| f.tag.clone())
            .unwrap_or_else(|| fragment.tag().to_string())
    }

    fn apply(&self, op: &FragmentOp, fragment: &HeadlessFragment) {
        let mut fragments = self.0.fragments.borrow_mut();
        match op {
            FragmentOp::Add { tag, .. } => fragments.push(ManagedFragment {
                tag: tag.clone(),
                fragment: fragment.clone(),
                attached: true,
            }),
            FragmentOp::Attach { .. } | FragmentOp::Detach { .. } => {
                let attached = matches!(op, FragmentOp::Attach { .. });
                if let Some(managed) = fragments.iter_mut().find(|f| f.fragment.same_as(fragment)) {
                    managed.attached = attached;
                }
            }
            FragmentOp::Remove { .. } => fragments.retain(|f| !f.fragment.same_as(fragment)),
        }
    }
}

/// Pending operations of a [`HeadlessFragmentManager`]
pub struct HeadlessTransaction {
    manager: HeadlessFragmentManager,
    ops: Vec<(FragmentOp, HeadlessFragment)>,
}

impl FragmentTransaction for HeadlessTransaction {
    type Fragment = HeadlessFragment;

    fn add(&mut self, container_id: i32, fragment: &HeadlessFragment, tag: &str) -> Result<()> {
        let op = FragmentOp::Add {
            container_id,
            tag: tag.to_string(),
        };
        self.ops.push((op, fragment.clone()));
        Ok(())
    }

    fn attach(&mut self, fragment: &HeadlessFragment) -> Result<()> {
        let tag = self.manager.tag_of(fragment);
        self.ops.push((FragmentOp::Attach { tag }, fragment.clone()));
        Ok(())
    }

    fn detach(&mut self, fragment: &HeadlessFragment) -> Result<()> {
        let tag = self.manager.tag_of(fragment);
        self.ops.push((FragmentOp::Detach { tag }, fragment.clone()));
        Ok(())
    }

    fn remove(&mut self, fragment: &HeadlessFragment) -> Result<()> {
        let tag = self.manager.tag_of(fragment);
        self.ops.push((FragmentOp::Remove { tag }, fragment.clone()));
        Ok(())
    }

    fn commit_now_allowing_state_loss(self) -> Result<()> {
        for (op, fragment) in &self.ops {
            self.manager.apply(op, fragment);
        }
        let manager = &self.manager.0;
        manager
            .committed
            .borrow_mut()
            .extend(self.ops.into_iter().map(|(op, _)| op));
        manager.commits.set(manager.commits.get() + 1);
        Ok(())
    }
}

impl FragmentManager for HeadlessFragmentManager {
    type Fragment = HeadlessFragment;
    type Transaction = HeadlessTransaction;

    fn begin_transaction(&self) -> Result<HeadlessTransaction> {
        Ok(HeadlessTransaction {
            manager: self.clone(),
            ops: Vec::new(),
        })
    }

    fn find_fragment_by_tag(&self, tag: &str) -> Result<Option<HeadlessFragment>> {
        Ok(self
            .0
            .fragments
            .borrow()
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.fragment.clone()))
    }

    fn fragments(&self) -> Result<Vec<HeadlessFragment>> {
        Ok(self
            .0
            .fragments
            .borrow()
            .iter()
            .map(|f| f.fragment.clone())
            .collect())
    }

    fn instantiate(&self, args: FragmentArgs) -> Result<HeadlessFragment> {
        let tag = format!("tab:{}:{}", args.tab_id, args.index);
        Ok(HeadlessFragment::with_args(tag, Some(args)))
    }
}

// ============================================================================
// Navigation host
// ============================================================================

/// In-memory navigation host recording every `set_current` delivery
#[derive(Default)]
pub struct HeadlessNavigationHost {
    current: Cell<Option<EntryId>>,
    context: Cell<Option<NavigationContext>>,
    deliveries: RefCell<Vec<(EntryId, NavigationType)>>,
}

impl HeadlessNavigationHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry reported as current
    pub fn show(&self, entry: EntryId) {
        self.current.set(Some(entry));
    }

    pub fn current(&self) -> Option<EntryId> {
        self.current.get()
    }

    /// Set (or clear) the executing navigation
    pub fn set_executing(&self, navigation_type: Option<NavigationType>) {
        self.context.set(navigation_type.map(NavigationContext::new));
    }

    /// Every `set_current` call received, in order
    pub fn deliveries(&self) -> Vec<(EntryId, NavigationType)> {
        self.deliveries.borrow().clone()
    }
}

impl NavigationHost for HeadlessNavigationHost {
    fn is_current(&self, entry: EntryId) -> bool {
        self.current.get() == Some(entry)
    }

    fn set_current(&self, entry: EntryId, navigation_type: NavigationType) {
        tracing::debug!(target: "passage::headless", "set_current({}, {})", entry, navigation_type);
        self.current.set(Some(entry));
        self.deliveries.borrow_mut().push((entry, navigation_type));
    }

    fn executing_context(&self) -> Option<NavigationContext> {
        self.context.get()
    }
}
