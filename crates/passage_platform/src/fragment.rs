//! Fragment and fragment manager abstraction

use passage_core::TransitionSlot;

use crate::error::Result;
use crate::transition::NativeTransition;

/// A native fragment carrying four transition slots
pub trait Fragment {
    type Transition: NativeTransition;

    /// The transition currently assigned to `slot`
    fn transition(&self, slot: TransitionSlot) -> Result<Option<Self::Transition>>;

    /// Assign (or clear, with `None`) the transition of `slot`
    fn set_transition(&self, slot: TransitionSlot, transition: Option<&Self::Transition>) -> Result<()>;

    fn set_allow_enter_transition_overlap(&self, allow: bool) -> Result<()>;

    fn set_allow_return_transition_overlap(&self, allow: bool) -> Result<()>;
}

/// Arguments a tab fragment is created with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FragmentArgs {
    /// Id of the owning tab host
    pub tab_id: i32,
    /// Index of the tab content item
    pub index: usize,
}

/// A fragment managed by a pager
pub trait HostedFragment: Clone {
    fn set_menu_visibility(&self, visible: bool) -> Result<()>;

    fn set_user_visible_hint(&self, visible: bool) -> Result<()>;

    /// Whether both handles refer to the same native fragment
    fn same_as(&self, other: &Self) -> bool;
}

/// A pending batch of fragment operations
pub trait FragmentTransaction {
    type Fragment: HostedFragment;

    fn add(&mut self, container_id: i32, fragment: &Self::Fragment, tag: &str) -> Result<()>;

    fn attach(&mut self, fragment: &Self::Fragment) -> Result<()>;

    fn detach(&mut self, fragment: &Self::Fragment) -> Result<()>;

    fn remove(&mut self, fragment: &Self::Fragment) -> Result<()>;

    /// Execute the batch synchronously, even after state was saved
    fn commit_now_allowing_state_loss(self) -> Result<()>
    where
        Self: Sized;
}

/// The platform fragment manager
pub trait FragmentManager {
    type Fragment: HostedFragment;
    type Transaction: FragmentTransaction<Fragment = Self::Fragment>;

    fn begin_transaction(&self) -> Result<Self::Transaction>;

    fn find_fragment_by_tag(&self, tag: &str) -> Result<Option<Self::Fragment>>;

    /// All fragments currently added
    fn fragments(&self) -> Result<Vec<Self::Fragment>>;

    /// Create a new tab fragment carrying `args`
    fn instantiate(&self, args: FragmentArgs) -> Result<Self::Fragment>;
}
