//! Navigation host abstraction

use passage_core::{EntryId, NavigationContext, NavigationType};

/// The navigation container that owns a backstack
///
/// The orchestrator only queries the host and tells it which entry became
/// current once a navigation's animations have settled.
pub trait NavigationHost {
    /// Whether `entry` is the entry the host currently displays
    fn is_current(&self, entry: EntryId) -> bool;

    /// Commit `entry` as the displayed entry
    fn set_current(&self, entry: EntryId, navigation_type: NavigationType);

    /// The navigation being executed, if any
    fn executing_context(&self) -> Option<NavigationContext>;
}
