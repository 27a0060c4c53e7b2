//! Backstack entries as seen by the orchestrator

use std::sync::Arc;

use passage_core::{CustomTransition, EntryId, HostId, TransitionKind, TransitionSlot};

use crate::error::{Result, TransitionError};
use crate::listener::ListenerId;

/// A navigation backstack record with four transition listener slots
///
/// Entries are owned by the navigation host's backstack; the orchestrator
/// borrows them for the duration of a call and refers to them by [`EntryId`]
/// afterwards.
pub struct BackstackEntry<F> {
    id: EntryId,
    host_id: HostId,
    fragment_tag: String,
    fragment: Option<F>,
    transition_kind: Option<TransitionKind>,
    custom_transition: Option<Arc<dyn CustomTransition>>,
    listeners: [Option<ListenerId>; 4],
}

impl<F> BackstackEntry<F> {
    /// Create an entry without a native fragment
    pub fn new(host_id: HostId, fragment_tag: impl Into<String>) -> Self {
        Self {
            id: EntryId::next(),
            host_id,
            fragment_tag: fragment_tag.into(),
            fragment: None,
            transition_kind: None,
            custom_transition: None,
            listeners: [None; 4],
        }
    }

    /// Create an entry bound to `fragment`
    pub fn with_fragment(host_id: HostId, fragment_tag: impl Into<String>, fragment: F) -> Self {
        let mut entry = Self::new(host_id, fragment_tag);
        entry.fragment = Some(fragment);
        entry
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    pub fn fragment_tag(&self) -> &str {
        &self.fragment_tag
    }

    /// The native fragment, failing if the entry has none
    pub fn fragment(&self) -> Result<&F> {
        self.fragment.as_ref().ok_or_else(|| TransitionError::MissingFragment {
            tag: self.fragment_tag.clone(),
        })
    }

    pub fn try_fragment(&self) -> Option<&F> {
        self.fragment.as_ref()
    }

    /// Bind a (possibly recreated) native fragment
    ///
    /// Call [`TransitionOrchestrator::update_transitions`](crate::TransitionOrchestrator::update_transitions)
    /// afterwards to re-apply the stored transitions.
    pub fn set_fragment(&mut self, fragment: F) {
        self.fragment = Some(fragment);
    }

    pub fn take_fragment(&mut self) -> Option<F> {
        self.fragment.take()
    }

    /// Kind resolved by the last `prepare` this entry took part in
    pub fn transition_kind(&self) -> Option<TransitionKind> {
        self.transition_kind
    }

    pub fn custom_transition(&self) -> Option<&Arc<dyn CustomTransition>> {
        self.custom_transition.as_ref()
    }

    /// Listener stored in `slot`
    pub fn listener(&self, slot: TransitionSlot) -> Option<ListenerId> {
        self.listeners[slot.index()]
    }

    /// Slots that currently hold a listener
    pub fn populated_slots(&self) -> impl Iterator<Item = (TransitionSlot, ListenerId)> + '_ {
        TransitionSlot::ALL
            .into_iter()
            .filter_map(|slot| self.listener(slot).map(|id| (slot, id)))
    }

    pub(crate) fn set_listener(&mut self, slot: TransitionSlot, listener: ListenerId) {
        self.listeners[slot.index()] = Some(listener);
    }

    pub(crate) fn take_listener(&mut self, slot: TransitionSlot) -> Option<ListenerId> {
        self.listeners[slot.index()].take()
    }

    pub(crate) fn record_transition(
        &mut self,
        kind: TransitionKind,
        custom: Option<Arc<dyn CustomTransition>>,
    ) {
        self.transition_kind = Some(kind);
        self.custom_transition = if kind == TransitionKind::Custom { custom } else { None };
    }
}

impl<F> std::fmt::Debug for BackstackEntry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackstackEntry")
            .field("id", &self.id)
            .field("host_id", &self.host_id)
            .field("fragment_tag", &self.fragment_tag)
            .field("has_fragment", &self.fragment.is_some())
            .field("transition_kind", &self.transition_kind)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fragment() {
        let entry: BackstackEntry<()> = BackstackEntry::new(HostId(1), "home");
        match entry.fragment() {
            Err(TransitionError::MissingFragment { tag }) => assert_eq!(tag, "home"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let a: BackstackEntry<()> = BackstackEntry::new(HostId(1), "a");
        let b: BackstackEntry<()> = BackstackEntry::new(HostId(1), "b");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.populated_slots().count(), 0);
    }

    #[test]
    fn test_record_transition_keeps_custom_only_for_custom_kind() {
        let mut entry: BackstackEntry<()> = BackstackEntry::new(HostId(1), "a");
        entry.record_transition(TransitionKind::Fade, None);
        assert_eq!(entry.transition_kind(), Some(TransitionKind::Fade));
        assert!(entry.custom_transition().is_none());
    }

    #[test]
    fn test_fragment_rebinding() {
        let mut entry: BackstackEntry<()> = BackstackEntry::new(HostId(1), "a");
        assert!(entry.take_fragment().is_none());

        entry.set_fragment(());
        assert!(entry.fragment().is_ok());

        // A destroyed view releases its fragment until it is recreated
        assert_eq!(entry.take_fragment(), Some(()));
        assert!(entry.try_fragment().is_none());
        assert!(entry.fragment().is_err());
    }
}
