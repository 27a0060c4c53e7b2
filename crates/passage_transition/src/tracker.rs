//! Last entry to complete while its host was still animating

use passage_core::{EntryId, HostId};
use rustc_hash::FxHashMap;

/// At most one tracked completion per host; recording overwrites
#[derive(Debug, Default)]
pub struct CompletionTracker {
    completed: FxHashMap<HostId, EntryId>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, host_id: HostId, entry: EntryId) {
        self.completed.insert(host_id, entry);
    }

    pub fn get(&self, host_id: HostId) -> Option<EntryId> {
        self.completed.get(&host_id).copied()
    }

    /// Remove and return the host's tracked entry
    pub fn take(&mut self, host_id: HostId) -> Option<EntryId> {
        self.completed.remove(&host_id)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}
