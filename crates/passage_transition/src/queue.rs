//! Per-host waiting queue of entries with a transition in flight

use passage_core::{EntryId, HostId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Result of removing an entry from the waiting queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueRemoval {
    /// The host had no queue; the navigation already settled
    Untracked,
    /// Other entries of the host are still animating
    Remaining,
    /// The queue emptied and was deleted
    Drained,
}

/// Entries whose transition started but has not ended, keyed by host
///
/// A host's set is created on the first insert and deleted as soon as it
/// becomes empty, so `is_waiting` doubles as "a navigation is in flight".
#[derive(Debug, Default)]
pub struct WaitingQueue {
    hosts: FxHashMap<HostId, FxHashSet<EntryId>>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` to the host's set, creating it if absent
    pub fn insert(&mut self, host_id: HostId, entry: EntryId) {
        self.hosts.entry(host_id).or_default().insert(entry);
    }

    /// Remove `entry` from the host's set
    pub fn remove(&mut self, host_id: HostId, entry: EntryId) -> QueueRemoval {
        let Some(entries) = self.hosts.get_mut(&host_id) else {
            return QueueRemoval::Untracked;
        };

        entries.remove(&entry);
        if entries.is_empty() {
            self.hosts.remove(&host_id);
            QueueRemoval::Drained
        } else {
            QueueRemoval::Remaining
        }
    }

    /// Entries of the host currently in flight
    pub fn entries(&self, host_id: HostId) -> Option<&FxHashSet<EntryId>> {
        self.hosts.get(&host_id)
    }

    pub fn is_waiting(&self, host_id: HostId) -> bool {
        self.hosts.get(&host_id).is_some_and(|entries| !entries.is_empty())
    }

    pub fn contains(&self, host_id: HostId, entry: EntryId) -> bool {
        self.hosts
            .get(&host_id)
            .is_some_and(|entries| entries.contains(&entry))
    }

    /// Number of hosts with a navigation in flight
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}
