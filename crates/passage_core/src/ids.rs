//! Navigation identity types

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one navigation container (a screen stack)
///
/// Entries that share a host id share a waiting queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub i32);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host#{}", self.0)
    }
}

impl From<i32> for HostId {
    fn from(id: i32) -> Self {
        HostId(id)
    }
}

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Unique sequence id of a backstack entry
///
/// Two entries are the same entry exactly when their ids are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    /// Allocate the next process-wide entry id
    pub fn next() -> Self {
        EntryId(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Convert to raw u64 for FFI transport
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Reconstruct from a raw value produced by [`EntryId::to_raw`]
    pub fn from_raw(raw: u64) -> Self {
        EntryId(raw)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_ids_are_unique() {
        let a = EntryId::next();
        let b = EntryId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_entry_id_raw_roundtrip() {
        let id = EntryId::next();
        assert_eq!(EntryId::from_raw(id.to_raw()), id);
    }

    #[test]
    fn test_host_id_display() {
        assert_eq!(HostId(3).to_string(), "host#3");
    }
}
