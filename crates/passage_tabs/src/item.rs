//! Tab content items

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Unique id of a content item, used to detect changed item lists
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentItemId(u64);

impl ContentItemId {
    pub fn next() -> Self {
        ContentItemId(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContentItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Content shown in one page of the pager
#[derive(Clone, Debug)]
pub struct TabContentItem {
    id: ContentItemId,
    pub(crate) index: usize,
    pub(crate) can_be_loaded: bool,
    pub(crate) view_loaded: bool,
}

impl TabContentItem {
    pub fn new() -> Self {
        Self {
            id: ContentItemId::next(),
            index: 0,
            can_be_loaded: false,
            view_loaded: false,
        }
    }

    pub fn id(&self) -> ContentItemId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the pager has instantiated this item's fragment
    pub fn can_be_loaded(&self) -> bool {
        self.can_be_loaded
    }

    /// Whether the item's view is currently loaded
    pub fn is_loaded(&self) -> bool {
        self.view_loaded
    }

    pub(crate) fn load_view(&mut self) {
        if !self.view_loaded {
            tracing::trace!(target: "passage::tabs", "load {}", self.id);
            self.view_loaded = true;
        }
    }

    pub(crate) fn unload_view(&mut self) {
        if self.view_loaded {
            tracing::trace!(target: "passage::tabs", "unload {}", self.id);
            self.view_loaded = false;
        }
    }

    /// Detach the item from a host it no longer belongs to
    pub(crate) fn reset(&mut self) {
        self.index = 0;
        self.can_be_loaded = false;
        self.unload_view();
    }
}

impl Default for TabContentItem {
    fn default() -> Self {
        Self::new()
    }
}
