//! Tab host
//!
//! A pager of content items plus a tab strip. Only the items within
//! `offscreen_tab_limit` of the selected one keep their views loaded, and only
//! while the host itself is loaded.

use std::ops::RangeInclusive;

use passage_platform::{FragmentManager, FragmentTransaction};

use crate::adapter::PagerAdapter;
use crate::config::TabHostConfig;
use crate::error::{Result, TabsError};
use crate::item::{ContentItemId, TabContentItem};
use crate::registry::TabHostId;
use crate::strip::{create_tab_item_spec, ResourceResolver, TabItemSpec, TabStripItem};

const LOG_TARGET: &str = "passage::tabs";

/// A request for the pager to scroll to a page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollRequest {
    pub index: usize,
    pub smooth: bool,
}

/// Indices within `eps` of `index`, clamped to `0..=last`
///
/// Empty when `index` lies further than `eps` past `last`.
pub fn index_range(index: usize, eps: usize, last: usize) -> RangeInclusive<usize> {
    index.saturating_sub(eps)..=index.saturating_add(eps).min(last)
}

/// Whether the adapter must be refreshed to page through `new`
///
/// Two lists are the same when they hold the same ids, in any order.
pub fn should_update_adapter(current: Option<&[ContentItemId]>, new: Option<&[ContentItemId]>) -> bool {
    match (current, new) {
        (None, None) => false,
        (Some(current), Some(new)) => {
            current.len() != new.len() || !new.iter().all(|id| current.contains(id))
        }
        _ => true,
    }
}

/// Hosts a pager of tab content items
pub struct TabHost<M: FragmentManager> {
    id: TabHostId,
    manager: M,
    config: TabHostConfig,
    items: Option<Vec<TabContentItem>>,
    strip_items: Option<Vec<TabStripItem>>,
    strip_specs: Vec<TabItemSpec>,
    pub(crate) selected_index: Option<usize>,
    loaded: bool,
    pub(crate) adapter: PagerAdapter<M>,
    scroll_request: Option<ScrollRequest>,
}

impl<M: FragmentManager> TabHost<M> {
    pub fn new(manager: M, config: TabHostConfig) -> Self {
        Self {
            id: TabHostId::next(),
            manager,
            config,
            items: None,
            strip_items: None,
            strip_specs: Vec::new(),
            selected_index: None,
            loaded: false,
            adapter: PagerAdapter::new(),
            scroll_request: None,
        }
    }

    pub fn id(&self) -> TabHostId {
        self.id
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn config(&self) -> &TabHostConfig {
        &self.config
    }

    pub fn items(&self) -> Option<&[TabContentItem]> {
        self.items.as_deref()
    }

    pub fn item(&self, index: usize) -> Option<&TabContentItem> {
        self.items.as_ref().and_then(|items| items.get(index))
    }

    pub(crate) fn item_mut(&mut self, index: usize) -> Option<&mut TabContentItem> {
        self.items.as_mut().and_then(|items| items.get_mut(index))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// What the tab strip currently renders
    pub fn strip_specs(&self) -> &[TabItemSpec] {
        &self.strip_specs
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Replace the content items, returning the previous ones detached
    pub fn set_items(&mut self, items: Option<Vec<TabContentItem>>) -> Option<Vec<TabContentItem>> {
        let mut previous = std::mem::replace(&mut self.items, items);
        if let Some(previous) = previous.as_mut() {
            previous.iter_mut().for_each(TabContentItem::reset);
        }

        if let Some(items) = self.items.as_mut() {
            for (index, item) in items.iter_mut().enumerate() {
                item.index = index;
            }
        }

        self.update_adapter_items();
        self.coerce_selected_index();
        previous
    }

    fn update_adapter_items(&mut self) {
        let ids: Option<Vec<ContentItemId>> = self
            .items
            .as_ref()
            .map(|items| items.iter().map(TabContentItem::id).collect());

        if should_update_adapter(self.adapter.items(), ids.as_deref()) {
            self.adapter.items = ids;
            self.adapter.notify_data_set_changed();
        }
    }

    fn coerce_selected_index(&mut self) {
        let count = self.items.as_ref().map_or(0, Vec::len);
        self.selected_index = match self.selected_index {
            _ if count == 0 => None,
            Some(index) if index >= count => Some(count - 1),
            Some(index) => Some(index),
            None => Some(0),
        };
    }

    /// Keep views loaded only around `new_index`
    pub fn load_unload_tab_items(&mut self, new_index: usize) {
        let loaded = self.loaded;
        let limit = self.config.offscreen_tab_limit;
        let Some(items) = self.items.as_mut() else {
            return;
        };
        let Some(last) = items.len().checked_sub(1) else {
            return;
        };

        let window = index_range(new_index, limit, last);
        for (index, item) in items.iter_mut().enumerate() {
            if !window.contains(&index) {
                item.unload_view();
            }
        }

        if loaded && !window.is_empty() {
            for item in &mut items[window] {
                item.load_view();
            }
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// The host became part of a loaded view tree
    pub fn on_loaded(&mut self, resolver: &dyn ResourceResolver) {
        self.loaded = true;
        tracing::debug!(target: LOG_TARGET, "tab host {} loaded", self.id);

        self.update_adapter_items();
        self.rebuild_strip(resolver);
        if let Some(index) = self.selected_index {
            self.load_unload_tab_items(index);
        }
    }

    /// The host left the view tree; every page is dropped
    pub fn on_unloaded(&mut self) {
        self.loaded = false;
        tracing::debug!(target: LOG_TARGET, "tab host {} unloaded", self.id);

        if should_update_adapter(self.adapter.items(), None) {
            self.adapter.items = None;
            self.adapter.notify_data_set_changed();
        }
        self.strip_specs.clear();
        if let Some(items) = self.items.as_mut() {
            items.iter_mut().for_each(TabContentItem::unload_view);
        }
    }

    /// Remove every fragment of this host in one transaction
    pub fn dispose_current_fragments(&mut self) -> Result<()> {
        let fragments = self.manager.fragments()?;
        let mut transaction = self.manager.begin_transaction()?;
        for fragment in &fragments {
            transaction.remove(fragment)?;
        }
        transaction.commit_now_allowing_state_loss()?;

        self.adapter.primary = None;
        tracing::debug!(target: LOG_TARGET, "disposed {} fragments of tab host {}", fragments.len(), self.id);
        Ok(())
    }

    // ========================================================================
    // Tab strip
    // ========================================================================

    /// Replace the tab strip items
    pub fn set_tab_strip_items(&mut self, items: Option<Vec<TabStripItem>>, resolver: &dyn ResourceResolver) {
        self.strip_items = items;
        self.rebuild_strip(resolver);
    }

    pub fn tab_strip_items(&self) -> Option<&[TabStripItem]> {
        self.strip_items.as_deref()
    }

    fn rebuild_strip(&mut self, resolver: &dyn ResourceResolver) {
        self.strip_specs = match self.strip_items.as_deref() {
            Some(items) if !items.is_empty() => items
                .iter()
                .map(|item| create_tab_item_spec(item, resolver))
                .collect(),
            _ => Vec::new(),
        };
        tracing::trace!(target: LOG_TARGET, "tab strip has {} items", self.strip_specs.len());
    }

    // ========================================================================
    // Selection and pager settings
    // ========================================================================

    /// Select `index`, asking the pager for a smooth scroll
    pub fn set_selected_index(&mut self, index: usize) -> Result<()> {
        let count = self.items.as_ref().map_or(0, Vec::len);
        if index >= count {
            return Err(TabsError::IndexOutOfRange { index, count });
        }

        self.selected_index = Some(index);
        self.scroll_request = Some(ScrollRequest { index, smooth: true });
        tracing::debug!(target: LOG_TARGET, "TabView setCurrentItem({}, {})", index, true);
        Ok(())
    }

    /// The scroll the pager still has to perform
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }

    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        self.config.swipe_enabled = enabled;
    }

    pub fn set_offscreen_tab_limit(&mut self, limit: usize) {
        self.config.offscreen_tab_limit = limit;
        if let Some(index) = self.selected_index {
            self.load_unload_tab_items(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_range() {
        assert_eq!(index_range(0, 1, 4), 0..=1);
        assert_eq!(index_range(2, 1, 4), 1..=3);
        assert_eq!(index_range(4, 1, 4), 3..=4);
        assert_eq!(index_range(3, 0, 4), 3..=3);
        assert_eq!(index_range(1, 5, 2), 0..=2);
        assert!(index_range(9, 1, 4).is_empty());
    }

    #[test]
    fn test_should_update_adapter() {
        let a = ContentItemId::next();
        let b = ContentItemId::next();
        let c = ContentItemId::next();

        assert!(!should_update_adapter(None, None));
        assert!(should_update_adapter(None, Some(&[a][..])));
        assert!(should_update_adapter(Some(&[a][..]), None));
        assert!(!should_update_adapter(Some(&[a, b][..]), Some(&[b, a][..])));
        assert!(should_update_adapter(Some(&[a, b][..]), Some(&[a, c][..])));
        assert!(should_update_adapter(Some(&[a, b][..]), Some(&[a, b, c][..])));
    }
}
