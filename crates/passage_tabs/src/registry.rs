//! Tab host registry
//!
//! Tab fragments are recreated by the platform from their arguments alone, so
//! they find their host through a plain integer id instead of holding a
//! reference to it. The registry owns every live host; a fragment whose host
//! was removed gets [`TabsError::TabHostNotFound`].

use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};

use passage_platform::{FragmentArgs, FragmentManager};
use rustc_hash::FxHashMap;

use crate::error::{Result, TabsError};
use crate::host::TabHost;
use crate::item::TabContentItem;

static NEXT_TAB_HOST_ID: AtomicI32 = AtomicI32::new(1);

/// Process-unique id of a tab host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabHostId(pub i32);

impl TabHostId {
    pub fn next() -> Self {
        TabHostId(NEXT_TAB_HOST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TabHostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns the live tab hosts, keyed by id
pub struct TabRegistry<M: FragmentManager> {
    hosts: FxHashMap<TabHostId, TabHost<M>>,
}

impl<M: FragmentManager> TabRegistry<M> {
    pub fn new() -> Self {
        Self {
            hosts: FxHashMap::default(),
        }
    }

    /// Take ownership of `host`, returning its id
    pub fn register(&mut self, host: TabHost<M>) -> TabHostId {
        let id = host.id();
        tracing::debug!(target: "passage::tabs", "register tab host {}", id);
        self.hosts.insert(id, host);
        id
    }

    pub fn remove(&mut self, id: TabHostId) -> Option<TabHost<M>> {
        let host = self.hosts.remove(&id);
        if host.is_some() {
            tracing::debug!(target: "passage::tabs", "remove tab host {}", id);
        }
        host
    }

    pub fn get(&self, id: TabHostId) -> Option<&TabHost<M>> {
        self.hosts.get(&id)
    }

    pub fn get_mut(&mut self, id: TabHostId) -> Option<&mut TabHost<M>> {
        self.hosts.get_mut(&id)
    }

    /// Like [`get`](Self::get), failing for unknown ids
    pub fn lookup(&self, id: TabHostId) -> Result<&TabHost<M>> {
        self.hosts.get(&id).ok_or(TabsError::TabHostNotFound { id })
    }

    pub fn lookup_mut(&mut self, id: TabHostId) -> Result<&mut TabHost<M>> {
        self.hosts
            .get_mut(&id)
            .ok_or(TabsError::TabHostNotFound { id })
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl<M: FragmentManager> Default for TabRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// The content side of a tab fragment
///
/// Resolves its host on creation so a fragment restored after its host is
/// gone fails early instead of rendering nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabFragment {
    tab_id: TabHostId,
    index: usize,
}

impl TabFragment {
    pub fn create<M: FragmentManager>(registry: &TabRegistry<M>, args: FragmentArgs) -> Result<Self> {
        let tab_id = TabHostId(args.tab_id);
        registry.lookup(tab_id)?;
        Ok(Self {
            tab_id,
            index: args.index,
        })
    }

    pub fn tab_id(&self) -> TabHostId {
        self.tab_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The content item this fragment renders
    pub fn content_item<'a, M: FragmentManager>(
        &self,
        registry: &'a TabRegistry<M>,
    ) -> Result<&'a TabContentItem> {
        let host = registry.lookup(self.tab_id)?;
        let count = host.items().map_or(0, <[TabContentItem]>::len);
        host.item(self.index).ok_or(TabsError::IndexOutOfRange {
            index: self.index,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_platform::headless::HeadlessFragmentManager;

    use crate::config::TabHostConfig;

    fn host() -> TabHost<HeadlessFragmentManager> {
        TabHost::new(HeadlessFragmentManager::new(), TabHostConfig::default())
    }

    #[test]
    fn test_host_ids_are_unique() {
        assert_ne!(TabHostId::next(), TabHostId::next());
    }

    #[test]
    fn test_register_and_remove() {
        let mut registry = TabRegistry::new();
        let id = registry.register(host());
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup(id).is_ok());

        assert!(registry.remove(id).is_some());
        assert!(registry.is_empty());
        assert!(matches!(
            registry.lookup(id),
            Err(TabsError::TabHostNotFound { id: missing }) if missing == id
        ));
    }

    #[test]
    fn test_fragment_resolves_content_item() {
        let mut registry = TabRegistry::new();
        let mut tabs = host();
        tabs.set_items(Some(vec![TabContentItem::new(), TabContentItem::new()]));
        let second = tabs.item(1).map(TabContentItem::id);
        let id = registry.register(tabs);

        let fragment = TabFragment::create(&registry, FragmentArgs { tab_id: id.0, index: 1 }).unwrap();
        let item = fragment.content_item(&registry).unwrap();
        assert_eq!(Some(item.id()), second);
        assert_eq!(item.index(), 1);

        let stale = TabFragment::create(&registry, FragmentArgs { tab_id: id.0, index: 5 }).unwrap();
        assert!(matches!(
            stale.content_item(&registry),
            Err(TabsError::IndexOutOfRange { index: 5, count: 2 })
        ));
    }

    #[test]
    fn test_fragment_without_host() {
        let registry: TabRegistry<HeadlessFragmentManager> = TabRegistry::new();
        let result = TabFragment::create(&registry, FragmentArgs { tab_id: -7, index: 0 });
        assert!(matches!(result, Err(TabsError::TabHostNotFound { .. })));
    }
}
