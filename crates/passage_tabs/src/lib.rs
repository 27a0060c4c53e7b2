//! Passage Tabs
//!
//! Tab host model backing a fragment view pager: the pager adapter lifecycle,
//! the offscreen load/unload window around the selected tab and the tab
//! strip's native item specs.
//!
//! # Architecture
//!
//! - [`TabHost`] owns the content items, the strip items and the
//!   [`PagerAdapter`] state. Adapter callbacks are methods on the host.
//! - [`TabRegistry`] owns live hosts. Fragments recreated by the platform
//!   carry only a [`TabHostId`] and find their host through it.
//!
//! # Example
//!
//! ```ignore
//! use passage_platform::headless::HeadlessFragmentManager;
//! use passage_tabs::prelude::*;
//!
//! let mut tabs = TabHost::new(HeadlessFragmentManager::new(), TabHostConfig::default());
//! tabs.set_items(Some(vec![TabContentItem::new(), TabContentItem::new()]));
//!
//! tabs.start_update(container_id)?;
//! let page = tabs.instantiate_item(container_id, 0)?;
//! tabs.set_primary_item(0, Some(&page))?;
//! tabs.finish_update()?;
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod host;
pub mod item;
pub mod registry;
pub mod strip;

pub use adapter::{make_fragment_name, ItemPosition, PagerAdapter, NO_ID};
pub use config::TabHostConfig;
pub use error::{Result, TabsError};
pub use host::{index_range, should_update_adapter, ScrollRequest, TabHost};
pub use item::{ContentItemId, TabContentItem};
pub use registry::{TabFragment, TabHostId, TabRegistry};
pub use strip::{create_tab_item_spec, ResourceResolver, TabIcon, TabItemSpec, TabStripItem, RESOURCE_PREFIX};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ResourceResolver, ScrollRequest, TabContentItem, TabFragment, TabHost, TabHostConfig,
        TabHostId, TabRegistry, TabStripItem, TabsError,
    };
    pub use passage_platform::{FragmentManager, HostedFragment};
}
