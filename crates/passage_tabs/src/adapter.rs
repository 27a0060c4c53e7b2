//! Fragment pager adapter
//!
//! Page fragments are named after the pager container and the item's stable
//! id, so a fragment that survived a configuration change is found and
//! re-attached instead of instantiated again. Operations between
//! [`TabHost::start_update`] and [`TabHost::finish_update`] are batched in a
//! single transaction.

use passage_platform::{FragmentArgs, FragmentManager, FragmentTransaction, HostedFragment};

use crate::error::{Result, TabsError};
use crate::host::TabHost;
use crate::item::ContentItemId;

/// View id of a container that has none
pub const NO_ID: i32 = -1;

/// Tag of the fragment showing item `item_id` inside container `view_id`
pub fn make_fragment_name(view_id: i32, item_id: usize) -> String {
    format!("android:viewpager:{}:{}", view_id, item_id)
}

/// Where an item moved after the data set changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemPosition {
    /// The item keeps its position
    Unchanged,
    /// The item is gone; its page must be destroyed
    None,
}

impl ItemPosition {
    /// The platform's constant for this position
    pub fn code(self) -> i32 {
        match self {
            ItemPosition::Unchanged => -1,
            ItemPosition::None => -2,
        }
    }
}

/// Pager adapter state of a [`TabHost`]
pub struct PagerAdapter<M: FragmentManager> {
    pub(crate) items: Option<Vec<ContentItemId>>,
    pub(crate) transaction: Option<M::Transaction>,
    pub(crate) primary: Option<M::Fragment>,
    data_set_version: u64,
}

impl<M: FragmentManager> PagerAdapter<M> {
    pub(crate) fn new() -> Self {
        Self {
            items: None,
            transaction: None,
            primary: None,
            data_set_version: 0,
        }
    }

    /// Number of pages
    pub fn count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// Ids of the items the adapter currently pages through
    pub fn items(&self) -> Option<&[ContentItemId]> {
        self.items.as_deref()
    }

    /// Stable id of the item at `position`
    pub fn item_id(&self, position: usize) -> usize {
        position
    }

    /// Pages keep their position while the adapter has items
    pub fn item_position(&self) -> ItemPosition {
        if self.items.is_some() {
            ItemPosition::Unchanged
        } else {
            ItemPosition::None
        }
    }

    pub fn primary_item(&self) -> Option<&M::Fragment> {
        self.primary.as_ref()
    }

    /// Whether operations are waiting for [`TabHost::finish_update`]
    pub fn has_pending_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Bumped every time the item list is replaced
    pub fn data_set_version(&self) -> u64 {
        self.data_set_version
    }

    pub(crate) fn notify_data_set_changed(&mut self) {
        self.data_set_version += 1;
        tracing::trace!(
            target: "passage::tabs",
            "adapter data set changed, {} pages, version {}",
            self.count(),
            self.data_set_version
        );
    }
}

impl<M: FragmentManager> TabHost<M> {
    /// Begin a pager update inside `container_id`
    pub fn start_update(&self, container_id: i32) -> Result<()> {
        if container_id == NO_ID {
            return Err(TabsError::ContainerWithoutId);
        }
        Ok(())
    }

    /// The fragment for `position`, re-attached when it already exists
    pub fn instantiate_item(&mut self, container_id: i32, position: usize) -> Result<M::Fragment> {
        let name = make_fragment_name(container_id, self.adapter.item_id(position));

        let existing = self.manager().find_fragment_by_tag(&name)?;
        let fragment = match existing {
            Some(existing) => {
                self.current_transaction()?.attach(&existing)?;
                existing
            }
            None => {
                let fragment = self.manager().instantiate(FragmentArgs {
                    tab_id: self.id().0,
                    index: position,
                })?;
                self.current_transaction()?.add(container_id, &fragment, &name)?;
                fragment
            }
        };

        let is_primary = self
            .adapter
            .primary
            .as_ref()
            .is_some_and(|primary| primary.same_as(&fragment));
        if !is_primary {
            fragment.set_menu_visibility(false)?;
            fragment.set_user_visible_hint(false)?;
        }

        if let Some(item) = self.item_mut(position) {
            item.can_be_loaded = true;
        }

        Ok(fragment)
    }

    /// Detach the fragment of a page that scrolled out of the window
    pub fn destroy_item(&mut self, position: usize, fragment: &M::Fragment) -> Result<()> {
        self.current_transaction()?.detach(fragment)?;

        if self
            .adapter
            .primary
            .as_ref()
            .is_some_and(|primary| primary.same_as(fragment))
        {
            self.adapter.primary = None;
        }

        if let Some(item) = self.item_mut(position) {
            item.can_be_loaded = false;
        }
        Ok(())
    }

    /// Make `fragment` the visible page
    pub fn set_primary_item(&mut self, position: usize, fragment: Option<&M::Fragment>) -> Result<()> {
        let unchanged = match (self.adapter.primary.as_ref(), fragment) {
            (Some(primary), Some(fragment)) => primary.same_as(fragment),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Ok(());
        }

        if let Some(previous) = self.adapter.primary.as_ref() {
            previous.set_menu_visibility(false)?;
            previous.set_user_visible_hint(false)?;
        }
        if let Some(fragment) = fragment {
            fragment.set_menu_visibility(true)?;
            fragment.set_user_visible_hint(true)?;
        }
        self.adapter.primary = fragment.cloned();

        self.selected_index = Some(position);
        if self.item(position).is_some() {
            self.load_unload_tab_items(position);
        }
        Ok(())
    }

    /// Commit the operations batched since [`start_update`](Self::start_update)
    pub fn finish_update(&mut self) -> Result<()> {
        if let Some(transaction) = self.adapter.transaction.take() {
            transaction.commit_now_allowing_state_loss()?;
        }
        Ok(())
    }

    /// Commit pending operations before the platform saves its state
    ///
    /// No pager state is saved; pages are recreated from the items.
    pub fn save_state(&mut self) -> Result<()> {
        self.finish_update()
    }

    pub fn adapter(&self) -> &PagerAdapter<M> {
        &self.adapter
    }

    fn current_transaction(&mut self) -> Result<&mut M::Transaction> {
        let transaction = match self.adapter.transaction.take() {
            Some(transaction) => transaction,
            None => self.manager().begin_transaction()?,
        };
        Ok(self.adapter.transaction.insert(transaction))
    }
}
