//! Tab strip items and their native specs

/// Prefix of icons that live in the app's drawable resources
pub const RESOURCE_PREFIX: &str = "res://";

/// Looks up icon resources for tab strip items
pub trait ResourceResolver {
    /// Drawable resource id for `name`, `0` when missing
    fn drawable_id(&self, name: &str) -> i32;

    /// Whether an image can be loaded from a file or resource path
    fn image_exists(&self, source: &str) -> bool;
}

/// A tab in the tab strip
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabStripItem {
    pub title: String,
    pub icon_source: Option<String>,
}

impl TabStripItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon_source: None,
        }
    }

    pub fn icon(mut self, source: impl Into<String>) -> Self {
        self.icon_source = Some(source.into());
        self
    }
}

/// Resolved icon of a tab
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabIcon {
    /// Drawable resource id
    Resource(i32),
    /// Image loaded from a file or resource path
    Image(String),
}

/// What the native tab strip renders for one tab
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabItemSpec {
    pub title: String,
    pub icon: Option<TabIcon>,
}

/// Build the native spec for a strip item
///
/// Missing icons are logged and leave the spec without an icon.
pub fn create_tab_item_spec(item: &TabStripItem, resolver: &dyn ResourceResolver) -> TabItemSpec {
    let mut spec = TabItemSpec {
        title: item.title.clone(),
        icon: None,
    };

    let Some(source) = item.icon_source.as_deref() else {
        return spec;
    };

    if let Some(name) = source.strip_prefix(RESOURCE_PREFIX) {
        match resolver.drawable_id(name) {
            0 => tracing::debug!(target: "passage::tabs", "Could not load tab bar icon: {}", source),
            id => spec.icon = Some(TabIcon::Resource(id)),
        }
    } else if resolver.image_exists(source) {
        spec.icon = Some(TabIcon::Image(source.to_string()));
    } else {
        tracing::debug!(target: "passage::tabs", "Could not load tab bar icon: {}", source);
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Resources;

    impl ResourceResolver for Resources {
        fn drawable_id(&self, name: &str) -> i32 {
            if name == "home" {
                0x7f08_0001
            } else {
                0
            }
        }

        fn image_exists(&self, source: &str) -> bool {
            source.ends_with(".png")
        }
    }

    #[test]
    fn test_resource_icon() {
        let spec = create_tab_item_spec(&TabStripItem::new("Home").icon("res://home"), &Resources);
        assert_eq!(spec.title, "Home");
        assert_eq!(spec.icon, Some(TabIcon::Resource(0x7f08_0001)));
    }

    #[test]
    fn test_file_icon() {
        let spec = create_tab_item_spec(&TabStripItem::new("Maps").icon("~/maps.png"), &Resources);
        assert_eq!(spec.icon, Some(TabIcon::Image("~/maps.png".into())));
    }

    #[test]
    fn test_missing_icons_are_not_errors() {
        let missing_res = create_tab_item_spec(&TabStripItem::new("A").icon("res://nope"), &Resources);
        assert!(missing_res.icon.is_none());

        let missing_file = create_tab_item_spec(&TabStripItem::new("B").icon("~/nope.svg"), &Resources);
        assert!(missing_file.icon.is_none());

        let no_icon = create_tab_item_spec(&TabStripItem::new("C"), &Resources);
        assert!(no_icon.icon.is_none());
    }
}
