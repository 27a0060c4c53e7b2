//! Tab host configuration

use serde::Deserialize;

use crate::error::Result;

/// Pager settings of a tab host
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TabHostConfig {
    /// Items kept loaded on each side of the selected one
    pub offscreen_tab_limit: usize,
    /// Whether the pager follows swipe gestures
    pub swipe_enabled: bool,
}

impl Default for TabHostConfig {
    fn default() -> Self {
        Self {
            offscreen_tab_limit: 1,
            swipe_enabled: true,
        }
    }
}

impl TabHostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn offscreen_tab_limit(mut self, limit: usize) -> Self {
        self.offscreen_tab_limit = limit;
        self
    }

    pub fn swipe_enabled(mut self, enabled: bool) -> Self {
        self.swipe_enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TabHostConfig::default();
        assert_eq!(config.offscreen_tab_limit, 1);
        assert!(config.swipe_enabled);
    }

    #[test]
    fn test_from_toml() {
        let config = TabHostConfig::from_toml_str("offscreen_tab_limit = 3").unwrap();
        assert_eq!(config.offscreen_tab_limit, 3);
        assert!(config.swipe_enabled);
        assert!(TabHostConfig::from_toml_str("swipe_enabled = \"no\"").is_err());
    }
}
