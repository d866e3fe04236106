//! Theme provider configuration

use crate::error::{Result, ThemeError};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "ghostui-theme";

/// Provider configuration
///
/// ```toml
/// default_theme = "blood"
/// storage_key = "my-app-theme"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme used when storage holds no valid value
    pub default_theme: Theme,
    /// Durable storage key the active theme is persisted under
    pub storage_key: String,
}

impl ThemeConfig {
    pub fn new(default_theme: Theme) -> Self {
        Self {
            default_theme,
            ..Self::default()
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Parse from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| ThemeError::Config(e.to_string()))
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ThemeConfig::from_toml_str("default_theme = \"blood\"").unwrap();
        assert_eq!(config.default_theme, Theme::Blood);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_invalid_theme_in_toml_is_an_error() {
        let err = ThemeConfig::from_toml_str("default_theme = \"dark\"").unwrap_err();
        assert!(matches!(err, ThemeError::Config(_)));
    }
}
