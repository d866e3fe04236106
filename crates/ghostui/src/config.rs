//! Application configuration
//!
//! One TOML document configures both providers:
//!
//! ```toml
//! [theme]
//! default_theme = "blood"
//!
//! [cursor]
//! intensity = 1.4
//! max_waves = 3
//! ```

use anyhow::{Context, Result};
use ghostui_cursor::CursorEffectConfig;
use ghostui_theme::ThemeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a mounted [`GhostRoot`](crate::GhostRoot)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    pub theme: ThemeConfig,
    pub cursor: CursorEffectConfig,
}

impl GhostConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("invalid GhostUI configuration")
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostui_cursor::{CursorTheme, CursorThemeMode};
    use ghostui_theme::Theme;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(GhostConfig::from_toml_str("").unwrap(), GhostConfig::default());
    }

    #[test]
    fn test_sections_parse() {
        let config = GhostConfig::from_toml_str(
            r#"
            [theme]
            default_theme = "blood"
            storage_key = "crypt"

            [cursor]
            theme = "void"
            max_waves = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.theme.default_theme, Theme::Blood);
        assert_eq!(config.theme.storage_key, "crypt");
        let cursor = config.cursor.resolve();
        assert_eq!(cursor.theme, CursorThemeMode::Fixed(CursorTheme::Void));
        assert_eq!(cursor.max_waves, 2);
    }

    #[test]
    fn test_error_carries_context() {
        let err = GhostConfig::from_toml_str("[theme]\ndefault_theme = \"neon\"").unwrap_err();
        assert!(err.to_string().contains("invalid GhostUI configuration"));
    }

    #[test]
    fn test_missing_file() {
        let err = GhostConfig::load("/nonexistent/ghostui.toml").unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
