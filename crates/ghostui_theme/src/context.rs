//! Theme context handle
//!
//! Components receive a [`ThemeContext`] from their parent instead of reaching
//! for a global. It offers two access modes over the same provider:
//!
//! - [`ThemeContext::use_theme`] fails fast with [`MissingProviderError`]
//! - [`ThemeContext::use_theme_optional`] returns `None`, letting library
//!   components fall back to [`Theme::default`]

use crate::error::MissingProviderError;
use crate::provider::ThemeProvider;
use crate::theme::Theme;
use crate::tokens::Palette;
use std::sync::Arc;

const MISSING: MissingProviderError = MissingProviderError::new("ThemeContext", "ThemeProvider");

/// Context handle passed down the component tree
#[derive(Clone, Default)]
pub struct ThemeContext {
    provider: Option<Arc<ThemeProvider>>,
}

impl ThemeContext {
    /// Context with no provider above it
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn provided(provider: Arc<ThemeProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Required accessor
    pub fn use_theme(&self) -> Result<ThemeContextValue, MissingProviderError> {
        self.use_theme_optional().ok_or(MISSING)
    }

    /// Optional accessor; never fails
    pub fn use_theme_optional(&self) -> Option<ThemeContextValue> {
        self.provider.as_ref().map(|provider| ThemeContextValue {
            provider: Arc::clone(provider),
        })
    }

    /// Active theme, or the default theme without a provider
    pub fn theme_or_default(&self) -> Theme {
        self.provider
            .as_ref()
            .map(|p| p.theme())
            .unwrap_or_default()
    }
}

/// The `theme` / `set_theme` / `toggle_theme` bundle exposed to consumers
#[derive(Clone)]
pub struct ThemeContextValue {
    provider: Arc<ThemeProvider>,
}

impl ThemeContextValue {
    pub fn theme(&self) -> Theme {
        self.provider.theme()
    }

    pub fn palette(&self) -> Palette {
        self.provider.palette()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.provider.set_theme(theme);
    }

    pub fn toggle_theme(&self) -> Theme {
        self.provider.toggle_theme()
    }

    pub fn provider(&self) -> &Arc<ThemeProvider> {
        &self.provider
    }
}

impl std::fmt::Debug for ThemeContextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContextValue")
            .field("theme", &self.theme())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use ghostui_core::HostContext;

    #[test]
    fn test_required_accessor_fails_without_provider() {
        let ctx = ThemeContext::empty();
        let err = ctx.use_theme().unwrap_err();
        assert_eq!(err.provider, "ThemeProvider");
    }

    #[test]
    fn test_optional_accessor_degrades() {
        let ctx = ThemeContext::empty();
        assert!(ctx.use_theme_optional().is_none());
        assert_eq!(ctx.theme_or_default(), Theme::Spectral);
    }

    #[test]
    fn test_value_reads_live_theme() {
        let provider = ThemeProvider::mount(&HostContext::detached(), ThemeConfig::default());
        let ctx = ThemeContext::provided(provider);
        let value = ctx.use_theme().unwrap();

        value.set_theme(Theme::Blood);
        assert_eq!(value.theme(), Theme::Blood);
        assert_eq!(ctx.theme_or_default(), Theme::Blood);
    }
}
