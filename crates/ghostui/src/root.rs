//! Application root
//!
//! Mounts the theme provider and the cursor effect provider on one host
//! context and hands out the context handles components consume.

use crate::config::GhostConfig;
use ghostui_core::{HostContext, Size};
use ghostui_cursor::{CursorContext, CursorEffectProvider};
use ghostui_theme::{ThemeContext, ThemeProvider};
use std::sync::Arc;

/// Both GhostUI providers, mounted together
pub struct GhostRoot {
    host: HostContext,
    theme: Arc<ThemeProvider>,
    cursor: Arc<CursorEffectProvider>,
}

impl GhostRoot {
    pub fn mount(host: &HostContext, config: &GhostConfig, viewport: Size) -> Self {
        let theme = ThemeProvider::mount(host, config.theme.clone());
        let cursor = CursorEffectProvider::mount(host, &config.cursor, viewport);
        tracing::debug!(
            "GhostRoot::mount - theme {}, cursor {}",
            theme.theme(),
            if cursor.is_inert() { "inert" } else { "tracking" }
        );
        Self {
            host: host.clone(),
            theme,
            cursor,
        }
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn theme(&self) -> &Arc<ThemeProvider> {
        &self.theme
    }

    pub fn cursor(&self) -> &Arc<CursorEffectProvider> {
        &self.cursor
    }

    pub fn theme_context(&self) -> ThemeContext {
        ThemeContext::provided(Arc::clone(&self.theme))
    }

    pub fn cursor_context(&self) -> CursorContext {
        CursorContext::provided(Arc::clone(&self.cursor))
    }

    /// Drive time-based state; returns whether another frame is needed
    pub fn tick(&self, now: u64) -> bool {
        let animating = self.cursor.tick(now);
        let repaint = self.theme.needs_repaint();
        if repaint {
            self.theme.clear_repaint();
        }
        animating || repaint
    }

    /// Detach both providers from the host
    pub fn unmount(&self) {
        self.theme.unmount();
        self.cursor.unmount();
        tracing::debug!("GhostRoot::unmount");
    }
}

impl std::fmt::Debug for GhostRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GhostRoot")
            .field("theme", &self.theme.theme())
            .field("cursor_inert", &self.cursor.is_inert())
            .finish_non_exhaustive()
    }
}
