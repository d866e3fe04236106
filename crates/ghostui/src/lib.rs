//! GhostUI
//!
//! Spooky theming and cursor effects for UI trees.
//!
//! This crate mounts the theme provider ([`ghostui_theme`]) and the cursor
//! effect provider ([`ghostui_cursor`]) from a single [`GhostConfig`], and
//! re-exports the building blocks components need.
//!
//! # Example
//!
//! ```rust
//! use ghostui::prelude::*;
//!
//! let origin = MemoryStorage::new();
//! let host = HostContext::builder().memory_storage(&origin).build();
//!
//! let config = GhostConfig::from_toml_str("[theme]\ndefault_theme = \"blood\"").unwrap();
//! let root = GhostRoot::mount(&host, &config, Size::new(1280.0, 800.0));
//!
//! assert_eq!(root.theme_context().theme_or_default(), Theme::Blood);
//! assert!(root.cursor_context().use_cursor().is_ok());
//!
//! root.unmount();
//! assert_eq!(host.listeners().listener_count(), 0);
//! ```

pub mod config;
pub mod logging;
pub mod root;

pub use config::GhostConfig;
pub use root::GhostRoot;

pub use ghostui_core;
pub use ghostui_cursor;
pub use ghostui_theme;
pub use ghostui_widgets;

pub mod prelude {
    pub use crate::config::GhostConfig;
    pub use crate::root::GhostRoot;

    pub use ghostui_core::{Event, HostContext, InputCapabilities, MemoryStorage, Point, Rect, Size};
    pub use ghostui_cursor::{
        CursorContext, CursorEffectConfig, CursorEffectProvider, CursorTheme, CursorThemeMode,
        EffectKind, ElementId, ElementNode, ElementOptions, LayoutBox,
    };
    pub use ghostui_theme::{Palette, Theme, ThemeConfig, ThemeContext, ThemeProvider};
    pub use ghostui_widgets::{EventHandlers, RenderNode, SkeletonBuilder, Tooltip};
}
