//! GhostUI Theme System
//!
//! Two-variant theming (`spectral` / `blood`) with persistence and
//! cross-context synchronisation.
//!
//! # Overview
//!
//! - **Theme**: the two-variant palette selector
//! - **Tokens**: semantic colors and their global style variables
//! - **Provider**: the mounted service owning the active theme
//! - **Context**: the handle components receive, with required and optional
//!   accessors
//!
//! # Quick Start
//!
//! ```rust
//! use ghostui_core::{HostContext, MemoryStorage};
//! use ghostui_theme::{Theme, ThemeConfig, ThemeContext, ThemeProvider};
//!
//! let origin = MemoryStorage::new();
//! let host = HostContext::builder().memory_storage(&origin).build();
//!
//! let provider = ThemeProvider::mount(&host, ThemeConfig::new(Theme::Spectral));
//! let ctx = ThemeContext::provided(provider);
//!
//! let theme = ctx.use_theme().expect("provider mounted");
//! theme.toggle_theme();
//! assert_eq!(theme.theme(), Theme::Blood);
//! assert_eq!(
//!     host.style().get_property("--ghost-accent").as_deref(),
//!     Some("#dc2626")
//! );
//! ```
//!
//! # Persistence
//!
//! The active theme is written under the configured storage key on every
//! explicit change. Storage is best effort: when it is missing or failing the
//! provider keeps working from memory. Values written by other contexts of
//! the same origin are picked up through the host's storage-change event and
//! applied without being written back.

pub mod config;
pub mod context;
pub mod error;
pub mod provider;
pub mod theme;
pub mod tokens;

pub use config::{ThemeConfig, DEFAULT_STORAGE_KEY};
pub use context::{ThemeContext, ThemeContextValue};
pub use error::{MissingProviderError, Result, ThemeError};
pub use provider::{SubscriptionId, ThemeListener, ThemeProvider};
pub use theme::Theme;
pub use tokens::*;
