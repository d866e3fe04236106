//! GhostUI Core
//!
//! This crate provides the host-facing primitives shared by the GhostUI
//! services:
//!
//! - **Geometry**: points, sizes and rectangles with distance queries
//! - **Colors**: RGBA colors with hex and channel formatting for style variables
//! - **Events**: global pointer/storage events and listener registration
//! - **Host**: durable storage, document style scope and input capabilities
//!
//! Services never reach for ambient globals. A [`HostContext`] describes one
//! browsing context and is handed to each provider when it mounts.
//!
//! # Example
//!
//! ```rust
//! use ghostui_core::{HostContext, MemoryStorage};
//!
//! let origin = MemoryStorage::new();
//! let host = HostContext::builder().memory_storage(&origin).build();
//!
//! assert!(host.storage().is_some());
//! assert_eq!(host.listeners().listener_count(), 0);
//! ```

pub mod color;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod storage;
pub mod style;

pub use color::Color;
pub use error::{HostError, MissingProviderError, StorageError};
pub use events::{event_types, Event, EventData, EventType, GlobalListeners, ListenerId};
pub use geometry::{Point, Rect, Size, Vec2};
pub use host::{HostContext, HostContextBuilder, InputCapabilities};
pub use storage::{MemoryStorage, Storage, StorageArea};
pub use style::StyleScope;
