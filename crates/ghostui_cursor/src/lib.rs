//! GhostUI Cursor Effects
//!
//! Tracks the pointer and a directory of elements that opted into cursor
//! effects.
//!
//! # Overview
//!
//! - **Provider**: listens to host pointer events, coalesces moves with a
//!   trailing-edge throttle and keeps [`CursorState`] current
//! - **Registry**: elements register with an id, a weak node reference and
//!   [`ElementOptions`]; proximity and hover are recomputed on every applied
//!   sample
//! - **Zones**: the cursor theme follows the pointer across viewport zones
//! - **Waves**: presses spawn capped, self-expiring click waves
//! - **Compose**: per-element glow and attraction derived from the state
//!
//! # Example
//!
//! ```rust
//! use ghostui_core::{Event, HostContext, Rect, Size};
//! use ghostui_cursor::{CursorEffectConfig, CursorEffectProvider, ElementOptions, LayoutBox};
//!
//! let host = HostContext::builder().build();
//! let config = CursorEffectConfig::new().throttle_ms(0);
//! let cursor = CursorEffectProvider::mount(&host, &config, Size::new(800.0, 600.0));
//!
//! let card = LayoutBox::new(Rect::new(100.0, 100.0, 200.0, 120.0));
//! cursor.register_element("card", &card, ElementOptions::default());
//!
//! host.dispatch(&Event::pointer_move(150.0, 150.0, 0));
//! let state = cursor.state();
//! assert!(state.element(&"card".into()).unwrap().is_hovered);
//! ```
//!
//! On touch-primary hosts the provider is inert unless `disable_on_mobile`
//! is turned off.

pub mod compose;
pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod provider;
pub mod state;
pub mod theme;
pub mod throttle;
pub mod velocity;
pub mod waves;
pub mod zones;

pub use compose::{compose_effect, wave_pulse, ElementEffect};
pub use config::{
    CursorEffectConfig, EffectOverrides, EnabledEffects, ResolvedCursorConfig, DEFAULT_MAX_WAVES,
    DEFAULT_PROXIMITY_RADIUS, DEFAULT_THROTTLE_MS,
};
pub use context::{CursorContext, CursorContextValue};
pub use element::{
    EffectKind, ElementId, ElementNode, ElementOptions, ElementState, LayoutBox, RegisteredElement,
};
pub use error::{CursorError, MissingProviderError, Result};
pub use provider::{CursorEffectProvider, CursorListener, CursorSubscriptionId};
pub use state::CursorState;
pub use theme::{CursorTheme, CursorThemeMode};
pub use throttle::Throttle;
pub use velocity::{Velocity, VelocityTracker, FRAME_MS};
pub use waves::{WaveQueue, WaveRecord};
pub use zones::{Zone, ZoneAxis, ZoneLayout};
