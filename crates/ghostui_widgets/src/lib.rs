//! GhostUI Widget Library
//!
//! Small building blocks shared by GhostUI components: theme-aware palette
//! lookup that works without a provider, tooltip handler chaining, and
//! skeleton placeholders derived from typed content trees.

pub mod palette;
pub mod skeleton;
pub mod tooltip;

pub use palette::{resolve_color, resolve_palette};
pub use skeleton::{RenderNode, RenderVisitor, SkeletonBuilder, SkeletonNode, StackDirection};
pub use tooltip::{EventHandlers, Handler, Tooltip, TooltipSide};
