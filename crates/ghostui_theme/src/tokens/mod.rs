//! Design tokens for theming
//!
//! GhostUI components only consume colors from the theme; spacing, radii and
//! motion stay with the components themselves.

mod color;

pub use color::*;
