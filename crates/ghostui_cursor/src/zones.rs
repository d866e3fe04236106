//! Theme zones
//!
//! The viewport is partitioned into ordered zones. The pointer position is
//! normalised to `0.0..=1.0` along the layout's axis and the first zone whose
//! threshold is not below that value supplies the cursor theme.

use crate::theme::CursorTheme;
use ghostui_core::{Point, Size};
use serde::{Deserialize, Serialize};

/// Partitioning axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneAxis {
    /// Bands stacked top to bottom (`y / height`)
    #[default]
    Vertical,
    /// Bands side by side, left to right (`x / width`)
    Horizontal,
    /// Rings from the viewport center (distance over half the diagonal)
    Radial,
}

/// One zone: applies while the normalised position is `<= threshold`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub threshold: f32,
    pub theme: CursorTheme,
}

impl Zone {
    pub const fn new(threshold: f32, theme: CursorTheme) -> Self {
        Self { threshold, theme }
    }
}

/// Ordered zone list with its axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneLayout {
    #[serde(default)]
    pub axis: ZoneAxis,
    pub zones: Vec<Zone>,
}

impl ZoneLayout {
    pub fn new(axis: ZoneAxis, zones: Vec<Zone>) -> Self {
        Self { axis, zones }
    }

    /// Normalised position of `point` along the axis, clamped to `0.0..=1.0`
    pub fn normalize(&self, point: Point, viewport: Size) -> f32 {
        if viewport.is_empty() {
            return 0.0;
        }
        let value = match self.axis {
            ZoneAxis::Vertical => point.y / viewport.height,
            ZoneAxis::Horizontal => point.x / viewport.width,
            ZoneAxis::Radial => {
                let center = viewport.to_rect().center();
                let half_diagonal = Point::ZERO.distance_to(center);
                point.distance_to(center) / half_diagonal
            }
        };
        value.clamp(0.0, 1.0)
    }

    /// Theme for a pointer position.
    ///
    /// Falls back to the last zone when no threshold is satisfied, and to
    /// [`CursorTheme::default`] for an empty layout.
    pub fn resolve(&self, point: Point, viewport: Size) -> CursorTheme {
        let value = self.normalize(point, viewport);
        self.zones
            .iter()
            .find(|zone| value <= zone.threshold)
            .or_else(|| self.zones.last())
            .map(|zone| zone.theme)
            .unwrap_or_default()
    }
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            axis: ZoneAxis::Vertical,
            zones: vec![
                Zone::new(1.0 / 3.0, CursorTheme::Spectral),
                Zone::new(2.0 / 3.0, CursorTheme::Ectoplasm),
                Zone::new(1.0, CursorTheme::Blood),
            ],
        }
    }
}
