//! Cursor tracking state

use crate::element::{ElementId, RegisteredElement};
use crate::theme::CursorTheme;
use crate::velocity::Velocity;
use ghostui_core::Point;
use rustc_hash::FxHashMap;

/// Snapshot of pointer tracking and the element directory
#[derive(Clone, Debug, Default)]
pub struct CursorState {
    /// Last applied pointer position
    pub position: Point,
    pub velocity: Velocity,
    /// Velocity magnitude above the movement epsilon
    pub is_moving: bool,
    /// Set for a short window after a press
    pub is_clicking: bool,
    /// Position-derived cursor-effect theme
    pub current_theme: CursorTheme,
    pub elements: FxHashMap<ElementId, RegisteredElement>,
}

impl CursorState {
    pub fn element(&self, id: &ElementId) -> Option<&RegisteredElement> {
        self.elements.get(id)
    }

    /// Elements currently within their proximity radius, sorted by distance
    pub fn elements_in_proximity(&self) -> Vec<&RegisteredElement> {
        let mut near: Vec<&RegisteredElement> = self
            .elements
            .values()
            .filter(|el| el.is_in_proximity)
            .collect();
        near.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        near
    }

    /// The hovered element closest to the front, if any.
    ///
    /// Without z-order information, ties are broken by smallest area.
    pub fn hovered(&self) -> Option<&RegisteredElement> {
        self.elements
            .values()
            .filter(|el| el.is_hovered)
            .min_by(|a, b| {
                let area_a = a.bounds.width() * a.bounds.height();
                let area_b = b.bounds.width() * b.bounds.height();
                area_a.total_cmp(&area_b)
            })
    }
}
