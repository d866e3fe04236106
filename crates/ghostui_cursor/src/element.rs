//! Registered elements
//!
//! The registry never owns the nodes it tracks: it keeps a [`Weak`] reference
//! to an [`ElementNode`] and the bounds measured at registration (or on an
//! explicit refresh). Bounds can go stale between layout changes; proximity
//! is computed against the last measurement.

use ghostui_core::{Point, Rect};
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock, Weak};

/// Caller-chosen element id, unique among registered elements
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A measurable node in the host's render tree
pub trait ElementNode: Send + Sync {
    /// Current bounding rectangle in viewport coordinates, `None` if detached
    fn bounding_rect(&self) -> Option<Rect>;
}

/// A node whose bounds are set by the layout pass
#[derive(Debug, Default)]
pub struct LayoutBox {
    rect: RwLock<Option<Rect>>,
}

impl LayoutBox {
    pub fn new(rect: Rect) -> Arc<Self> {
        Arc::new(Self {
            rect: RwLock::new(Some(rect)),
        })
    }

    pub fn set_rect(&self, rect: Rect) {
        *self.rect.write().unwrap_or_else(|e| e.into_inner()) = Some(rect);
    }

    /// Mark as removed from the tree
    pub fn detach(&self) {
        *self.rect.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl ElementNode for LayoutBox {
    fn bounding_rect(&self) -> Option<Rect> {
        *self.rect.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// What the element does when the pointer is near
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EffectKind {
    /// Glows brighter as the pointer approaches
    #[default]
    Glow,
    /// Leans towards the pointer
    Attract,
    /// Leans away from the pointer
    Repel,
    /// Lights up as click waves pass over it
    WaveTarget,
}

/// Per-element capability configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ElementOptions {
    pub effect: EffectKind,
    /// Multiplier on top of the global intensity, 1.0 when unset
    pub intensity: Option<f32>,
    /// Overrides the configured proximity radius
    pub proximity_radius: Option<f32>,
    /// Maximum attraction/repulsion offset in pixels
    pub attraction_strength: f32,
}

impl ElementOptions {
    pub fn new(effect: EffectKind) -> Self {
        Self {
            effect,
            ..Self::default()
        }
    }

    pub fn intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn proximity_radius(mut self, radius: f32) -> Self {
        self.proximity_radius = Some(radius);
        self
    }

    pub fn attraction_strength(mut self, strength: f32) -> Self {
        self.attraction_strength = strength;
        self
    }
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            effect: EffectKind::Glow,
            intensity: None,
            proximity_radius: None,
            attraction_strength: 12.0,
        }
    }
}

/// Pointer relationship of a registered element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementState {
    Idle,
    InProximity,
    Hovered,
}

/// One element opted into cursor effects
#[derive(Clone, Debug)]
pub struct RegisteredElement {
    pub id: ElementId,
    node: Weak<dyn ElementNode>,
    pub options: ElementOptions,
    /// Last measured bounds
    pub bounds: Rect,
    /// Pointer to nearest point of `bounds`; infinite before the first sample
    pub distance: f32,
    pub is_in_proximity: bool,
    pub is_hovered: bool,
    /// Effective radius: the element's override or the configured default
    pub proximity_radius: f32,
}

impl RegisteredElement {
    pub(crate) fn new(
        id: ElementId,
        node: Weak<dyn ElementNode>,
        options: ElementOptions,
        default_radius: f32,
    ) -> Self {
        let proximity_radius = options
            .proximity_radius
            .filter(|r| r.is_finite() && *r >= 0.0)
            .unwrap_or(default_radius);
        let mut element = Self {
            id,
            node,
            options,
            bounds: Rect::ZERO,
            distance: f32::INFINITY,
            is_in_proximity: false,
            is_hovered: false,
            proximity_radius,
        };
        element.measure();
        element
    }

    /// The tracked node, if it is still alive
    pub fn node(&self) -> Option<Arc<dyn ElementNode>> {
        self.node.upgrade()
    }

    pub fn state(&self) -> ElementState {
        if self.is_hovered {
            ElementState::Hovered
        } else if self.is_in_proximity {
            ElementState::InProximity
        } else {
            ElementState::Idle
        }
    }

    /// Re-read bounds from the node. Keeps the last bounds and returns
    /// `false` when the node is gone or detached.
    pub(crate) fn measure(&mut self) -> bool {
        match self.node.upgrade().and_then(|node| node.bounding_rect()) {
            Some(rect) => {
                self.bounds = rect;
                true
            }
            None => false,
        }
    }

    /// Recompute distance and flags for a pointer position
    pub(crate) fn update(&mut self, pointer: Option<Point>) {
        match pointer {
            Some(point) => {
                self.distance = self.bounds.distance_to(point);
                self.is_hovered = self.bounds.contains(point);
                self.is_in_proximity = self.is_hovered || self.distance <= self.proximity_radius;
            }
            None => {
                self.distance = f32::INFINITY;
                self.is_hovered = false;
                self.is_in_proximity = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(rect: Rect, radius: Option<f32>) -> (Arc<LayoutBox>, RegisteredElement) {
        let node = LayoutBox::new(rect);
        let weak: Weak<dyn ElementNode> = Arc::downgrade(&node) as Weak<dyn ElementNode>;
        let mut options = ElementOptions::default();
        options.proximity_radius = radius;
        let element = RegisteredElement::new("e".into(), weak, options, 100.0);
        (node, element)
    }

    #[test]
    fn test_proximity_without_hover() {
        let (_node, mut el) = element(Rect::new(0.0, 0.0, 10.0, 10.0), Some(100.0));
        el.update(Some(Point::new(105.0, 5.0)));
        assert!((el.distance - 95.0).abs() < 1e-4);
        assert!(el.is_in_proximity);
        assert!(!el.is_hovered);
        assert_eq!(el.state(), ElementState::InProximity);
    }

    #[test]
    fn test_hover_implies_proximity_even_with_zero_radius() {
        let (_node, mut el) = element(Rect::new(0.0, 0.0, 10.0, 10.0), Some(0.0));
        el.update(Some(Point::new(5.0, 5.0)));
        assert!(el.is_hovered);
        assert!(el.is_in_proximity);
        assert_eq!(el.state(), ElementState::Hovered);
    }

    #[test]
    fn test_dropped_node_keeps_last_bounds() {
        let (node, mut el) = element(Rect::new(1.0, 2.0, 3.0, 4.0), None);
        drop(node);
        assert!(!el.measure());
        assert_eq!(el.bounds, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert!(el.node().is_none());
    }

    #[test]
    fn test_default_radius_applies() {
        let (_node, el) = element(Rect::ZERO, None);
        assert_eq!(el.proximity_radius, 100.0);
    }
}
