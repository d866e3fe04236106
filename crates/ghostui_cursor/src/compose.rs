//! Per-element effect composition
//!
//! Turns registry state into the numbers a renderer needs: how strongly an
//! element glows, how far it leans, and which cursor theme tints it.

use crate::config::ResolvedCursorConfig;
use crate::element::{EffectKind, RegisteredElement};
use crate::state::CursorState;
use crate::theme::CursorTheme;
use crate::waves::WaveRecord;
use ghostui_core::Vec2;

/// Visual effect for one element at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementEffect {
    /// Glow strength, `0.0` when idle
    pub glow: f32,
    /// Translation towards (or away from) the pointer in pixels
    pub offset: Vec2,
    pub theme: CursorTheme,
}

impl ElementEffect {
    pub fn none(theme: CursorTheme) -> Self {
        Self {
            glow: 0.0,
            offset: Vec2::ZERO,
            theme,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.glow == 0.0 && self.offset == Vec2::ZERO
    }
}

/// Closeness in `0.0..=1.0`: 1 when hovered, linear falloff to 0 at the radius
fn proximity_factor(element: &RegisteredElement) -> f32 {
    if element.is_hovered {
        return 1.0;
    }
    if !element.is_in_proximity || element.proximity_radius <= 0.0 {
        return 0.0;
    }
    (1.0 - element.distance / element.proximity_radius).clamp(0.0, 1.0)
}

/// Compose the effect for one element from the current state
pub fn compose_effect(
    element: &RegisteredElement,
    state: &CursorState,
    config: &ResolvedCursorConfig,
) -> ElementEffect {
    let factor = proximity_factor(element);
    if factor == 0.0 {
        return ElementEffect::none(state.current_theme);
    }

    let intensity = config.intensity * element.options.intensity.unwrap_or(1.0).max(0.0);
    let glow = if config.effects.glow {
        factor * intensity
    } else {
        0.0
    };

    let offset = match element.options.effect {
        EffectKind::Attract | EffectKind::Repel if config.effects.attraction => {
            let towards = (state.position - element.bounds.center()).normalize();
            let magnitude = element.options.attraction_strength * factor * intensity;
            let sign = if element.options.effect == EffectKind::Repel {
                -1.0
            } else {
                1.0
            };
            towards.scale(magnitude * sign)
        }
        _ => Vec2::ZERO,
    };

    ElementEffect {
        glow,
        offset,
        theme: state.current_theme,
    }
}

/// Strongest opacity among live waves whose ring crosses the element's bounds.
///
/// Only `WaveTarget` elements react; everything else gets `0.0`.
pub fn wave_pulse(element: &RegisteredElement, waves: &[WaveRecord], now: u64) -> f32 {
    if element.options.effect != EffectKind::WaveTarget {
        return 0.0;
    }
    waves
        .iter()
        .filter(|wave| !wave.is_expired(now))
        .filter(|wave| {
            let radius = wave.radius(now);
            let near = element.bounds.distance_to(wave.origin);
            let far = farthest_corner(element, wave);
            near <= radius && radius <= far
        })
        .map(|wave| wave.opacity(now))
        .fold(0.0, f32::max)
}

fn farthest_corner(element: &RegisteredElement, wave: &WaveRecord) -> f32 {
    let b = element.bounds;
    let dx = (wave.origin.x - b.x()).abs().max((wave.origin.x - b.right()).abs());
    let dy = (wave.origin.y - b.y()).abs().max((wave.origin.y - b.bottom()).abs());
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementNode, ElementOptions, LayoutBox};
    use ghostui_core::{Point, Rect};
    use std::sync::{Arc, Weak};

    fn registered(options: ElementOptions, pointer: Point) -> (Arc<LayoutBox>, RegisteredElement) {
        let node = LayoutBox::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let weak: Weak<dyn ElementNode> = Arc::downgrade(&node) as Weak<dyn ElementNode>;
        let mut el = RegisteredElement::new("e".into(), weak, options, 100.0);
        el.update(Some(pointer));
        (node, el)
    }

    fn state_at(pointer: Point) -> CursorState {
        CursorState {
            position: pointer,
            ..CursorState::default()
        }
    }

    #[test]
    fn test_glow_falls_off_with_distance() {
        let config = ResolvedCursorConfig::default();
        let pointer = Point::new(60.0, 5.0);
        let (_n, el) = registered(ElementOptions::default(), pointer);
        let effect = compose_effect(&el, &state_at(pointer), &config);
        assert!((effect.glow - 0.5).abs() < 1e-4);
        assert_eq!(effect.offset, Vec2::ZERO);
    }

    #[test]
    fn test_hover_is_full_glow_scaled_by_intensity() {
        let mut config = ResolvedCursorConfig::default();
        config.intensity = 2.0;
        let pointer = Point::new(5.0, 5.0);
        let (_n, el) = registered(ElementOptions::default().intensity(0.5), pointer);
        let effect = compose_effect(&el, &state_at(pointer), &config);
        assert_eq!(effect.glow, 1.0);
    }

    #[test]
    fn test_outside_proximity_is_idle() {
        let config = ResolvedCursorConfig::default();
        let pointer = Point::new(500.0, 500.0);
        let (_n, el) = registered(ElementOptions::new(EffectKind::Attract), pointer);
        assert!(compose_effect(&el, &state_at(pointer), &config).is_idle());
    }

    #[test]
    fn test_attract_and_repel_directions() {
        let config = ResolvedCursorConfig::default();
        let pointer = Point::new(55.0, 5.0);

        let (_a, attract) = registered(ElementOptions::new(EffectKind::Attract), pointer);
        let toward = compose_effect(&attract, &state_at(pointer), &config).offset;
        assert!(toward.x > 0.0);
        assert!(toward.y.abs() < 1e-4);

        let (_r, repel) = registered(ElementOptions::new(EffectKind::Repel), pointer);
        let away = compose_effect(&repel, &state_at(pointer), &config).offset;
        assert!(away.x < 0.0);
        assert!((away.x + toward.x).abs() < 1e-4);
    }

    #[test]
    fn test_disabled_effects_zero_out() {
        let mut config = ResolvedCursorConfig::default();
        config.effects.glow = false;
        config.effects.attraction = false;
        let pointer = Point::new(5.0, 5.0);
        let (_n, el) = registered(ElementOptions::new(EffectKind::Attract), pointer);
        assert!(compose_effect(&el, &state_at(pointer), &config).is_idle());
    }

    #[test]
    fn test_wave_pulse_only_while_ring_crosses() {
        let pointer = Point::new(500.0, 500.0);
        let (_n, el) = registered(ElementOptions::new(EffectKind::WaveTarget), pointer);
        let wave = WaveRecord {
            id: 1,
            origin: Point::new(60.0, 5.0),
            spawned_at: 0,
            lifetime_ms: 1000,
            max_radius: 100.0,
            theme: CursorTheme::Spectral,
        };
        let waves = [wave];

        // radius 20 at 200ms: ring has not reached the box (50px away)
        assert_eq!(wave_pulse(&el, &waves, 200), 0.0);
        // radius 55 at 550ms: ring is over the box
        assert!((wave_pulse(&el, &waves, 550) - 0.45).abs() < 1e-4);
        // expired
        assert_eq!(wave_pulse(&el, &waves, 1000), 0.0);

        let (_g, glow) = registered(ElementOptions::default(), pointer);
        assert_eq!(wave_pulse(&glow, &waves, 550), 0.0);
    }
}
