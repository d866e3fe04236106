//! Cursor effect configuration
//!
//! Callers supply a partial [`CursorEffectConfig`]; the provider resolves it
//! once at mount time onto the documented defaults. Downstream code only ever
//! sees the [`ResolvedCursorConfig`], where every field is concrete.

use crate::error::{CursorError, Result};
use crate::theme::CursorThemeMode;
use crate::zones::ZoneLayout;
use serde::{Deserialize, Serialize};

/// Proximity radius used when neither the config nor the element sets one
pub const DEFAULT_PROXIMITY_RADIUS: f32 = 100.0;
/// Maximum simultaneous click waves
pub const DEFAULT_MAX_WAVES: usize = 5;
/// Pointer-move coalescing window (~60 updates per second)
pub const DEFAULT_THROTTLE_MS: u64 = 16;

/// Partial per-effect enable flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectOverrides {
    pub glow: Option<bool>,
    pub attraction: Option<bool>,
    pub waves: Option<bool>,
    pub trail: Option<bool>,
}

/// Resolved per-effect enable flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnabledEffects {
    pub glow: bool,
    pub attraction: bool,
    pub waves: bool,
    pub trail: bool,
}

impl Default for EnabledEffects {
    fn default() -> Self {
        Self {
            glow: true,
            attraction: true,
            waves: true,
            trail: true,
        }
    }
}

impl EffectOverrides {
    fn resolve(&self) -> EnabledEffects {
        let defaults = EnabledEffects::default();
        EnabledEffects {
            glow: self.glow.unwrap_or(defaults.glow),
            attraction: self.attraction.unwrap_or(defaults.attraction),
            waves: self.waves.unwrap_or(defaults.waves),
            trail: self.trail.unwrap_or(defaults.trail),
        }
    }
}

/// Caller-supplied overrides; every field is optional
///
/// ```toml
/// theme = "auto"
/// intensity = 1.5
/// proximity_radius = 140.0
/// max_waves = 3
///
/// [effects]
/// trail = false
///
/// [zones]
/// axis = "horizontal"
/// zones = [
///     { threshold = 0.5, theme = "void" },
///     { threshold = 1.0, theme = "blood" },
/// ]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorEffectConfig {
    pub theme: Option<CursorThemeMode>,
    pub intensity: Option<f32>,
    pub effects: EffectOverrides,
    pub proximity_radius: Option<f32>,
    pub max_waves: Option<usize>,
    pub disable_on_mobile: Option<bool>,
    pub throttle_ms: Option<u64>,
    pub click_window_ms: Option<u64>,
    pub wave_lifetime_ms: Option<u64>,
    pub wave_max_radius: Option<f32>,
    pub movement_epsilon: Option<f32>,
    pub idle_after_ms: Option<u64>,
    pub trail_length: Option<usize>,
    pub zones: Option<ZoneLayout>,
}

impl CursorEffectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| CursorError::Config(e.to_string()))
    }

    pub fn theme(mut self, mode: CursorThemeMode) -> Self {
        self.theme = Some(mode);
        self
    }

    pub fn intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn proximity_radius(mut self, radius: f32) -> Self {
        self.proximity_radius = Some(radius);
        self
    }

    pub fn max_waves(mut self, max: usize) -> Self {
        self.max_waves = Some(max);
        self
    }

    pub fn disable_on_mobile(mut self, disable: bool) -> Self {
        self.disable_on_mobile = Some(disable);
        self
    }

    pub fn throttle_ms(mut self, ms: u64) -> Self {
        self.throttle_ms = Some(ms);
        self
    }

    pub fn wave_lifetime_ms(mut self, ms: u64) -> Self {
        self.wave_lifetime_ms = Some(ms);
        self
    }

    pub fn zones(mut self, zones: ZoneLayout) -> Self {
        self.zones = Some(zones);
        self
    }

    pub fn effects(mut self, effects: EffectOverrides) -> Self {
        self.effects = effects;
        self
    }

    /// Merge onto the defaults
    pub fn resolve(&self) -> ResolvedCursorConfig {
        let defaults = ResolvedCursorConfig::default();
        ResolvedCursorConfig {
            theme: self.theme.unwrap_or(defaults.theme),
            intensity: self
                .intensity
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 2.0))
                .unwrap_or(defaults.intensity),
            effects: self.effects.resolve(),
            proximity_radius: self
                .proximity_radius
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.proximity_radius),
            max_waves: self.max_waves.unwrap_or(defaults.max_waves).max(1),
            disable_on_mobile: self.disable_on_mobile.unwrap_or(defaults.disable_on_mobile),
            throttle_ms: self.throttle_ms.unwrap_or(defaults.throttle_ms),
            click_window_ms: self.click_window_ms.unwrap_or(defaults.click_window_ms),
            wave_lifetime_ms: self.wave_lifetime_ms.unwrap_or(defaults.wave_lifetime_ms).max(1),
            wave_max_radius: self.wave_max_radius.unwrap_or(defaults.wave_max_radius),
            movement_epsilon: self.movement_epsilon.unwrap_or(defaults.movement_epsilon),
            idle_after_ms: self.idle_after_ms.unwrap_or(defaults.idle_after_ms),
            trail_length: self.trail_length.unwrap_or(defaults.trail_length),
            zones: self.zones.clone().unwrap_or(defaults.zones),
        }
    }
}

/// Fully resolved configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedCursorConfig {
    pub theme: CursorThemeMode,
    /// Global effect multiplier, `0.0..=2.0`
    pub intensity: f32,
    pub effects: EnabledEffects,
    pub proximity_radius: f32,
    /// At least 1
    pub max_waves: usize,
    pub disable_on_mobile: bool,
    /// Zero disables coalescing
    pub throttle_ms: u64,
    /// How long `is_clicking` stays set after a press
    pub click_window_ms: u64,
    pub wave_lifetime_ms: u64,
    pub wave_max_radius: f32,
    /// Velocity magnitude at or below which the pointer counts as stationary
    pub movement_epsilon: f32,
    /// Without a new sample for this long the pointer counts as stationary
    pub idle_after_ms: u64,
    /// Positions kept for the trail effect
    pub trail_length: usize,
    pub zones: ZoneLayout,
}

impl Default for ResolvedCursorConfig {
    fn default() -> Self {
        Self {
            theme: CursorThemeMode::Auto,
            intensity: 1.0,
            effects: EnabledEffects::default(),
            proximity_radius: DEFAULT_PROXIMITY_RADIUS,
            max_waves: DEFAULT_MAX_WAVES,
            disable_on_mobile: true,
            throttle_ms: DEFAULT_THROTTLE_MS,
            click_window_ms: 150,
            wave_lifetime_ms: 1000,
            wave_max_radius: 150.0,
            movement_epsilon: 0.5,
            idle_after_ms: 100,
            trail_length: 12,
            zones: ZoneLayout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::CursorTheme;
    use crate::zones::ZoneAxis;

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        assert_eq!(CursorEffectConfig::new().resolve(), ResolvedCursorConfig::default());
    }

    #[test]
    fn test_overrides_win_and_are_sanitised() {
        let resolved = CursorEffectConfig::new()
            .intensity(9.0)
            .max_waves(0)
            .proximity_radius(-3.0)
            .theme(CursorThemeMode::Fixed(CursorTheme::Void))
            .resolve();

        assert_eq!(resolved.intensity, 2.0);
        assert_eq!(resolved.max_waves, 1);
        assert_eq!(resolved.proximity_radius, DEFAULT_PROXIMITY_RADIUS);
        assert_eq!(resolved.theme, CursorThemeMode::Fixed(CursorTheme::Void));
    }

    #[test]
    fn test_partial_effect_flags() {
        let resolved = CursorEffectConfig::new()
            .effects(EffectOverrides {
                waves: Some(false),
                ..Default::default()
            })
            .resolve();
        assert!(!resolved.effects.waves);
        assert!(resolved.effects.glow);
    }

    #[test]
    fn test_from_toml() {
        let config = CursorEffectConfig::from_toml_str(
            r#"
            theme = "blood"
            max_waves = 3

            [effects]
            trail = false

            [zones]
            axis = "horizontal"
            zones = [{ threshold = 1.0, theme = "void" }]
            "#,
        )
        .unwrap();
        let resolved = config.resolve();

        assert_eq!(resolved.theme, CursorThemeMode::Fixed(CursorTheme::Blood));
        assert_eq!(resolved.max_waves, 3);
        assert!(!resolved.effects.trail);
        assert_eq!(resolved.zones.axis, ZoneAxis::Horizontal);
        assert_eq!(resolved.throttle_ms, DEFAULT_THROTTLE_MS);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = CursorEffectConfig::from_toml_str("max_waves = \"many\"").unwrap_err();
        assert!(matches!(err, CursorError::Config(_)));
    }
}
