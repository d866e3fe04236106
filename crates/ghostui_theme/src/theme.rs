//! The UI theme selector

use crate::error::ThemeError;
use crate::tokens::Palette;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Global palette selector for UI components
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Cold violet ghost palette
    #[default]
    Spectral,
    /// Deep crimson palette
    Blood,
}

impl Theme {
    /// Stable id, also the persisted storage value
    pub fn id(self) -> &'static str {
        match self {
            Self::Spectral => "spectral",
            Self::Blood => "blood",
        }
    }

    /// Parse a persisted id. Anything but the two literals is `None`.
    pub fn from_id(id: &str) -> Option<Theme> {
        match id {
            "spectral" => Some(Self::Spectral),
            "blood" => Some(Self::Blood),
            _ => None,
        }
    }

    /// The other variant
    pub fn toggle(self) -> Theme {
        match self {
            Self::Spectral => Self::Blood,
            Self::Blood => Self::Spectral,
        }
    }

    pub fn all() -> &'static [Theme] {
        const THEMES: [Theme; 2] = [Theme::Spectral, Theme::Blood];
        &THEMES
    }

    /// Palette for this theme
    pub fn palette(self) -> Palette {
        match self {
            Self::Spectral => Palette::spectral(),
            Self::Blood => Palette::blood(),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::from_id(s).ok_or_else(|| ThemeError::InvalidTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_involution() {
        for theme in Theme::all() {
            assert_eq!(theme.toggle().toggle(), *theme);
            assert_ne!(theme.toggle(), *theme);
        }
    }

    #[test]
    fn test_from_id_rejects_unknown_values() {
        assert_eq!(Theme::from_id("blood"), Some(Theme::Blood));
        assert_eq!(Theme::from_id("Blood"), None);
        assert_eq!(Theme::from_id(""), None);
        assert!("dark".parse::<Theme>().is_err());
    }

    #[test]
    fn test_serde_uses_ids() {
        assert_eq!(serde_json::to_string(&Theme::Blood).unwrap(), "\"blood\"");
        let parsed: Theme = serde_json::from_str("\"spectral\"").unwrap();
        assert_eq!(parsed, Theme::Spectral);
    }
}
