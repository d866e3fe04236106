//! Cursor-effect color themes
//!
//! Independent of the UI theme: the cursor theme is derived from where the
//! pointer is on screen, not from what the user picked.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Position-derived color selection for pointer-following effects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorTheme {
    #[default]
    Spectral,
    Ectoplasm,
    Blood,
    Void,
}

impl CursorTheme {
    pub fn id(self) -> &'static str {
        match self {
            Self::Spectral => "spectral",
            Self::Ectoplasm => "ectoplasm",
            Self::Blood => "blood",
            Self::Void => "void",
        }
    }

    pub fn from_id(id: &str) -> Option<CursorTheme> {
        match id {
            "spectral" => Some(Self::Spectral),
            "ectoplasm" => Some(Self::Ectoplasm),
            "blood" => Some(Self::Blood),
            "void" => Some(Self::Void),
            _ => None,
        }
    }
}

impl Display for CursorTheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// How the provider picks the cursor theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CursorThemeMode {
    /// Resolve from the zone layout on every pointer update
    #[default]
    Auto,
    /// Always use one theme
    Fixed(CursorTheme),
}

impl TryFrom<String> for CursorThemeMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "auto" {
            return Ok(Self::Auto);
        }
        CursorTheme::from_id(&value)
            .map(Self::Fixed)
            .ok_or_else(|| format!("unknown cursor theme {value:?}"))
    }
}

impl From<CursorThemeMode> for String {
    fn from(mode: CursorThemeMode) -> Self {
        match mode {
            CursorThemeMode::Auto => "auto".to_string(),
            CursorThemeMode::Fixed(theme) => theme.id().to_string(),
        }
    }
}
