//! Color tokens for theming

use ghostui_core::Color;

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    Background,
    BackgroundSecondary,
    Text,
    TextSecondary,
    Border,
    Accent,
}

impl ColorToken {
    pub fn all() -> &'static [ColorToken] {
        const TOKENS: [ColorToken; 6] = [
            ColorToken::Background,
            ColorToken::BackgroundSecondary,
            ColorToken::Text,
            ColorToken::TextSecondary,
            ColorToken::Border,
            ColorToken::Accent,
        ];
        &TOKENS
    }

    /// Global style variable carrying this token
    pub fn variable_name(self) -> &'static str {
        match self {
            Self::Background => "--ghost-bg",
            Self::BackgroundSecondary => "--ghost-bg-secondary",
            Self::Text => "--ghost-text",
            Self::TextSecondary => "--ghost-text-secondary",
            Self::Border => "--ghost-border",
            Self::Accent => "--ghost-accent",
        }
    }
}

/// Accent color as separate channels, for `rgba(var(--ghost-accent-rgb), a)`
pub const ACCENT_RGB_VARIABLE: &str = "--ghost-accent-rgb";

/// Complete set of semantic colors for one theme
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub background_secondary: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub accent: Color,
}

impl Palette {
    pub fn spectral() -> Self {
        Self {
            background: Color::from_hex(0x0B0A12),
            background_secondary: Color::from_hex(0x16132A),
            text: Color::from_hex(0xE9E4FF),
            text_secondary: Color::from_hex(0xA89FCC),
            border: Color::from_hex(0x2E2750),
            accent: Color::from_hex(0x8B5CF6),
        }
    }

    pub fn blood() -> Self {
        Self {
            background: Color::from_hex(0x0F0505),
            background_secondary: Color::from_hex(0x1C0A0A),
            text: Color::from_hex(0xFBE9E9),
            text_secondary: Color::from_hex(0xC79A9A),
            border: Color::from_hex(0x4A1414),
            accent: Color::from_hex(0xDC2626),
        }
    }

    /// Get color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Background => self.background,
            ColorToken::BackgroundSecondary => self.background_secondary,
            ColorToken::Text => self.text,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::Border => self.border,
            ColorToken::Accent => self.accent,
        }
    }

    /// Global style variables mirrored on every theme change, in a fixed order
    pub fn style_variables(&self) -> Vec<(&'static str, String)> {
        let mut vars: Vec<(&'static str, String)> = ColorToken::all()
            .iter()
            .map(|token| (token.variable_name(), self.get(*token).to_css()))
            .collect();
        vars.push((ACCENT_RGB_VARIABLE, self.accent.to_rgb_channels()));
        vars
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::spectral()
    }
}
