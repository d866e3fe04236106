//! Palette lookup for widgets
//!
//! Library widgets must render even when no theme provider is mounted, so they
//! go through the optional accessor and fall back to the default theme.

use ghostui_core::Color;
use ghostui_theme::{ColorToken, Palette, ThemeContext};

/// Palette of the active theme, or of the default theme without a provider
pub fn resolve_palette(ctx: &ThemeContext) -> Palette {
    match ctx.use_theme_optional() {
        Some(theme) => theme.palette(),
        None => ctx.theme_or_default().palette(),
    }
}

/// Single token from the active palette
pub fn resolve_color(ctx: &ThemeContext, token: ColorToken) -> Color {
    resolve_palette(ctx).get(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostui_core::HostContext;
    use ghostui_theme::{Theme, ThemeConfig, ThemeProvider};

    #[test]
    fn test_falls_back_to_default_palette() {
        let palette = resolve_palette(&ThemeContext::empty());
        assert_eq!(palette, Theme::default().palette());
    }

    #[test]
    fn test_follows_provider() {
        let provider = ThemeProvider::mount(&HostContext::detached(), ThemeConfig::new(Theme::Blood));
        let ctx = ThemeContext::provided(provider.clone());
        assert_eq!(resolve_palette(&ctx), Palette::blood());

        provider.set_theme(Theme::Spectral);
        assert_eq!(resolve_color(&ctx, ColorToken::Accent), Palette::spectral().accent);
    }
}
