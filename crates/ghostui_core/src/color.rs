//! RGBA colors and their style-variable encodings

/// RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Channels as 0-255 integers
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// `#rrggbb` for opaque colors, `rgba(r,g,b,a)` otherwise
    pub fn to_css(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        if self.a < 1.0 {
            format!("rgba({},{},{},{})", r, g, b, self.a)
        } else {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        }
    }

    /// Comma-separated channel triple (`"r, g, b"`) for `rgba(var(--x), a)` usage
    pub fn to_rgb_channels(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("{}, {}, {}", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_to_css() {
        assert_eq!(Color::from_hex(0x8B5CF6).to_css(), "#8b5cf6");
        assert_eq!(Color::from_hex(0xFF0000).to_rgb_channels(), "255, 0, 0");
    }

    #[test]
    fn test_translucent_css() {
        let c = Color::from_hex(0x000000).with_alpha(0.5);
        assert_eq!(c.to_css(), "rgba(0,0,0,0.5)");
    }
}
