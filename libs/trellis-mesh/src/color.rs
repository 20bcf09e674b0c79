//! # Color
//!
//! RGBA color with byte channels and its short hex form (`#RRGGBB[AA]`).

use std::fmt;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a color from `[0.0, 1.0]` channels, clamping out-of-range input.
    pub fn from_f32(rgba: [f32; 4]) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(rgba[0]), channel(rgba[1]), channel(rgba[2]), channel(rgba[3]))
    }

    /// Channels scaled to `[0.0, 1.0]`.
    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Short hex form: `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis_mesh::Color;
    ///
    /// assert_eq!(Color::rgb(255, 128, 0).to_hex(), "#FF8000");
    /// assert_eq!(Color::new(255, 128, 0, 64).to_hex(), "#FF800040");
    /// ```
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parses `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    ///
    /// Returns `None` for any other length or a non-hex digit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis_mesh::Color;
    ///
    /// assert_eq!(Color::from_hex("#F80"), Some(Color::rgb(255, 136, 0)));
    /// assert_eq!(Color::from_hex("00FF0080"), Some(Color::new(0, 255, 0, 128)));
    /// assert_eq!(Color::from_hex("#12345"), None);
    /// ```
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|n| n * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        match digits.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Self::from_array(rgba)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        for color in [Color::WHITE, Color::new(1, 2, 3, 4), Color::TRANSPARENT] {
            assert_eq!(Color::from_hex(&color.to_hex()), Some(color));
        }
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#ÄÄÄ"), None);
    }

    #[test]
    fn test_hex_is_case_insensitive() {
        assert_eq!(Color::from_hex("#ff00aa"), Color::from_hex("#FF00AA"));
    }

    #[test]
    fn test_f32_conversion() {
        let color = Color::from_f32([1.0, 0.5, 0.0, 2.0]);
        assert_eq!(color, Color::new(255, 128, 0, 255));
        assert_eq!(Color::BLACK.to_f32(), [0.0, 0.0, 0.0, 1.0]);
    }
}
