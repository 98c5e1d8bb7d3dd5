//! RGB color with hex conversion

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Linear RGB color, each channel in `0.0..=1.0`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Pack into `0xRRGGBB`, rounding each channel to the nearest byte
    pub fn to_hex(self) -> u32 {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    /// Parse `"ff8800"`, `"#ff8800"` or the shorthand `"0"` for black
    pub fn from_hex_str(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.is_empty() || digits.len() > 6 {
            return Err(Error::Parse(format!("invalid hex color '{s}'")));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|e| Error::Parse(format!("invalid hex color '{s}': {e}")))?;
        Ok(Self::from_hex(hex))
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        for hex in [0x000000, 0xff0000, 0xfeb74c, 0x123456, 0xffffff] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_from_hex_channels() {
        let red = Color::from_hex(0xff0000);
        assert_eq!(red, Color::new(1.0, 0.0, 0.0));

        let grey = Color::from(0x808080);
        assert!((grey.g - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_hex_str() {
        assert_eq!(Color::from_hex_str("#ff0000").unwrap(), Color::new(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hex_str("FEB74C").unwrap().to_hex(), 0xfeb74c);
        assert_eq!(Color::from_hex_str("0").unwrap(), Color::BLACK);
        assert!(Color::from_hex_str("").is_err());
        assert!(Color::from_hex_str("zzzzzz").is_err());
        assert!(Color::from_hex_str("1234567").is_err());
    }
}
