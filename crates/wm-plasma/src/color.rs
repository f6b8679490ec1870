//! Accent colour parsing

use std::str::FromStr;

/// Errors from parsing a hex colour
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// Not exactly six hex digits after the optional `#`.
    #[error("expected 6 hex digits, got {0:?}")]
    Length(String),

    /// A character outside `0-9a-fA-F`.
    #[error("invalid hex digit in {0:?}")]
    Digit(String),
}

/// Normalised RGB colour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Deep blue used when a configured colour cannot be parsed
    pub const FALLBACK: Rgb = Rgb::new(0.0, 0.137, 0.4);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive)
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ColorError::Length(hex.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Digit(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ColorError::Digit(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
