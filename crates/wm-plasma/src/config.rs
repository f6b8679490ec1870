//! Plasma configuration

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Accent colour used when none is configured
pub const DEFAULT_COLOR: &str = "#002366";

/// Upper bound on device pixel ratio, keeps fragment cost in check on dense screens
pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 1.75;

/// Errors raised while reading plasma options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Options JSON could not be parsed.
    #[error("invalid plasma options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Direction the plasma flows in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// Multiplier applied to shader time
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

/// Options recognised by the plasma renderer
///
/// Deserialised with camelCase keys; missing keys take their defaults.
/// An explicit `"color": null` turns the accent tint off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlasmaConfig {
    /// Accent colour as `#rrggbb`
    pub color: Option<String>,
    /// Animation speed multiplier
    pub speed: f32,
    pub direction: Direction,
    /// Zoom around the container centre
    pub scale: f32,
    /// Output alpha multiplier
    pub opacity: f32,
    /// Bend the plasma towards the pointer
    pub mouse_interactive: bool,
    /// Brightness multiplier for the accent tint
    pub color_boost: f32,
    /// Device pixel ratio cap for the drawing buffer
    pub max_pixel_ratio: f32,
}

impl Default for PlasmaConfig {
    fn default() -> Self {
        Self {
            color: Some(DEFAULT_COLOR.to_string()),
            speed: 1.0,
            direction: Direction::Forward,
            scale: 1.0,
            opacity: 0.65,
            mouse_interactive: false,
            color_boost: 2.35,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
        }
    }
}

impl PlasmaConfig {
    /// Settings for the page banner
    pub fn banner() -> Self {
        Self {
            opacity: 0.55,
            color_boost: 2.5,
            ..Self::default()
        }
    }

    /// Parse options from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Accent tint, `None` when disabled
    ///
    /// Unparseable colours fall back to [`Rgb::FALLBACK`] rather than failing.
    pub fn accent(&self) -> Option<Rgb> {
        self.color
            .as_deref()
            .map(|hex| Rgb::from_hex(hex.trim()).unwrap_or(Rgb::FALLBACK))
    }
}
