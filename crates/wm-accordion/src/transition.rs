//! Body keyframes and transition timing

use crate::easing::{CubicBezier, EASE_EMPHASIZED};

/// Duration of an open transition in milliseconds
pub const OPEN_DURATION_MS: u32 = 320;

/// Lower bound for close transitions in milliseconds
pub const MIN_CLOSE_DURATION_MS: u32 = 220;

/// Upper bound for close transitions in milliseconds
pub const MAX_CLOSE_DURATION_MS: u32 = 360;

/// Vertical offset of a fully collapsed body
pub const COLLAPSED_OFFSET_PX: f32 = -6.0;

/// Close duration derived from the configured open duration
pub fn close_duration_ms(open_ms: u32) -> u32 {
    open_ms.clamp(MIN_CLOSE_DURATION_MS, MAX_CLOSE_DURATION_MS)
}

/// Direction of a body transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionDirection {
    Open,
    Close,
}

/// Inline style snapshot of a disclosure body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyFrame {
    pub height_px: f64,
    pub opacity: f32,
    pub translate_y_px: f32,
}

impl BodyFrame {
    /// Zero height, transparent, nudged upwards
    pub fn collapsed() -> Self {
        Self {
            height_px: 0.0,
            opacity: 0.0,
            translate_y_px: COLLAPSED_OFFSET_PX,
        }
    }

    /// Fully shown at the given height
    pub fn expanded(height_px: f64) -> Self {
        Self {
            height_px,
            opacity: 1.0,
            translate_y_px: 0.0,
        }
    }

    /// Frame for a body caught at `height_px` on its way to `natural_px`
    pub fn partial(height_px: f64, natural_px: f64) -> Self {
        if natural_px <= 0.0 {
            return Self::collapsed();
        }
        let fraction = (height_px / natural_px).clamp(0.0, 1.0) as f32;
        Self {
            height_px: height_px.clamp(0.0, natural_px),
            opacity: fraction,
            translate_y_px: COLLAPSED_OFFSET_PX * (1.0 - fraction),
        }
    }

    /// CSS `height` value
    pub fn css_height(&self) -> String {
        format!("{}px", self.height_px)
    }

    /// CSS `opacity` value
    pub fn css_opacity(&self) -> String {
        format!("{}", self.opacity)
    }

    /// CSS `transform` value
    pub fn css_transform(&self) -> String {
        format!("translateY({}px)", self.translate_y_px)
    }
}

/// A single open or close animation of a disclosure body
#[derive(Clone, Debug, PartialEq)]
pub struct BodyTransition {
    pub direction: TransitionDirection,
    pub from: BodyFrame,
    pub to: BodyFrame,
    pub duration_ms: u32,
    pub easing: CubicBezier,
}

impl BodyTransition {
    /// Grow from `from_height_px` (zero unless reversing a close) to the natural height
    pub fn opening(from_height_px: f64, natural_height_px: f64, duration_ms: u32) -> Self {
        let from = if from_height_px > 0.0 {
            BodyFrame::partial(from_height_px, natural_height_px)
        } else {
            BodyFrame::collapsed()
        };
        Self {
            direction: TransitionDirection::Open,
            from,
            to: BodyFrame::expanded(natural_height_px),
            duration_ms,
            easing: EASE_EMPHASIZED,
        }
    }

    /// Shrink from the current rendered height down to nothing
    pub fn closing(from_height_px: f64, open_duration_ms: u32) -> Self {
        Self {
            direction: TransitionDirection::Close,
            from: BodyFrame::expanded(from_height_px.max(0.0)),
            to: BodyFrame::collapsed(),
            duration_ms: close_duration_ms(open_duration_ms),
            easing: EASE_EMPHASIZED,
        }
    }

}
