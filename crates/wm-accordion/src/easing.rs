//! Easing curves for body transitions

/// CSS cubic Bézier timing function with fixed end points (0,0) and (1,1)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Fast-out, soft-landing curve used by every open and close transition
pub const EASE_EMPHASIZED: CubicBezier = CubicBezier::new(0.2, 0.8, 0.2, 1.0);

impl CubicBezier {
    /// Create a curve from its two control points
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Render as a CSS `<easing-function>`
    pub fn to_css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}
