//! Drawing-buffer sizing

use crate::config::DEFAULT_MAX_PIXEL_RATIO;

/// Drawing-buffer size in device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Buffer size for a container of `css_width` x `css_height` CSS pixels
    ///
    /// Each axis is `max(1, floor(css * ratio))` where the ratio is the device
    /// pixel ratio capped at `max_pixel_ratio`.
    pub fn from_css(css_width: f64, css_height: f64, device_pixel_ratio: f64, max_pixel_ratio: f32) -> Self {
        let ratio = effective_pixel_ratio(device_pixel_ratio, max_pixel_ratio);
        Self {
            width: scale_axis(css_width, ratio),
            height: scale_axis(css_height, ratio),
        }
    }

    /// Value for the resolution uniform
    pub fn as_resolution(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

/// Device pixel ratio after defaulting and capping
pub fn effective_pixel_ratio(device_pixel_ratio: f64, max_pixel_ratio: f32) -> f64 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let cap = if max_pixel_ratio.is_finite() && max_pixel_ratio > 0.0 {
        max_pixel_ratio
    } else {
        DEFAULT_MAX_PIXEL_RATIO
    };
    dpr.min(cap as f64)
}

fn scale_axis(css: f64, ratio: f64) -> u32 {
    let px = (css * ratio).floor();
    if px.is_finite() && px >= 1.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_applies() {
        let size = SurfaceSize::from_css(800.0, 600.0, 2.0, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(size, SurfaceSize::new(1400, 1050));
    }

    #[test]
    fn test_ratio_below_cap() {
        let size = SurfaceSize::from_css(800.0, 600.0, 2.0, 2.0);
        assert_eq!(size, SurfaceSize::new(1600, 1200));
        assert_eq!(size.as_resolution(), [1600.0, 1200.0]);
    }

    #[test]
    fn test_floor_and_minimum() {
        assert_eq!(SurfaceSize::from_css(100.7, 0.2, 1.0, 1.75), SurfaceSize::new(100, 1));
        assert_eq!(SurfaceSize::from_css(0.0, -5.0, 1.5, 1.75), SurfaceSize::new(1, 1));
        assert_eq!(SurfaceSize::from_css(f64::NAN, 10.0, 1.0, 1.75), SurfaceSize::new(1, 10));
    }

    #[test]
    fn test_missing_pixel_ratio_defaults_to_one() {
        assert_eq!(effective_pixel_ratio(0.0, 1.75), 1.0);
        assert_eq!(effective_pixel_ratio(f64::NAN, 1.75), 1.0);
        assert_eq!(effective_pixel_ratio(3.0, 0.0), 1.75);
    }
}
