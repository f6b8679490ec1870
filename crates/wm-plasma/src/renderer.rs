//! Plasma renderer lifecycle
//!
//! [`PlasmaRenderer`] owns the uniform block, the visibility flag and the one
//! pending frame request. Drawing goes through a [`RenderSurface`] and frame
//! scheduling through a [`FrameScheduler`], so the loop runs the same way in
//! the browser and in tests.

use crate::config::PlasmaConfig;
use crate::sizing::SurfaceSize;
use crate::uniforms::Uniforms;

/// Handle of a scheduled animation frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i32);

/// Pixel output the renderer draws into
pub trait RenderSurface {
    /// On-screen container size in CSS pixels
    fn css_size(&self) -> (f64, f64);

    /// Current device pixel ratio
    fn device_pixel_ratio(&self) -> f64;

    /// Resize the drawing buffer
    fn configure(&mut self, size: SurfaceSize);

    /// Upload uniforms, clear, and draw the full-viewport triangle
    fn draw(&mut self, uniforms: &Uniforms);

    /// Detach the output from the page; called at most once
    fn remove(&mut self);
}

/// Source of time and per-frame callbacks
pub trait FrameScheduler {
    /// Monotonic clock in milliseconds
    fn now_ms(&self) -> f64;

    /// Schedule one call to [`PlasmaRenderer::render_frame`]
    fn request_frame(&mut self) -> Option<FrameRequest>;

    /// Drop a scheduled frame before it runs
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Animated background bound to one surface
pub struct PlasmaRenderer<S: RenderSurface, F: FrameScheduler> {
    surface: S,
    frames: F,
    config: PlasmaConfig,
    uniforms: Uniforms,
    size: SurfaceSize,
    visible: bool,
    pending: Option<FrameRequest>,
    start_ms: f64,
    disposed: bool,
}

impl<S: RenderSurface, F: FrameScheduler> PlasmaRenderer<S, F> {
    /// Bind uniforms, size the surface and start the frame loop
    pub fn new(surface: S, frames: F, config: PlasmaConfig) -> Self {
        let uniforms = Uniforms::from_config(&config);
        let start_ms = frames.now_ms();

        let mut renderer = Self {
            surface,
            frames,
            config,
            uniforms,
            size: SurfaceSize::default(),
            visible: true,
            pending: None,
            start_ms,
            disposed: false,
        };
        renderer.resize();
        renderer.start();
        renderer
    }

    pub fn config(&self) -> &PlasmaConfig {
        &self.config
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    /// Current drawing-buffer size
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether a frame is scheduled
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Match the drawing buffer to the container's on-screen size
    pub fn resize(&mut self) {
        if self.disposed {
            return;
        }
        let (css_width, css_height) = self.surface.css_size();
        let size = SurfaceSize::from_css(
            css_width,
            css_height,
            self.surface.device_pixel_ratio(),
            self.config.max_pixel_ratio,
        );

        self.size = size;
        self.uniforms.resolution = size.as_resolution();
        self.surface.configure(size);
    }

    /// Frame callback: draw once and reschedule while visible
    pub fn render_frame(&mut self) {
        self.pending = None;
        if self.disposed || !self.visible {
            return;
        }

        let now = self.frames.now_ms();
        self.uniforms.time = ((now - self.start_ms) * 0.001) as f32;
        self.surface.draw(&self.uniforms);

        self.pending = self.frames.request_frame();
    }

    /// Pause or resume the frame loop
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Pointer position in CSS pixels relative to the container's top-left
    /// corner
    ///
    /// Stored in drawing-buffer pixels with a bottom-left origin, the space
    /// the fragment stage works in. Ignored unless mouse interaction is
    /// enabled.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        if !self.config.mouse_interactive || self.disposed {
            return;
        }
        let (css_width, css_height) = self.surface.css_size();
        if !(css_width > 0.0 && css_height > 0.0) {
            return;
        }

        let scale_x = self.size.width as f64 / css_width;
        let scale_y = self.size.height as f64 / css_height;
        self.uniforms.mouse = [(x * scale_x) as f32, ((css_height - y) * scale_y) as f32];
    }

    /// Stop the loop and detach the surface; safe to call repeatedly
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.stop();
        self.surface.remove();
        self.disposed = true;
    }

    fn start(&mut self) {
        if self.disposed || self.pending.is_some() {
            return;
        }
        self.pending = self.frames.request_frame();
    }

    fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.frames.cancel_frame(request);
        }
    }
}
