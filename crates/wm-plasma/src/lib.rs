//! Animated plasma background for Webmark banners
//!
//! Draws a full-viewport procedural plasma behind a container with wgpu
//! (WebGPU, or WebGL2 where WebGPU is missing), tinted towards an accent
//! colour and composited with alpha over the page.
//!
//! ## Architecture
//!
//! - [`renderer`]: frame loop, visibility and disposal over platform traits
//! - [`launch`]: mount decisions and backend fallback order
//! - [`uniforms`]: the shader's uniform block
//! - [`sizing`]: CSS to drawing-buffer pixel conversion
//! - [`config`] / [`color`]: options and accent parsing
//! - [`shaders`]: WGSL source
//!
//! With the `wasm` feature the crate adds the wgpu surface, the
//! `requestAnimationFrame` scheduler and the `mountPlasma` export.

pub mod color;
pub mod config;
pub mod error;
pub mod launch;
pub mod renderer;
pub mod shaders;
pub mod sizing;
pub mod uniforms;

// GPU surface and WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod gpu;
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use gpu::GpuSurface;
#[cfg(feature = "wasm")]
pub use wasm::*;

pub use color::{ColorError, Rgb};
pub use config::{ConfigError, Direction, PlasmaConfig, DEFAULT_COLOR, DEFAULT_MAX_PIXEL_RATIO};
pub use error::{PlasmaError, PlasmaStatus};
pub use launch::{first_available, launch, PlasmaContainer};
pub use renderer::{FrameRequest, FrameScheduler, PlasmaRenderer, RenderSurface};
pub use sizing::{effective_pixel_ratio, SurfaceSize};
pub use uniforms::{Uniforms, SPEED_FACTOR};
