//! WGSL shader sources

mod plasma;

pub use plasma::SHADER_PLASMA;
