mod init;
mod surface;

pub use surface::GpuSurface;
