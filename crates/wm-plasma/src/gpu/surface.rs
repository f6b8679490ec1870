use web_sys::{HtmlCanvasElement, HtmlElement, Window};

use super::init::{build_pipeline, configure_surface, connect};
use crate::error::PlasmaError;
use crate::renderer::RenderSurface;
use crate::sizing::SurfaceSize;
use crate::uniforms::Uniforms;

/// Canvas plus the GPU objects that draw the plasma into it
pub struct GpuSurface {
    window: Window,
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
}

impl GpuSurface {
    /// Create the canvas, device and pipeline for `container`
    ///
    /// The canvas is not attached yet; call [`GpuSurface::attach`] once
    /// this returns `Ok`.
    pub async fn new(
        window: Window,
        container: HtmlElement,
        size: SurfaceSize,
        uniforms: &Uniforms,
    ) -> Result<Self, PlasmaError> {
        let gpu = connect(&window, size).await?;
        let config = configure_surface(&gpu, size)?;
        let parts = build_pipeline(&gpu.device, config.format, uniforms).await?;

        Ok(Self {
            window,
            container,
            canvas: gpu.canvas,
            surface: gpu.surface,
            device: gpu.device,
            queue: gpu.queue,
            config,
            pipeline: parts.pipeline,
            bind_group: parts.bind_group,
            uniform_buffer: parts.uniform_buffer,
        })
    }

    /// Append the canvas to the container
    pub fn attach(&self) -> Result<(), PlasmaError> {
        self.container
            .append_child(&self.canvas)
            .map(|_| ())
            .map_err(|e| PlasmaError::Unsupported(format!("failed to attach canvas: {:?}", e)))
    }

    fn current_texture(&mut self) -> Option<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Some(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and skip this frame
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(_) => None,
        }
    }
}

impl RenderSurface for GpuSurface {
    fn css_size(&self) -> (f64, f64) {
        let rect = self.container.get_bounding_client_rect();
        (rect.width(), rect.height())
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn configure(&mut self, size: SurfaceSize) {
        if size.width == self.config.width && size.height == self.config.height {
            return;
        }

        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, uniforms: &Uniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));

        let Some(output) = self.current_texture() else {
            return;
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Plasma Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Plasma Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn remove(&mut self) {
        // Tolerates a canvas that page scripts already removed
        self.canvas.remove();
    }
}
