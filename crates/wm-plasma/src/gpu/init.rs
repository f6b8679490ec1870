use wasm_bindgen::JsCast;
use wgpu::util::DeviceExt;
use web_sys::{HtmlCanvasElement, Window};

use crate::error::PlasmaError;
use crate::launch::first_available;
use crate::shaders::SHADER_PLASMA;
use crate::sizing::SurfaceSize;
use crate::uniforms::Uniforms;

/// Backends in preference order
///
/// Some browsers expose `navigator.gpu` and then hand out no adapter, so
/// WebGL2 is tried when WebGPU comes up empty.
const BACKEND_ORDER: [wgpu::Backends; 2] = [wgpu::Backends::BROWSER_WEBGPU, wgpu::Backends::GL];

const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;";

/// A canvas with a live device behind it
pub struct Connection {
    pub canvas: HtmlCanvasElement,
    pub surface: wgpu::Surface<'static>,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// Render pipeline plus the uniform block it reads
pub struct PipelineParts {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group: wgpu::BindGroup,
    pub uniform_buffer: wgpu::Buffer,
}

/// Open a device on the first backend that yields one
pub async fn connect(window: &Window, size: SurfaceSize) -> Result<Connection, PlasmaError> {
    first_available(&BACKEND_ORDER, |backends| connect_with(window, size, backends)).await
}

async fn connect_with(
    window: &Window,
    size: SurfaceSize,
    backends: wgpu::Backends,
) -> Result<Connection, PlasmaError> {
    // A canvas keeps the first context type it hands out, so each attempt
    // starts from a fresh one
    let canvas = create_canvas(window, size)?;

    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends,
        ..Default::default()
    });
    let surface = canvas_surface(&instance, canvas.clone())?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| PlasmaError::Unsupported(format!("no adapter for {:?}", backends)))?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Plasma Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| PlasmaError::Unsupported(format!("{:?} device: {}", backends, e)))?;

    Ok(Connection {
        canvas,
        surface,
        adapter,
        device,
        queue,
    })
}

#[cfg(target_arch = "wasm32")]
fn canvas_surface(
    instance: &wgpu::Instance,
    canvas: HtmlCanvasElement,
) -> Result<wgpu::Surface<'static>, PlasmaError> {
    instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| PlasmaError::Unsupported(format!("failed to create surface: {}", e)))
}

#[cfg(not(target_arch = "wasm32"))]
fn canvas_surface(
    _instance: &wgpu::Instance,
    _canvas: HtmlCanvasElement,
) -> Result<wgpu::Surface<'static>, PlasmaError> {
    Err(PlasmaError::Unsupported("plasma only renders on WASM targets".to_string()))
}

fn create_canvas(window: &Window, size: SurfaceSize) -> Result<HtmlCanvasElement, PlasmaError> {
    let document = window
        .document()
        .ok_or_else(|| PlasmaError::Unsupported("no document".to_string()))?;

    let canvas = document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| PlasmaError::Unsupported("failed to create canvas".to_string()))?;

    let _ = canvas.set_attribute("style", CANVAS_STYLE);
    let _ = canvas.set_attribute("aria-hidden", "true");
    canvas.set_width(size.width);
    canvas.set_height(size.height);

    Ok(canvas)
}

/// Configure the surface for a transparent overlay
pub fn configure_surface(
    gpu: &Connection,
    size: SurfaceSize,
) -> Result<wgpu::SurfaceConfiguration, PlasmaError> {
    let caps = gpu.surface.get_capabilities(&gpu.adapter);

    // Linear output keeps the colours identical across WebGPU and WebGL
    let format = caps
        .formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| PlasmaError::Unsupported("surface reports no formats".to_string()))?;

    let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
        wgpu::CompositeAlphaMode::PreMultiplied
    } else {
        caps.alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    };

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width,
        height: size.height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    gpu.surface.configure(&gpu.device, &config);

    Ok(config)
}

/// Compile the plasma program and bind its uniform block
///
/// Everything is created inside a validation error scope so a bad shader
/// comes back as an error instead of reaching the uncaptured-error handler.
pub async fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    uniforms: &Uniforms,
) -> Result<PipelineParts, PlasmaError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Plasma Uniforms"),
        contents: bytemuck::bytes_of(uniforms),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Plasma Uniform Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Uniforms>() as u64),
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Plasma Uniform Group"),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Plasma Pipeline Layout"),
        bind_group_layouts: &[&layout],
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Plasma Shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_PLASMA.into()),
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Plasma Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    match device.pop_error_scope().await {
        Some(e) => Err(PlasmaError::ShaderCompilation(e.to_string())),
        None => Ok(PipelineParts {
            pipeline,
            bind_group,
            uniform_buffer,
        }),
    }
}
