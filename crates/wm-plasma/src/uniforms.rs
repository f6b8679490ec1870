use crate::config::PlasmaConfig;

/// Scale applied to the configured speed before it reaches the shader
pub const SPEED_FACTOR: f32 = 0.4;

/// Uniform data sent to the plasma shader
/// NOTE: This struct must match the WGSL `Uniforms` layout!
/// Total struct size is 64 bytes (vec3 aligned to 16).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub resolution: [f32; 2],   // offset 0
    pub time: f32,              // offset 8
    pub speed: f32,             // offset 12
    pub custom_color: [f32; 3], // offset 16
    pub use_custom_color: f32,  // offset 28
    pub mouse: [f32; 2],        // offset 32
    pub direction: f32,         // offset 40
    pub scale: f32,             // offset 44
    pub opacity: f32,           // offset 48
    pub mouse_interactive: f32, // offset 52
    pub color_boost: f32,       // offset 56
    pub _pad: f32,              // offset 60 - padding to 64 bytes
}

impl Uniforms {
    /// Bind every configured input; resolution and time start at zero
    pub fn from_config(config: &PlasmaConfig) -> Self {
        let (custom_color, use_custom_color) = match config.accent() {
            Some(rgb) => (rgb.to_array(), 1.0),
            None => ([1.0, 1.0, 1.0], 0.0),
        };

        Self {
            resolution: [0.0, 0.0],
            time: 0.0,
            speed: config.speed * SPEED_FACTOR,
            custom_color,
            use_custom_color,
            mouse: [0.0, 0.0],
            direction: config.direction.sign(),
            scale: config.scale,
            opacity: config.opacity,
            mouse_interactive: if config.mouse_interactive { 1.0 } else { 0.0 },
            color_boost: config.color_boost,
            _pad: 0.0,
        }
    }
}
