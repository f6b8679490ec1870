/// Plasma background shader: full-viewport triangle plus a raymarched plasma field
pub const SHADER_PLASMA: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    time: f32,
    speed: f32,
    custom_color: vec3<f32>,
    use_custom_color: f32,
    mouse: vec2<f32>,
    direction: f32,
    scale: f32,
    opacity: f32,
    mouse_interactive: f32,
    color_boost: f32,
    _pad: f32,
};

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VsOut {
    var out: VsOut;
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index >> 1u) * 4 - 1);
    out.position = vec4<f32>(x, y, 0.0, 1.0);
    out.uv = vec2<f32>((x + 1.0) * 0.5, (1.0 - y) * 0.5);
    return out;
}

// Accumulated plasma colour for a bottom-left-origin pixel coordinate
fn plasma(coord: vec2<f32>) -> vec3<f32> {
    let r = uniforms.resolution;
    let center = r * 0.5;
    var c = (coord - center) / uniforms.scale + center;

    let mouse_offset = (uniforms.mouse - center) * 0.0002;
    c += mouse_offset * length(c - center) * step(0.5, uniforms.mouse_interactive);

    let t = uniforms.time * uniforms.speed * uniforms.direction;
    var acc = vec3<f32>(0.0);
    var z = 0.0;

    for (var i = 1; i < 54; i++) {
        var p = z * normalize(vec3<f32>(c - 0.5 * r, r.y));
        p.z -= 4.0;
        let s = p;
        var d = p.y - t;

        p.x += 0.4 * (1.0 + p.y) * sin(d + p.x * 0.1) * cos(0.34 * d + p.x * 0.05);
        let k = cos(p.y + vec4<f32>(0.0, 11.0, 33.0, 0.0) - t);
        let q = p.xz * mat2x2<f32>(k.x, k.y, k.z, k.w);
        p.x = q.x;
        p.z = q.y;

        d = abs(sqrt(length(q * q)) - 0.25 * (5.0 + s.y)) / 3.0 + 8e-4;
        z += d;

        let o = 1.0 + sin(s.y + p.z * 0.5 + s.z - length(s - p) + vec4<f32>(2.0, 1.0, 0.0, 8.0));
        acc += o.w / max(d, 1e-4) * o.xyz;
    }

    return tanh(acc / 1e4);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let coord = vec2<f32>(in.position.x, uniforms.resolution.y - in.position.y);
    var rgb = plasma(coord);

    // NaN guard
    if (any(rgb != rgb)) {
        rgb = vec3<f32>(0.0);
    }
    rgb = clamp(rgb, vec3<f32>(0.0), vec3<f32>(1.0));

    let intensity = (rgb.r + rgb.g + rgb.b) / 3.0;
    let tinted = intensity * uniforms.custom_color * uniforms.color_boost;
    let color = mix(rgb, tinted, step(0.5, uniforms.use_custom_color));

    let alpha = clamp(length(rgb) * uniforms.opacity, 0.0, 1.0);
    return vec4<f32>(color, alpha);
}
"#;
