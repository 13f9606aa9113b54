/// WGSL shader for scene meshes: unlit (basic) or Lambert-lit (standard)
/// with a filtered point-light cube shadow lookup.
///
/// Shadow comparisons are done in the shader on `textureLoad` texels, so the
/// result does not depend on comparison-sampler support of the backend.
pub const MESH_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

struct Light {
    position: vec4<f32>,
    color: vec4<f32>,
    // x: range cutoff (0 = none), y: decay exponent (0 = none)
    attenuation: vec4<f32>,
    // x: enabled, y: kernel radius in texels, z: depth bias, w: bilinear taps
    shadow: vec4<f32>,
    // +X, -X, +Y, -Y, +Z, -Z
    face_view_proj: array<mat4x4<f32>, 6>,
};

struct Model {
    model: mat4x4<f32>,
    color: vec4<f32>,
    // x: lit, y: receives shadows
    flags: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;
@group(0) @binding(1)
var<uniform> light: Light;
@group(0) @binding(2)
var shadow_map: texture_2d_array<f32>;

@group(1) @binding(0)
var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = model.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    out.world_normal = (model.model * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

fn cube_face(d: vec3<f32>) -> i32 {
    let a = abs(d);
    if (a.x >= a.y && a.x >= a.z) {
        return select(1, 0, d.x > 0.0);
    }
    if (a.y >= a.z) {
        return select(3, 2, d.y > 0.0);
    }
    return select(5, 4, d.z > 0.0);
}

// 1.0 when the stored occluder depth is not in front of `depth`.
fn shadow_test(texel: vec2<i32>, face: i32, depth: f32) -> f32 {
    let size = vec2<i32>(textureDimensions(shadow_map));
    let t = clamp(texel, vec2<i32>(0, 0), size - vec2<i32>(1, 1));
    let stored = textureLoad(shadow_map, t, face, 0).x;
    return select(0.0, 1.0, depth <= stored);
}

fn shadow_tap(uv: vec2<f32>, face: i32, depth: f32) -> f32 {
    let size = vec2<f32>(textureDimensions(shadow_map));
    if (light.shadow.w < 0.5) {
        return shadow_test(vec2<i32>(floor(uv * size)), face, depth);
    }
    let p = uv * size - vec2<f32>(0.5, 0.5);
    let base = vec2<i32>(floor(p));
    let f = fract(p);
    let s00 = shadow_test(base, face, depth);
    let s10 = shadow_test(base + vec2<i32>(1, 0), face, depth);
    let s01 = shadow_test(base + vec2<i32>(0, 1), face, depth);
    let s11 = shadow_test(base + vec2<i32>(1, 1), face, depth);
    return mix(mix(s00, s10, f.x), mix(s01, s11, f.x), f.y);
}

fn shadow_factor(world_position: vec3<f32>) -> f32 {
    let face = cube_face(world_position - light.position.xyz);
    let clip = light.face_view_proj[face] * vec4<f32>(world_position, 1.0);
    if (clip.w <= 0.0) {
        return 1.0;
    }
    let ndc = clip.xyz / clip.w;
    if (ndc.z > 1.0) {
        return 1.0;
    }
    // Framebuffer y runs down, NDC y runs up.
    let uv = vec2<f32>(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5);
    let depth = ndc.z - light.shadow.z;
    let radius = i32(light.shadow.y);
    let texel = 1.0 / vec2<f32>(textureDimensions(shadow_map));

    var lit = 0.0;
    var taps = 0.0;
    for (var y = -radius; y <= radius; y += 1) {
        for (var x = -radius; x <= radius; x += 1) {
            lit += shadow_tap(uv + vec2<f32>(f32(x), f32(y)) * texel, face, depth);
            taps += 1.0;
        }
    }
    return lit / taps;
}

fn falloff(dist: f32) -> f32 {
    var a = 1.0;
    if (light.attenuation.y > 0.0) {
        a = 1.0 / max(pow(dist, light.attenuation.y), 0.01);
    }
    if (light.attenuation.x > 0.0) {
        let ratio = dist / light.attenuation.x;
        let edge = clamp(1.0 - ratio * ratio * ratio * ratio, 0.0, 1.0);
        a = a * edge * edge;
    }
    return a;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if (model.flags.x < 0.5) {
        return model.color;
    }

    let n = normalize(in.world_normal);
    let to_light = light.position.xyz - in.world_position;
    let dist = length(to_light);
    let l = to_light / max(dist, 0.0001);
    let diffuse = max(dot(n, l), 0.0);

    var shadow = 1.0;
    if (model.flags.y > 0.5 && light.shadow.x > 0.5) {
        shadow = shadow_factor(in.world_position);
    }

    let rgb = model.color.rgb * light.color.rgb * diffuse * falloff(dist) * shadow;
    return vec4<f32>(rgb, model.color.a);
}
"#;

/// WGSL depth-only shader for one cube face of the shadow map.
pub const SHADOW_SHADER: &str = r#"
struct Face {
    view_proj: mat4x4<f32>,
};

struct Model {
    model: mat4x4<f32>,
    color: vec4<f32>,
    flags: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> face: Face;

@group(1) @binding(0)
var<uniform> model: Model;

@vertex
fn vs_shadow(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return face.view_proj * model.model * vec4<f32>(position, 1.0);
}
"#;

/// WGSL shader for helper wireframes.
pub const LINE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = camera.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
