/// WGSL shader for drawing a chunk texture onto a fullscreen quad.
///
/// The fragment stage is the rendering contract: read the interpolated UV,
/// flip the vertical axis, sample, and emit the texel unchanged. The flip
/// bridges the chunk's row-major cell layout and the quad's bottom-up UV
/// orientation. The texture and its sampler bind at group 2 (slots 0 and 1)
/// to match the material bind-group convention of the host pipeline; groups
/// 0 and 1 are reserved for view and mesh data.
pub const CHUNK_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(vertex.position, 0.0, 1.0);
    out.uv = vertex.uv;
    return out;
}

@group(2) @binding(0)
var chunk_texture: texture_2d<f32>;
@group(2) @binding(1)
var chunk_sampler: sampler;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(chunk_texture, chunk_sampler, vec2<f32>(in.uv.x, 1.0 - in.uv.y));
}
"#;
