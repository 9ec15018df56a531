use std::borrow::Cow;

use anyhow::Result;
use wgpu::naga::ShaderStage;

/// Compiles the static quad vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("overlay quad vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

/// Wraps an effect body with the shared uniform prelude and compiles it.
///
/// Compilation errors out of naga carry the driver-side diagnostic text; the
/// caller surfaces them verbatim, since a broken effect body is a fatal setup
/// error.
pub(crate) fn compile_effect_shader(
    device: &wgpu::Device,
    body: &str,
) -> Result<wgpu::ShaderModule> {
    let wrapped = wrap_effect_fragment(body);
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("overlay effect fragment"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(wrapped),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Produces a self-contained GLSL fragment shader from an effect body.
///
/// [`HEADER`] declares the uniform block the host writes each frame;
/// [`FOOTER`] remaps `gl_FragCoord` to a bottom-left origin, calls the body's
/// `effect_color`, and converts the result to premultiplied alpha. A body
/// that never reads `params.time` or `params.bounds` is fine; unused block
/// members are simply never sampled.
pub(crate) fn wrap_effect_fragment(body: &str) -> String {
    format!("{HEADER}\n{body}\n{FOOTER}")
}

/// GLSL prologue shared by every effect. The block layout must match
/// `EffectUniforms` in `gpu/uniforms.rs`.
const HEADER: &str = r"#version 450
layout(location = 0) out vec4 out_color;

layout(std140, set = 0, binding = 0) uniform EffectParams {
    vec4 bounds;
    float time;
} params;
";

/// GLSL epilogue: bottom-left fragment origin, premultiplied-alpha output.
const FOOTER: &str = r"void main() {
    vec2 frag_coord = vec2(gl_FragCoord.x, params.bounds.w - gl_FragCoord.y);
    vec4 color = effect_color(frag_coord);
    out_color = vec4(color.rgb * color.a, color.a);
}
";

/// Quad vertex shader; positions come from the static vertex buffer.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec3 position;

void main() {
    gl_Position = vec4(position, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_places_body_between_prelude_and_main() {
        let body = "vec4 effect_color(vec2 frag_coord) { return vec4(1.0); }";
        let wrapped = wrap_effect_fragment(body);
        let header_at = wrapped.find("uniform EffectParams").unwrap();
        let body_at = wrapped.find("effect_color").unwrap();
        let main_at = wrapped.find("void main()").unwrap();
        assert!(header_at < body_at);
        assert!(body_at < main_at);
    }

    #[test]
    fn wrap_emits_premultiplied_output() {
        let wrapped = wrap_effect_fragment("vec4 effect_color(vec2 fc) { return vec4(0.0); }");
        assert!(wrapped.contains("color.rgb * color.a"));
    }

    #[test]
    fn wrap_accepts_body_ignoring_all_uniforms() {
        // The analogue of pushing to a -1 uniform location: a body that never
        // touches the block still wraps into a valid shader skeleton.
        let body = "vec4 effect_color(vec2 frag_coord) { return vec4(0.5, 0.5, 0.5, 1.0); }";
        let wrapped = wrap_effect_fragment(body);
        assert!(wrapped.contains("uniform EffectParams"));
        assert!(wrapped.contains(body.trim_end()));
    }
}
