use miniquad::*;

/// Transforms sprite vertices into clip space. Only the x and y of `Position` are used, z is
/// always taken as 0 and w as 1.
pub const VERTEX: &str = r#"
    #version 150

    in vec3 Position;
    in vec4 Color0;
    in vec4 Color1;
    in vec2 Texcoord0;

    uniform mat4 u_View;
    uniform mat4 u_Proj;

    out vec4 v_Color;
    out vec4 v_Additive;
    out vec2 v_Texcoord;

    void main() {
        gl_Position = u_Proj * u_View * vec4(Position.x, Position.y, 0.0, 1.0);
        v_Color = Color0;
        v_Additive = Color1;
        v_Texcoord = Texcoord0;
    }
"#;

pub const FRAGMENT: &str = r#"
    #version 150

    in vec4 v_Color;
    in vec4 v_Additive;
    in vec2 v_Texcoord;

    uniform sampler2D mainTexture;

    out vec4 color;

    void main() {
        color = v_Additive + v_Color * texture(mainTexture, v_Texcoord);
    }
"#;

/// The name of the texture sampler in the fragment shader.
pub const TEXTURE: &str = "mainTexture";

/// Vertex attribute names, in the order of the fields of `SpriteVertex`.
pub const ATTRIBUTES: [&str; 4] = ["Position", "Color0", "Color1", "Texcoord0"];

/// Uniform names, in the order of the fields of `Uniforms`.
pub const UNIFORMS: [&str; 2] = ["u_View", "u_Proj"];

pub fn meta() -> ShaderMeta {
    ShaderMeta {
        images: vec![TEXTURE.to_string()],
        uniforms: UniformBlockLayout {
            uniforms: vec![
                UniformDesc::new(UNIFORMS[0], UniformType::Mat4),
                UniformDesc::new(UNIFORMS[1], UniformType::Mat4),
            ],
        },
    }
}

/// The vertex layout of a `SpriteVertex`, for building pipelines.
pub fn attributes() -> [VertexAttribute; 4] {
    [
        VertexAttribute::new(ATTRIBUTES[0], VertexFormat::Float3),
        VertexAttribute::new(ATTRIBUTES[1], VertexFormat::Float4),
        VertexAttribute::new(ATTRIBUTES[2], VertexFormat::Float4),
        VertexAttribute::new(ATTRIBUTES[3], VertexFormat::Float2),
    ]
}

/// The per-draw uniform block. Field order must match `UNIFORMS`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    pub view: glam::Mat4,
    pub proj: glam::Mat4,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            view: glam::Mat4::IDENTITY,
            proj: glam::Mat4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpriteVertex;

    fn format_floats(format: VertexFormat) -> usize {
        match format {
            VertexFormat::Float1 => 1,
            VertexFormat::Float2 => 2,
            VertexFormat::Float3 => 3,
            VertexFormat::Float4 => 4,
            other => panic!("unexpected vertex format {other:?}"),
        }
    }

    #[test]
    fn vertex_source_declares_interface() {
        assert!(VERTEX.contains("#version 150"));
        assert!(VERTEX.contains("in vec3 Position;"));
        assert!(VERTEX.contains("in vec4 Color0;"));
        assert!(VERTEX.contains("in vec4 Color1;"));
        assert!(VERTEX.contains("in vec2 Texcoord0;"));
        assert!(VERTEX.contains("uniform mat4 u_View;"));
        assert!(VERTEX.contains("uniform mat4 u_Proj;"));
        assert!(VERTEX.contains("out vec4 v_Color;"));
        assert!(VERTEX.contains("out vec4 v_Additive;"));
        assert!(VERTEX.contains("out vec2 v_Texcoord;"));
    }

    #[test]
    fn fragment_consumes_vertex_outputs() {
        for varying in ["v_Color", "v_Additive", "v_Texcoord"] {
            assert!(FRAGMENT.contains(&format!("in vec{} {varying};",
                if varying == "v_Texcoord" { 2 } else { 4 })));
        }
        assert!(FRAGMENT.contains(&format!("uniform sampler2D {TEXTURE};")));
    }

    #[test]
    fn meta_matches_uniform_block() {
        let meta = meta();
        assert_eq!(meta.images, vec![TEXTURE.to_string()]);

        // UniformDesc keeps its fields private, so go through its Debug output.
        let layout = format!("{:?}", meta.uniforms);
        let view = layout.find(UNIFORMS[0]).expect("u_View missing from uniform layout");
        let proj = layout.find(UNIFORMS[1]).expect("u_Proj missing from uniform layout");
        assert!(view < proj);
        assert_eq!(layout.matches("Mat4").count(), 2);

        // The block is uploaded as raw bytes, so the fields have to sit in the same order.
        let uniforms = Uniforms::default();
        let base = &uniforms as *const Uniforms as usize;
        assert_eq!(&uniforms.view as *const glam::Mat4 as usize - base, 0);
        assert_eq!(&uniforms.proj as *const glam::Mat4 as usize - base, std::mem::size_of::<glam::Mat4>());
        assert_eq!(std::mem::size_of::<Uniforms>(), 2 * std::mem::size_of::<glam::Mat4>());
    }

    #[test]
    fn attributes_match_vertex_stride() {
        let attributes = attributes();
        for (attribute, name) in attributes.iter().zip(ATTRIBUTES) {
            assert_eq!(attribute.name, name);
            assert!(VERTEX.contains(name));
        }

        let floats: usize = attributes.iter().map(|a| format_floats(a.format)).sum();
        assert_eq!(floats * std::mem::size_of::<f32>(), std::mem::size_of::<SpriteVertex>());
    }
}
