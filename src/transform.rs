//! A cpu reference of the sprite vertex stage. It computes exactly what `shaders::sprite::VERTEX`
//! computes, which lets the shader's contract be checked without a gpu.

use glam::{Vec2, Vec4};

use crate::shaders::sprite::Uniforms;
use crate::types::SpriteVertex;

/// The outputs of the vertex stage for a single vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexOutput {
    /// `gl_Position`.
    pub clip: Vec4,

    /// `v_Color`.
    pub color: [f32; 4],

    /// `v_Additive`.
    pub additive: [f32; 4],

    /// `v_Texcoord`.
    pub texcoord: [f32; 2],
}

impl VertexOutput {
    pub fn texcoord(&self) -> Vec2 {
        Vec2::from_array(self.texcoord)
    }
}

/// Run the vertex stage on one vertex. This is total, any input gives an output.
pub fn apply(vertex: &SpriteVertex, uniforms: &Uniforms) -> VertexOutput {
    let [x, y, _] = vertex.position;
    let position = Vec4::new(x, y, 0.0, 1.0);

    VertexOutput {
        clip: uniforms.proj * (uniforms.view * position),
        color: vertex.color,
        additive: vertex.additive,
        texcoord: vertex.texcoord,
    }
}

/// Run the vertex stage on every vertex. Each vertex is independent, the output order matches the
/// input order.
pub fn apply_all(vertices: &[SpriteVertex], uniforms: &Uniforms) -> Vec<VertexOutput> {
    vertices.iter().map(|vertex| apply(vertex, uniforms)).collect()
}
