use miniquad::*;

use crate::batch::{SpriteMesh, MAX_SPRITES};
use crate::error::SpriteError;
use crate::shaders::sprite;
use crate::texture;
use crate::types::SpriteVertex;

/// The texture bound for drawing, and whether the renderer created it and so has to free it.
#[derive(Copy, Clone, Debug, PartialEq)]
struct BoundTexture<T> {
    texture: T,
    owned: bool,
}

impl<T: Copy> BoundTexture<T> {
    /// Bind a texture owned by the caller. Returns the previous texture if it has to be freed.
    fn replace(&mut self, texture: T) -> Option<T> {
        let previous = std::mem::replace(self, BoundTexture { texture, owned: false });
        previous.owned.then_some(previous.texture)
    }

    /// The texture to free when the renderer goes away, if any.
    fn owned(&self) -> Option<T> {
        self.owned.then_some(self.texture)
    }
}

/// Draws sprite meshes through the sprite shader. Owns the pipeline and a pair of stream buffers,
/// which grow when a mesh doesn't fit. The buffers and the default texture are freed on drop.
pub struct SpriteRenderer {
    pipeline: Pipeline,
    bindings: Bindings,
    texture: BoundTexture<Texture>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer with room for `capacity` sprites before the buffers grow. It
    /// starts out drawing with a white texture.
    pub fn new(ctx: &mut Context, capacity: usize) -> Result<Self, SpriteError> {
        let capacity = capacity.clamp(1, MAX_SPRITES);

        let shader = Shader::new(ctx, sprite::VERTEX, sprite::FRAGMENT, sprite::meta())
            .map_err(|err| SpriteError::Shader(format!("{err:?}")))?;

        let pipeline = Pipeline::with_params(
            ctx,
            &[BufferLayout::default()],
            &sprite::attributes(),
            shader,
            PipelineParams {
                color_blend: Some(BlendState::new(
                    Equation::Add,
                    BlendFactor::Value(BlendValue::SourceAlpha),
                    BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
                )),
                ..Default::default()
            },
        );

        let vertex_buffer = Buffer::stream(ctx, BufferType::VertexBuffer, vertex_bytes(capacity * 4));
        let index_buffer = Buffer::stream(ctx, BufferType::IndexBuffer, index_bytes(capacity * 6));
        let white = texture::white(ctx);

        let bindings = Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: vec![white],
        };

        log::info!("Created sprite renderer with room for {capacity} sprites");

        Ok(Self {
            pipeline,
            bindings,
            texture: BoundTexture { texture: white, owned: true },
        })
    }

    /// Set the texture to draw sprites with. The caller keeps ownership of it. If the renderer's
    /// own white texture was bound, it's freed.
    pub fn set_texture(&mut self, texture: Texture) {
        if let Some(previous) = self.texture.replace(texture) {
            previous.delete();
        }
        self.bindings.images[0] = texture;
    }

    /// Draw a mesh with the given view and projection. Has to be called inside a render pass.
    pub fn draw(&mut self, ctx: &mut Context, uniforms: &sprite::Uniforms, mesh: &SpriteMesh) {
        if mesh.is_empty() {
            return;
        }

        self.reserve(ctx, mesh);

        self.bindings.vertex_buffers[0].update(ctx, &mesh.vertices);
        self.bindings.index_buffer.update(ctx, &mesh.indices);

        ctx.apply_pipeline(&self.pipeline);
        ctx.apply_bindings(&self.bindings);
        ctx.apply_uniforms(uniforms);
        ctx.draw(0, mesh.indices.len() as i32, 1);
    }

    /// Reallocate the buffers if the mesh is bigger than they are.
    fn reserve(&mut self, ctx: &mut Context, mesh: &SpriteMesh) {
        if let Some(size) = grown_size(vertex_bytes(mesh.vertices.len()), self.bindings.vertex_buffers[0].size()) {
            log::info!("Sprite vertex buffer too small, reallocating for {} vertices", mesh.vertices.len());

            self.bindings.vertex_buffers[0].delete();
            self.bindings.vertex_buffers[0] = Buffer::stream(ctx, BufferType::VertexBuffer, size);
        }

        if let Some(size) = grown_size(index_bytes(mesh.indices.len()), self.bindings.index_buffer.size()) {
            log::info!("Sprite index buffer too small, reallocating for {} indices", mesh.indices.len());

            self.bindings.index_buffer.delete();
            self.bindings.index_buffer = Buffer::stream(ctx, BufferType::IndexBuffer, size);
        }
    }
}

impl Drop for SpriteRenderer {
    fn drop(&mut self) {
        for buffer in &self.bindings.vertex_buffers {
            buffer.delete();
        }
        self.bindings.index_buffer.delete();

        if let Some(texture) = self.texture.owned() {
            texture.delete();
        }
    }
}

/// The size to reallocate a buffer of `current` bytes to, if `required` bytes don't fit.
fn grown_size(required: usize, current: usize) -> Option<usize> {
    (required > current).then_some(required)
}

fn vertex_bytes(vertices: usize) -> usize {
    vertices * std::mem::size_of::<SpriteVertex>()
}

fn index_bytes(indices: usize) -> usize {
    indices * std::mem::size_of::<u16>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_grow_only_when_overfull() {
        let full = vertex_bytes(4 * 16);
        assert_eq!(grown_size(full, full), None);
        assert_eq!(grown_size(full - 1, full), None);
        assert_eq!(grown_size(vertex_bytes(4 * 16 + 1), full), Some(full + 52));
    }

    #[test]
    fn index_buffer_sizes() {
        let full = index_bytes(6 * MAX_SPRITES);
        assert_eq!(full, 6 * MAX_SPRITES * 2);
        assert_eq!(grown_size(full, full), None);
        assert_eq!(grown_size(index_bytes(6 * MAX_SPRITES + 1), full), Some(full + 2));
    }

    #[test]
    fn replacing_default_texture_frees_it() {
        let mut bound = BoundTexture { texture: 1u32, owned: true };
        assert_eq!(bound.owned(), Some(1));

        assert_eq!(bound.replace(2), Some(1));
        assert_eq!(bound.texture, 2);
        assert_eq!(bound.owned(), None);
    }

    #[test]
    fn caller_textures_are_never_freed() {
        let mut bound = BoundTexture { texture: 2u32, owned: false };
        assert_eq!(bound.replace(3), None);
        assert_eq!(bound.replace(4), None);
        assert_eq!(bound.owned(), None);
    }
}
