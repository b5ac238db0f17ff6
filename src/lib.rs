//! A 2D sprite pipeline built around a single vertex stage: sprite vertices carry a position,
//! a tint, an additive color and a texture coordinate, and are moved into clip space by a view
//! and a projection matrix. Only x and y of the position matter, every sprite is flattened to
//! z = 0, so draw order is decided on the cpu when batching.

pub mod batch;
pub mod camera;
pub mod config;
pub mod drawable;
pub mod error;
pub mod field;
pub mod logging;
pub mod renderer;
pub mod shaders;
pub mod texture;
pub mod transform;
pub mod types;

pub use batch::{Sprite, SpriteBatch, SpriteId, SpriteMesh, MAX_SPRITES};
pub use camera::Camera2d;
pub use config::RenderConfig;
pub use error::SpriteError;
pub use renderer::SpriteRenderer;
pub use shaders::sprite::Uniforms;
pub use transform::VertexOutput;
pub use types::{SpriteVertex, UvRect};
