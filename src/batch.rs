use glam::{Mat2, Vec2, Vec3, Vec4};

use crate::error::SpriteError;
use crate::types::{SpriteVertex, UvRect};

/// The most sprites a single batch can hold, limited by 16-bit indices with four vertices each.
pub const MAX_SPRITES: usize = (u16::MAX as usize + 1) / 4;

/// Corners of a quad in the unit square, counter-clockwise from the bottom left.
const CORNERS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Index pattern for one quad.
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// A single textured quad.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sprite {
    /// World position of the pivot. z only decides draw order, the vertex stage flattens it.
    pub position: Vec3,

    /// Size in world units.
    pub size: Vec2,

    /// The point the sprite is positioned and rotated around, in the unit square (y up).
    pub pivot: Vec2,

    /// Counter-clockwise rotation in radians.
    pub rotation: f32,

    /// Tint, multiplied with the texture.
    pub color: Vec4,

    /// Added to the tinted texture color.
    pub additive: Vec4,

    /// The region of the texture to draw.
    pub uv: UvRect,

    pub visible: bool,
}

impl Sprite {
    pub fn new(position: Vec3, size: Vec2) -> Sprite {
        Sprite {
            position,
            size,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Sprite {
        self.color = color;
        self
    }

    pub fn with_additive(mut self, additive: Vec4) -> Sprite {
        self.additive = additive;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Sprite {
        self.rotation = rotation;
        self
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Sprite {
        self.pivot = pivot;
        self
    }

    pub fn with_uv(mut self, uv: UvRect) -> Sprite {
        self.uv = uv;
        self
    }

    /// The four vertices of the sprite's quad, in `CORNERS` order.
    pub fn vertices(&self) -> [SpriteVertex; 4] {
        let rotation = Mat2::from_angle(self.rotation);
        let origin = self.position.truncate();

        CORNERS.map(|corner| {
            let local = (corner - self.pivot) * self.size;
            let world = origin + rotation * local;
            SpriteVertex::new(world.extend(self.position.z), self.color, self.additive,
                              self.uv.lerp(corner))
        })
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Sprite {
            position: Vec3::ZERO,
            size: Vec2::ONE,
            pivot: Vec2::splat(0.5),
            rotation: 0.0,
            color: Vec4::ONE,
            additive: Vec4::ZERO,
            uv: UvRect::FULL,
            visible: true,
        }
    }
}

/// Identifies a sprite within the batch it was pushed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(usize);

/// Vertex and index data ready to upload for one draw call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteMesh {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u16>,
}

impl SpriteMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The number of sprites in the mesh.
    pub fn quads(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// A bounded collection of sprites that are drawn together with one texture.
#[derive(Clone, Debug)]
pub struct SpriteBatch {
    sprites: Vec<Sprite>,
    capacity: usize,
}

impl SpriteBatch {
    /// Create a new batch. The capacity is clamped to `MAX_SPRITES`.
    pub fn with_capacity(capacity: usize) -> SpriteBatch {
        let capacity = capacity.min(MAX_SPRITES);
        SpriteBatch {
            sprites: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Add a sprite, failing if the batch is already full.
    pub fn push(&mut self, sprite: Sprite) -> Result<SpriteId, SpriteError> {
        if self.sprites.len() >= self.capacity {
            return Err(SpriteError::BatchFull { capacity: self.capacity });
        }

        self.sprites.push(sprite);
        Ok(SpriteId(self.sprites.len() - 1))
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    /// Remove all sprites. Previously returned ids become invalid.
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Build the mesh for all visible sprites. Sprites are emitted back to front by ascending z,
    /// keeping insertion order for equal z, since the vertex stage can't depth sort them. Nothing
    /// is culled by depth, see `build_in_depth` for that.
    pub fn build(&self) -> SpriteMesh {
        self.build_where(|_| true)
    }

    /// Like `build`, but drops sprites whose z is outside `near <= z < far`, e.g. a camera's
    /// clip range.
    pub fn build_in_depth(&self, near: f32, far: f32) -> SpriteMesh {
        self.build_where(|sprite| sprite.position.z >= near && sprite.position.z < far)
    }

    fn build_where<F>(&self, keep: F) -> SpriteMesh
        where F: Fn(&Sprite) -> bool
    {
        let mut order: Vec<&Sprite> = self.sprites.iter()
            .filter(|sprite| sprite.visible && keep(sprite))
            .collect();
        order.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));

        let mut mesh = SpriteMesh {
            vertices: Vec::with_capacity(order.len() * 4),
            indices: Vec::with_capacity(order.len() * 6),
        };

        for sprite in order {
            // Capacity is capped at MAX_SPRITES so this can't overflow.
            let base = mesh.vertices.len() as u16;
            mesh.vertices.extend_from_slice(&sprite.vertices());
            mesh.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        }

        log::debug!("Built sprite mesh with {} quads", mesh.quads());
        mesh
    }
}
