use glam::{Vec2, Vec3, Vec4};

/// A sprite vertex, laid out for uploading to the gpu. The fields are plain float arrays rather
/// than glam vectors so the struct stays tightly packed, glam's Vec4 is 16-byte aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpriteVertex {
    /// Object-space position. The vertex shader discards z.
    pub position: [f32; 3],

    /// Primary color, multiplied with the texture.
    pub color: [f32; 4],

    /// Additive color, added after the texture is modulated.
    pub additive: [f32; 4],

    /// Texture coordinate.
    pub texcoord: [f32; 2],
}

impl SpriteVertex {
    pub fn new(position: Vec3, color: Vec4, additive: Vec4, texcoord: Vec2) -> SpriteVertex {
        SpriteVertex {
            position: position.to_array(),
            color: color.to_array(),
            additive: additive.to_array(),
            texcoord: texcoord.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// An axis-aligned rectangle in texture space, with `min` at the top-left of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl UvRect {
    /// The whole texture.
    pub const FULL: UvRect = UvRect { min: Vec2::ZERO, max: Vec2::ONE };

    /// The cell at `(column, row)` of a texture atlas divided into `columns` x `rows` cells.
    pub fn grid_cell(columns: u32, rows: u32, column: u32, row: u32) -> UvRect {
        let cell = Vec2::new(1.0 / columns.max(1) as f32, 1.0 / rows.max(1) as f32);
        let min = Vec2::new(column as f32 * cell.x, row as f32 * cell.y);
        UvRect { min, max: min + cell }
    }

    /// Map a point in the unit square (y up) to texture space (t down).
    pub fn lerp(&self, unit: Vec2) -> Vec2 {
        Vec2::new(
            self.min.x + (self.max.x - self.min.x) * unit.x,
            self.min.y + (self.max.y - self.min.y) * (1.0 - unit.y),
        )
    }
}

impl Default for UvRect {
    fn default() -> Self {
        UvRect::FULL
    }
}
