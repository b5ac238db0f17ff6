use std::f32::consts::TAU;

use glam::{Vec2, Vec3, Vec4};
use miniquad::*;
use rand::Rng;

use crate::batch::{Sprite, SpriteBatch};
use crate::drawable::Drawable;
use crate::error::SpriteError;
use crate::renderer::SpriteRenderer;
use crate::shaders::sprite::Uniforms;
use crate::texture;
use crate::types::UvRect;

/// The checkerboard texture size.
const TEX_SIZE: u16 = 64;

/// The checkerboard cell size, in pixels.
const TEX_CELL: usize = 8;

/// Sprite side lengths, in world units.
const MIN_SPRITE_SIZE: f32 = 8.0;
const MAX_SPRITE_SIZE: f32 = 48.0;

/// Spin speed range, in radians per second.
const MAX_SPIN: f32 = 2.0;

/// A sprite in the field and how fast it spins.
#[derive(Copy, Clone, Debug)]
pub struct Spinner {
    pub sprite: Sprite,
    pub spin: f32,
}

/// Scatter `count` randomly sized, tinted and rotated sprites over a rectangle of `extent` world
/// units centred on the origin. Roughly one in eight glows with an additive color.
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: Vec2) -> Vec<Spinner> {
    let half = extent * 0.5;

    (0..count).map(|i| {
        let position = Vec3::new(
            rng.gen_range(-half.x..=half.x),
            rng.gen_range(-half.y..=half.y),
            rng.gen_range(-1.0..1.0),
        );
        let size = Vec2::splat(rng.gen_range(MIN_SPRITE_SIZE..MAX_SPRITE_SIZE));
        let color = Vec4::new(rng.gen_range(0.3..1.0), rng.gen_range(0.3..1.0),
                              rng.gen_range(0.3..1.0), rng.gen_range(0.6..1.0));
        let additive = if rng.gen_ratio(1, 8) {
            Vec4::new(0.3, 0.2, 0.0, 0.0)
        }
        else {
            Vec4::ZERO
        };

        // Alternate between the two halves of the checkerboard so the uv rect gets exercised.
        let uv = UvRect::grid_cell(2, 1, (i % 2) as u32, 0);

        let sprite = Sprite::new(position, size)
            .with_rotation(rng.gen_range(0.0..TAU))
            .with_color(color)
            .with_additive(additive)
            .with_uv(uv);

        Spinner { sprite, spin: rng.gen_range(-MAX_SPIN..MAX_SPIN) }
    }).collect()
}

/// A field of spinning sprites, drawn in a single batch.
pub struct SpriteField {
    renderer: SpriteRenderer,
    texture: Texture,
    batch: SpriteBatch,
    spins: Vec<f32>,
}

impl SpriteField {
    /// Create a new field that renders via the given miniquad context.
    pub fn new<R: Rng + ?Sized>(ctx: &mut Context, rng: &mut R, capacity: usize, count: usize,
                                extent: Vec2) -> Result<Self, SpriteError> {
        let mut renderer = SpriteRenderer::new(ctx, capacity)?;
        let texture = texture::checkerboard(ctx, TEX_SIZE, TEX_CELL,
                                            [0xFF, 0xFF, 0xFF, 0xFF],
                                            [0x80, 0x80, 0x80, 0xFF]);
        renderer.set_texture(texture);

        let mut field = Self {
            renderer,
            texture,
            batch: SpriteBatch::with_capacity(count),
            spins: Vec::with_capacity(count),
        };
        field.reseed(rng, count, extent)?;
        Ok(field)
    }

    /// Throw away the current sprites and scatter new ones.
    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, extent: Vec2)
        -> Result<(), SpriteError>
    {
        self.batch.clear();
        self.spins.clear();

        for Spinner { sprite, spin } in scatter(rng, count, extent) {
            self.batch.push(sprite)?;
            self.spins.push(spin);
        }

        log::debug!("Scattered {} sprites", self.batch.len());
        Ok(())
    }
}

impl Drop for SpriteField {
    /// The renderer only borrows the checkerboard, so it's freed here.
    fn drop(&mut self) {
        self.texture.delete();
    }
}

impl Drawable for SpriteField {
    /// Spin every sprite.
    fn update(&mut self, _ctx: &mut Context, time_delta: f64) {
        let time_delta = time_delta as f32;
        for (sprite, spin) in self.batch.iter_mut().zip(&self.spins) {
            sprite.rotation = (sprite.rotation + spin * time_delta).rem_euclid(TAU);
        }
    }

    /// Draw the field.
    fn draw(&mut self, ctx: &mut Context, uniforms: &Uniforms) {
        let mesh = self.batch.build();
        self.renderer.draw(ctx, uniforms, &mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn scatter_stays_in_extent() {
        let mut rng = StdRng::seed_from_u64(7);
        let extent = Vec2::new(200.0, 100.0);
        let spinners = scatter(&mut rng, 256, extent);

        assert_eq!(spinners.len(), 256);
        for Spinner { sprite, spin } in &spinners {
            assert!(sprite.position.x.abs() <= 100.0);
            assert!(sprite.position.y.abs() <= 50.0);
            assert!(sprite.size.x >= MIN_SPRITE_SIZE && sprite.size.x < MAX_SPRITE_SIZE);
            assert!(spin.abs() <= MAX_SPIN);
            assert!(sprite.visible);
        }
    }

    #[test]
    fn scatter_is_deterministic_per_seed() {
        let a = scatter(&mut StdRng::seed_from_u64(3), 16, Vec2::splat(100.0));
        let b = scatter(&mut StdRng::seed_from_u64(3), 16, Vec2::splat(100.0));
        let sprites = |spinners: &[Spinner]| spinners.iter().map(|s| s.sprite).collect::<Vec<_>>();
        assert_eq!(sprites(&a), sprites(&b));
    }
}
