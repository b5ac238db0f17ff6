use miniquad::Context;

use crate::shaders::sprite::Uniforms;

/// Something that updates every frame and draws itself through a camera.
pub trait Drawable {
    fn update(&mut self, ctx: &mut Context, time_delta: f64);
    fn draw(&mut self, ctx: &mut Context, uniforms: &Uniforms);
}
