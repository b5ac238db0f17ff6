use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::shaders::sprite::Uniforms;

/// An orthographic camera for sprites. One world unit is one pixel at zoom 1, and the camera
/// position is at the centre of the viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera2d {
    /// The world position at the centre of the viewport.
    pub position: Vec2,

    /// Magnification, values above 1 zoom in.
    pub zoom: f32,

    /// Counter-clockwise rotation of the camera in radians.
    pub rotation: f32,

    /// The viewport size in pixels.
    pub viewport: Vec2,

    /// The near and far planes. The vertex stage puts every sprite at z = 0, so the range has to
    /// contain it. Sprites aren't culled by these unless the batch is built with
    /// `SpriteBatch::build_in_depth(camera.near, camera.far)`.
    pub near: f32,
    pub far: f32,
}

impl Camera2d {
    pub fn new(width: f32, height: f32) -> Camera2d {
        Camera2d {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            viewport: Vec2::new(width, height),
            near: -1.0,
            far: 1.0,
        }
    }

    /// Whether a sprite at depth `z` is inside the camera's clip range, `near <= z < far`.
    pub fn is_inside(&self, z: f32) -> bool {
        z >= self.near && z < self.far
    }

    /// Update the viewport, e.g. after the window is resized.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Multiply the zoom by a factor, keeping it positive.
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).max(f32::EPSILON);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_rotation_z(-self.rotation)
            * Mat4::from_translation(-self.position.extend(0.0))
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let half = self.viewport * 0.5;
        Mat4::orthographic_rh_gl(-half.x, half.x, -half.y, half.y, self.near, self.far)
    }

    /// The uniform block for drawing through this camera.
    pub fn uniforms(&self) -> Uniforms {
        Uniforms {
            view: self.view_matrix(),
            proj: self.projection_matrix(),
        }
    }

    /// Convert a window position in pixels (origin top left, y down) to a world position.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let ndc = Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        );

        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let world = inverse * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        world.truncate().truncate() / world.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform;
    use crate::types::SpriteVertex;
    use std::f32::consts::FRAC_PI_2;

    fn clip_xy(camera: &Camera2d, world: Vec2) -> Vec2 {
        let vertex = SpriteVertex { position: [world.x, world.y, 0.0], ..Default::default() };
        let clip = transform::apply(&vertex, &camera.uniforms()).clip;
        Vec2::new(clip.x, clip.y) / clip.w
    }

    #[test]
    fn camera_position_maps_to_centre() {
        let mut camera = Camera2d::new(800.0, 600.0);
        camera.position = Vec2::new(100.0, -50.0);
        assert!(clip_xy(&camera, camera.position).abs_diff_eq(Vec2::ZERO, 1e-6));
    }

    #[test]
    fn viewport_edges_map_to_clip_edges() {
        let camera = Camera2d::new(800.0, 600.0);
        assert!(clip_xy(&camera, Vec2::new(400.0, 300.0)).abs_diff_eq(Vec2::ONE, 1e-6));
        assert!(clip_xy(&camera, Vec2::new(-400.0, -300.0)).abs_diff_eq(-Vec2::ONE, 1e-6));
    }

    #[test]
    fn zoom_magnifies() {
        let mut camera = Camera2d::new(800.0, 600.0);
        camera.zoom_by(2.0);
        assert!(clip_xy(&camera, Vec2::new(200.0, 150.0)).abs_diff_eq(Vec2::ONE, 1e-6));
    }

    #[test]
    fn zoom_stays_positive() {
        let mut camera = Camera2d::new(800.0, 600.0);
        camera.zoom_by(0.0);
        assert!(camera.zoom > 0.0);
    }

    #[test]
    fn rotation_is_counter_clockwise() {
        let mut camera = Camera2d::new(200.0, 200.0);
        camera.rotation = FRAC_PI_2;

        // With the camera turned a quarter to the left, world up appears on the right.
        assert!(clip_xy(&camera, Vec2::new(0.0, 100.0)).abs_diff_eq(Vec2::new(1.0, 0.0), 1e-5));
    }

    #[test]
    fn sprites_lie_inside_clip_depth() {
        let camera = Camera2d::new(800.0, 600.0);
        let vertex = SpriteVertex { position: [0.0, 0.0, 500.0], ..Default::default() };
        let clip = transform::apply(&vertex, &camera.uniforms()).clip;
        assert!(clip.z.abs() <= clip.w);
    }

    #[test]
    fn clip_range_is_half_open() {
        let camera = Camera2d::new(800.0, 600.0);
        assert!(camera.is_inside(-1.0));
        assert!(camera.is_inside(0.0));
        assert!(!camera.is_inside(1.0));
        assert!(!camera.is_inside(f32::NAN));
    }

    #[test]
    fn screen_to_world_inverts_camera() {
        let mut camera = Camera2d::new(800.0, 600.0);
        camera.position = Vec2::new(30.0, 40.0);
        camera.zoom = 2.0;

        assert!(camera.screen_to_world(Vec2::new(400.0, 300.0)).abs_diff_eq(camera.position, 1e-3));

        // Top left of the window, half the viewport away in world units at zoom 2.
        let top_left = camera.screen_to_world(Vec2::ZERO);
        assert!(top_left.abs_diff_eq(Vec2::new(30.0 - 200.0, 40.0 + 150.0), 1e-3));
    }
}
