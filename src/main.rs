use std::error::Error;

use glam::Vec2;
use miniquad::*;
use rand::{rngs::StdRng, SeedableRng};

use sprites::drawable::Drawable;
use sprites::field::SpriteField;
use sprites::{logging, Camera2d, RenderConfig};

/// How much one notch of the mouse wheel zooms.
const ZOOM_STEP: f32 = 1.1;

/// The event handler that renders the sprite field via miniquad.
pub struct Stage {
    config: RenderConfig,
    camera: Camera2d,
    field: SpriteField,
    seed: u64,
    last_frame: f64,
}

impl Stage {
    pub fn new(ctx: &mut Context, config: RenderConfig) -> Result<Stage, Box<dyn Error>> {
        let (width, height) = ctx.screen_size();
        let camera = Camera2d::new(width, height);

        let seed = 3;
        log::info!("Scattering {} sprites with seed {seed}", config.sprite_count);
        let mut rng = StdRng::seed_from_u64(seed);
        let field = SpriteField::new(ctx, &mut rng, config.sprite_capacity, config.sprite_count,
                                     camera.viewport)?;

        Ok(Stage {
            config,
            camera,
            field,
            seed,
            last_frame: date::now(),
        })
    }

    fn reseed(&mut self) -> Result<(), Box<dyn Error>> {
        self.seed += 1;
        log::info!("Scattering {} sprites with seed {}", self.config.sprite_count, self.seed);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let extent = self.camera.viewport / self.camera.zoom;
        self.field.reseed(&mut rng, self.config.sprite_count, extent)?;
        Ok(())
    }
}

impl EventHandler for Stage {
    fn update(&mut self, ctx: &mut Context) {
        let now = date::now();
        let time_delta = now - self.last_frame;
        self.last_frame = now;

        self.field.update(ctx, time_delta);
    }

    fn draw(&mut self, ctx: &mut Context) {
        let [r, g, b, a] = self.config.clear_color;
        ctx.begin_default_pass(PassAction::clear_color(r, g, b, a));

        let uniforms = self.camera.uniforms();
        self.field.draw(ctx, &uniforms);

        ctx.end_render_pass();
        ctx.commit_frame();
    }

    fn resize_event(&mut self, _ctx: &mut Context, width: f32, height: f32) {
        log::debug!("Resized to {width}x{height}");
        self.camera.set_viewport(width, height);
    }

    fn mouse_wheel_event(&mut self, _ctx: &mut Context, _x: f32, y: f32) {
        if y > 0.0 {
            self.camera.zoom_by(ZOOM_STEP);
        }
        else if y < 0.0 {
            self.camera.zoom_by(1.0 / ZOOM_STEP);
        }
    }

    fn mouse_button_down_event(&mut self, _ctx: &mut Context, button: MouseButton, x: f32, y: f32) {
        if button == MouseButton::Left {
            self.camera.position = self.camera.screen_to_world(Vec2::new(x, y));
            log::debug!("Centred camera on {:?}", self.camera.position);
        }
    }

    fn key_down_event(&mut self, ctx: &mut Context, keycode: KeyCode, _keymods: KeyMods, _repeat: bool) {
        if keycode == KeyCode::Escape {
            ctx.quit();
        }
        else if let Err(err) = self.reseed() {
            log::error!("Failed to reseed sprites: {err}");
        }
    }
}

fn main() {
    let config = match RenderConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    // Initialize logging.
    logging::init(config.log_filter.as_deref());
    log::info!("Starting with {config:?}");

    miniquad::start(config.to_conf(), move |ctx| {
        match Stage::new(ctx, config) {
            Ok(stage) => Box::new(stage),
            Err(err) => {
                log::error!("Failed to create stage: {err}");
                std::process::exit(1);
            }
        }
    });
}
