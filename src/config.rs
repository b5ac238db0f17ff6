use std::str::FromStr;

use miniquad::conf;

use crate::batch::MAX_SPRITES;
use crate::error::SpriteError;

/// Prefix of the environment variables read by `RenderConfig::from_env`.
pub const ENV_PREFIX: &str = "SPRITES_";

/// Window and renderer settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    pub high_dpi: bool,

    /// How many sprites the renderer's buffers hold before they have to grow.
    pub sprite_capacity: usize,

    /// How many sprites the demo scene spawns.
    pub sprite_count: usize,

    pub clear_color: [f32; 4],

    /// An `env_logger` filter, overriding `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_title: "Sprites".to_owned(),
            window_width: 800,
            window_height: 800,
            high_dpi: false,
            sprite_capacity: 1024,
            sprite_count: 500,
            clear_color: [0.1, 0.1, 0.15, 1.0],
            log_filter: None,
        }
    }
}

impl RenderConfig {
    /// The defaults, overridden by any `SPRITES_*` environment variables.
    pub fn from_env() -> Result<Self, SpriteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The defaults, overridden by whatever `lookup` returns for each `SPRITES_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SpriteError>
        where F: Fn(&str) -> Option<String>
    {
        let mut config = Self::default();
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(title) = get("WINDOW_TITLE") {
            config.window_title = title;
        }
        if let Some(width) = get("WINDOW_WIDTH") {
            config.window_width = parse("WINDOW_WIDTH", &width)?;
        }
        if let Some(height) = get("WINDOW_HEIGHT") {
            config.window_height = parse("WINDOW_HEIGHT", &height)?;
        }
        if let Some(high_dpi) = get("HIGH_DPI") {
            config.high_dpi = parse("HIGH_DPI", &high_dpi)?;
        }
        if let Some(capacity) = get("CAPACITY") {
            config.sprite_capacity = parse("CAPACITY", &capacity)?;
        }
        if let Some(count) = get("COUNT") {
            config.sprite_count = parse("COUNT", &count)?;
        }
        if let Some(filter) = get("LOG") {
            config.log_filter = Some(filter);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), SpriteError> {
        if self.window_width <= 0 {
            return Err(invalid(&format!("{ENV_PREFIX}WINDOW_WIDTH"), "must be positive"));
        }
        if self.window_height <= 0 {
            return Err(invalid(&format!("{ENV_PREFIX}WINDOW_HEIGHT"), "must be positive"));
        }
        if self.sprite_capacity == 0 || self.sprite_capacity > MAX_SPRITES {
            return Err(invalid(&format!("{ENV_PREFIX}CAPACITY"),
                               &format!("must be between 1 and {MAX_SPRITES}")));
        }
        if self.sprite_count > MAX_SPRITES {
            return Err(invalid(&format!("{ENV_PREFIX}COUNT"),
                               &format!("must be at most {MAX_SPRITES}")));
        }
        Ok(())
    }

    /// Create the miniquad window config.
    pub fn to_conf(&self) -> conf::Conf {
        conf::Conf {
            window_title: self.window_title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
            high_dpi: self.high_dpi,
            ..Default::default()
        }
    }
}

fn parse<T: FromStr>(name: &str, value: &str) -> Result<T, SpriteError>
    where T::Err: std::fmt::Display
{
    value.trim().parse().map_err(|err: T::Err| invalid(&format!("{ENV_PREFIX}{name}"), &err.to_string()))
}

fn invalid(key: &str, reason: &str) -> SpriteError {
    SpriteError::InvalidConfig { key: key.to_owned(), reason: reason.to_owned() }
}
