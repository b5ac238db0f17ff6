use thiserror::Error;

/// Errors from setting up or feeding the sprite pipeline. The vertex stage itself can't fail.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("Failed to compile sprite shader: {0}")]
    Shader(String),

    #[error("Sprite batch is full ({capacity} sprites)")]
    BatchFull { capacity: usize },

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}
