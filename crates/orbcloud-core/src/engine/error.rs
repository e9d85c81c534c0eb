use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("buffer capacity must be > 0")]
    InvalidCapacity,

    #[error("target frame rate must be positive, got {fps}")]
    InvalidRate { fps: f64 },

    #[error("invalid animation configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("frame computation failed at index {index}: {message}")]
    Frame { index: u64, message: String },

    #[error("failed to spawn engine thread: {0}")]
    Thread(#[from] std::io::Error),
}
