use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("target frame rate must be positive and finite, got {fps}")]
    NonPositiveRate { fps: f64 },

    #[error("animation speed must be finite, got {speed}")]
    NonFiniteSpeed { speed: f64 },

    #[error("mask cutoff must lie strictly between 0 and 1, got {cutoff}")]
    CutoffOutOfRange { cutoff: f64 },

    #[error("buffer capacity must be > 0")]
    ZeroCapacity,
}

/// Validated animation parameters. Simulated time advances as
/// `t = index * speed / fps`, so one wall-clock second at the target rate maps
/// to `speed` simulated seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub fps: f64,
    pub speed: f64,
    pub mask_cutoff: f64,
    pub buffer_capacity: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: 20.0,
            speed: 1.0,
            mask_cutoff: crate::core::frame::DEFAULT_MASK_CUTOFF,
            buffer_capacity: 64,
        }
    }
}

impl AnimationConfig {
    pub fn builder() -> AnimationConfigBuilder {
        AnimationConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::NonPositiveRate { fps: self.fps });
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::NonFiniteSpeed { speed: self.speed });
        }
        if !(self.mask_cutoff > 0.0 && self.mask_cutoff < 1.0) {
            return Err(ConfigError::CutoffOutOfRange {
                cutoff: self.mask_cutoff,
            });
        }
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Target interval between delivered frames, `dt = 1/fps`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }

    /// Simulated time driven by the monotone frame index.
    pub fn simulated_time(&self, index: u64) -> f64 {
        index as f64 * self.speed / self.fps
    }
}

#[derive(Debug, Default, Clone)]
pub struct AnimationConfigBuilder {
    fps: Option<f64>,
    speed: Option<f64>,
    mask_cutoff: Option<f64>,
    buffer_capacity: Option<usize>,
}

impl AnimationConfigBuilder {
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
    pub fn mask_cutoff(mut self, cutoff: f64) -> Self {
        self.mask_cutoff = Some(cutoff);
        self
    }
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    /// Fill unset fields from the defaults, then validate.
    pub fn build(self) -> Result<AnimationConfig, ConfigError> {
        let defaults = AnimationConfig::default();
        let config = AnimationConfig {
            fps: self.fps.unwrap_or(defaults.fps),
            speed: self.speed.unwrap_or(defaults.speed),
            mask_cutoff: self.mask_cutoff.unwrap_or(defaults.mask_cutoff),
            buffer_capacity: self.buffer_capacity.unwrap_or(defaults.buffer_capacity),
        };
        config.validate()?;
        Ok(config)
    }
}
