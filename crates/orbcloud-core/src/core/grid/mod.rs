//! Spherical sampling grids and their Cartesian projection.
//!
//! A grid is built once per atom/resolution pair and reused for every animation
//! frame; only the probability values change over time, never the geometry.

mod coords;
mod dims;

pub use coords::{CartPoints, SphGrid};
pub use dims::{CartDims, SphDims};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GridError {
    #[error("grid dimension '{name}' must be > 0")]
    EmptyDimension { name: &'static str },
}
