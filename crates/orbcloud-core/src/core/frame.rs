//! Immutable per-frame value types handed from the producer to the renderer.
//!
//! Masking is copy-on-mask: `masked` returns a fresh value, the input is never
//! mutated. The cutoff is relative to the frame's own maximum, so the absolute
//! (unnormalized) scale of the wavefunction cancels.

use nalgebra::Point3;
use ndarray::Array3;

/// Relative intensity cutoff used by `masked_default`: 0.1% of the frame maximum.
pub const DEFAULT_MASK_CUTOFF: f64 = 1e-3;

/// Irregular point cloud: positions with one scalar intensity each.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub positions: Vec<Point3<f64>>,
    pub values: Vec<f64>,
}

impl Scatter {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0_f64, f64::max)
    }

    /// New scatter keeping only points strictly above `cutoff * max`.
    /// Idempotent: the surviving maximum is unchanged, so re-masking with the
    /// same cutoff drops nothing further.
    pub fn masked(&self, cutoff: f64) -> Scatter {
        let threshold = cutoff * self.max_value();
        let (positions, values) = self
            .positions
            .iter()
            .zip(self.values.iter())
            .filter(|&(_, &v)| v > threshold)
            .map(|(&p, &v)| (p, v))
            .unzip();
        Scatter { positions, values }
    }

    pub fn masked_default(&self) -> Scatter {
        self.masked(DEFAULT_MASK_CUTOFF)
    }
}

/// Dense scalar intensity over a regular voxel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub data: Array3<f64>,
}

impl Volume {
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn max_value(&self) -> f64 {
        self.data.iter().cloned().fold(0.0_f64, f64::max)
    }

    /// New volume with cells at or below `cutoff * max` zeroed.
    pub fn masked(&self, cutoff: f64) -> Volume {
        let threshold = cutoff * self.max_value();
        Volume {
            data: self.data.mapv(|v| if v > threshold { v } else { 0.0 }),
        }
    }

    pub fn masked_default(&self) -> Volume {
        self.masked(DEFAULT_MASK_CUTOFF)
    }
}

/// What the frame stream transports: one renderable value per simulated instant.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Scatter(Scatter),
    Volume(Volume),
}
