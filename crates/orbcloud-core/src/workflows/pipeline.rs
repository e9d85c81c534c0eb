use crate::core::frame::{Frame, Scatter, Volume, DEFAULT_MASK_CUTOFF};
use crate::core::grid::{CartDims, GridError, SphDims};
use crate::core::models::{Atom, ModelError, ProbFunction, StateSpec};
use crate::core::resample::{ScatterSampler, VolumeResampler};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Everything precomputable for one atom on one grid: the bound probability
/// function plus both resampling topologies, sharing the probability function
/// behind an `Arc`. Per frame only the time phase and the gather change.
#[derive(Debug, Clone)]
pub struct Pipeline {
    scatter: ScatterSource,
    volume: VolumeSource,
}

impl Pipeline {
    /// Validate the quantum numbers and grid resolution, then precompute.
    pub fn from_specs(
        specs: impl IntoIterator<Item = (u32, u32, i32)>,
        n_radial: usize,
        n_angular: usize,
    ) -> Result<Self, PipelineError> {
        let specs = specs
            .into_iter()
            .map(|(n, l, m)| StateSpec::new(n, l, m))
            .collect::<Result<Vec<_>, _>>()?;
        let atom = Atom::from_specs(specs)?;
        let dims = SphDims::new(n_radial, n_angular)?;
        Ok(Self::build(&atom, dims))
    }

    #[instrument(skip_all, fields(states = atom.states().len()))]
    pub fn build(atom: &Atom, dims: SphDims) -> Self {
        let grid = atom.grid(dims);
        let prob = Arc::new(atom.prob_function(&grid));
        let points = grid.to_cartesian();

        let cart = CartDims::from(dims);
        info!(
            samples = grid.len(),
            voxels = cart.len(),
            n_max = atom.n_max(),
            "precomputing resampling topologies"
        );

        Self {
            scatter: ScatterSource {
                prob: Arc::clone(&prob),
                sampler: ScatterSampler::new(&points),
                mask_cutoff: DEFAULT_MASK_CUTOFF,
            },
            volume: VolumeSource {
                prob,
                resampler: VolumeResampler::build(&points, cart),
                mask_cutoff: DEFAULT_MASK_CUTOFF,
            },
        }
    }

    pub fn scatter(&self) -> &ScatterSource {
        &self.scatter
    }

    pub fn volume(&self) -> &VolumeSource {
        &self.volume
    }

    pub fn into_scatter(self) -> ScatterSource {
        self.scatter
    }

    pub fn into_volume(self) -> VolumeSource {
        self.volume
    }
}

/// Free-function spelling of [`Pipeline::build`].
pub fn build_pipeline(atom: &Atom, dims: SphDims) -> Pipeline {
    Pipeline::build(atom, dims)
}

/// Scatter frames straight off the spherical sample points.
#[derive(Debug, Clone)]
pub struct ScatterSource {
    prob: Arc<ProbFunction>,
    sampler: ScatterSampler,
    mask_cutoff: f64,
}

impl ScatterSource {
    pub fn with_mask_cutoff(mut self, cutoff: f64) -> Self {
        self.mask_cutoff = cutoff;
        self
    }

    /// Masked point cloud of the density at simulated time `t`.
    pub fn value_at(&self, t: f64) -> Scatter {
        self.sampler.sample(&self.prob.val(t)).masked(self.mask_cutoff)
    }

    pub fn frame_at(&self, t: f64) -> Frame {
        Frame::Scatter(self.value_at(t))
    }

    pub fn beat_period(&self) -> Option<f64> {
        self.prob.beat_period()
    }
}

/// Dense voxel frames through the precomputed k-NN topology.
#[derive(Debug, Clone)]
pub struct VolumeSource {
    prob: Arc<ProbFunction>,
    resampler: VolumeResampler,
    mask_cutoff: f64,
}

impl VolumeSource {
    pub fn with_mask_cutoff(mut self, cutoff: f64) -> Self {
        self.mask_cutoff = cutoff;
        self
    }

    pub fn dims(&self) -> CartDims {
        self.resampler.dims()
    }

    /// Masked voxel grid of the density at simulated time `t`.
    pub fn value_at(&self, t: f64) -> Volume {
        self.resampler.resample(&self.prob.val(t)).masked(self.mask_cutoff)
    }

    pub fn frame_at(&self, t: f64) -> Frame {
        Frame::Volume(self.value_at(t))
    }

    pub fn beat_period(&self) -> Option<f64> {
        self.prob.beat_period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::AnimationConfig;

    #[test]
    fn invalid_quantum_numbers_fail_before_any_precomputation() {
        let result = Pipeline::from_specs([(1, 1, 0)], 8, 6);
        assert!(matches!(result, Err(PipelineError::Model(_))));
    }

    #[test]
    fn empty_grid_dimension_is_rejected() {
        let result = Pipeline::from_specs([(1, 0, 0)], 0, 6);
        assert!(matches!(result, Err(PipelineError::Grid(_))));
    }

    #[test]
    fn scatter_frames_are_finite_and_masked() {
        let pipeline = Pipeline::from_specs([(1, 0, 0), (2, 1, 0)], 10, 8).unwrap();
        let scatter = pipeline.scatter().value_at(0.0);
        assert!(!scatter.is_empty());
        assert!(scatter.values.iter().all(|v| v.is_finite() && *v >= 0.0));

        let threshold = DEFAULT_MASK_CUTOFF * scatter.max_value();
        assert!(scatter.values.iter().all(|v| *v > threshold));
    }

    #[test]
    fn single_state_volume_is_stationary() {
        let pipeline = Pipeline::from_specs([(2, 1, 0)], 10, 8).unwrap();
        let source = pipeline.volume();

        let a = source.value_at(1.0);
        let b = source.value_at(42.5);
        let max = a.max_value().max(1.0);
        for (x, y) in a.data.iter().zip(b.data.iter()) {
            assert!((x - y).abs() < 1e-9 * max, "stationary state drifted");
        }
    }

    #[test]
    fn two_state_volume_changes_within_a_beat_period() {
        let pipeline = Pipeline::from_specs([(1, 0, 0), (2, 1, 0)], 10, 8).unwrap();
        let source = pipeline.volume();
        let period = source.beat_period().unwrap();

        let a = source.value_at(0.0);
        let b = source.value_at(period / 2.0);
        let diff = a
            .data
            .iter()
            .zip(b.data.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0_f64, f64::max);
        assert!(diff > 0.0, "superposition density did not evolve");
    }

    #[test]
    fn default_grid_superposition_produces_finite_frames() {
        // The CLI's default resolution, both paths, at the default frame rate.
        let pipeline = Pipeline::from_specs([(1, 0, 0), (2, 1, 0)], 60, 50).unwrap();
        let config = AnimationConfig::builder().fps(20.0).build().unwrap();

        let mut last_t = f64::NEG_INFINITY;
        for i in 0..5 {
            let t = config.simulated_time(i);
            assert!(t > last_t, "simulated time not increasing at frame {i}");
            assert!((t - i as f64 * 0.05).abs() < 1e-12);
            last_t = t;

            let scatter = pipeline.scatter().value_at(t);
            assert!(!scatter.is_empty());
            assert!(scatter.values.iter().all(|v| v.is_finite() && *v >= 0.0));
        }

        let volume = pipeline.volume().value_at(0.0);
        assert_eq!(volume.shape(), (53, 53, 53));
        assert!(volume.data.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn sources_share_one_probability_function() {
        let pipeline = Pipeline::from_specs([(2, 1, 1)], 8, 6).unwrap();
        assert!(Arc::ptr_eq(&pipeline.scatter.prob, &pipeline.volume.prob));
    }
}
