use super::{ModelError, State, StateSpec, WaveFunction};
use crate::core::grid::{SphDims, SphGrid};
use itertools::Itertools;
use ndarray::Array1;
use num_complex::Complex64;

/// An ordered, duplicate-free superposition of eigenstates.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    states: Vec<State>,
}

impl Atom {
    pub fn new(states: Vec<State>) -> Result<Self, ModelError> {
        if states.is_empty() {
            return Err(ModelError::EmptyAtom);
        }
        if let Some((a, _)) = states
            .iter()
            .tuple_combinations()
            .find(|(a, b)| a.spec() == b.spec())
        {
            return Err(ModelError::DuplicateState { spec: a.spec() });
        }
        Ok(Self { states })
    }

    /// Build an atom straight from quantum-number triples.
    pub fn from_specs(specs: impl IntoIterator<Item = StateSpec>) -> Result<Self, ModelError> {
        let states = specs
            .into_iter()
            .map(State::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(states)
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Constituent specs, preserving construction order.
    pub fn specs(&self) -> Vec<StateSpec> {
        self.states.iter().map(State::spec).collect()
    }

    /// Largest principal quantum number; sizes the grid extent.
    pub fn n_max(&self) -> u32 {
        self.states
            .iter()
            .map(|s| s.spec().n())
            .max()
            .unwrap_or(1)
    }

    /// Spherical grid sized to this atom's extent.
    pub fn grid(&self, dims: SphDims) -> SphGrid {
        SphGrid::build(self.n_max(), dims)
    }

    /// Bind the superposition to a grid: evaluates each state's wavefunction
    /// once, after which only the time phase changes per frame.
    pub fn prob_function(&self, grid: &SphGrid) -> ProbFunction {
        let waves = self.states.iter().map(|s| s.wave_function(grid)).collect();
        ProbFunction { waves }
    }
}

/// Probability density of a superposition over a fixed grid:
/// `val(t) = |sum_s psi_s(t)|^2` elementwise.
#[derive(Debug, Clone)]
pub struct ProbFunction {
    waves: Vec<WaveFunction>,
}

impl ProbFunction {
    pub fn len(&self) -> usize {
        self.waves.first().map_or(0, WaveFunction::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-point probability density at simulated time `t`. A single state is
    /// stationary (constant in `t`); two or more states beat with period
    /// `2*pi / |E_i - E_j|`.
    pub fn val(&self, t: f64) -> Array1<f64> {
        let mut sum: Array1<Complex64> = Array1::zeros(self.len());
        for wave in &self.waves {
            let phase = Complex64::cis(-wave.energy() * t);
            for (acc, base) in sum.iter_mut().zip(wave.base().iter()) {
                *acc += base * phase;
            }
        }
        sum.mapv(|psi| psi.norm_sqr())
    }

    /// Shortest beat period of the superposition, `2*pi / max|E_i - E_j|`.
    /// `None` for a stationary (single-state or fully degenerate) density.
    pub fn beat_period(&self) -> Option<f64> {
        self.waves
            .iter()
            .tuple_combinations()
            .map(|(a, b)| (a.energy() - b.energy()).abs())
            .filter(|delta| *delta > 0.0)
            .fold(None, |max: Option<f64>, delta| {
                Some(max.map_or(delta, |m| m.max(delta)))
            })
            .map(|delta| 2.0 * std::f64::consts::PI / delta)
    }
}
