use super::{ModelError, StateSpec};
use crate::core::grid::SphGrid;
use crate::core::special::{associated_legendre, factorial, generalized_laguerre};
use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Reduced electron mass, in the model's natural units.
pub const REDUCED_MASS: f64 = 1.0;
/// Square of the fine-structure-like coupling constant.
pub const ALPHA_SQUARED: f64 = 1e-5;
/// Speed of light, in the model's natural units.
pub const LIGHTSPEED: f64 = 3.0e5;

/// One eigenstate of the atom: a validated spec plus its binding energy,
/// computed once at construction via the Sommerfeld fine-structure formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    spec: StateSpec,
    energy: f64,
}

impl State {
    pub fn new(spec: StateSpec) -> Result<Self, ModelError> {
        let energy = binding_energy(spec)?;
        Ok(Self { spec, energy })
    }

    pub fn spec(&self) -> StateSpec {
        self.spec
    }

    /// Time-independent binding energy `E` of this state.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Evaluate the t=0 complex amplitude over every grid point. Expensive
    /// (special functions per point); done once per (state, grid) pair.
    pub fn wave_function(&self, grid: &SphGrid) -> WaveFunction {
        WaveFunction::evaluate(self.spec, self.energy, grid)
    }
}

/// Sommerfeld relativistic binding energy for quantum numbers `(n, l)`.
///
/// Both radicands are checked: for the fixed constants above they stay positive
/// for every valid `(n, l)`, but a sign flip must surface as an error rather
/// than as a NaN propagating into the frame stream.
fn binding_energy(spec: StateSpec) -> Result<f64, ModelError> {
    let n = f64::from(spec.n());
    let l_half = (f64::from(spec.l()) + 0.5).abs();

    let inner = (l_half + 0.5).powi(2) - ALPHA_SQUARED;
    if inner < 0.0 {
        return Err(ModelError::EnergyUndefined { spec });
    }

    let denom = n - l_half - 0.5 + inner.sqrt();
    let outer = 1.0 + 2.0 * ALPHA_SQUARED / denom;
    if denom == 0.0 || outer < 0.0 {
        return Err(ModelError::EnergyUndefined { spec });
    }

    Ok(-REDUCED_MASS * LIGHTSPEED.powi(2) * (-1.0 + outer.sqrt()))
}

/// Complex wavefunction amplitudes of one state over a fixed grid, precomputed
/// at t=0 and re-phased by `exp(-iEt)` for any later time.
///
/// The radial normalization prefactor is deliberately omitted: every consumer
/// works with relative intensities and a relative masking cutoff, so a global
/// constant cancels out.
#[derive(Debug, Clone)]
pub struct WaveFunction {
    base: Array1<Complex64>,
    energy: f64,
}

impl WaveFunction {
    fn evaluate(spec: StateSpec, energy: f64, grid: &SphGrid) -> Self {
        let n = spec.n();
        let l = spec.l();
        let m_abs = spec.m().unsigned_abs();

        let parity = if m_abs % 2 == 0 { 1.0 } else { -1.0 };
        let angular_norm = parity
            * ((f64::from(2 * l + 1) * factorial(l - m_abs))
                / (4.0 * PI * factorial(l + m_abs)))
            .sqrt();
        let radial_scale = (2.0 / f64::from(n)).powi(l as i32 + 1);

        let mut base = Array1::zeros(grid.len());
        for (i, (r, theta, phi)) in grid.iter_points().enumerate() {
            let legendre = associated_legendre(l, m_abs, theta.cos());
            let angular =
                angular_norm * legendre * Complex64::cis(f64::from(m_abs) * phi);

            let rho = 2.0 * r / f64::from(n);
            let laguerre = generalized_laguerre(n - l - 1, 2 * l + 1, rho);
            let radial = r.powi(l as i32) * radial_scale * laguerre * (-r / f64::from(n)).exp();

            base[i] = angular * radial;
        }

        Self { base, energy }
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub(crate) fn base(&self) -> &Array1<Complex64> {
        &self.base
    }

    /// Time-evolved amplitudes: the stored t=0 array phased by `exp(-iEt)`.
    /// O(grid size); no special functions are re-evaluated.
    pub fn at(&self, t: f64) -> Array1<Complex64> {
        let phase = Complex64::cis(-self.energy * t);
        self.base.mapv(|amp| amp * phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::SphDims;

    fn spec(n: u32, l: u32, m: i32) -> StateSpec {
        StateSpec::new(n, l, m).unwrap()
    }

    #[test]
    fn ground_state_energy_is_negative_and_finite() {
        let state = State::new(spec(1, 0, 0)).unwrap();
        assert!(state.energy() < 0.0);
        assert!(state.energy().is_finite());
    }

    #[test]
    fn energy_increases_with_principal_number() {
        // Binding gets weaker (energy less negative) as n grows.
        let e1 = State::new(spec(1, 0, 0)).unwrap().energy();
        let e2 = State::new(spec(2, 0, 0)).unwrap().energy();
        let e3 = State::new(spec(3, 0, 0)).unwrap().energy();
        assert!(e1 < e2 && e2 < e3);
    }

    #[test]
    fn energy_matches_small_alpha_limit() {
        // For small alpha the formula reduces to -mu c^2 alpha^2 / n.
        for n in 1..=4u32 {
            let e = State::new(spec(n, 0, 0)).unwrap().energy();
            let limit = -REDUCED_MASS * LIGHTSPEED.powi(2) * ALPHA_SQUARED / f64::from(n);
            assert!(
                ((e - limit) / limit).abs() < 1e-4,
                "n={n}: {e} vs limit {limit}"
            );
        }
    }

    #[test]
    fn wave_function_is_finite_everywhere() {
        let grid = SphGrid::build(2, SphDims::new(12, 10).unwrap());
        let wf = State::new(spec(2, 1, 1)).unwrap().wave_function(&grid);
        assert_eq!(wf.len(), grid.len());
        assert!(wf.at(0.7).iter().all(|a| a.re.is_finite() && a.im.is_finite()));
    }

    #[test]
    fn time_evolution_preserves_magnitude() {
        let grid = SphGrid::build(1, SphDims::new(8, 6).unwrap());
        let wf = State::new(spec(1, 0, 0)).unwrap().wave_function(&grid);
        let a0 = wf.at(0.0);
        let a1 = wf.at(1234.5);
        for (z0, z1) in a0.iter().zip(a1.iter()) {
            assert!((z0.norm_sqr() - z1.norm_sqr()).abs() < 1e-12);
        }
    }

    #[test]
    fn s_state_amplitude_is_real_at_t_zero() {
        // m = 0 kills the azimuthal phase, so the base amplitudes are real.
        let grid = SphGrid::build(2, SphDims::new(10, 8).unwrap());
        let wf = State::new(spec(2, 0, 0)).unwrap().wave_function(&grid);
        assert!(wf.at(0.0).iter().all(|a| a.im.abs() < 1e-12));
    }
}
