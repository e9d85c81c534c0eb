//! Quantum-mechanical data models: validated state specifications, eigenstates
//! with their binding energies, atoms as ordered superpositions, and the
//! wavefunction / probability evaluations bound to a spatial grid.

mod atom;
mod spec;
mod state;

pub use atom::{Atom, ProbFunction};
pub use spec::StateSpec;
pub use state::{ALPHA_SQUARED, LIGHTSPEED, REDUCED_MASS, State, WaveFunction};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ModelError {
    #[error("principal quantum number must be >= 1, got n = {n}")]
    PrincipalOutOfRange { n: u32 },

    #[error("azimuthal quantum number must satisfy l < n, got l = {l} with n = {n}")]
    AzimuthalOutOfRange { n: u32, l: u32 },

    #[error("magnetic quantum number must satisfy -l <= m <= l, got m = {m} with l = {l}")]
    MagneticOutOfRange { l: u32, m: i32 },

    #[error("duplicate state {spec} in atom")]
    DuplicateState { spec: StateSpec },

    #[error("an atom requires at least one state")]
    EmptyAtom,

    #[error("binding energy undefined for {spec}: fine-structure radicand is negative")]
    EnergyUndefined { spec: StateSpec },
}
