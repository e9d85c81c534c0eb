//! # Core Module
//!
//! This module provides the fundamental building blocks for computing electron
//! probability densities of hydrogen-like atoms, serving as the stateless
//! computational foundation of the library.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the computation:
//!
//! - **Quantum Representation** ([`models`]) - Validated quantum states, atoms, and
//!   their wavefunction / probability evaluations
//! - **Special Functions** ([`special`]) - Associated Legendre and generalized
//!   Laguerre recurrences underlying the closed-form wavefunctions
//! - **Spatial Grids** ([`grid`]) - Spherical sampling grids and Cartesian conversion
//! - **Frame Values** ([`frame`]) - Immutable per-frame point clouds and voxel volumes
//! - **Resampling** ([`resample`]) - Scatter pass-through and k-nearest-neighbor
//!   volume interpolation with precomputed topology

pub mod frame;
pub mod grid;
pub mod models;
pub mod resample;
pub mod special;
