use super::GridError;
use serde::{Deserialize, Serialize};

/// Resolution of a spherical sampling grid: `n_radial` samples along the radius,
/// `n_angular` samples along each of the polar and azimuthal angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SphDims {
    n_radial: usize,
    n_angular: usize,
}

impl SphDims {
    pub fn new(n_radial: usize, n_angular: usize) -> Result<Self, GridError> {
        if n_radial == 0 {
            return Err(GridError::EmptyDimension { name: "n_radial" });
        }
        if n_angular == 0 {
            return Err(GridError::EmptyDimension { name: "n_angular" });
        }
        Ok(Self { n_radial, n_angular })
    }

    pub fn n_radial(&self) -> usize {
        self.n_radial
    }

    pub fn n_angular(&self) -> usize {
        self.n_angular
    }

    /// Total sample count of the full (r, theta, phi) meshgrid.
    pub fn len(&self) -> usize {
        self.n_radial * self.n_angular * self.n_angular
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Resolution of a regular Cartesian voxel grid. Sizes output arrays only;
/// no physics depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartDims {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl CartDims {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        if nx == 0 {
            return Err(GridError::EmptyDimension { name: "nx" });
        }
        if ny == 0 {
            return Err(GridError::EmptyDimension { name: "ny" });
        }
        if nz == 0 {
            return Err(GridError::EmptyDimension { name: "nz" });
        }
        Ok(Self { nx, ny, nz })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn nz(&self) -> usize {
        self.nz
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<SphDims> for CartDims {
    /// Deterministic, lossy conversion: a cubic voxel grid whose side preserves
    /// the spherical grid's total sample count, clamped to at least 2 voxels.
    fn from(sph: SphDims) -> Self {
        let side = (sph.len() as f64).cbrt().round().max(2.0) as usize;
        Self {
            nx: side,
            ny: side,
            nz: side,
        }
    }
}
