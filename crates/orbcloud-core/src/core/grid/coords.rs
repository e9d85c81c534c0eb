use super::SphDims;
use ndarray::{Array1, Array3};

/// Full-rank spherical meshgrid over `r in [0, 10 * n_max^2]`, `theta in [0, pi]`,
/// `phi in [0, 2*pi]` with `ij` indexing, shape `(n_radial, n_angular, n_angular)`.
///
/// The extent `10 * n_max^2` covers the classically significant radius of the
/// largest bound orbital in the superposition.
#[derive(Debug, Clone)]
pub struct SphGrid {
    r: Array3<f64>,
    theta: Array3<f64>,
    phi: Array3<f64>,
}

impl SphGrid {
    pub fn build(n_max: u32, dims: SphDims) -> Self {
        let r_max = 10.0 * f64::from(n_max).powi(2);
        let r_axis = linspace(0.0, r_max, dims.n_radial());
        let theta_axis = linspace(0.0, std::f64::consts::PI, dims.n_angular());
        let phi_axis = linspace(0.0, 2.0 * std::f64::consts::PI, dims.n_angular());

        let shape = (dims.n_radial(), dims.n_angular(), dims.n_angular());
        let r = Array3::from_shape_fn(shape, |(ir, _, _)| r_axis[ir]);
        let theta = Array3::from_shape_fn(shape, |(_, it, _)| theta_axis[it]);
        let phi = Array3::from_shape_fn(shape, |(_, _, ip)| phi_axis[ip]);

        Self { r, theta, phi }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.r.dim()
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn r(&self) -> &Array3<f64> {
        &self.r
    }

    pub fn theta(&self) -> &Array3<f64> {
        &self.theta
    }

    pub fn phi(&self) -> &Array3<f64> {
        &self.phi
    }

    /// Iterate the grid points in flattened (row-major) order.
    pub fn iter_points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.r
            .iter()
            .zip(self.theta.iter())
            .zip(self.phi.iter())
            .map(|((&r, &theta), &phi)| (r, theta, phi))
    }

    /// Elementwise spherical-to-Cartesian transform, flattened to parallel
    /// one-dimensional point arrays.
    pub fn to_cartesian(&self) -> CartPoints {
        let n = self.len();
        let mut x = Array1::zeros(n);
        let mut y = Array1::zeros(n);
        let mut z = Array1::zeros(n);
        for (i, (r, theta, phi)) in self.iter_points().enumerate() {
            let sin_theta = theta.sin();
            x[i] = r * sin_theta * phi.cos();
            y[i] = r * sin_theta * phi.sin();
            z[i] = r * theta.cos();
        }
        CartPoints { x, y, z }
    }
}

/// Flattened Cartesian sample positions, parallel same-length arrays.
#[derive(Debug, Clone)]
pub struct CartPoints {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
}

impl CartPoints {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> [f64; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    if n == 1 {
        Array1::from_elem(1, start)
    } else {
        Array1::linspace(start, end, n)
    }
}
