use crate::core::frame::Volume;
use crate::core::grid::{CartDims, CartPoints};
use kiddo::{KdTree, SquaredEuclidean};
use ndarray::{Array1, Array3};
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Neighbors gathered per voxel.
const NEIGHBORS: usize = 8;
/// Guard against division by zero for voxels that coincide with a sample.
const DISTANCE_EPSILON: f64 = 1e-12;
/// Gaussian smoothing width, in voxels.
const SMOOTHING_SIGMA: f64 = 0.8;
/// Gaussian kernel half-width, in voxels.
const SMOOTHING_RADIUS: usize = 2;

/// Precomputed k-nearest-neighbor inverse-distance topology mapping irregular
/// Cartesian samples onto a regular voxel grid.
///
/// Built once per (grid, resolution) pair; the expensive k-d tree queries never
/// run per frame. `resample` only gathers the current values through the stored
/// indices and weights, then smooths the result.
#[derive(Debug, Clone)]
pub struct VolumeResampler {
    dims: CartDims,
    k: usize,
    /// `k` sample indices per voxel, row-major voxel order.
    indices: Vec<usize>,
    /// Matching weights, renormalized to sum to 1 per voxel.
    weights: Vec<f64>,
}

impl VolumeResampler {
    pub fn build(points: &CartPoints, dims: CartDims) -> Self {
        // A spherical meshgrid collapses whole shells onto single Cartesian
        // points (the r=0 shell onto the origin, the theta=0 ring onto the
        // z-axis), and coincident entries overflow the k-d tree's fixed
        // bucket. Index only unique positions; each maps back to one original
        // sample, whose value is shared by all samples at that position.
        let (entries, sample_of_entry) = dedup_positions(points);
        let tree: KdTree<f64, 3> = (&entries).into();
        let k = NEIGHBORS.min(entries.len());

        let centers = voxel_centers(&entries, dims);
        debug!(
            samples = points.len(),
            unique = entries.len(),
            voxels = centers.len(),
            k,
            "building volume resampling topology"
        );

        #[cfg(not(feature = "parallel"))]
        let center_iter = centers.iter();

        #[cfg(feature = "parallel")]
        let center_iter = centers.par_iter();

        let per_voxel: Vec<(Vec<usize>, Vec<f64>)> = center_iter
            .map(|center| {
                let nearest = tree.nearest_n::<SquaredEuclidean>(center, k);
                let mut indices = Vec::with_capacity(k);
                let mut weights = Vec::with_capacity(k);
                for neighbour in &nearest {
                    indices.push(sample_of_entry[neighbour.item as usize]);
                    weights.push(1.0 / (neighbour.distance.sqrt() + DISTANCE_EPSILON));
                }
                let total: f64 = weights.iter().sum();
                for w in &mut weights {
                    *w /= total;
                }
                (indices, weights)
            })
            .collect();

        let mut indices = Vec::with_capacity(centers.len() * k);
        let mut weights = Vec::with_capacity(centers.len() * k);
        for (idx, w) in per_voxel {
            indices.extend(idx);
            weights.extend(w);
        }

        Self {
            dims,
            k,
            indices,
            weights,
        }
    }

    pub fn dims(&self) -> CartDims {
        self.dims
    }

    /// Gather this frame's sample values through the precomputed weights and
    /// smooth the voxel grid. O(voxels * k) per frame.
    pub fn resample(&self, values: &Array1<f64>) -> Volume {
        let mut data = Array3::zeros(self.dims.shape());
        for (voxel, cell) in data.iter_mut().enumerate() {
            let base = voxel * self.k;
            let mut acc = 0.0;
            for j in 0..self.k {
                acc += self.weights[base + j] * values[self.indices[base + j]];
            }
            *cell = acc;
        }
        gaussian_smooth(&mut data);
        Volume { data }
    }
}

/// Unique sample positions plus, per unique position, the index of the first
/// original sample found there. Positions are compared bit-exactly with the
/// zero sign normalized; samples at one position carry the same density (the
/// wavefunction is a function of position alone), so one representative
/// suffices.
fn dedup_positions(points: &CartPoints) -> (Vec<[f64; 3]>, Vec<usize>) {
    let key = |p: &[f64; 3]| [(p[0] + 0.0).to_bits(), (p[1] + 0.0).to_bits(), (p[2] + 0.0).to_bits()];

    let mut seen: HashMap<[u64; 3], usize> = HashMap::with_capacity(points.len());
    let mut entries = Vec::new();
    let mut sample_of_entry = Vec::new();
    for i in 0..points.len() {
        let p = points.point(i);
        seen.entry(key(&p)).or_insert_with(|| {
            entries.push(p);
            sample_of_entry.push(i);
            entries.len() - 1
        });
    }
    (entries, sample_of_entry)
}

/// Centers of a regular voxel grid spanning the samples' bounding box.
fn voxel_centers(entries: &[[f64; 3]], dims: CartDims) -> Vec<[f64; 3]> {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for p in entries {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }

    let (nx, ny, nz) = dims.shape();
    let axis = |n: usize, lo: f64, hi: f64| -> Vec<f64> {
        let step = if n > 1 { (hi - lo) / (n - 1) as f64 } else { 0.0 };
        (0..n).map(|i| lo + i as f64 * step).collect()
    };
    let xs = axis(nx, min[0], max[0]);
    let ys = axis(ny, min[1], max[1]);
    let zs = axis(nz, min[2], max[2]);

    let mut centers = Vec::with_capacity(nx * ny * nz);
    for &x in &xs {
        for &y in &ys {
            for &z in &zs {
                centers.push([x, y, z]);
            }
        }
    }
    centers
}

/// Separable Gaussian pass over all three axes. The kernel is renormalized at
/// the borders so a constant field stays constant.
fn gaussian_smooth(data: &mut Array3<f64>) {
    let kernel: Vec<f64> = (0..=2 * SMOOTHING_RADIUS)
        .map(|i| {
            let d = i as f64 - SMOOTHING_RADIUS as f64;
            (-d * d / (2.0 * SMOOTHING_SIGMA * SMOOTHING_SIGMA)).exp()
        })
        .collect();

    for axis in 0..3 {
        smooth_axis(data, axis, &kernel);
    }
}

fn smooth_axis(data: &mut Array3<f64>, axis: usize, kernel: &[f64]) {
    let shape = data.dim();
    let n = [shape.0, shape.1, shape.2][axis];
    let radius = SMOOTHING_RADIUS as isize;

    let source = data.clone();
    for ((i, j, l), cell) in data.indexed_iter_mut() {
        let pos = [i, j, l][axis] as isize;
        let mut acc = 0.0;
        let mut norm = 0.0;
        for (ki, &kw) in kernel.iter().enumerate() {
            let offset = ki as isize - radius;
            let q = pos + offset;
            if q < 0 || q >= n as isize {
                continue;
            }
            let mut idx = [i, j, l];
            idx[axis] = q as usize;
            acc += kw * source[[idx[0], idx[1], idx[2]]];
            norm += kw;
        }
        *cell = acc / norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::{SphDims, SphGrid};

    fn sample_points() -> CartPoints {
        SphGrid::build(1, SphDims::new(6, 5).unwrap()).to_cartesian()
    }

    #[test]
    fn constant_field_resamples_to_constant() {
        let points = sample_points();
        let resampler = VolumeResampler::build(&points, CartDims::new(5, 5, 5).unwrap());
        let volume = resampler.resample(&Array1::from_elem(points.len(), 3.5));
        for v in volume.data.iter() {
            assert!((v - 3.5).abs() < 1e-9, "got {v}");
        }
    }

    #[test]
    fn weights_are_normalized_per_voxel() {
        let points = sample_points();
        let resampler = VolumeResampler::build(&points, CartDims::new(4, 4, 4).unwrap());
        for voxel in 0..resampler.dims().len() {
            let base = voxel * resampler.k;
            let sum: f64 = resampler.weights[base..base + resampler.k].iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn topology_is_reused_identically_across_frames() {
        let points = sample_points();
        let resampler = VolumeResampler::build(&points, CartDims::new(4, 4, 4).unwrap());
        let values = Array1::from_shape_fn(points.len(), |i| (i as f64).sin().abs());
        let a = resampler.resample(&values);
        let b = resampler.resample(&values);
        assert_eq!(a, b);
    }

    #[test]
    fn fewer_samples_than_neighbors_is_handled() {
        let points = CartPoints {
            x: Array1::from_vec(vec![0.0, 1.0, 2.0]),
            y: Array1::zeros(3),
            z: Array1::zeros(3),
        };
        let resampler = VolumeResampler::build(&points, CartDims::new(2, 2, 2).unwrap());
        assert_eq!(resampler.k, 3);
        let volume = resampler.resample(&Array1::from_vec(vec![1.0, 2.0, 3.0]));
        assert!(volume.data.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn degenerate_spherical_shells_do_not_overflow_the_index() {
        // The r=0 shell maps all n_angular^2 samples onto the origin and the
        // theta=0 ring collapses onto the z-axis; building the topology at the
        // default resolution must survive these coincident positions.
        let points = SphGrid::build(2, SphDims::new(60, 50).unwrap()).to_cartesian();
        let resampler = VolumeResampler::build(&points, CartDims::new(8, 8, 8).unwrap());
        let volume = resampler.resample(&Array1::from_elem(points.len(), 1.0));
        assert!(volume.data.iter().all(|v| (v - 1.0).abs() < 1e-9));
    }

    #[test]
    fn coincident_samples_share_one_representative() {
        // Ten samples at the origin, two elsewhere: only three unique
        // positions feed the tree, and gathers read the first sample found at
        // each position.
        let mut x = vec![0.0; 10];
        x.extend([5.0, -5.0]);
        let n = x.len();
        let points = CartPoints {
            x: Array1::from_vec(x),
            y: Array1::zeros(n),
            z: Array1::zeros(n),
        };

        let resampler = VolumeResampler::build(&points, CartDims::new(3, 2, 2).unwrap());
        assert_eq!(resampler.k, 3);
        assert!(resampler.indices.iter().all(|&i| [0, 10, 11].contains(&i)));

        let volume = resampler.resample(&Array1::from_elem(n, 2.0));
        assert!(volume.data.iter().all(|v| (v - 2.0).abs() < 1e-9));
    }

    #[test]
    fn smoothing_spreads_a_point_source() {
        let points = sample_points();
        let resampler = VolumeResampler::build(&points, CartDims::new(7, 7, 7).unwrap());
        let mut values = Array1::zeros(points.len());
        values[0] = 100.0;
        let volume = resampler.resample(&values);
        let nonzero = volume.data.iter().filter(|v| **v > 0.0).count();
        // The k-NN gather plus the Gaussian pass must touch more than one cell.
        assert!(nonzero > 1);
    }
}
