use crate::core::frame::Scatter;
use crate::core::grid::CartPoints;
use nalgebra::Point3;
use ndarray::Array1;

/// Pass-through sampler: fixed irregular positions, fresh values per frame.
#[derive(Debug, Clone)]
pub struct ScatterSampler {
    positions: Vec<Point3<f64>>,
}

impl ScatterSampler {
    pub fn new(points: &CartPoints) -> Self {
        let positions = (0..points.len())
            .map(|i| {
                let [x, y, z] = points.point(i);
                Point3::new(x, y, z)
            })
            .collect();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Pair the fixed positions with this frame's values. Unmasked; callers
    /// apply the relative cutoff per frame.
    pub fn sample(&self, values: &Array1<f64>) -> Scatter {
        debug_assert_eq!(values.len(), self.positions.len());
        Scatter {
            positions: self.positions.clone(),
            values: values.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::{SphDims, SphGrid};

    #[test]
    fn sample_pairs_positions_with_values() {
        let grid = SphGrid::build(1, SphDims::new(4, 3).unwrap());
        let sampler = ScatterSampler::new(&grid.to_cartesian());
        let values = Array1::from_shape_fn(grid.len(), |i| i as f64);

        let scatter = sampler.sample(&values);
        assert_eq!(scatter.len(), grid.len());
        assert_eq!(scatter.values[7], 7.0);
    }

    #[test]
    fn positions_are_stable_across_frames() {
        let grid = SphGrid::build(2, SphDims::new(4, 3).unwrap());
        let sampler = ScatterSampler::new(&grid.to_cartesian());
        let a = sampler.sample(&Array1::zeros(grid.len()));
        let b = sampler.sample(&Array1::ones(grid.len()));
        assert_eq!(a.positions, b.positions);
    }
}
