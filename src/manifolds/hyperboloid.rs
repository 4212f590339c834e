use std::f64::consts::{FRAC_1_SQRT_2, PI};

use rand::{Rng, RngCore};

use crate::core::chart::Atlas;
use crate::core::metric::MetricTensor;
use crate::error::{GeometryError, Result};
use crate::manifolds::Manifold;

/// Waist radius of the one-sheet hyperboloid.
const WAIST_RADIUS: f64 = FRAC_1_SQRT_2;
/// Vertical scale of the ruling parameter.
const VERTICAL_SCALE: f64 = 1.0;

/// Ruling parameters `[u, v]` to a point with `x^2 + y^2 =
/// a^2 (1 + u^2)` and `z = c u`.
fn from_local(local: &[f64]) -> Vec<f64> {
    let ring = WAIST_RADIUS * (1.0 + local[0] * local[0]).sqrt();
    vec![
        ring * local[1].cos(),
        ring * local[1].sin(),
        VERTICAL_SCALE * local[0],
    ]
}

/// One-sheet hyperboloid carried for sampling and visualization only.
///
/// No atlas is defined, so stepping fails with an unsupported-operation
/// error; density, distance and the metric are likewise unimplemented.
/// The starting state is the ambient origin, which does not lie on the
/// surface itself.
pub struct HyperboloidManifold {
    dim: usize,
}

impl HyperboloidManifold {
    pub fn new(dim: usize) -> Result<Self> {
        if dim != 2 {
            return Err(GeometryError::UnsupportedDimension {
                manifold: "hyperboloid",
                dim,
            });
        }
        Ok(Self { dim })
    }
}

impl Manifold for HyperboloidManifold {
    fn name(&self) -> &'static str {
        "hyperboloid"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn ambient_dim(&self) -> usize {
        self.dim + 1
    }

    fn atlas(&self) -> Result<&Atlas> {
        Err(GeometryError::unsupported(self.name(), "atlas"))
    }

    fn starting_state(&self) -> Vec<f64> {
        vec![0.0; self.dim + 1]
    }

    fn pdf(&self, _point: &[f64]) -> Result<f64> {
        Err(GeometryError::unsupported(self.name(), "pdf"))
    }

    fn sample_one(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        let local = [rng.gen_range(-1.0..1.0), rng.gen_range(-PI..PI)];
        Ok(from_local(&local))
    }

    fn distance(&self, _x: &[f64], _y: &[f64]) -> Result<f64> {
        Err(GeometryError::unsupported(self.name(), "distance"))
    }

    fn metric_tensor(&self, _point: &[f64]) -> Result<MetricTensor> {
        Err(GeometryError::unsupported(self.name(), "metric_tensor"))
    }

    fn implicit_function(&self, _coords: &[f64]) -> Result<f64> {
        Err(GeometryError::unsupported(self.name(), "implicit_function"))
    }
}
