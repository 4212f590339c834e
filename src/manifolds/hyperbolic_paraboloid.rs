use rand::{Rng, RngCore};

use crate::core::chart::Atlas;
use crate::core::metric::MetricTensor;
use crate::error::{GeometryError, Result};
use crate::manifolds::Manifold;

/// Saddle surface `z = x * y` over a square patch of local coordinates.
fn from_local(local: &[f64]) -> Vec<f64> {
    vec![local[0], local[1], local[0] * local[1]]
}

/// Saddle surface carried for sampling and visualization only.
///
/// No atlas is defined, so stepping fails with an unsupported-operation
/// error; density, distance and the metric are likewise unimplemented.
pub struct HyperbolicParaboloidManifold {
    dim: usize,
    low: f64,
    high: f64,
}

impl HyperbolicParaboloidManifold {
    pub fn new(dim: usize) -> Result<Self> {
        if dim != 2 {
            return Err(GeometryError::UnsupportedDimension {
                manifold: "hyperbolic paraboloid",
                dim,
            });
        }
        Ok(Self {
            dim,
            low: -1.0,
            high: 1.0,
        })
    }
}

impl Manifold for HyperbolicParaboloidManifold {
    fn name(&self) -> &'static str {
        "hyperbolic paraboloid"
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
        let local = [
            rng.gen_range(self.low..self.high),
            rng.gen_range(self.low..self.high),
        ];
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
