//! Manifold variants and the capability trait they share.

pub mod euclidean;
pub mod hyperbolic_paraboloid;
pub mod hyperboloid;
pub mod sphere;
pub mod torus;

pub use euclidean::EuclideanManifold;
pub use hyperbolic_paraboloid::HyperbolicParaboloidManifold;
pub use hyperboloid::HyperboloidManifold;
pub use sphere::SphereManifold;
pub use torus::TorusManifold;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::core::chart::Atlas;
use crate::core::metric::MetricTensor;
use crate::core::numerics::norm;
use crate::core::sampler::SamplerConfig;
use crate::error::{GeometryError, Result};

/// Riemannian step budget applied by the environment unless overridden.
pub const DEFAULT_MAX_STEP_SIZE: f64 = 0.01;

/// A smooth manifold embedded in ambient space, together with a probability
/// density on it.
///
/// Points are ambient-coordinate vectors of length `ambient_dim`; actions
/// and chart-local coordinates have length `dim`. Implementations are pure
/// geometry: they hold no walker state and draw randomness only from the
/// generator passed in, so a single instance can serve any number of
/// environments.
pub trait Manifold: Send + Sync {
    /// Variant name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Intrinsic dimension.
    fn dim(&self) -> usize;

    /// Dimension of the embedding space.
    fn ambient_dim(&self) -> usize;

    /// Riemannian length budget for a single step.
    fn max_step_size(&self) -> f64 {
        DEFAULT_MAX_STEP_SIZE
    }

    /// The charts covering this manifold, in scan order.
    fn atlas(&self) -> Result<&Atlas>;

    /// Canonical initial point. Deterministic.
    fn starting_state(&self) -> Vec<f64>;

    /// Density at `point` under the configured sampler.
    fn pdf(&self, point: &[f64]) -> Result<f64>;

    /// One draw from the configured sampler.
    fn sample_one(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>>;

    /// `n` independent draws, defined as `n` repeated single draws.
    fn sample(&self, rng: &mut dyn RngCore, n: usize) -> Result<Vec<Vec<f64>>> {
        (0..n).map(|_| self.sample_one(rng)).collect()
    }

    /// Approximate geodesic distance between two ambient points.
    fn distance(&self, x: &[f64], y: &[f64]) -> Result<f64>;

    /// Local inner product at `point`, in the chart coordinate basis,
    /// sized `dim x dim`.
    fn metric_tensor(&self, point: &[f64]) -> Result<MetricTensor>;

    /// Value of the variant's defining equation at a coordinate.
    fn implicit_function(&self, coords: &[f64]) -> Result<f64>;

    /// Deterministic coverage mesh of roughly `n` ambient points.
    fn grid(&self, n: usize) -> Result<Vec<Vec<f64>>> {
        let _ = n;
        Err(GeometryError::unsupported(self.name(), "grid"))
    }

    /// Advances `state` along `action` through the atlas.
    ///
    /// The action is rescaled so that the Riemannian length of the local
    /// step stays close to `max_step_size` for a unit action. Degenerate
    /// directions (a zero action, or a metric-null direction such as the
    /// azimuthal one at a sphere pole) produce a non-finite candidate that
    /// no chart accepts, which surfaces as [`GeometryError::NoCompatibleChart`].
    fn manifold_step(&self, state: &[f64], action: &[f64], max_step_size: f64) -> Result<Vec<f64>> {
        let atlas = self.atlas()?;

        // 1. Rescale by the metric at the current state. Measuring the raw
        //    ambient action against the local metric is a crude
        //    approximation, not an exact pullback.
        let metric = self.metric_tensor(state)?;
        let scale = max_step_size * norm(action) / metric.norm(action);
        let local_step: Vec<f64> = action.iter().map(|a| scale * a).collect();

        // 2. The first chart whose domain holds the state decides. A
        //    candidate rejected by that chart's image ball is a failure,
        //    not a fallback to later charts.
        let chart = atlas.find(state).ok_or(GeometryError::NoCompatibleChart)?;
        let mut local = chart.map(state);
        for (coord, delta) in local.iter_mut().zip(&local_step) {
            *coord += delta;
        }
        if !chart.image_contains(&local) {
            tracing::trace!(
                manifold = self.name(),
                "candidate step left the chart image ball"
            );
            return Err(GeometryError::NoCompatibleChart);
        }
        Ok(chart.inverse_map(&local))
    }
}

/// Construction-time selector for the manifold variants.
///
/// Serializable so that a config document can describe the manifold to
/// build. Validation happens in the variant constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ManifoldKind {
    Euclidean { dim: usize, sampler: SamplerConfig },
    Sphere { dim: usize, sampler: SamplerConfig },
    Torus { dim: usize },
    HyperbolicParaboloid { dim: usize },
    Hyperboloid { dim: usize },
}

impl ManifoldKind {
    pub fn build(&self) -> Result<Box<dyn Manifold>> {
        match self {
            Self::Euclidean { dim, sampler } => Ok(Box::new(EuclideanManifold::new(
                *dim,
                sampler.clone(),
            )?)),
            Self::Sphere { dim, sampler } => {
                Ok(Box::new(SphereManifold::new(*dim, sampler.clone())?))
            }
            Self::Torus { dim } => Ok(Box::new(TorusManifold::new(*dim)?)),
            Self::HyperbolicParaboloid { dim } => {
                Ok(Box::new(HyperbolicParaboloidManifold::new(*dim)?))
            }
            Self::Hyperboloid { dim } => Ok(Box::new(HyperboloidManifold::new(*dim)?)),
        }
    }
}
