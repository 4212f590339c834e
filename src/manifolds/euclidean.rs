use rand::RngCore;

use crate::core::chart::{Atlas, Chart};
use crate::core::metric::MetricTensor;
use crate::core::numerics::{euclidean_distance, linspace};
use crate::core::sampler::{self, SamplerConfig};
use crate::error::{GeometryError, Result};
use crate::manifolds::Manifold;

/// Flat `R^dim` with coordinates declared over `[-1, 1]` per axis.
///
/// The single identity chart is valid everywhere, so stepping never runs
/// out of charts here. The declared range only constrains uniform sampler
/// bounds; the walker itself is free to leave it.
pub struct EuclideanManifold {
    dim: usize,
    low: f64,
    high: f64,
    sampler: SamplerConfig,
    atlas: Atlas,
}

impl EuclideanManifold {
    pub fn new(dim: usize, sampler: SamplerConfig) -> Result<Self> {
        if dim == 0 {
            return Err(GeometryError::UnsupportedDimension {
                manifold: "euclidean",
                dim,
            });
        }
        let low = -1.0;
        let high = 1.0;
        match &sampler {
            SamplerConfig::Uniform { low: lo, high: hi } => {
                if lo.len() != dim || hi.len() != dim {
                    return Err(GeometryError::invalid_sampler(format!(
                        "uniform bounds must have length {dim}"
                    )));
                }
                if lo.iter().any(|x| *x < low) || hi.iter().any(|x| *x > high) {
                    return Err(GeometryError::invalid_sampler(
                        "uniform bounds must lie within [-1, 1]",
                    ));
                }
                if lo.iter().zip(hi).any(|(l, h)| l > h) {
                    return Err(GeometryError::invalid_sampler("uniform low exceeds high"));
                }
            }
            SamplerConfig::Gaussian { mean, std } => {
                if mean.len() != dim {
                    return Err(GeometryError::invalid_sampler(format!(
                        "gaussian mean must have length {dim}"
                    )));
                }
                if !std.is_finite() || *std <= 0.0 {
                    return Err(GeometryError::invalid_sampler(
                        "gaussian std must be positive",
                    ));
                }
            }
            other => {
                return Err(GeometryError::invalid_sampler(format!(
                    "euclidean manifold cannot draw from a {} sampler",
                    other.kind()
                )));
            }
        }

        let atlas = Atlas::global(Chart::new(
            vec![0.0; dim],
            f64::INFINITY,
            f64::INFINITY,
            Box::new(|x: &[f64]| x.to_vec()),
            Box::new(|x: &[f64]| x.to_vec()),
            Box::new(euclidean_distance),
        ));

        Ok(Self {
            dim,
            low,
            high,
            sampler,
            atlas,
        })
    }
}

impl Manifold for EuclideanManifold {
    fn name(&self) -> &'static str {
        "euclidean"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn ambient_dim(&self) -> usize {
        self.dim
    }

    fn atlas(&self) -> Result<&Atlas> {
        Ok(&self.atlas)
    }

    fn starting_state(&self) -> Vec<f64> {
        vec![0.0; self.dim]
    }

    fn pdf(&self, point: &[f64]) -> Result<f64> {
        match &self.sampler {
            SamplerConfig::Uniform { low, high } => Ok(sampler::box_pdf(low, high, point)),
            SamplerConfig::Gaussian { mean, std } => Ok(sampler::gaussian_pdf(mean, *std, point)),
            // Ruled out at construction.
            _ => Err(GeometryError::unsupported(self.name(), "pdf")),
        }
    }

    fn sample_one(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        match &self.sampler {
            SamplerConfig::Uniform { low, high } => Ok(sampler::draw_box(rng, low, high)),
            SamplerConfig::Gaussian { mean, std } => Ok(sampler::draw_gaussian(rng, mean, *std)),
            _ => Err(GeometryError::unsupported(self.name(), "sample")),
        }
    }

    fn distance(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        Ok(euclidean_distance(x, y))
    }

    fn metric_tensor(&self, _point: &[f64]) -> Result<MetricTensor> {
        Ok(MetricTensor::identity(self.dim))
    }

    fn implicit_function(&self, _coords: &[f64]) -> Result<f64> {
        if self.dim >= 3 {
            return Err(GeometryError::unsupported(self.name(), "implicit_function"));
        }
        Ok(0.0)
    }

    fn grid(&self, n: usize) -> Result<Vec<Vec<f64>>> {
        let per_dim = (n as f64).powf(1.0 / self.dim as f64) as usize;
        let axis = linspace(self.low, self.high, per_dim);
        Ok(cartesian_mesh(&axis, self.dim))
    }
}

/// All `axis.len()^dim` combinations, one coordinate per dimension.
fn cartesian_mesh(axis: &[f64], dim: usize) -> Vec<Vec<f64>> {
    let mut mesh: Vec<Vec<f64>> = vec![Vec::new()];
    for _ in 0..dim {
        let mut next = Vec::with_capacity(mesh.len() * axis.len());
        for point in &mesh {
            for value in axis {
                let mut extended = point.clone();
                extended.push(*value);
                next.push(extended);
            }
        }
        mesh = next;
    }
    mesh
}
