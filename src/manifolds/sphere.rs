use std::f64::consts::PI;

use glam::DVec3;
use rand::{Rng, RngCore};

use crate::core::chart::{Atlas, Chart};
use crate::core::metric::MetricTensor;
use crate::core::numerics::{dot, norm, uniform_unit_vector};
use crate::core::sampler::SamplerConfig;
use crate::error::{GeometryError, Result};
use crate::manifolds::Manifold;

/// How far `|x|` may drift from 1 before a point stops counting as
/// on-surface for the uniform density.
const SURFACE_TOLERANCE: f64 = 1e-9;

/// Polar coordinates `[theta, phi]` to an ambient point on the unit sphere.
fn from_local(local: &[f64]) -> Vec<f64> {
    let (theta, phi) = (local[0], local[1]);
    vec![
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    ]
}

/// Ambient point on the unit sphere to polar coordinates, `theta` in
/// `[0, pi]` and `phi` in `(-pi, pi]`.
fn to_local(point: &[f64]) -> Vec<f64> {
    let theta = point[2].clamp(-1.0, 1.0).acos();
    let phi = point[1].atan2(point[0]);
    vec![theta, phi]
}

/// Arc length between two unit vectors. The dot product is clamped so
/// that rounding noise on `x == y` cannot push it outside `acos` range.
fn great_circle_distance(x: &[f64], y: &[f64]) -> f64 {
    dot(x, y).clamp(-1.0, 1.0).acos()
}

/// Density of the von Mises-Fisher distribution on the unit sphere.
///
/// The textbook normalizer `kappa / (4 pi sinh kappa)` overflows for
/// large `kappa`; folding `exp(-kappa)` into the exponent keeps every
/// intermediate finite.
fn von_mises_fisher_pdf(mu: &[f64], kappa: f64, point: &[f64]) -> f64 {
    let aligned = dot(mu, point) - 1.0;
    kappa * (kappa * aligned).exp() / (2.0 * PI * (1.0 - (-2.0 * kappa).exp()))
}

/// One von Mises-Fisher draw by Wood's rejection scheme: sample the cosine
/// of the polar angle around `mu`, then rotate uniformly in the tangent
/// plane at `mu`.
fn draw_von_mises_fisher(rng: &mut dyn RngCore, mu: &[f64], kappa: f64) -> Vec<f64> {
    // 1. Rejection-sample w = cos(angle to mu). The envelope constant
    //    b = sqrt(kappa^2 + 1) - kappa, written in a form stable for
    //    large kappa.
    let b = (kappa + kappa.hypot(1.0)).recip();
    let x0 = (1.0 - b) / (1.0 + b);
    let c = kappa * x0 + 2.0 * (1.0 - x0 * x0).ln();
    let w = loop {
        let z: f64 = rng.gen_range(0.0..1.0);
        let u: f64 = rng.gen_range(0.0..1.0);
        let w = (1.0 - (1.0 + b) * z) / (1.0 - (1.0 - b) * z);
        if kappa * w + 2.0 * (1.0 - x0 * w).ln() - c >= u.ln() {
            break w;
        }
    };

    // 2. Pick a uniform direction in the tangent plane at mu.
    let mu = DVec3::new(mu[0], mu[1], mu[2]);
    let helper = if mu.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    let e1 = mu.cross(helper).normalize();
    let e2 = mu.cross(e1);
    let psi = rng.gen_range(-PI..PI);
    let sine = (1.0 - w * w).max(0.0).sqrt();
    let point = w * mu + sine * (psi.cos() * e1 + psi.sin() * e2);
    vec![point.x, point.y, point.z]
}

/// Unit sphere in `R^3`, covered by a single polar chart.
///
/// The chart is singular at the poles: the metric degenerates there
/// (`sin(theta) = 0`), so a purely azimuthal step taken exactly at a pole
/// produces a non-finite candidate and fails with
/// [`GeometryError::NoCompatibleChart`] rather than being handed to
/// another chart. Steps anywhere else are unaffected.
pub struct SphereManifold {
    dim: usize,
    sampler: SamplerConfig,
    atlas: Atlas,
}

impl SphereManifold {
    pub fn new(dim: usize, sampler: SamplerConfig) -> Result<Self> {
        if dim != 2 {
            return Err(GeometryError::UnsupportedDimension {
                manifold: "sphere",
                dim,
            });
        }
        match &sampler {
            SamplerConfig::Uniform { low, high } => {
                if !low.is_empty() || !high.is_empty() {
                    return Err(GeometryError::invalid_sampler(
                        "sphere uniform sampler takes no bounds",
                    ));
                }
            }
            SamplerConfig::VonMisesFisher { mu, kappa } => {
                if mu.len() != dim + 1 {
                    return Err(GeometryError::invalid_sampler(format!(
                        "mu must have length {}",
                        dim + 1
                    )));
                }
                if (norm(mu) - 1.0).abs() > 1e-6 {
                    return Err(GeometryError::invalid_sampler("mu must be a unit vector"));
                }
                if !kappa.is_finite() || *kappa <= 0.0 {
                    return Err(GeometryError::invalid_sampler("kappa must be positive"));
                }
            }
            other => {
                return Err(GeometryError::invalid_sampler(format!(
                    "sphere manifold cannot draw from a {} sampler",
                    other.kind()
                )));
            }
        }

        let atlas = Atlas::global(Chart::new(
            from_local(&vec![0.0; dim]),
            f64::INFINITY,
            f64::INFINITY,
            Box::new(to_local),
            Box::new(from_local),
            Box::new(great_circle_distance),
        ));

        Ok(Self {
            dim,
            sampler,
            atlas,
        })
    }
}

impl Manifold for SphereManifold {
    fn name(&self) -> &'static str {
        "sphere"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn ambient_dim(&self) -> usize {
        self.dim + 1
    }

    fn atlas(&self) -> Result<&Atlas> {
        Ok(&self.atlas)
    }

    fn starting_state(&self) -> Vec<f64> {
        from_local(&vec![0.0; self.dim])
    }

    fn pdf(&self, point: &[f64]) -> Result<f64> {
        match &self.sampler {
            SamplerConfig::Uniform { .. } => {
                if (norm(point) - 1.0).abs() < SURFACE_TOLERANCE {
                    Ok(1.0 / (2.0 * PI).powf(self.dim as f64 / 2.0))
                } else {
                    Ok(0.0)
                }
            }
            SamplerConfig::VonMisesFisher { mu, kappa } => {
                Ok(von_mises_fisher_pdf(mu, *kappa, point))
            }
            // Ruled out at construction.
            _ => Err(GeometryError::unsupported(self.name(), "pdf")),
        }
    }

    fn sample_one(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        match &self.sampler {
            SamplerConfig::Uniform { .. } => Ok(uniform_unit_vector(rng, self.dim + 1)),
            SamplerConfig::VonMisesFisher { mu, kappa } => {
                Ok(draw_von_mises_fisher(rng, mu, *kappa))
            }
            _ => Err(GeometryError::unsupported(self.name(), "sample")),
        }
    }

    fn distance(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        Ok(great_circle_distance(x, y))
    }

    fn metric_tensor(&self, point: &[f64]) -> Result<MetricTensor> {
        let local = to_local(point);
        Ok(MetricTensor::diagonal(&[1.0, local[0].sin().powi(2)]))
    }

    fn implicit_function(&self, coords: &[f64]) -> Result<f64> {
        Ok(1.0 - coords[0] * coords[0] - coords[1] * coords[1])
    }
}
