//! Sampler configuration shared by the manifold variants.

use std::f64::consts::PI;

use rand::{Rng, RngCore};
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Distribution selected at construction time.
///
/// Which kinds a manifold accepts, and how the parameters are interpreted,
/// is variant-specific: the Euclidean box reads `Uniform` bounds per
/// coordinate, while the sphere reads a bare `Uniform` as uniform over its
/// whole surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SamplerConfig {
    /// Axis-aligned box, or the whole surface when no bounds are given.
    Uniform {
        #[serde(default)]
        low: Vec<f64>,
        #[serde(default)]
        high: Vec<f64>,
    },
    /// Isotropic gaussian with a shared standard deviation.
    Gaussian { mean: Vec<f64>, std: f64 },
    /// Concentration `kappa` around a unit mean direction `mu`.
    VonMisesFisher { mu: Vec<f64>, kappa: f64 },
}

impl SamplerConfig {
    /// Uniform over an axis-aligned box with per-coordinate bounds.
    pub fn uniform_box(low: Vec<f64>, high: Vec<f64>) -> Self {
        Self::Uniform { low, high }
    }

    /// Uniform over a manifold's whole surface.
    pub fn uniform_surface() -> Self {
        Self::Uniform {
            low: Vec::new(),
            high: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::Gaussian { .. } => "gaussian",
            Self::VonMisesFisher { .. } => "von Mises-Fisher",
        }
    }
}

/// Density of the axis-aligned uniform box, `1 / volume` inside and `0.0`
/// outside. Bounds are inclusive on both sides.
pub fn box_pdf(low: &[f64], high: &[f64], point: &[f64]) -> f64 {
    let inside = point
        .iter()
        .zip(low.iter().zip(high))
        .all(|(x, (lo, hi))| *lo <= *x && *x <= *hi);
    if !inside {
        return 0.0;
    }
    let volume: f64 = low.iter().zip(high).map(|(lo, hi)| hi - lo).product();
    1.0 / volume
}

pub fn draw_box(rng: &mut dyn RngCore, low: &[f64], high: &[f64]) -> Vec<f64> {
    low.iter()
        .zip(high)
        .map(|(&lo, &hi)| rng.gen_range(lo..=hi))
        .collect()
}

/// Isotropic gaussian density with the normalizer `(2 pi)^(dim/2) * std`,
/// the standard deviation entering to the first power whatever the
/// dimension.
pub fn gaussian_pdf(mean: &[f64], std: f64, point: &[f64]) -> f64 {
    let exponent = point
        .iter()
        .zip(mean)
        .map(|(x, m)| (x - m) * (x - m))
        .sum::<f64>()
        / (2.0 * std * std);
    let normalizer = (2.0 * PI).powf(mean.len() as f64 / 2.0) * std;
    (-exponent).exp() / normalizer
}

pub fn draw_gaussian(rng: &mut dyn RngCore, mean: &[f64], std: f64) -> Vec<f64> {
    mean.iter()
        .map(|m| {
            let noise: f64 = StandardNormal.sample(rng);
            m + std * noise
        })
        .collect()
}
