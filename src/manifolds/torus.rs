use std::f64::consts::PI;

use rand::{Rng, RngCore};

use crate::core::chart::{Atlas, Chart};
use crate::core::metric::MetricTensor;
use crate::core::numerics::{linspace, norm, standardize_angle};
use crate::error::{GeometryError, Result};
use crate::manifolds::Manifold;

/// Radius of the circle around the central one-dimensional hole.
const MAJOR_RADIUS: f64 = 2.0 / 3.0;
/// Radius of the tube around the two-dimensional hole.
const MINOR_RADIUS: f64 = 1.0 / 3.0;

/// Angle pair `[theta, phi]` to an ambient point, `theta` around the axis
/// of revolution and `phi` around the tube.
fn from_local(local: &[f64]) -> Vec<f64> {
    let ring = MAJOR_RADIUS + MINOR_RADIUS * local[1].cos();
    vec![
        ring * local[0].cos(),
        ring * local[0].sin(),
        MINOR_RADIUS * local[1].sin(),
    ]
}

/// Ambient point on the torus back to its angle pair, both angles in
/// `(-pi, pi]`.
fn to_local(point: &[f64]) -> Vec<f64> {
    let theta = point[1].atan2(point[0]);
    let phi = point[2].atan2(point[0].hypot(point[1]) - MAJOR_RADIUS);
    vec![theta, phi]
}

/// Angular composition distance, treating the cut torus as a cylinder.
///
/// Both winding candidates reduce to the same wrapped difference, so the
/// minimum never picks the shorter way around. Kept as the distance
/// contract of this variant.
fn toroidal_distance(x: &[f64], y: &[f64]) -> f64 {
    let x_local = to_local(x);
    let y_local = to_local(y);

    let theta = standardize_angle(y_local[0] - x_local[0])
        .min(standardize_angle(y_local[0] - x_local[0]));
    let phi = standardize_angle(y_local[1] - x_local[1])
        .min(standardize_angle(y_local[1] - x_local[1]));

    (theta * MINOR_RADIUS).hypot(phi * MAJOR_RADIUS)
}

/// Torus of revolution in `R^3` with fixed radii, covered by one
/// angle-pair chart.
///
/// Stepping is a retraction: candidate angles wrap back into the
/// fundamental domain instead of being tested against a chart image
/// ball, so a walker can wind around either hole indefinitely.
pub struct TorusManifold {
    dim: usize,
    atlas: Atlas,
}

impl TorusManifold {
    pub fn new(dim: usize) -> Result<Self> {
        if dim != 2 {
            return Err(GeometryError::UnsupportedDimension {
                manifold: "torus",
                dim,
            });
        }

        let atlas = Atlas::global(Chart::new(
            from_local(&vec![0.0; dim]),
            f64::INFINITY,
            f64::INFINITY,
            Box::new(to_local),
            Box::new(from_local),
            Box::new(toroidal_distance),
        ));

        Ok(Self { dim, atlas })
    }
}

impl Manifold for TorusManifold {
    fn name(&self) -> &'static str {
        "torus"
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

    /// Constant density of the uniform sampler. No surface membership
    /// test is applied; the constant is returned for any point.
    fn pdf(&self, _point: &[f64]) -> Result<f64> {
        Ok(1.0 / ((2.0 * PI * MINOR_RADIUS).powi(2) * MAJOR_RADIUS))
    }

    fn sample_one(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        // TODO: weight phi by R + r*cos(phi) so draws match the constant
        // pdf; uniform angles overweight the inner rim.
        let local = [rng.gen_range(-PI..PI), rng.gen_range(-PI..PI)];
        Ok(from_local(&local))
    }

    fn distance(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        Ok(toroidal_distance(x, y))
    }

    fn metric_tensor(&self, point: &[f64]) -> Result<MetricTensor> {
        let local = to_local(point);
        let ring = MAJOR_RADIUS + MINOR_RADIUS * local[1].cos();
        Ok(MetricTensor::diagonal(&[
            ring * ring,
            MINOR_RADIUS * MINOR_RADIUS,
        ]))
    }

    /// Height of the tube above the `z = 0` plane at the radial distance
    /// of `coords`. Not defined outside the annulus the torus projects
    /// onto.
    fn implicit_function(&self, coords: &[f64]) -> Result<f64> {
        let radial = coords[0].hypot(coords[1]) - MAJOR_RADIUS;
        Ok((MINOR_RADIUS * MINOR_RADIUS - radial * radial).sqrt())
    }

    fn grid(&self, n: usize) -> Result<Vec<Vec<f64>>> {
        let per_dim = (n as f64).powf(1.0 / self.dim as f64) as usize;
        let axis = linspace(-PI, PI, per_dim);
        let mut mesh = Vec::with_capacity(per_dim * per_dim);
        for theta in &axis {
            for phi in &axis {
                mesh.push(from_local(&[*theta, *phi]));
            }
        }
        Ok(mesh)
    }

    /// Retraction step: rescale by the metric, advance the local angles
    /// and wrap them back into `[0, 2 pi)`. The wrap keeps the single
    /// chart valid everywhere, so the only failure is an action the
    /// metric cannot rescale.
    fn manifold_step(&self, state: &[f64], action: &[f64], max_step_size: f64) -> Result<Vec<f64>> {
        let metric = self.metric_tensor(state)?;
        let scale = max_step_size * norm(action) / metric.norm(action);
        if !scale.is_finite() {
            tracing::trace!(
                manifold = self.name(),
                "action has no finite metric rescaling"
            );
            return Err(GeometryError::NoCompatibleChart);
        }
        let mut local = to_local(state);
        for (coord, delta) in local.iter_mut().zip(action) {
            *coord = standardize_angle(*coord + scale * delta);
        }
        Ok(from_local(&local))
    }
}
