//! Local coordinate patches and the ordered collection covering a manifold.

use crate::core::numerics::euclidean_distance;

/// Pure coordinate transform between ambient and chart-local space.
pub type CoordinateMap = Box<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;

/// Ambient-space distance used for chart domain tests.
pub type DistanceFn = Box<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>;

/// A local coordinate patch.
///
/// Domains and images are balls: the domain ball lives in ambient space and
/// is measured with the owning manifold's distance, the image ball lives in
/// local coordinates and is always measured with the flat distance.
/// `map` and `inverse_map` must be mutual inverses on the domain. That is a
/// construction-time contract and is never revalidated at runtime.
pub struct Chart {
    domain_center: Vec<f64>,
    domain_radius: f64,
    image_center: Vec<f64>,
    image_radius: f64,
    map: CoordinateMap,
    inverse_map: CoordinateMap,
    distance: DistanceFn,
}

impl Chart {
    /// The image center is derived as `map(domain_center)`.
    pub fn new(
        domain_center: Vec<f64>,
        domain_radius: f64,
        image_radius: f64,
        map: CoordinateMap,
        inverse_map: CoordinateMap,
        distance: DistanceFn,
    ) -> Self {
        let image_center = map(&domain_center);
        Self {
            domain_center,
            domain_radius,
            image_center,
            image_radius,
            map,
            inverse_map,
            distance,
        }
    }

    /// Ambient point to local coordinates.
    pub fn map(&self, point: &[f64]) -> Vec<f64> {
        (self.map)(point)
    }

    /// Local coordinates back to an ambient point.
    pub fn inverse_map(&self, local: &[f64]) -> Vec<f64> {
        (self.inverse_map)(local)
    }

    pub fn domain_center(&self) -> &[f64] {
        &self.domain_center
    }

    pub fn domain_radius(&self) -> f64 {
        self.domain_radius
    }

    pub fn image_center(&self) -> &[f64] {
        &self.image_center
    }

    pub fn image_radius(&self) -> f64 {
        self.image_radius
    }

    /// True when `point` lies strictly inside the domain ball.
    pub fn domain_contains(&self, point: &[f64]) -> bool {
        (self.distance)(point, &self.domain_center) < self.domain_radius
    }

    /// True when `local` lies strictly inside the image ball.
    pub fn image_contains(&self, local: &[f64]) -> bool {
        euclidean_distance(local, &self.image_center) < self.image_radius
    }
}

/// Ordered, immutable collection of charts. The order is the scan order of
/// the stepping algorithm.
pub struct Atlas {
    charts: Vec<Chart>,
}

impl Atlas {
    pub fn new(charts: Vec<Chart>) -> Self {
        Self { charts }
    }

    /// Single chart valid on the whole manifold.
    pub fn global(chart: Chart) -> Self {
        Self::new(vec![chart])
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// First chart in declaration order whose domain contains `point`.
    pub fn find(&self, point: &[f64]) -> Option<&Chart> {
        self.charts.iter().find(|chart| chart.domain_contains(point))
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
