//! Small dimension-generic helpers shared by charts, metrics and samplers.

use std::f64::consts::PI;

use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn norm_squared(v: &[f64]) -> f64 {
    dot(v, v)
}

#[inline]
pub fn norm(v: &[f64]) -> f64 {
    norm_squared(v).sqrt()
}

/// Flat distance between two points of equal dimension.
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Wraps an angle into `[0, 2*pi)`.
#[inline]
pub fn standardize_angle(angle: f64) -> f64 {
    angle.rem_euclid(2.0 * PI)
}

/// Uniformly random direction on the unit sphere of `R^dim`, drawn by
/// normalizing an isotropic Gaussian vector.
pub fn uniform_unit_vector(rng: &mut dyn RngCore, dim: usize) -> Vec<f64> {
    loop {
        let v: Vec<f64> = (0..dim).map(|_| StandardNormal.sample(rng)).collect();
        let length = norm(&v);
        if length > 1e-12 {
            return v.iter().map(|x| x / length).collect();
        }
    }
}

/// `n` evenly spaced values from `start` to `end`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn dot_and_norms_agree() {
        let v = [3.0, 4.0];
        assert_relative_eq!(dot(&v, &v), 25.0);
        assert_relative_eq!(norm_squared(&v), 25.0);
        assert_relative_eq!(norm(&v), 5.0);
        assert_relative_eq!(euclidean_distance(&[1.0, 1.0], &[4.0, 5.0]), 5.0);
    }

    #[test]
    fn standardize_angle_wraps_into_period() {
        assert_abs_diff_eq!(standardize_angle(0.0), 0.0);
        assert_relative_eq!(standardize_angle(-PI / 2.0), 3.0 * PI / 2.0);
        assert_relative_eq!(standardize_angle(5.0 * PI), PI);
        assert_abs_diff_eq!(standardize_angle(2.0 * PI), 0.0);
    }

    #[test]
    fn unit_vectors_have_unit_norm() {
        let mut rng = StdRng::seed_from_u64(7);
        for dim in [1, 2, 3, 5] {
            let v = uniform_unit_vector(&mut rng, dim);
            assert_eq!(v.len(), dim);
            assert_relative_eq!(norm(&v), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn linspace_includes_endpoints() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(-1.0, 1.0, 1), vec![-1.0]);
        let axis = linspace(-1.0, 1.0, 5);
        assert_eq!(axis.len(), 5);
        assert_relative_eq!(axis[0], -1.0);
        assert_relative_eq!(axis[2], 0.0);
        assert_relative_eq!(axis[4], 1.0);
    }
}
