//! Metropolis random walk over any manifold with a density.

use rand::{Rng, RngCore};

use crate::core::numerics::uniform_unit_vector;
use crate::error::Result;
use crate::manifolds::Manifold;

/// Metropolis chain of `n` points on `manifold`.
///
/// Each proposal steps from the current state along a uniformly random
/// unit direction and is accepted with probability
/// `pdf(candidate) / pdf(state)`; the chain keeps proposing until one is
/// accepted, so exactly one accepted state is recorded per sample.
/// `starting_state` and `step_size` default to the manifold's own.
///
/// There is no retry bound: a chain started where every reachable
/// density is zero will not terminate. Stepping and density errors
/// propagate.
pub fn random_walk(
    manifold: &dyn Manifold,
    rng: &mut dyn RngCore,
    n: usize,
    starting_state: Option<&[f64]>,
    step_size: Option<f64>,
) -> Result<Vec<Vec<f64>>> {
    let step_size = step_size.unwrap_or(manifold.max_step_size());
    let mut state = match starting_state {
        Some(point) => point.to_vec(),
        None => manifold.starting_state(),
    };

    let mut samples = Vec::with_capacity(n);
    for _ in 0..n {
        let density = manifold.pdf(&state)?;
        loop {
            let direction = uniform_unit_vector(rng, manifold.dim());
            let candidate = manifold.manifold_step(&state, &direction, step_size)?;
            let candidate_density = manifold.pdf(&candidate)?;
            if rng.gen_range(0.0..1.0) < candidate_density / density {
                state = candidate;
                break;
            }
        }
        samples.push(state.clone());
    }

    tracing::debug!(
        manifold = manifold.name(),
        samples = samples.len(),
        "random walk complete"
    );
    Ok(samples)
}
