//! Charted-manifold geometry: atlases, metric-scaled stepping and
//! Metropolis sampling behind a gym-style environment.

pub mod core {
    pub mod chart;
    pub mod metric;
    pub mod numerics;
    pub mod sampler;
}

pub mod env;
pub mod error;
pub mod manifolds;
pub mod walk;
