//! Gym-style environment handle around a manifold walker.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{GeometryError, Result};
use crate::manifolds::{Manifold, ManifoldKind};
use crate::walk;

/// Auxiliary key-value payload returned alongside observations.
pub type Info = HashMap<String, f64>;

/// Axis-aligned box descriptor for observation and action spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace {
    pub low: f64,
    pub high: f64,
    pub shape: Vec<usize>,
}

/// Outcome of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Vec<f64>,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

/// Owns a manifold, the walker state on it and the random generator
/// feeding its samplers.
///
/// `reset` and `step` are the only mutators of the walker state, and
/// every observation handed out is an independent copy, so callers can
/// never alias the internal state.
pub struct ManifoldEnv {
    manifold: Box<dyn Manifold>,
    observation_space: BoxSpace,
    action_space: BoxSpace,
    state: Option<Vec<f64>>,
    rng: StdRng,
}

impl ManifoldEnv {
    /// Builds the manifold described by `kind` and wraps it.
    pub fn new(kind: &ManifoldKind) -> Result<Self> {
        Ok(Self::from_manifold(kind.build()?))
    }

    pub fn from_manifold(manifold: Box<dyn Manifold>) -> Self {
        let observation_space = BoxSpace {
            low: -1.0,
            high: 1.0,
            shape: vec![manifold.ambient_dim()],
        };
        let action_space = BoxSpace {
            low: -1.0,
            high: 1.0,
            shape: vec![manifold.dim()],
        };
        tracing::info!(
            target: "env",
            manifold = manifold.name(),
            dim = manifold.dim(),
            ambient_dim = manifold.ambient_dim(),
            "environment ready"
        );
        Self {
            manifold,
            observation_space,
            action_space,
            state: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Moves the walker to the manifold's starting state. A seed reseeds
    /// this environment's generator first, making the subsequent episode
    /// reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> (Vec<f64>, Info) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let state = self.manifold.starting_state();
        self.state = Some(state.clone());
        tracing::debug!(
            target: "env",
            manifold = self.manifold.name(),
            seeded = seed.is_some(),
            "reset to the starting state"
        );
        (state, Info::new())
    }

    /// Advances the walker along `action` within the manifold's step
    /// budget.
    ///
    /// Calling this before `reset` fails with
    /// [`GeometryError::NotReset`] rather than leaving the walker state
    /// undefined.
    pub fn step(&mut self, action: &[f64]) -> Result<Step> {
        let state = self.state.as_ref().ok_or(GeometryError::NotReset)?;
        if action.len() != self.manifold.dim() {
            return Err(GeometryError::DimensionMismatch {
                expected: self.manifold.dim(),
                actual: action.len(),
            });
        }
        let next = self
            .manifold
            .manifold_step(state, action, self.manifold.max_step_size())?;
        self.state = Some(next.clone());
        Ok(Step {
            observation: next,
            reward: 0.0,
            terminated: false,
            truncated: false,
            info: Info::new(),
        })
    }

    pub fn manifold(&self) -> &dyn Manifold {
        self.manifold.as_ref()
    }

    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    pub fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    /// Current walker state, when `reset` has been called.
    pub fn state(&self) -> Option<&[f64]> {
        self.state.as_deref()
    }

    /// `n` draws from the manifold's configured sampler using this
    /// environment's generator.
    pub fn sample(&mut self, n: usize) -> Result<Vec<Vec<f64>>> {
        self.manifold.sample(&mut self.rng, n)
    }

    pub fn pdf(&self, point: &[f64]) -> Result<f64> {
        self.manifold.pdf(point)
    }

    pub fn distance(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        self.manifold.distance(x, y)
    }

    pub fn grid(&self, n: usize) -> Result<Vec<Vec<f64>>> {
        self.manifold.grid(n)
    }

    /// Metropolis chain from `starting_state`, falling back to the
    /// current walker state when one exists and to the manifold's
    /// starting state otherwise. The walker state itself is not
    /// advanced.
    pub fn random_walk(
        &mut self,
        n: usize,
        starting_state: Option<&[f64]>,
        step_size: Option<f64>,
    ) -> Result<Vec<Vec<f64>>> {
        walk::random_walk(
            self.manifold.as_ref(),
            &mut self.rng,
            n,
            starting_state.or(self.state.as_deref()),
            step_size,
        )
    }
}
