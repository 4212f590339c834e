use std::fs;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use chartwalk::core::numerics::uniform_unit_vector;
use chartwalk::env::ManifoldEnv;
use chartwalk::error::GeometryError;
use chartwalk::manifolds::ManifoldKind;

/// Demo run description, readable from a RON file passed as the first
/// argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DemoConfig {
    manifold: ManifoldKind,
    seed: u64,
    steps: usize,
    walk_samples: usize,
}

const DEFAULT_CONFIG: &str = r#"(
    manifold: Sphere(
        dim: 2,
        sampler: VonMisesFisher(mu: [0.0, 0.0, 1.0], kappa: 8.0),
    ),
    seed: 7,
    steps: 200,
    walk_samples: 500,
)"#;

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    println!("--- chartwalk manifold walker ---");

    // 1. Build the environment around the configured manifold.
    let mut env = ManifoldEnv::new(&config.manifold)?;
    let dim = env.manifold().dim();
    println!(
        "Walking the {} manifold (dim {}, ambient dim {}).",
        env.manifold().name(),
        dim,
        env.manifold().ambient_dim()
    );

    // 2. Run one episode of uniformly random unit actions.
    let (home, _info) = env.reset(Some(config.seed));
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut state = home.clone();
    let mut chart_misses = 0usize;
    for _ in 0..config.steps {
        let action = uniform_unit_vector(&mut rng, dim);
        match env.step(&action) {
            Ok(step) => state = step.observation,
            Err(GeometryError::NoCompatibleChart) => chart_misses += 1,
            Err(other) => return Err(other.into()),
        }
    }
    let displaced = env.manifold().distance(&state, &home)?;
    println!(
        "{} steps taken ({} chart misses), displaced {:.4} from the start.",
        config.steps - chart_misses,
        chart_misses,
        displaced
    );

    // 3. Draw a Metropolis chain from the configured density.
    let start = std::time::Instant::now();
    let samples = env.random_walk(config.walk_samples, None, None)?;
    let mut total_density = 0.0;
    for sample in &samples {
        total_density += env.pdf(sample)?;
    }
    println!(
        "Drew {} Metropolis samples in {:.2?}, mean density {:.4}.",
        samples.len(),
        start.elapsed(),
        total_density / samples.len().max(1) as f64
    );

    Ok(())
}

fn load_config() -> Result<DemoConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text =
                fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            ron::from_str(&text).with_context(|| format!("parsing config {path}"))
        }
        None => ron::from_str(DEFAULT_CONFIG).context("parsing built-in config"),
    }
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_config_parses() {
        let config: DemoConfig = ron::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.steps, 200);
        assert_eq!(config.walk_samples, 500);
        assert!(matches!(
            config.manifold,
            ManifoldKind::Sphere { dim: 2, .. }
        ));
    }
}
