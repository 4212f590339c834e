use approx::assert_relative_eq;

use chartwalk::core::numerics::euclidean_distance;
use chartwalk::core::sampler::SamplerConfig;
use chartwalk::env::ManifoldEnv;
use chartwalk::error::GeometryError;
use chartwalk::manifolds::ManifoldKind;

fn boxed_plane() -> ManifoldKind {
    ManifoldKind::Euclidean {
        dim: 2,
        sampler: SamplerConfig::uniform_box(vec![-0.5, -0.5], vec![0.5, 0.5]),
    }
}

fn uniform_sphere() -> ManifoldKind {
    ManifoldKind::Sphere {
        dim: 2,
        sampler: SamplerConfig::uniform_surface(),
    }
}

#[test]
fn spaces_describe_the_manifold_dimensions() {
    let env = ManifoldEnv::new(&uniform_sphere()).unwrap();
    assert_eq!(env.observation_space().shape, vec![3]);
    assert_eq!(env.action_space().shape, vec![2]);
    assert_relative_eq!(env.observation_space().low, -1.0);
    assert_relative_eq!(env.action_space().high, 1.0);
    assert!(env.state().is_none());
}

#[test]
fn reset_hands_out_an_independent_copy() {
    let mut env = ManifoldEnv::new(&boxed_plane()).unwrap();
    let (mut observation, info) = env.reset(None);
    assert!(info.is_empty());
    assert_eq!(observation, vec![0.0, 0.0]);

    observation[0] = 42.0;
    assert_eq!(env.state(), Some(&[0.0, 0.0][..]));
}

#[test]
fn stepping_before_reset_is_rejected() {
    let mut env = ManifoldEnv::new(&ManifoldKind::Torus { dim: 2 }).unwrap();
    assert!(matches!(
        env.step(&[1.0, 0.0]),
        Err(GeometryError::NotReset)
    ));
}

#[test]
fn action_dimension_is_checked() {
    let mut env = ManifoldEnv::new(&uniform_sphere()).unwrap();
    env.reset(None);
    assert!(matches!(
        env.step(&[1.0]),
        Err(GeometryError::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn step_advances_the_walker() {
    let mut env = ManifoldEnv::new(&boxed_plane()).unwrap();
    env.reset(None);

    let step = env.step(&[1.0, 0.0]).unwrap();
    assert_relative_eq!(step.observation[0], 0.01, epsilon = 1e-12);
    assert_eq!(step.reward, 0.0);
    assert!(!step.terminated);
    assert!(!step.truncated);
    assert!(step.info.is_empty());
    assert_eq!(env.state().unwrap(), step.observation.as_slice());

    let again = env.step(&[1.0, 0.0]).unwrap();
    assert_relative_eq!(again.observation[0], 0.02, epsilon = 1e-12);
}

#[test]
fn seeded_resets_reproduce_episodes() {
    let mut env = ManifoldEnv::new(&uniform_sphere()).unwrap();

    env.reset(Some(42));
    let first_draws = env.sample(5).unwrap();
    let first_walk = env.random_walk(20, None, None).unwrap();

    env.reset(Some(42));
    assert_eq!(env.sample(5).unwrap(), first_draws);
    assert_eq!(env.random_walk(20, None, None).unwrap(), first_walk);
}

#[test]
fn random_walk_honors_an_explicit_starting_state() {
    let mut env = ManifoldEnv::new(&boxed_plane()).unwrap();
    env.reset(Some(23));
    let start = [0.25, -0.25];
    let chain = env.random_walk(10, Some(&start), None).unwrap();
    assert_eq!(chain.len(), 10);

    // The density is constant inside the box, so every proposal is
    // accepted and each sample sits one step from its predecessor. The
    // first one steps from `start`, not from the walker at the origin.
    assert_relative_eq!(euclidean_distance(&start, &chain[0]), 0.01, epsilon = 1e-12);
    for pair in chain.windows(2) {
        assert_relative_eq!(
            euclidean_distance(&pair[0], &pair[1]),
            0.01,
            epsilon = 1e-12
        );
    }

    // The chain never advances the walker itself.
    assert_eq!(env.state(), Some(&[0.0, 0.0][..]));
}

#[test]
fn invalid_kinds_fail_at_construction() {
    let tall_sphere = ManifoldKind::Sphere {
        dim: 3,
        sampler: SamplerConfig::uniform_surface(),
    };
    assert!(matches!(
        ManifoldEnv::new(&tall_sphere),
        Err(GeometryError::UnsupportedDimension { dim: 3, .. })
    ));

    let wide_box = ManifoldKind::Euclidean {
        dim: 2,
        sampler: SamplerConfig::uniform_box(vec![-2.0, -2.0], vec![2.0, 2.0]),
    };
    assert!(matches!(
        ManifoldEnv::new(&wide_box),
        Err(GeometryError::InvalidSampler(_))
    ));
}

#[test]
fn kinds_parse_from_ron_documents() {
    let sphere: ManifoldKind = ron::from_str(
        "Sphere(dim: 2, sampler: VonMisesFisher(mu: [0.0, 0.0, 1.0], kappa: 8.0))",
    )
    .unwrap();
    assert!(ManifoldEnv::new(&sphere).is_ok());

    let bare_uniform: ManifoldKind = ron::from_str("Sphere(dim: 2, sampler: Uniform())").unwrap();
    assert!(ManifoldEnv::new(&bare_uniform).is_ok());

    let boxed: ManifoldKind = ron::from_str(
        "Euclidean(dim: 2, sampler: Uniform(low: [-0.5, -0.5], high: [0.5, 0.5]))",
    )
    .unwrap();
    assert!(ManifoldEnv::new(&boxed).is_ok());
}

#[test]
fn grids_mesh_the_supported_surfaces() {
    let env = ManifoldEnv::new(&boxed_plane()).unwrap();
    let mesh = env.grid(110).unwrap();
    assert_eq!(mesh.len(), 100);
    assert!(
        mesh.iter()
            .all(|p| p.iter().all(|c| (-1.0..=1.0).contains(c)))
    );

    let env = ManifoldEnv::new(&uniform_sphere()).unwrap();
    assert!(matches!(
        env.grid(100),
        Err(GeometryError::Unsupported { .. })
    ));
}
