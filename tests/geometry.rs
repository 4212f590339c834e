use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::SeedableRng;
use rand::rngs::StdRng;

use chartwalk::core::sampler::SamplerConfig;
use chartwalk::error::GeometryError;
use chartwalk::manifolds::{EuclideanManifold, Manifold, SphereManifold, TorusManifold};

#[test]
fn torus_chart_origin_sits_on_the_outer_equator() {
    let torus = TorusManifold::new(2).unwrap();
    let chart = &torus.atlas().unwrap().charts()[0];

    // R + r = 1 for the fixed radii.
    let ambient = chart.inverse_map(&[0.0, 0.0]);
    assert_relative_eq!(ambient[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ambient[1], 0.0);
    assert_abs_diff_eq!(ambient[2], 0.0);

    let local = chart.map(&ambient);
    assert_abs_diff_eq!(local[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(local[1], 0.0, epsilon = 1e-12);
}

#[test]
fn sphere_chart_round_trips_on_sampled_points() {
    let sphere = SphereManifold::new(2, SamplerConfig::uniform_surface()).unwrap();
    let chart = &sphere.atlas().unwrap().charts()[0];
    let mut rng = StdRng::seed_from_u64(21);
    for point in sphere.sample(&mut rng, 50).unwrap() {
        let back = chart.inverse_map(&chart.map(&point));
        for (roundtripped, original) in back.iter().zip(&point) {
            assert_abs_diff_eq!(*roundtripped, *original, epsilon = 1e-9);
        }
    }
}

#[test]
fn distance_axioms_hold_on_euclidean_and_sphere() {
    let euclidean = EuclideanManifold::new(
        2,
        SamplerConfig::uniform_box(vec![-1.0, -1.0], vec![1.0, 1.0]),
    )
    .unwrap();
    let sphere = SphereManifold::new(2, SamplerConfig::uniform_surface()).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    for manifold in [&euclidean as &dyn Manifold, &sphere as &dyn Manifold] {
        for _ in 0..50 {
            let x = manifold.sample_one(&mut rng).unwrap();
            let y = manifold.sample_one(&mut rng).unwrap();
            let z = manifold.sample_one(&mut rng).unwrap();

            let self_distance = manifold.distance(&x, &x).unwrap();
            assert!(
                self_distance.abs() < 1e-6,
                "d(x, x) = {self_distance} on {}",
                manifold.name()
            );

            let xy = manifold.distance(&x, &y).unwrap();
            let yx = manifold.distance(&y, &x).unwrap();
            assert!(xy >= 0.0);
            assert_relative_eq!(xy, yx, epsilon = 1e-12);

            let xz = manifold.distance(&x, &z).unwrap();
            let yz = manifold.distance(&y, &z).unwrap();
            assert!(xz <= xy + yz + 1e-9, "triangle violated on {}", manifold.name());
        }
    }
}

#[test]
fn metric_tensors_follow_the_charts() {
    let euclidean = EuclideanManifold::new(
        3,
        SamplerConfig::uniform_box(vec![-1.0; 3], vec![1.0; 3]),
    )
    .unwrap();
    let flat = euclidean.metric_tensor(&[0.3, -0.2, 0.9]).unwrap();
    assert_eq!(flat.dim(), 3);
    assert_relative_eq!(flat.quadratic_form(&[1.0, 2.0, 2.0]), 9.0);

    let sphere = SphereManifold::new(2, SamplerConfig::uniform_surface()).unwrap();
    let equator = sphere.metric_tensor(&[0.0, 1.0, 0.0]).unwrap();
    assert_relative_eq!(equator.entry(0, 0), 1.0);
    assert_relative_eq!(equator.entry(1, 1), 1.0, epsilon = 1e-12);

    let torus = TorusManifold::new(2).unwrap();
    let outer = torus.metric_tensor(&[1.0, 0.0, 0.0]).unwrap();
    assert_relative_eq!(outer.entry(0, 0), 1.0, epsilon = 1e-12);
    assert_relative_eq!(outer.entry(1, 1), 1.0 / 9.0, epsilon = 1e-12);
}

#[test]
fn implicit_functions_describe_the_surfaces() {
    let plane = EuclideanManifold::new(
        2,
        SamplerConfig::uniform_box(vec![-1.0, -1.0], vec![1.0, 1.0]),
    )
    .unwrap();
    assert_abs_diff_eq!(plane.implicit_function(&[0.4, 0.4]).unwrap(), 0.0);

    let volume = EuclideanManifold::new(
        3,
        SamplerConfig::uniform_box(vec![-1.0; 3], vec![1.0; 3]),
    )
    .unwrap();
    assert!(matches!(
        volume.implicit_function(&[0.0; 3]),
        Err(GeometryError::Unsupported { .. })
    ));

    // 1 - x^2 - y^2 recovers z^2 on the unit sphere.
    let sphere = SphereManifold::new(2, SamplerConfig::uniform_surface()).unwrap();
    let height = sphere.implicit_function(&[0.6, 0.0, 0.8]).unwrap();
    assert_relative_eq!(height, 0.64, epsilon = 1e-12);

    let torus = TorusManifold::new(2).unwrap();
    let tube_top = torus.implicit_function(&[2.0 / 3.0, 0.0]).unwrap();
    assert_relative_eq!(tube_top, 1.0 / 3.0);
}
