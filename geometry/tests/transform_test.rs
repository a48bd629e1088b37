use geometry::transform::{similarity_transform, SimilarityTransform, Transform};
use geometry::{lookat_camera, orthographic_project, perspective_project, to_image, RenderError};
use math::hcm::{point3, vec3, Mat3, Point3};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_point(rng: &mut StdRng, extent: f32) -> Point3 {
    point3(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

#[test]
fn similarity_inverse_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let scale = rng.gen_range(0.05..20.0);
        let angles = (
            math::new_deg(rng.gen_range(-180.0..180.0)),
            math::new_deg(rng.gen_range(-180.0..180.0)),
            math::new_deg(rng.gen_range(-180.0..180.0)),
        );
        let translation = vec3(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        );
        let trans = SimilarityTransform::from_euler(scale, angles, translation).unwrap();
        let vertices = (0..20)
            .map(|_| random_point(&mut rng, 100.0))
            .collect::<Vec<_>>();

        let forward = similarity_transform(
            &vertices,
            trans.scale(),
            trans.rotation(),
            trans.translation(),
        )
        .unwrap();
        let inv = trans.inverse();
        for (p, q) in vertices.iter().zip(forward.iter()) {
            let back = inv.apply(*q);
            let tolerance = 1e-3 * (1.0 + p.distance_to(Point3::ORIGIN));
            assert!(
                back.distance_to(*p) < tolerance,
                "{} -> {} -> {} (scale {})",
                p,
                q,
                back,
                scale
            );
        }
    }
}

#[test]
fn euler_angles_match_axis_rotations() {
    let pitch = math::new_deg(20.0);
    let yaw = math::new_deg(-35.0);
    let roll = math::new_deg(70.0);
    let r = Mat3::from_euler(pitch, yaw, roll);
    let p = vec3(0.3, -1.2, 2.0);
    let sequential = Mat3::rotater_z(roll) * (Mat3::rotater_y(yaw) * (Mat3::rotater_x(pitch) * p));
    math::assert_close!(r * p, sequential);
}

#[test]
fn non_finite_input_is_rejected() {
    let bad = vec![point3(0.0, 0.0, 0.0), point3(f32::INFINITY, 0.0, 0.0)];
    assert_eq!(
        similarity_transform(&bad, 1.0, Mat3::IDENTITY, vec3(0.0, 0.0, 0.0)).unwrap_err(),
        RenderError::NonFiniteVertex { index: 1 }
    );
    assert!(lookat_camera(&bad, point3(0.0, 0.0, 1.0), Point3::ORIGIN, None).is_err());
    assert!(orthographic_project(&bad).is_err());
    assert!(to_image(&bad, 4, 4, false).is_err());
}

#[test]
fn overflowing_output_is_rejected() {
    let far_away = vec![Point3::ORIGIN, point3(1e30, 0.0, 0.0)];
    assert_eq!(
        similarity_transform(&far_away, 1e10, Mat3::IDENTITY, vec3(0.0, 0.0, 0.0)).unwrap_err(),
        RenderError::TransformOverflow { index: 1 }
    );

    let huge = vec![point3(3e38, 0.0, 0.0)];
    assert_eq!(
        lookat_camera(&huge, point3(-1e38, 0.0, 1.0), point3(-1e38, 0.0, 0.0), None).unwrap_err(),
        RenderError::TransformOverflow { index: 0 }
    );
    assert_eq!(
        to_image(&huge, 4, 4, true).unwrap_err(),
        RenderError::ProjectionOverflow { index: 0 }
    );

    // Just off the eye plane, the perspective divide pushes x past f32::MAX.
    let grazing = vec![point3(3e33, 0.0, -2e-6)];
    assert_eq!(
        perspective_project(&grazing, math::new_deg(60.0), 1.0, 1.0, 10.0).unwrap_err(),
        RenderError::ProjectionOverflow { index: 0 }
    );
}

#[test]
fn orthographic_pipeline_places_the_model_upright() {
    // A point above the origin in world space must end up above the image center.
    let world = vec![Point3::ORIGIN, point3(0.0, 10.0, 0.0)];
    let camera = lookat_camera(&world, point3(0.0, 0.0, 200.0), Point3::ORIGIN, None).unwrap();
    let projected = orthographic_project(&camera).unwrap();
    let image = to_image(&projected, 64, 64, false).unwrap();
    assert!(image[1].y < image[0].y);
    assert_eq!(image[0].x, image[1].x);
}
