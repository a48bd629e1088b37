use geometry::{lookat_camera, to_image, Mesh, Projection, Triangle};
use light::{add_light, PointLight};
use math::hcm::{point3, vec3, Point3};
use radiometry::color::Color;
use raster::{render_colors, Attributes, FrameBuffer, RasterOptions, Rasterizer};

const SIZE: usize = 20;

/// A 2 x 2 white quad at z = 0 in front of a 6 x 6 red quad at z = -2, both facing +z.
fn scene() -> (Mesh, Vec<Color>) {
    let quad = |half: f32, z: f32| {
        vec![
            point3(-half, -half, z),
            point3(half, -half, z),
            point3(half, half, z),
            point3(-half, half, z),
        ]
    };
    let mut positions = quad(1.0, 0.0);
    positions.extend(quad(3.0, -2.0));
    let triangles = vec![
        Triangle::new(0, 1, 2),
        Triangle::new(0, 2, 3),
        Triangle::new(4, 5, 6),
        Triangle::new(4, 6, 7),
    ];
    let mut colors = vec![Color::white(); 4];
    colors.extend(vec![Color::new(1.0, 0.0, 0.0); 4]);
    (Mesh::new(positions, triangles).unwrap(), colors)
}

fn render(mesh: &Mesh, colors: &[Color], options: RasterOptions) -> FrameBuffer {
    let lights = [PointLight::new(point3(0.0, 0.0, 5.0), Color::white())];
    let lit = add_light(mesh.positions(), mesh.triangles(), colors, &lights).unwrap();

    let eye = point3(0.0, 0.0, 5.0);
    let camera = lookat_camera(mesh.positions(), eye, Point3::ORIGIN, Some(vec3(0.0, 1.0, 0.0)))
        .unwrap();
    let projection = Projection::perspective(math::new_deg(90.0), 1.0, 1.0, 20.0).unwrap();
    let ndc = projection.project(&camera).unwrap();
    let image = to_image(&ndc, SIZE, SIZE, projection.is_perspective()).unwrap();

    Rasterizer::new(options)
        .render(
            &image,
            mesh.triangles(),
            &Attributes::from_colors(&lit),
            SIZE,
            SIZE,
        )
        .unwrap()
}

#[test]
fn lit_perspective_scene() {
    let (mesh, colors) = scene();
    let frame = render(&mesh, &colors, RasterOptions::default());

    // Image center: the front quad, lit almost head-on.
    let front = 5.0 / 27f32.sqrt();
    for &v in frame.get(9, 10) {
        assert!((v - front).abs() < 1e-4, "{}", v);
    }
    // Left of the front quad only the back quad is visible.
    let back = 7.0 / 67f32.sqrt();
    let side = frame.get(9, 6);
    assert!((side[0] - back).abs() < 1e-4, "{:?}", side);
    assert_eq!(&side[1..], &[0.0, 0.0]);
    assert!(frame.depth_at(9, 10) > frame.depth_at(9, 6));
    // The corners are empty.
    assert!(!frame.is_covered(0, 0));
    assert!(!frame.is_covered(SIZE - 1, SIZE - 1));
    // Depth stays inside the clip volume.
    assert!(frame
        .depth()
        .iter()
        .filter(|d| d.is_finite())
        .all(|&d| (-1.0..=1.0).contains(&d)));
}

#[test]
fn parallel_pipeline_matches_serial() {
    let (mesh, colors) = scene();
    let serial = render(&mesh, &colors, RasterOptions::default());
    let parallel = render(
        &mesh,
        &colors,
        RasterOptions::default()
            .with_parallel(true)
            .with_band_rows(4),
    );
    assert_eq!(serial.pixels(), parallel.pixels());
    assert_eq!(serial.to_rgb8(), parallel.to_rgb8());
}

#[test]
fn unlit_colors_pass_through() {
    let (mesh, colors) = scene();
    let lit = add_light(mesh.positions(), mesh.triangles(), &colors, &[]).unwrap();
    assert_eq!(lit, colors);
    let flat = mesh
        .positions()
        .iter()
        .map(|p| point3(p.x * 3.0 + 10.0, 9.0 - p.y * 3.0, p.z))
        .collect::<Vec<_>>();
    let frame = render_colors(&flat, mesh.triangles(), &lit, SIZE, SIZE).unwrap();
    assert!(frame.get(9, 10).iter().all(|&v| (v - 1.0).abs() < 1e-6));
    assert_eq!(frame.depth_at(9, 10), 0.0);
}
