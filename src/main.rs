mod cli_options;
mod image;
mod sphere;

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use cli_options::CliOptions;
use geometry::{
    lookat_camera, similarity_transform, ErrorCategory, Mesh, Projection, RenderError, Viewport,
};
use light::{Lighting, PointLight};
use math::hcm::{point3, Mat3, Point3, Vec3};
use radiometry::color::Color;
use raster::{
    normalize_depth, Attributes, PositionMapEncoder, RasterOptions, Rasterizer, UvLayout,
};
use sphere::UvSphere;

fn run(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let sphere = UvSphere::new(48, 96);
    let mesh = Mesh::generate(&sphere, &[1.0], &[1.2], sphere.triangles())?;
    log::info!(
        "mesh with {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    let raster_options = RasterOptions::default().with_parallel(options.use_multi_thread);
    let size = options.size;

    // The model is fitted to a unit half-extent. Orthographic cameras keep world units as pixels,
    // so there it is scaled to the image as well.
    let (lo, hi) = mesh.bounds().ok_or("generated mesh has no vertices")?;
    let half_extent = (0..3).map(|axis| 0.5 * (hi[axis] - lo[axis])).fold(0.0, f32::max);
    let fit = 1.0 / half_extent;
    let unit = if options.perspective {
        fit
    } else {
        0.4 * size as f32 * fit
    };
    let rotation = Mat3::from_euler(math::new_deg(20.0), math::new_deg(35.0), math::new_deg(0.0));
    let world = similarity_transform(mesh.positions(), unit, rotation, Vec3::ZERO)?;
    let world = mesh.with_positions(world)?;

    let lights = [
        PointLight::new(point3(-2.0 * unit, 2.0 * unit, 5.0 * unit), Color::gray(0.9)),
        PointLight::new(point3(4.0 * unit, -1.0 * unit, 2.0 * unit), Color::new(0.2, 0.2, 0.35)),
    ];
    let lit = Lighting::default()
        .with_ambient(Color::gray(0.15))
        .shade(world.positions(), world.triangles(), &sphere.colors(), &lights)?;

    let eye = point3(0.0, 0.0, 4.0 * unit);
    let camera = lookat_camera(world.positions(), eye, Point3::ORIGIN, None)?;
    let projection = if options.perspective {
        Projection::perspective(math::new_deg(40.0), 1.0, 0.5, 10.0)?
    } else {
        Projection::Orthographic
    };
    let projected = projection.project(&camera)?;
    let image_vertices = Viewport::new(size, size)
        .with_perspective(projection.is_perspective())
        .map_all(&projected)?;

    let start = Instant::now();
    let frame = Rasterizer::new(raster_options).render(
        &image_vertices,
        world.triangles(),
        &Attributes::from_colors(&lit),
        size,
        size,
    )?;
    log::info!(
        "rendered {}x{} ({} pixels covered) in {:?}",
        size,
        size,
        frame.coverage(),
        start.elapsed()
    );
    image::write_png(&options.output_dir.join("render.png"), &frame)?;

    let uv_size = options.uv_size;
    let layout = Arc::new(UvLayout::new(
        &sphere.uv_coords(),
        world.triangles(),
        uv_size,
        uv_size,
    )?);
    let encoder = PositionMapEncoder::new(layout).with_options(raster_options);
    let start = Instant::now();
    let map = encoder.encode(&normalize_depth(&image_vertices))?;
    log::info!(
        "baked {}x{} position map in {:?}",
        map.height(),
        map.width(),
        start.elapsed()
    );
    image::write_exr(&options.output_dir.join("posmap.exr"), map.buffer())?;
    image::write_png_scaled(
        &options.output_dir.join("posmap.png"),
        map.buffer(),
        1.0 / size as f32,
    )?;
    Ok(())
}

fn exit_code(e: &(dyn Error + 'static)) -> i32 {
    match e.downcast_ref::<RenderError>().map(RenderError::category) {
        Some(ErrorCategory::InvalidGeometry) => 3,
        Some(ErrorCategory::DegenerateTransform) => 4,
        Some(ErrorCategory::InvalidProjection) => 5,
        None => 1,
    }
}

fn main() {
    env_logger::init();

    let options = match cli_options::parse_args(std::env::args().collect()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: {}", CliOptions::message());
            std::process::exit(2);
        }
    };
    if options.show_help {
        println!("usage: {}", CliOptions::message());
        return;
    }

    if let Err(e) = run(&options) {
        log::error!("{}", e);
        eprintln!("mesh-render: {}", e);
        std::process::exit(exit_code(e.as_ref()));
    }
}
