mod normal;

use geometry::mesh::{validate_points, validate_triangles};
use geometry::{RenderError, Triangle};
use math::hcm::{Point3, Vec3};
use radiometry::color::Color;

pub use normal::vertex_normals;

pub trait Light {
    /// Computes the Lambertian (cosine-weighted) light arriving at a surface point with the given
    /// unit `normal`. Returns black for a zero normal or when the light sits on the point.
    fn diffuse_at(&self, position: Point3, normal: Vec3) -> Color;

    /// True if the light emits nothing.
    fn is_dark(&self) -> bool;
}

/// A point light in world space. Intensity is not attenuated by distance.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Point3,
    pub intensity: Color,
}

impl PointLight {
    /// Creates a point light with the given position and intensity of the light.
    pub fn new(position: Point3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    fn is_valid(&self) -> bool {
        self.position.is_finite() && self.intensity.is_finite() && self.intensity.is_non_negative()
    }
}

impl Light for PointLight {
    fn diffuse_at(&self, position: Point3, normal: Vec3) -> Color {
        match (self.position - position).try_hat() {
            Some(wi) => self.intensity * wi.dot(normal).max(0.0),
            None => Color::black(),
        }
    }

    fn is_dark(&self) -> bool {
        self.intensity.is_black()
    }
}

/// Ambient plus diffuse shading of per-vertex colors:
/// `lit = clamp01(base * (ambient + sum_lights(intensity * max(0, n . l))))`.
///
/// Without any light energy (black ambient and only dark lights) shading is skipped and the base
/// colors come back clamped to [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient: Color,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: Color::black(),
        }
    }
}

impl Lighting {
    pub fn with_ambient(self, ambient: Color) -> Self {
        Self { ambient, ..self }
    }

    /// Shades `colors` (one per vertex) for the mesh given by `positions` and `triangles`.
    pub fn shade(
        &self, positions: &[Point3], triangles: &[Triangle], colors: &[Color],
        lights: &[PointLight],
    ) -> Result<Vec<Color>, RenderError> {
        validate_points(positions)?;
        validate_triangles(triangles, positions.len())?;
        if colors.len() != positions.len() {
            return Err(RenderError::AttributeCountMismatch {
                expected: positions.len(),
                actual: colors.len(),
            });
        }
        if let Some(index) = colors.iter().position(|c| !c.is_finite()) {
            return Err(RenderError::NonFiniteAttribute { index });
        }
        if let Some(index) = lights.iter().position(|l| !l.is_valid()) {
            return Err(RenderError::InvalidLight { index });
        }
        if !(self.ambient.is_finite() && self.ambient.is_non_negative()) {
            return Err(RenderError::InvalidAmbient);
        }

        if self.ambient.is_black() && lights.iter().all(|l| l.is_dark()) {
            log::debug!("no light energy, vertex colors left unlit");
            return Ok(colors.iter().map(Color::clamp01).collect());
        }

        let normals = vertex_normals(positions, triangles);
        log::debug!(
            "shading {} vertices with {} point lights, ambient {}",
            positions.len(),
            lights.len(),
            self.ambient
        );
        Ok(positions
            .iter()
            .zip(normals.iter())
            .zip(colors.iter())
            .map(|((&p, &n), &base)| {
                let received: Color = lights.iter().map(|l| l.diffuse_at(p, n)).sum();
                (base * (self.ambient + received)).clamp01()
            })
            .collect())
    }
}

/// Diffuse lighting without an ambient term; see [`Lighting`].
pub fn add_light(
    vertices: &[Point3], triangles: &[Triangle], colors: &[Color], lights: &[PointLight],
) -> Result<Vec<Color>, RenderError> {
    Lighting::default().shade(vertices, triangles, colors, lights)
}
