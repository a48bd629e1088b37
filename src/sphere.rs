use std::f32::consts::PI;
use std::sync::Arc;

use geometry::{Triangle, VertexGenerator};
use math::hcm::{point3, Point3};
use radiometry::color::Color;

/// A latitude-longitude sphere with a seam column, so every vertex owns one UV coordinate.
/// `v = 1` is the north pole and `u` runs once around the y-axis.
pub struct UvSphere {
    rings: usize,
    segments: usize,
}

impl UvSphere {
    pub fn new(rings: usize, segments: usize) -> Self {
        Self {
            rings: rings.max(2),
            segments: segments.max(3),
        }
    }

    fn index(&self, ring: usize, segment: usize) -> usize {
        ring * (self.segments + 1) + segment
    }

    pub fn num_vertices(&self) -> usize {
        (self.rings + 1) * (self.segments + 1)
    }

    /// Counter-clockwise when seen from outside. Triangles touching a pole are degenerate.
    pub fn triangles(&self) -> Arc<[Triangle]> {
        let mut triangles = Vec::with_capacity(self.rings * self.segments * 2);
        for ring in 0..self.rings {
            for segment in 0..self.segments {
                let a = self.index(ring, segment);
                let b = self.index(ring, segment + 1);
                let c = self.index(ring + 1, segment);
                let d = self.index(ring + 1, segment + 1);
                triangles.push(Triangle::new(a, b, c));
                triangles.push(Triangle::new(b, d, c));
            }
        }
        triangles.into()
    }

    pub fn uv_coords(&self) -> Vec<(f32, f32)> {
        let mut uv = Vec::with_capacity(self.num_vertices());
        for ring in 0..=self.rings {
            for segment in 0..=self.segments {
                uv.push((
                    segment as f32 / self.segments as f32,
                    1.0 - ring as f32 / self.rings as f32,
                ));
            }
        }
        uv
    }

    /// Base colors from the UV coordinates: hue-like bands around the sphere, darker to the south.
    pub fn colors(&self) -> Vec<Color> {
        self.uv_coords()
            .into_iter()
            .map(|(u, v)| {
                let angle = 2.0 * PI * u;
                Color::new(
                    0.5 + 0.5 * angle.cos(),
                    0.5 + 0.5 * (angle - 2.0 * PI / 3.0).cos(),
                    0.5 + 0.5 * (angle + 2.0 * PI / 3.0).cos(),
                ) * (0.4 + 0.6 * v)
            })
            .collect()
    }
}

impl VertexGenerator for UvSphere {
    /// `shape_params[0]` is the radius (1 if absent); `expr_params[0]` stretches the sphere along
    /// the y-axis (1 if absent).
    fn generate_vertices(&self, shape_params: &[f32], expr_params: &[f32]) -> Vec<Point3> {
        let radius = shape_params.first().copied().unwrap_or(1.0);
        let stretch = expr_params.first().copied().unwrap_or(1.0);
        let mut vertices = Vec::with_capacity(self.num_vertices());
        for ring in 0..=self.rings {
            let theta = PI * ring as f32 / self.rings as f32;
            for segment in 0..=self.segments {
                let phi = 2.0 * PI * segment as f32 / self.segments as f32;
                vertices.push(point3(
                    radius * theta.sin() * phi.cos(),
                    radius * stretch * theta.cos(),
                    radius * theta.sin() * phi.sin(),
                ));
            }
        }
        vertices
    }
}
