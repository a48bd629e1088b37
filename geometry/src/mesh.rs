use std::sync::Arc;

use itertools::{Itertools, MinMaxResult};
use math::hcm::Point3;

use crate::error::RenderError;

/// Three indices into a vertex array. Winding is only meaningful to the normal computation of the
/// lighting stage; the rasterizer accepts either orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    pub const fn new(i0: usize, i1: usize, i2: usize) -> Self {
        Self([i0, i1, i2])
    }
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }
    /// Looks up the 3 corners. Indices must have been validated against `positions`.
    pub fn corners<T: Copy>(&self, values: &[T]) -> (T, T, T) {
        let [i0, i1, i2] = self.0;
        (values[i0], values[i1], values[i2])
    }
}

impl From<[usize; 3]> for Triangle {
    fn from(indices: [usize; 3]) -> Self {
        Self(indices)
    }
}

/// Opaque source of vertex positions, e.g. a statistical shape model evaluated at given shape
/// and expression coefficients. The renderer only consumes the generated vertices.
pub trait VertexGenerator {
    fn generate_vertices(&self, shape_params: &[f32], expr_params: &[f32]) -> Vec<Point3>;
}

/// Checks that every coordinate is finite.
pub fn validate_points(points: &[Point3]) -> Result<(), RenderError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(RenderError::NonFiniteVertex { index }),
        None => Ok(()),
    }
}

/// Passes a stage's output through if every coordinate is finite, otherwise reports the first
/// vertex that overflowed with `overflow`.
pub(crate) fn finite_output(
    points: Vec<Point3>, overflow: fn(usize) -> RenderError,
) -> Result<Vec<Point3>, RenderError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(overflow(index)),
        None => Ok(points),
    }
}

/// Checks that every triangle only references vertices in `0..vertex_count`.
pub fn validate_triangles(triangles: &[Triangle], vertex_count: usize) -> Result<(), RenderError> {
    for (triangle, tri) in triangles.iter().enumerate() {
        if let Some(&index) = tri.0.iter().find(|&&i| i >= vertex_count) {
            return Err(RenderError::IndexOutOfRange {
                triangle,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

/// A validated triangle mesh. The topology is reference-counted and never changes once the mesh
/// is built; stages that move vertices produce a new mesh sharing the same triangles.
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<Point3>,
    triangles: Arc<[Triangle]>,
}

impl Mesh {
    pub fn new(positions: Vec<Point3>, triangles: Vec<Triangle>) -> Result<Self, RenderError> {
        Self::with_shared_triangles(positions, triangles.into())
    }

    pub fn with_shared_triangles(
        positions: Vec<Point3>, triangles: Arc<[Triangle]>,
    ) -> Result<Self, RenderError> {
        validate_points(&positions)?;
        validate_triangles(&triangles, positions.len())?;
        Ok(Self {
            positions,
            triangles,
        })
    }

    /// Builds a mesh from an external vertex generator and a fixed topology.
    pub fn generate<G: VertexGenerator + ?Sized>(
        generator: &G, shape_params: &[f32], expr_params: &[f32], triangles: Arc<[Triangle]>,
    ) -> Result<Self, RenderError> {
        let positions = generator.generate_vertices(shape_params, expr_params);
        Self::with_shared_triangles(positions, triangles)
    }

    /// Replaces the vertex positions, keeping the topology. The vertex count must not change.
    pub fn with_positions(&self, positions: Vec<Point3>) -> Result<Self, RenderError> {
        if positions.len() != self.positions.len() {
            return Err(RenderError::AttributeCountMismatch {
                expected: self.positions.len(),
                actual: positions.len(),
            });
        }
        validate_points(&positions)?;
        Ok(Self {
            positions,
            triangles: self.triangles.clone(),
        })
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
    pub fn shared_triangles(&self) -> Arc<[Triangle]> {
        self.triangles.clone()
    }
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the axis-aligned bounds `(min, max)` of the vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut lo = Point3::ORIGIN;
        let mut hi = Point3::ORIGIN;
        for axis in 0..3 {
            match self.positions.iter().map(|p| p[axis]).minmax_by(f32::total_cmp) {
                MinMaxResult::NoElements => return None,
                MinMaxResult::OneElement(x) => {
                    lo[axis] = x;
                    hi[axis] = x;
                }
                MinMaxResult::MinMax(a, b) => {
                    lo[axis] = a;
                    hi[axis] = b;
                }
            }
        }
        Some((lo, hi))
    }
}
