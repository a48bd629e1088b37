use std::sync::Arc;

use geometry::mesh::{validate_points, validate_triangles};
use geometry::{RenderError, Triangle};
use math::hcm::{point3, Point3};

use crate::attributes::Attributes;
use crate::framebuffer::FrameBuffer;
use crate::rasterize::{RasterOptions, Rasterizer};

/// A fixed UV parameterization of a mesh, already converted into the raster coordinates of a
/// `height x width` position map. Meant to be built once and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct UvLayout {
    height: usize,
    width: usize,
    raster_coords: Vec<Point3>,
    triangles: Vec<Triangle>,
}

impl UvLayout {
    /// Builds the layout from per-vertex `(u, v)` in [0, 1]. `v` grows upwards, so `v = 1` lands
    /// on row 0:
    /// ```text
    /// x = u * (width - 1)
    /// y = height - v * (height - 1) - 1
    /// ```
    pub fn new(
        uv: &[(f32, f32)], triangles: &[Triangle], height: usize, width: usize,
    ) -> Result<Self, RenderError> {
        let (h, w) = (height as f32, width as f32);
        let raster_coords = uv
            .iter()
            .map(|&(u, v)| point3(u * (w - 1.0), h - v * (h - 1.0) - 1.0, 0.0))
            .collect();
        Self::from_raster_coords(raster_coords, triangles, height, width)
    }

    /// Builds the layout from coordinates that are already in raster space (x column, y row).
    /// Depths are flattened to 0.
    pub fn from_raster_coords(
        mut raster_coords: Vec<Point3>, triangles: &[Triangle], height: usize, width: usize,
    ) -> Result<Self, RenderError> {
        if height == 0 || width == 0 {
            return Err(RenderError::EmptyRaster { height, width });
        }
        validate_points(&raster_coords)?;
        validate_triangles(triangles, raster_coords.len())?;
        raster_coords.iter_mut().for_each(|p| p.z = 0.0);
        Ok(Self {
            height,
            width,
            raster_coords,
            triangles: triangles.to_vec(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn num_vertices(&self) -> usize {
        self.raster_coords.len()
    }
    pub fn raster_coords(&self) -> &[Point3] {
        &self.raster_coords
    }
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

/// Bakes per-vertex 3D positions into a UV-indexed raster.
#[derive(Debug, Clone)]
pub struct PositionMapEncoder {
    layout: Arc<UvLayout>,
    rasterizer: Rasterizer,
}

impl PositionMapEncoder {
    pub fn new(layout: Arc<UvLayout>) -> Self {
        Self {
            layout,
            rasterizer: Rasterizer::default(),
        }
    }

    pub fn with_options(self, options: RasterOptions) -> Self {
        Self {
            rasterizer: Rasterizer::new(options),
            ..self
        }
    }

    pub fn layout(&self) -> &UvLayout {
        &self.layout
    }

    /// Rasterizes the layout with `positions` as the interpolated attribute. `positions` must
    /// follow the vertex order of the layout.
    ///
    /// The layout is flat, so where UV triangles overlap the first one in index order wins.
    pub fn encode(&self, positions: &[Point3]) -> Result<PositionMap, RenderError> {
        if positions.len() != self.layout.num_vertices() {
            return Err(RenderError::AttributeCountMismatch {
                expected: self.layout.num_vertices(),
                actual: positions.len(),
            });
        }
        let buffer = self.rasterizer.render(
            self.layout.raster_coords(),
            self.layout.triangles(),
            &Attributes::from_points(positions),
            self.layout.height(),
            self.layout.width(),
        )?;
        log::debug!(
            "position map {}x{}: {} of {} pixels mapped",
            buffer.height(),
            buffer.width(),
            buffer.coverage(),
            buffer.height() * buffer.width()
        );
        Ok(PositionMap { buffer })
    }
}

/// A `height x width x 3` raster of world positions. Unmapped pixels hold zeros.
#[derive(Debug, Clone)]
pub struct PositionMap {
    buffer: FrameBuffer,
}

impl PositionMap {
    /// The position baked at `(row, col)`, or `None` if no UV triangle covers the pixel.
    pub fn get(&self, row: usize, col: usize) -> Option<Point3> {
        if !self.buffer.is_covered(row, col) {
            return None;
        }
        match *self.buffer.get(row, col) {
            [x, y, z] => Some(point3(x, y, z)),
            _ => None,
        }
    }

    pub fn height(&self) -> usize {
        self.buffer.height()
    }
    pub fn width(&self) -> usize {
        self.buffer.width()
    }
    pub fn coverage(&self) -> usize {
        self.buffer.coverage()
    }
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }
    pub fn into_buffer(self) -> FrameBuffer {
        self.buffer
    }
}

/// Shifts `positions` along z so that the smallest z becomes 0.
/// ```
/// use math::hcm::point3;
/// let shifted = raster::normalize_depth(&[point3(1.0, 2.0, -3.0), point3(0.0, 0.0, 5.0)]);
/// assert_eq!(shifted, vec![point3(1.0, 2.0, 0.0), point3(0.0, 0.0, 8.0)]);
/// ```
pub fn normalize_depth(positions: &[Point3]) -> Vec<Point3> {
    let min_z = positions.iter().map(|p| p.z).fold(f32::INFINITY, f32::min);
    positions.iter().map(|p| p.with_z(p.z - min_z)).collect()
}
