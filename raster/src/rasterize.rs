use std::ops::RangeInclusive;

use geometry::mesh::{validate_points, validate_triangles};
use geometry::{RenderError, Triangle};
use itertools::iproduct;
use math::float::{barycentric_blend, min_max3};
use math::hcm::Point3;
use radiometry::color::Color;
use rayon::prelude::*;

use crate::attributes::Attributes;
use crate::framebuffer::FrameBuffer;

/// Triangles whose doubled signed area is at most this are skipped.
const DEGENERATE_AREA: f32 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Renders horizontal bands of the image on the rayon thread pool.
    pub parallel: bool,
    /// Rows per band when `parallel` is set.
    pub band_rows: usize,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            band_rows: 16,
        }
    }
}

impl RasterOptions {
    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }
    pub fn with_band_rows(self, band_rows: usize) -> Self {
        Self {
            band_rows: band_rows.max(1),
            ..self
        }
    }
}

/// Signed edge function: twice the signed area of triangle (a, b, p).
fn edge(a: Point3, b: Point3, p: (f32, f32)) -> f32 {
    (b.x - a.x) * (p.1 - a.y) - (b.y - a.y) * (p.0 - a.x)
}

/// A non-degenerate triangle clipped to the image, ready to be scanned.
struct TriangleSetup {
    corners: (Point3, Point3, Point3),
    indices: [usize; 3],
    /// Sign of the doubled area; makes the inside test independent of the winding.
    orientation: f32,
    rows: RangeInclusive<usize>,
    cols: RangeInclusive<usize>,
}

impl TriangleSetup {
    fn new(tri: &Triangle, vertices: &[Point3], height: usize, width: usize) -> Option<Self> {
        let (p0, p1, p2) = tri.corners(vertices);

        let (x_min, x_max) = min_max3(p0.x, p1.x, p2.x);
        let (y_min, y_max) = min_max3(p0.y, p1.y, p2.y);
        let col_lo = x_min.ceil().max(0.0);
        let col_hi = x_max.floor().min((width - 1) as f32);
        let row_lo = y_min.ceil().max(0.0);
        let row_hi = y_max.floor().min((height - 1) as f32);
        if col_hi < col_lo || row_hi < row_lo {
            return None;
        }

        let area = edge(p0, p1, (p2.x, p2.y));
        if !area.is_finite() {
            log::warn!("skipping triangle {:?}: its area overflows f32", tri.indices());
            return None;
        }
        if area.abs() <= DEGENERATE_AREA {
            log::trace!("skipping degenerate triangle {:?}", tri.indices());
            return None;
        }

        Some(Self {
            corners: (p0, p1, p2),
            indices: tri.indices(),
            orientation: area.signum(),
            rows: row_lo as usize..=row_hi as usize,
            cols: col_lo as usize..=col_hi as usize,
        })
    }

    /// Barycentric weights of the pixel center `(col, row)`, or `None` if it lies outside.
    ///
    /// Pixels exactly on an edge are inside. The weights are the edge functions normalized by
    /// their sum, so each corner reproduces weight 1 exactly.
    fn weights(&self, col: usize, row: usize) -> Option<(f32, f32, f32)> {
        let p = (col as f32, row as f32);
        let (p0, p1, p2) = self.corners;
        let e0 = edge(p1, p2, p) * self.orientation;
        let e1 = edge(p2, p0, p) * self.orientation;
        let e2 = edge(p0, p1, p) * self.orientation;
        // Negated so that NaN edge values count as outside.
        if !(e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) {
            return None;
        }
        let sum = e0 + e1 + e2;
        if !(sum.is_finite() && sum > 0.0) {
            return None;
        }
        let w = (e0 / sum, e1 / sum, e2 / sum);
        (w.0.is_finite() && w.1.is_finite() && w.2.is_finite()).then(|| w)
    }
}

/// Scans every triangle over the rows `first_row .. first_row + depth.len() / width` of the
/// image. `pixels` and `depth` hold exactly those rows.
fn render_band(
    setups: &[TriangleSetup], attributes: &Attributes, first_row: usize, width: usize,
    pixels: &mut [f32], depth: &mut [f32],
) {
    let channels = attributes.channels();
    let last_row = first_row + depth.len() / width - 1;
    for setup in setups.iter() {
        let row_lo = (*setup.rows.start()).max(first_row);
        let row_hi = (*setup.rows.end()).min(last_row);
        if row_hi < row_lo {
            continue;
        }
        let [i0, i1, i2] = setup.indices;
        let (a0, a1, a2) = (attributes.row(i0), attributes.row(i1), attributes.row(i2));
        let (p0, p1, p2) = setup.corners;

        for (row, col) in iproduct!(row_lo..=row_hi, setup.cols.clone()) {
            let w = match setup.weights(col, row) {
                Some(w) => w,
                None => continue,
            };
            let z = barycentric_blend((p0.z, p1.z, p2.z), w);
            let idx = (row - first_row) * width + col;
            // Strictly nearer only: on a tie the earlier triangle keeps the pixel.
            if !(z.is_finite() && z > depth[idx]) {
                continue;
            }
            let blend = |c: usize| barycentric_blend((a0[c], a1[c], a2[c]), w);
            if !(0..channels).all(|c| blend(c).is_finite()) {
                continue;
            }
            depth[idx] = z;
            let out = &mut pixels[idx * channels..(idx + 1) * channels];
            for (c, value) in out.iter_mut().enumerate() {
                *value = blend(c);
            }
        }
    }
}

/// Fills triangles with barycentrically interpolated per-vertex attributes, resolving
/// visibility with a depth buffer in which larger depth is nearer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterizer {
    options: RasterOptions,
}

impl Rasterizer {
    pub fn new(options: RasterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RasterOptions {
        self.options
    }

    /// Renders into a fresh `height x width` frame buffer.
    ///
    /// `image_vertices` are in image coordinates: x is the column, y the row, z the depth.
    pub fn render(
        &self, image_vertices: &[Point3], triangles: &[Triangle], attributes: &Attributes,
        height: usize, width: usize,
    ) -> Result<FrameBuffer, RenderError> {
        let mut frame = FrameBuffer::new(height, width, attributes.channels())?;
        self.render_into(&mut frame, image_vertices, triangles, attributes)?;
        Ok(frame)
    }

    /// Renders on top of an existing frame buffer, depth-testing against what it already holds.
    pub fn render_into(
        &self, frame: &mut FrameBuffer, image_vertices: &[Point3], triangles: &[Triangle],
        attributes: &Attributes,
    ) -> Result<(), RenderError> {
        validate_points(image_vertices)?;
        validate_triangles(triangles, image_vertices.len())?;
        if attributes.rows() != image_vertices.len() {
            return Err(RenderError::AttributeCountMismatch {
                expected: image_vertices.len(),
                actual: attributes.rows(),
            });
        }
        if attributes.channels() != frame.channels() {
            return Err(RenderError::ChannelMismatch {
                expected: frame.channels(),
                actual: attributes.channels(),
            });
        }
        if let Some(index) = attributes.first_non_finite_row() {
            return Err(RenderError::NonFiniteAttribute { index });
        }

        let (height, width) = (frame.height(), frame.width());
        let setups = triangles
            .iter()
            .filter_map(|tri| TriangleSetup::new(tri, image_vertices, height, width))
            .collect::<Vec<_>>();
        log::debug!(
            "rasterizing {} of {} triangles into {}x{}x{}",
            setups.len(),
            triangles.len(),
            height,
            width,
            attributes.channels()
        );

        let channels = attributes.channels();
        let (pixels, depth) = frame.buffers_mut();
        if self.options.parallel {
            let band_rows = self.options.band_rows.max(1);
            pixels
                .par_chunks_mut((band_rows * width * channels).max(1))
                .zip(depth.par_chunks_mut(band_rows * width))
                .enumerate()
                .for_each(|(band, (band_pixels, band_depth))| {
                    render_band(
                        &setups,
                        attributes,
                        band * band_rows,
                        width,
                        band_pixels,
                        band_depth,
                    )
                });
        } else {
            render_band(&setups, attributes, 0, width, pixels, depth);
        }
        Ok(())
    }
}

/// Renders `attributes` (one row per vertex) with the default options.
pub fn render_attribute(
    image_vertices: &[Point3], triangles: &[Triangle], attributes: &Attributes, height: usize,
    width: usize,
) -> Result<FrameBuffer, RenderError> {
    Rasterizer::default().render(image_vertices, triangles, attributes, height, width)
}

/// Renders `attributes` on top of `frame` with the default options. The frame buffer must have
/// as many channels as `attributes`.
pub fn render_attribute_into(
    frame: &mut FrameBuffer, image_vertices: &[Point3], triangles: &[Triangle],
    attributes: &Attributes,
) -> Result<(), RenderError> {
    Rasterizer::default().render_into(frame, image_vertices, triangles, attributes)
}

/// Renders per-vertex colors into a 3-channel frame buffer.
pub fn render_colors(
    image_vertices: &[Point3], triangles: &[Triangle], colors: &[Color], height: usize,
    width: usize,
) -> Result<FrameBuffer, RenderError> {
    render_attribute(
        image_vertices,
        triangles,
        &Attributes::from_colors(colors),
        height,
        width,
    )
}
