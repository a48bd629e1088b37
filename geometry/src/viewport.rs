use math::hcm::Point3;

use crate::error::RenderError;

/// Output image size plus the kind of coordinates that will be mapped onto it.
///
/// Image coordinates put x along columns and y along rows with row 0 at the top, so increasing
/// model-space y moves a point *up* the image (to a smaller row).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub height: usize,
    pub width: usize,
    /// Perspective inputs are NDC in [-1, 1] and get scaled to the image size first;
    /// orthographic inputs are already in pixel units, centered at the origin.
    pub perspective: bool,
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            perspective: false,
        }
    }

    pub fn with_perspective(self, perspective: bool) -> Self {
        Self {
            perspective,
            ..self
        }
    }

    /// Maps one projected point to image coordinates. Depth passes through unchanged.
    pub fn map(&self, p: Point3) -> Point3 {
        let (h, w) = (self.height as f32, self.width as f32);
        let (mut x, mut y) = (p.x, p.y);
        if self.perspective {
            x *= w / 2.0;
            y *= h / 2.0;
        }
        x += w / 2.0;
        y += h / 2.0;
        Point3::new(x, h - y - 1.0, p.z)
    }

    pub fn map_all(&self, vertices: &[Point3]) -> Result<Vec<Point3>, RenderError> {
        if self.height == 0 || self.width == 0 {
            return Err(RenderError::EmptyRaster {
                height: self.height,
                width: self.width,
            });
        }
        crate::mesh::validate_points(vertices)?;
        crate::mesh::finite_output(
            vertices.iter().map(|&p| self.map(p)).collect(),
            |index| RenderError::ProjectionOverflow { index },
        )
    }
}

/// Maps projected vertices onto an `h` x `w` image; see [`Viewport`].
pub fn to_image(
    vertices: &[Point3], h: usize, w: usize, is_perspective: bool,
) -> Result<Vec<Point3>, RenderError> {
    Viewport::new(h, w)
        .with_perspective(is_perspective)
        .map_all(vertices)
}
