use geometry::RenderError;
use math::hcm::Point3;
use radiometry::color::Color;

/// A dense `rows x channels` table of `f32`, one row per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    channels: usize,
    values: Vec<f32>,
}

impl Attributes {
    /// Wraps a row-major table. `channels` must be positive and divide `values.len()`.
    pub fn new(channels: usize, values: Vec<f32>) -> Result<Self, RenderError> {
        if channels == 0 || values.len() % channels != 0 {
            return Err(RenderError::RaggedAttributes {
                len: values.len(),
                channels,
            });
        }
        Ok(Self { channels, values })
    }

    pub fn from_colors(colors: &[Color]) -> Self {
        Self {
            channels: 3,
            values: colors.iter().flat_map(|c| c.as_array()).collect(),
        }
    }

    pub fn from_points(points: &[Point3]) -> Self {
        Self {
            channels: 3,
            values: points.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
    pub fn rows(&self) -> usize {
        self.values.len() / self.channels
    }
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.channels..(i + 1) * self.channels]
    }
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the index of the first row holding a NaN or an infinity.
    pub fn first_non_finite_row(&self) -> Option<usize> {
        self.values
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| i / self.channels)
    }
}
