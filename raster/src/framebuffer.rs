use geometry::RenderError;
use radiometry::color::Color;

/// Depth of a pixel that no triangle has covered. Larger depth is nearer, so this is behind
/// everything.
pub const EMPTY_DEPTH: f32 = f32::NEG_INFINITY;

/// A `height x width x channels` raster of `f32` plus a `height x width` depth buffer.
/// Pixel `(row, col)` has row 0 at the top of the image.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    height: usize,
    width: usize,
    channels: usize,
    pixels: Vec<f32>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    /// Allocates a zeroed raster with every depth set to [`EMPTY_DEPTH`].
    pub fn new(height: usize, width: usize, channels: usize) -> Result<Self, RenderError> {
        if height == 0 || width == 0 {
            return Err(RenderError::EmptyRaster { height, width });
        }
        Ok(Self {
            height,
            width,
            channels,
            pixels: vec![0.0; height * width * channels],
            depth: vec![EMPTY_DEPTH; height * width],
        })
    }

    /// Resets all values to zero and all depths to [`EMPTY_DEPTH`].
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|v| *v = 0.0);
        self.depth.iter_mut().for_each(|d| *d = EMPTY_DEPTH);
    }

    pub fn height(&self) -> usize {
        self.height
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The attribute values of one pixel.
    pub fn get(&self, row: usize, col: usize) -> &[f32] {
        let base = (row * self.width + col) * self.channels;
        &self.pixels[base..base + self.channels]
    }
    pub fn depth_at(&self, row: usize, col: usize) -> f32 {
        self.depth[row * self.width + col]
    }
    /// True if some triangle has been written to the pixel.
    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        self.depth_at(row, col) > EMPTY_DEPTH
    }
    /// Number of covered pixels.
    pub fn coverage(&self) -> usize {
        self.depth.iter().filter(|&&d| d > EMPTY_DEPTH).count()
    }

    /// Row-major pixel values, `channels` per pixel.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }
    /// Row-major depth values.
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Multiplies every value by `s`; depths are left alone.
    pub fn scale_values(&mut self, s: f32) {
        self.pixels.iter_mut().for_each(|v| *v *= s);
    }

    pub(crate) fn buffers_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.pixels, &mut self.depth)
    }

    /// Converts to 8-bit RGB, row-major. Values are clamped to [0, 1] first; with fewer than 3
    /// channels, the first channel is used as gray level.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.height * self.width * 3);
        for px in self.pixels.chunks(self.channels.max(1)) {
            let color = match *px {
                [r, g, b, ..] => Color::new(r, g, b),
                [level, ..] => Color::gray(level),
                [] => Color::black(),
            };
            bytes.extend_from_slice(&color.to_u8());
        }
        if self.channels == 0 {
            bytes.resize(self.height * self.width * 3, 0);
        }
        bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let fb = FrameBuffer::new(3, 5, 2).unwrap();
        assert_eq!(fb.pixels().len(), 30);
        assert_eq!(fb.coverage(), 0);
        assert!(!fb.is_covered(2, 4));
        assert_eq!(fb.get(1, 1), &[0.0, 0.0]);
        assert!(FrameBuffer::new(0, 5, 3).is_err());
    }

    #[test]
    fn rgb8_conversion() {
        let mut fb = FrameBuffer::new(1, 2, 3).unwrap();
        {
            let (pixels, _) = fb.buffers_mut();
            pixels.copy_from_slice(&[1.0, 0.5, 0.0, 2.0, -1.0, 0.25]);
        }
        assert_eq!(fb.to_rgb8(), vec![255, 127, 0, 255, 0, 63]);

        let mut gray = FrameBuffer::new(1, 1, 1).unwrap();
        gray.buffers_mut().0[0] = 1.0;
        assert_eq!(gray.to_rgb8(), vec![255, 255, 255]);
    }

    #[test]
    fn clear_resets_depth() {
        let mut fb = FrameBuffer::new(2, 2, 1).unwrap();
        fb.buffers_mut().1[3] = 0.5;
        assert_eq!(fb.coverage(), 1);
        fb.clear();
        assert_eq!(fb.coverage(), 0);
    }

    #[test]
    fn scaling_keeps_depth() {
        let mut fb = FrameBuffer::new(1, 2, 1).unwrap();
        fb.buffers_mut().0.copy_from_slice(&[4.0, 8.0]);
        fb.buffers_mut().1[0] = 2.0;
        fb.scale_values(0.25);
        assert_eq!(fb.pixels(), &[1.0, 2.0]);
        assert_eq!(fb.depth_at(0, 0), 2.0);
    }
}
