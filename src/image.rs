use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use raster::FrameBuffer;

/// Writes the frame buffer as an 8-bit RGB png.
pub fn write_png(path: &Path, frame: &FrameBuffer) -> Result<(), Box<dyn Error>> {
    write_png_scaled(path, frame, 1.0)
}

/// Writes the frame buffer as an 8-bit RGB png after multiplying every value by `scale`.
pub fn write_png_scaled(path: &Path, frame: &FrameBuffer, scale: f32) -> Result<(), Box<dyn Error>> {
    let data = if scale == 1.0 {
        frame.to_rgb8()
    } else {
        let mut scaled = frame.clone();
        scaled.scale_values(scale);
        scaled.to_rgb8()
    };

    let file = File::create(path)?;
    let ref mut w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, frame.width() as u32, frame.height() as u32);
    encoder.set_color(png::ColorType::RGB);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Writes the first three channels of the frame buffer as a 32-bit float exr.
pub fn write_exr(path: &Path, frame: &FrameBuffer) -> Result<(), Box<dyn Error>> {
    let channels = frame.channels();
    exr::prelude::write_rgb_file(path, frame.width(), frame.height(), |x, y| {
        let px = frame.get(y, x);
        let at = |c: usize| if c < channels { px[c] } else { 0.0 };
        (at(0), at(1), at(2))
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}
