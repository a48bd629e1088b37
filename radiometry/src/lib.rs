/// RGB color with `f32` channels, the unit of per-vertex color and light intensity.
pub mod color;
