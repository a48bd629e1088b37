/// Per-vertex attribute tables: colors, positions or any fixed-width float vectors.
pub mod attributes;
/// The output raster and its depth buffer.
pub mod framebuffer;
/// Bakes vertex positions into a raster indexed by a fixed UV layout.
pub mod posmap;
mod rasterize;

pub use attributes::Attributes;
pub use framebuffer::FrameBuffer;
pub use posmap::{normalize_depth, PositionMap, PositionMapEncoder, UvLayout};
pub use rasterize::{
    render_attribute, render_attribute_into, render_colors, RasterOptions, Rasterizer,
};
