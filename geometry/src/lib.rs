pub mod camera;
/// Defines `RenderError`, the error type shared by every stage of the pipeline.
pub mod error;
pub mod mesh;
pub mod projection;
pub mod transform;
/// Maps projected coordinates onto the pixel grid.
pub mod viewport;

pub use camera::{lookat_camera, LookAtCamera};
pub use error::{ErrorCategory, RenderError};
pub use mesh::{Mesh, Triangle, VertexGenerator};
pub use projection::{orthographic_project, perspective_project, Projection};
pub use transform::{similarity_transform, SimilarityTransform, Transform};
pub use viewport::{to_image, Viewport};
