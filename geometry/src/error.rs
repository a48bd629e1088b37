/// Coarse classification of a [`RenderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Non-finite coordinates, bad triangle indices, mismatched array lengths.
    InvalidGeometry,
    /// Unusable scale, rotation or camera frame.
    DegenerateTransform,
    /// Bad projection parameters or a vertex that can't be projected.
    InvalidProjection,
}

/// Errors detected at the entry of a pipeline stage. A stage either fails with one of these or
/// produces finite output; NaN and infinities are never passed downstream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("triangle {triangle} references vertex {index}, but there are {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("expected {expected} attribute rows (one per vertex), got {actual}")]
    AttributeCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error("{len} attribute values can't be split into rows of {channels} channels")]
    RaggedAttributes { len: usize, channels: usize },

    #[error("attribute row {index} has a non-finite value")]
    NonFiniteAttribute { index: usize },

    #[error("light {index} has a non-finite position or a negative or non-finite intensity")]
    InvalidLight { index: usize },

    #[error("ambient light must be finite and non-negative")]
    InvalidAmbient,

    #[error("raster of size {height}x{width} has no pixels")]
    EmptyRaster { height: usize, width: usize },

    #[error("scale must be finite and positive, got {0}")]
    InvalidScale(f32),

    #[error("matrix is not a proper rotation (orthonormal with determinant +1)")]
    NotARotation,

    #[error("translation has a non-finite component")]
    NonFiniteTranslation,

    #[error("vertex {index} overflows f32 under the transform")]
    TransformOverflow { index: usize },

    #[error("camera eye and target coincide")]
    CoincidentEyeTarget,

    #[error("camera eye, target and up vector must be finite")]
    NonFiniteCamera,

    #[error("no up vector gives a usable camera frame")]
    DegenerateCameraFrame,

    #[error("clip planes must satisfy 0 < near < far, got near = {near}, far = {far}")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("vertical field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspect(f32),

    #[error("vertex {index} lies on the eye plane and can't be projected")]
    VertexOnEyePlane { index: usize },

    #[error("vertex {index} overflows f32 when projected onto the image")]
    ProjectionOverflow { index: usize },
}

impl RenderError {
    pub fn category(&self) -> ErrorCategory {
        use RenderError::*;
        match self {
            NonFiniteVertex { .. }
            | IndexOutOfRange { .. }
            | AttributeCountMismatch { .. }
            | ChannelMismatch { .. }
            | RaggedAttributes { .. }
            | NonFiniteAttribute { .. }
            | InvalidLight { .. }
            | InvalidAmbient
            | EmptyRaster { .. } => ErrorCategory::InvalidGeometry,
            InvalidScale(_)
            | NotARotation
            | NonFiniteTranslation
            | TransformOverflow { .. }
            | CoincidentEyeTarget
            | NonFiniteCamera
            | DegenerateCameraFrame => ErrorCategory::DegenerateTransform,
            InvalidClipPlanes { .. }
            | InvalidFieldOfView(_)
            | InvalidAspect(_)
            | VertexOnEyePlane { .. }
            | ProjectionOverflow { .. } => ErrorCategory::InvalidProjection,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(
            RenderError::NonFiniteVertex { index: 3 }.category(),
            ErrorCategory::InvalidGeometry
        );
        assert_eq!(
            RenderError::InvalidScale(0.0).category(),
            ErrorCategory::DegenerateTransform
        );
        assert_eq!(
            RenderError::VertexOnEyePlane { index: 0 }.category(),
            ErrorCategory::InvalidProjection
        );
        assert_eq!(
            RenderError::TransformOverflow { index: 1 }.category(),
            ErrorCategory::DegenerateTransform
        );
        assert_eq!(
            RenderError::ProjectionOverflow { index: 1 }.category(),
            ErrorCategory::InvalidProjection
        );
    }

    #[test]
    fn messages() {
        let err = RenderError::IndexOutOfRange {
            triangle: 2,
            index: 9,
            vertex_count: 4,
        };
        assert_eq!(
            err.to_string(),
            "triangle 2 references vertex 9, but there are 4 vertices"
        );
    }
}
