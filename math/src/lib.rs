/// Defines useful functions for common math operations, tools and constants:
/// - `Angle` to represent angles unambiguously,
/// - Barycentric blending of 3 values,
/// - Macros to check if two math quantities are close or ordered.
pub mod float;

/// Homogeneous-coordinate maths module.
/// - Types: 3D points and vectors, 4D vector, 3x3 and 4x4 matrices.
/// - Rotation matrices from axis angles and Euler angles.
/// - The perspective projection matrix.
pub mod hcm;

pub use float::Angle;
pub fn new_rad(rad: f32) -> float::Angle {
    float::Angle::new_rad(rad)
}
pub fn new_deg(deg: f32) -> float::Angle {
    float::Angle::new_deg(deg)
}
