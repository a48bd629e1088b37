use math::hcm::{Mat3, Point3, Vec3};
use math::Angle;
use std::ops::Mul;

use crate::error::RenderError;

/// Tolerance on `|R R^T - I|_F^2` and `|det R - 1|` when accepting a user-supplied rotation.
const ROTATION_TOLERANCE: f32 = 1e-4;

/// Uniform scale, then rotation, then translation: `p -> s * R * p + t`.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityTransform {
    scale: f32,
    rotation: Mat3,
    translation: Vec3,
}

pub trait Transform<T> {
    fn apply(&self, x: T) -> T;
}

impl SimilarityTransform {
    fn build(scale: f32, rotation: Mat3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    /// Validates and builds the transform. `scale` must be finite and positive, `rotation` must be
    /// orthonormal with determinant +1 and `translation` finite.
    pub fn new(scale: f32, rotation: Mat3, translation: Vec3) -> Result<Self, RenderError> {
        if !(scale.is_finite() && scale > f32::EPSILON) {
            return Err(RenderError::InvalidScale(scale));
        }
        if !rotation.is_finite() || !rotation.is_rotation(ROTATION_TOLERANCE) {
            return Err(RenderError::NotARotation);
        }
        if !translation.is_finite() {
            return Err(RenderError::NonFiniteTranslation);
        }
        Ok(Self::build(scale, rotation, translation))
    }

    /// Builds the transform with the rotation given as Euler angles, x-axis first, then y, then z.
    pub fn from_euler(
        scale: f32, (pitch, yaw, roll): (Angle, Angle, Angle), translation: Vec3,
    ) -> Result<Self, RenderError> {
        Self::new(scale, Mat3::from_euler(pitch, yaw, roll), translation)
    }

    pub fn identity() -> Self {
        Self::build(1.0, Mat3::IDENTITY, Vec3::ZERO)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Returns `(1/s, R^T, -R^T t / s)`, which undoes `self`.
    pub fn inverse(&self) -> Self {
        let rot_inv = self.rotation.transpose();
        let inv_scale = 1.0 / self.scale;
        Self::build(
            inv_scale,
            rot_inv,
            -(rot_inv * self.translation) * inv_scale,
        )
    }

    /// Applies Translate(t) onto the transform, and returns Translate(t) * self.
    pub fn translate(self, t: Vec3) -> Self {
        Self::build(self.scale, self.rotation, self.translation + t)
    }
}

impl Mul for SimilarityTransform {
    type Output = SimilarityTransform;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::build(
            self.scale * rhs.scale,
            self.rotation * rhs.rotation,
            self.rotation * rhs.translation * self.scale + self.translation,
        )
    }
}

impl std::fmt::Display for SimilarityTransform {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rot = &self.rotation;
        write!(
            f,
            "scale {:5.2}\
             \n|{:5.2} {:5.2} {:5.2} {:5.2}\
             \n|{:5.2} {:5.2} {:5.2} {:5.2}\
             \n|{:5.2} {:5.2} {:5.2} {:5.2}\n",
            self.scale,
            rot.cols[0].x, rot.cols[1].x, rot.cols[2].x, self.translation.x,
            rot.cols[0].y, rot.cols[1].y, rot.cols[2].y, self.translation.y,
            rot.cols[0].z, rot.cols[1].z, rot.cols[2].z, self.translation.z
        )
    }
}

// Directions are scaled and rotated, points are moved as well.
// -------------------------------------------------------------------------------------------------

impl Transform<Vec3> for SimilarityTransform {
    fn apply(&self, v: Vec3) -> Vec3 {
        self.rotation * v * self.scale
    }
}
impl Transform<Point3> for SimilarityTransform {
    fn apply(&self, p: Point3) -> Point3 {
        let res = self.rotation * Vec3::from(p) * self.scale + self.translation;
        Point3::from(res)
    }
}

/// Applies `s * R * v + t` to every vertex. Fails if a transformed vertex overflows f32.
pub fn similarity_transform(
    vertices: &[Point3], scale: f32, rotation: Mat3, translation: Vec3,
) -> Result<Vec<Point3>, RenderError> {
    crate::mesh::validate_points(vertices)?;
    let trans = SimilarityTransform::new(scale, rotation, translation)?;
    log::debug!("similarity transform on {} vertices: {}", vertices.len(), trans);
    crate::mesh::finite_output(
        vertices.iter().map(|&p| trans.apply(p)).collect(),
        |index| RenderError::TransformOverflow { index },
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use math::assert_le;

    #[test]
    pub fn test_inverse() {
        type Trans = SimilarityTransform;
        let trans = Trans::from_euler(
            2.5,
            (math::new_deg(10.0), math::new_deg(30.0), math::new_deg(-45.0)),
            Vec3::new(0.3, 0.4, 0.6),
        )
        .unwrap();

        let expected_identity = trans.inverse() * trans;

        assert_le!(
            (expected_identity.rotation - Mat3::IDENTITY).frobenius_norm_squared(),
            1e-10
        );
        assert_le!(expected_identity.translation.norm_squared(), 1e-10);
        assert_le!((expected_identity.scale - 1.0).abs(), 1e-6);
    }

    #[test]
    pub fn test_composition_matches_sequential_apply() {
        let a = SimilarityTransform::from_euler(
            0.5,
            (math::new_deg(0.0), math::new_deg(90.0), math::new_deg(0.0)),
            Vec3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        let b = SimilarityTransform::identity().translate(Vec3::new(0.0, 2.0, 0.0));
        let p = Point3::new(1.0, 2.0, 3.0);
        let lhs = (a * b).apply(p);
        let rhs = a.apply(b.apply(p));
        math::assert_close!(lhs - rhs, Vec3::ZERO);
    }

    #[test]
    pub fn test_rejects_degenerate_parameters() {
        let t = Vec3::ZERO;
        assert_eq!(
            SimilarityTransform::new(0.0, Mat3::IDENTITY, t).unwrap_err(),
            RenderError::InvalidScale(0.0)
        );
        assert!(SimilarityTransform::new(f32::NAN, Mat3::IDENTITY, t).is_err());
        assert_eq!(
            SimilarityTransform::new(1.0, Mat3::IDENTITY * 2.0, t).unwrap_err(),
            RenderError::NotARotation
        );
        let mirror = Mat3::from_cols(Vec3::X, Vec3::Y, -Vec3::Z);
        assert_eq!(
            SimilarityTransform::new(1.0, mirror, t).unwrap_err(),
            RenderError::NotARotation
        );
        assert_eq!(
            SimilarityTransform::new(1.0, Mat3::IDENTITY, Vec3::new(f32::INFINITY, 0.0, 0.0))
                .unwrap_err(),
            RenderError::NonFiniteTranslation
        );
    }
}
