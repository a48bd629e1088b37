use std::{
    fmt,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub},
};

pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

pub fn point3(x: f32, y: f32, z: f32) -> Point3 {
    Point3::new(x, y, z)
}

pub use glam::Vec4;

/// Represents a 3D vector. Each component is a `f32` number.
/// Components can be accessed using `v.x` `v.y` `v.z`,
/// or indices `v[i]` where i is 0, 1, or 2.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Represents a 3D location. A point can be translated by a `Vec3` and two points subtract to a
/// `Vec3`, but points can't be scaled or summed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "({:.p$}, {:.p$}, {:.p$})",
            self.x,
            self.y,
            self.z,
            p = precision
        )
    }
}
impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "[{:.p$}, {:.p$}, {:.p$}]",
            self.x,
            self.y,
            self.z,
            p = precision
        )
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }
    pub const X: Vec3 = Self::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Self::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Self::new(0.0, 0.0, 1.0);
    pub const ZERO: Vec3 = Self::new(0.0, 0.0, 0.0);

    pub fn dot(self, v: Vec3) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
    pub fn cross(self, v: Vec3) -> Vec3 {
        // x1 y1 z1
        // x2 y2 z2
        // i  j  k
        Vec3::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    pub fn norm_squared(self) -> f32 {
        self.dot(self)
    }
    pub fn norm(self) -> f32 {
        f32::sqrt(self.norm_squared())
    }

    /// Returns a normalized (unit-length) `self` vector.
    /// Panics if the vector length is zero, NaN or infinite.
    pub fn hat(self) -> Vec3 {
        let norm2 = self.norm_squared();
        assert!(norm2 != 0.0 && norm2.is_finite());
        let inv_sqrt = 1.0 / self.norm();
        self * inv_sqrt
    }
    /// Returns the normalized vector, or `None` if the length is zero or not finite.
    /// ```
    /// use math::hcm::Vec3;
    /// assert!(Vec3::ZERO.try_hat().is_none());
    /// assert_eq!(Vec3::new(0.0, 3.0, 4.0).try_hat(), Some(Vec3::new(0.0, 0.6, 0.8)));
    /// ```
    pub fn try_hat(self) -> Option<Self> {
        let inv_length = 1.0 / self.norm();
        (inv_length.is_finite() && inv_length != 0.0).then(|| inv_length * self)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}
impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl Add<Point3> for Vec3 {
    type Output = Point3;
    fn add(self, other: Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}
impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}
impl Index<usize> for Vec3 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("invalid index"),
        }
    }
}
impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("invalid index"),
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}
impl Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}
impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, s: f32) -> Vec3 {
        Vec3::new(self.x / s, self.y / s, self.z / s)
    }
}

// Implementation of Points
impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Point3 {
        Point3 { x, y, z }
    }
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);
    pub fn with_z(self, z: f32) -> Self {
        Self { z, ..self }
    }

    pub fn distance_to(self, p: Self) -> f32 {
        (self - p).norm()
    }
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
    pub fn as_vec4(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, 1.0)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;
    fn add(self, v: Vec3) -> Point3 {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, from: Point3) -> Vec3 {
        Vec3::new(self.x - from.x, self.y - from.y, self.z - from.z)
    }
}
impl Sub<Vec3> for Point3 {
    type Output = Point3;
    fn sub(self, t: Vec3) -> Point3 {
        Point3::new(self.x - t.x, self.y - t.y, self.z - t.z)
    }
}
impl Index<usize> for Point3 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("invalid index"),
        }
    }
}
impl IndexMut<usize> for Point3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("invalid index"),
        }
    }
}

// Explicit conversion between Vec3 and Point3.
// -------------------------------------------------------------------------------------------------
impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec4> for Vec3 {
    fn from(v4: Vec4) -> Self {
        Vec3::new(v4.x, v4.y, v4.z)
    }
}

/// ------------------------------------------------------------------------------------------------
/// Mat3: implements m * m, m * v, m * s, m - m
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub cols: [Vec3; 3],
}

impl Mat3 {
    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO; 3],
    };
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };
    pub fn from_cols(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { cols: [v0, v1, v2] }
    }
    /// Builds the matrix from its rows, which reads like the matrix written on paper.
    pub fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self::from_cols(r0, r1, r2).transpose()
    }
    pub fn rotater_x(angle: crate::Angle) -> Self {
        let (sin_t, cos_t) = angle.sin_cos();
        let rot_y = Vec3::new(0.0, cos_t, sin_t);
        let rot_z = Vec3::new(0.0, -sin_t, cos_t);

        Mat3::from_cols(Vec3::X, rot_y, rot_z)
    }

    pub fn rotater_y(angle: crate::Angle) -> Self {
        let (sin_t, cos_t) = angle.sin_cos();
        let rot_x = Vec3::new(cos_t, 0.0, -sin_t);
        let rot_z = Vec3::new(sin_t, 0.0, cos_t);

        Mat3::from_cols(rot_x, Vec3::Y, rot_z)
    }

    pub fn rotater_z(angle: crate::Angle) -> Self {
        let (sin_t, cos_t) = angle.sin_cos();
        let rot_x = Vec3::new(cos_t, sin_t, 0.0);
        let rot_y = Vec3::new(-sin_t, cos_t, 0.0);

        Mat3::from_cols(rot_x, rot_y, Vec3::Z)
    }

    /// Builds the rotation for Euler angles `(pitch, yaw, roll)` about the x, y and z axes.
    /// The x-rotation is applied first, then y, then z: `R = Rz * Ry * Rx`.
    /// ```
    /// use math::hcm::{Mat3, Vec3};
    /// let r = Mat3::from_euler(math::new_deg(0.0), math::new_deg(90.0), math::new_deg(0.0));
    /// math::assert_close!(r * Vec3::Z, Vec3::X);
    /// ```
    pub fn from_euler(pitch: crate::Angle, yaw: crate::Angle, roll: crate::Angle) -> Self {
        Self::rotater_z(roll) * Self::rotater_y(yaw) * Self::rotater_x(pitch)
    }

    pub fn transpose(&self) -> Self {
        let mut mat = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                mat.cols[i][j] = self.cols[j][i];
            }
        }
        mat
    }
    pub fn determinant(&self) -> f32 {
        let [a, b, c] = self.cols;
        a.dot(b.cross(c))
    }
    pub fn frobenius_norm_squared(&self) -> f32 {
        (0..3).map(|i| self.cols[i].norm_squared()).sum()
    }
    /// Returns true if the matrix is orthonormal with determinant +1, up to `tolerance` on the
    /// squared Frobenius norm of `M * M^T - I` and on the determinant.
    pub fn is_rotation(&self, tolerance: f32) -> bool {
        let orthogonality = (*self * self.transpose() - Self::IDENTITY).frobenius_norm_squared();
        orthogonality <= tolerance && (self.determinant() - 1.0).abs() <= tolerance
    }
    pub fn is_finite(&self) -> bool {
        self.cols.iter().all(|c| c.is_finite())
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    fn mul(self, m: Self) -> Mat3 {
        let mut mat = Mat3::ZERO;
        for c in 0..3 {
            mat.cols[c] = self * m.cols[c];
        }
        mat
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        self.cols[0] * v[0] + self.cols[1] * v[1] + self.cols[2] * v[2]
    }
}

impl Mul<f32> for Mat3 {
    type Output = Mat3;
    fn mul(self, f: f32) -> Mat3 {
        Self::from_cols(self.cols[0] * f, self.cols[1] * f, self.cols[2] * f)
    }
}

impl Sub for Mat3 {
    type Output = Mat3;
    fn sub(self, rhs: Mat3) -> Self::Output {
        Self::from_cols(
            self.cols[0] - rhs.cols[0],
            self.cols[1] - rhs.cols[1],
            self.cols[2] - rhs.cols[2],
        )
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// OpenGL-style perspective projection for a camera looking down -z.
    /// The near plane (z = -near) maps to NDC depth -1 and the far plane to +1.
    /// Callers are responsible for `0 < near < far`, a positive aspect and a fovy in (0, 180)
    /// degrees.
    pub fn perspective(fov_y: crate::Angle, aspect: f32, near: f32, far: f32) -> Mat4 {
        let top = near * (fov_y * 0.5).tan();
        let right = top * aspect;
        let depth = far - near;
        Mat4 {
            cols: [
                Vec4::new(near / right, 0.0, 0.0, 0.0),
                Vec4::new(0.0, near / top, 0.0, 0.0),
                Vec4::new(0.0, 0.0, -(far + near) / depth, -1.0),
                Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
            ],
        }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v[0] + self.cols[1] * v[1] + self.cols[2] * v[2] + self.cols[3] * v[3]
    }
}

#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        if ($left - $right).norm_squared() > 1e-4 {
            panic!(
                "Assertion failed: Close({}, {}) values: {} vs. {}, dist = {}",
                stringify!($left),
                stringify!($right),
                $left,
                $right,
                ($left - $right).norm()
            )
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_euler_order() {
        // Pitch 90 then yaw 90: y -> z (pitch), then z -> x (yaw).
        let r = Mat3::from_euler(crate::new_deg(90.0), crate::new_deg(90.0), crate::new_deg(0.0));
        assert_close!(r * Vec3::Y, Vec3::X);
        assert!(r.is_rotation(1e-5));
    }

    #[test]
    fn test_rotation_check() {
        let r = Mat3::from_euler(crate::new_deg(12.0), crate::new_deg(-40.0), crate::new_deg(77.0));
        assert!(r.is_rotation(1e-5));
        assert!(!(r * 2.0).is_rotation(1e-5));
        let mirror = Mat3::from_cols(Vec3::X, Vec3::Y, -Vec3::Z);
        assert!(!mirror.is_rotation(1e-5));
        assert_eq!(mirror.determinant(), -1.0);
    }

    #[test]
    fn test_from_rows() {
        let m = Mat3::from_rows(vec3(1.0, 2.0, 3.0), vec3(4.0, 5.0, 6.0), vec3(7.0, 8.0, 9.0));
        assert_eq!(m * Vec3::X, vec3(1.0, 4.0, 7.0));
        assert_eq!(m.cols[2], vec3(3.0, 6.0, 9.0));
    }

    #[test]
    fn test_perspective_depth_range() {
        let p = Mat4::perspective(crate::new_deg(60.0), 1.0, 1.0, 10.0);
        let near = p * point3(0.0, 0.0, -1.0).as_vec4();
        let far = p * point3(0.0, 0.0, -10.0).as_vec4();
        assert!((near.z / near.w + 1.0).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }
}
