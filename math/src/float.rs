/// An angle, stored in radians. Construct with `new_rad()` or `new_deg()` so that the unit is
/// never ambiguous at the call site.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle {
    rad: f32,
}

impl Angle {
    pub fn new_rad(rad: f32) -> Self {
        Self { rad }
    }
    pub fn new_deg(deg: f32) -> Self {
        Self {
            rad: deg.to_radians(),
        }
    }
    pub fn to_rad(self) -> f32 {
        self.rad
    }
    pub fn to_deg(self) -> f32 {
        self.rad.to_degrees()
    }
    pub fn sin_cos(self) -> (f32, f32) {
        self.rad.sin_cos()
    }
    pub fn tan(self) -> f32 {
        self.rad.tan()
    }
    pub fn is_finite(self) -> bool {
        self.rad.is_finite()
    }
}

impl std::ops::Mul<f32> for Angle {
    type Output = Angle;
    fn mul(self, s: f32) -> Angle {
        Angle::new_rad(self.rad * s)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(f, "{:.p$}deg", self.to_deg(), p = precision)
    }
}

/// Computes the barycentric combination `w0 * a + w1 * b + w2 * c` of 3 attribute values.
///
/// Unlike a lerp expressed through differences, the plain weighted sum reproduces `a` exactly when
/// the weights are `(1, 0, 0)` (and likewise for `b` and `c`), as long as the values are finite.
/// ```
/// use math::float::barycentric_blend;
/// assert_eq!(barycentric_blend((0.1f32, 7.3, -2.0), (1.0, 0.0, 0.0)), 0.1);
/// assert_eq!(barycentric_blend((0.0f32, 1.0, 2.0), (0.25, 0.25, 0.5)), 1.25);
/// ```
pub fn barycentric_blend<T>(values: (T, T, T), weights: (f32, f32, f32)) -> T
where
    T: Copy + std::ops::Mul<f32, Output = T> + std::ops::Add<T, Output = T>,
{
    let (a, b, c) = values;
    let (w0, w1, w2) = weights;
    a * w0 + b * w1 + c * w2
}

pub fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Returns the smallest and the largest of 3 values.
pub fn min_max3(a: f32, b: f32, c: f32) -> (f32, f32) {
    let (lo, hi) = min_max(a, b);
    (lo.min(c), hi.max(c))
}

#[macro_export]
macro_rules! assert_le {
    ($left:expr, $right:expr) => {
        if $left > $right {
            panic!(
                "Assertion failed: {} <= {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn angle_units() {
        let a = Angle::new_deg(90.0);
        assert!((a.to_rad() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let (sin_t, cos_t) = a.sin_cos();
        assert!((sin_t - 1.0).abs() < 1e-6);
        assert!(cos_t.abs() < 1e-6);
        assert!(((a * 0.5).tan() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn min_max_of_three() {
        assert_eq!(min_max3(3.0, -1.0, 2.0), (-1.0, 3.0));
        assert_eq!(min_max3(0.5, 0.5, 0.5), (0.5, 0.5));
    }
}
