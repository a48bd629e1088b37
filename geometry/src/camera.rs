use math::hcm::{self, Mat3, Point3, Vec3};

use crate::error::RenderError;
use crate::transform::Transform;

/// Below this, `|forward x up|` is treated as zero and the next candidate up vector is used.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Right-handed look-at camera: x rightward, y upward, and the camera looks down -z. Points in
/// front of the camera have negative camera-space z, so a larger z is nearer to the eye.
#[derive(Debug, Clone, Copy)]
pub struct LookAtCamera {
    eye: Point3,
    // Rows are the camera axes expressed in world space.
    world_to_camera: Mat3,
}

impl LookAtCamera {
    /// Builds the camera frame. `up` defaults to world +Y; if it is missing or (nearly) parallel
    /// to the viewing direction, world +Y and then world +Z are tried instead.
    pub fn new(eye: Point3, at: Point3, up: Option<Vec3>) -> Result<Self, RenderError> {
        if !eye.is_finite() || !at.is_finite() || up.map_or(false, |v| !v.is_finite()) {
            return Err(RenderError::NonFiniteCamera);
        }
        let offset = at - eye;
        if !offset.is_finite() {
            return Err(RenderError::NonFiniteCamera);
        }
        let forward = offset.try_hat().ok_or(RenderError::CoincidentEyeTarget)?;

        let right = up
            .into_iter()
            .chain([hcm::Vec3::Y, hcm::Vec3::Z])
            .map(|candidate| forward.cross(candidate))
            .find(|r| r.norm() > PARALLEL_EPSILON)
            .and_then(Vec3::try_hat)
            .ok_or(RenderError::DegenerateCameraFrame)?;
        let true_up = right.cross(forward);

        Ok(Self {
            eye,
            world_to_camera: Mat3::from_rows(right, true_up, -forward),
        })
    }

    pub fn eye(&self) -> Point3 {
        self.eye
    }
    pub fn right(&self) -> Vec3 {
        self.world_to_camera.transpose().cols[0]
    }
    pub fn up(&self) -> Vec3 {
        self.world_to_camera.transpose().cols[1]
    }
    /// Unit viewing direction, from the eye towards the target.
    pub fn forward(&self) -> Vec3 {
        -self.world_to_camera.transpose().cols[2]
    }
}

impl Transform<Point3> for LookAtCamera {
    fn apply(&self, p: Point3) -> Point3 {
        Point3::from(self.world_to_camera * (p - self.eye))
    }
}

impl Transform<Vec3> for LookAtCamera {
    fn apply(&self, v: Vec3) -> Vec3 {
        self.world_to_camera * v
    }
}

/// Transforms world-space vertices into the camera space of a camera at `eye` looking at `at`.
pub fn lookat_camera(
    vertices: &[Point3], eye: Point3, at: Point3, up: Option<Vec3>,
) -> Result<Vec<Point3>, RenderError> {
    crate::mesh::validate_points(vertices)?;
    let camera = LookAtCamera::new(eye, at, up)?;
    log::debug!(
        "look-at camera at {} facing {}, up {}",
        camera.eye(),
        camera.forward(),
        camera.up()
    );
    crate::mesh::finite_output(
        vertices.iter().map(|&p| camera.apply(p)).collect(),
        |index| RenderError::TransformOverflow { index },
    )
}
