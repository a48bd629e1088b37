use math::hcm::{Mat4, Point3};
use math::Angle;

use crate::error::RenderError;

/// Below this `|w|`, a vertex is considered to lie on the eye plane.
const EYE_PLANE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub enum Projection {
    /// Keeps camera-space x, y and z.
    Orthographic,
    Perspective {
        fov_y: Angle,
        aspect: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// Creates a perspective projection after checking `0 < near < far`, a finite positive aspect
    /// ratio, and a vertical field of view strictly between 0 and 180 degrees.
    pub fn perspective(fov_y: Angle, aspect: f32, near: f32, far: f32) -> Result<Self, RenderError> {
        if !(fov_y.is_finite() && fov_y.to_deg() > 0.0 && fov_y.to_deg() < 180.0) {
            return Err(RenderError::InvalidFieldOfView(fov_y.to_deg()));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(RenderError::InvalidAspect(aspect));
        }
        if !(near.is_finite() && far.is_finite() && near > 0.0 && near < far) {
            return Err(RenderError::InvalidClipPlanes { near, far });
        }
        Ok(Projection::Perspective {
            fov_y,
            aspect,
            near,
            far,
        })
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self, Projection::Perspective { .. })
    }

    /// Projects camera-space vertices. The output keeps "larger z is nearer" for both kinds.
    pub fn project(&self, vertices: &[Point3]) -> Result<Vec<Point3>, RenderError> {
        match *self {
            Projection::Orthographic => orthographic_project(vertices),
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => perspective_project(vertices, fov_y, aspect, near, far),
        }
    }
}

/// The orthographic camera keeps the camera-space coordinates as they are.
pub fn orthographic_project(vertices: &[Point3]) -> Result<Vec<Point3>, RenderError> {
    crate::mesh::validate_points(vertices)?;
    Ok(vertices.to_vec())
}

/// Applies the perspective matrix and the perspective divide, yielding normalized device
/// coordinates with x, y in [-1, 1] inside the frustum. The NDC depth is negated so that the near
/// plane maps to +1 and the far plane to -1.
///
/// Fails if any vertex lies on the eye plane (camera-space z = 0) or lands outside the f32 range
/// after the divide. Vertices behind the eye are projected as-is and only reported in the log.
pub fn perspective_project(
    vertices: &[Point3], fov_y: Angle, aspect: f32, near: f32, far: f32,
) -> Result<Vec<Point3>, RenderError> {
    Projection::perspective(fov_y, aspect, near, far)?;
    crate::mesh::validate_points(vertices)?;
    let matrix = Mat4::perspective(fov_y, aspect, near, far);

    let mut behind = 0usize;
    let projected = vertices
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let clip = matrix * p.as_vec4();
            if clip.w.abs() < EYE_PLANE_EPSILON {
                return Err(RenderError::VertexOnEyePlane { index });
            }
            if clip.w < 0.0 {
                behind += 1;
            }
            let ndc = Point3::new(clip.x / clip.w, clip.y / clip.w, -clip.z / clip.w);
            if !ndc.is_finite() {
                return Err(RenderError::ProjectionOverflow { index });
            }
            Ok(ndc)
        })
        .collect::<Result<Vec<_>, _>>()?;
    if behind > 0 {
        log::warn!("{} of {} vertices are behind the camera", behind, vertices.len());
    }
    Ok(projected)
}

#[cfg(test)]
mod test {
    use super::*;
    use math::hcm::point3;

    #[test]
    fn near_and_far_planes() {
        let ndc = perspective_project(
            &[point3(0.0, 0.0, -100.0), point3(0.0, 0.0, -1000.0)],
            math::new_deg(50.0),
            1.0,
            100.0,
            1000.0,
        )
        .unwrap();
        assert!((ndc[0].z - 1.0).abs() < 1e-4, "near depth = {}", ndc[0].z);
        assert!((ndc[1].z + 1.0).abs() < 1e-4, "far depth = {}", ndc[1].z);
    }

    #[test]
    fn frustum_edge_maps_to_unit_square() {
        // With fovy = 90 degrees, the top of the frustum at depth d is at y = d.
        let ndc = perspective_project(
            &[point3(2.0, 5.0, -5.0)],
            math::new_deg(90.0),
            2.5,
            1.0,
            10.0,
        )
        .unwrap();
        assert!((ndc[0].y - 1.0).abs() < 1e-5);
        assert!((ndc[0].x - 2.0 / 2.5 / 5.0).abs() < 1e-5);
    }

    #[test]
    fn nearer_is_larger_depth() {
        let ndc = Projection::perspective(math::new_deg(60.0), 1.0, 0.5, 50.0)
            .unwrap()
            .project(&[point3(0.0, 0.0, -2.0), point3(0.0, 0.0, -20.0)])
            .unwrap();
        assert!(ndc[0].z > ndc[1].z);
    }

    #[test]
    fn eye_plane_vertex_fails() {
        let err = perspective_project(
            &[point3(0.0, 0.0, -5.0), point3(1.0, 1.0, 0.0)],
            math::new_deg(60.0),
            1.0,
            0.1,
            100.0,
        )
        .unwrap_err();
        assert_eq!(err, RenderError::VertexOnEyePlane { index: 1 });
    }

    #[test]
    fn invalid_parameters() {
        let fov = math::new_deg(60.0);
        assert!(matches!(
            Projection::perspective(fov, 1.0, 10.0, 1.0),
            Err(RenderError::InvalidClipPlanes { .. })
        ));
        assert!(matches!(
            Projection::perspective(fov, 1.0, 0.0, 1.0),
            Err(RenderError::InvalidClipPlanes { .. })
        ));
        assert!(matches!(
            Projection::perspective(fov, 0.0, 1.0, 2.0),
            Err(RenderError::InvalidAspect(_))
        ));
        assert!(matches!(
            Projection::perspective(math::new_deg(180.0), 1.0, 1.0, 2.0),
            Err(RenderError::InvalidFieldOfView(_))
        ));
    }

    #[test]
    fn orthographic_is_identity() {
        let v = vec![point3(1.0, -2.0, 3.0)];
        assert_eq!(Projection::Orthographic.project(&v).unwrap(), v);
        assert!(!Projection::Orthographic.is_perspective());
    }
}
