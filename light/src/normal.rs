use geometry::Triangle;
use math::hcm::{Point3, Vec3};

/// Computes unit vertex normals by summing the area-weighted normals of the adjacent triangles.
///
/// Face normals follow the winding `(p1 - p0) x (p2 - p0)`. Vertices that no triangle references,
/// or whose adjacent normals cancel out, get the zero vector.
///
/// Triangle indices must already be validated against `positions`.
pub fn vertex_normals(positions: &[Point3], triangles: &[Triangle]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in triangles.iter() {
        let (p0, p1, p2) = tri.corners(positions);
        // Twice the triangle area, pointing along the face normal.
        let face_normal = (p1 - p0).cross(p2 - p0);
        for &i in tri.indices().iter() {
            normals[i] += face_normal;
        }
    }
    normals
        .into_iter()
        .map(|n| n.try_hat().unwrap_or(Vec3::ZERO))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use math::hcm::point3;

    #[test]
    fn flat_quad_faces_z() {
        let positions = vec![
            point3(0.0, 0.0, 0.0),
            point3(1.0, 0.0, 0.0),
            point3(1.0, 1.0, 0.0),
            point3(0.0, 1.0, 0.0),
            point3(5.0, 5.0, 5.0),
        ];
        let triangles = vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)];
        let normals = vertex_normals(&positions, &triangles);
        for n in normals[..4].iter() {
            assert_eq!(*n, Vec3::Z);
        }
        assert_eq!(normals[4], Vec3::ZERO);
    }

    #[test]
    fn larger_faces_weigh_more() {
        // Two faces share vertex 0: a big one facing +z and a small one facing +x.
        let positions = vec![
            point3(0.0, 0.0, 0.0),
            point3(4.0, 0.0, 0.0),
            point3(0.0, 4.0, 0.0),
            point3(0.0, 1.0, 0.0),
            point3(0.0, 0.0, 1.0),
        ];
        let triangles = vec![Triangle::new(0, 1, 2), Triangle::new(0, 3, 4)];
        let n = vertex_normals(&positions, &triangles)[0];
        assert!((n.norm() - 1.0).abs() < 1e-6);
        assert!(n.z > n.x && n.x > 0.0);
    }

    #[test]
    fn degenerate_face_contributes_nothing() {
        let positions = vec![point3(0.0, 0.0, 0.0), point3(1.0, 1.0, 1.0), point3(2.0, 2.0, 2.0)];
        let normals = vertex_normals(&positions, &[Triangle::new(0, 1, 2)]);
        assert!(normals.iter().all(|n| *n == Vec3::ZERO));
    }
}
