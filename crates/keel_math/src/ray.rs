//! Half-infinite ray and ray-triangle intersection
//!
//! The direction is not required to be unit length; intersection
//! parameters are expressed in units of the direction's length, so a
//! caller must keep the scale consistent across a test.

use crate::consts;
use crate::triangle::Triangle;
use crate::vector::Vec3;

/// Half-infinite ray: origin plus direction, parametrized by `t >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`, in units of the direction's length.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Closest point on the ray to `point`; never behind the origin.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let dir_sq = self.direction.length_squared();
        if dir_sq <= 0.0 {
            return self.origin;
        }
        let t = (point - self.origin).dot(self.direction) / dir_sq;
        if t <= 0.0 {
            self.origin
        } else {
            self.at(t)
        }
    }

    pub fn distance_squared_to_point(&self, point: Vec3) -> f32 {
        (point - self.closest_point(point)).length_squared()
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.distance_squared_to_point(point).sqrt()
    }

    /// Whether the ray hits the triangle.
    pub fn intersect(&self, triangle: &Triangle) -> bool {
        self.intersect_where_planar(triangle).is_some()
    }

    /// Intersection point in world coordinates, if any.
    pub fn intersect_where(&self, triangle: &Triangle) -> Option<Vec3> {
        self.intersect_where_planar(triangle)
            .map(|(t, _, _)| self.at(t))
    }

    /// Moller-Trumbore intersection, returning `(t, u, v)`: the ray
    /// parameter and the barycentric coordinates of the hit. A determinant
    /// below `FLT_EPSILON` in magnitude means the ray is parallel to the
    /// triangle plane and reports no intersection; hits behind the origin
    /// are rejected.
    pub fn intersect_where_planar(&self, triangle: &Triangle) -> Option<(f32, f32, f32)> {
        let edge1 = triangle.vertices[1] - triangle.vertices[0];
        let edge2 = triangle.vertices[2] - triangle.vertices[0];

        let pvec = self.direction.cross(edge2);
        let det = edge1.dot(pvec);
        if det.abs() < consts::FLT_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = self.origin - triangle.vertices[0];
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = self.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;
        if t < 0.0 {
            return None;
        }

        Some((t, u, v))
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_hit_through_centroid() {
        let tri = unit_triangle();
        let centroid = tri.centroid();
        let ray = Ray::new(Vec3::new(centroid.x, centroid.y, -1.0), Vec3::Z);

        let (t, u, v) = ray.intersect_where_planar(&tri).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
        assert!(u >= 0.0 && v >= 0.0 && u + v <= 1.0);

        let hit = ray.intersect_where(&tri).unwrap();
        assert!((hit - centroid).length() < 1e-5);
        assert!(ray.intersect(&tri));
    }

    #[test]
    fn test_miss_outside_bounds() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.9, 0.9, -1.0), Vec3::Z);
        // u + v > 1 beyond the hypotenuse
        assert!(!ray.intersect(&tri));

        let ray = Ray::new(Vec3::new(-0.5, 0.5, -1.0), Vec3::Z);
        assert!(!ray.intersect(&tri));
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::X);
        assert!(!ray.intersect(&tri));
    }

    #[test]
    fn test_hit_behind_origin_rejected() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::NEG_Z);
        assert!(!ray.intersect(&tri));
    }

    #[test]
    fn test_barycentric_at_vertex() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(1.0, 0.0, -1.0), Vec3::Z);
        let (_, u, v) = ray.intersect_where_planar(&tri).unwrap();
        assert!((u - 1.0).abs() < 1e-5);
        assert!(v.abs() < 1e-5);
    }

    #[test]
    fn test_t_scales_with_direction_length() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, -2.0), Vec3::new(0.0, 0.0, 2.0));
        let (t, _, _) = ray.intersect_where_planar(&tri).unwrap();
        // direction has length 2, so the plane at distance 2 is t = 1
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_point_clamps_to_origin() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let behind = Vec3::new(0.0, 1.0, -5.0);
        assert_eq!(ray.closest_point(behind), Vec3::ZERO);
        let ahead = Vec3::new(1.0, 0.0, 5.0);
        assert!((ray.closest_point(ahead) - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!((ray.distance_to_point(ahead) - 1.0).abs() < 1e-5);
    }
}
