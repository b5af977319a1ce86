//! Triangle primitive

use crate::error::{MathError, Result};
use crate::vector::Vec3;

/// Triangle addressed by vertex index 0-2.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    #[inline]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Vertex at index 0-2; out-of-range indices are an error.
    #[inline]
    pub fn get(&self, index: usize) -> Result<Vec3> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(MathError::VertexOutOfRange(index))
    }

    /// Set vertex at index 0-2; out-of-range indices are an error.
    #[inline]
    pub fn set(&mut self, index: usize, vertex: Vec3) -> Result<()> {
        match self.vertices.get_mut(index) {
            Some(v) => {
                *v = vertex;
                Ok(())
            }
            None => Err(MathError::VertexOutOfRange(index)),
        }
    }

    /// Average of the three vertices.
    pub fn centroid(&self) -> Vec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    /// Unit normal from the counter-clockwise winding; degenerate triangles
    /// yield the zero vector.
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(edge2).normalize()
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
    fn test_indexed_access() {
        let mut tri = unit_triangle();
        assert_eq!(tri.get(1), Ok(Vec3::new(1.0, 0.0, 0.0)));
        assert!(tri.set(2, Vec3::new(0.0, 2.0, 0.0)).is_ok());
        assert_eq!(tri.get(2), Ok(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(tri.get(3), Err(MathError::VertexOutOfRange(3)));
        assert_eq!(
            tri.set(4, Vec3::ZERO),
            Err(MathError::VertexOutOfRange(4))
        );
    }

    #[test]
    fn test_centroid() {
        let c = unit_triangle().centroid();
        assert!((c - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_normal_ccw() {
        assert_eq!(unit_triangle().normal(), Vec3::Z);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(tri.normal(), Vec3::ZERO);
    }
}
