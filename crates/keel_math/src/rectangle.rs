//! Rectangle primitive
//!
//! Stored as three corners A, B, C; the fourth corner is implied as
//! `(B + C) - A`. The corners are assumed to span a parallelogram; that
//! assumption is not checked.

use crate::vector::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rectangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Rectangle {
    #[inline]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// The implied fourth corner, `(B + C) - A`.
    #[inline]
    pub fn fourth_corner(&self) -> Vec3 {
        (self.b + self.c) - self.a
    }

    /// Bilinear interpolation across the surface: `(s, t)` in `[0, 1]^2`
    /// maps A at `(0, 0)`, B at `(1, 0)`, C at `(0, 1)`.
    pub fn point_at(&self, s: f32, t: f32) -> Vec3 {
        self.a + (self.b - self.a) * s + (self.c - self.a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_rect() -> Rectangle {
        Rectangle::new(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_fourth_corner() {
        assert_eq!(unit_rect().fourth_corner(), Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_point_at_corners() {
        let r = unit_rect();
        assert_eq!(r.point_at(0.0, 0.0), r.a);
        assert_eq!(r.point_at(1.0, 0.0), r.b);
        assert_eq!(r.point_at(0.0, 1.0), r.c);
        assert_eq!(r.point_at(1.0, 1.0), r.fourth_corner());
    }

    #[test]
    fn test_point_at_center() {
        let center = unit_rect().point_at(0.5, 0.5);
        assert_eq!(center, Vec3::new(1.0, 0.5, 0.0));
    }
}
