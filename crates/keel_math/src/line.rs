//! Infinite line through a point

use crate::vector::Vec3;

/// Infinite line: a point and a direction, unbounded in both senses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Line {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Line {
    #[inline]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`, in units of the direction's length.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Squared distance from a point to the line (unclamped projection).
    ///
    /// Well-defined for non-unit directions; a zero direction degenerates
    /// to the point-to-origin distance.
    pub fn distance_squared_to_point(&self, point: Vec3) -> f32 {
        let diff = point - self.origin;
        let dir_sq = self.direction.length_squared();
        if dir_sq > 0.0 {
            let t = diff.dot(self.direction) / dir_sq;
            (diff - self.direction * t).length_squared()
        } else {
            diff.length_squared()
        }
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.distance_squared_to_point(point).sqrt()
    }
}
