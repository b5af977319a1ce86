//! Composite rigid and scaled transforms
//!
//! `TransformMatrix` is the rigid form (3x3 rotation + translation);
//! `TransformMatrixQuat` adds a non-uniform scale and stores its rotation
//! as a quaternion. Both compose hierarchically: applying a parent
//! transform on top of a child's local transform.

use crate::matrix::{Mat3, Mat4};
use crate::quaternion::Quat;
use crate::vector::Vec3;

/// Rigid transform `p' = R * p + T`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct TransformMatrix {
    pub rotation: Mat3,
    pub translation: Vec3,
}

impl TransformMatrix {
    pub const IDENTITY: Self = Self {
        rotation: Mat3::IDENTITY,
        translation: Vec3::ZERO,
    };

    #[inline]
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation: Mat3::from_quat(rotation),
            translation,
        }
    }

    pub fn load_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn set_rotation_quat(&mut self, q: Quat) {
        self.rotation = Mat3::from_quat(q);
    }

    /// Set the rotation from Euler angles in radians (Z * Y * X order).
    pub fn set_euler_rot(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Mat4::from_angles(x, y, z).to_mat3();
    }

    /// Apply to a point: rotation then translation.
    #[inline]
    pub fn mult_point(&self, p: Vec3) -> Vec3 {
        self.rotation.mult_vec(p) + self.translation
    }

    /// Apply to a normal: rotation only, translation ignored.
    #[inline]
    pub fn mult_normal(&self, n: Vec3) -> Vec3 {
        self.rotation.mult_vec(n)
    }

    /// Compose with a parent: `self = parent * self`, i.e.
    /// `R' = R_parent * R`, `T' = R_parent * T + T_parent`.
    pub fn mult_local(&mut self, parent: &Self) -> &mut Self {
        self.translation = parent.rotation.mult_vec(self.translation) + parent.translation;
        self.rotation = parent.rotation.mult(&self.rotation);
        self
    }

    /// Mutate this transform into its own inverse: the rotation is
    /// transposed and the translation becomes `-(R^T * T)`. This is an
    /// in-place operation, not a query.
    pub fn invert_local(&mut self) -> &mut Self {
        self.rotation = self.rotation.transpose();
        self.translation = -self.rotation.mult_vec(self.translation);
        self
    }

    pub fn to_mat4(&self) -> Mat4 {
        let mut out = self.rotation.to_mat4();
        out.set_translation(self.translation);
        out
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Scaled transform: quaternion rotation, translation, and non-uniform
/// scale, applied to a point as `p' = R * (S * p) + T`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct TransformMatrixQuat {
    pub rotation: Quat,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl TransformMatrixQuat {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[inline]
    pub const fn new(rotation: Quat, translation: Vec3, scale: Vec3) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    pub fn load_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Apply to a point: scale, then rotation, then translation.
    pub fn mult_point(&self, p: Vec3) -> Vec3 {
        self.rotation.mult_vec(p.mul_comp(self.scale)) + self.translation
    }

    /// Compose with a parent so this becomes the child's transform in the
    /// parent's space: scales multiply component-wise, rotations compose,
    /// and the parent's rotation and scale are applied to the child's
    /// translation before the parent's translation is added.
    pub fn combine_with_parent(&mut self, parent: &Self) -> &mut Self {
        self.scale = self.scale.mul_comp(parent.scale);
        self.rotation = parent.rotation.mult(self.rotation);
        self.translation = parent
            .rotation
            .mult_vec(self.translation.mul_comp(parent.scale))
            + parent.translation;
        self
    }

    /// Interpolate between two transforms: slerp for the rotation, linear
    /// blends for translation and scale.
    pub fn interpolate(t1: &Self, t2: &Self, t: f32) -> Self {
        Self {
            rotation: t1.rotation.slerp(t2.rotation, t),
            translation: t1.translation.lerp(t2.translation, t),
            scale: t1.scale.lerp(t2.scale, t),
        }
    }

    /// Lower to a 4x4 matrix with the scale folded into the linear block.
    pub fn to_mat4(&self) -> Mat4 {
        let rot = Mat3::from_quat(self.rotation);
        let mut out = Mat4::IDENTITY;
        for i in 0..3 {
            out.m[i][0] = rot.m[i][0] * self.scale.x;
            out.m[i][1] = rot.m[i][1] * self.scale.y;
            out.m[i][2] = rot.m[i][2] * self.scale.z;
        }
        out.set_translation(self.translation);
        out
    }
}

impl Default for TransformMatrixQuat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;

    #[test]
    fn test_rigid_identity() {
        let t = TransformMatrix::IDENTITY;
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(t.mult_point(p), p);
    }

    #[test]
    fn test_rigid_mult_point() {
        let t = TransformMatrix::new(
            Quat::from_angle_axis(consts::HALF_PI, Vec3::Z),
            Vec3::new(10.0, 0.0, 0.0),
        );
        // (1,0,0) rotates to (0,1,0), then translates
        let p = t.mult_point(Vec3::X);
        assert!((p - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-5);
        // normals ignore translation
        let n = t.mult_normal(Vec3::X);
        assert!((n - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_rigid_parent_composition() {
        let parent = TransformMatrix::new(
            Quat::from_angle_axis(consts::HALF_PI, Vec3::Z),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let mut child = TransformMatrix::new(Quat::IDENTITY, Vec3::new(2.0, 0.0, 0.0));
        child.mult_local(&parent);

        // child-space origin lands at parent-rotated child translation
        // plus parent translation: (0,2,0) + (1,0,0)
        let p = child.mult_point(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rigid_invert_local_roundtrip() {
        let t = TransformMatrix::new(
            Quat::from_angle_axis(0.7, Vec3::new(1.0, 1.0, 0.0)),
            Vec3::new(3.0, -1.0, 2.0),
        );
        let mut inv = t;
        inv.invert_local();

        let p = Vec3::new(0.5, 4.0, -2.0);
        let roundtrip = inv.mult_point(t.mult_point(p));
        assert!((roundtrip - p).length() < 1e-5);
    }

    #[test]
    fn test_quat_transform_scale_then_rotate() {
        let t = TransformMatrixQuat::new(
            Quat::from_angle_axis(consts::HALF_PI, Vec3::Z),
            Vec3::ZERO,
            Vec3::new(2.0, 1.0, 1.0),
        );
        // x scales to 2 before rotating into y
        let p = t.mult_point(Vec3::X);
        assert!((p - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_quat_transform_combine_with_parent() {
        let parent = TransformMatrixQuat::new(
            Quat::from_angle_axis(consts::HALF_PI, Vec3::Z),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let mut child = TransformMatrixQuat::new(
            Quat::IDENTITY,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ONE,
        );
        child.combine_with_parent(&parent);

        assert_eq!(child.scale, Vec3::new(2.0, 2.0, 2.0));
        // child translation scaled by parent (2,0,0), rotated to (0,2,0),
        // plus parent translation
        assert!((child.translation - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);

        // composed transform equals applying parent after child
        let p = Vec3::new(0.5, 0.0, 0.0);
        let original_child =
            TransformMatrixQuat::new(Quat::IDENTITY, Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        let via_combined = child.mult_point(p);
        let via_sequential = parent.mult_point(original_child.mult_point(p));
        assert!((via_combined - via_sequential).length() < 1e-5);
    }

    #[test]
    fn test_quat_transform_to_mat4_matches_mult_point() {
        let t = TransformMatrixQuat::new(
            Quat::from_angle_axis(0.4, Vec3::new(0.0, 1.0, 1.0)),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(2.0, 3.0, 0.5),
        );
        let m = t.to_mat4();
        let p = Vec3::new(-1.0, 0.5, 2.0);
        assert!((m.transform_point(p) - t.mult_point(p)).length() < 1e-4);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = TransformMatrixQuat::IDENTITY;
        let b = TransformMatrixQuat::new(
            Quat::from_angle_axis(1.0, Vec3::Y),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let start = TransformMatrixQuat::interpolate(&a, &b, 0.0);
        assert!((start.translation - a.translation).length() < 1e-6);
        let end = TransformMatrixQuat::interpolate(&a, &b, 1.0);
        assert!((end.translation - b.translation).length() < 1e-5);
        assert!((end.scale - b.scale).length() < 1e-5);
    }
}
