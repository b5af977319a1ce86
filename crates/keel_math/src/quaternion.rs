//! Quaternion for 3D rotations
//!
//! A valid rotation quaternion has unit norm; the API never normalizes
//! implicitly. `mult` and `slerp` assume approximately-unit inputs.

use crate::consts;
use crate::error::{MathError, Result};
use crate::fastmath;
use crate::matrix::Mat3;
use crate::vector::Vec3;
use core::ops::{Mul, MulAssign, Neg};

/// Quaternion representing a 3D rotation
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation about an arbitrary axis; the axis is normalized first.
    pub fn from_angle_axis(angle: f32, axis: Vec3) -> Self {
        Self::from_angle_normal_axis(angle, axis.normalize())
    }

    /// Rotation about a unit axis: `w = cos(angle/2)`,
    /// `xyz = sin(angle/2) * axis`.
    pub fn from_angle_normal_axis(angle: f32, axis: Vec3) -> Self {
        let half = 0.5 * angle;
        let sin = fastmath::sin(half);
        Self::new(sin * axis.x, sin * axis.y, sin * axis.z, fastmath::cos(half))
    }

    /// Rotation from Euler angles in radians (x roll, y pitch, z yaw).
    pub fn from_angles(x: f32, y: f32, z: f32) -> Self {
        let sy = fastmath::sin(z * 0.5);
        let cy = fastmath::cos(z * 0.5);
        let sp = fastmath::sin(y * 0.5);
        let cp = fastmath::cos(y * 0.5);
        let sr = fastmath::sin(x * 0.5);
        let cr = fastmath::cos(x * 0.5);

        let cr_cp = cr * cp;
        let sr_sp = sr * sp;

        Self::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr_cp * sy - sr_sp * cy,
            cr_cp * cy + sr_sp * sy,
        )
    }

    /// Extract the rotation from a rotation matrix.
    ///
    /// Branches on the trace `t = m00 + m11 + m22 + 1`: the direct formula
    /// when `t` is comfortably positive, otherwise the Shepperd branch
    /// pivoting on the largest diagonal element, so no branch divides by a
    /// near-zero quantity.
    pub fn from_rotation_matrix(m: &Mat3) -> Self {
        let t = m.m[0][0] + m.m[1][1] + m.m[2][2] + 1.0;

        if t > 3.0 * consts::FLT_EPSILON {
            let s = 0.5 / t.sqrt();
            Self::new(
                (m.m[2][1] - m.m[1][2]) * s,
                (m.m[0][2] - m.m[2][0]) * s,
                (m.m[1][0] - m.m[0][1]) * s,
                0.25 / s,
            )
        } else if m.m[0][0] > m.m[1][1] && m.m[0][0] > m.m[2][2] {
            let s = (1.0 + m.m[0][0] - m.m[1][1] - m.m[2][2]).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (m.m[0][1] + m.m[1][0]) / s,
                (m.m[0][2] + m.m[2][0]) / s,
                (m.m[2][1] - m.m[1][2]) / s,
            )
        } else if m.m[1][1] > m.m[2][2] {
            let s = (1.0 + m.m[1][1] - m.m[0][0] - m.m[2][2]).sqrt() * 2.0;
            Self::new(
                (m.m[0][1] + m.m[1][0]) / s,
                0.25 * s,
                (m.m[1][2] + m.m[2][1]) / s,
                (m.m[0][2] - m.m[2][0]) / s,
            )
        } else {
            let s = (1.0 + m.m[2][2] - m.m[0][0] - m.m[1][1]).sqrt() * 2.0;
            Self::new(
                (m.m[0][2] + m.m[2][0]) / s,
                (m.m[1][2] + m.m[2][1]) / s,
                0.25 * s,
                (m.m[1][0] - m.m[0][1]) / s,
            )
        }
    }

    /// Rotation from three orthonormal basis vectors, taken as the columns
    /// of a rotation matrix.
    pub fn from_axes(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        Self::from_rotation_matrix(&Mat3::from_columns(x_axis, y_axis, z_axis))
    }

    /// Closed-form conversion to a rotation matrix; this direction never
    /// needs a branch.
    pub fn to_rotation_matrix(self) -> Mat3 {
        Mat3::from_quat(self)
    }

    /// One column of the equivalent rotation matrix, without building the
    /// whole matrix.
    pub fn rotation_column(self, col: usize) -> Result<Vec3> {
        let x2 = self.x + self.x;
        let y2 = self.y + self.y;
        let z2 = self.z + self.z;
        let xx = self.x * x2;
        let xy = self.x * y2;
        let xz = self.x * z2;
        let yy = self.y * y2;
        let yz = self.y * z2;
        let zz = self.z * z2;
        let wx = self.w * x2;
        let wy = self.w * y2;
        let wz = self.w * z2;

        match col {
            0 => Ok(Vec3::new(1.0 - (yy + zz), xy + wz, xz - wy)),
            1 => Ok(Vec3::new(xy - wz, 1.0 - (xx + zz), yz + wx)),
            2 => Ok(Vec3::new(xz + wy, yz - wx, 1.0 - (xx + yy))),
            _ => Err(MathError::ColumnOutOfRange(col)),
        }
    }

    /// Angle (radians) and unit axis of this rotation.
    ///
    /// The identity/degenerate case (`x^2 + y^2 + z^2 == 0`) yields angle 0
    /// about `(1, 0, 0)`.
    pub fn to_angle_axis(self) -> (f32, Vec3) {
        let sqr_length = self.x * self.x + self.y * self.y + self.z * self.z;
        if sqr_length > 0.0 {
            let angle = 2.0 * fastmath::acos(self.w);
            let inv_length = fastmath::inv_sqrt(sqr_length);
            (angle, Vec3::new(self.x, self.y, self.z) * inv_length)
        } else {
            (0.0, Vec3::X)
        }
    }

    /// Euler angles (radians) equivalent to this rotation, in the same
    /// x/y/z order accepted by [`Quat::from_angles`].
    pub fn to_angles(self) -> Vec3 {
        let sr_cp = 2.0 * (self.w * self.x + self.y * self.z);
        let cr_cp = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        let x = sr_cp.atan2(cr_cp);

        let sp = 2.0 * (self.w * self.y - self.z * self.x);
        let y = if sp.abs() >= 1.0 {
            consts::HALF_PI.copysign(sp)
        } else {
            fastmath::asin(sp)
        };

        let sy_cp = 2.0 * (self.w * self.z + self.x * self.y);
        let cy_cp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        let z = sy_cp.atan2(cy_cp);

        Vec3::new(x, y, z)
    }

    /// Spherical linear interpolation toward `other`.
    ///
    /// Equal inputs short-circuit to `self`. A negative dot product flips a
    /// local copy of `other` (shortest-path rule; the argument is never
    /// mutated). While `1 - dot > 0.1` the true spherical weights are used;
    /// below that threshold `sin(theta)` is no longer trustworthy and the
    /// weights fall back to linear.
    pub fn slerp(self, other: Self, t: f32) -> Self {
        if self == other {
            return self;
        }

        let mut dot = self.dot(other);
        let mut other = other;

        if dot < 0.0 {
            other = -other;
            dot = -dot;
        }

        let mut scale0 = 1.0 - t;
        let mut scale1 = t;

        if (1.0 - dot) > 0.1 {
            let theta = fastmath::acos(dot);
            let sin_theta = theta.sin();
            scale0 = ((1.0 - t) * theta).sin() / sin_theta;
            scale1 = (t * theta).sin() / sin_theta;
        }

        Self::new(
            scale0 * self.x + scale1 * other.x,
            scale0 * self.y + scale1 * other.y,
            scale0 * self.z + scale1 * other.z,
            scale0 * self.w + scale1 * other.w,
        )
    }

    /// Hamilton product `self * other`: the rotation `other` followed by
    /// `self`. The component/sign layout is contractual; swapping operand
    /// order changes the composition.
    pub fn mult(self, q: Self) -> Self {
        Self::new(
            self.x * q.w + self.y * q.z - self.z * q.y + self.w * q.x,
            -self.x * q.z + self.y * q.w + self.z * q.x + self.w * q.y,
            self.x * q.y - self.y * q.x + self.z * q.w + self.w * q.z,
            -self.x * q.x - self.y * q.y - self.z * q.z + self.w * q.w,
        )
    }

    /// In-place Hamilton product, returning `self` for chaining.
    pub fn mult_local(&mut self, q: Self) -> &mut Self {
        *self = self.mult(q);
        self
    }

    /// Rotate a vector by this quaternion.
    pub fn mult_vec(self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let uv = qv.cross(v);
        let uuv = qv.cross(uv);
        v + uv * (2.0 * self.w) + uuv * 2.0
    }

    #[inline]
    pub fn dot(self, q: Self) -> f32 {
        self.x * q.x + self.y * q.y + self.z * q.z + self.w * q.w
    }

    /// Squared norm: the dot product of the quaternion with itself.
    #[inline]
    pub fn norm(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.norm().sqrt()
    }

    /// Unit quaternion in the same orientation; a zero quaternion
    /// normalizes to the identity.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::IDENTITY
        }
    }

    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, or `None` when the norm is not positive.
    pub fn inverse(self) -> Option<Self> {
        let norm = self.norm();
        if norm > 0.0 {
            let inv = 1.0 / norm;
            Some(Self::new(
                -self.x * inv,
                -self.y * inv,
                -self.z * inv,
                self.w * inv,
            ))
        } else {
            None
        }
    }

    /// In-place inverse; a silent no-op when the norm is not positive.
    pub fn inverse_local(&mut self) -> &mut Self {
        if let Some(inv) = self.inverse() {
            *self = inv;
        }
        self
    }

    pub fn add(self, q: Self) -> Self {
        Self::new(self.x + q.x, self.y + q.y, self.z + q.z, self.w + q.w)
    }

    pub fn sub(self, q: Self) -> Self {
        Self::new(self.x - q.x, self.y - q.y, self.z - q.z, self.w - q.w)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Neg for Quat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mult(rhs)
    }
}

impl MulAssign for Quat {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.mult_local(rhs);
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mult_vec(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;

    fn approx_quat(a: Quat, b: Quat, tol: f32) -> bool {
        (a.x - b.x).abs() < tol
            && (a.y - b.y).abs() < tol
            && (a.z - b.z).abs() < tol
            && (a.w - b.w).abs() < tol
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!((Quat::IDENTITY * v - v).length() < 1e-6);
    }

    #[test]
    fn test_half_turn_about_y() {
        let q = Quat::from_angle_axis(consts::PI, Vec3::Y);
        let rotated = q * Vec3::X;
        assert!((rotated - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_matrix_roundtrip_direct_branch() {
        let q = Quat::from_angle_axis(0.8, Vec3::new(1.0, 2.0, 0.5));
        let back = Quat::from_rotation_matrix(&q.to_rotation_matrix());
        // double cover: q and -q describe the same rotation
        assert!(approx_quat(back, q, 1e-5) || approx_quat(back, -q, 1e-5));
    }

    #[test]
    fn test_matrix_roundtrip_pivot_branches() {
        // near-pi rotations about each axis drive the trace near -1,
        // exercising all three diagonal pivots
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            let q = Quat::from_angle_axis(consts::PI - 1e-4, axis);
            let m = q.to_rotation_matrix();
            let back = Quat::from_rotation_matrix(&m);
            let m2 = back.to_rotation_matrix();
            for i in 0..3 {
                for j in 0..3 {
                    assert!((m.m[i][j] - m2.m[i][j]).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_from_axes_matches_matrix() {
        let q = Quat::from_angle_axis(0.6, Vec3::new(0.0, 1.0, 1.0));
        let m = q.to_rotation_matrix();
        let ax = m.column(0).unwrap();
        let ay = m.column(1).unwrap();
        let az = m.column(2).unwrap();
        let back = Quat::from_axes(ax, ay, az);
        assert!(approx_quat(back, q, 1e-5) || approx_quat(back, -q, 1e-5));
    }

    #[test]
    fn test_to_angle_axis() {
        let q = Quat::from_angle_axis(1.2, Vec3::Z);
        let (angle, axis) = q.to_angle_axis();
        approx::assert_relative_eq!(angle, 1.2, epsilon = 1e-5);
        assert!((axis - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_to_angle_axis_identity_default() {
        let (angle, axis) = Quat::IDENTITY.to_angle_axis();
        assert_eq!(angle, 0.0);
        assert_eq!(axis, Vec3::X);
    }

    #[test]
    fn test_slerp_equal_inputs() {
        let q = Quat::from_angle_axis(0.4, Vec3::Y);
        assert_eq!(q.slerp(q, 0.3), q);
        assert_eq!(q.slerp(q, 0.9), q);
    }

    #[test]
    fn test_slerp_endpoints() {
        let q1 = Quat::IDENTITY;
        let q2 = Quat::from_angle_axis(1.0, Vec3::Y);
        assert!(approx_quat(q1.slerp(q2, 0.0), q1, 1e-6));
        assert!(approx_quat(q1.slerp(q2, 1.0), q2, 1e-5));
    }

    #[test]
    fn test_slerp_midpoint() {
        let q1 = Quat::IDENTITY;
        let q2 = Quat::from_angle_axis(consts::HALF_PI, Vec3::Y);
        let mid = q1.slerp(q2, 0.5);
        let expected = Quat::from_angle_axis(consts::HALF_PI * 0.5, Vec3::Y);
        assert!(approx_quat(mid, expected, 1e-4));
    }

    #[test]
    fn test_slerp_does_not_mutate_argument() {
        let q1 = Quat::from_angle_axis(0.2, Vec3::X);
        let q2 = -Quat::from_angle_axis(2.5, Vec3::X);
        let q2_before = q2;
        let _ = q1.slerp(q2, 0.5);
        assert_eq!(q2, q2_before);
    }

    #[test]
    fn test_slerp_shortest_path() {
        // q2 negated still interpolates along the short arc
        let q1 = Quat::IDENTITY;
        let q2 = Quat::from_angle_axis(1.0, Vec3::Y);
        let mid_pos = q1.slerp(q2, 0.5);
        let mid_neg = q1.slerp(-q2, 0.5);
        // same rotation up to sign
        assert!(mid_pos.dot(mid_neg).abs() > 0.9999);
    }

    #[test]
    fn test_mult_composition_order() {
        let rot_x = Quat::from_angle_axis(consts::HALF_PI, Vec3::X);
        let rot_y = Quat::from_angle_axis(consts::HALF_PI, Vec3::Y);
        // (rot_y * rot_x) applies rot_x first
        let composed = rot_y.mult(rot_x);
        let v = Vec3::Z;
        let expected = rot_y * (rot_x * v);
        assert!((composed * v - expected).length() < 1e-5);
    }

    #[test]
    fn test_inverse_of_unit() {
        let q = Quat::from_angle_axis(0.7, Vec3::new(1.0, 1.0, 0.0));
        let inv = q.inverse().unwrap();
        let product = q * inv;
        assert!(approx_quat(product, Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn test_inverse_of_zero_is_none() {
        let zero = Quat::new(0.0, 0.0, 0.0, 0.0);
        assert!(zero.inverse().is_none());

        let mut local = zero;
        local.inverse_local();
        assert_eq!(local, zero);
    }

    #[test]
    fn test_normalize_zero_is_identity() {
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::IDENTITY);
    }

    #[test]
    fn test_rotation_column_checked() {
        let q = Quat::from_angle_axis(0.5, Vec3::Z);
        let m = q.to_rotation_matrix();
        for col in 0..3 {
            let from_quat = q.rotation_column(col).unwrap();
            let from_matrix = m.column(col).unwrap();
            assert!((from_quat - from_matrix).length() < 1e-6);
        }
        assert_eq!(q.rotation_column(3), Err(MathError::ColumnOutOfRange(3)));
    }

    #[test]
    fn test_from_angles_roundtrip() {
        let q = Quat::from_angles(0.3, -0.5, 1.1);
        let angles = q.to_angles();
        let back = Quat::from_angles(angles.x, angles.y, angles.z);
        assert!(approx_quat(back, q, 1e-4) || approx_quat(back, -q, 1e-4));
    }
}
