//! Matrix types for linear and affine maps
//!
//! Both matrices are stored row-major. `Mat4` serves two operation
//! families: point-transform operations (`mult`, `transform_point`) treat
//! the last row as the implicit `(0, 0, 0, 1)` of an affine map, while the
//! general algebra (`determinant`, `adjugate`, `invert`) stores and uses
//! all sixteen fields.

use crate::consts;
use crate::error::{MathError, Result};
use crate::fastmath;
use crate::quaternion::Quat;
use crate::vector::{Vec3, Vec4};
use core::ops::Mul;

/// 3x3 matrix (row-major)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f32, m01: f32, m02: f32,
        m10: f32, m11: f32, m12: f32,
        m20: f32, m21: f32, m22: f32,
    ) -> Self {
        Self {
            m: [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]],
        }
    }

    #[inline]
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self {
            m: [[r0.x, r0.y, r0.z], [r1.x, r1.y, r1.z], [r2.x, r2.y, r2.z]],
        }
    }

    /// Build a matrix whose columns are the given vectors.
    #[inline]
    pub const fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self {
            m: [[c0.x, c1.x, c2.x], [c0.y, c1.y, c2.y], [c0.z, c1.z, c2.z]],
        }
    }

    /// Element at `(row, col)`; out-of-range indices are an error.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<f32> {
        if row > 2 || col > 2 {
            return Err(MathError::IndexOutOfRange { row, col });
        }
        Ok(self.m[row][col])
    }

    /// Set element at `(row, col)`; out-of-range indices are an error.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        if row > 2 || col > 2 {
            return Err(MathError::IndexOutOfRange { row, col });
        }
        self.m[row][col] = value;
        Ok(())
    }

    pub fn column(&self, col: usize) -> Result<Vec3> {
        if col > 2 {
            return Err(MathError::ColumnOutOfRange(col));
        }
        Ok(Vec3::new(self.m[0][col], self.m[1][col], self.m[2][col]))
    }

    pub fn set_column(&mut self, col: usize, v: Vec3) -> Result<()> {
        if col > 2 {
            return Err(MathError::ColumnOutOfRange(col));
        }
        self.m[0][col] = v.x;
        self.m[1][col] = v.y;
        self.m[2][col] = v.z;
        Ok(())
    }

    #[inline]
    pub fn row(&self, row: usize) -> Result<Vec3> {
        if row > 2 {
            return Err(MathError::IndexOutOfRange { row, col: 0 });
        }
        Ok(Vec3::new(self.m[row][0], self.m[row][1], self.m[row][2]))
    }

    /// Standard row-by-column matrix product.
    pub fn mult(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        out
    }

    #[inline]
    pub fn mult_vec(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new(
            self.m[0][0], self.m[1][0], self.m[2][0],
            self.m[0][1], self.m[1][1], self.m[2][1],
            self.m[0][2], self.m[1][2], self.m[2][2],
        )
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Self {
        let m = &self.m;
        Self::new(
            m[1][1] * m[2][2] - m[1][2] * m[2][1],
            m[0][2] * m[2][1] - m[0][1] * m[2][2],
            m[0][1] * m[1][2] - m[0][2] * m[1][1],
            m[1][2] * m[2][0] - m[1][0] * m[2][2],
            m[0][0] * m[2][2] - m[0][2] * m[2][0],
            m[0][2] * m[1][0] - m[0][0] * m[1][2],
            m[1][0] * m[2][1] - m[1][1] * m[2][0],
            m[0][1] * m[2][0] - m[0][0] * m[2][1],
            m[0][0] * m[1][1] - m[0][1] * m[1][0],
        )
    }

    /// Inverse via adjugate/determinant. A determinant at or below
    /// `FLT_EPSILON` in magnitude yields the zero matrix; callers test for
    /// that degenerate output rather than catching an error.
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if det.abs() <= consts::FLT_EPSILON {
            return Self::ZERO;
        }
        let adj = self.adjugate();
        let inv_det = 1.0 / det;
        let mut out = adj;
        for row in out.m.iter_mut() {
            for e in row.iter_mut() {
                *e *= inv_det;
            }
        }
        out
    }

    /// Rotation about an arbitrary axis; the axis is normalized first.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_angle_normal_axis(angle, axis.normalize())
    }

    /// Rodrigues' rotation formula; the axis must already be unit length.
    pub fn from_angle_normal_axis(angle: f32, axis: Vec3) -> Self {
        let cos = fastmath::cos(angle);
        let sin = fastmath::sin(angle);
        let one_minus_cos = 1.0 - cos;
        let x2 = axis.x * axis.x;
        let y2 = axis.y * axis.y;
        let z2 = axis.z * axis.z;
        let xy_m = axis.x * axis.y * one_minus_cos;
        let xz_m = axis.x * axis.z * one_minus_cos;
        let yz_m = axis.y * axis.z * one_minus_cos;
        let x_sin = axis.x * sin;
        let y_sin = axis.y * sin;
        let z_sin = axis.z * sin;

        Self::new(
            x2 * one_minus_cos + cos, xy_m - z_sin, xz_m + y_sin,
            xy_m + z_sin, y2 * one_minus_cos + cos, yz_m - x_sin,
            xz_m - y_sin, yz_m + x_sin, z2 * one_minus_cos + cos,
        )
    }

    /// Rotation matrix from a unit quaternion.
    pub fn from_quat(q: Quat) -> Self {
        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;
        let xx = q.x * x2;
        let xy = q.x * y2;
        let xz = q.x * z2;
        let yy = q.y * y2;
        let yz = q.y * z2;
        let zz = q.z * z2;
        let wx = q.w * x2;
        let wy = q.w * y2;
        let wz = q.w * z2;

        Self::new(
            1.0 - (yy + zz), xy - wz, xz + wy,
            xy + wz, 1.0 - (xx + zz), yz - wx,
            xz - wy, yz + wx, 1.0 - (xx + yy),
        )
    }

    pub fn to_mat4(&self) -> Mat4 {
        let mut out = Mat4::IDENTITY;
        for i in 0..3 {
            out.m[i][..3].copy_from_slice(&self.m[i]);
        }
        out
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mult(&rhs)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mult_vec(rhs)
    }
}

/// 4x4 matrix (row-major) - the main transformation matrix
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    #[inline]
    pub const fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self {
            m: [
                [r0.x, r0.y, r0.z, r0.w],
                [r1.x, r1.y, r1.z, r1.w],
                [r2.x, r2.y, r2.z, r2.w],
                [r3.x, r3.y, r3.z, r3.w],
            ],
        }
    }

    /// Element at `(row, col)`; out-of-range indices are an error.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<f32> {
        if row > 3 || col > 3 {
            return Err(MathError::IndexOutOfRange { row, col });
        }
        Ok(self.m[row][col])
    }

    /// Set element at `(row, col)`; out-of-range indices are an error.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        if row > 3 || col > 3 {
            return Err(MathError::IndexOutOfRange { row, col });
        }
        self.m[row][col] = value;
        Ok(())
    }

    pub fn column(&self, col: usize) -> Result<Vec4> {
        if col > 3 {
            return Err(MathError::ColumnOutOfRange(col));
        }
        Ok(Vec4::new(
            self.m[0][col],
            self.m[1][col],
            self.m[2][col],
            self.m[3][col],
        ))
    }

    pub fn set_column(&mut self, col: usize, v: Vec4) -> Result<()> {
        if col > 3 {
            return Err(MathError::ColumnOutOfRange(col));
        }
        self.m[0][col] = v.x;
        self.m[1][col] = v.y;
        self.m[2][col] = v.z;
        self.m[3][col] = v.w;
        Ok(())
    }

    #[inline]
    pub fn row(&self, row: usize) -> Result<Vec4> {
        if row > 3 {
            return Err(MathError::IndexOutOfRange { row, col: 0 });
        }
        Ok(Vec4::new(
            self.m[row][0],
            self.m[row][1],
            self.m[row][2],
            self.m[row][3],
        ))
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.set_translation(translation);
        out
    }

    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = scale.x;
        out.m[1][1] = scale.y;
        out.m[2][2] = scale.z;
        out
    }

    /// Affine product: composes the linear blocks row-by-column, carries the
    /// translation column through, and forces `m33` to 1. This is the
    /// point-transform family; the last row of both operands is treated as
    /// the implicit `(0, 0, 0, 1)`.
    pub fn mult(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
            out.m[i][3] = a[i][0] * b[0][3] + a[i][1] * b[1][3] + a[i][2] * b[2][3] + a[i][3];
        }
        out.m[3][3] = 1.0;
        out
    }

    /// General row-by-column product against a homogeneous vector; uses all
    /// sixteen fields.
    #[inline]
    pub fn mult_vec4(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z + self.m[0][3] * v.w,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z + self.m[1][3] * v.w,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z + self.m[2][3] * v.w,
            self.m[3][0] * v.x + self.m[3][1] * v.y + self.m[3][2] * v.z + self.m[3][3] * v.w,
        )
    }

    /// Transform a point: rotation/scale block applied, translation added,
    /// last row implicit.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2] * p.z + self.m[0][3],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2] * p.z + self.m[1][3],
            self.m[2][0] * p.x + self.m[2][1] * p.y + self.m[2][2] * p.z + self.m[2][3],
        )
    }

    /// Transform a direction: linear block only, translation ignored.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                out.m[i][j] = self.m[j][i];
            }
        }
        out
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }

    #[inline]
    pub fn set_translation(&mut self, t: Vec3) {
        self.m[0][3] = t.x;
        self.m[1][3] = t.y;
        self.m[2][3] = t.z;
    }

    /// Upper-left 3x3 block.
    pub fn to_mat3(&self) -> Mat3 {
        let mut out = Mat3::ZERO;
        for i in 0..3 {
            out.m[i].copy_from_slice(&self.m[i][..3]);
        }
        out
    }

    /// Replace the upper-left 3x3 block with the rotation described by a
    /// unit quaternion; translation and last row are untouched.
    pub fn set_rotation_quat(&mut self, q: Quat) {
        let rot = Mat3::from_quat(q);
        for i in 0..3 {
            self.m[i][..3].copy_from_slice(&rot.m[i]);
        }
    }

    pub fn from_quat(q: Quat) -> Self {
        Mat3::from_quat(q).to_mat4()
    }

    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Mat3::from_axis_angle(axis, angle).to_mat4()
    }

    /// Rotation from Euler angles in radians, composed as Z * Y * X.
    pub fn from_angles(x: f32, y: f32, z: f32) -> Self {
        let sr = fastmath::sin(x);
        let cr = fastmath::cos(x);
        let sp = fastmath::sin(y);
        let cp = fastmath::cos(y);
        let sy = fastmath::sin(z);
        let cy = fastmath::cos(z);

        let mut out = Self::IDENTITY;
        out.m[0][0] = cp * cy;
        out.m[1][0] = cp * sy;
        out.m[2][0] = -sp;
        out.m[0][1] = sr * sp * cy - cr * sy;
        out.m[1][1] = sr * sp * sy + cr * cy;
        out.m[2][1] = sr * cp;
        out.m[0][2] = cr * sp * cy + sr * sy;
        out.m[1][2] = cr * sp * sy - sr * cy;
        out.m[2][2] = cr * cp;
        out
    }

    /// The six 2x2 sub-determinants from the top two rows (`a`) and bottom
    /// two rows (`b`); shared by `determinant`, `adjugate`, and `invert`.
    fn cofactor_pairs(&self) -> ([f32; 6], [f32; 6]) {
        let m = &self.m;
        let a = [
            m[0][0] * m[1][1] - m[0][1] * m[1][0],
            m[0][0] * m[1][2] - m[0][2] * m[1][0],
            m[0][0] * m[1][3] - m[0][3] * m[1][0],
            m[0][1] * m[1][2] - m[0][2] * m[1][1],
            m[0][1] * m[1][3] - m[0][3] * m[1][1],
            m[0][2] * m[1][3] - m[0][3] * m[1][2],
        ];
        let b = [
            m[2][0] * m[3][1] - m[2][1] * m[3][0],
            m[2][0] * m[3][2] - m[2][2] * m[3][0],
            m[2][0] * m[3][3] - m[2][3] * m[3][0],
            m[2][1] * m[3][2] - m[2][2] * m[3][1],
            m[2][1] * m[3][3] - m[2][3] * m[3][1],
            m[2][2] * m[3][3] - m[2][3] * m[3][2],
        ];
        (a, b)
    }

    pub fn determinant(&self) -> f32 {
        let (a, b) = self.cofactor_pairs();
        a[0] * b[5] - a[1] * b[4] + a[2] * b[3] + a[3] * b[2] - a[4] * b[1] + a[5] * b[0]
    }

    /// Unscaled adjugate, built from the same cofactor pairs as `invert`.
    pub fn adjugate(&self) -> Self {
        let (a, b) = self.cofactor_pairs();
        let m = &self.m;
        let mut out = Self::ZERO;

        out.m[0][0] = m[1][1] * b[5] - m[1][2] * b[4] + m[1][3] * b[3];
        out.m[1][0] = -m[1][0] * b[5] + m[1][2] * b[2] - m[1][3] * b[1];
        out.m[2][0] = m[1][0] * b[4] - m[1][1] * b[2] + m[1][3] * b[0];
        out.m[3][0] = -m[1][0] * b[3] + m[1][1] * b[1] - m[1][2] * b[0];
        out.m[0][1] = -m[0][1] * b[5] + m[0][2] * b[4] - m[0][3] * b[3];
        out.m[1][1] = m[0][0] * b[5] - m[0][2] * b[2] + m[0][3] * b[1];
        out.m[2][1] = -m[0][0] * b[4] + m[0][1] * b[2] - m[0][3] * b[0];
        out.m[3][1] = m[0][0] * b[3] - m[0][1] * b[1] + m[0][2] * b[0];
        out.m[0][2] = m[3][1] * a[5] - m[3][2] * a[4] + m[3][3] * a[3];
        out.m[1][2] = -m[3][0] * a[5] + m[3][2] * a[2] - m[3][3] * a[1];
        out.m[2][2] = m[3][0] * a[4] - m[3][1] * a[2] + m[3][3] * a[0];
        out.m[3][2] = -m[3][0] * a[3] + m[3][1] * a[1] - m[3][2] * a[0];
        out.m[0][3] = -m[2][1] * a[5] + m[2][2] * a[4] - m[2][3] * a[3];
        out.m[1][3] = m[2][0] * a[5] - m[2][2] * a[2] + m[2][3] * a[1];
        out.m[2][3] = -m[2][0] * a[4] + m[2][1] * a[2] - m[2][3] * a[0];
        out.m[3][3] = m[2][0] * a[3] - m[2][1] * a[1] + m[2][2] * a[0];

        out
    }

    /// Inverse via the cofactor expansion. A determinant at or below
    /// `FLT_EPSILON` in magnitude yields the zero matrix, a defined
    /// degenerate-case output; callers check for it explicitly.
    pub fn invert(&self) -> Self {
        let (a, b) = self.cofactor_pairs();
        let det =
            a[0] * b[5] - a[1] * b[4] + a[2] * b[3] + a[3] * b[2] - a[4] * b[1] + a[5] * b[0];
        if det.abs() <= consts::FLT_EPSILON {
            return Self::ZERO;
        }

        let adj = self.adjugate();
        let inv_det = 1.0 / det;
        let mut out = adj;
        for row in out.m.iter_mut() {
            for e in row.iter_mut() {
                *e *= inv_det;
            }
        }
        out
    }

    /// In-place inversion; same degenerate contract as [`Mat4::invert`].
    pub fn invert_local(&mut self) -> &mut Self {
        *self = self.invert();
        self
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mult(&rhs)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        self.mult_vec4(rhs)
    }
}
