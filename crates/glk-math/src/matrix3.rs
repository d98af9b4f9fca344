//! 3x3 matrix type for linear transforms.
//!
//! [`Matrix3`] holds rotations, scales and normal matrices.
//!
//! # Convention
//!
//! Storage is **column-major** (`m[col * 3 + row]`) and vectors are column
//! vectors:
//!
//! ```text
//! | m[0] m[3] m[6] |   | x |
//! | m[1] m[4] m[7] | * | y |
//! | m[2] m[5] m[8] |   | z |
//! ```
//!
//! [`Matrix3::new`] takes its arguments in storage order;
//! [`Matrix3::new_and_transpose`] takes them row by row, the way the matrix
//! reads on paper.
//!
//! # Usage
//!
//! ```rust
//! use glk_math::{Matrix3, Vector3};
//!
//! let m = Matrix3::from_z_rotation(std::f32::consts::FRAC_PI_2);
//! let v = m.mul_vector3(Vector3::X);
//! assert!((v.y - 1.0).abs() < 1e-6);
//! ```

use std::ops::{Add, Index, Mul, Sub};

use glk_core::{Error, Result};
use tracing::trace;

use crate::{Matrix2, Quaternion, Vector3, is_singular};

/// A 3x3 matrix stored column-major.
///
/// Three columns of [`Vector3`]; exactly nine packed floats.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix3 {
    /// Elements, column by column.
    pub m: [f32; 9],
}

impl Matrix3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [0.0; 9] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from elements in storage order.
    ///
    /// `mCR` is column `C`, row `R`.
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: f32, m01: f32, m02: f32,
        m10: f32, m11: f32, m12: f32,
        m20: f32, m21: f32, m22: f32,
    ) -> Self {
        Self { m: [m00, m01, m02, m10, m11, m12, m20, m21, m22] }
    }

    /// Creates a matrix from elements given row by row.
    ///
    /// ```rust
    /// use glk_math::{Matrix3, Vector3};
    ///
    /// let m = Matrix3::new_and_transpose(
    ///     1.0, 2.0, 3.0,
    ///     4.0, 5.0, 6.0,
    ///     7.0, 8.0, 9.0,
    /// );
    /// assert_eq!(m.row(0), Vector3::new(1.0, 2.0, 3.0));
    /// ```
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new_and_transpose(
        m00: f32, m01: f32, m02: f32,
        m10: f32, m11: f32, m12: f32,
        m20: f32, m21: f32, m22: f32,
    ) -> Self {
        Self::new(m00, m10, m20, m01, m11, m21, m02, m12, m22)
    }

    /// Creates from a column-major array.
    #[inline]
    pub const fn from_array(m: [f32; 9]) -> Self {
        Self { m }
    }

    /// Creates from a row-major array.
    #[inline]
    pub const fn from_array_and_transpose(m: [f32; 9]) -> Self {
        Self::new_and_transpose(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8])
    }

    /// Creates a matrix from three rows.
    #[inline]
    pub const fn from_rows(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Self::new_and_transpose(r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r2.x, r2.y, r2.z)
    }

    /// Creates a matrix from three columns.
    #[inline]
    pub const fn from_cols(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self::new(c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z)
    }

    /// Rotation matrix of `q`.
    ///
    /// `q` is normalized first, so any non-zero quaternion gives a pure
    /// rotation.
    #[rustfmt::skip]
    pub fn from_quaternion(q: Quaternion) -> Self {
        let q = q.normalize();
        let (x2, y2, z2) = (q.x + q.x, q.y + q.y, q.z + q.z);
        let (xx, yy, zz) = (q.x * x2, q.y * y2, q.z * z2);
        let (xy, xz, yz) = (q.x * y2, q.x * z2, q.y * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);

        Self::new(
            1.0 - (yy + zz), xy + wz, xz - wy,
            xy - wz, 1.0 - (xx + zz), yz + wx,
            xz + wy, yz - wx, 1.0 - (xx + yy),
        )
    }

    /// Diagonal scale matrix.
    #[inline]
    pub const fn from_scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, sz)
    }

    /// Rotation of `radians` about the axis `(x, y, z)`.
    ///
    /// The axis is normalized internally; a zero axis yields NaN.
    pub fn from_rotation(radians: f32, x: f32, y: f32, z: f32) -> Self {
        let axis = Vector3::new(x, y, z).normalize();
        let (s, c) = radians.sin_cos();
        let p = 1.0 - c;

        Self::new(
            c + p * axis.x * axis.x,
            p * axis.x * axis.y + axis.z * s,
            p * axis.x * axis.z - axis.y * s,
            p * axis.x * axis.y - axis.z * s,
            c + p * axis.y * axis.y,
            p * axis.y * axis.z + axis.x * s,
            p * axis.x * axis.z + axis.y * s,
            p * axis.y * axis.z - axis.x * s,
            c + p * axis.z * axis.z,
        )
    }

    /// Rotation about +X.
    pub fn from_x_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
    }

    /// Rotation about +Y.
    pub fn from_y_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
    }

    /// Rotation about +Z.
    pub fn from_z_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
    }

    /// Returns row `i` as a [`Vector3`].
    #[inline]
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self.m[i], self.m[3 + i], self.m[6 + i])
    }

    /// Returns column `i` as a [`Vector3`].
    #[inline]
    pub fn col(&self, i: usize) -> Vector3 {
        Vector3::new(self.m[i * 3], self.m[i * 3 + 1], self.m[i * 3 + 2])
    }

    /// Copy with row `i` replaced.
    #[inline]
    pub fn with_row(mut self, i: usize, row: Vector3) -> Self {
        self.m[i] = row.x;
        self.m[3 + i] = row.y;
        self.m[6 + i] = row.z;
        self
    }

    /// Copy with column `i` replaced.
    #[inline]
    pub fn with_col(mut self, i: usize, col: Vector3) -> Self {
        self.m[i * 3..i * 3 + 3].copy_from_slice(&col.to_array());
        self
    }

    /// Upper-left 2x2.
    #[inline]
    pub const fn matrix2(&self) -> Matrix2 {
        Matrix2::new(self.m[0], self.m[1], self.m[3], self.m[4])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub const fn transpose(&self) -> Self {
        let m = &self.m;
        Self::new(m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8])
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0] * (m[4] * m[8] - m[7] * m[5]) - m[3] * (m[1] * m[8] - m[7] * m[2])
            + m[6] * (m[1] * m[5] - m[4] * m[2])
    }

    /// Inverse and an invertibility flag.
    ///
    /// Uses the adjugate scaled by `1 / det`. When `|det|` is negligible next
    /// to the product of the column lengths (see [`crate::SINGULAR_EPSILON`])
    /// the flag is `false` and the returned matrix is [`Matrix3::IDENTITY`].
    ///
    /// ```rust
    /// use glk_math::Matrix3;
    ///
    /// let (inv, invertible) = Matrix3::from_scale(2.0, 4.0, 8.0).invert();
    /// assert!(invertible);
    /// assert_eq!(inv, Matrix3::from_scale(0.5, 0.25, 0.125));
    /// ```
    pub fn invert(&self) -> (Self, bool) {
        let det = self.determinant();
        let volume = self.col(0).length() * self.col(1).length() * self.col(2).length();
        if is_singular(det, volume) {
            trace!(det, volume, "matrix3 is singular");
            return (Self::IDENTITY, false);
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        // Transposed cofactors, column-major
        let inv = Self::new(
            (m[4] * m[8] - m[7] * m[5]) * inv_det,
            (m[7] * m[2] - m[1] * m[8]) * inv_det,
            (m[1] * m[5] - m[4] * m[2]) * inv_det,
            (m[6] * m[5] - m[3] * m[8]) * inv_det,
            (m[0] * m[8] - m[6] * m[2]) * inv_det,
            (m[3] * m[2] - m[0] * m[5]) * inv_det,
            (m[3] * m[7] - m[6] * m[4]) * inv_det,
            (m[6] * m[1] - m[0] * m[7]) * inv_det,
            (m[0] * m[4] - m[3] * m[1]) * inv_det,
        );
        (inv, true)
    }

    /// Inverse-transpose (the normal matrix) and an invertibility flag.
    pub fn invert_and_transpose(&self) -> (Self, bool) {
        let (inv, invertible) = self.invert();
        (inv.transpose(), invertible)
    }

    /// Inverse, or `None` when singular.
    #[inline]
    pub fn try_invert(&self) -> Option<Self> {
        match self.invert() {
            (inv, true) => Some(inv),
            _ => None,
        }
    }

    /// Matrix product `self * other`.
    pub fn mul_matrix(&self, other: &Self) -> Self {
        Self::from_cols(
            self.mul_vector3(other.col(0)),
            self.mul_vector3(other.col(1)),
            self.mul_vector3(other.col(2)),
        )
    }

    /// `M * v`.
    #[inline]
    pub fn mul_vector3(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0] * v.x + m[3] * v.y + m[6] * v.z,
            m[1] * v.x + m[4] * v.y + m[7] * v.z,
            m[2] * v.x + m[5] * v.y + m[8] * v.z,
        )
    }

    /// Applies [`Matrix3::mul_vector3`] to every element in place.
    pub fn mul_vector3_array(&self, vectors: &mut [Vector3]) {
        for v in vectors {
            *v = self.mul_vector3(*v);
        }
    }

    /// `self * from_scale(sx, sy, sz)`.
    #[inline]
    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_cols(self.col(0) * sx, self.col(1) * sy, self.col(2) * sz)
    }

    /// [`Matrix3::scale`] with the factors in a vector.
    #[inline]
    pub fn scale_with_vector3(&self, s: Vector3) -> Self {
        self.scale(s.x, s.y, s.z)
    }

    /// `self * from_rotation(radians, x, y, z)`.
    pub fn rotate(&self, radians: f32, x: f32, y: f32, z: f32) -> Self {
        self.mul_matrix(&Self::from_rotation(radians, x, y, z))
    }

    /// [`Matrix3::rotate`] about `axis`.
    pub fn rotate_with_vector3(&self, radians: f32, axis: Vector3) -> Self {
        self.rotate(radians, axis.x, axis.y, axis.z)
    }

    /// `self * from_x_rotation(radians)`.
    pub fn rotate_x(&self, radians: f32) -> Self {
        self.mul_matrix(&Self::from_x_rotation(radians))
    }

    /// `self * from_y_rotation(radians)`.
    pub fn rotate_y(&self, radians: f32) -> Self {
        self.mul_matrix(&Self::from_y_rotation(radians))
    }

    /// `self * from_z_rotation(radians)`.
    pub fn rotate_z(&self, radians: f32) -> Self {
        self.mul_matrix(&Self::from_z_rotation(radians))
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|x| x.is_finite())
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix3 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.m[i]
    }
}

// Matrix3 * Vector3
impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.mul_vector3(rhs)
    }
}

// Matrix3 * Matrix3
impl Mul for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_matrix(&rhs)
    }
}

impl Add for Matrix3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_array(std::array::from_fn(|i| self.m[i] + rhs.m[i]))
    }
}

impl Sub for Matrix3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_array(std::array::from_fn(|i| self.m[i] - rhs.m[i]))
    }
}

impl TryFrom<&[f32]> for Matrix3 {
    type Error = Error;

    fn try_from(values: &[f32]) -> Result<Self> {
        let m: [f32; 9] = values.try_into().map_err(|_| Error::LengthMismatch {
            expected: 9,
            actual: values.len(),
        })?;
        Ok(Self::from_array(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_matrix_eq(a: &Matrix3, b: &Matrix3) {
        for (x, y) in a.m.iter().zip(b.m) {
            assert_relative_eq!(*x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_matrix3_identity() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Matrix3::IDENTITY * v, v);
        let m = Matrix3::from_array(std::array::from_fn(|i| i as f32));
        assert_eq!(m * Matrix3::IDENTITY, m);
    }

    #[test]
    fn test_matrix3_storage_order() {
        let m = Matrix3::new(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        assert_eq!(m.col(1), Vector3::new(3.0, 4.0, 5.0));
        assert_eq!(m.row(1), Vector3::new(1.0, 4.0, 7.0));
        assert_eq!(
            Matrix3::from_array_and_transpose([0.0, 3.0, 6.0, 1.0, 4.0, 7.0, 2.0, 5.0, 8.0]),
            m
        );
    }

    #[test]
    fn test_matrix3_rows_cols_roundtrip() {
        let m = Matrix3::new_and_transpose(1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0);
        assert_eq!(Matrix3::from_rows(m.row(0), m.row(1), m.row(2)), m);
        assert_eq!(Matrix3::from_cols(m.col(0), m.col(1), m.col(2)), m);
        for i in 0..3 {
            assert_eq!(m.transpose().col(i), m.row(i));
        }
    }

    #[test]
    fn test_matrix3_with_row_col() {
        let m = Matrix3::IDENTITY.with_row(0, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.row(0), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.col(1), Vector3::new(2.0, 1.0, 0.0));
        let m = m.with_col(2, Vector3::splat(9.0));
        assert_eq!(m.col(2), Vector3::splat(9.0));
    }

    #[test]
    fn test_matrix3_determinant() {
        let m = Matrix3::new_and_transpose(1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0);
        assert!((m.determinant() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_matrix3_inverse() {
        let m = Matrix3::new_and_transpose(1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0);
        let (inv, ok) = m.invert();
        assert!(ok);
        assert_matrix_eq(&(m * inv), &Matrix3::IDENTITY);
        assert_matrix_eq(&(inv * m), &Matrix3::IDENTITY);
    }

    #[test]
    fn test_matrix3_singular() {
        let m = Matrix3::new_and_transpose(
            1.0, 2.0, 3.0,
            2.0, 4.0, 6.0, // 2 * row 0
            1.0, 1.0, 1.0,
        );
        assert_eq!(m.invert(), (Matrix3::IDENTITY, false));
        assert!(m.try_invert().is_none());
        assert!(!m.invert_and_transpose().1);
    }

    #[test]
    fn test_matrix3_singularity_ignores_scale() {
        let (inv, invertible) = Matrix3::from_scale(1e-4, 1e-4, 1e-4).invert();
        assert!(invertible);
        assert_relative_eq!(inv.m[0], 1e4, max_relative = 1e-5);
        assert_relative_eq!(inv.m[8], 1e4, max_relative = 1e-5);

        // Dependent columns stay singular however rounding lands.
        let m = Matrix3::from_array([0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]);
        assert!(!m.invert().1);
        let big = Matrix3::from_array(m.m.map(|x| x * 1e4));
        assert!(!big.invert().1);
    }

    #[test]
    fn test_matrix3_normal_matrix() {
        let m = Matrix3::from_scale(2.0, 1.0, 1.0).rotate_z(0.3);
        let (n, ok) = m.invert_and_transpose();
        assert!(ok);
        assert_matrix_eq(&n, &m.try_invert().unwrap().transpose());
    }

    #[test]
    fn test_matrix3_axis_rotations() {
        let v = Matrix3::from_x_rotation(FRAC_PI_2) * Vector3::Y;
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
        let v = Matrix3::from_y_rotation(FRAC_PI_2) * Vector3::Z;
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-6);
        let v = Matrix3::from_z_rotation(FRAC_PI_2) * Vector3::X;
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_matrix3_rotation_normalizes_axis() {
        assert_matrix_eq(
            &Matrix3::from_rotation(0.7, 0.0, 0.0, 5.0),
            &Matrix3::from_z_rotation(0.7),
        );
        assert_matrix_eq(
            &Matrix3::from_rotation(-1.1, 3.0, 0.0, 0.0),
            &Matrix3::from_x_rotation(-1.1),
        );
    }

    #[test]
    fn test_matrix3_from_quaternion_matches_z_rotation() {
        let q = Quaternion::from_angle_axis(PI, 0.0, 0.0, 1.0);
        assert_matrix_eq(&Matrix3::from_quaternion(q), &Matrix3::from_z_rotation(PI));
    }

    #[test]
    fn test_matrix3_from_quaternion_ignores_scale() {
        let q = Quaternion::from_angle_axis(0.5, 0.0, 1.0, 0.0);
        let scaled = Quaternion::from_vector4(q.to_vector4() * 3.0);
        assert_matrix_eq(&Matrix3::from_quaternion(scaled), &Matrix3::from_y_rotation(0.5));
    }

    #[test]
    fn test_matrix3_transform_stack() {
        let m = Matrix3::IDENTITY.scale(2.0, 3.0, 4.0);
        assert_eq!(m, Matrix3::from_scale(2.0, 3.0, 4.0));

        // Right-multiplication: the rotation happens first, then the scale.
        let m = Matrix3::from_scale(2.0, 1.0, 1.0).rotate_z(FRAC_PI_2);
        let v = m * Vector3::Y;
        assert_relative_eq!(v.x, -2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_matrix3_matrix2() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.matrix2(), Matrix2::new(1.0, 2.0, 4.0, 5.0));
    }
}
