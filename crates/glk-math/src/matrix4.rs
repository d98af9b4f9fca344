//! 4x4 matrix type for affine and projective transforms.
//!
//! # Convention
//!
//! Storage is **column-major** (`m[col * 4 + row]`), 16-byte aligned.
//! Columns 0-2 hold the linear part and elements 12-14 the translation:
//!
//! ```text
//! | m[0] m[4] m[8]  m[12] |
//! | m[1] m[5] m[9]  m[13] |
//! | m[2] m[6] m[10] m[14] |
//! | m[3] m[7] m[11] m[15] |
//! ```
//!
//! Composition helpers (`scale`, `translate`, `rotate*`) right-multiply, so
//! each new step happens in the matrix's existing local frame.
//!
//! # Usage
//!
//! ```rust
//! use glk_math::{Matrix4, Vector3};
//!
//! let model = Matrix4::from_translation(0.0, 0.0, -5.0)
//!     .rotate_y(0.5)
//!     .scale(2.0, 2.0, 2.0);
//! let p = model.mul_vector3_with_translation(Vector3::ZERO);
//! assert_eq!(p, Vector3::new(0.0, 0.0, -5.0));
//! ```

use std::ops::{Add, Index, Mul, Sub};

use glk_core::{Error, Result};
use tracing::trace;

use crate::simd::{Active, SimdBackend};
use crate::{Matrix2, Matrix3, Quaternion, Vector3, Vector4, is_singular};

/// A 4x4 matrix stored column-major, 16-byte aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C, align(16))]
pub struct Matrix4 {
    /// Elements, column by column.
    pub m: [f32; 16],
}

impl Matrix4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [0.0; 16] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from elements in storage order.
    ///
    /// `mCR` is column `C`, row `R`.
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self {
            m: [
                m00, m01, m02, m03,
                m10, m11, m12, m13,
                m20, m21, m22, m23,
                m30, m31, m32, m33,
            ],
        }
    }

    /// Creates a matrix from elements given row by row.
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new_and_transpose(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self::new(
            m00, m10, m20, m30,
            m01, m11, m21, m31,
            m02, m12, m22, m32,
            m03, m13, m23, m33,
        )
    }

    /// Creates from a column-major array.
    #[inline]
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Creates from a row-major array.
    #[rustfmt::skip]
    #[inline]
    pub const fn from_array_and_transpose(m: [f32; 16]) -> Self {
        Self::new_and_transpose(
            m[0], m[1], m[2], m[3],
            m[4], m[5], m[6], m[7],
            m[8], m[9], m[10], m[11],
            m[12], m[13], m[14], m[15],
        )
    }

    /// Creates a matrix from four rows.
    #[rustfmt::skip]
    #[inline]
    pub const fn from_rows(r0: Vector4, r1: Vector4, r2: Vector4, r3: Vector4) -> Self {
        Self::new(
            r0.x, r1.x, r2.x, r3.x,
            r0.y, r1.y, r2.y, r3.y,
            r0.z, r1.z, r2.z, r3.z,
            r0.w, r1.w, r2.w, r3.w,
        )
    }

    /// Creates a matrix from four columns.
    #[rustfmt::skip]
    #[inline]
    pub const fn from_cols(c0: Vector4, c1: Vector4, c2: Vector4, c3: Vector4) -> Self {
        Self::new(
            c0.x, c0.y, c0.z, c0.w,
            c1.x, c1.y, c1.z, c1.w,
            c2.x, c2.y, c2.z, c2.w,
            c3.x, c3.y, c3.z, c3.w,
        )
    }

    /// Embeds a 3x3 linear part with no translation.
    #[rustfmt::skip]
    #[inline]
    pub const fn from_matrix3(m: &Matrix3) -> Self {
        let m = &m.m;
        Self::new(
            m[0], m[1], m[2], 0.0,
            m[3], m[4], m[5], 0.0,
            m[6], m[7], m[8], 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation matrix of `q` (normalized first).
    pub fn from_quaternion(q: Quaternion) -> Self {
        Self::from_matrix3(&Matrix3::from_quaternion(q))
    }

    /// Diagonal scale matrix.
    #[rustfmt::skip]
    #[inline]
    pub const fn from_scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::new(
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Pure translation.
    #[rustfmt::skip]
    #[inline]
    pub const fn from_translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            tx, ty, tz, 1.0,
        )
    }

    /// Rotation of `radians` about the axis `(x, y, z)` (normalized internally).
    pub fn from_rotation(radians: f32, x: f32, y: f32, z: f32) -> Self {
        Self::from_matrix3(&Matrix3::from_rotation(radians, x, y, z))
    }

    /// Rotation about +X.
    pub fn from_x_rotation(radians: f32) -> Self {
        Self::from_matrix3(&Matrix3::from_x_rotation(radians))
    }

    /// Rotation about +Y.
    pub fn from_y_rotation(radians: f32) -> Self {
        Self::from_matrix3(&Matrix3::from_y_rotation(radians))
    }

    /// Rotation about +Z.
    pub fn from_z_rotation(radians: f32) -> Self {
        Self::from_matrix3(&Matrix3::from_z_rotation(radians))
    }

    /// Returns row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vector4 {
        Vector4::new(self.m[i], self.m[4 + i], self.m[8 + i], self.m[12 + i])
    }

    /// Returns column `i`.
    #[inline]
    pub fn col(&self, i: usize) -> Vector4 {
        let c = i * 4;
        Vector4::new(self.m[c], self.m[c + 1], self.m[c + 2], self.m[c + 3])
    }

    /// Copy with row `i` replaced.
    #[inline]
    pub fn with_row(mut self, i: usize, row: Vector4) -> Self {
        for (c, value) in row.to_array().into_iter().enumerate() {
            self.m[c * 4 + i] = value;
        }
        self
    }

    /// Copy with column `i` replaced.
    #[inline]
    pub fn with_col(mut self, i: usize, col: Vector4) -> Self {
        self.m[i * 4..i * 4 + 4].copy_from_slice(col.as_array());
        self
    }

    /// Upper-left 3x3 (the linear part).
    #[inline]
    pub const fn matrix3(&self) -> Matrix3 {
        let m = &self.m;
        Matrix3::new(m[0], m[1], m[2], m[4], m[5], m[6], m[8], m[9], m[10])
    }

    /// Upper-left 2x2.
    #[inline]
    pub const fn matrix2(&self) -> Matrix2 {
        Matrix2::new(self.m[0], self.m[1], self.m[4], self.m[5])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Active::mat4_transpose(self)
    }

    /// Determinant.
    pub fn determinant(&self) -> f32 {
        let (s, c) = self.subfactors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    // 2x2 minors of the first two and last two columns.
    #[inline]
    fn subfactors(&self) -> ([f32; 6], [f32; 6]) {
        let m = &self.m;
        let s = [
            m[0] * m[5] - m[4] * m[1],
            m[0] * m[6] - m[4] * m[2],
            m[0] * m[7] - m[4] * m[3],
            m[1] * m[6] - m[5] * m[2],
            m[1] * m[7] - m[5] * m[3],
            m[2] * m[7] - m[6] * m[3],
        ];
        let c = [
            m[8] * m[13] - m[12] * m[9],
            m[8] * m[14] - m[12] * m[10],
            m[8] * m[15] - m[12] * m[11],
            m[9] * m[14] - m[13] * m[10],
            m[9] * m[15] - m[13] * m[11],
            m[10] * m[15] - m[14] * m[11],
        ];
        (s, c)
    }

    /// Inverse and an invertibility flag.
    ///
    /// Closed-form adjugate scaled by `1 / det`. When `|det|` is negligible
    /// next to the product of the column lengths (see
    /// [`crate::SINGULAR_EPSILON`]) the flag is `false` and the returned
    /// matrix is [`Matrix4::IDENTITY`]. Uniform scale does not matter:
    /// `from_scale(1e-4, 1e-4, 1e-4)` inverts.
    ///
    /// ```rust
    /// use glk_math::Matrix4;
    ///
    /// let (inv, invertible) = Matrix4::IDENTITY.invert();
    /// assert!(invertible);
    /// assert_eq!(inv, Matrix4::IDENTITY);
    ///
    /// let (_, invertible) = Matrix4::from_scale(1.0, 0.0, 1.0).invert();
    /// assert!(!invertible);
    /// ```
    pub fn invert(&self) -> (Self, bool) {
        let (s, c) = self.subfactors();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        let volume = (0..4).map(|i| self.col(i).length()).product::<f32>();
        if is_singular(det, volume) {
            trace!(det, volume, "matrix4 is singular");
            return (Self::IDENTITY, false);
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        let inv = Self::new(
            (m[5] * c[5] - m[6] * c[4] + m[7] * c[3]) * inv_det,
            (-m[1] * c[5] + m[2] * c[4] - m[3] * c[3]) * inv_det,
            (m[13] * s[5] - m[14] * s[4] + m[15] * s[3]) * inv_det,
            (-m[9] * s[5] + m[10] * s[4] - m[11] * s[3]) * inv_det,
            (-m[4] * c[5] + m[6] * c[2] - m[7] * c[1]) * inv_det,
            (m[0] * c[5] - m[2] * c[2] + m[3] * c[1]) * inv_det,
            (-m[12] * s[5] + m[14] * s[2] - m[15] * s[1]) * inv_det,
            (m[8] * s[5] - m[10] * s[2] + m[11] * s[1]) * inv_det,
            (m[4] * c[4] - m[5] * c[2] + m[7] * c[0]) * inv_det,
            (-m[0] * c[4] + m[1] * c[2] - m[3] * c[0]) * inv_det,
            (m[12] * s[4] - m[13] * s[2] + m[15] * s[0]) * inv_det,
            (-m[8] * s[4] + m[9] * s[2] - m[11] * s[0]) * inv_det,
            (-m[4] * c[3] + m[5] * c[1] - m[6] * c[0]) * inv_det,
            (m[0] * c[3] - m[1] * c[1] + m[2] * c[0]) * inv_det,
            (-m[12] * s[3] + m[13] * s[1] - m[14] * s[0]) * inv_det,
            (m[8] * s[3] - m[9] * s[1] + m[10] * s[0]) * inv_det,
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

    /// `self * from_scale(sx, sy, sz)`.
    #[inline]
    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_cols(self.col(0) * sx, self.col(1) * sy, self.col(2) * sz, self.col(3))
    }

    /// [`Matrix4::scale`] with the factors in a vector.
    #[inline]
    pub fn scale_with_vector3(&self, s: Vector3) -> Self {
        self.scale(s.x, s.y, s.z)
    }

    /// [`Matrix4::scale`] with the factors in the xyz lanes; w is ignored.
    #[inline]
    pub fn scale_with_vector4(&self, s: Vector4) -> Self {
        self.scale(s.x, s.y, s.z)
    }

    /// `self * from_translation(tx, ty, tz)`.
    #[inline]
    pub fn translate(&self, tx: f32, ty: f32, tz: f32) -> Self {
        let t = self.col(0) * tx + self.col(1) * ty + self.col(2) * tz + self.col(3);
        self.with_col(3, t)
    }

    /// [`Matrix4::translate`] with the offset in a vector.
    #[inline]
    pub fn translate_with_vector3(&self, t: Vector3) -> Self {
        self.translate(t.x, t.y, t.z)
    }

    /// [`Matrix4::translate`] with the offset in the xyz lanes; w is ignored.
    #[inline]
    pub fn translate_with_vector4(&self, t: Vector4) -> Self {
        self.translate(t.x, t.y, t.z)
    }

    /// `self * from_rotation(radians, x, y, z)`.
    pub fn rotate(&self, radians: f32, x: f32, y: f32, z: f32) -> Self {
        *self * Self::from_rotation(radians, x, y, z)
    }

    /// [`Matrix4::rotate`] about `axis`.
    pub fn rotate_with_vector3(&self, radians: f32, axis: Vector3) -> Self {
        self.rotate(radians, axis.x, axis.y, axis.z)
    }

    /// [`Matrix4::rotate`] about the xyz lanes of `axis`.
    pub fn rotate_with_vector4(&self, radians: f32, axis: Vector4) -> Self {
        self.rotate(radians, axis.x, axis.y, axis.z)
    }

    /// `self * from_x_rotation(radians)`.
    pub fn rotate_x(&self, radians: f32) -> Self {
        *self * Self::from_x_rotation(radians)
    }

    /// `self * from_y_rotation(radians)`.
    pub fn rotate_y(&self, radians: f32) -> Self {
        *self * Self::from_y_rotation(radians)
    }

    /// `self * from_z_rotation(radians)`.
    pub fn rotate_z(&self, radians: f32) -> Self {
        *self * Self::from_z_rotation(radians)
    }

    /// Homogeneous product `M * v`.
    #[inline]
    pub fn mul_vector4(&self, v: Vector4) -> Vector4 {
        Active::mat4_mul_vector4(self, v)
    }

    /// Transforms a direction (w = 0): translation is ignored.
    #[inline]
    pub fn mul_vector3(&self, v: Vector3) -> Vector3 {
        self.mul_vector4(Vector4::from_vector3(v, 0.0)).xyz()
    }

    /// Transforms a point (w = 1).
    #[inline]
    pub fn mul_vector3_with_translation(&self, v: Vector3) -> Vector3 {
        self.mul_vector4(Vector4::from_vector3(v, 1.0)).xyz()
    }

    /// Transforms a point (w = 1) and divides by the resulting w.
    ///
    /// A resulting w of zero yields non-finite components.
    #[inline]
    pub fn mul_and_project_vector3(&self, v: Vector3) -> Vector3 {
        let p = self.mul_vector4(Vector4::from_vector3(v, 1.0));
        p.xyz() * (1.0 / p.w)
    }

    /// [`Matrix4::mul_vector3`] over a buffer, in place.
    pub fn mul_vector3_array(&self, vectors: &mut [Vector3]) {
        for v in vectors {
            *v = self.mul_vector3(*v);
        }
    }

    /// [`Matrix4::mul_vector3_with_translation`] over a buffer, in place.
    pub fn mul_vector3_array_with_translation(&self, vectors: &mut [Vector3]) {
        for v in vectors {
            *v = self.mul_vector3_with_translation(*v);
        }
    }

    /// [`Matrix4::mul_and_project_vector3`] over a buffer, in place.
    pub fn mul_and_project_vector3_array(&self, vectors: &mut [Vector3]) {
        for v in vectors {
            *v = self.mul_and_project_vector3(*v);
        }
    }

    /// [`Matrix4::mul_vector4`] over a buffer, in place.
    pub fn mul_vector4_array(&self, vectors: &mut [Vector4]) {
        for v in vectors {
            *v = self.mul_vector4(*v);
        }
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|x| x.is_finite())
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.m[i]
    }
}

// Matrix4 * Matrix4
impl Mul for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Active::mat4_mul(&self, &rhs)
    }
}

impl Mul<&Matrix4> for &Matrix4 {
    type Output = Matrix4;

    #[inline]
    fn mul(self, rhs: &Matrix4) -> Matrix4 {
        Active::mat4_mul(self, rhs)
    }
}

// Matrix4 * Vector4
impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        self.mul_vector4(rhs)
    }
}

impl Add for Matrix4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Active::mat4_add(&self, &rhs)
    }
}

impl Sub for Matrix4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Active::mat4_sub(&self, &rhs)
    }
}

impl TryFrom<&[f32]> for Matrix4 {
    type Error = Error;

    fn try_from(values: &[f32]) -> Result<Self> {
        let m: [f32; 16] = values.try_into().map_err(|_| Error::LengthMismatch {
            expected: 16,
            actual: values.len(),
        })?;
        Ok(Self::from_array(m))
    }
}
