//! 2x2 matrix, mostly produced by sub-matrix extraction from
//! [`Matrix3`](crate::Matrix3) and [`Matrix4`](crate::Matrix4).

use std::ops::{Add, Index, Mul, Sub};

use glk_core::{Error, Result};
use tracing::trace;

use crate::{Vector2, is_singular};

/// A 2x2 matrix stored column-major: `m[col * 2 + row]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix2 {
    /// Elements, column by column.
    pub m: [f32; 4],
}

impl Matrix2 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Zero matrix.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a matrix from elements in storage order (column 0 first).
    #[inline]
    pub const fn new(m00: f32, m01: f32, m10: f32, m11: f32) -> Self {
        Self { m: [m00, m01, m10, m11] }
    }

    /// Creates a matrix from elements given row by row.
    #[inline]
    pub const fn new_and_transpose(m00: f32, m01: f32, m10: f32, m11: f32) -> Self {
        Self::new(m00, m10, m01, m11)
    }

    /// Creates from a column-major array.
    #[inline]
    pub const fn from_array(m: [f32; 4]) -> Self {
        Self { m }
    }

    /// Creates from a row-major array.
    #[inline]
    pub const fn from_array_and_transpose(m: [f32; 4]) -> Self {
        Self::new_and_transpose(m[0], m[1], m[2], m[3])
    }

    /// Creates from two rows.
    #[inline]
    pub const fn from_rows(r0: Vector2, r1: Vector2) -> Self {
        Self::new(r0.x, r1.x, r0.y, r1.y)
    }

    /// Creates from two columns.
    #[inline]
    pub const fn from_cols(c0: Vector2, c1: Vector2) -> Self {
        Self::new(c0.x, c0.y, c1.x, c1.y)
    }

    /// Returns row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vector2 {
        Vector2::new(self.m[i], self.m[2 + i])
    }

    /// Returns column `i`.
    #[inline]
    pub fn col(&self, i: usize) -> Vector2 {
        Vector2::new(self.m[i * 2], self.m[i * 2 + 1])
    }

    /// Copy with row `i` replaced.
    #[inline]
    pub fn with_row(mut self, i: usize, row: Vector2) -> Self {
        self.m[i] = row.x;
        self.m[2 + i] = row.y;
        self
    }

    /// Copy with column `i` replaced.
    #[inline]
    pub fn with_col(mut self, i: usize, col: Vector2) -> Self {
        self.m[i * 2] = col.x;
        self.m[i * 2 + 1] = col.y;
        self
    }

    /// Returns the transpose.
    #[inline]
    pub const fn transpose(&self) -> Self {
        Self::new(self.m[0], self.m[2], self.m[1], self.m[3])
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m[0] * self.m[3] - self.m[2] * self.m[1]
    }

    /// Inverse and an invertibility flag.
    ///
    /// A singular matrix (see [`crate::SINGULAR_EPSILON`]) yields
    /// `(Matrix2::IDENTITY, false)`.
    pub fn invert(&self) -> (Self, bool) {
        let det = self.determinant();
        if is_singular(det, self.col(0).length() * self.col(1).length()) {
            trace!(det, "matrix2 is singular");
            return (Self::IDENTITY, false);
        }
        let inv_det = 1.0 / det;
        let m = &self.m;
        (
            Self::new(m[3] * inv_det, -m[1] * inv_det, -m[2] * inv_det, m[0] * inv_det),
            true,
        )
    }

    /// `M * v`.
    #[inline]
    pub fn mul_vector2(&self, v: Vector2) -> Vector2 {
        Vector2::new(
            self.m[0] * v.x + self.m[2] * v.y,
            self.m[1] * v.x + self.m[3] * v.y,
        )
    }

    /// Applies [`Matrix2::mul_vector2`] to every element in place.
    pub fn mul_vector2_array(&self, vectors: &mut [Vector2]) {
        for v in vectors {
            *v = self.mul_vector2(*v);
        }
    }
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix2 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.m[i]
    }
}

impl Mul for Matrix2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(self.mul_vector2(rhs.col(0)), self.mul_vector2(rhs.col(1)))
    }
}

impl Mul<Vector2> for Matrix2 {
    type Output = Vector2;

    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        self.mul_vector2(rhs)
    }
}

impl Add for Matrix2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_array(std::array::from_fn(|i| self.m[i] + rhs.m[i]))
    }
}

impl Sub for Matrix2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_array(std::array::from_fn(|i| self.m[i] - rhs.m[i]))
    }
}

impl TryFrom<&[f32]> for Matrix2 {
    type Error = Error;

    fn try_from(values: &[f32]) -> Result<Self> {
        let m: [f32; 4] = values.try_into().map_err(|_| Error::LengthMismatch {
            expected: 4,
            actual: values.len(),
        })?;
        Ok(Self::from_array(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix2_storage_order() {
        let m = Matrix2::new_and_transpose(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.row(0), Vector2::new(1.0, 2.0));
        assert_eq!(m.col(0), Vector2::new(1.0, 3.0));
        assert_eq!(m, Matrix2::from_array_and_transpose([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(m.transpose(), Matrix2::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_matrix2_invert() {
        let m = Matrix2::new_and_transpose(4.0, 7.0, 2.0, 6.0);
        let (inv, ok) = m.invert();
        assert!(ok);
        let p = m * inv;
        for (a, b) in p.m.iter().zip(Matrix2::IDENTITY.m) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_matrix2_singular() {
        let m = Matrix2::new_and_transpose(1.0, 2.0, 2.0, 4.0);
        assert_eq!(m.invert(), (Matrix2::IDENTITY, false));
    }

    #[test]
    fn test_matrix2_small_scale_inverts() {
        let (inv, invertible) = Matrix2::new(1e-6, 0.0, 0.0, 2e-6).invert();
        assert!(invertible);
        assert!((inv.m[0] - 1e6).abs() < 1.0);
        assert!((inv.m[3] - 5e5).abs() < 1.0);
    }

    #[test]
    fn test_matrix2_rows_cols_roundtrip() {
        let m = Matrix2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Matrix2::from_rows(m.row(0), m.row(1)), m);
        assert_eq!(Matrix2::from_cols(m.col(0), m.col(1)), m);
        assert_eq!(m.with_row(1, Vector2::ZERO).row(1), Vector2::ZERO);
    }
}
