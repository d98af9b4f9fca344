//! 4-component vector.
//!
//! [`Vector4`] is the homogeneous-coordinate and RGBA workhorse. Its
//! arithmetic goes through the compile-time selected SIMD backend
//! ([`crate::simd::Active`]), so it is 16-byte aligned.
//!
//! # Usage
//!
//! ```rust
//! use glk_math::{Vector3, Vector4};
//!
//! let point = Vector4::from_vector3(Vector3::new(1.0, 2.0, 3.0), 1.0);
//! let color = Vector4::new(1.0, 0.5, 0.25, 1.0);
//! assert_eq!(color.g(), 0.5);
//! assert_eq!(point.w, 1.0);
//! ```

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use glk_core::{Error, Result};

use crate::simd::{Active, SimdBackend};
use crate::Vector3;

/// A 4D vector of `f32`, 16-byte aligned.
///
/// # Components
///
/// Storage is the four named fields. The color (`r`, `g`, `b`, `a`) and
/// texture (`s`, `t`, `p`, `q`) names are accessor methods over the same
/// lanes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C, align(16))]
pub struct Vector4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Vector4 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// All ones.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Unit X.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Unit Y.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Unit Z.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// Unit W.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// All lanes set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Promotes a 3-vector to homogeneous form.
    ///
    /// ```rust
    /// use glk_math::{Vector3, Vector4};
    ///
    /// let v = Vector4::from_vector3(Vector3::new(1.0, 2.0, 3.0), 0.0);
    /// assert_eq!(v, Vector4::new(1.0, 2.0, 3.0, 0.0));
    /// ```
    #[inline]
    pub const fn from_vector3(v: Vector3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Views the lanes as an array.
    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    /// Mutable array view of the lanes.
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 4] {
        bytemuck::cast_mut(self)
    }

    /// Drops the w lane.
    #[inline]
    pub const fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Red (x).
    #[inline]
    pub const fn r(self) -> f32 {
        self.x
    }

    /// Green (y).
    #[inline]
    pub const fn g(self) -> f32 {
        self.y
    }

    /// Blue (z).
    #[inline]
    pub const fn b(self) -> f32 {
        self.z
    }

    /// Alpha (w).
    #[inline]
    pub const fn a(self) -> f32 {
        self.w
    }

    /// Texture s (x).
    #[inline]
    pub const fn s(self) -> f32 {
        self.x
    }

    /// Texture t (y).
    #[inline]
    pub const fn t(self) -> f32 {
        self.y
    }

    /// Texture p (z).
    #[inline]
    pub const fn p(self) -> f32 {
        self.z
    }

    /// Texture q (w).
    #[inline]
    pub const fn q(self) -> f32 {
        self.w
    }

    /// Adds `value` to every component.
    #[inline]
    pub fn add_scalar(self, value: f32) -> Self {
        Active::add(self, Self::splat(value))
    }

    /// Subtracts `value` from every component.
    #[inline]
    pub fn sub_scalar(self, value: f32) -> Self {
        Active::sub(self, Self::splat(value))
    }

    /// Multiplies every component by `value`.
    #[inline]
    pub fn mul_scalar(self, value: f32) -> Self {
        Active::scale(self, value)
    }

    /// Divides every component by `value`.
    #[inline]
    pub fn div_scalar(self, value: f32) -> Self {
        Active::div(self, Self::splat(value))
    }

    /// Negates every component.
    #[inline]
    pub fn negate(self) -> Self {
        Active::scale(self, -1.0)
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Active::min(self, other)
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Active::max(self, other)
    }

    /// True when every component equals the one in `other`.
    #[inline]
    pub fn all_equal_to_vector(self, other: Self) -> bool {
        Active::all_eq(self, other)
    }

    /// True when every component equals `value`.
    #[inline]
    pub fn all_equal_to_scalar(self, value: f32) -> bool {
        Active::all_eq(self, Self::splat(value))
    }

    /// True when every component is greater than the one in `other`.
    #[inline]
    pub fn all_greater_than_vector(self, other: Self) -> bool {
        Active::all_gt(self, other)
    }

    /// True when every component is greater than `value`.
    #[inline]
    pub fn all_greater_than_scalar(self, value: f32) -> bool {
        Active::all_gt(self, Self::splat(value))
    }

    /// True when every component is greater than or equal to the one in `other`.
    #[inline]
    pub fn all_greater_than_or_equal_to_vector(self, other: Self) -> bool {
        Active::all_ge(self, other)
    }

    /// True when every component is greater than or equal to `value`.
    #[inline]
    pub fn all_greater_than_or_equal_to_scalar(self, value: f32) -> bool {
        Active::all_ge(self, Self::splat(value))
    }

    /// Four-component dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        Active::dot(self, other)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        Active::length(self)
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        Active::length(Active::sub(other, self))
    }

    /// Scales to unit length.
    ///
    /// A zero vector yields NaN in every lane.
    ///
    /// ```rust
    /// use glk_math::Vector4;
    ///
    /// assert!(Vector4::ZERO.normalize().x.is_nan());
    /// ```
    #[inline]
    pub fn normalize(self) -> Self {
        Active::normalize(self)
    }

    /// Linear interpolation, `t` is not clamped.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Active::lerp(self, other, t)
    }

    /// Cross product of the xyz parts; the w lane of the result is zero.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Active::cross(self, other)
    }

    /// Projects `self` onto `onto`.
    ///
    /// Projecting onto the zero vector yields NaN.
    #[inline]
    pub fn project(self, onto: Self) -> Self {
        Active::project(self, onto)
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.as_array()[i]
    }
}

impl IndexMut<usize> for Vector4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.as_mut_array()[i]
    }
}

impl Add for Vector4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Active::add(self, rhs)
    }
}

impl Add<f32> for Vector4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f32) -> Self {
        self.add_scalar(rhs)
    }
}

impl Sub for Vector4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Active::sub(self, rhs)
    }
}

impl Sub<f32> for Vector4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f32) -> Self {
        self.sub_scalar(rhs)
    }
}

// Component-wise
impl Mul for Vector4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Active::mul(self, rhs)
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Active::scale(self, rhs)
    }
}

impl Mul<Vector4> for f32 {
    type Output = Vector4;

    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        Active::scale(rhs, self)
    }
}

impl Div for Vector4 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Active::div(self, rhs)
    }
}

impl Div<f32> for Vector4 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.div_scalar(rhs)
    }
}

impl Neg for Vector4 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl From<[f32; 4]> for Vector4 {
    #[inline]
    fn from(a: [f32; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector4> for [f32; 4] {
    #[inline]
    fn from(v: Vector4) -> [f32; 4] {
        v.to_array()
    }
}

impl TryFrom<&[f32]> for Vector4 {
    type Error = Error;

    fn try_from(values: &[f32]) -> Result<Self> {
        let a: [f32; 4] = values.try_into().map_err(|_| Error::LengthMismatch {
            expected: 4,
            actual: values.len(),
        })?;
        Ok(Self::from_array(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector4_aliases() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v.r(), v.g(), v.b(), v.a()), (1.0, 2.0, 3.0, 4.0));
        assert_eq!((v.s(), v.t(), v.p(), v.q()), (1.0, 2.0, 3.0, 4.0));
        assert_eq!(v[3], 4.0);
    }

    #[test]
    fn test_vector4_ops() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(4.0, 3.0, 2.0, 1.0);

        assert_eq!(a + b, Vector4::splat(5.0));
        assert_eq!(a - 1.0, Vector4::new(0.0, 1.0, 2.0, 3.0));
        assert_eq!(a * 2.0, Vector4::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(a / b, Vector4::new(0.25, 2.0 / 3.0, 1.5, 4.0));
        assert_eq!(-a, Vector4::new(-1.0, -2.0, -3.0, -4.0));
    }

    #[test]
    fn test_vector4_min_max_componentwise() {
        let a = Vector4::new(1.0, 5.0, -3.0, 0.0);
        let b = Vector4::new(2.0, 4.0, -4.0, 0.0);
        assert_eq!(a.max(b), Vector4::new(2.0, 5.0, -3.0, 0.0));
        assert_eq!(a.min(b), Vector4::new(1.0, 4.0, -4.0, 0.0));
    }

    #[test]
    fn test_vector4_predicates() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert!(v.all_greater_than_scalar(0.5));
        assert!(!v.all_greater_than_scalar(1.0));
        assert!(v.all_greater_than_or_equal_to_scalar(1.0));
        assert!(Vector4::splat(2.0).all_equal_to_scalar(2.0));
        assert!(!v.all_equal_to_vector(Vector4::ONE));
    }

    #[test]
    fn test_vector4_cross_ignores_w() {
        let a = Vector4::new(1.0, 0.0, 0.0, 5.0);
        let b = Vector4::new(0.0, 1.0, 0.0, -2.0);
        assert_eq!(a.cross(b), Vector4::Z);
    }

    #[test]
    fn test_vector4_normalize_zero_is_nan() {
        let n = Vector4::ZERO.normalize();
        assert!(n.to_array().iter().all(|c| c.is_nan()));
    }

    #[test]
    fn test_vector4_try_from_slice() {
        let v = Vector4::try_from(&[1.0f32, 2.0, 3.0, 4.0][..]).unwrap();
        assert_eq!(v, Vector4::new(1.0, 2.0, 3.0, 4.0));
        let err = Vector4::try_from(&[1.0f32][..]).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { expected: 4, actual: 1 });
    }
}
