//! 3D vector type.
//!
//! [`Vector3`] is exactly three packed floats, so a `&[Vector3]` has the
//! same layout as a vertex position buffer. It does not go through the SIMD
//! dispatch layer; use [`Vector4`](crate::Vector4) for 4-lane work.
//!
//! # Usage
//!
//! ```rust
//! use glk_math::Vector3;
//!
//! let x = Vector3::new(1.0, 0.0, 0.0);
//! let y = Vector3::new(0.0, 1.0, 0.0);
//! assert_eq!(x.cross(y), Vector3::Z);
//! ```

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use glk_core::{Error, Result};

use crate::Vector2;

/// A 3D vector of `f32`.
///
/// # Components
///
/// Access via `.x`, `.y`, `.z` or index `[0]`, `[1]`, `[2]`.
/// `r`/`g`/`b` and `s`/`t`/`p` are accessor aliases for the same lanes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// One vector (1, 1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit X vector (1, 0, 0).
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector (0, 1, 0).
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector (0, 0, 1).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to the same value.
    ///
    /// ```rust
    /// use glk_math::Vector3;
    ///
    /// assert_eq!(Vector3::splat(0.5), Vector3::new(0.5, 0.5, 0.5));
    /// ```
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Extends a 2D vector with `z`.
    #[inline]
    pub const fn from_vector2(v: Vector2, z: f32) -> Self {
        Self::new(v.x, v.y, z)
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Views the components as an array.
    #[inline]
    pub fn as_array(&self) -> &[f32; 3] {
        bytemuck::cast_ref(self)
    }

    /// Mutable array view of the components.
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 3] {
        bytemuck::cast_mut(self)
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

    /// Adds `value` to every component.
    #[inline]
    pub fn add_scalar(self, value: f32) -> Self {
        Self::new(self.x + value, self.y + value, self.z + value)
    }

    /// Subtracts `value` from every component.
    #[inline]
    pub fn sub_scalar(self, value: f32) -> Self {
        Self::new(self.x - value, self.y - value, self.z - value)
    }

    /// Multiplies every component by `value`.
    #[inline]
    pub fn mul_scalar(self, value: f32) -> Self {
        Self::new(self.x * value, self.y * value, self.z * value)
    }

    /// Divides every component by `value`.
    #[inline]
    pub fn div_scalar(self, value: f32) -> Self {
        Self::new(self.x / value, self.y / value, self.z / value)
    }

    /// Negates every component.
    #[inline]
    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared length (avoids sqrt).
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Normalizes the vector to unit length.
    ///
    /// A zero vector yields NaN components.
    #[inline]
    pub fn normalize(self) -> Self {
        self * (1.0 / self.length())
    }

    /// Projects `self` onto `onto`. NaN when `onto` is zero.
    #[inline]
    pub fn project(self, onto: Self) -> Self {
        onto * (onto.dot(self) / onto.dot(onto))
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            if self.x < other.x { self.x } else { other.x },
            if self.y < other.y { self.y } else { other.y },
            if self.z < other.z { self.z } else { other.z },
        )
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            if self.x > other.x { self.x } else { other.x },
            if self.y > other.y { self.y } else { other.y },
            if self.z > other.z { self.z } else { other.z },
        )
    }

    /// True when every component equals the one in `other`.
    #[inline]
    pub fn all_equal_to_vector(self, other: Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    /// True when every component equals `value`.
    #[inline]
    pub fn all_equal_to_scalar(self, value: f32) -> bool {
        self.all_equal_to_vector(Self::splat(value))
    }

    /// True when every component is greater than the one in `other`.
    #[inline]
    pub fn all_greater_than_vector(self, other: Self) -> bool {
        self.x > other.x && self.y > other.y && self.z > other.z
    }

    /// True when every component is greater than `value`.
    #[inline]
    pub fn all_greater_than_scalar(self, value: f32) -> bool {
        self.all_greater_than_vector(Self::splat(value))
    }

    /// True when every component is greater than or equal to the one in `other`.
    #[inline]
    pub fn all_greater_than_or_equal_to_vector(self, other: Self) -> bool {
        self.x >= other.x && self.y >= other.y && self.z >= other.z
    }

    /// True when every component is greater than or equal to `value`.
    #[inline]
    pub fn all_greater_than_or_equal_to_scalar(self, value: f32) -> bool {
        self.all_greater_than_or_equal_to_vector(Self::splat(value))
    }

    /// Linear interpolation between self and other.
    ///
    /// `t = 0.0` returns self, `t = 1.0` returns other. Not clamped.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Returns true if any component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns true if all components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.as_array()[i]
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.as_mut_array()[i]
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f32) -> Self {
        self.add_scalar(rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f32) -> Self {
        self.sub_scalar(rhs)
    }
}

// Vector3 * Vector3 (component-wise)
impl Mul for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.mul_scalar(rhs)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs.mul_scalar(self)
    }
}

impl Div for Vector3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.div_scalar(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(v: Vector3) -> [f32; 3] {
        v.to_array()
    }
}

impl TryFrom<&[f32]> for Vector3 {
    type Error = Error;

    fn try_from(values: &[f32]) -> Result<Self> {
        let a: [f32; 3] = values.try_into().map_err(|_| Error::LengthMismatch {
            expected: 3,
            actual: values.len(),
        })?;
        Ok(Self::from_array(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3_dot() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_vector3_cross_axes() {
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);
    }

    #[test]
    fn test_vector3_lerp() {
        let a = Vector3::ZERO;
        let b = Vector3::new(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(b, 0.5), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(a.lerp(b, 2.0), Vector3::new(4.0, 8.0, 12.0));
    }

    #[test]
    fn test_vector3_ops() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::splat(3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(a + 1.0, Vector3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_vector3_divide_by_zero_is_ieee() {
        let v = Vector3::new(1.0, -1.0, 0.0) / 0.0;
        assert_eq!(v.x, f32::INFINITY);
        assert_eq!(v.y, f32::NEG_INFINITY);
        assert!(v.z.is_nan());
    }

    #[test]
    fn test_vector3_project() {
        let a = Vector3::new(2.0, 3.0, 0.0);
        assert_eq!(a.project(Vector3::new(4.0, 0.0, 0.0)), Vector3::new(2.0, 0.0, 0.0));
        assert!(a.project(Vector3::ZERO).is_nan());
    }

    #[test]
    fn test_vector3_predicates() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!(v.all_greater_than_or_equal_to_scalar(1.0));
        assert!(!v.all_greater_than_scalar(1.0));
        assert!(v.all_equal_to_vector(v));
        assert!(!v.all_equal_to_scalar(1.0));
    }

    #[test]
    fn test_vector3_index() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v[2] = 7.0;
        assert_eq!(v[0], 1.0);
        assert_eq!(v.b(), 7.0);
        assert_eq!(v.p(), 7.0);
    }
}
