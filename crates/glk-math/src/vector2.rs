//! 2D vector type.

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use glk_core::{Error, Result};

/// A 2D vector of `f32`, 8-byte aligned.
///
/// `s`/`t` are accessor aliases for `x`/`y` when the vector holds texture
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C, align(8))]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// One vector.
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// Unit X.
    pub const X: Self = Self::new(1.0, 0.0);
    /// Unit Y.
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 2]) -> Self {
        Self::new(a[0], a[1])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Views the components as an array.
    #[inline]
    pub fn as_array(&self) -> &[f32; 2] {
        bytemuck::cast_ref(self)
    }

    /// Mutable array view of the components.
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 2] {
        bytemuck::cast_mut(self)
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

    /// Adds `value` to both components.
    #[inline]
    pub fn add_scalar(self, value: f32) -> Self {
        Self::new(self.x + value, self.y + value)
    }

    /// Subtracts `value` from both components.
    #[inline]
    pub fn sub_scalar(self, value: f32) -> Self {
        Self::new(self.x - value, self.y - value)
    }

    /// Multiplies both components by `value`.
    #[inline]
    pub fn mul_scalar(self, value: f32) -> Self {
        Self::new(self.x * value, self.y * value)
    }

    /// Divides both components by `value`.
    #[inline]
    pub fn div_scalar(self, value: f32) -> Self {
        Self::new(self.x / value, self.y / value)
    }

    /// Negates both components.
    #[inline]
    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit-length copy; NaN for the zero vector.
    #[inline]
    pub fn normalize(self) -> Self {
        self * (1.0 / self.length())
    }

    /// Projects `self` onto `onto`.
    #[inline]
    pub fn project(self, onto: Self) -> Self {
        onto * (onto.dot(self) / onto.dot(onto))
    }

    /// Unclamped linear interpolation.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            if self.x < other.x { self.x } else { other.x },
            if self.y < other.y { self.y } else { other.y },
        )
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            if self.x > other.x { self.x } else { other.x },
            if self.y > other.y { self.y } else { other.y },
        )
    }

    /// True when both components equal those of `other`.
    #[inline]
    pub fn all_equal_to_vector(self, other: Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// True when both components equal `value`.
    #[inline]
    pub fn all_equal_to_scalar(self, value: f32) -> bool {
        self.all_equal_to_vector(Self::splat(value))
    }

    /// True when both components are greater than those of `other`.
    #[inline]
    pub fn all_greater_than_vector(self, other: Self) -> bool {
        self.x > other.x && self.y > other.y
    }

    /// True when both components are greater than `value`.
    #[inline]
    pub fn all_greater_than_scalar(self, value: f32) -> bool {
        self.all_greater_than_vector(Self::splat(value))
    }

    /// True when both components are greater than or equal to those of `other`.
    #[inline]
    pub fn all_greater_than_or_equal_to_vector(self, other: Self) -> bool {
        self.x >= other.x && self.y >= other.y
    }

    /// True when both components are greater than or equal to `value`.
    #[inline]
    pub fn all_greater_than_or_equal_to_scalar(self, value: f32) -> bool {
        self.all_greater_than_or_equal_to_vector(Self::splat(value))
    }
}

impl Index<usize> for Vector2 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.as_array()[i]
    }
}

impl IndexMut<usize> for Vector2 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.as_mut_array()[i]
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f32> for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f32) -> Self {
        self.add_scalar(rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f32> for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f32) -> Self {
        self.sub_scalar(rhs)
    }
}

impl Mul for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.mul_scalar(rhs)
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;

    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs.mul_scalar(self)
    }
}

impl Div for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.div_scalar(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl From<[f32; 2]> for Vector2 {
    #[inline]
    fn from(a: [f32; 2]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector2> for [f32; 2] {
    #[inline]
    fn from(v: Vector2) -> [f32; 2] {
        v.to_array()
    }
}

impl TryFrom<&[f32]> for Vector2 {
    type Error = Error;

    fn try_from(values: &[f32]) -> Result<Self> {
        let a: [f32; 2] = values.try_into().map_err(|_| Error::LengthMismatch {
            expected: 2,
            actual: values.len(),
        })?;
        Ok(Self::from_array(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_ops() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 5.0);
        assert_eq!(a + b, Vector2::new(4.0, 7.0));
        assert_eq!(b - a, Vector2::new(2.0, 3.0));
        assert_eq!(a * b, Vector2::new(3.0, 10.0));
        assert_eq!(2.0 * a, Vector2::new(2.0, 4.0));
        assert_eq!(a.dot(b), 13.0);
    }

    #[test]
    fn test_vector2_length() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        let n = v.normalize();
        assert!((n.x - 0.6).abs() < 1e-6 && (n.y - 0.8).abs() < 1e-6);
        assert_eq!(Vector2::ZERO.distance(v), 5.0);
    }

    #[test]
    fn test_vector2_min_max() {
        let a = Vector2::new(1.0, 4.0);
        let b = Vector2::new(2.0, 3.0);
        assert_eq!(a.min(b), Vector2::new(1.0, 3.0));
        assert_eq!(a.max(b), Vector2::new(2.0, 4.0));
    }

    #[test]
    fn test_vector2_texture_aliases() {
        let uv = Vector2::new(0.25, 0.75);
        assert_eq!((uv.s(), uv.t()), (0.25, 0.75));
        assert_eq!(uv[1], 0.75);
    }
}
