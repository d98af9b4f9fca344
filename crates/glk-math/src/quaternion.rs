//! Quaternion rotations.
//!
//! [`Quaternion`] stores `(x, y, z, w)`: the vector part first, the scalar
//! part last, 16-byte aligned like [`Vector4`]. Products follow the Hamilton
//! convention, so `a * b` applies `b` first.
//!
//! Operations that treat a quaternion as a rotation (vector rotation, matrix
//! conversion, `angle`, `axis`) normalize first. Nothing guards against a
//! zero quaternion; those operations produce NaN for it.
//!
//! # Usage
//!
//! ```rust
//! use glk_math::{Quaternion, Vector3};
//! use std::f32::consts::FRAC_PI_2;
//!
//! let q = Quaternion::from_angle_axis(FRAC_PI_2, 0.0, 0.0, 1.0);
//! let v = q.rotate_vector3(Vector3::X);
//! assert!((v.y - 1.0).abs() < 1e-6);
//! ```

use std::ops::{Add, Mul, Neg, Sub};

use glk_core::{Error, Result};

use crate::simd::{Active, SimdBackend};
use crate::{Matrix3, Matrix4, Vector3, Vector4};

/// Above this cosine, slerp falls back to normalized lerp.
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// A quaternion `x i + y j + z k + w`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C, align(16))]
pub struct Quaternion {
    /// i coefficient
    pub x: f32,
    /// j coefficient
    pub y: f32,
    /// k coefficient
    pub z: f32,
    /// Scalar part
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from its four components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates from a vector part and a scalar part.
    #[inline]
    pub const fn from_vector3(v: Vector3, scalar: f32) -> Self {
        Self::new(v.x, v.y, v.z, scalar)
    }

    /// Creates from `[x, y, z, w]`.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Converts to `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Reinterprets the four lanes as a quaternion.
    #[inline]
    pub const fn from_vector4(v: Vector4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// The four lanes as a [`Vector4`].
    #[inline]
    pub const fn to_vector4(self) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, self.w)
    }

    /// The vector part.
    #[inline]
    pub const fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Rotation of `radians` about `(x, y, z)`.
    ///
    /// The axis is used as given; pass a unit axis to get a unit quaternion.
    #[inline]
    pub fn from_angle_axis(radians: f32, x: f32, y: f32, z: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(s * x, s * y, s * z, c)
    }

    /// [`Quaternion::from_angle_axis`] with the axis in a vector.
    #[inline]
    pub fn from_angle_vector3_axis(radians: f32, axis: Vector3) -> Self {
        Self::from_angle_axis(radians, axis.x, axis.y, axis.z)
    }

    /// Extracts the rotation of a 3x3 matrix.
    ///
    /// The matrix should be a pure rotation; scale leaks into the result.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        Self::from_rotation_rows(std::array::from_fn(|r| m.row(r).to_array()))
    }

    /// Extracts the rotation in the upper-left 3x3 of a 4x4 matrix.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        Self::from_matrix3(&m.matrix3())
    }

    // Trace-based extraction, branching on the largest diagonal term to keep
    // the square root away from zero.
    fn from_rotation_rows(r: [[f32; 3]; 3]) -> Self {
        let trace = r[0][0] + r[1][1] + r[2][2];

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                (r[2][1] - r[1][2]) / s,
                (r[0][2] - r[2][0]) / s,
                (r[1][0] - r[0][1]) / s,
                0.25 * s,
            )
        } else if r[0][0] > r[1][1] && r[0][0] > r[2][2] {
            let s = (1.0 + r[0][0] - r[1][1] - r[2][2]).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (r[0][1] + r[1][0]) / s,
                (r[0][2] + r[2][0]) / s,
                (r[2][1] - r[1][2]) / s,
            )
        } else if r[1][1] > r[2][2] {
            let s = (1.0 + r[1][1] - r[0][0] - r[2][2]).sqrt() * 2.0;
            Self::new(
                (r[0][1] + r[1][0]) / s,
                0.25 * s,
                (r[1][2] + r[2][1]) / s,
                (r[0][2] - r[2][0]) / s,
            )
        } else {
            let s = (1.0 + r[2][2] - r[0][0] - r[1][1]).sqrt() * 2.0;
            Self::new(
                (r[0][2] + r[2][0]) / s,
                (r[1][2] + r[2][1]) / s,
                0.25 * s,
                (r[1][0] - r[0][1]) / s,
            )
        }
    }

    /// Rotation angle in radians, in `[0, 2π]`.
    pub fn angle(self) -> f32 {
        let q = self.normalize();
        2.0 * q.w.clamp(-1.0, 1.0).acos()
    }

    /// Unit rotation axis.
    ///
    /// The identity has no axis; the result is NaN for it.
    pub fn axis(self) -> Vector3 {
        let q = self.normalize();
        let scale = 1.0 / (1.0 - q.w * q.w).sqrt();
        q.xyz() * scale
    }

    /// Four-component dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        Active::dot(self.to_vector4(), other.to_vector4())
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        Active::quat_length(self)
    }

    /// Unit quaternion; NaN for zero length.
    #[inline]
    pub fn normalize(self) -> Self {
        Active::quat_normalize(self)
    }

    /// Negates the vector part.
    #[inline]
    pub fn conjugate(self) -> Self {
        Active::quat_conjugate(self)
    }

    /// `conjugate / length²`.
    #[inline]
    pub fn invert(self) -> Self {
        Active::quat_invert(self)
    }

    /// Spherical linear interpolation from `self` (t = 0) to `end` (t = 1).
    ///
    /// Takes the shortest arc. Nearly parallel inputs use normalized lerp.
    ///
    /// ```rust
    /// use glk_math::Quaternion;
    ///
    /// let a = Quaternion::IDENTITY;
    /// let b = Quaternion::from_angle_axis(1.0, 0.0, 1.0, 0.0);
    /// let mid = a.slerp(b, 0.5);
    /// assert!((mid.angle() - 0.5).abs() < 1e-5);
    /// ```
    ///
    /// # End point
    ///
    /// `slerp(a, b, 1.0) == b` only holds when `a.dot(b) >= 0`. For inputs in
    /// opposite hemispheres `end` is negated to stay on the short arc, and
    /// `t = 1` returns `-b`: the same rotation, not the same four floats.
    ///
    /// ```rust
    /// use glk_math::Quaternion;
    ///
    /// let a = Quaternion::from_angle_axis(0.4, 0.0, 0.0, 1.0);
    /// let b = Quaternion::from_angle_axis(4.0, 0.0, 0.0, 1.0);
    /// assert!(a.dot(b) < 0.0);
    /// let end = a.slerp(b, 1.0);
    /// assert!((end.z + b.z).abs() < 1e-5 && (end.w + b.w).abs() < 1e-5);
    /// ```
    pub fn slerp(self, end: Self, t: f32) -> Self {
        let mut cos = self.dot(end);
        let mut end = end.to_vector4();
        if cos < 0.0 {
            cos = -cos;
            end = -end;
        }

        let start = self.to_vector4();
        if cos > SLERP_LINEAR_THRESHOLD {
            return Self::from_vector4(start.lerp(end, t).normalize());
        }

        let theta = cos.acos();
        let sin = theta.sin();
        let wa = ((1.0 - t) * theta).sin() / sin;
        let wb = (t * theta).sin() / sin;
        Self::from_vector4(start * wa + end * wb)
    }

    /// Rotates `v` by this quaternion (normalized first).
    ///
    /// Computes the vector part of `q * (v, 0) * conjugate(q)`.
    pub fn rotate_vector3(self, v: Vector3) -> Vector3 {
        let q = self.normalize();
        let r = Active::quat_mul(Active::quat_mul(q, Self::from_vector3(v, 0.0)), q.conjugate());
        r.xyz()
    }

    /// Rotates the xyz lanes of `v`; w passes through unchanged.
    pub fn rotate_vector4(self, v: Vector4) -> Vector4 {
        Vector4::from_vector3(self.rotate_vector3(v.xyz()), v.w)
    }

    /// [`Quaternion::rotate_vector3`] over a buffer, in place.
    pub fn rotate_vector3_array(self, vectors: &mut [Vector3]) {
        for v in vectors {
            *v = self.rotate_vector3(*v);
        }
    }

    /// [`Quaternion::rotate_vector4`] over a buffer, in place.
    pub fn rotate_vector4_array(self, vectors: &mut [Vector4]) {
        for v in vectors {
            *v = self.rotate_vector4(*v);
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Quaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_vector4(self.to_vector4() + rhs.to_vector4())
    }
}

impl Sub for Quaternion {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_vector4(self.to_vector4() - rhs.to_vector4())
    }
}

// Hamilton product
impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Active::quat_mul(self, rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_vector4(-self.to_vector4())
    }
}

impl From<[f32; 4]> for Quaternion {
    #[inline]
    fn from(a: [f32; 4]) -> Self {
        Self::from_array(a)
    }
}

impl TryFrom<&[f32]> for Quaternion {
    type Error = Error;

    fn try_from(values: &[f32]) -> Result<Self> {
        Vector4::try_from(values).map(Self::from_vector4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_quat_eq(a: Quaternion, b: Quaternion) {
        for (x, y) in a.to_array().iter().zip(b.to_array()) {
            assert_relative_eq!(*x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quaternion_angle_axis_roundtrip() {
        let axis = Vector3::new(1.0, 2.0, -2.0).normalize();
        let q = Quaternion::from_angle_vector3_axis(1.2, axis);
        assert_relative_eq!(q.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(q.angle(), 1.2, epsilon = 1e-5);
        let a = q.axis();
        assert_relative_eq!(a.x, axis.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, axis.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, axis.z, epsilon = 1e-5);
    }

    #[test]
    fn test_quaternion_axis_not_normalized_on_construction() {
        let q = Quaternion::from_angle_axis(PI, 0.0, 0.0, 2.0);
        assert_relative_eq!(q.z, 2.0, epsilon = 1e-6);
        // decomposition normalizes
        assert_relative_eq!(q.axis().z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_quaternion_identity_axis_is_nan() {
        assert!(Quaternion::IDENTITY.axis().is_nan());
        assert_eq!(Quaternion::IDENTITY.angle(), 0.0);
    }

    #[test]
    fn test_quaternion_conjugate_invert() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.conjugate(), Quaternion::new(-1.0, -2.0, -3.0, 4.0));
        assert_quat_eq(q * q.invert(), Quaternion::IDENTITY);

        let unit = Quaternion::from_angle_axis(0.3, 0.0, 1.0, 0.0);
        assert_quat_eq(unit.invert(), unit.conjugate());
    }

    #[test]
    fn test_quaternion_composition_order() {
        // rotate X by 90° about Z, then by 90° about X
        let about_z = Quaternion::from_angle_axis(FRAC_PI_2, 0.0, 0.0, 1.0);
        let about_x = Quaternion::from_angle_axis(FRAC_PI_2, 1.0, 0.0, 0.0);
        let v = (about_x * about_z).rotate_vector3(Vector3::X);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quaternion_rotate_normalizes() {
        let unit = Quaternion::from_angle_axis(FRAC_PI_2, 0.0, 1.0, 0.0);
        let q = Quaternion::from_vector4(unit.to_vector4() * 5.0);
        let v = q.rotate_vector3(Vector3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(v.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(v.length(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_quaternion_rotate_vector4_keeps_w() {
        let q = Quaternion::from_angle_axis(0.8, 1.0, 0.0, 0.0);
        let v = q.rotate_vector4(Vector4::new(0.0, 1.0, 0.0, 7.5));
        assert_eq!(v.w, 7.5);
        assert_relative_eq!(v.xyz().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quaternion_matrix_roundtrip() {
        let q = Quaternion::from_angle_axis(2.5, 0.0, 0.6, 0.8);
        assert_quat_eq(Quaternion::from_matrix3(&Matrix3::from_quaternion(q)), q);
        assert_quat_eq(Quaternion::from_matrix4(&Matrix4::from_quaternion(q)), q);

        // trace < 0 branches
        for axis in [Vector3::X, Vector3::Y, Vector3::Z] {
            let q = Quaternion::from_angle_vector3_axis(PI * 0.9, axis);
            assert_quat_eq(Quaternion::from_matrix3(&Matrix3::from_quaternion(q)), q);
        }
    }

    #[test]
    fn test_quaternion_rotation_matches_matrix() {
        let q = Quaternion::from_angle_axis(1.1, 0.48, 0.6, 0.64);
        let v = Vector3::new(0.3, -2.0, 1.5);
        let by_quat = q.rotate_vector3(v);
        let by_matrix = Matrix3::from_quaternion(q) * v;
        assert_relative_eq!(by_quat.x, by_matrix.x, epsilon = 1e-5);
        assert_relative_eq!(by_quat.y, by_matrix.y, epsilon = 1e-5);
        assert_relative_eq!(by_quat.z, by_matrix.z, epsilon = 1e-5);
    }

    #[test]
    fn test_quaternion_slerp_bounds() {
        let a = Quaternion::from_angle_axis(0.2, 0.0, 0.0, 1.0);
        let b = Quaternion::from_angle_axis(1.7, 0.0, 0.0, 1.0);
        assert_quat_eq(a.slerp(b, 0.0), a);
        // Same hemisphere, so the end point is b itself.
        assert!(a.dot(b) >= 0.0);
        assert_quat_eq(a.slerp(b, 1.0), b);
        assert_quat_eq(a.slerp(a, 0.37), a);
        assert_relative_eq!(a.slerp(b, 0.5).angle(), 0.95, epsilon = 1e-5);
    }

    #[test]
    fn test_quaternion_slerp_end_is_negated_across_hemispheres() {
        let a = Quaternion::from_angle_axis(0.4, 0.0, 0.0, 1.0);
        let b = Quaternion::from_angle_axis(4.0, 0.0, 0.0, 1.0);
        assert!(a.dot(b) < 0.0);

        // slerp(a, b, 1) is -b, not b; both encode the same rotation.
        let end = a.slerp(b, 1.0);
        assert_quat_eq(end, -b);
        let v = Vector3::new(1.0, 2.0, 3.0);
        let (x, y) = (end.rotate_vector3(v), b.rotate_vector3(v));
        for i in 0..3 {
            assert_relative_eq!(x[i], y[i], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quaternion_slerp_shortest_path() {
        let a = Quaternion::IDENTITY;
        let b = -Quaternion::from_angle_axis(0.5, 1.0, 0.0, 0.0);
        let mid = a.slerp(b, 0.5);
        assert!(mid.w > 0.0);
        assert_relative_eq!(mid.angle(), 0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_quaternion_bulk_rotate() {
        let q = Quaternion::from_angle_axis(FRAC_PI_2, 0.0, 0.0, 1.0);
        let mut vs = [Vector3::X, Vector3::Y];
        q.rotate_vector3_array(&mut vs);
        assert_relative_eq!(vs[0].y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(vs[1].x, -1.0, epsilon = 1e-6);

        let mut v4 = [Vector4::new(1.0, 0.0, 0.0, 1.0)];
        q.rotate_vector4_array(&mut v4);
        assert_relative_eq!(v4[0].y, 1.0, epsilon = 1e-6);
        assert_eq!(v4[0].w, 1.0);
    }
}
