//! Multi-path implementations of the kernel's hot operations.
//!
//! Every operation on [`Vector4`], [`Matrix4`] and [`Quaternion`] that
//! benefits from 4-lane arithmetic is expressed by the [`SimdBackend`] trait
//! and implemented several times:
//!
//! - [`Scalar`] - plain scalar code, always compiled
//! - [`Portable`] - `wide::f32x4`, always compiled
//! - `Sse` - SSE2 intrinsics (x86 / x86_64)
//! - `Neon` - NEON intrinsics (aarch64)
//!
//! # Strategy selection
//!
//! The type methods (`Vector4::dot`, `Matrix4 * Matrix4`, ...) call
//! [`Active`], a type alias fixed at compile time by crate features and
//! target:
//!
//! ```text
//! no `simd` feature                      -> Scalar
//! `portable-simd`, or no native ISA      -> Portable
//! x86 + sse2                             -> Sse
//! aarch64 + neon                         -> Neon
//! ```
//!
//! There is no runtime branching inside the operations. Callers that want to
//! pick a strategy at runtime (benchmarks, cross-backend tests, an
//! environment override) use the [`Kernel`] function-pointer table instead.
//!
//! All backends agree within float rounding. Lanes holding NaN may differ in
//! `min`/`max` results between backends.

mod kernel;
mod portable;
mod scalar;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
mod sse;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;

pub use kernel::Kernel;
pub use portable::Portable;
pub use scalar::Scalar;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub use sse::Sse;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use neon::Neon;

use glk_core::Backend;

use crate::{Matrix4, Quaternion, Vector4};

/// Backend used by the type methods in this build.
#[cfg(not(feature = "simd"))]
pub type Active = Scalar;

/// Backend used by the type methods in this build.
#[cfg(all(
    feature = "simd",
    not(feature = "portable-simd"),
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub type Active = Sse;

/// Backend used by the type methods in this build.
#[cfg(all(
    feature = "simd",
    not(feature = "portable-simd"),
    target_arch = "aarch64",
    target_feature = "neon"
))]
pub type Active = Neon;

/// Backend used by the type methods in this build.
#[cfg(all(
    feature = "simd",
    any(
        feature = "portable-simd",
        not(any(
            all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"),
            all(target_arch = "aarch64", target_feature = "neon")
        ))
    )
))]
pub type Active = Portable;

/// One implementation strategy for the 4-lane operations.
///
/// Implementors provide the primitives; the derived operations have default
/// bodies written in terms of them, so every backend computes `length`,
/// `normalize`, `lerp`, `project` and the quaternion helpers the same way.
///
/// None of the operations guard against degenerate input: a zero-length
/// normalize or a zero projection target yields NaN lanes.
pub trait SimdBackend {
    /// Identifier of this backend.
    const BACKEND: Backend;

    /// Lane-wise `a + b`.
    fn add(a: Vector4, b: Vector4) -> Vector4;
    /// Lane-wise `a - b`.
    fn sub(a: Vector4, b: Vector4) -> Vector4;
    /// Lane-wise `a * b`.
    fn mul(a: Vector4, b: Vector4) -> Vector4;
    /// Lane-wise `a / b`.
    fn div(a: Vector4, b: Vector4) -> Vector4;
    /// Every lane multiplied by `s`.
    fn scale(v: Vector4, s: f32) -> Vector4;
    /// Lane-wise minimum.
    fn min(a: Vector4, b: Vector4) -> Vector4;
    /// Lane-wise maximum.
    fn max(a: Vector4, b: Vector4) -> Vector4;
    /// Four-lane dot product.
    fn dot(a: Vector4, b: Vector4) -> f32;
    /// Cross product of the xyz lanes; the result's w lane is zero.
    fn cross(a: Vector4, b: Vector4) -> Vector4;
    /// True when every lane of `a` equals the lane of `b`.
    fn all_eq(a: Vector4, b: Vector4) -> bool;
    /// True when every lane of `a` is greater than the lane of `b`.
    fn all_gt(a: Vector4, b: Vector4) -> bool;
    /// True when every lane of `a` is greater than or equal to the lane of `b`.
    fn all_ge(a: Vector4, b: Vector4) -> bool;

    /// Matrix product `a * b`.
    fn mat4_mul(a: &Matrix4, b: &Matrix4) -> Matrix4;
    /// Element-wise sum.
    fn mat4_add(a: &Matrix4, b: &Matrix4) -> Matrix4;
    /// Element-wise difference.
    fn mat4_sub(a: &Matrix4, b: &Matrix4) -> Matrix4;
    /// Transpose.
    fn mat4_transpose(m: &Matrix4) -> Matrix4;
    /// Homogeneous product `m * v`.
    fn mat4_mul_vector4(m: &Matrix4, v: Vector4) -> Vector4;

    /// Hamilton product `a * b` (applies `b` first).
    fn quat_mul(a: Quaternion, b: Quaternion) -> Quaternion;

    /// Euclidean length.
    #[inline]
    fn length(v: Vector4) -> f32 {
        Self::dot(v, v).sqrt()
    }

    /// `v * (1 / length(v))`.
    #[inline]
    fn normalize(v: Vector4) -> Vector4 {
        Self::scale(v, 1.0 / Self::length(v))
    }

    /// `a + (b - a) * t`, unclamped.
    #[inline]
    fn lerp(a: Vector4, b: Vector4, t: f32) -> Vector4 {
        Self::add(a, Self::scale(Self::sub(b, a), t))
    }

    /// Projection of `a` onto `b`.
    #[inline]
    fn project(a: Vector4, b: Vector4) -> Vector4 {
        Self::scale(b, Self::dot(b, a) / Self::dot(b, b))
    }

    /// Quaternion length.
    #[inline]
    fn quat_length(q: Quaternion) -> f32 {
        Self::length(q.to_vector4())
    }

    /// Quaternion scaled to unit length.
    #[inline]
    fn quat_normalize(q: Quaternion) -> Quaternion {
        Quaternion::from_vector4(Self::normalize(q.to_vector4()))
    }

    /// Negates the vector part.
    #[inline]
    fn quat_conjugate(q: Quaternion) -> Quaternion {
        Quaternion::from_vector4(Self::mul(q.to_vector4(), CONJUGATE_SIGNS))
    }

    /// `conjugate(q) / |q|^2`.
    #[inline]
    fn quat_invert(q: Quaternion) -> Quaternion {
        let v = q.to_vector4();
        let inv_len_sq = 1.0 / Self::dot(v, v);
        Quaternion::from_vector4(Self::scale(Self::mul(v, CONJUGATE_SIGNS), inv_len_sq))
    }
}

const CONJUGATE_SIGNS: Vector4 = Vector4::new(-1.0, -1.0, -1.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_is_compiled() {
        assert!(<Active as SimdBackend>::BACKEND.is_compiled());
    }

    #[cfg(not(feature = "simd"))]
    #[test]
    fn test_active_without_simd_is_scalar() {
        assert_eq!(<Active as SimdBackend>::BACKEND, Backend::Scalar);
    }

    #[cfg(feature = "portable-simd")]
    #[test]
    fn test_portable_feature_wins() {
        assert_eq!(<Active as SimdBackend>::BACKEND, Backend::Portable);
    }

    #[test]
    fn test_derived_ops() {
        let v = Vector4::new(3.0, 0.0, 4.0, 0.0);
        assert_eq!(<Active as SimdBackend>::length(v), 5.0);

        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let c = <Active as SimdBackend>::quat_conjugate(q);
        assert_eq!(c, Quaternion::new(-1.0, -2.0, -3.0, 4.0));
    }
}
