//! # glk-math
//!
//! Fixed-size linear algebra for 3D graphics.
//!
//! - [`Vector2`], [`Vector3`], [`Vector4`] - float tuples with componentwise
//!   and geometric operations
//! - [`Matrix2`], [`Matrix3`], [`Matrix4`] - column-major square matrices with
//!   adjugate inversion, transform stacks and camera projections
//! - [`Quaternion`] - rotations, slerp, matrix conversion
//! - [`simd`] - scalar, portable and intrinsic backends for the 4-lane hot
//!   paths, plus an explicit dispatch table
//!
//! # Design
//!
//! All types are `Copy` values and every operation returns a new value. The
//! only in-place functions are the `*_array` / `*_buffer` helpers that
//! rewrite caller-owned buffers.
//!
//! Numeric operations never fail: a zero-length normalize, a division by
//! zero or a projection onto the zero vector yields IEEE `inf`/`NaN`.
//! Matrix inversion reports singular input through the returned flag:
//!
//! ```rust
//! use glk_math::Matrix4;
//!
//! let (inv, invertible) = Matrix4::from_scale(0.0, 1.0, 1.0).invert();
//! assert!(!invertible);
//! assert_eq!(inv, Matrix4::IDENTITY);
//! ```
//!
//! Fallible functions exist only for construction from untyped data
//! (slices, float buffers) and return [`glk_core::Error`].
//!
//! # Usage
//!
//! ```rust
//! use glk_math::{Matrix4, Quaternion, Vector3};
//!
//! let proj = Matrix4::perspective(1.0, 16.0 / 9.0, 0.1, 100.0);
//! let view = Matrix4::look_at(Vector3::new(0.0, 2.0, 5.0), Vector3::ZERO, Vector3::Y);
//! let model = Matrix4::from_quaternion(Quaternion::from_angle_axis(0.5, 0.0, 1.0, 0.0));
//!
//! let clip = (proj * view * model).mul_and_project_vector3(Vector3::ZERO);
//! assert!(clip.z > -1.0 && clip.z < 1.0);
//! ```
//!
//! # Features
//!
//! - `simd` (default) - route type methods through the best backend for the
//!   target
//! - `portable-simd` - prefer the `wide` backend over native intrinsics
//! - `serde` - `Serialize` / `Deserialize` on all types
//! - `rayon` - `par_*` bulk transforms

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interop;
pub mod layout;
mod matrix2;
mod matrix3;
mod matrix4;
mod projection;
mod quaternion;
pub mod simd;
mod vector2;
mod vector3;
mod vector4;

#[cfg(feature = "rayon")]
mod parallel;

pub use matrix2::*;
pub use matrix3::*;
pub use matrix4::*;
pub use quaternion::*;
pub use vector2::*;
pub use vector3::*;
pub use vector4::*;

pub use glk_core::{Backend, Error, Result};

/// Relative determinant cutoff for matrix inversion.
///
/// A matrix counts as singular when `|det|` is at most this fraction of the
/// product of its column lengths, the largest determinant those columns
/// could span. The test ignores uniform scale, so
/// `Matrix4::from_scale(1e-4, 1e-4, 1e-4)` inverts while a matrix with
/// (nearly) dependent columns does not. Translation lengthens the last
/// column, so a unit-scale transform stays invertible up to a translation
/// of about `1e7`.
pub const SINGULAR_EPSILON: f32 = 1e-7;

/// `det` is negligible next to `volume`, the product of the column lengths.
///
/// A NaN determinant is not singular, so NaN input propagates.
#[inline]
pub(crate) fn is_singular(det: f32, volume: f32) -> bool {
    det.abs() <= SINGULAR_EPSILON * volume
}
