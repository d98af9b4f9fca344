//! Scalar fallback implementation.
//!
//! Reference semantics for every other backend.

use glk_core::Backend;

use super::SimdBackend;
use crate::{Matrix4, Quaternion, Vector4};

/// Plain scalar backend, available on every target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

#[inline]
fn map2(a: Vector4, b: Vector4, f: impl Fn(f32, f32) -> f32) -> Vector4 {
    Vector4::new(f(a.x, b.x), f(a.y, b.y), f(a.z, b.z), f(a.w, b.w))
}

#[inline]
fn all2(a: Vector4, b: Vector4, f: impl Fn(f32, f32) -> bool) -> bool {
    f(a.x, b.x) && f(a.y, b.y) && f(a.z, b.z) && f(a.w, b.w)
}

impl SimdBackend for Scalar {
    const BACKEND: Backend = Backend::Scalar;

    #[inline]
    fn add(a: Vector4, b: Vector4) -> Vector4 {
        map2(a, b, |x, y| x + y)
    }

    #[inline]
    fn sub(a: Vector4, b: Vector4) -> Vector4 {
        map2(a, b, |x, y| x - y)
    }

    #[inline]
    fn mul(a: Vector4, b: Vector4) -> Vector4 {
        map2(a, b, |x, y| x * y)
    }

    #[inline]
    fn div(a: Vector4, b: Vector4) -> Vector4 {
        map2(a, b, |x, y| x / y)
    }

    #[inline]
    fn scale(v: Vector4, s: f32) -> Vector4 {
        Vector4::new(v.x * s, v.y * s, v.z * s, v.w * s)
    }

    // Same select order as minps/maxps.
    #[inline]
    fn min(a: Vector4, b: Vector4) -> Vector4 {
        map2(a, b, |x, y| if x < y { x } else { y })
    }

    #[inline]
    fn max(a: Vector4, b: Vector4) -> Vector4 {
        map2(a, b, |x, y| if x > y { x } else { y })
    }

    #[inline]
    fn dot(a: Vector4, b: Vector4) -> f32 {
        a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w
    }

    #[inline]
    fn cross(a: Vector4, b: Vector4) -> Vector4 {
        Vector4::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
            0.0,
        )
    }

    #[inline]
    fn all_eq(a: Vector4, b: Vector4) -> bool {
        all2(a, b, |x, y| x == y)
    }

    #[inline]
    fn all_gt(a: Vector4, b: Vector4) -> bool {
        all2(a, b, |x, y| x > y)
    }

    #[inline]
    fn all_ge(a: Vector4, b: Vector4) -> bool {
        all2(a, b, |x, y| x >= y)
    }

    fn mat4_mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a.m[row] * b.m[col * 4]
                    + a.m[4 + row] * b.m[col * 4 + 1]
                    + a.m[8 + row] * b.m[col * 4 + 2]
                    + a.m[12 + row] * b.m[col * 4 + 3];
            }
        }
        Matrix4::from_array(out)
    }

    fn mat4_add(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        Matrix4::from_array(std::array::from_fn(|i| a.m[i] + b.m[i]))
    }

    fn mat4_sub(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        Matrix4::from_array(std::array::from_fn(|i| a.m[i] - b.m[i]))
    }

    fn mat4_transpose(m: &Matrix4) -> Matrix4 {
        Matrix4::from_array(std::array::from_fn(|i| m.m[(i % 4) * 4 + i / 4]))
    }

    #[inline]
    fn mat4_mul_vector4(m: &Matrix4, v: Vector4) -> Vector4 {
        let m = &m.m;
        Vector4::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        )
    }

    #[inline]
    fn quat_mul(a: Quaternion, b: Quaternion) -> Quaternion {
        Quaternion::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y + a.y * b.w + a.z * b.x - a.x * b.z,
            a.w * b.z + a.z * b.w + a.x * b.y - a.y * b.x,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(5.0, 6.0, 7.0, 8.0);

        assert_eq!(Scalar::dot(a, b), 70.0);
        assert_eq!(Scalar::add(a, b), Vector4::new(6.0, 8.0, 10.0, 12.0));
        assert_eq!(Scalar::min(a, b), a);
        assert!(Scalar::all_gt(b, a));
        assert!(!Scalar::all_gt(a, a));
        assert!(Scalar::all_ge(a, a));
    }

    #[test]
    fn test_scalar_transpose() {
        let m = Matrix4::from_array(std::array::from_fn(|i| i as f32));
        let t = Scalar::mat4_transpose(&m);
        assert_eq!(t.m[1], 4.0);
        assert_eq!(t.m[4], 1.0);
        assert_eq!(Scalar::mat4_transpose(&t), m);
    }

    #[test]
    fn test_scalar_quat_mul_axes() {
        // i * j = k
        let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        assert_eq!(Scalar::quat_mul(i, j), Quaternion::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(Scalar::quat_mul(j, i), Quaternion::new(0.0, 0.0, -1.0, 0.0));
    }
}
