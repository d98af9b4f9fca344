//! SSE2 implementation for x86 / x86_64.
//!
//! Only baseline SSE2 instructions are used, so no runtime feature detection
//! is needed. [`Vector4`], [`Matrix4`] and [`Quaternion`] are 16-byte
//! aligned, which makes the aligned `_mm_load_ps` / `_mm_store_ps` valid.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use glk_core::Backend;

use super::SimdBackend;
use crate::{Matrix4, Quaternion, Vector4};

/// Immediate for `_mm_shuffle_ps`: lane selectors from high to low.
const fn shuffle(z: i32, y: i32, x: i32, w: i32) -> i32 {
    (z << 6) | (y << 4) | (x << 2) | w
}

/// SSE2 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sse;

#[inline(always)]
fn load(v: &Vector4) -> __m128 {
    // SAFETY: Vector4 is repr(C, align(16)) with four f32 lanes.
    unsafe { _mm_load_ps(v.as_array().as_ptr()) }
}

#[inline(always)]
fn store(v: __m128) -> Vector4 {
    let mut out = Vector4::ZERO;
    // SAFETY: out is 16-byte aligned and holds four f32 lanes.
    unsafe { _mm_store_ps(out.as_mut_array().as_mut_ptr(), v) };
    out
}

#[inline(always)]
fn load_cols(m: &Matrix4) -> [__m128; 4] {
    let p = m.m.as_ptr();
    // SAFETY: Matrix4 is 16-byte aligned, so every column starts on a
    // 16-byte boundary.
    unsafe {
        [
            _mm_load_ps(p),
            _mm_load_ps(p.add(4)),
            _mm_load_ps(p.add(8)),
            _mm_load_ps(p.add(12)),
        ]
    }
}

#[inline(always)]
fn store_cols(cols: [__m128; 4]) -> Matrix4 {
    let mut out = Matrix4::IDENTITY;
    let p = out.m.as_mut_ptr();
    // SAFETY: see load_cols.
    unsafe {
        _mm_store_ps(p, cols[0]);
        _mm_store_ps(p.add(4), cols[1]);
        _mm_store_ps(p.add(8), cols[2]);
        _mm_store_ps(p.add(12), cols[3]);
    }
    out
}

/// `c0 * v.x + c1 * v.y + c2 * v.z + c3 * v.w`
#[inline(always)]
fn combine(c: &[__m128; 4], v: __m128) -> __m128 {
    unsafe {
        let x = _mm_shuffle_ps::<{ shuffle(0, 0, 0, 0) }>(v, v);
        let y = _mm_shuffle_ps::<{ shuffle(1, 1, 1, 1) }>(v, v);
        let z = _mm_shuffle_ps::<{ shuffle(2, 2, 2, 2) }>(v, v);
        let w = _mm_shuffle_ps::<{ shuffle(3, 3, 3, 3) }>(v, v);
        _mm_add_ps(
            _mm_add_ps(_mm_mul_ps(c[0], x), _mm_mul_ps(c[1], y)),
            _mm_add_ps(_mm_mul_ps(c[2], z), _mm_mul_ps(c[3], w)),
        )
    }
}

#[inline(always)]
fn all_lanes(mask: __m128) -> bool {
    unsafe { _mm_movemask_ps(mask) == 0b1111 }
}

impl SimdBackend for Sse {
    const BACKEND: Backend = Backend::Sse;

    #[inline]
    fn add(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { _mm_add_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn sub(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { _mm_sub_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn mul(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { _mm_mul_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn div(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { _mm_div_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn scale(v: Vector4, s: f32) -> Vector4 {
        store(unsafe { _mm_mul_ps(load(&v), _mm_set1_ps(s)) })
    }

    #[inline]
    fn min(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { _mm_min_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn max(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { _mm_max_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn dot(a: Vector4, b: Vector4) -> f32 {
        unsafe {
            let p = _mm_mul_ps(load(&a), load(&b));
            // (x+y, x+y, z+w, z+w) then fold the high pair onto the low one
            let shuf = _mm_shuffle_ps::<{ shuffle(2, 3, 0, 1) }>(p, p);
            let sums = _mm_add_ps(p, shuf);
            let high = _mm_movehl_ps(shuf, sums);
            _mm_cvtss_f32(_mm_add_ss(sums, high))
        }
    }

    #[inline]
    fn cross(a: Vector4, b: Vector4) -> Vector4 {
        unsafe {
            let a = load(&a);
            let b = load(&b);
            let a_yzx = _mm_shuffle_ps::<{ shuffle(3, 0, 2, 1) }>(a, a);
            let a_zxy = _mm_shuffle_ps::<{ shuffle(3, 1, 0, 2) }>(a, a);
            let b_yzx = _mm_shuffle_ps::<{ shuffle(3, 0, 2, 1) }>(b, b);
            let b_zxy = _mm_shuffle_ps::<{ shuffle(3, 1, 0, 2) }>(b, b);
            let r = _mm_sub_ps(_mm_mul_ps(a_yzx, b_zxy), _mm_mul_ps(a_zxy, b_yzx));
            let xyz_mask = _mm_castsi128_ps(_mm_set_epi32(0, -1, -1, -1));
            store(_mm_and_ps(r, xyz_mask))
        }
    }

    #[inline]
    fn all_eq(a: Vector4, b: Vector4) -> bool {
        all_lanes(unsafe { _mm_cmpeq_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn all_gt(a: Vector4, b: Vector4) -> bool {
        all_lanes(unsafe { _mm_cmpgt_ps(load(&a), load(&b)) })
    }

    #[inline]
    fn all_ge(a: Vector4, b: Vector4) -> bool {
        all_lanes(unsafe { _mm_cmpge_ps(load(&a), load(&b)) })
    }

    fn mat4_mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let ca = load_cols(a);
        let cb = load_cols(b);
        store_cols([
            combine(&ca, cb[0]),
            combine(&ca, cb[1]),
            combine(&ca, cb[2]),
            combine(&ca, cb[3]),
        ])
    }

    fn mat4_add(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let (a, b) = (load_cols(a), load_cols(b));
        unsafe {
            store_cols([
                _mm_add_ps(a[0], b[0]),
                _mm_add_ps(a[1], b[1]),
                _mm_add_ps(a[2], b[2]),
                _mm_add_ps(a[3], b[3]),
            ])
        }
    }

    fn mat4_sub(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let (a, b) = (load_cols(a), load_cols(b));
        unsafe {
            store_cols([
                _mm_sub_ps(a[0], b[0]),
                _mm_sub_ps(a[1], b[1]),
                _mm_sub_ps(a[2], b[2]),
                _mm_sub_ps(a[3], b[3]),
            ])
        }
    }

    fn mat4_transpose(m: &Matrix4) -> Matrix4 {
        let [c0, c1, c2, c3] = load_cols(m);
        unsafe {
            let t0 = _mm_unpacklo_ps(c0, c1);
            let t1 = _mm_unpacklo_ps(c2, c3);
            let t2 = _mm_unpackhi_ps(c0, c1);
            let t3 = _mm_unpackhi_ps(c2, c3);
            store_cols([
                _mm_movelh_ps(t0, t1),
                _mm_movehl_ps(t1, t0),
                _mm_movelh_ps(t2, t3),
                _mm_movehl_ps(t3, t2),
            ])
        }
    }

    #[inline]
    fn mat4_mul_vector4(m: &Matrix4, v: Vector4) -> Vector4 {
        store(combine(&load_cols(m), load(&v)))
    }

    #[inline]
    fn quat_mul(a: Quaternion, b: Quaternion) -> Quaternion {
        let (va, vb) = (a.to_vector4(), b.to_vector4());
        unsafe {
            let a = load(&va);
            let b = load(&vb);
            let signs = _mm_set_ps(-1.0, 1.0, 1.0, 1.0);

            let t1 = _mm_mul_ps(_mm_shuffle_ps::<{ shuffle(3, 3, 3, 3) }>(a, a), b);
            let t2 = _mm_mul_ps(
                _mm_shuffle_ps::<{ shuffle(0, 2, 1, 0) }>(a, a),
                _mm_shuffle_ps::<{ shuffle(0, 3, 3, 3) }>(b, b),
            );
            let t3 = _mm_mul_ps(
                _mm_shuffle_ps::<{ shuffle(1, 0, 2, 1) }>(a, a),
                _mm_shuffle_ps::<{ shuffle(1, 1, 0, 2) }>(b, b),
            );
            let t4 = _mm_mul_ps(
                _mm_shuffle_ps::<{ shuffle(2, 1, 0, 2) }>(a, a),
                _mm_shuffle_ps::<{ shuffle(2, 0, 2, 1) }>(b, b),
            );

            let r = _mm_add_ps(t1, _mm_mul_ps(t2, signs));
            let r = _mm_add_ps(r, _mm_mul_ps(t3, signs));
            Quaternion::from_vector4(store(_mm_sub_ps(r, t4)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Scalar;

    #[test]
    fn test_shuffle_immediates() {
        assert_eq!(shuffle(0, 0, 0, 0), 0x00);
        assert_eq!(shuffle(3, 3, 3, 3), 0xff);
        assert_eq!(shuffle(3, 0, 2, 1), 0b11_00_10_01);
        assert_eq!(shuffle(2, 3, 0, 1), 0b10_11_00_01);
    }

    #[test]
    fn test_sse_swizzles_match_scalar() {
        // Exercises every shuffle pattern: broadcast, pair swap, yzx/zxy.
        let m = Matrix4::from_array(std::array::from_fn(|i| (i as f32 - 7.5) * 0.25));
        let v = Vector4::new(1.5, -2.0, 0.25, 3.0);
        assert_eq!(Sse::mat4_mul_vector4(&m, v), Scalar::mat4_mul_vector4(&m, v));
        assert_eq!(Sse::mat4_mul(&m, &m), Scalar::mat4_mul(&m, &m));

        let a = Vector4::new(2.0, -3.0, 5.0, 1.0);
        let b = Vector4::new(-1.0, 4.0, 0.5, 2.0);
        assert_eq!(Sse::cross(a, b), Scalar::cross(a, b));
        assert_eq!(Sse::dot(a, b), Scalar::dot(a, b));
    }

    #[test]
    fn test_sse_dot() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(Sse::dot(a, b), 70.0);
    }

    #[test]
    fn test_sse_cross_zeroes_w() {
        let a = Vector4::new(1.0, 0.0, 0.0, 7.0);
        let b = Vector4::new(0.0, 1.0, 0.0, 9.0);
        assert_eq!(Sse::cross(a, b), Vector4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sse_transpose_matches_scalar() {
        let m = Matrix4::from_array(std::array::from_fn(|i| i as f32 * 0.5));
        assert_eq!(Sse::mat4_transpose(&m), Scalar::mat4_transpose(&m));
    }

    #[test]
    fn test_sse_quat_mul_matches_scalar() {
        let a = Quaternion::new(0.3, -0.2, 0.5, 0.8);
        let b = Quaternion::new(0.1, 0.7, -0.3, 0.6);
        let s = Sse::quat_mul(a, b).to_array();
        let r = Scalar::quat_mul(a, b).to_array();
        for (s, r) in s.iter().zip(r) {
            assert!((s - r).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sse_compare() {
        let a = Vector4::splat(2.0);
        let b = Vector4::new(1.0, 1.0, 1.0, 2.0);
        assert!(Sse::all_ge(a, b));
        assert!(!Sse::all_gt(a, b));
        assert!(Sse::all_eq(a, a));
    }
}
