//! NEON implementation for aarch64.

use std::arch::aarch64::*;

use glk_core::Backend;

use super::SimdBackend;
use crate::{Matrix4, Quaternion, Vector4};

/// NEON backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neon;

#[inline(always)]
fn load(v: &Vector4) -> float32x4_t {
    // SAFETY: Vector4 holds four contiguous f32 lanes.
    unsafe { vld1q_f32(v.as_array().as_ptr()) }
}

#[inline(always)]
fn load_lanes(lanes: [f32; 4]) -> float32x4_t {
    // SAFETY: reads exactly four floats from a local array.
    unsafe { vld1q_f32(lanes.as_ptr()) }
}

#[inline(always)]
fn store(v: float32x4_t) -> Vector4 {
    let mut out = Vector4::ZERO;
    // SAFETY: out holds four contiguous f32 lanes.
    unsafe { vst1q_f32(out.as_mut_array().as_mut_ptr(), v) };
    out
}

#[inline(always)]
fn load_cols(m: &Matrix4) -> [float32x4_t; 4] {
    let p = m.m.as_ptr();
    // SAFETY: sixteen contiguous floats, four per column.
    unsafe { [vld1q_f32(p), vld1q_f32(p.add(4)), vld1q_f32(p.add(8)), vld1q_f32(p.add(12))] }
}

#[inline(always)]
fn store_cols(cols: [float32x4_t; 4]) -> Matrix4 {
    let mut out = Matrix4::IDENTITY;
    let p = out.m.as_mut_ptr();
    // SAFETY: see load_cols.
    unsafe {
        vst1q_f32(p, cols[0]);
        vst1q_f32(p.add(4), cols[1]);
        vst1q_f32(p.add(8), cols[2]);
        vst1q_f32(p.add(12), cols[3]);
    }
    out
}

#[inline(always)]
fn combine(c: &[float32x4_t; 4], v: Vector4) -> float32x4_t {
    unsafe {
        vaddq_f32(
            vaddq_f32(vmulq_n_f32(c[0], v.x), vmulq_n_f32(c[1], v.y)),
            vaddq_f32(vmulq_n_f32(c[2], v.z), vmulq_n_f32(c[3], v.w)),
        )
    }
}

#[inline(always)]
fn all_lanes(mask: uint32x4_t) -> bool {
    unsafe { vminvq_u32(mask) == u32::MAX }
}

impl SimdBackend for Neon {
    const BACKEND: Backend = Backend::Neon;

    #[inline]
    fn add(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { vaddq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn sub(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { vsubq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn mul(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { vmulq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn div(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { vdivq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn scale(v: Vector4, s: f32) -> Vector4 {
        store(unsafe { vmulq_n_f32(load(&v), s) })
    }

    #[inline]
    fn min(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { vminq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn max(a: Vector4, b: Vector4) -> Vector4 {
        store(unsafe { vmaxq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn dot(a: Vector4, b: Vector4) -> f32 {
        unsafe { vaddvq_f32(vmulq_f32(load(&a), load(&b))) }
    }

    #[inline]
    fn cross(a: Vector4, b: Vector4) -> Vector4 {
        let a_yzx = load_lanes([a.y, a.z, a.x, 0.0]);
        let a_zxy = load_lanes([a.z, a.x, a.y, 0.0]);
        let b_yzx = load_lanes([b.y, b.z, b.x, 0.0]);
        let b_zxy = load_lanes([b.z, b.x, b.y, 0.0]);
        store(unsafe { vsubq_f32(vmulq_f32(a_yzx, b_zxy), vmulq_f32(a_zxy, b_yzx)) })
    }

    #[inline]
    fn all_eq(a: Vector4, b: Vector4) -> bool {
        all_lanes(unsafe { vceqq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn all_gt(a: Vector4, b: Vector4) -> bool {
        all_lanes(unsafe { vcgtq_f32(load(&a), load(&b)) })
    }

    #[inline]
    fn all_ge(a: Vector4, b: Vector4) -> bool {
        all_lanes(unsafe { vcgeq_f32(load(&a), load(&b)) })
    }

    fn mat4_mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let ca = load_cols(a);
        store_cols([
            combine(&ca, b.col(0)),
            combine(&ca, b.col(1)),
            combine(&ca, b.col(2)),
            combine(&ca, b.col(3)),
        ])
    }

    fn mat4_add(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let (a, b) = (load_cols(a), load_cols(b));
        unsafe {
            store_cols([
                vaddq_f32(a[0], b[0]),
                vaddq_f32(a[1], b[1]),
                vaddq_f32(a[2], b[2]),
                vaddq_f32(a[3], b[3]),
            ])
        }
    }

    fn mat4_sub(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let (a, b) = (load_cols(a), load_cols(b));
        unsafe {
            store_cols([
                vsubq_f32(a[0], b[0]),
                vsubq_f32(a[1], b[1]),
                vsubq_f32(a[2], b[2]),
                vsubq_f32(a[3], b[3]),
            ])
        }
    }

    fn mat4_transpose(m: &Matrix4) -> Matrix4 {
        let [c0, c1, c2, c3] = load_cols(m);
        unsafe {
            let t0 = vzip1q_f32(c0, c2);
            let t1 = vzip1q_f32(c1, c3);
            let t2 = vzip2q_f32(c0, c2);
            let t3 = vzip2q_f32(c1, c3);
            store_cols([
                vzip1q_f32(t0, t1),
                vzip2q_f32(t0, t1),
                vzip1q_f32(t2, t3),
                vzip2q_f32(t2, t3),
            ])
        }
    }

    #[inline]
    fn mat4_mul_vector4(m: &Matrix4, v: Vector4) -> Vector4 {
        store(combine(&load_cols(m), v))
    }

    #[inline]
    fn quat_mul(a: Quaternion, b: Quaternion) -> Quaternion {
        let signs = load_lanes([1.0, 1.0, 1.0, -1.0]);
        unsafe {
            let t1 = vmulq_n_f32(load_lanes([b.x, b.y, b.z, b.w]), a.w);
            let t2 = vmulq_f32(load_lanes([a.x, a.y, a.z, a.x]), load_lanes([b.w, b.w, b.w, b.x]));
            let t3 = vmulq_f32(load_lanes([a.y, a.z, a.x, a.y]), load_lanes([b.z, b.x, b.y, b.y]));
            let t4 = vmulq_f32(load_lanes([a.z, a.x, a.y, a.z]), load_lanes([b.y, b.z, b.x, b.z]));

            let r = vaddq_f32(t1, vmulq_f32(t2, signs));
            let r = vaddq_f32(r, vmulq_f32(t3, signs));
            Quaternion::from_vector4(store(vsubq_f32(r, t4)))
        }
    }
}
