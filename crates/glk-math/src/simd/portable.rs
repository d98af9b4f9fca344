//! Portable SIMD implementation on top of `wide::f32x4`.
//!
//! `wide` lowers to SSE, NEON or WASM simd128 where available and to scalar
//! code elsewhere, so this backend compiles on every target. Lane
//! permutations have no portable shuffle and go through arrays.

use glk_core::Backend;
use wide::{CmpEq, CmpGe, CmpGt, f32x4};

use super::SimdBackend;
use crate::{Matrix4, Quaternion, Vector4};

/// Portable 4-lane backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

const ALL_LANES: i32 = 0b1111;

#[inline]
fn load(v: Vector4) -> f32x4 {
    f32x4::from(v.to_array())
}

#[inline]
fn store(v: f32x4) -> Vector4 {
    Vector4::from_array(v.to_array())
}

#[inline]
fn load_col(m: &Matrix4, col: usize) -> f32x4 {
    f32x4::from([m.m[col * 4], m.m[col * 4 + 1], m.m[col * 4 + 2], m.m[col * 4 + 3]])
}

#[inline]
fn combine(c: &[f32x4; 4], v: [f32; 4]) -> f32x4 {
    c[0] * f32x4::splat(v[0])
        + c[1] * f32x4::splat(v[1])
        + c[2] * f32x4::splat(v[2])
        + c[3] * f32x4::splat(v[3])
}

#[inline]
fn columns(m: &Matrix4) -> [f32x4; 4] {
    [load_col(m, 0), load_col(m, 1), load_col(m, 2), load_col(m, 3)]
}

fn from_columns(cols: [f32x4; 4]) -> Matrix4 {
    let mut out = [0.0f32; 16];
    for (dst, col) in out.chunks_exact_mut(4).zip(cols) {
        dst.copy_from_slice(&col.to_array());
    }
    Matrix4::from_array(out)
}

impl SimdBackend for Portable {
    const BACKEND: Backend = Backend::Portable;

    #[inline]
    fn add(a: Vector4, b: Vector4) -> Vector4 {
        store(load(a) + load(b))
    }

    #[inline]
    fn sub(a: Vector4, b: Vector4) -> Vector4 {
        store(load(a) - load(b))
    }

    #[inline]
    fn mul(a: Vector4, b: Vector4) -> Vector4 {
        store(load(a) * load(b))
    }

    #[inline]
    fn div(a: Vector4, b: Vector4) -> Vector4 {
        store(load(a) / load(b))
    }

    #[inline]
    fn scale(v: Vector4, s: f32) -> Vector4 {
        store(load(v) * f32x4::splat(s))
    }

    #[inline]
    fn min(a: Vector4, b: Vector4) -> Vector4 {
        store(load(a).min(load(b)))
    }

    #[inline]
    fn max(a: Vector4, b: Vector4) -> Vector4 {
        store(load(a).max(load(b)))
    }

    #[inline]
    fn dot(a: Vector4, b: Vector4) -> f32 {
        (load(a) * load(b)).reduce_add()
    }

    #[inline]
    fn cross(a: Vector4, b: Vector4) -> Vector4 {
        let a_yzx = f32x4::from([a.y, a.z, a.x, 0.0]);
        let a_zxy = f32x4::from([a.z, a.x, a.y, 0.0]);
        let b_yzx = f32x4::from([b.y, b.z, b.x, 0.0]);
        let b_zxy = f32x4::from([b.z, b.x, b.y, 0.0]);
        store(a_yzx * b_zxy - a_zxy * b_yzx)
    }

    #[inline]
    fn all_eq(a: Vector4, b: Vector4) -> bool {
        load(a).cmp_eq(load(b)).move_mask() == ALL_LANES
    }

    #[inline]
    fn all_gt(a: Vector4, b: Vector4) -> bool {
        load(a).cmp_gt(load(b)).move_mask() == ALL_LANES
    }

    #[inline]
    fn all_ge(a: Vector4, b: Vector4) -> bool {
        load(a).cmp_ge(load(b)).move_mask() == ALL_LANES
    }

    fn mat4_mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let cols = columns(a);
        from_columns([
            combine(&cols, b.col(0).to_array()),
            combine(&cols, b.col(1).to_array()),
            combine(&cols, b.col(2).to_array()),
            combine(&cols, b.col(3).to_array()),
        ])
    }

    fn mat4_add(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let (a, b) = (columns(a), columns(b));
        from_columns([a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]])
    }

    fn mat4_sub(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let (a, b) = (columns(a), columns(b));
        from_columns([a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]])
    }

    fn mat4_transpose(m: &Matrix4) -> Matrix4 {
        from_columns([
            f32x4::from(m.row(0).to_array()),
            f32x4::from(m.row(1).to_array()),
            f32x4::from(m.row(2).to_array()),
            f32x4::from(m.row(3).to_array()),
        ])
    }

    #[inline]
    fn mat4_mul_vector4(m: &Matrix4, v: Vector4) -> Vector4 {
        store(combine(&columns(m), v.to_array()))
    }

    #[inline]
    fn quat_mul(a: Quaternion, b: Quaternion) -> Quaternion {
        let signs = f32x4::from([1.0, 1.0, 1.0, -1.0]);
        let t1 = f32x4::splat(a.w) * f32x4::from([b.x, b.y, b.z, b.w]);
        let t2 = f32x4::from([a.x, a.y, a.z, a.x]) * f32x4::from([b.w, b.w, b.w, b.x]);
        let t3 = f32x4::from([a.y, a.z, a.x, a.y]) * f32x4::from([b.z, b.x, b.y, b.y]);
        let t4 = f32x4::from([a.z, a.x, a.y, a.z]) * f32x4::from([b.y, b.z, b.x, b.z]);
        let r = t1 + t2 * signs + t3 * signs - t4;
        Quaternion::from_vector4(store(r))
    }
}
