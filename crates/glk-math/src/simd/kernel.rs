//! Function-pointer tables over the compiled backends.
//!
//! A [`Kernel`] is a snapshot of one [`SimdBackend`] implementation as plain
//! function pointers, so the strategy can be chosen at runtime without
//! branching inside the operations.
//!
//! ```rust
//! use glk_math::simd::Kernel;
//! use glk_math::Vector4;
//!
//! for kernel in Kernel::compiled() {
//!     let d = (kernel.dot)(Vector4::ONE, Vector4::ONE);
//!     assert_eq!(d, 4.0);
//! }
//! ```

use std::fmt;
use std::sync::OnceLock;

use glk_core::{Backend, Error, KernelConfig, Result};
use tracing::{debug, warn};

use super::{Active, Portable, Scalar, SimdBackend};
use crate::{Matrix4, Quaternion, Vector4};

type Binary = fn(Vector4, Vector4) -> Vector4;
type Predicate = fn(Vector4, Vector4) -> bool;
type MatBinary = fn(&Matrix4, &Matrix4) -> Matrix4;

/// Dispatch table for one backend.
#[derive(Clone, Copy)]
pub struct Kernel {
    /// Backend the pointers belong to.
    pub backend: Backend,
    /// Lane-wise sum.
    pub add: Binary,
    /// Lane-wise difference.
    pub sub: Binary,
    /// Lane-wise product.
    pub mul: Binary,
    /// Lane-wise quotient.
    pub div: Binary,
    /// Multiply every lane by a scalar.
    pub scale: fn(Vector4, f32) -> Vector4,
    /// Lane-wise minimum.
    pub min: Binary,
    /// Lane-wise maximum.
    pub max: Binary,
    /// Dot product.
    pub dot: fn(Vector4, Vector4) -> f32,
    /// Cross product of xyz, zero w.
    pub cross: Binary,
    /// All lanes equal.
    pub all_eq: Predicate,
    /// All lanes greater.
    pub all_gt: Predicate,
    /// All lanes greater or equal.
    pub all_ge: Predicate,
    /// Euclidean length.
    pub length: fn(Vector4) -> f32,
    /// Unit-length vector (NaN for zero input).
    pub normalize: fn(Vector4) -> Vector4,
    /// Unclamped linear interpolation.
    pub lerp: fn(Vector4, Vector4, f32) -> Vector4,
    /// Projection of the first vector onto the second.
    pub project: Binary,
    /// Matrix product.
    pub mat4_mul: MatBinary,
    /// Matrix sum.
    pub mat4_add: MatBinary,
    /// Matrix difference.
    pub mat4_sub: MatBinary,
    /// Matrix transpose.
    pub mat4_transpose: fn(&Matrix4) -> Matrix4,
    /// Matrix times homogeneous vector.
    pub mat4_mul_vector4: fn(&Matrix4, Vector4) -> Vector4,
    /// Hamilton product.
    pub quat_mul: fn(Quaternion, Quaternion) -> Quaternion,
    /// Quaternion length.
    pub quat_length: fn(Quaternion) -> f32,
    /// Unit quaternion.
    pub quat_normalize: fn(Quaternion) -> Quaternion,
    /// Conjugate.
    pub quat_conjugate: fn(Quaternion) -> Quaternion,
    /// Inverse.
    pub quat_invert: fn(Quaternion) -> Quaternion,
}

macro_rules! kernel_table {
    ($b:ty) => {
        Kernel {
            backend: <$b as SimdBackend>::BACKEND,
            add: <$b as SimdBackend>::add,
            sub: <$b as SimdBackend>::sub,
            mul: <$b as SimdBackend>::mul,
            div: <$b as SimdBackend>::div,
            scale: <$b as SimdBackend>::scale,
            min: <$b as SimdBackend>::min,
            max: <$b as SimdBackend>::max,
            dot: <$b as SimdBackend>::dot,
            cross: <$b as SimdBackend>::cross,
            all_eq: <$b as SimdBackend>::all_eq,
            all_gt: <$b as SimdBackend>::all_gt,
            all_ge: <$b as SimdBackend>::all_ge,
            length: <$b as SimdBackend>::length,
            normalize: <$b as SimdBackend>::normalize,
            lerp: <$b as SimdBackend>::lerp,
            project: <$b as SimdBackend>::project,
            mat4_mul: <$b as SimdBackend>::mat4_mul,
            mat4_add: <$b as SimdBackend>::mat4_add,
            mat4_sub: <$b as SimdBackend>::mat4_sub,
            mat4_transpose: <$b as SimdBackend>::mat4_transpose,
            mat4_mul_vector4: <$b as SimdBackend>::mat4_mul_vector4,
            quat_mul: <$b as SimdBackend>::quat_mul,
            quat_length: <$b as SimdBackend>::quat_length,
            quat_normalize: <$b as SimdBackend>::quat_normalize,
            quat_conjugate: <$b as SimdBackend>::quat_conjugate,
            quat_invert: <$b as SimdBackend>::quat_invert,
        }
    };
}

static SCALAR: Kernel = kernel_table!(Scalar);
static PORTABLE: Kernel = kernel_table!(Portable);
static ACTIVE: Kernel = kernel_table!(Active);

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
static SSE: Kernel = kernel_table!(super::Sse);

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
static NEON: Kernel = kernel_table!(super::Neon);

static GLOBAL: OnceLock<&'static Kernel> = OnceLock::new();

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl Kernel {
    /// The scalar reference table.
    pub fn scalar() -> &'static Kernel {
        &SCALAR
    }

    /// The table matching the compile-time [`Active`] backend.
    pub fn active() -> &'static Kernel {
        &ACTIVE
    }

    /// Table for a specific backend.
    ///
    /// `Backend::Auto` resolves to [`Kernel::active`].
    pub fn get(backend: Backend) -> Result<&'static Kernel> {
        match backend {
            Backend::Auto => Ok(Self::active()),
            Backend::Scalar => Ok(&SCALAR),
            Backend::Portable => Ok(&PORTABLE),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
            Backend::Sse => Ok(&SSE),
            #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
            Backend::Neon => Ok(&NEON),
            #[allow(unreachable_patterns)]
            other => Err(Error::BackendUnavailable(other)),
        }
    }

    /// Every table compiled into this build, scalar first.
    pub fn compiled() -> Vec<&'static Kernel> {
        Backend::CONCRETE
            .iter()
            .filter_map(|&b| Self::get(b).ok())
            .collect()
    }

    /// Table requested by `config`, falling back to [`Kernel::active`] when
    /// the requested backend is not compiled.
    pub fn select(config: &KernelConfig) -> &'static Kernel {
        Self::get(config.backend).unwrap_or_else(|err| {
            warn!(%err, fallback = %Self::active().backend, "kernel backend unavailable");
            Self::active()
        })
    }

    /// Process-wide table, selected once from `GLK_BACKEND`.
    pub fn global() -> &'static Kernel {
        GLOBAL.get_or_init(|| {
            let config = KernelConfig::from_env();
            let kernel = Self::select(&config);
            debug!(requested = %config.backend, selected = %kernel.backend, "kernel selected");
            kernel
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_table() {
        let k = Kernel::scalar();
        assert_eq!(k.backend, Backend::Scalar);
        assert_eq!((k.dot)(Vector4::ONE, Vector4::splat(2.0)), 8.0);
    }

    #[test]
    fn test_active_table_matches_alias() {
        assert_eq!(Kernel::active().backend, <Active as SimdBackend>::BACKEND);
        assert_eq!(Kernel::get(Backend::Auto).unwrap().backend, Kernel::active().backend);
    }

    #[test]
    fn test_compiled_tables() {
        let compiled = Kernel::compiled();
        assert!(compiled.len() >= 2);
        assert_eq!(compiled[0].backend, Backend::Scalar);
        for k in compiled {
            assert!(k.backend.is_compiled());
        }
    }

    #[test]
    fn test_unavailable_backend() {
        for backend in Backend::CONCRETE {
            assert_eq!(Kernel::get(backend).is_ok(), backend.is_compiled());
        }
    }

    #[test]
    fn test_select_falls_back() {
        let native_missing = if Backend::Sse.is_compiled() { Backend::Neon } else { Backend::Sse };
        let k = Kernel::select(&KernelConfig::with_backend(native_missing));
        assert_eq!(k.backend, Kernel::active().backend);

        let k = Kernel::select(&KernelConfig::with_backend(Backend::Scalar));
        assert_eq!(k.backend, Backend::Scalar);
    }

    #[test]
    fn test_global_is_stable() {
        let a = Kernel::global();
        let b = Kernel::global();
        assert!(std::ptr::eq(a, b));
    }
}
