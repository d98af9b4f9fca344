//! Kernel configuration and environment overrides.
//!
//! # Environment Variables
//!
//! - `GLK_BACKEND` - Force a dispatch backend (`auto`, `scalar`, `portable`,
//!   `sse`, `neon`) for the globally selected kernel table

use std::env;

use tracing::warn;

use crate::Backend;

/// Environment variable naming the backend override.
pub const BACKEND_ENV: &str = "GLK_BACKEND";

/// Runtime configuration for kernel table selection.
///
/// The type methods of `glk-math` always use the backend fixed by crate
/// features; this configuration only drives the explicit function-pointer
/// table (`Kernel::select` / `Kernel::global`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelConfig {
    /// Requested backend.
    pub backend: Backend,
}

impl KernelConfig {
    /// Configuration requesting a specific backend.
    pub const fn with_backend(backend: Backend) -> Self {
        Self { backend }
    }

    /// Reads the configuration from the environment.
    ///
    /// Unparseable values are logged and treated as `auto`.
    pub fn from_env() -> Self {
        Self::from_override(backend_override().as_deref())
    }

    /// Builds a configuration from an optional override string.
    ///
    /// ```rust
    /// use glk_core::{Backend, KernelConfig};
    ///
    /// assert_eq!(KernelConfig::from_override(Some("scalar")).backend, Backend::Scalar);
    /// assert_eq!(KernelConfig::from_override(Some("bogus")).backend, Backend::Auto);
    /// assert_eq!(KernelConfig::from_override(None).backend, Backend::Auto);
    /// ```
    pub fn from_override(value: Option<&str>) -> Self {
        let backend = match value {
            None => Backend::Auto,
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(value = raw, %err, "ignoring {}", BACKEND_ENV);
                Backend::Auto
            }),
        };
        Self { backend }
    }
}

/// Get backend override from environment.
pub fn backend_override() -> Option<String> {
    env::var(BACKEND_ENV).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto() {
        assert_eq!(KernelConfig::default().backend, Backend::Auto);
    }

    #[test]
    fn test_from_override() {
        assert_eq!(KernelConfig::from_override(Some("NEON")).backend, Backend::Neon);
        assert_eq!(KernelConfig::from_override(Some("portable")).backend, Backend::Portable);
        assert_eq!(KernelConfig::from_override(Some("x87")).backend, Backend::Auto);
    }

    #[test]
    fn test_with_backend() {
        let cfg = KernelConfig::with_backend(Backend::Sse);
        assert_eq!(cfg.backend, Backend::Sse);
    }
}
