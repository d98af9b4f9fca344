//! Dispatch backend identifiers and detection.
//!
//! Every hot kernel operation exists in up to four implementations. Which ones
//! are compiled in depends only on the target (`target_arch` and
//! `target_feature`), so availability is known at compile time:
//!
//! | backend    | compiled when                                   |
//! |------------|-------------------------------------------------|
//! | `scalar`   | always                                          |
//! | `portable` | always (4-lane SIMD through `wide`)             |
//! | `sse`      | x86 / x86_64 with `sse2`                        |
//! | `neon`     | aarch64 with `neon`                             |

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Implementation strategy for the kernel's hot operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Use whatever the crate features selected at compile time.
    #[default]
    Auto,
    /// Plain scalar code.
    Scalar,
    /// Portable 4-lane SIMD (`wide::f32x4`).
    Portable,
    /// x86 SSE2 intrinsics.
    Sse,
    /// aarch64 NEON intrinsics.
    Neon,
}

impl Backend {
    /// All concrete backends, in ascending preference.
    pub const CONCRETE: [Backend; 4] = [Self::Scalar, Self::Portable, Self::Sse, Self::Neon];

    /// Returns true if this backend is compiled into the current build.
    pub const fn is_compiled(self) -> bool {
        match self {
            Self::Auto | Self::Scalar | Self::Portable => true,
            Self::Sse => cfg!(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "sse2"
            )),
            Self::Neon => cfg!(all(target_arch = "aarch64", target_feature = "neon")),
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Scalar => "scalar",
            Self::Portable => "portable",
            Self::Sse => "sse",
            Self::Neon => "neon",
        }
    }

    /// Returns an error unless the backend is compiled.
    pub fn ensure_compiled(self) -> Result<Self> {
        if self.is_compiled() {
            Ok(self)
        } else {
            Err(Error::BackendUnavailable(self))
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "scalar" | "fallback" => Ok(Self::Scalar),
            "portable" | "wide" => Ok(Self::Portable),
            "sse" | "sse2" => Ok(Self::Sse),
            "neon" => Ok(Self::Neon),
            other => Err(Error::UnknownBackend(other.to_string())),
        }
    }
}

/// Information about a dispatch backend.
#[derive(Debug, Clone)]
pub struct BackendInfo {
    /// Backend type.
    pub backend: Backend,
    /// Whether the backend is compiled in.
    pub compiled: bool,
    /// Priority for selection (higher = preferred).
    pub priority: u32,
    /// Description.
    pub description: &'static str,
}

/// Lists all concrete backends, highest priority first.
pub fn detect_backends() -> Vec<BackendInfo> {
    let mut backends: Vec<BackendInfo> = Backend::CONCRETE
        .iter()
        .map(|&backend| {
            let compiled = backend.is_compiled();
            let (base, description) = match backend {
                Backend::Scalar => (10, "scalar reference implementation"),
                Backend::Portable => (50, "portable 4-lane SIMD via wide"),
                Backend::Sse => (100, "x86 SSE2 intrinsics"),
                Backend::Neon => (100, "aarch64 NEON intrinsics"),
                Backend::Auto => (0, ""),
            };
            BackendInfo {
                backend,
                compiled,
                priority: if compiled { base } else { 0 },
                description,
            }
        })
        .collect();

    backends.sort_by(|a, b| b.priority.cmp(&a.priority));
    backends
}

/// Highest-priority compiled backend.
pub fn select_best_backend() -> Backend {
    detect_backends()
        .into_iter()
        .filter(|b| b.compiled)
        .max_by_key(|b| b.priority)
        .map(|b| b.backend)
        .unwrap_or(Backend::Scalar)
}

/// Human-readable summary of the backends, one per line.
pub fn describe_backends() -> String {
    let mut desc = String::new();

    for info in detect_backends() {
        let status = if info.compiled { "+" } else { "-" };
        desc.push_str(&format!("[{}] {}: {}\n", status, info.backend, info.description));
    }

    desc
}
