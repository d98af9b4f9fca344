//! # glk-core
//!
//! Foundation types shared by the glk crates.
//!
//! - [`Error`], [`Result`] - failures of the fallible API edges (slice
//!   conversion, buffer views, backend selection)
//! - [`Backend`], [`BackendInfo`] - identifiers for the kernel's dispatch
//!   strategies and their compile-time availability
//! - [`KernelConfig`] - runtime configuration read from the environment
//!
//! ## Crate Structure
//!
//! ```text
//! glk-core (this crate)
//!    ^
//!    |
//!    +-- glk-math (vectors, matrices, quaternions, SIMD dispatch)
//!    +-- glk-tests (property suite)
//!    +-- glk-bench (criterion benchmarks)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backend;
pub mod config;
pub mod error;

pub use backend::{Backend, BackendInfo, describe_backends, detect_backends, select_best_backend};
pub use config::{BACKEND_ENV, KernelConfig, backend_override};
pub use error::{Error, Result};
