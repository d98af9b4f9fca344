//! Error types for glk operations.
//!
//! The math kernel itself is total: normalizing a zero vector, dividing by
//! zero or projecting onto a zero vector all propagate IEEE-754 special
//! values instead of failing. [`Error`] only covers the fallible edges of the
//! API:
//!
//! - building a vector, matrix or quaternion from a slice of the wrong length
//! - reinterpreting a raw float buffer with the wrong length or alignment
//! - parsing or selecting a dispatch backend
//!
//! # Usage
//!
//! ```rust
//! use glk_core::{Error, Result};
//!
//! fn take_three(values: &[f32]) -> Result<[f32; 3]> {
//!     values.try_into().map_err(|_| Error::LengthMismatch {
//!         expected: 3,
//!         actual: values.len(),
//!     })
//! }
//!
//! assert!(take_three(&[1.0, 2.0]).is_err());
//! ```

use thiserror::Error;

use crate::Backend;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the fallible parts of the glk API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A slice did not hold the number of floats the target type needs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glk_core::Error;
    ///
    /// let err = Error::LengthMismatch { expected: 16, actual: 9 };
    /// assert!(err.to_string().contains("16"));
    /// ```
    #[error("expected {expected} floats, got {actual}")]
    LengthMismatch {
        /// Number of floats required
        expected: usize,
        /// Number of floats supplied
        actual: usize,
    },

    /// A raw float buffer could not be viewed as a slice of vectors.
    ///
    /// Happens when the length is not a multiple of the vector width or the
    /// buffer start is not aligned for the target type.
    #[error("buffer of {len} floats cannot be viewed as [{target}]: {reason}")]
    BufferLayout {
        /// Buffer length in floats
        len: usize,
        /// Target element type name
        target: &'static str,
        /// Cast failure description
        reason: String,
    },

    /// A backend name could not be parsed.
    #[error("unknown backend '{0}' (expected auto, scalar, portable, sse or neon)")]
    UnknownBackend(String),

    /// The requested backend is not compiled into this build.
    #[error("backend '{0}' is not available on this target")]
    BackendUnavailable(Backend),
}
