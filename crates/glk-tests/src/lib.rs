//! Integration tests for GLK-RS crates.
//!
//! This crate checks the math kernel end to end: the algebraic laws that
//! hold for every compiled dispatch backend, agreement of each backend with
//! the scalar reference, and agreement with `glam` as an independent oracle.
