//! # Number types
//!
//! The solver computes with `f64` values; this module holds the comparisons that decide when a
//! computed value is treated as zero or as equal to another value.

pub mod float;
