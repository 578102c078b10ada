//! # Strategies
//!
//! Decisions the Simplex method can make in different ways.
pub mod pivot_rule;
