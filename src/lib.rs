//! # A presolving linear program solver
//!
//! Linear programs are first reduced in size by a sequence of presolve rules, then brought into
//! standard form and solved with the revised Simplex method. The solution of the reduced problem is
//! mapped back to the variables of the original problem afterwards.
//!
//! The entry point for most users is `algorithm::solve_linear_program`.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod io;

#[cfg(test)]
mod tests;
