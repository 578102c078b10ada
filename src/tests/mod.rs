//! # Integration tests that require a look inside the crate.
mod problem_2;
