//! # Linear algebra primitives
//!
//! Sparse storage of constraint data, and a builder to assemble it in a single pass.

pub mod matrix;

/// A value with an index attached, as stored in sparse vectors and matrix columns.
pub type SparseTuple<F> = (usize, F);
/// Sparse vector data, sorted by index, without explicit zeros.
pub type SparseTupleVec<F> = Vec<SparseTuple<F>>;
