//! # Presolving rules
//!
//! These rules, one per submodule, can be applied to simplify a linear program. Each rule is a
//! function from `ReductionState` to `ReductionState` and can be applied on its own; applying a
//! rule twice in a row has the same effect as applying it once.
use crate::data::linear_algebra::SparseTupleVec;
use crate::data::linear_program::general_form::LinearProgram;

pub(super) mod dependent_row;
pub(super) mod empty_column;
pub(super) mod empty_row;
pub(super) mod fixed_variable;
pub(super) mod row_singleton;

/// Row major copy of the constraint matrix without the coefficients that are treated as zero.
///
/// # Return value
///
/// For each row, `(column, value)` tuples with `|value| >= epsilon`, sorted by column.
fn significant_rows(linear_program: &LinearProgram, epsilon: f64) -> Vec<SparseTupleVec<f64>> {
    let mut rows = linear_program.constraints().row_major();
    for row in &mut rows {
        row.retain(|&(_, value)| value.abs() >= epsilon);
    }

    rows
}
