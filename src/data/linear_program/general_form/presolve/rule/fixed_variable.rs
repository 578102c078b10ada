//! # Substitute fixed variables
//!
//! A variable with equal bounds has only one feasible value. It is substituted in the constraints,
//! which adapts the right-hand side, and its cost contribution moves to the constant of the
//! objective function.
use log::debug;

use crate::data::linear_program::general_form::presolve::{is_empty_row_feasible, PresolveConfig, ReductionState};
use crate::data::linear_program::general_form::presolve::rule::significant_rows;

/// Eliminate all variables whose bounds are within `epsilon` of each other.
///
/// After substitution, rows in which no significant coefficient remains are checked: if such a row
/// can not be satisfied the problem is infeasible, otherwise the row is removed.
pub fn eliminate_fixed_variables(mut state: ReductionState, config: &PresolveConfig) -> ReductionState {
    if state.is_terminal() {
        return state;
    }

    let epsilon = config.epsilon;
    let fixed = state.reduced.variables().iter()
        .enumerate()
        .filter_map(|(j, variable)| variable.is_fixed(epsilon).map(|value| (j, value)))
        .collect::<Vec<_>>();
    if fixed.is_empty() {
        return state;
    }
    debug!("Eliminating {} fixed variables", fixed.len());

    let mut is_fixed = vec![false; state.reduced.nr_variables()];
    for &(j, value) in &fixed {
        is_fixed[j] = true;
        state.fix_column(j, value);
    }

    // Rows that had coefficients before, but only for fixed variables
    let mut rows_to_remove = Vec::new();
    for (i, row) in significant_rows(&state.reduced, epsilon).into_iter().enumerate() {
        if !row.is_empty() && row.iter().all(|&(j, _)| is_fixed[j]) {
            let constraint_type = state.reduced.constraint_types()[i];
            let b = state.reduced.b()[i];
            if !is_empty_row_feasible(constraint_type, b, epsilon) {
                state.mark_infeasible(&format!(
                    "row {} reads 0 {:?} {} after substituting fixed variables",
                    state.original_row(i), constraint_type, b,
                ));
                return state;
            }
            rows_to_remove.push(i);
        }
    }

    let columns_to_remove = fixed.into_iter().map(|(j, _)| j).collect();
    state.remove(rows_to_remove, columns_to_remove);

    state
}
