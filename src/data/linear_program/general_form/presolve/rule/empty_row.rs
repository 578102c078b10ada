//! # Remove empty rows
//!
//! A row without coefficients reads `0 {==, <=, >=} b`. It is either satisfied by every point, in
//! which case it can be removed, or by none.
use log::debug;

use crate::data::linear_program::general_form::presolve::{is_empty_row_feasible, PresolveConfig, ReductionState};
use crate::data::linear_program::general_form::presolve::rule::significant_rows;

/// Remove all rows without significant coefficients, or detect infeasibility.
///
/// Variables are never touched by this rule.
pub fn remove_empty_rows(mut state: ReductionState, config: &PresolveConfig) -> ReductionState {
    if state.is_terminal() {
        return state;
    }

    let epsilon = config.epsilon;
    let mut rows_to_remove = Vec::new();
    for (i, row) in significant_rows(&state.reduced, epsilon).into_iter().enumerate() {
        if row.is_empty() {
            let constraint_type = state.reduced.constraint_types()[i];
            let b = state.reduced.b()[i];
            if !is_empty_row_feasible(constraint_type, b, epsilon) {
                state.mark_infeasible(&format!(
                    "empty row {} reads 0 {:?} {}", state.original_row(i), constraint_type, b,
                ));
                return state;
            }
            rows_to_remove.push(i);
        }
    }

    if !rows_to_remove.is_empty() {
        debug!("Removing {} empty rows", rows_to_remove.len());
        state.remove(rows_to_remove, Vec::new());
    }

    state
}
