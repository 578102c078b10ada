//! # Row singletons
//!
//! A constraint with a single coefficient is either a bound or fixes a variable. Removing it might
//! create new singleton rows, so these are collected in a queue and processed in the same pass.
use fifo_set::FIFOSet;
use log::{debug, trace};

use crate::data::linear_program::elements::{BoundDirection, ConstraintType};
use crate::data::linear_program::general_form::presolve::{is_empty_row_feasible, PresolveConfig, ReductionState};
use crate::data::linear_program::general_form::presolve::rule::significant_rows;

/// Eliminate all rows with a single significant coefficient.
///
/// * An equality `a x_j == r` fixes `x_j` at `r / a`, the variable is substituted and both the row
/// and column are removed.
/// * An inequality becomes a bound on `x_j` and the row is removed. The column stays.
///
/// The problem is infeasible when a fixed value lies outside the variable's bounds, when bounds
/// cross after tightening or when substitution leaves an empty row that can't be satisfied.
pub fn eliminate_row_singletons(mut state: ReductionState, config: &PresolveConfig) -> ReductionState {
    if state.is_terminal() {
        return state;
    }

    let epsilon = config.epsilon;
    let rows = significant_rows(&state.reduced, epsilon);
    let mut column_supports = vec![Vec::new(); state.reduced.nr_variables()];
    for (i, row) in rows.iter().enumerate() {
        for &(j, _) in row {
            column_supports[j].push(i);
        }
    }

    let mut remaining = rows.iter().map(Vec::len).collect::<Vec<_>>();
    let mut row_active = vec![true; rows.len()];
    let mut column_active = vec![true; column_supports.len()];
    let mut queue = remaining.iter()
        .enumerate()
        .filter(|&(_, &count)| count == 1)
        .map(|(i, _)| i)
        .collect::<FIFOSet<_>>();

    let mut rows_to_remove = Vec::new();
    let mut columns_to_remove = Vec::new();
    while let Some(i) = queue.pop() {
        if !row_active[i] || remaining[i] != 1 {
            continue;
        }

        let (j, coefficient) = rows[i].iter()
            .copied()
            .find(|&(j, _)| column_active[j])
            .expect("the remaining count of the row is one");
        let ratio = state.reduced.b()[i] / coefficient;
        row_active[i] = false;
        rows_to_remove.push(i);

        match state.reduced.constraint_types()[i] {
            ConstraintType::Equal => {
                let variable = &state.reduced.variables()[j];
                let (lower, upper) = (variable.lower_bound, variable.upper_bound);
                if ratio < lower - epsilon || ratio > upper + epsilon {
                    let reason = format!(
                        "row {} fixes \"{}\" at {}, outside of [{}, {}]",
                        state.original_row(i), variable.name, ratio, lower, upper,
                    );
                    state.mark_infeasible(&reason);
                    return state;
                }

                state.fix_column(j, ratio.clamp(lower, upper));
                column_active[j] = false;
                columns_to_remove.push(j);

                for &k in &column_supports[j] {
                    if !row_active[k] {
                        continue;
                    }

                    remaining[k] -= 1;
                    match remaining[k] {
                        0 => {
                            let constraint_type = state.reduced.constraint_types()[k];
                            let b = state.reduced.b()[k];
                            if !is_empty_row_feasible(constraint_type, b, epsilon) {
                                state.mark_infeasible(&format!(
                                    "row {} reads 0 {:?} {} after substitution",
                                    state.original_row(k), constraint_type, b,
                                ));
                                return state;
                            }
                            row_active[k] = false;
                            rows_to_remove.push(k);
                        },
                        1 => queue.push(k),
                        _ => {},
                    }
                }
            },
            constraint_type => {
                let direction = match (constraint_type, coefficient > 0_f64) {
                    (ConstraintType::Less, true) | (ConstraintType::Greater, false) => BoundDirection::Upper,
                    _ => BoundDirection::Lower,
                };

                let original_row = state.original_row(i);
                let variable = &mut state.reduced.variables_mut()[j];
                match direction {
                    BoundDirection::Lower => if ratio > variable.lower_bound {
                        trace!("Tightening lower bound of \"{}\" to {}", variable.name, ratio);
                        variable.lower_bound = ratio;
                    },
                    BoundDirection::Upper => if ratio < variable.upper_bound {
                        trace!("Tightening upper bound of \"{}\" to {}", variable.name, ratio);
                        variable.upper_bound = ratio;
                    },
                }

                if variable.lower_bound > variable.upper_bound + epsilon {
                    let reason = format!(
                        "bounds of \"{}\" cross after row {}: [{}, {}]",
                        variable.name, original_row, variable.lower_bound, variable.upper_bound,
                    );
                    // Keep the problem consistent, it is not solved anymore
                    match direction {
                        BoundDirection::Lower => variable.lower_bound = variable.upper_bound,
                        BoundDirection::Upper => variable.upper_bound = variable.lower_bound,
                    }
                    state.mark_infeasible(&reason);
                    return state;
                } else if variable.lower_bound > variable.upper_bound {
                    // Crossed within tolerance: the variable is fixed
                    match direction {
                        BoundDirection::Lower => variable.lower_bound = variable.upper_bound,
                        BoundDirection::Upper => variable.upper_bound = variable.lower_bound,
                    }
                }
            },
        }
    }

    if !rows_to_remove.is_empty() {
        debug!(
            "Removing {} rows and {} columns as row singletons",
            rows_to_remove.len(), columns_to_remove.len(),
        );
        state.remove(rows_to_remove, columns_to_remove);
    }

    state
}
