//! # Linearly dependent rows
//!
//! Two constraints whose augmented rows `[a_i | b_i]` are multiples of each other describe the same
//! hyperplane or half-space. Often, one of them can be removed.
use itertools::Itertools;
use log::debug;

use crate::data::linear_algebra::SparseTupleVec;
use crate::data::linear_program::elements::ConstraintType;
use crate::data::linear_program::general_form::presolve::{PresolveConfig, ReductionState};
use crate::data::linear_program::general_form::presolve::rule::significant_rows;
use crate::data::number_types::float::is_relatively_close;

/// Remove rows that are a multiple of another row.
///
/// For each pair of rows `i < k` with `row_k = ratio * row_i`, including the right-hand side:
///
/// * both equalities: the later row is removed
/// * an equality and an inequality: the inequality is removed
/// * two inequalities in the same direction, after accounting for the sign of `ratio`: the later
///   row is removed
/// * two inequalities in opposite directions: both are kept
///
/// Two equalities that are multiples of each other except for the right-hand side make the problem
/// infeasible.
pub fn remove_dependent_rows(mut state: ReductionState, config: &PresolveConfig) -> ReductionState {
    if state.is_terminal() {
        return state;
    }

    let epsilon = config.epsilon;
    let rows = significant_rows(&state.reduced, epsilon);
    let mut removed = vec![false; rows.len()];

    let candidates = (0..rows.len()).filter(|&i| !rows[i].is_empty()).collect::<Vec<_>>();
    for (i, k) in candidates.into_iter().tuple_combinations() {
        if removed[i] || removed[k] {
            continue;
        }

        let Some(ratio) = ratio(&rows[i], &rows[k], epsilon) else {
            continue;
        };

        let b = state.reduced.b();
        let right_hand_side_matches = is_relatively_close(b[k], ratio * b[i], epsilon);
        let relations = state.reduced.constraint_types();
        let (relation_i, relation_k) = (relations[i], relations[k]);
        // Relation of row k, written as a multiple of row i
        let relation_k = if ratio < 0_f64 { relation_k.mirrored() } else { relation_k };

        if !right_hand_side_matches {
            if relation_i == ConstraintType::Equal && relation_k == ConstraintType::Equal {
                let reason = format!(
                    "row {} is {} times row {} in its coefficients, but not in its right-hand side",
                    state.original_row(k), ratio, state.original_row(i),
                );
                state.mark_infeasible(&reason);
                return state;
            }
            continue;
        }

        let (remove, keep, factor) = match (relation_i, relation_k) {
            (ConstraintType::Equal, _) => (k, i, ratio),
            (_, ConstraintType::Equal) => (i, k, 1_f64 / ratio),
            (left, right) if left == right => (k, i, ratio),
            _ => continue,
        };

        state.record_ratio(remove, keep, factor);
        removed[remove] = true;
    }

    let rows_to_remove = removed.into_iter()
        .enumerate()
        .filter(|&(_, is_removed)| is_removed)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    if !rows_to_remove.is_empty() {
        debug!("Removing {} linearly dependent rows", rows_to_remove.len());
        state.remove(rows_to_remove, Vec::new());
    }

    state
}

/// Factor such that `other = ratio * row`, if it exists.
///
/// Both rows should be non-empty and contain only significant values, sorted by column.
fn ratio(row: &SparseTupleVec<f64>, other: &SparseTupleVec<f64>, epsilon: f64) -> Option<f64> {
    debug_assert!(!row.is_empty() && !other.is_empty());

    if row.len() != other.len() {
        return None;
    }

    let ratio = other[0].1 / row[0].1;
    let proportional = row.iter().zip(other)
        .all(|(&(j, value), &(l, other_value))| {
            j == l && is_relatively_close(other_value, ratio * value, epsilon)
        });

    proportional.then_some(ratio)
}
