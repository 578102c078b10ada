//! # Empty columns
//!
//! A variable that appears in no constraint can be set to its best bound independently of all other
//! variables.
use log::debug;

use crate::data::linear_program::general_form::presolve::{PresolveConfig, ReductionState};

/// Eliminate all columns without significant coefficients.
///
/// The cost, corrected for the direction of optimization, decides the value:
///
/// * positive: the lower bound
/// * negative: the upper bound
/// * zero: any bound that is finite, or zero if the variable is free
///
/// When the preferred bound is infinite, the problem is unbounded (unless it is infeasible, which
/// presolve doesn't detect here).
pub fn eliminate_empty_columns(mut state: ReductionState, config: &PresolveConfig) -> ReductionState {
    if state.is_terminal() {
        return state;
    }

    let epsilon = config.epsilon;
    let sign = state.reduced.objective().sign();
    let constraints = state.reduced.constraints();
    let empty = (0..state.reduced.nr_variables())
        .filter(|&j| constraints.column(j).iter().all(|&(_, value)| value.abs() < epsilon))
        .collect::<Vec<_>>();
    if empty.is_empty() {
        return state;
    }
    debug!("Eliminating {} empty columns", empty.len());

    for &j in &empty {
        let variable = &state.reduced.variables()[j];
        let effective_cost = sign * variable.cost;
        let (lower, upper) = (variable.lower_bound, variable.upper_bound);

        let value = if effective_cost > epsilon {
            lower
        } else if effective_cost < -epsilon {
            upper
        } else if lower.is_finite() {
            lower
        } else if upper.is_finite() {
            upper
        } else {
            0_f64
        };

        if !value.is_finite() {
            let reason = format!(
                "variable \"{}\" appears in no constraint and its cost {} can be improved without limit",
                variable.name, variable.cost,
            );
            state.mark_unbounded(&reason);
            return state;
        }

        state.fix_column(j, value);
    }

    state.remove(Vec::new(), empty);

    state
}
