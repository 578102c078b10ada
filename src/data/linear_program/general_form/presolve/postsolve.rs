//! # Postsolve
//!
//! Combine the values found for the reduced problem with the values that presolve fixed, to get a
//! value for every variable of the original problem.
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

use log::error;

use crate::data::linear_program::general_form::presolve::ReductionState;

/// The values that were provided can't be combined with the reductions.
///
/// This indicates an internal error: the reduced solution doesn't belong to the reduced problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostsolveError {
    /// A variable received a value both from presolve and from the reduced solution.
    Collision(String),
    /// A variable of the original problem received no value.
    Missing(String),
    /// The reduced solution contains a variable that is not in the original problem.
    Unknown(String),
}

impl Display for PostsolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PostsolveError::Collision(name) => write!(f, "PostsolveError: variable \"{}\" was both eliminated and solved for", name),
            PostsolveError::Missing(name) => write!(f, "PostsolveError: no value for variable \"{}\"", name),
            PostsolveError::Unknown(name) => write!(f, "PostsolveError: unknown variable \"{}\"", name),
        }
    }
}

impl Error for PostsolveError {}

/// Assign a value to every variable of the original problem.
///
/// # Arguments
///
/// * `state`: Result of presolving the original problem.
/// * `reduced_values`: Values of the variables of the reduced problem, by name.
///
/// # Return value
///
/// A `(name, value)` pair for each variable of the original problem, in the original column order.
///
/// # Errors
///
/// If a variable is assigned a value twice or not at all, or if `reduced_values` contains names
/// that are not in the original problem.
pub fn postsolve(
    state: &ReductionState,
    reduced_values: &HashMap<String, f64>,
) -> Result<Vec<(String, f64)>, PostsolveError> {
    let original = state.original();
    let original_names = original.names().collect::<HashSet<_>>();
    if let Some(name) = reduced_values.keys().find(|&name| !original_names.contains(name.as_str())) {
        error!("Reduced solution contains unknown variable \"{}\"", name);
        return Err(PostsolveError::Unknown(name.clone()));
    }

    original.names()
        .map(|name| {
            match (state.fixed_values().get(name), reduced_values.get(name)) {
                (Some(&value), None) | (None, Some(&value)) => Ok((name.to_string(), value)),
                (Some(_), Some(_)) => {
                    error!("Variable \"{}\" was both eliminated and solved for", name);
                    Err(PostsolveError::Collision(name.to_string()))
                },
                (None, None) => {
                    error!("No value for variable \"{}\"", name);
                    Err(PostsolveError::Missing(name.to_string()))
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::data::linear_program::elements::{ConstraintType, Objective};
    use crate::data::linear_program::general_form::presolve::{eliminate_fixed_variables, postsolve, PostsolveError};
    use crate::data::linear_program::general_form::presolve::{PresolveConfig, ReductionState};
    use crate::data::linear_program::general_form::test::create;
    use crate::data::linear_program::general_form::Variable;

    fn fixed_first() -> ReductionState {
        let linear_program = create(
            Objective::Minimize,
            &[vec![1_f64, 1_f64]],
            vec![ConstraintType::Less],
            vec![4_f64],
            vec![
                Variable::new("x", 1_f64).with_bounds(1_f64, 1_f64),
                Variable::new("y", -1_f64),
            ],
        );

        eliminate_fixed_variables(ReductionState::new(linear_program), &PresolveConfig::default())
    }

    #[test]
    fn combine() {
        let state = fixed_first();
        let reduced = [("y".to_string(), 3_f64)].into_iter().collect::<HashMap<_, _>>();

        assert_eq!(
            postsolve(&state, &reduced),
            Ok(vec![("x".to_string(), 1_f64), ("y".to_string(), 3_f64)]),
        );
    }

    #[test]
    fn errors() {
        let state = fixed_first();

        let collision = [("x".to_string(), 1_f64), ("y".to_string(), 3_f64)].into_iter().collect();
        assert_eq!(postsolve(&state, &collision), Err(PostsolveError::Collision("x".to_string())));

        assert_eq!(postsolve(&state, &HashMap::new()), Err(PostsolveError::Missing("y".to_string())));

        let unknown = [("y".to_string(), 3_f64), ("z".to_string(), 0_f64)].into_iter().collect();
        assert_eq!(postsolve(&state, &unknown), Err(PostsolveError::Unknown("z".to_string())));
    }
}
