//! # Representation of feasible solutions
//!
//! Once a linear program is fully solved, a solution is derived. This solution should contain also
//! any variables that were eliminated as part of a presolve process (fixed variables, variables that
//! don't interact with the rest of the problem, etc.).
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Represents a full (including presolved variables) solution to a linear program.
///
/// Should represent a solution that is feasible. This struct would probably be used to print the
/// optimal solution for the user.
#[derive(PartialEq, Debug, Clone)]
pub struct Solution {
    /// Value of the objective function for this solution, including any constant that was included
    /// in the original problem.
    pub objective_value: f64,
    /// (variable name, solution value) tuples for all variables, named and ordered as in the
    /// original problem.
    pub solution_values: Vec<(String, f64)>,
}

impl Solution {
    /// Create a new `Solution` instance.
    ///
    /// A plain constructor.
    pub fn new(objective_value: f64, solution_values: Vec<(String, f64)>) -> Self {
        Self {
            objective_value,
            solution_values,
        }
    }

    /// Value of a variable by name.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.solution_values.iter()
            .find(|(candidate, _)| candidate == name)
            .map(|&(_, value)| value)
    }

    /// Whether two solutions have the same objective value and variables, values within `tolerance`.
    ///
    /// Degenerate problems can have several optimal vertices, so the values themselves are only
    /// compared when `compare_values` is set.
    pub fn is_probably_equal_to(&self, other: &Self, tolerance: f64, compare_values: bool) -> bool {
        if (self.objective_value - other.objective_value).abs() > tolerance {
            return false;
        }

        if self.solution_values.len() != other.solution_values.len() {
            return false;
        }

        let other_map = other.solution_values.iter().cloned().collect::<HashMap<_, _>>();
        self.solution_values.iter().all(|(name, value)| {
            other_map.get(name).is_some_and(|other_value| {
                !compare_values || (value - other_value).abs() <= tolerance
            })
        })
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective value: {}", self.objective_value)?;
        for (name, value) in &self.solution_values {
            writeln!(f, "{:<20}{}", name, value)?;
        }

        Ok(())
    }
}
