//! # Algorithms
//!
//! The full pipeline to solve a linear program: presolve, conversion to standard form, the Simplex
//! method and translation of the solution back to the original variables.
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

use log::{error, info};

use crate::algorithm::simplex::{OptimizationResult, solve, SolverConfig, SolverError};
use crate::data::linear_program::elements::LinearProgramType;
use crate::data::linear_program::general_form::LinearProgram;
use crate::data::linear_program::general_form::presolve::{postsolve, presolve, PostsolveError, PresolveConfig};
use crate::data::linear_program::solution::Solution;
use crate::data::linear_program::standard_form::StandardForm;

pub mod simplex;

/// Settings of all stages of the solve pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Settings of the presolve rules.
    pub presolve: PresolveConfig,
    /// Settings of the Simplex method.
    pub solver: SolverConfig,
}

/// Internal failure of one of the stages of the solve pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The Simplex method failed.
    Solver(SolverError),
    /// The solution of the reduced problem didn't match the presolve reductions.
    Postsolve(PostsolveError),
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Solver(error) => write!(f, "SolveError: {}", error),
            SolveError::Postsolve(error) => write!(f, "SolveError: {}", error),
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolveError::Solver(error) => Some(error),
            SolveError::Postsolve(error) => Some(error),
        }
    }
}

impl From<SolverError> for SolveError {
    fn from(error: SolverError) -> Self {
        SolveError::Solver(error)
    }
}

impl From<PostsolveError> for SolveError {
    fn from(error: PostsolveError) -> Self {
        SolveError::Postsolve(error)
    }
}

/// Solve a linear program.
///
/// The problem is presolved (unless disabled), brought into standard form and solved with the
/// Simplex method. Problems that presolve solves completely never reach the Simplex method.
///
/// # Return value
///
/// Whether the problem is feasible, and if so, a solution if the problem is bounded. The objective
/// value of a solution is evaluated on `linear_program` itself.
///
/// # Errors
///
/// Only in case of an internal failure, such as a singular basis.
pub fn solve_linear_program(linear_program: LinearProgram, config: &Config) -> Result<LinearProgramType, SolveError> {
    info!(
        "Solving a problem with {} constraints and {} variables",
        linear_program.nr_constraints(), linear_program.nr_variables(),
    );

    let state = presolve(linear_program, &config.presolve);
    if state.is_infeasible() {
        return Ok(LinearProgramType::Infeasible);
    }
    if state.is_unbounded() {
        return Ok(LinearProgramType::Unbounded);
    }

    let reduced = state.reduced();
    let reduced_values = if reduced.nr_variables() == 0 {
        info!("Presolve solved the problem");
        if !reduced.is_feasible(&[], config.presolve.epsilon) {
            info!("Remaining constraints without variables are violated");
            return Ok(LinearProgramType::Infeasible);
        }
        HashMap::new()
    } else {
        let standard_form = StandardForm::new(reduced);
        match solve(standard_form.linear_program(), &config.solver)? {
            OptimizationResult::FiniteOptimum { values, objective } => {
                info!("Reduced problem has optimum {}", standard_form.objective_value(objective));
                standard_form.recover(&values)
            },
            OptimizationResult::Infeasible => return Ok(LinearProgramType::Infeasible),
            OptimizationResult::Unbounded => return Ok(LinearProgramType::Unbounded),
            OptimizationResult::IterationLimitExceeded => return Ok(LinearProgramType::IterationLimitExceeded),
        }
    };

    let values = postsolve(&state, &reduced_values).inspect_err(|error| {
        error!("Could not combine the reduced solution with the reductions: {}", error);
    })?;
    let x = values.iter().map(|&(_, value)| value).collect::<Vec<_>>();
    let objective_value = state.original().objective_value(&x);
    info!("Optimal objective value {}", objective_value);

    Ok(LinearProgramType::FiniteOptimum(Solution::new(objective_value, values)))
}
