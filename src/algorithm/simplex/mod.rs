//! # The Simplex algorithm
//!
//! A revised Simplex method for linear programs in standard form, using the two phase method to
//! find an initial basic feasible solution. The algorithm is implemented as described in chapters
//! 2 and 4 of Combinatorial Optimization, a book by Christos H. Papadimitriou and Kenneth
//! Steiglitz.
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

use log::{debug, error, info, trace};

use crate::algorithm::simplex::phase_one::FeasibilityResult;
use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, PivotRule, SteepestDescentAlongVariable};
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::general_form::LinearProgram;

pub mod lower_upper;
pub mod strategy;
mod phase_one;
mod phase_two;
mod tableau;

/// Which pivot rule selects the entering column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotRuleKind {
    /// Most negative relative cost.
    #[default]
    Dantzig,
    /// Lowest index with a negative relative cost. Never cycles.
    Bland,
}

/// Settings of the Simplex method.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Relative costs above `-optimality_tolerance` are treated as non-negative, and values below
    /// it as zero in the ratio test.
    pub optimality_tolerance: f64,
    /// Total number of iterations of both phases together.
    pub max_iterations: usize,
    /// Rule to select the entering column.
    pub pivot_rule: PivotRuleKind,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            optimality_tolerance: 1e-10,
            max_iterations: 1000,
            pivot_rule: PivotRuleKind::default(),
        }
    }
}

/// A linear program is either infeasible, unbounded or has a finite optimum.
///
/// This is determined as the result of an algorithm, which can also run out of iterations.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationResult {
    /// An optimal solution was found.
    FiniteOptimum {
        /// Value of each column, by name.
        values: HashMap<String, f64>,
        /// Objective value, including the constant.
        objective: f64,
    },
    /// Phase one ended with a positive artificial cost.
    Infeasible,
    /// An improving column can be increased without limit.
    Unbounded,
    /// The iteration budget ran out.
    IterationLimitExceeded,
}

/// Failures of the Simplex method that are not a property of the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    /// The input is not a minimization problem with equality constraints and non-negative
    /// variables without upper bound.
    NotInStandardForm,
    /// The basis matrix could not be factorized.
    SingularBasis,
}

impl Display for SolverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::NotInStandardForm => f.write_str("SolverError: problem is not in standard form"),
            SolverError::SingularBasis => f.write_str("SolverError: basis matrix is singular"),
        }
    }
}

impl Error for SolverError {}

/// Outcome of running the Simplex iterations with one cost vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Optimal,
    Unbounded,
    IterationLimitExceeded,
}

/// Solve a linear program in standard form.
///
/// # Arguments
///
/// * `linear_program`: Minimization problem with only equality constraints, and variables with
/// lower bound zero and no upper bound.
/// * `config`: Tolerance, iteration budget and pivot rule.
///
/// # Return value
///
/// Whether the problem is feasible, and if so, a solution if the problem is bounded. The objective
/// value is that of `linear_program`, including its constant.
///
/// # Errors
///
/// If the problem is not in standard form, or a basis matrix turns out to be singular.
pub fn solve(linear_program: &LinearProgram, config: &SolverConfig) -> Result<OptimizationResult, SolverError> {
    if !linear_program.is_in_standard_form() {
        error!("The Simplex method requires a problem in standard form");
        return Err(SolverError::NotInStandardForm);
    }

    match config.pivot_rule {
        PivotRuleKind::Dantzig => solve_with::<SteepestDescentAlongVariable>(linear_program, config),
        PivotRuleKind::Bland => solve_with::<FirstProfitable>(linear_program, config),
    }
}

fn solve_with<PR: PivotRule>(
    linear_program: &LinearProgram,
    config: &SolverConfig,
) -> Result<OptimizationResult, SolverError> {
    info!(
        "Solving a problem with {} rows and {} columns using {:?}",
        linear_program.nr_constraints(), linear_program.nr_variables(), config.pivot_rule,
    );
    let mut remaining = config.max_iterations;
    if remaining == 0 {
        info!("Iteration limit of zero, not solving");
        return Ok(OptimizationResult::IterationLimitExceeded);
    }

    let mut tableau = Tableau::new(linear_program);
    match phase_one::primal::<PR>(&mut tableau, config, &mut remaining)? {
        FeasibilityResult::Feasible => {},
        FeasibilityResult::Infeasible => return Ok(OptimizationResult::Infeasible),
        FeasibilityResult::IterationLimitExceeded => return Ok(OptimizationResult::IterationLimitExceeded),
    }

    let result = match phase_two::primal::<PR>(&mut tableau, config, &mut remaining)? {
        Status::Optimal => {
            let factorization = tableau.factorize()?;
            let x = tableau.problem_values(&tableau.basic_solution(&factorization));
            let objective = linear_program.objective_value(&x);
            let values = linear_program.names()
                .map(str::to_string)
                .zip(x)
                .collect();

            OptimizationResult::FiniteOptimum { values, objective }
        },
        Status::Unbounded => OptimizationResult::Unbounded,
        Status::IterationLimitExceeded => OptimizationResult::IterationLimitExceeded,
    };
    info!(
        "Simplex finished after {} iterations: {}",
        config.max_iterations - remaining,
        match &result {
            OptimizationResult::FiniteOptimum { objective, .. } => format!("optimum {}", objective),
            other => format!("{:?}", other),
        },
    );

    Ok(result)
}

/// Iterate until optimal, unbounded or out of iterations.
///
/// # Arguments
///
/// * `tableau`: Tableau with a basis that is primal feasible.
/// * `cost`: Cost of each column.
/// * `tolerance`: See `SolverConfig::optimality_tolerance`.
/// * `bounded_below`: Whether the cost is known to be bounded from below on the feasible set. A
/// column that looks improving but fails the ratio test is then a rounding artifact: it is skipped
/// until the next pivot instead of reported as unbounded.
/// * `remaining`: Number of iterations that may still be used, decreased with each iteration.
///
/// # Return value
///
/// Never `Status::Unbounded` when `bounded_below` is set.
///
/// # Errors
///
/// If the basis becomes singular.
fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    cost: &[f64],
    tolerance: f64,
    bounded_below: bool,
    remaining: &mut usize,
) -> Result<Status, SolverError> {
    let mut rule = PR::new();
    let mut skipped = vec![false; tableau.nr_problem_columns()];
    loop {
        if *remaining == 0 {
            info!("Iteration limit exceeded");
            break Ok(Status::IterationLimitExceeded);
        }
        *remaining -= 1;

        let factorization = tableau.factorize()?;
        let basic_solution = tableau.basic_solution(&factorization);
        debug_assert!(basic_solution.iter().all(|&value| value >= -1e-6), "Basis should be primal feasible");
        let dual = tableau.dual(&factorization, cost);
        trace!("Basic solution {:?}", basic_solution);

        let relative_costs = tableau.relative_costs(cost, &dual).filter(|&(j, _)| !skipped[j]);
        match rule.select_primal_pivot_column(relative_costs, tolerance) {
            Some((column_index, relative_cost)) => {
                let column = tableau.generate_column(&factorization, column_index);
                match tableau.select_primal_pivot_row(&basic_solution, &column, tolerance) {
                    Some(position) => {
                        debug!("Relative cost of entering column {} is {}", column_index, relative_cost);
                        tableau.bring_into_basis(column_index, position);
                        skipped.fill(false);
                    },
                    None if bounded_below => {
                        debug!(
                            "Column {} has relative cost {} but no pivot, skipping it",
                            column_index, relative_cost,
                        );
                        skipped[column_index] = true;
                    },
                    None => {
                        debug!("Column {} can be increased without limit", column_index);
                        break Ok(Status::Unbounded);
                    },
                }
            },
            None => break Ok(Status::Optimal),
        }
    }
}
