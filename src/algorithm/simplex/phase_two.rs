//! # Phase two
//!
//! Optimize the problem's own cost, starting from a basic feasible solution.
use log::info;

use crate::algorithm::simplex;
use crate::algorithm::simplex::{SolverConfig, SolverError, Status};
use crate::algorithm::simplex::strategy::pivot_rule::PivotRule;
use crate::algorithm::simplex::tableau::Tableau;

/// Reduces the cost of the basic feasible solution to the minimum.
///
/// While calling this method, a number of requirements should be satisfied:
/// - There should be a valid basis without artificial variables
/// - All values of the basic variables need to be non-negative (primal feasibility)
///
/// # Return value
///
/// Whether the problem has a finite optimum. It cannot be infeasible, as a feasible solution is
/// needed to start using this method.
///
/// # Errors
///
/// If the basis becomes singular.
pub(super) fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    config: &SolverConfig,
    remaining: &mut usize,
) -> Result<Status, SolverError> {
    debug_assert!(tableau.basis().iter().all(|&j| !tableau.is_artificial(j)));

    info!("Phase two on {} rows", tableau.nr_rows());
    let cost = tableau.cost().to_vec();
    simplex::primal::<PR>(tableau, &cost, config.optimality_tolerance, false, remaining)
}
