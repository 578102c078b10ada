//! # Phase one
//!
//! Find a basic feasible solution by minimizing the sum of the artificial variables.
use log::{debug, info, warn};

use crate::algorithm::simplex;
use crate::algorithm::simplex::{SolverConfig, SolverError, Status};
use crate::algorithm::simplex::strategy::pivot_rule::PivotRule;
use crate::algorithm::simplex::tableau::Tableau;

/// Whether the problem allows a basic feasible solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FeasibilityResult {
    /// The tableau holds a feasible basis without artificial variables.
    Feasible,
    /// The artificial cost can't be reduced to zero.
    Infeasible,
    /// The iteration budget ran out.
    IterationLimitExceeded,
}

/// Reduces the artificial cost of the basic feasible solution to zero, if possible. In doing so, a
/// basic feasible solution to the standard form linear program is found.
///
/// Afterwards, no artificial variables are in the basis: they are either pivoted out, or their row
/// turned out to be redundant and was removed.
///
/// # Arguments
///
/// * `tableau`: Tableau with its initial basis, possibly containing artificial variables.
/// * `remaining`: Shared iteration budget.
///
/// # Errors
///
/// If the basis becomes singular.
pub(super) fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    config: &SolverConfig,
    remaining: &mut usize,
) -> Result<FeasibilityResult, SolverError> {
    if !tableau.basis().iter().any(|&j| tableau.is_artificial(j)) {
        debug!("Initial basis has no artificial variables, skipping phase one");
        return Ok(FeasibilityResult::Feasible);
    }

    info!("Phase one with {} artificial variables", tableau.nr_artificial_variables());
    let cost = tableau.artificial_cost();
    // The artificial cost is bounded from below by zero
    match simplex::primal::<PR>(tableau, &cost, config.optimality_tolerance, true, remaining)? {
        Status::Optimal | Status::Unbounded => {},
        Status::IterationLimitExceeded => return Ok(FeasibilityResult::IterationLimitExceeded),
    }

    let factorization = tableau.factorize()?;
    let basic_solution = tableau.basic_solution(&factorization);
    let artificial_cost = tableau.basis().iter()
        .zip(&basic_solution)
        .filter(|&(&j, _)| tableau.is_artificial(j))
        .map(|(_, &value)| value)
        .sum::<f64>();
    if artificial_cost > tableau.feasibility_tolerance(config.optimality_tolerance) {
        info!("Phase one ended with artificial cost {}, the problem is infeasible", artificial_cost);
        return Ok(FeasibilityResult::Infeasible);
    }

    remove_artificial_basis_variables(tableau, config.optimality_tolerance)?;
    info!("Phase one found a basic feasible solution");

    Ok(FeasibilityResult::Feasible)
}

/// Removes all artificial variables from the basis by making a basis change "at zero level", or
/// without change of cost of the current solution.
///
/// An artificial variable that can't be replaced by any problem column indicates that its row is a
/// linear combination of the other rows. That row is removed, together with the artificial
/// variable.
///
/// # Errors
///
/// If the basis becomes singular.
fn remove_artificial_basis_variables(tableau: &mut Tableau, tolerance: f64) -> Result<(), SolverError> {
    let mut artificial_positions = tableau.basis().iter()
        .enumerate()
        .filter(|&(_, &j)| tableau.is_artificial(j))
        .map(|(position, _)| position)
        .collect::<Vec<_>>();
    artificial_positions.sort_unstable_by_key(|&position| tableau.basis()[position]);

    let mut redundant = Vec::new();
    for position in artificial_positions {
        let factorization = tableau.factorize()?;
        let mut unit = vec![0_f64; tableau.nr_rows()];
        unit[position] = 1_f64;
        // Row `position` of the inverse basis
        let inverse_row = factorization.solve_transpose(&unit);

        let replacement = (0..tableau.nr_problem_columns())
            .filter(|&j| !tableau.is_in_basis(j))
            .find(|&j| tableau.inner_product(j, &inverse_row).abs() > tolerance);
        match replacement {
            Some(j) => tableau.bring_into_basis(j, position),
            None => {
                let row = tableau.artificial_row(tableau.basis()[position]);
                warn!("Row {} is linearly dependent on the other rows, removing it", row);
                redundant.push((row, position));
            },
        }
    }

    if !redundant.is_empty() {
        redundant.sort_unstable();
        let (rows, positions): (Vec<_>, Vec<_>) = redundant.into_iter().unzip();
        tableau.remove_rows(&rows, positions);
    }
    debug_assert!(tableau.basis().iter().all(|&j| !tableau.is_artificial(j)));

    Ok(())
}
