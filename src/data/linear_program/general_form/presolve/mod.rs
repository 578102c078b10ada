//! # Presolving linear programs
//!
//! A `LinearProgram` is presolved by wrapping it in a `ReductionState` and passing that state
//! through a fixed sequence of reduction rules. Each rule consumes a state and returns a new one;
//! the rules are found in the `rule` submodule, one per file.
//!
//! All bookkeeping in a `ReductionState` uses the indices of the *original* problem. The reduced
//! problem shrinks with every rule, so each state carries tables translating the row and column
//! indices of the reduced problem back to the original ones.
use std::collections::{BTreeMap, BTreeSet};

use index_utils::remove_indices;
use log::{debug, info};

use crate::data::linear_program::elements::ConstraintType;
use crate::data::linear_program::general_form::LinearProgram;
use crate::data::number_types::float::is_close_to_zero;

pub use postsolve::{postsolve, PostsolveError};
pub use rule::dependent_row::remove_dependent_rows;
pub use rule::empty_column::eliminate_empty_columns;
pub use rule::empty_row::remove_empty_rows;
pub use rule::fixed_variable::eliminate_fixed_variables;
pub use rule::row_singleton::eliminate_row_singletons;

mod postsolve;
mod rule;

#[cfg(test)]
mod test;

/// Settings of the presolve procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct PresolveConfig {
    /// Values closer than this to zero are treated as zero, and values closer than this to each
    /// other as equal.
    pub epsilon: f64,
    /// How often the full sequence of rules is applied at most.
    ///
    /// A new round only starts when the previous one removed a row or column.
    pub max_rounds: usize,
    /// When disabled, `presolve` returns the problem unchanged.
    pub enabled: bool,
}

impl Default for PresolveConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-8,
            max_rounds: 4,
            enabled: true,
        }
    }
}

/// A linear program together with the reductions that were applied to it.
///
/// States have value semantics: rules take ownership of a state and return a new one, so an earlier
/// state is never changed by a later rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionState {
    /// The problem as it was before presolving started.
    original: LinearProgram,
    /// The problem as it currently is.
    reduced: LinearProgram,

    /// Original indices of all rows that were removed.
    removed_rows: BTreeSet<usize>,
    /// Original indices of all columns that were removed.
    removed_columns: BTreeSet<usize>,
    /// For each removed dependent row (original index), the row it was a multiple of (original
    /// index) and the factor such that `removed = factor * surviving`.
    row_ratios: BTreeMap<usize, (usize, f64)>,
    /// Values of all variables that were eliminated, by name.
    fixed_values: BTreeMap<String, f64>,

    /// Presolve proved that the problem has no feasible solution.
    infeasible: bool,
    /// Presolve proved that the objective function can be improved without limit.
    unbounded: bool,

    /// For each row of `reduced`, its index in `original`.
    row_origin: Vec<usize>,
    /// For each column of `reduced`, its index in `original`.
    column_origin: Vec<usize>,
}

impl ReductionState {
    /// Start presolving a problem: nothing is reduced yet.
    pub fn new(linear_program: LinearProgram) -> Self {
        let row_origin = (0..linear_program.nr_constraints()).collect();
        let column_origin = (0..linear_program.nr_variables()).collect();

        Self {
            reduced: linear_program.clone(),
            original: linear_program,

            removed_rows: BTreeSet::new(),
            removed_columns: BTreeSet::new(),
            row_ratios: BTreeMap::new(),
            fixed_values: BTreeMap::new(),

            infeasible: false,
            unbounded: false,

            row_origin,
            column_origin,
        }
    }

    /// The problem before presolving.
    pub fn original(&self) -> &LinearProgram {
        &self.original
    }

    /// The problem after the reductions applied so far.
    pub fn reduced(&self) -> &LinearProgram {
        &self.reduced
    }

    /// Original indices of the removed rows.
    pub fn removed_rows(&self) -> &BTreeSet<usize> {
        &self.removed_rows
    }

    /// Original indices of the removed columns.
    pub fn removed_columns(&self) -> &BTreeSet<usize> {
        &self.removed_columns
    }

    /// Removed dependent rows, see the field documentation.
    pub fn row_ratios(&self) -> &BTreeMap<usize, (usize, f64)> {
        &self.row_ratios
    }

    /// Values of the eliminated variables.
    pub fn fixed_values(&self) -> &BTreeMap<String, f64> {
        &self.fixed_values
    }

    /// Whether presolve proved infeasibility.
    pub fn is_infeasible(&self) -> bool {
        self.infeasible
    }

    /// Whether presolve proved unboundedness.
    pub fn is_unbounded(&self) -> bool {
        self.unbounded
    }

    /// Whether no further reductions should be attempted, and the problem should not be solved.
    pub fn is_terminal(&self) -> bool {
        self.infeasible || self.unbounded
    }

    /// Index in the original problem of a row of the reduced problem.
    pub fn original_row(&self, local: usize) -> usize {
        self.row_origin[local]
    }

    /// Index in the original problem of a column of the reduced problem.
    pub fn original_column(&self, local: usize) -> usize {
        self.column_origin[local]
    }

    /// Total number of rows and columns removed so far.
    pub fn nr_reductions(&self) -> usize {
        self.removed_rows.len() + self.removed_columns.len()
    }

    /// Mark the problem infeasible.
    fn mark_infeasible(&mut self, reason: &str) {
        info!("Presolve determined the problem to be infeasible: {}", reason);
        self.infeasible = true;
    }

    /// Mark the problem unbounded.
    fn mark_unbounded(&mut self, reason: &str) {
        info!("Presolve determined the problem to be unbounded: {}", reason);
        self.unbounded = true;
    }

    /// Eliminate a variable by substituting a value.
    ///
    /// The value is recorded, subtracted from the right-hand side and its cost contribution moved
    /// to the constant of the objective. The column itself stays until `remove` is called.
    ///
    /// # Arguments
    ///
    /// * `local`: Index of the column in the reduced problem.
    /// * `value`: Value of the variable in every optimal solution that will be found.
    fn fix_column(&mut self, local: usize, value: f64) {
        let variable = &self.reduced.variables()[local];
        debug!("Fixing variable \"{}\" at {}", variable.name, value);

        let name = variable.name.clone();
        let cost = variable.cost;
        let previous = self.fixed_values.insert(name, value);
        debug_assert!(previous.is_none(), "A variable can only be eliminated once.");

        self.reduced.substitute_column(local, value);
        self.reduced.add_fixed_cost(cost * value);
    }

    /// Record that a row was removed because it is a multiple of another row.
    ///
    /// # Arguments
    ///
    /// * `removed`: Local index of the row that will be removed.
    /// * `surviving`: Local index of the row it is a multiple of.
    /// * `ratio`: Factor such that `removed = ratio * surviving`.
    fn record_ratio(&mut self, removed: usize, surviving: usize, ratio: f64) {
        let removed = self.original_row(removed);
        let surviving = self.original_row(surviving);
        debug!("Row {} is {} times row {}", removed, ratio, surviving);

        self.row_ratios.insert(removed, (surviving, ratio));
    }

    /// Remove rows and columns from the reduced problem.
    ///
    /// Indices are translated to the original numbering before they are recorded.
    ///
    /// # Arguments
    ///
    /// * `rows`: Local indices of rows to remove, in any order.
    /// * `columns`: Local indices of columns to remove, in any order.
    fn remove(&mut self, mut rows: Vec<usize>, mut columns: Vec<usize>) {
        rows.sort_unstable();
        rows.dedup();
        columns.sort_unstable();
        columns.dedup();

        for &i in &rows {
            let newly_removed = self.removed_rows.insert(self.row_origin[i]);
            debug_assert!(newly_removed);
        }
        for &j in &columns {
            let newly_removed = self.removed_columns.insert(self.column_origin[j]);
            debug_assert!(newly_removed);
        }

        remove_indices(&mut self.row_origin, &rows);
        remove_indices(&mut self.column_origin, &columns);
        self.reduced.remove_rows_and_columns(&rows, &columns);

        debug_assert_eq!(self.row_origin.len(), self.reduced.nr_constraints());
        debug_assert_eq!(self.column_origin.len(), self.reduced.nr_variables());
        debug_assert_eq!(self.removed_rows.len() + self.row_origin.len(), self.original.nr_constraints());
        debug_assert_eq!(self.removed_columns.len() + self.column_origin.len(), self.original.nr_variables());
    }
}

/// Whether a row without any (significant) coefficients is satisfied by every point.
///
/// The relation reads `0 {==, <=, >=} b`.
fn is_empty_row_feasible(constraint_type: ConstraintType, b: f64, epsilon: f64) -> bool {
    match constraint_type {
        ConstraintType::Equal => is_close_to_zero(b, epsilon),
        ConstraintType::Less => b > -epsilon,
        ConstraintType::Greater => b < epsilon,
    }
}

/// Reduce the size of a linear program.
///
/// The following rules are applied, in this order:
///
/// 1. Eliminate fixed variables
/// 2. Remove empty rows
/// 3. Eliminate row singletons
/// 4. Eliminate empty columns
/// 5. Remove linearly dependent rows
///
/// The sequence is repeated while it removes rows or columns, at most `config.max_rounds` times.
/// As soon as a rule proves the problem infeasible or unbounded, the remaining rules are skipped.
///
/// # Return value
///
/// The final state. Check `is_terminal` before solving the reduced problem.
pub fn presolve(linear_program: LinearProgram, config: &PresolveConfig) -> ReductionState {
    let mut state = ReductionState::new(linear_program);
    if !config.enabled {
        debug!("Presolve disabled");
        return state;
    }

    for round in 0..config.max_rounds.max(1) {
        let before = state.nr_reductions();

        state = eliminate_fixed_variables(state, config);
        state = remove_empty_rows(state, config);
        state = eliminate_row_singletons(state, config);
        state = eliminate_empty_columns(state, config);
        state = remove_dependent_rows(state, config);

        debug!("Presolve round {} removed {} rows and columns", round, state.nr_reductions() - before);
        if state.is_terminal() || state.nr_reductions() == before {
            break;
        }
    }

    info!(
        "Presolve removed {} of {} rows and {} of {} columns",
        state.removed_rows.len(), state.original.nr_constraints(),
        state.removed_columns.len(), state.original.nr_variables(),
    );

    state
}
