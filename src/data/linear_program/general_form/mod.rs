//! # Linear programs in "general form"
//!
//! Data structure for manipulation of linear programs. Problem sources produce this form, presolve
//! reduces it and the standard form is derived from it.
use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};

use index_utils::remove_indices;
use itertools::Itertools;

use crate::data::linear_algebra::matrix::Sparse;
use crate::data::linear_program::elements::{ConstraintType, Objective, VariableType};
use crate::io::error::InconsistencyError;

pub mod presolve;

/// A linear program in general form.
///
/// Minimize or maximize `<c, x> + fixed_cost` subject to `Ax {<=, >=, ==} b` and
/// `lower <= x <= upper`.
///
/// Immutable once constructed: instances are created through `LinearProgram::new`, which checks
/// all the requirements listed in `check_consistency`. Crate internal transformations create new
/// instances from valid ones and only verify consistency in debug builds.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram {
    /// Which direction does the objective function go?
    objective: Objective,

    /// Constant in the cost function.
    fixed_cost: f64,

    // Constraint related
    /// All constraint coefficients.
    ///
    /// Has size `constraint_types.len()` in the row direction, size `variables.len()` in the column
    /// direction.
    constraints: Sparse,
    /// The equation type of all rows, ordered by index.
    constraint_types: Vec<ConstraintType>,
    /// All right-hands sides of equations.
    b: Vec<f64>,

    // Variable related
    /// Information about all variables, ordered by column index.
    variables: Vec<Variable>,
}

/// A column of the linear program.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    /// Unique name.
    pub name: String,
    /// Whether the variable is integer or not.
    pub variable_type: VariableType,
    /// Coefficient in the objective function.
    pub cost: f64,
    /// Describing the accepted values for this variable, `f64::NEG_INFINITY` if unbounded.
    pub lower_bound: f64,
    /// Describing the accepted values for this variable, `f64::INFINITY` if unbounded.
    pub upper_bound: f64,
}

impl Variable {
    /// A continuous, non-negative variable.
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            variable_type: VariableType::Continuous,
            cost,
            lower_bound: 0_f64,
            upper_bound: f64::INFINITY,
        }
    }

    /// Replace both bounds.
    #[must_use]
    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Replace the variable type.
    #[must_use]
    pub fn with_type(mut self, variable_type: VariableType) -> Self {
        self.variable_type = variable_type;
        self
    }

    /// The value of the variable if its bounds are within `epsilon` of each other.
    pub fn is_fixed(&self, epsilon: f64) -> Option<f64> {
        let is_fixed = self.lower_bound.is_finite() && self.upper_bound.is_finite()
            && (self.lower_bound - self.upper_bound).abs() < epsilon;
        is_fixed.then_some(self.lower_bound)
    }

    /// Whether the variable has neither a lower nor an upper bound.
    pub fn is_free(&self) -> bool {
        self.lower_bound == f64::NEG_INFINITY && self.upper_bound == f64::INFINITY
    }
}

/// Check whether the dimensions and values of a `LinearProgram` are consistent.
///
/// This function can be viewed as documentation on the requirements of a `LinearProgram`.
fn check_consistency(
    fixed_cost: f64,
    constraints: &Sparse,
    constraint_types: &[ConstraintType],
    b: &[f64],
    variables: &[Variable],
) -> Result<(), InconsistencyError> {
    if constraints.nr_rows() != b.len() || constraint_types.len() != b.len() {
        return Err(InconsistencyError::new(format!(
            "Number of rows inconsistent: {} in the constraint matrix, {} right-hand side values and {} constraint types",
            constraints.nr_rows(), b.len(), constraint_types.len(),
        )));
    }
    if constraints.nr_columns() != variables.len() {
        return Err(InconsistencyError::new(format!(
            "Number of columns inconsistent: {} in the constraint matrix and {} variables",
            constraints.nr_columns(), variables.len(),
        )));
    }
    if !fixed_cost.is_finite() {
        return Err(InconsistencyError::new("Constant in the objective function is not finite"));
    }
    if let Some(i) = b.iter().position(|v| !v.is_finite()) {
        return Err(InconsistencyError::new(format!("Right-hand side of row {} is not finite", i)));
    }
    if let Some(j) = (0..constraints.nr_columns())
        .find(|&j| constraints.column(j).iter().any(|(_, v)| !v.is_finite())) {
        return Err(InconsistencyError::new(format!("Column {} contains a value that is not finite", j)));
    }

    let mut names = HashSet::with_capacity(variables.len());
    for variable in variables {
        if !names.insert(variable.name.as_str()) {
            return Err(InconsistencyError::new(format!("Variable name \"{}\" is not unique", variable.name)));
        }
        if !variable.cost.is_finite() {
            return Err(InconsistencyError::new(format!("Cost of variable \"{}\" is not finite", variable.name)));
        }
        if variable.lower_bound.is_nan() || variable.upper_bound.is_nan()
            || variable.lower_bound == f64::INFINITY || variable.upper_bound == f64::NEG_INFINITY {
            return Err(InconsistencyError::new(format!("Invalid bound for variable \"{}\"", variable.name)));
        }
        if variable.lower_bound > variable.upper_bound {
            return Err(InconsistencyError::new(format!(
                "Lower bound {} of variable \"{}\" exceeds upper bound {}",
                variable.lower_bound, variable.name, variable.upper_bound,
            )));
        }
    }

    Ok(())
}

/// Whether a `LinearProgram` satisfies all its requirements.
///
/// This method might be expensive, use it in debugging only.
fn is_consistent(linear_program: &LinearProgram) -> bool {
    check_consistency(
        linear_program.fixed_cost,
        &linear_program.constraints,
        &linear_program.constraint_types,
        &linear_program.b,
        &linear_program.variables,
    ).is_ok()
}

impl LinearProgram {
    /// Create a new linear program in general form.
    ///
    /// # Arguments
    ///
    /// * `objective`: Direction of optimization.
    /// * `constraints`: Coefficient matrix, one row per constraint, one column per variable.
    /// * `constraint_types`: Relation of each row.
    /// * `b`: Right-hand side of each row.
    /// * `variables`: Name, type, cost and bounds of each column.
    /// * `fixed_cost`: Constant in the objective function.
    ///
    /// # Errors
    ///
    /// An `InconsistencyError` if the dimensions don't match, names are not unique, bounds cross or
    /// values are not numbers.
    pub fn new(
        objective: Objective,
        constraints: Sparse,
        constraint_types: Vec<ConstraintType>,
        b: Vec<f64>,
        variables: Vec<Variable>,
        fixed_cost: f64,
    ) -> Result<Self, InconsistencyError> {
        check_consistency(fixed_cost, &constraints, &constraint_types, &b, &variables)?;

        Ok(Self { objective, fixed_cost, constraints, constraint_types, b, variables })
    }

    /// Create a new instance from parts that are known to be consistent.
    pub(crate) fn new_unchecked(
        objective: Objective,
        constraints: Sparse,
        constraint_types: Vec<ConstraintType>,
        b: Vec<f64>,
        variables: Vec<Variable>,
        fixed_cost: f64,
    ) -> Self {
        let linear_program = Self { objective, fixed_cost, constraints, constraint_types, b, variables };
        debug_assert!(is_consistent(&linear_program));

        linear_program
    }

    /// Direction of optimization.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Constant in the objective function.
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    /// Coefficient matrix.
    pub fn constraints(&self) -> &Sparse {
        &self.constraints
    }

    /// Relation of each row.
    pub fn constraint_types(&self) -> &[ConstraintType] {
        &self.constraint_types
    }

    /// Right-hand side of each row.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// All variables, ordered by column.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Cost vector.
    pub fn cost(&self) -> Vec<f64> {
        self.variables.iter().map(|variable| variable.cost).collect()
    }

    /// Names of the variables, ordered by column.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|variable| variable.name.as_str())
    }

    /// The number of constraints in this linear program.
    pub fn nr_constraints(&self) -> usize {
        self.b.len()
    }

    /// The number of variables in this linear program.
    pub fn nr_variables(&self) -> usize {
        self.variables.len()
    }

    /// Value of the objective function, including the constant, at a point.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), self.nr_variables());

        self.fixed_cost + self.variables.iter().zip_eq(x)
            .map(|(variable, value)| variable.cost * value)
            .sum::<f64>()
    }

    /// Whether a point satisfies all constraints and bounds up to a tolerance.
    pub fn is_feasible(&self, x: &[f64], tolerance: f64) -> bool {
        debug_assert_eq!(x.len(), self.nr_variables());

        let within_bounds = self.variables.iter().zip_eq(x).all(|(variable, &value)| {
            value >= variable.lower_bound - tolerance && value <= variable.upper_bound + tolerance
        });
        let activities = self.constraints.multiply(x);

        within_bounds && itertools::izip!(&activities, &self.constraint_types, &self.b)
            .all(|(&activity, constraint_type, &b)| constraint_type.is_satisfied(activity, b, tolerance))
    }

    /// The same problem, optimized in another direction.
    #[must_use]
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Mutable access to the right-hand side.
    pub(crate) fn b_mut(&mut self) -> &mut [f64] {
        &mut self.b
    }

    /// Mutable access to the variables; bounds should not cross.
    pub(crate) fn variables_mut(&mut self) -> &mut [Variable] {
        &mut self.variables
    }

    /// Add a value to the constant of the objective function.
    pub(crate) fn add_fixed_cost(&mut self, value: f64) {
        debug_assert!(value.is_finite());

        self.fixed_cost += value;
    }

    /// Subtract `value` times a column from the right-hand side.
    ///
    /// This is the substitution of a variable with a known value into the constraints.
    pub(crate) fn substitute_column(&mut self, j: usize, value: f64) {
        debug_assert!(value.is_finite());

        for &(i, coefficient) in self.constraints.column(j) {
            self.b[i] -= coefficient * value;
        }
    }

    /// Remove rows and columns.
    ///
    /// # Arguments
    ///
    /// * `rows`: Sorted, deduplicated indices of rows to remove.
    /// * `columns`: Sorted, deduplicated indices of columns to remove.
    pub(crate) fn remove_rows_and_columns(&mut self, rows: &[usize], columns: &[usize]) {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(columns.windows(2).all(|w| w[0] < w[1]));

        self.constraints.remove_rows(rows);
        remove_indices(&mut self.b, rows);
        remove_indices(&mut self.constraint_types, rows);

        self.constraints.remove_columns(columns);
        remove_indices(&mut self.variables, columns);

        debug_assert!(is_consistent(self));
    }
}

impl Display for LinearProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?} {}", self.objective, self.variables.iter()
            .map(|variable| format!("{} {}", variable.cost, variable.name))
            .join(" + "))?;
        writeln!(f, "Subject to:")?;
        let rows = self.constraints.row_major();
        for (i, row) in rows.iter().enumerate() {
            let relation = match self.constraint_types[i] {
                ConstraintType::Equal => "==",
                ConstraintType::Greater => ">=",
                ConstraintType::Less => "<=",
            };
            writeln!(f, "  {} {} {}", row.iter()
                .map(|&(j, value)| format!("{} {}", value, self.variables[j].name))
                .join(" + "), relation, self.b[i])?;
        }
        writeln!(f, "Bounds:")?;
        for variable in &self.variables {
            writeln!(f, "  {} <= {} <= {}", variable.lower_bound, variable.name, variable.upper_bound)?;
        }

        Ok(())
    }
}
