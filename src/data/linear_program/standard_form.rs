//! # Standard form
//!
//! A linear program is in standard form when it reads
//!
//! ```text
//! min c^T x
//! s.t. Ax = b
//!      x >= 0
//! ```
//!
//! Conversion changes the variables: they are shifted, flipped or split such that all of them are
//! non-negative. The conversion is remembered so that values for the standard form problem can be
//! translated back.
//!
//! The indexing is as follows:
//!
//! /                || Original vars | Negative parts | Bound slacks | Constraint slacks | b  |
//! =================||===============||================|==============|===================|====|
//! Constraint       || coefficients  | -coefficients  |      0       |     I, -I or 0    | b' |
//! -----------------||---------------||----------------|--------------|-------------------|----|
//! Variable bound   || one 1 per row |       0        |      I       |         0         | u' |
use std::collections::{HashMap, HashSet};

use cumsum::cumsum_array_owned;
use enum_map::{Enum, enum_map, EnumMap};
use log::debug;

use crate::data::linear_algebra::matrix::MatrixBuilder;
use crate::data::linear_program::elements::{ConstraintType, Objective};
use crate::data::linear_program::general_form::{LinearProgram, Variable};

/// How a variable of the input problem is expressed in terms of standard form columns.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Transformation {
    /// `x = x' + shift`, also used with a zero shift when nothing needs to change.
    Shift(f64),
    /// `x = upper - x'`
    Flip(f64),
    /// `x = x' - x''`, with `x''` the column at the given index.
    Split(usize),
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
enum RowType {
    Constraint,
    VariableBound,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    /// One column for each variable of the input problem, with the same name.
    Original,
    /// Negative part of a free variable.
    NegativePart,
    /// Slack of an upper bound row `x' + s = u'`.
    BoundSlack,
    /// Slack of a `<=` row or surplus of a `>=` row.
    ConstraintSlack,
}

/// A linear program in standard form, together with the information needed to recover values of
/// the problem it was created from.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    /// The problem in standard form.
    linear_program: LinearProgram,
    /// Direction of optimization of the input problem.
    objective: Objective,
    /// Names of the variables of the input problem, in column order.
    names: Vec<String>,
    /// For each variable of the input problem, how it relates to the standard form columns.
    transformations: Vec<Transformation>,

    row_group_end: EnumMap<RowType, usize>,
    column_group_end: EnumMap<ColumnType, usize>,
}

impl StandardForm {
    /// Convert a linear program to standard form.
    ///
    /// * A maximization problem is turned into minimization by negating the cost.
    /// * A finite lower bound is shifted to zero.
    /// * A variable with only an upper bound is flipped.
    /// * A free variable is split in a positive and a negative part.
    /// * A remaining finite upper bound becomes a row with a slack.
    /// * Each `<=` row gets a slack, each `>=` row a surplus variable.
    ///
    /// New columns are continuous, non-negative and have a name that doesn't appear elsewhere.
    pub fn new(linear_program: &LinearProgram) -> Self {
        let sign = linear_program.objective().sign();
        let constraints = linear_program.constraints();
        let nr_rows = linear_program.nr_constraints();
        let nr_original = linear_program.nr_variables();

        let mut used_names = linear_program.names().map(str::to_string).collect::<HashSet<_>>();
        let mut fixed_cost = sign * linear_program.fixed_cost();
        let mut b = linear_program.b().to_vec();

        // Decide on the transformation of each variable, and the upper bound that remains
        let mut transformations = Vec::with_capacity(nr_original);
        let mut remaining_upper = Vec::with_capacity(nr_original);
        let mut nr_free = 0;
        for variable in linear_program.variables() {
            let (transformation, upper) = if variable.is_free() {
                nr_free += 1;
                (Transformation::Split(nr_original + nr_free - 1), f64::INFINITY)
            } else if variable.lower_bound.is_finite() {
                (Transformation::Shift(variable.lower_bound), variable.upper_bound - variable.lower_bound)
            } else {
                (Transformation::Flip(variable.upper_bound), f64::INFINITY)
            };
            transformations.push(transformation);
            remaining_upper.push(upper);
        }
        let bounded = remaining_upper.iter()
            .enumerate()
            .filter(|&(_, upper)| upper.is_finite())
            .map(|(j, &upper)| (j, upper))
            .collect::<Vec<_>>();
        let nr_slacks = linear_program.constraint_types().iter()
            .filter(|&&constraint_type| constraint_type != ConstraintType::Equal)
            .count();

        let cumulative = cumsum_array_owned([nr_rows, bounded.len()]);
        let row_group_end = enum_map! {
            RowType::Constraint    => cumulative[0],
            RowType::VariableBound => cumulative[1],
        };
        let cumulative = cumsum_array_owned([nr_original, nr_free, bounded.len(), nr_slacks]);
        let column_group_end = enum_map! {
            ColumnType::Original        => cumulative[0],
            ColumnType::NegativePart    => cumulative[1],
            ColumnType::BoundSlack      => cumulative[2],
            ColumnType::ConstraintSlack => cumulative[3],
        };

        let mut builder = MatrixBuilder::new(row_group_end[RowType::VariableBound], column_group_end[ColumnType::ConstraintSlack]);
        let mut variables = Vec::with_capacity(column_group_end[ColumnType::ConstraintSlack]);
        let mut negative_parts = Vec::with_capacity(nr_free);
        for (j, (variable, &transformation)) in linear_program.variables().iter().zip(&transformations).enumerate() {
            let mut cost = sign * variable.cost;
            let factor = match transformation {
                Transformation::Shift(shift) => {
                    if shift != 0_f64 {
                        for &(i, value) in constraints.column(j) {
                            b[i] -= value * shift;
                        }
                        fixed_cost += cost * shift;
                    }
                    1_f64
                },
                Transformation::Flip(upper) => {
                    for &(i, value) in constraints.column(j) {
                        b[i] -= value * upper;
                    }
                    fixed_cost += cost * upper;
                    cost = -cost;
                    -1_f64
                },
                Transformation::Split(negative) => {
                    for &(i, value) in constraints.column(j) {
                        builder.push(i, negative, -value);
                    }
                    let name = unique_name(format!("{}_negative", variable.name), &mut used_names);
                    negative_parts.push(Variable::new(name, -cost));
                    1_f64
                },
            };

            for &(i, value) in constraints.column(j) {
                builder.push(i, j, factor * value);
            }
            variables.push(Variable {
                name: variable.name.clone(),
                variable_type: variable.variable_type,
                cost,
                lower_bound: 0_f64,
                upper_bound: f64::INFINITY,
            });
        }
        variables.extend(negative_parts);

        for (k, &(j, upper)) in bounded.iter().enumerate() {
            let row = row_group_end[RowType::Constraint] + k;
            let slack = column_group_end[ColumnType::NegativePart] + k;
            builder.push(row, j, 1_f64);
            builder.push(row, slack, 1_f64);
            b.push(upper);

            let name = unique_name(format!("{}_bound_slack", linear_program.variables()[j].name), &mut used_names);
            variables.push(Variable::new(name, 0_f64));
        }

        let mut slack = column_group_end[ColumnType::BoundSlack];
        for (i, &constraint_type) in linear_program.constraint_types().iter().enumerate() {
            let (coefficient, base) = match constraint_type {
                ConstraintType::Equal => continue,
                ConstraintType::Less => (1_f64, format!("row_{}_slack", i)),
                ConstraintType::Greater => (-1_f64, format!("row_{}_surplus", i)),
            };
            builder.push(i, slack, coefficient);
            variables.push(Variable::new(unique_name(base, &mut used_names), 0_f64));
            slack += 1;
        }
        debug_assert_eq!(slack, column_group_end[ColumnType::ConstraintSlack]);
        debug_assert_eq!(variables.len(), builder.nr_columns());
        debug_assert_eq!(b.len(), builder.nr_rows());

        debug!(
            "Standard form has {} rows ({} bound rows) and {} columns ({} split, {} slacks)",
            builder.nr_rows(), bounded.len(), builder.nr_columns(), nr_free, nr_slacks + bounded.len(),
        );

        let nr_rows = b.len();
        let standard = LinearProgram::new_unchecked(
            Objective::Minimize,
            builder.build(),
            vec![ConstraintType::Equal; nr_rows],
            b,
            variables,
            fixed_cost,
        );

        Self {
            linear_program: standard,
            objective: linear_program.objective(),
            names: linear_program.names().map(str::to_string).collect(),
            transformations,

            row_group_end,
            column_group_end,
        }
    }

    /// The problem in standard form.
    pub fn linear_program(&self) -> &LinearProgram {
        &self.linear_program
    }

    /// Take the problem in standard form, forgetting how to recover values.
    pub fn into_linear_program(self) -> LinearProgram {
        self.linear_program
    }

    /// Number of rows that represent an upper bound of a variable.
    pub fn nr_bound_rows(&self) -> usize {
        self.row_group_end[RowType::VariableBound] - self.row_group_end[RowType::Constraint]
    }

    /// Number of columns that were added to represent free variables.
    pub fn nr_split_variables(&self) -> usize {
        self.column_group_end[ColumnType::NegativePart] - self.column_group_end[ColumnType::Original]
    }

    /// Translate values of the standard form columns to values of the input problem's variables.
    ///
    /// # Arguments
    ///
    /// * `values`: A value for each column of the standard form problem, by name.
    ///
    /// # Return value
    ///
    /// A value for each variable of the input problem, by name.
    pub fn recover(&self, values: &HashMap<String, f64>) -> HashMap<String, f64> {
        let value_of = |name: &str| {
            debug_assert!(values.contains_key(name));
            values.get(name).copied().unwrap_or(0_f64)
        };

        self.names.iter()
            .zip(&self.transformations)
            .map(|(name, &transformation)| {
                let standard = value_of(name);
                let value = match transformation {
                    Transformation::Shift(shift) => standard + shift,
                    Transformation::Flip(upper) => upper - standard,
                    Transformation::Split(negative) => {
                        standard - value_of(&self.linear_program.variables()[negative].name)
                    },
                };

                (name.clone(), value)
            })
            .collect()
    }

    /// Objective value of the input problem, given the objective value of the standard form.
    ///
    /// Only the direction of optimization needs to be undone; shifts and flips are accounted for
    /// in the constant of the standard form's objective function.
    pub fn objective_value(&self, standard_objective: f64) -> f64 {
        self.objective.sign() * standard_objective
    }
}

/// Convert a linear program into standard form.
///
/// See `StandardForm::new` for the transformations that are applied. Use `StandardForm` directly
/// when solutions need to be translated back.
pub fn to_standard_form(linear_program: &LinearProgram) -> LinearProgram {
    StandardForm::new(linear_program).into_linear_program()
}

/// Extend a name until it is not used yet, and reserve it.
fn unique_name(base: String, used: &mut HashSet<String>) -> String {
    let mut name = base.clone();
    let mut counter = 0;
    while used.contains(&name) {
        counter += 1;
        name = format!("{}_{}", base, counter);
    }
    used.insert(name.clone());

    name
}

impl Variable {
    fn is_standard(&self) -> bool {
        self.lower_bound == 0_f64 && self.upper_bound == f64::INFINITY
    }
}

impl LinearProgram {
    /// Whether this problem is a minimization with only equality constraints and non-negative
    /// variables without upper bound.
    pub fn is_in_standard_form(&self) -> bool {
        self.objective() == Objective::Minimize
            && self.constraint_types().iter().all(|&constraint_type| constraint_type == ConstraintType::Equal)
            && self.variables().iter().all(Variable::is_standard)
    }
}
