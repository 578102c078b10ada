//! # Building blocks to describe linear programs.
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::data::linear_program::solution::Solution;

/// A `Constraint` is a type of (in)equality.
///
/// These are read "from constraint to constraint value", meaning:
/// * When a constraint is `ConstraintType::Equal`, the equation is `<a, x> == b`
/// * When a constraint is `ConstraintType::Less`, the equation is `<a, x> <= b`
/// * When a constraint is `ConstraintType::Greater`, the equation is `<a, x> >= b`
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConstraintType {
    Equal,
    Greater,
    Less,
}

impl ConstraintType {
    /// The relation obtained when both sides of the constraint are multiplied by a negative value.
    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            ConstraintType::Equal => ConstraintType::Equal,
            ConstraintType::Greater => ConstraintType::Less,
            ConstraintType::Less => ConstraintType::Greater,
        }
    }

    /// Whether `activity` satisfies this relation with respect to `b`, up to a tolerance.
    pub fn is_satisfied(self, activity: f64, b: f64, tolerance: f64) -> bool {
        match self {
            ConstraintType::Equal => (activity - b).abs() <= tolerance,
            ConstraintType::Greater => activity >= b - tolerance,
            ConstraintType::Less => activity <= b + tolerance,
        }
    }
}

/// Direction of a bound.
///
/// Is used more generally in the case where the three variants of the `ConstraintType` don't suit
/// the needs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoundDirection {
    /// In the case of a variable, x >= b.
    Lower,
    /// In the case of a variable, x <= b.
    Upper,
}

/// The kind of values a variable may take.
///
/// Only the continuous relaxation is solved, the kind is carried along for the caller.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VariableType {
    Continuous,
    Integer,
    Binary,
    SemiContinuous,
    SemiInteger,
}

/// After solving, either an optimum is found or the problem is determined to be infeasible or
/// unbounded.
///
/// The simplex method might also give up before it reaches any of these conclusions.
#[derive(Debug, PartialEq)]
pub enum LinearProgramType {
    /// A finite optimum with the values of all variables of the original problem.
    FiniteOptimum(Solution),
    /// No feasible point exists.
    Infeasible,
    /// The objective function can be improved without limit.
    Unbounded,
    /// The iteration budget ran out before optimality could be certified.
    IterationLimitExceeded,
}

impl Display for LinearProgramType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LinearProgramType::FiniteOptimum(solution) => write!(f, "Optimal\n{}", solution),
            LinearProgramType::Infeasible => f.write_str("Infeasible"),
            LinearProgramType::Unbounded => f.write_str("Unbounded"),
            LinearProgramType::IterationLimitExceeded => f.write_str("Iteration limit exceeded"),
        }
    }
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Objective {
    Maximize,
    #[default]
    Minimize,
}

impl Objective {
    /// Multiplier that turns a cost of this direction into a minimization cost.
    pub fn sign(self) -> f64 {
        match self {
            Objective::Minimize => 1_f64,
            Objective::Maximize => -1_f64,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{ConstraintType, Objective};

    #[test]
    fn mirrored() {
        assert_eq!(ConstraintType::Less.mirrored(), ConstraintType::Greater);
        assert_eq!(ConstraintType::Greater.mirrored(), ConstraintType::Less);
        assert_eq!(ConstraintType::Equal.mirrored(), ConstraintType::Equal);
    }

    #[test]
    fn satisfied() {
        assert!(ConstraintType::Less.is_satisfied(1_f64, 1_f64 - 1e-9, 1e-8));
        assert!(!ConstraintType::Less.is_satisfied(2_f64, 1_f64, 1e-8));
        assert!(ConstraintType::Greater.is_satisfied(2_f64, 1_f64, 1e-8));
        assert!(!ConstraintType::Equal.is_satisfied(2_f64, 1_f64, 1e-8));
    }

    #[test]
    fn objective_sign() {
        assert_eq!(Objective::default(), Objective::Minimize);
        assert_eq!(Objective::Maximize.sign(), -1_f64);
    }
}
