use crate::data::linear_program::elements::{ConstraintType, Objective};
use crate::data::linear_program::general_form::{LinearProgram, Variable};
use crate::data::linear_program::general_form::test::create;

mod per_rule;

/// MIN Z = x0 - x1 + 2x2
/// subject to
/// x0 + x1 <= 5
/// 0 <= 1
/// 2x1 <= 8
/// x1 + x2 = 3
/// 2x1 + 2x2 = 6
/// x0 >= 1/2
/// and x0 = 1, x1 >= 0, 0 <= x2 <= 10, x3 free
///
/// Every rule applies to this problem.
fn mixed() -> LinearProgram {
    create(
        Objective::Minimize,
        &[
            vec![1_f64, 1_f64, 0_f64, 0_f64],
            vec![0_f64, 0_f64, 0_f64, 0_f64],
            vec![0_f64, 2_f64, 0_f64, 0_f64],
            vec![0_f64, 1_f64, 1_f64, 0_f64],
            vec![0_f64, 2_f64, 2_f64, 0_f64],
            vec![1_f64, 0_f64, 0_f64, 0_f64],
        ],
        vec![
            ConstraintType::Less,
            ConstraintType::Less,
            ConstraintType::Less,
            ConstraintType::Equal,
            ConstraintType::Equal,
            ConstraintType::Greater,
        ],
        vec![5_f64, 1_f64, 8_f64, 3_f64, 6_f64, 0.5_f64],
        vec![
            Variable::new("x0", 1_f64).with_bounds(1_f64, 1_f64),
            Variable::new("x1", -1_f64),
            Variable::new("x2", 2_f64).with_bounds(0_f64, 10_f64),
            Variable::new("x3", 0_f64).with_bounds(f64::NEG_INFINITY, f64::INFINITY),
        ],
    )
}
