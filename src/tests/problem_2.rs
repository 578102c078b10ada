//! Problems with equality constraints, bounds of every kind and problems that presolve decides.
use std::collections::{BTreeMap, BTreeSet};

use crate::algorithm::{Config, solve_linear_program};
use crate::algorithm::simplex::{PivotRuleKind, SolverConfig};
use crate::data::linear_program::elements::{ConstraintType, LinearProgramType, Objective};
use crate::data::linear_program::general_form::{LinearProgram, Variable};
use crate::data::linear_program::general_form::presolve::{presolve, PresolveConfig};
use crate::data::linear_program::general_form::test::create;
use crate::data::linear_program::solution::Solution;

fn configurations() -> [Config; 3] {
    [
        Config::default(),
        Config {
            presolve: PresolveConfig { enabled: false, ..PresolveConfig::default() },
            ..Config::default()
        },
        Config {
            presolve: PresolveConfig { enabled: false, ..PresolveConfig::default() },
            solver: SolverConfig { pivot_rule: PivotRuleKind::Bland, ..SolverConfig::default() },
        },
    ]
}

fn solution(objective_value: f64, values: &[(&str, f64)]) -> Solution {
    Solution::new(
        objective_value,
        values.iter().map(|&(name, value)| (name.to_string(), value)).collect(),
    )
}

fn assert_optimum(result: LinearProgramType, expected: &Solution, compare_values: bool) {
    match result {
        LinearProgramType::FiniteOptimum(solution) => {
            assert!(
                solution.is_probably_equal_to(expected, 1e-8, compare_values),
                "Expected\n{}got\n{}", expected, solution,
            );
        },
        other => panic!("Expected a finite optimum, got {:?}", other),
    }
}

/// MAX Z = 2x1 + 3x2 - x3 + 5x4 + x5
/// subject to
/// x1 + x2 + x3 + x4 == 6
/// x1 - x2 >= -1
/// 2x5 <= 4
/// and x1 >= 1, 0 <= x2 <= 2, x3 >= 0, x4 == 1, x5 >= 0
fn equality_and_bounds() -> LinearProgram {
    create(
        Objective::Maximize,
        &[
            vec![1_f64, 1_f64, 1_f64, 1_f64, 0_f64],
            vec![1_f64, -1_f64, 0_f64, 0_f64, 0_f64],
            vec![0_f64, 0_f64, 0_f64, 0_f64, 2_f64],
        ],
        vec![ConstraintType::Equal, ConstraintType::Greater, ConstraintType::Less],
        vec![6_f64, -1_f64, 4_f64],
        vec![
            Variable::new("x1", 2_f64).with_bounds(1_f64, f64::INFINITY),
            Variable::new("x2", 3_f64).with_bounds(0_f64, 2_f64),
            Variable::new("x3", -1_f64),
            Variable::new("x4", 5_f64).with_bounds(1_f64, 1_f64),
            Variable::new("x5", 1_f64),
        ],
    )
}

#[test]
fn presolve_equality_and_bounds() {
    let state = presolve(equality_and_bounds(), &PresolveConfig::default());

    assert!(!state.is_terminal());
    assert_eq!(state.removed_rows(), &BTreeSet::from([2]));
    assert_eq!(state.removed_columns(), &BTreeSet::from([3, 4]));
    assert_eq!(
        state.fixed_values(),
        &BTreeMap::from([("x4".to_string(), 1_f64), ("x5".to_string(), 2_f64)]),
    );
    assert_eq!(state.reduced().b(), &[5_f64, -1_f64]);
    assert_eq!(state.reduced().names().collect::<Vec<_>>(), vec!["x1", "x2", "x3"]);
}

#[test]
fn equality_and_bounds_optimum() {
    let expected = solution(19_f64, &[("x1", 3_f64), ("x2", 2_f64), ("x3", 0_f64), ("x4", 1_f64), ("x5", 2_f64)]);
    for config in &configurations() {
        assert_optimum(solve_linear_program(equality_and_bounds(), config).unwrap(), &expected, true);
    }
}

#[test]
fn free_variable() {
    // MIN x1 s.t. x1 - x2 == -3, x1 free, 0 <= x2 <= 1
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, -1_f64]],
        vec![ConstraintType::Equal],
        vec![-3_f64],
        vec![
            Variable::new("x1", 1_f64).with_bounds(f64::NEG_INFINITY, f64::INFINITY),
            Variable::new("x2", 0_f64).with_bounds(0_f64, 1_f64),
        ],
    );

    let expected = solution(-3_f64, &[("x1", -3_f64), ("x2", 0_f64)]);
    for config in &configurations() {
        assert_optimum(solve_linear_program(linear_program.clone(), config).unwrap(), &expected, true);
    }
}

#[test]
fn only_upper_bound() {
    // MAX x s.t. x + y <= 10, x <= 4, y >= 0; y is not unique
    let linear_program = create(
        Objective::Maximize,
        &[vec![1_f64, 1_f64]],
        vec![ConstraintType::Less],
        vec![10_f64],
        vec![
            Variable::new("x", 1_f64).with_bounds(f64::NEG_INFINITY, 4_f64),
            Variable::new("y", 0_f64),
        ],
    );

    let expected = solution(4_f64, &[("x", 4_f64), ("y", 0_f64)]);
    for config in &configurations() {
        let result = solve_linear_program(linear_program.clone(), config).unwrap();
        if let LinearProgramType::FiniteOptimum(solution) = &result {
            assert!((solution.value("x").unwrap() - 4_f64).abs() < 1e-8);
        }
        assert_optimum(result, &expected, false);
    }
}

#[test]
fn solved_by_presolve() {
    // MIN x1 + x2 s.t. x1 == 2, x2 >= 1
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 0_f64]],
        vec![ConstraintType::Equal],
        vec![2_f64],
        vec![
            Variable::new("x1", 1_f64),
            Variable::new("x2", 1_f64).with_bounds(1_f64, f64::INFINITY),
        ],
    );

    let state = presolve(linear_program.clone(), &PresolveConfig::default());
    assert_eq!(state.reduced().nr_variables(), 0);
    assert_eq!(state.reduced().nr_constraints(), 0);

    let expected = solution(3_f64, &[("x1", 2_f64), ("x2", 1_f64)]);
    for config in &configurations() {
        assert_optimum(solve_linear_program(linear_program.clone(), config).unwrap(), &expected, true);
    }
}

#[test]
fn infeasible() {
    // x1 == 1, x1 == 2
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64], vec![1_f64]],
        vec![ConstraintType::Equal; 2],
        vec![1_f64, 2_f64],
        vec![Variable::new("x1", 1_f64)],
    );

    for config in &configurations() {
        assert_eq!(solve_linear_program(linear_program.clone(), config).unwrap(), LinearProgramType::Infeasible);
    }
}

#[test]
fn unbounded() {
    // MIN -x1 s.t. x1 - x2 == 0
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, -1_f64]],
        vec![ConstraintType::Equal],
        vec![0_f64],
        vec![Variable::new("x1", -1_f64), Variable::new("x2", 0_f64)],
    );
    for config in &configurations() {
        assert_eq!(solve_linear_program(linear_program.clone(), config).unwrap(), LinearProgramType::Unbounded);
    }

    // MIN -x1 without constraints
    let no_constraints = create(Objective::Minimize, &[], vec![], vec![], vec![Variable::new("x1", -1_f64)]);
    for config in &configurations() {
        assert_eq!(solve_linear_program(no_constraints.clone(), config).unwrap(), LinearProgramType::Unbounded);
    }
}

#[test]
fn iteration_limit() {
    let config = Config {
        solver: SolverConfig { max_iterations: 0, ..SolverConfig::default() },
        ..Config::default()
    };

    assert_eq!(
        solve_linear_program(equality_and_bounds(), &config).unwrap(),
        LinearProgramType::IterationLimitExceeded,
    );
}
