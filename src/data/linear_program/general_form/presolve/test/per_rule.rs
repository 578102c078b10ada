use std::collections::BTreeSet;

use crate::data::linear_program::elements::{ConstraintType, Objective};
use crate::data::linear_program::general_form::presolve::{
    eliminate_empty_columns,
    eliminate_fixed_variables,
    eliminate_row_singletons,
    PresolveConfig,
    ReductionState,
    remove_dependent_rows,
    remove_empty_rows,
};
use crate::data::linear_program::general_form::presolve::test::mixed;
use crate::data::linear_program::general_form::test::create;
use crate::data::linear_program::general_form::{LinearProgram, Variable};

fn apply(rule: fn(ReductionState, &PresolveConfig) -> ReductionState, linear_program: LinearProgram) -> ReductionState {
    rule(ReductionState::new(linear_program), &PresolveConfig::default())
}

fn single_column(rows: &[f64], constraint_types: Vec<ConstraintType>, b: Vec<f64>, variable: Variable) -> LinearProgram {
    create(
        Objective::Minimize,
        &rows.iter().map(|&value| vec![value]).collect::<Vec<_>>(),
        constraint_types,
        b,
        vec![variable],
    )
}

#[test]
fn fixed_variable_feasible() {
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 1_f64], vec![1_f64, 0_f64]],
        vec![ConstraintType::Less, ConstraintType::Equal],
        vec![4_f64, 1_f64],
        vec![
            Variable::new("x", 3_f64).with_bounds(1_f64, 1_f64),
            Variable::new("y", 1_f64),
        ],
    );
    let state = apply(eliminate_fixed_variables, linear_program);

    assert!(!state.is_terminal());
    assert_eq!(state.fixed_values().get("x"), Some(&1_f64));
    assert_eq!(state.removed_columns(), &[0].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.removed_rows(), &[1].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.reduced().names().collect::<Vec<_>>(), vec!["y"]);
    assert_eq!(state.reduced().b(), &[3_f64]);
    assert_eq!(state.reduced().fixed_cost(), 3_f64);
    assert_eq!(state.original_column(0), 1);
    assert_eq!(state.original_row(0), 0);
}

#[test]
fn fixed_variable_infeasible() {
    let linear_program = single_column(
        &[1_f64],
        vec![ConstraintType::Equal],
        vec![2_f64],
        Variable::new("x", 1_f64).with_bounds(1_f64, 1_f64),
    );
    let state = apply(eliminate_fixed_variables, linear_program);

    assert!(state.is_infeasible());
    assert!(!state.is_unbounded());
}

#[test]
fn fixed_variable_within_tolerance() {
    let linear_program = single_column(
        &[1_f64],
        vec![ConstraintType::Less],
        vec![2_f64],
        Variable::new("x", 1_f64).with_bounds(1_f64, 1_f64 + 1e-10),
    );
    let state = apply(eliminate_fixed_variables, linear_program);

    assert_eq!(state.fixed_values().get("x"), Some(&1_f64));
    assert_eq!(state.reduced().nr_variables(), 0);
    assert_eq!(state.reduced().nr_constraints(), 0);
}

#[test]
fn empty_rows() {
    let linear_program = create(
        Objective::Minimize,
        &[vec![0_f64], vec![1_f64], vec![0_f64], vec![0_f64]],
        vec![ConstraintType::Less, ConstraintType::Less, ConstraintType::Equal, ConstraintType::Greater],
        vec![1_f64, 1_f64, 1e-10, -3_f64],
        vec![Variable::new("x", 1_f64)],
    );
    let state = apply(remove_empty_rows, linear_program);

    assert!(!state.is_terminal());
    assert_eq!(state.removed_rows(), &[0, 2, 3].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.reduced().nr_constraints(), 1);
    assert_eq!(state.reduced().nr_variables(), 1);
    assert_eq!(state.original_row(0), 1);
}

#[test]
fn empty_rows_infeasible() {
    for (constraint_type, b) in [
        (ConstraintType::Equal, 1_f64),
        (ConstraintType::Less, -1_f64),
        (ConstraintType::Greater, 1_f64),
    ] {
        let linear_program = single_column(&[0_f64], vec![constraint_type], vec![b], Variable::new("x", 1_f64));
        let state = apply(remove_empty_rows, linear_program);

        assert!(state.is_infeasible(), "{:?} {}", constraint_type, b);
        assert_eq!(state.reduced().nr_constraints(), 1);
    }
}

#[test]
fn row_singleton_equality_cascades() {
    let linear_program = create(
        Objective::Minimize,
        &[vec![2_f64, 0_f64], vec![1_f64, 1_f64]],
        vec![ConstraintType::Equal, ConstraintType::Less],
        vec![4_f64, 5_f64],
        vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
    );
    let state = apply(eliminate_row_singletons, linear_program);

    assert!(!state.is_terminal());
    assert_eq!(state.fixed_values().get("x"), Some(&2_f64));
    assert_eq!(state.reduced().fixed_cost(), 2_f64);
    assert_eq!(state.reduced().nr_constraints(), 0);
    assert_eq!(state.reduced().variables(), &[Variable::new("y", 1_f64).with_bounds(0_f64, 3_f64)]);
    assert_eq!(state.original_column(0), 1);
}

#[test]
fn row_singleton_bounds() {
    let linear_program = create(
        Objective::Minimize,
        &[vec![2_f64, 0_f64], vec![0_f64, -1_f64], vec![1_f64, 1_f64]],
        vec![ConstraintType::Less, ConstraintType::Less, ConstraintType::Greater],
        vec![4_f64, 3_f64, 1_f64],
        vec![
            Variable::new("x", 1_f64),
            Variable::new("y", 1_f64).with_bounds(f64::NEG_INFINITY, f64::INFINITY),
        ],
    );
    let state = apply(eliminate_row_singletons, linear_program);

    assert!(!state.is_terminal());
    assert!(state.fixed_values().is_empty());
    assert_eq!(state.removed_rows(), &[0, 1].into_iter().collect::<BTreeSet<_>>());
    assert!(state.removed_columns().is_empty());
    assert_eq!(state.reduced().variables(), &[
        Variable::new("x", 1_f64).with_bounds(0_f64, 2_f64),
        Variable::new("y", 1_f64).with_bounds(-3_f64, f64::INFINITY),
    ]);
    assert_eq!(state.original_row(0), 2);
}

#[test]
fn row_singleton_infeasible() {
    // x1 = 1 and x1 = 2
    let linear_program = single_column(
        &[1_f64, 1_f64],
        vec![ConstraintType::Equal; 2],
        vec![1_f64, 2_f64],
        Variable::new("x1", 1_f64),
    );
    let state = apply(eliminate_row_singletons, linear_program);
    assert!(state.is_infeasible());

    // Value outside of the bounds
    let linear_program = single_column(
        &[1_f64],
        vec![ConstraintType::Equal],
        vec![-1_f64],
        Variable::new("x1", 1_f64),
    );
    assert!(apply(eliminate_row_singletons, linear_program).is_infeasible());

    // Crossing bounds
    let linear_program = single_column(
        &[-2_f64],
        vec![ConstraintType::Greater],
        vec![4_f64],
        Variable::new("x1", 1_f64),
    );
    let state = apply(eliminate_row_singletons, linear_program);
    assert!(state.is_infeasible());
    let variable = &state.reduced().variables()[0];
    assert!(variable.lower_bound <= variable.upper_bound);
}

#[test]
fn empty_columns() {
    let linear_program = create(
        Objective::Minimize,
        &[vec![0_f64, 0_f64, 0_f64, 1_f64]],
        vec![ConstraintType::Less],
        vec![1_f64],
        vec![
            Variable::new("positive", 2_f64).with_bounds(1_f64, 5_f64),
            Variable::new("negative", -1_f64).with_bounds(0_f64, 5_f64),
            Variable::new("free", 0_f64).with_bounds(f64::NEG_INFINITY, f64::INFINITY),
            Variable::new("used", 1_f64),
        ],
    );
    let state = apply(eliminate_empty_columns, linear_program);

    assert!(!state.is_terminal());
    assert_eq!(state.fixed_values().get("positive"), Some(&1_f64));
    assert_eq!(state.fixed_values().get("negative"), Some(&5_f64));
    assert_eq!(state.fixed_values().get("free"), Some(&0_f64));
    assert_eq!(state.reduced().fixed_cost(), 2_f64 - 5_f64);
    assert_eq!(state.reduced().names().collect::<Vec<_>>(), vec!["used"]);
    assert_eq!(state.original_column(0), 3);
}

#[test]
fn empty_column_unbounded() {
    let minimize = create(Objective::Minimize, &[], vec![], vec![], vec![Variable::new("x1", -1_f64)]);
    assert!(apply(eliminate_empty_columns, minimize).is_unbounded());

    let maximize = create(Objective::Maximize, &[], vec![], vec![], vec![Variable::new("x1", 1_f64)]);
    assert!(apply(eliminate_empty_columns, maximize).is_unbounded());

    let bounded = create(Objective::Maximize, &[], vec![], vec![], vec![Variable::new("x1", -1_f64)]);
    let state = apply(eliminate_empty_columns, bounded);
    assert!(!state.is_terminal());
    assert_eq!(state.fixed_values().get("x1"), Some(&0_f64));
}

#[test]
fn dependent_rows() {
    // Both equalities
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 2_f64], vec![2_f64, 4_f64]],
        vec![ConstraintType::Equal; 2],
        vec![3_f64, 6_f64],
        vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
    );
    let state = apply(remove_dependent_rows, linear_program);
    assert_eq!(state.removed_rows(), &[1].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.row_ratios().get(&1), Some(&(0, 2_f64)));

    // The inequality is implied by the equality
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 1_f64], vec![2_f64, 2_f64]],
        vec![ConstraintType::Less, ConstraintType::Equal],
        vec![2_f64, 4_f64],
        vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
    );
    let state = apply(remove_dependent_rows, linear_program);
    assert_eq!(state.removed_rows(), &[0].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.row_ratios().get(&0), Some(&(1, 0.5_f64)));
    assert_eq!(state.reduced().constraint_types(), &[ConstraintType::Equal]);

    // Mirrored inequalities in the same direction
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 1_f64], vec![-1_f64, -1_f64]],
        vec![ConstraintType::Less, ConstraintType::Greater],
        vec![2_f64, -2_f64],
        vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
    );
    let state = apply(remove_dependent_rows, linear_program);
    assert_eq!(state.removed_rows(), &[1].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.row_ratios().get(&1), Some(&(0, -1_f64)));

    // Opposite directions are kept
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 1_f64], vec![1_f64, 1_f64]],
        vec![ConstraintType::Less, ConstraintType::Greater],
        vec![2_f64, 2_f64],
        vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
    );
    let state = apply(remove_dependent_rows, linear_program);
    assert!(state.removed_rows().is_empty());
    assert!(state.row_ratios().is_empty());

    // Different right-hand side for inequalities: nothing happens
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 1_f64], vec![1_f64, 1_f64]],
        vec![ConstraintType::Less; 2],
        vec![2_f64, 3_f64],
        vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
    );
    assert!(apply(remove_dependent_rows, linear_program).removed_rows().is_empty());
}

#[test]
fn dependent_rows_infeasible() {
    let linear_program = create(
        Objective::Minimize,
        &[vec![1_f64, 1_f64], vec![2_f64, 2_f64]],
        vec![ConstraintType::Equal; 2],
        vec![2_f64, 5_f64],
        vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
    );

    assert!(apply(remove_dependent_rows, linear_program).is_infeasible());
}

#[test]
fn idempotent() {
    let rules: [fn(ReductionState, &PresolveConfig) -> ReductionState; 5] = [
        eliminate_fixed_variables,
        remove_empty_rows,
        eliminate_row_singletons,
        eliminate_empty_columns,
        remove_dependent_rows,
    ];
    let config = PresolveConfig::default();

    for rule in rules {
        let once = rule(ReductionState::new(mixed()), &config);
        let twice = rule(once.clone(), &config);
        assert!(once.nr_reductions() > 0);
        assert_eq!(once, twice);
    }
}

#[test]
fn terminal_state_is_left_alone() {
    let linear_program = single_column(
        &[1_f64, 1_f64],
        vec![ConstraintType::Equal; 2],
        vec![1_f64, 2_f64],
        Variable::new("x1", 1_f64),
    );
    let state = apply(eliminate_row_singletons, linear_program);
    assert!(state.is_infeasible());

    let after = remove_dependent_rows(state.clone(), &PresolveConfig::default());
    assert_eq!(after, state);
}

#[test]
fn index_translation_across_rules() {
    let config = PresolveConfig::default();
    let state = ReductionState::new(mixed());

    let state = eliminate_fixed_variables(state, &config);
    // Column x0 and row 5 are gone
    assert_eq!(state.original_column(0), 1);
    assert_eq!(state.reduced().nr_constraints(), 5);
    assert_eq!(state.original_row(4), 4);

    let state = remove_empty_rows(state, &config);
    assert_eq!(state.removed_rows(), &[1, 5].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.original_row(1), 2);

    let state = eliminate_row_singletons(state, &config);
    assert_eq!(state.removed_rows(), &[0, 1, 2, 5].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.original_row(0), 3);
    assert_eq!(state.original_row(1), 4);
    assert_eq!(state.reduced().variables()[0].upper_bound, 4_f64);

    let state = eliminate_empty_columns(state, &config);
    assert_eq!(state.removed_columns(), &[0, 3].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.original_column(1), 2);

    let state = remove_dependent_rows(state, &config);
    assert_eq!(state.row_ratios().get(&4), Some(&(3, 2_f64)));
    assert_eq!(state.removed_rows(), &[0, 1, 2, 4, 5].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(state.original_row(0), 3);
}
