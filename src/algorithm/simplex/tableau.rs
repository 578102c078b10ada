//! # Tableau
//!
//! Basis administration for the revised Simplex method. The tableau itself is never stored: all
//! quantities are computed from a fresh factorization of the basis matrix.
//!
//! Columns are indexed as follows: first the columns of the problem, then one artificial column for
//! each row that didn't have a suitable column to start the basis with.
use index_utils::{remove_indices, remove_sparse_indices};
use log::{debug, error};

use crate::algorithm::simplex::lower_upper::LUDecomposition;
use crate::algorithm::simplex::SolverError;
use crate::data::linear_algebra::{SparseTuple, SparseTupleVec};
use crate::data::linear_program::general_form::LinearProgram;

/// Pivots smaller than this make the basis singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Columns, right-hand side and current basis of a problem in standard form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tableau {
    /// All columns, including the artificial ones. Rows are scaled such that `b >= 0`.
    columns: Vec<SparseTupleVec<f64>>,
    /// Right-hand side, non-negative.
    b: Vec<f64>,
    /// Cost of all columns, zero for the artificial ones.
    cost: Vec<f64>,
    /// Number of columns that are not artificial.
    nr_problem_columns: usize,

    /// Column index of the basic variable at each position.
    basis: Vec<usize>,
    /// For each column, whether it is in the basis.
    is_basic: Vec<bool>,
}

impl Tableau {
    /// Create a tableau with an initial basis.
    ///
    /// For each row, a column with a single `+1` entry in that row is used if one exists. Otherwise,
    /// an artificial column is added to start the basis with.
    pub(crate) fn new(linear_program: &LinearProgram) -> Self {
        let nr_rows = linear_program.nr_constraints();
        let nr_problem_columns = linear_program.nr_variables();

        let row_sign = linear_program.b().iter()
            .map(|&value| if value < 0_f64 { -1_f64 } else { 1_f64 })
            .collect::<Vec<_>>();
        let b = linear_program.b().iter().zip(&row_sign).map(|(value, sign)| value * sign).collect();
        let mut columns = (0..nr_problem_columns)
            .map(|j| {
                linear_program.constraints().column(j).iter()
                    .map(|&(i, value)| (i, row_sign[i] * value))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut basis_for_row = vec![None; nr_rows];
        for (j, column) in columns.iter().enumerate() {
            if let &[(i, value)] = column.as_slice() {
                if value == 1_f64 && basis_for_row[i].is_none() {
                    basis_for_row[i] = Some(j);
                }
            }
        }

        let mut basis = Vec::with_capacity(nr_rows);
        for (i, column) in basis_for_row.into_iter().enumerate() {
            let j = column.unwrap_or_else(|| {
                columns.push(vec![(i, 1_f64)]);
                columns.len() - 1
            });
            basis.push(j);
        }
        let mut is_basic = vec![false; columns.len()];
        for &j in &basis {
            is_basic[j] = true;
        }
        debug!(
            "Initial basis has {} problem columns and {} artificial columns",
            nr_rows - (columns.len() - nr_problem_columns), columns.len() - nr_problem_columns,
        );

        let mut cost = linear_program.cost();
        cost.resize(columns.len(), 0_f64);

        Self {
            columns,
            b,
            cost,
            nr_problem_columns,

            basis,
            is_basic,
        }
    }

    /// Number of constraints.
    pub(crate) fn nr_rows(&self) -> usize {
        self.b.len()
    }

    /// Number of columns that are not artificial.
    pub(crate) fn nr_problem_columns(&self) -> usize {
        self.nr_problem_columns
    }

    /// Number of artificial columns, whether they are still in the basis or not.
    pub(crate) fn nr_artificial_variables(&self) -> usize {
        self.columns.len() - self.nr_problem_columns
    }

    /// Whether a column is artificial.
    pub(crate) fn is_artificial(&self, j: usize) -> bool {
        j >= self.nr_problem_columns
    }

    /// Whether a column is in the basis.
    pub(crate) fn is_in_basis(&self, j: usize) -> bool {
        self.is_basic[j]
    }

    /// Column index of the basic variable at each basis position.
    pub(crate) fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Cost of all columns, zero for the artificial ones.
    pub(crate) fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// Cost vector of phase one: one for each artificial column, zero for the others.
    pub(crate) fn artificial_cost(&self) -> Vec<f64> {
        (0..self.columns.len())
            .map(|j| if self.is_artificial(j) { 1_f64 } else { 0_f64 })
            .collect()
    }

    /// Largest artificial cost that still counts as feasible: `tolerance` scaled by
    /// `max(1, ||b||_inf)`.
    pub(crate) fn feasibility_tolerance(&self, tolerance: f64) -> f64 {
        let largest = self.b.iter().copied().fold(1_f64, f64::max);
        tolerance * largest
    }

    /// Row of an artificial column.
    pub(crate) fn artificial_row(&self, j: usize) -> usize {
        debug_assert!(self.is_artificial(j));
        debug_assert_eq!(self.columns[j].len(), 1);

        self.columns[j][0].0
    }

    /// Factorize the current basis matrix.
    ///
    /// # Errors
    ///
    /// If the basis matrix is singular.
    pub(crate) fn factorize(&self) -> Result<LUDecomposition, SolverError> {
        let m = self.nr_rows();
        let mut dense = vec![vec![0_f64; m]; m];
        for (position, &j) in self.basis.iter().enumerate() {
            for &(i, value) in &self.columns[j] {
                dense[i][position] = value;
            }
        }

        LUDecomposition::decompose(dense, PIVOT_TOLERANCE).ok_or_else(|| {
            error!("Basis matrix of size {} is singular", m);
            SolverError::SingularBasis
        })
    }

    /// Values of the basic variables, by basis position.
    pub(crate) fn basic_solution(&self, factorization: &LUDecomposition) -> Vec<f64> {
        factorization.solve(&self.b)
    }

    /// Dual values `y` solving `B^T y = c_B`.
    pub(crate) fn dual(&self, factorization: &LUDecomposition, cost: &[f64]) -> Vec<f64> {
        let basis_cost = self.basis.iter().map(|&j| cost[j]).collect::<Vec<_>>();
        factorization.solve_transpose(&basis_cost)
    }

    /// Relative costs `c_j - a_j^T y` of the non-basic columns that may enter the basis.
    ///
    /// Artificial columns never enter.
    pub(crate) fn relative_costs<'a>(
        &'a self,
        cost: &'a [f64],
        dual: &'a [f64],
    ) -> impl Iterator<Item = SparseTuple<f64>> + 'a {
        (0..self.nr_problem_columns)
            .filter(move |&j| !self.is_basic[j])
            .map(move |j| (j, cost[j] - self.inner_product(j, dual)))
    }

    /// Inner product of a column with a dense vector of row length.
    pub(crate) fn inner_product(&self, j: usize, dense: &[f64]) -> f64 {
        self.columns[j].iter().map(|&(i, value)| value * dense[i]).sum()
    }

    /// The column expressed in the current basis, `B^{-1} a_j`.
    pub(crate) fn generate_column(&self, factorization: &LUDecomposition, j: usize) -> Vec<f64> {
        let mut dense = vec![0_f64; self.nr_rows()];
        for &(i, value) in &self.columns[j] {
            dense[i] = value;
        }

        factorization.solve(&dense)
    }

    /// Minimum ratio test.
    ///
    /// # Arguments
    ///
    /// * `basic_solution`: Values of the basic variables.
    /// * `column`: Entering column in terms of the current basis.
    /// * `tolerance`: Entries of `column` should exceed this value to be considered.
    ///
    /// # Return value
    ///
    /// Basis position of the leaving variable. Ties are broken by the lowest column index of the
    /// basic variable. `None` if the entering column can be increased without limit.
    pub(crate) fn select_primal_pivot_row(
        &self,
        basic_solution: &[f64],
        column: &[f64],
        tolerance: f64,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (position, (&value, &direction)) in basic_solution.iter().zip(column).enumerate() {
            if direction <= tolerance {
                continue;
            }

            let ratio = value.max(0_f64) / direction;
            best = match best {
                None => Some((position, ratio)),
                Some((existing, existing_ratio)) => {
                    if ratio < existing_ratio - tolerance
                        || (ratio <= existing_ratio + tolerance && self.basis[position] < self.basis[existing]) {
                        Some((position, ratio))
                    } else {
                        Some((existing, existing_ratio))
                    }
                },
            };
        }

        best.map(|(position, _)| position)
    }

    /// Replace the variable at a basis position.
    pub(crate) fn bring_into_basis(&mut self, entering: usize, position: usize) {
        debug_assert!(!self.is_basic[entering]);

        let leaving = self.basis[position];
        debug!("Column {} enters the basis, column {} leaves", entering, leaving);
        self.is_basic[leaving] = false;
        self.is_basic[entering] = true;
        self.basis[position] = entering;
    }

    /// Remove rows together with the basic variables at the given positions.
    ///
    /// # Arguments
    ///
    /// * `rows`: Sorted, deduplicated row indices.
    /// * `positions`: Basis positions of variables to remove from the basis, one for each row.
    pub(crate) fn remove_rows(&mut self, rows: &[usize], mut positions: Vec<usize>) {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
        debug_assert_eq!(rows.len(), positions.len());

        for column in &mut self.columns {
            remove_sparse_indices(column, rows);
        }
        remove_indices(&mut self.b, rows);

        positions.sort_unstable();
        for &position in &positions {
            self.is_basic[self.basis[position]] = false;
        }
        remove_indices(&mut self.basis, &positions);
    }

    /// Values of all problem columns, given the values of the basic variables.
    pub(crate) fn problem_values(&self, basic_solution: &[f64]) -> Vec<f64> {
        let mut values = vec![0_f64; self.nr_problem_columns];
        for (&j, &value) in self.basis.iter().zip(basic_solution) {
            if !self.is_artificial(j) {
                values[j] = value;
            }
        }

        values
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::simplex::tableau::Tableau;
    use crate::data::linear_program::elements::{ConstraintType, Objective};
    use crate::data::linear_program::general_form::test::create;
    use crate::data::linear_program::general_form::Variable;

    #[test]
    fn initial_basis() {
        // Second row has no unit column after making b non-negative
        let linear_program = create(
            Objective::Minimize,
            &[vec![1_f64, 1_f64, 0_f64], vec![1_f64, 0_f64, 1_f64]],
            vec![ConstraintType::Equal; 2],
            vec![4_f64, -2_f64],
            vec![Variable::new("x", 1_f64), Variable::new("s", 0_f64), Variable::new("t", 0_f64)],
        );
        let tableau = Tableau::new(&linear_program);

        assert_eq!(tableau.nr_rows(), 2);
        assert_eq!(tableau.nr_problem_columns(), 3);
        assert_eq!(tableau.nr_artificial_variables(), 1);
        assert_eq!(tableau.basis(), &[1, 3]);
        assert_eq!(tableau.artificial_row(3), 1);
        assert_eq!(tableau.artificial_cost(), vec![0_f64, 0_f64, 0_f64, 1_f64]);

        let factorization = tableau.factorize().unwrap();
        assert_eq!(tableau.basic_solution(&factorization), vec![4_f64, 2_f64]);
        assert_eq!(tableau.problem_values(&[4_f64, 2_f64]), vec![0_f64, 4_f64, 0_f64]);
    }

    #[test]
    fn feasibility_tolerance() {
        let small = create(
            Objective::Minimize,
            &[vec![1_f64]],
            vec![ConstraintType::Equal],
            vec![0.5],
            vec![Variable::new("x", 1_f64)],
        );
        assert_eq!(Tableau::new(&small).feasibility_tolerance(1e-10), 1e-10);

        let large = create(
            Objective::Minimize,
            &[vec![1_f64], vec![2_f64]],
            vec![ConstraintType::Equal; 2],
            vec![3_f64, -1e6],
            vec![Variable::new("x", 1_f64)],
        );
        assert_eq!(Tableau::new(&large).feasibility_tolerance(1e-10), 1e-10 * 1e6);
    }

    #[test]
    fn ratio_test_ties() {
        let linear_program = create(
            Objective::Minimize,
            &[vec![1_f64, 0_f64, 1_f64], vec![0_f64, 1_f64, 1_f64]],
            vec![ConstraintType::Equal; 2],
            vec![2_f64, 2_f64],
            vec![Variable::new("s", 0_f64), Variable::new("t", 0_f64), Variable::new("x", -1_f64)],
        );
        let tableau = Tableau::new(&linear_program);
        let factorization = tableau.factorize().unwrap();
        let basic_solution = tableau.basic_solution(&factorization);
        let column = tableau.generate_column(&factorization, 2);

        assert_eq!(column, vec![1_f64, 1_f64]);
        assert_eq!(tableau.select_primal_pivot_row(&basic_solution, &column, 1e-10), Some(0));
        assert_eq!(tableau.select_primal_pivot_row(&basic_solution, &[0_f64, -1_f64], 1e-10), None);

        let dual = tableau.dual(&factorization, tableau.cost());
        let relative_costs = tableau.relative_costs(tableau.cost(), &dual).collect::<Vec<_>>();
        assert_eq!(relative_costs, vec![(2, -1_f64)]);
    }

    #[test]
    fn remove_rows() {
        let linear_program = create(
            Objective::Minimize,
            &[vec![1_f64, 1_f64], vec![2_f64, 2_f64]],
            vec![ConstraintType::Equal; 2],
            vec![1_f64, 2_f64],
            vec![Variable::new("x", 1_f64), Variable::new("y", 1_f64)],
        );
        let mut tableau = Tableau::new(&linear_program);
        assert_eq!(tableau.basis(), &[2, 3]);

        tableau.remove_rows(&[1], vec![1]);
        assert_eq!(tableau.nr_rows(), 1);
        assert_eq!(tableau.basis(), &[2]);
        assert!(!tableau.is_in_basis(3));
        assert!(tableau.factorize().is_ok());
    }
}
