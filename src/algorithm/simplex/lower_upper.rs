//! # LU Decomposition
//!
//! Dense factorization `PB = LU` of a basis matrix with partial (row) pivoting. The basis is
//! refactorized in each iteration, so no updates are supported.

/// Factorization `PB = LU`.
///
/// `L` is unit lower triangular and `U` upper triangular; both are stored in the same dense row
/// major matrix. `P` is stored as a list of row indices: row `i` of `PB` is row `row_permutation[i]`
/// of `B`.
#[derive(Debug, Clone, PartialEq)]
pub struct LUDecomposition {
    factors: Vec<Vec<f64>>,
    row_permutation: Vec<usize>,
}

impl LUDecomposition {
    /// Compute the factorization.
    ///
    /// # Arguments
    ///
    /// * `matrix`: Square, dense, row major matrix.
    /// * `tolerance`: Pivots with an absolute value below this value are considered zero.
    ///
    /// # Return value
    ///
    /// `None` if the matrix is singular.
    pub fn decompose(mut matrix: Vec<Vec<f64>>, tolerance: f64) -> Option<Self> {
        let m = matrix.len();
        debug_assert!(matrix.iter().all(|row| row.len() == m));

        let mut row_permutation = (0..m).collect::<Vec<_>>();
        for k in 0..m {
            // Largest value in the column below the diagonal
            let pivot_row = (k..m)
                .max_by(|&left, &right| matrix[left][k].abs().total_cmp(&matrix[right][k].abs()))?;
            if matrix[pivot_row][k].abs() < tolerance {
                return None;
            }
            matrix.swap(k, pivot_row);
            row_permutation.swap(k, pivot_row);

            let (upper_rows, lower_rows) = matrix.split_at_mut(k + 1);
            let pivot = &upper_rows[k];
            for row in lower_rows {
                let ratio = row[k] / pivot[k];
                row[k] = ratio;
                if ratio != 0_f64 {
                    for j in (k + 1)..m {
                        row[j] -= ratio * pivot[j];
                    }
                }
            }
        }

        Some(Self { factors: matrix, row_permutation })
    }

    /// Size of the factorized matrix.
    pub fn len(&self) -> usize {
        self.row_permutation.len()
    }

    /// Whether the factorized matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_permutation.is_empty()
    }

    /// Solve `Bx = rhs` for `x`.
    pub fn solve(&self, rhs: &[f64]) -> Vec<f64> {
        let m = self.len();
        debug_assert_eq!(rhs.len(), m);

        // Ly = Pb
        let mut x = self.row_permutation.iter().map(|&i| rhs[i]).collect::<Vec<_>>();
        for i in 0..m {
            let subtract = (0..i).map(|j| self.factors[i][j] * x[j]).sum::<f64>();
            x[i] -= subtract;
        }
        // Ux = y
        for i in (0..m).rev() {
            let subtract = ((i + 1)..m).map(|j| self.factors[i][j] * x[j]).sum::<f64>();
            x[i] = (x[i] - subtract) / self.factors[i][i];
        }

        x
    }

    /// Solve `B^T y = rhs` for `y`.
    pub fn solve_transpose(&self, rhs: &[f64]) -> Vec<f64> {
        let m = self.len();
        debug_assert_eq!(rhs.len(), m);

        // U^T z = c
        let mut z = rhs.to_vec();
        for i in 0..m {
            let subtract = (0..i).map(|j| self.factors[j][i] * z[j]).sum::<f64>();
            z[i] = (z[i] - subtract) / self.factors[i][i];
        }
        // L^T w = z
        for i in (0..m).rev() {
            let subtract = ((i + 1)..m).map(|j| self.factors[j][i] * z[j]).sum::<f64>();
            z[i] -= subtract;
        }
        // y = P^T w
        let mut y = vec![0_f64; m];
        for (i, &original) in self.row_permutation.iter().enumerate() {
            y[original] = z[i];
        }

        y
    }
}
