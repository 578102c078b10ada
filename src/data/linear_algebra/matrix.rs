//! # Sparse matrices
//!
//! Constraint data is stored column major: the simplex method needs fast access to columns, while
//! the presolve rules that need rows build a row major copy once per pass.

use index_utils::{remove_indices, remove_sparse_indices};
use itertools::Itertools;

use crate::data::linear_algebra::{SparseTuple, SparseTupleVec};

/// Column major sparse matrix of `f64` values.
///
/// Each column is sorted by row index and contains no explicit zeros.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparse {
    columns: Vec<SparseTupleVec<f64>>,
    nr_rows: usize,
}

impl Sparse {
    /// Create a new instance from column data.
    ///
    /// # Arguments
    ///
    /// * `columns`: For each column, `(row, value)` tuples sorted by row, without zero values.
    /// * `nr_rows`: Number of rows; all row indices should be smaller.
    pub fn new(columns: Vec<SparseTupleVec<f64>>, nr_rows: usize) -> Self {
        debug_assert!(columns.iter().all(|column| column.is_sorted_by_key(|&(i, _)| i)));
        debug_assert!(columns.iter().all(|column| column.iter().all(|&(i, _)| i < nr_rows)));
        debug_assert!(columns.iter().all(|column| column.iter().all(|&(_, v)| v != 0_f64)));

        Self { columns, nr_rows }
    }

    /// A matrix without any nonzero values.
    pub fn zeros(nr_rows: usize, nr_columns: usize) -> Self {
        Self { columns: vec![Vec::new(); nr_columns], nr_rows }
    }

    /// Create a matrix from row major dense data.
    ///
    /// Zero values are not stored. All rows should have length `nr_columns`.
    pub fn from_dense(rows: &[Vec<f64>], nr_columns: usize) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == nr_columns));

        let mut builder = MatrixBuilder::new(rows.len(), nr_columns);
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                builder.push(i, j, value);
            }
        }

        builder.build()
    }

    /// Number of rows.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns.
    pub fn nr_columns(&self) -> usize {
        self.columns.len()
    }

    /// All `(row, value)` tuples of column `j`.
    pub fn column(&self, j: usize) -> &[SparseTuple<f64>] {
        debug_assert!(j < self.nr_columns());

        &self.columns[j]
    }

    /// Row major copy of this matrix.
    ///
    /// # Return value
    ///
    /// For each row, `(column, value)` tuples sorted by column.
    pub fn row_major(&self) -> Vec<SparseTupleVec<f64>> {
        let mut rows = vec![Vec::new(); self.nr_rows];
        for (j, column) in self.columns.iter().enumerate() {
            for &(i, value) in column {
                rows[i].push((j, value));
            }
        }

        rows
    }

    /// Compute `A x` for a dense `x` of length `nr_columns`.
    pub fn multiply(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.nr_columns());

        let mut result = vec![0_f64; self.nr_rows];
        for (column, &factor) in self.columns.iter().zip_eq(x) {
            if factor != 0_f64 {
                for &(i, value) in column {
                    result[i] += value * factor;
                }
            }
        }

        result
    }

    /// Remove rows, shifting the indices of the rows that remain.
    ///
    /// # Arguments
    ///
    /// * `rows`: Sorted, deduplicated row indices.
    pub(crate) fn remove_rows(&mut self, rows: &[usize]) {
        debug_assert!(rows.is_sorted());
        debug_assert!(rows.iter().all(|&i| i < self.nr_rows));

        if rows.is_empty() {
            return;
        }
        for column in &mut self.columns {
            remove_sparse_indices(column, rows);
        }
        self.nr_rows -= rows.len();
    }

    /// Remove columns.
    ///
    /// # Arguments
    ///
    /// * `columns`: Sorted, deduplicated column indices.
    pub(crate) fn remove_columns(&mut self, columns: &[usize]) {
        debug_assert!(columns.is_sorted());
        debug_assert!(columns.iter().all(|&j| j < self.nr_columns()));

        remove_indices(&mut self.columns, columns);
    }
}

/// Collects `(row, column, value)` triplets and assembles a `Sparse` matrix once.
///
/// Rows and columns can be appended while collecting, which is how slack columns and bound rows are
/// added when converting to standard form.
#[derive(Debug)]
pub struct MatrixBuilder {
    nr_rows: usize,
    nr_columns: usize,
    triplets: Vec<(usize, usize, f64)>,
}

impl MatrixBuilder {
    /// Start building a matrix of a given initial size.
    pub fn new(nr_rows: usize, nr_columns: usize) -> Self {
        Self { nr_rows, nr_columns, triplets: Vec::new() }
    }

    /// Add a value; duplicate coordinates are summed when building, zeros are ignored.
    pub fn push(&mut self, row: usize, column: usize, value: f64) {
        debug_assert!(row < self.nr_rows);
        debug_assert!(column < self.nr_columns);
        debug_assert!(value.is_finite());

        if value != 0_f64 {
            self.triplets.push((row, column, value));
        }
    }

    /// Append an empty row, returning its index.
    pub fn add_row(&mut self) -> usize {
        self.nr_rows += 1;
        self.nr_rows - 1
    }

    /// Append an empty column, returning its index.
    pub fn add_column(&mut self) -> usize {
        self.nr_columns += 1;
        self.nr_columns - 1
    }

    /// Current number of rows.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Current number of columns.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Assemble the matrix.
    pub fn build(self) -> Sparse {
        let Self { nr_rows, nr_columns, mut triplets } = self;
        triplets.sort_unstable_by_key(|&(i, j, _)| (j, i));

        let mut columns = vec![Vec::new(); nr_columns];
        for ((i, j), group) in &triplets.into_iter().chunk_by(|&(i, j, _)| (i, j)) {
            let value = group.map(|(_, _, value)| value).sum::<f64>();
            if value != 0_f64 {
                columns[j].push((i, value));
            }
        }

        Sparse::new(columns, nr_rows)
    }
}
