//! # Pivot rules
//!
//! Strategies for moving from basis to basis.
use crate::data::linear_algebra::SparseTuple;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected, a row needs to be found. This decision is made independent of
/// the strategy: the minimum ratio test breaks ties by the lowest index of the leaving variable.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// # Arguments
    ///
    /// * `relative_costs`: Index and relative cost of each column that may enter the basis, by
    /// increasing index.
    /// * `tolerance`: Relative costs should be below `-tolerance` to be considered improving.
    ///
    /// # Return value
    ///
    /// The entering column and its relative cost, or `None` if the current basis is optimal.
    fn select_primal_pivot_column(
        &mut self,
        relative_costs: impl Iterator<Item = SparseTuple<f64>>,
        tolerance: f64,
    ) -> Option<SparseTuple<f64>>;
}

/// Simply pivot on the first column, which has a negative relative cost.
///
/// Together with the tie breaking in the ratio test, this is Bland's rule, which never cycles.
pub struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(
        &mut self,
        mut relative_costs: impl Iterator<Item = SparseTuple<f64>>,
        tolerance: f64,
    ) -> Option<SparseTuple<f64>> {
        relative_costs.find(|&(_, cost)| cost < -tolerance)
    }
}

/// Simply pivot on the column, which has the most negative relative cost.
///
/// This is Dantzig's rule. Of equal costs, the column with the lowest index is selected.
pub struct SteepestDescentAlongVariable;
impl PivotRule for SteepestDescentAlongVariable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(
        &mut self,
        relative_costs: impl Iterator<Item = SparseTuple<f64>>,
        tolerance: f64,
    ) -> Option<SparseTuple<f64>> {
        let mut smallest: Option<SparseTuple<f64>> = None;
        for (j, cost) in relative_costs.filter(|&(_, cost)| cost < -tolerance) {
            if let Some((existing_j, existing_cost)) = smallest.as_mut() {
                if cost < *existing_cost {
                    *existing_j = j;
                    *existing_cost = cost;
                }
            } else { smallest = Some((j, cost)) }
        }

        smallest
    }
}
