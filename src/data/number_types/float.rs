//! # Floating point comparisons
//!
//! Helper methods for the accuracy of floating point calculations. All tolerances are passed in
//! explicitly, they come from the presolve and solver configuration.
use num_traits::Float;

/// Whether a value is within `epsilon` of zero.
pub fn is_close_to_zero<F: Float>(value: F, epsilon: F) -> bool {
    debug_assert!(epsilon >= F::zero());

    value.abs() < epsilon
}

/// Whether two values are within `epsilon` of each other, relative to their magnitude.
///
/// For values smaller than one in absolute value, the comparison is absolute. Two infinities of the
/// same sign are considered close.
pub fn is_relatively_close<F: Float>(left: F, right: F, epsilon: F) -> bool {
    debug_assert!(epsilon >= F::zero());

    let scale = F::one().max(left.abs()).max(right.abs());
    left == right || (scale.is_finite() && (left - right).abs() <= epsilon * scale)
}

#[cfg(test)]
mod test {
    use crate::data::number_types::float::{is_close_to_zero, is_relatively_close};

    #[test]
    fn close_to_zero() {
        assert!(is_close_to_zero(1e-9_f64, 1e-8));
        assert!(is_close_to_zero(-1e-9_f64, 1e-8));
        assert!(!is_close_to_zero(1e-8_f64, 1e-8));
        assert!(!is_close_to_zero(f64::INFINITY, 1e-8));
    }

    #[test]
    fn relatively_close() {
        assert!(is_relatively_close(1e9_f64, 1e9_f64 + 1_f64, 1e-8));
        assert!(!is_relatively_close(1_f64, 1.1_f64, 1e-8));
        assert!(is_relatively_close(f64::INFINITY, f64::INFINITY, 1e-8));
        assert!(!is_relatively_close(f64::NEG_INFINITY, f64::INFINITY, 1e-8));
        assert!(!is_relatively_close(f64::INFINITY, 1_f64, 1e-8));
        assert!(is_relatively_close(1e-9_f64, 0_f64, 1e-8));
    }
}
