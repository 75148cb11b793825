use log::warn;
use nalgebra::DMatrix;

/// Ratio of the largest to the smallest singular value; infinite for a singular matrix.
pub fn condition_number(A: &DMatrix<f64>) -> f64 {
    let singular_values = A.singular_values();
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    if min_sigma == 0.0 {
        return f64::INFINITY;
    }
    max_sigma / min_sigma
}

/// A matrix is poorly conditioned if the inverse (or the solution of A x = b) is sensitive
/// to small perturbations of the entries; measured by the condition number.
pub fn poorly_conditioned(A: &DMatrix<f64>, threshold: f64) -> bool {
    let condition_number = condition_number(A);
    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The matrix is poorly conditioned, expect large entries in the inverse. Condition number = {:.2e}",
            condition_number
        );
    }
    poorly_conditioned
}
