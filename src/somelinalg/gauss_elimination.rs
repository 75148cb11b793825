use log::debug;

use crate::errors::{MathError, MathResult};

/// pivots smaller than this are treated as zero and their column is skipped
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Solves the square system `A x = b` by Gaussian elimination with partial pivoting.
///
/// The system is solved on an augmented copy, inputs are untouched. A column whose best pivot
/// is below [`PIVOT_EPSILON`] is skipped instead of failing, and back substitution divides by
/// `1` where the diagonal is exactly zero: a rank-deficient normal-equation system still yields
/// finite coefficients.
pub fn gaussian_elimination(A: &[Vec<f64>], b: &[f64]) -> MathResult<Vec<f64>> {
    let n = A.len();
    if b.len() != n || A.iter().any(|row| row.len() != n) {
        return Err(MathError::Dimension(format!(
            "Gaussian elimination needs a square system, got {} equations, {} right-hand sides",
            n,
            b.len()
        )));
    }

    let mut aug: Vec<Vec<f64>> = A
        .iter()
        .zip(b.iter())
        .map(|(row, rhs)| {
            let mut r = row.clone();
            r.push(*rhs);
            r
        })
        .collect();

    for col in 0..n {
        let mut max_row = col;
        for row in (col + 1)..n {
            if aug[row][col].abs() > aug[max_row][col].abs() {
                max_row = row;
            }
        }
        aug.swap(col, max_row);

        if aug[col][col].abs() < PIVOT_EPSILON {
            debug!("pivot of column {} is numerically zero, column skipped", col);
            continue;
        }

        for row in (col + 1)..n {
            let factor = aug[row][col] / aug[col][col];
            for j in col..=n {
                aug[row][j] -= factor * aug[col][j];
            }
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = aug[i][n];
        for j in (i + 1)..n {
            sum -= aug[i][j] * x[j];
        }
        let diagonal = if aug[i][i] == 0.0 { 1.0 } else { aug[i][i] };
        x[i] = sum / diagonal;
    }
    Ok(x)
}
