//! # Matrix Engine
//!
//! Dense matrix operations on row-major `Vec<Vec<f64>>` values: add, subtract, multiply,
//! determinant, inverse, transpose, scalar multiply. Inputs are never mutated.
//!
//! Determinants up to 5x5 use first-row cofactor expansion, larger ones LU decomposition.
//! Products, inverses and transposes go through `nalgebra::DMatrix`.

use log::{debug, warn};
use nalgebra::DMatrix;
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::{MathError, MathResult};
use crate::somelinalg::linear_sys_diagnostics::poorly_conditioned;

pub type Matrix = Vec<Vec<f64>>;

/// largest order solved by cofactor expansion
const COFACTOR_MAX_ORDER: usize = 5;
const CONDITION_WARNING: f64 = 1e12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MatrixOperation {
    Add,
    Subtract,
    Multiply,
    Determinant,
    Inverse,
    Transpose,
    ScalarMultiply,
}

/// Result of a matrix operation: a matrix or, for the determinant, a number.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixOutput {
    Matrix(Matrix),
    Scalar(f64),
}

/// `rows x cols` matrix of zeros.
pub fn create_matrix(rows: usize, cols: usize) -> Matrix {
    vec![vec![0.0; cols]; rows]
}

pub fn identity(n: usize) -> Matrix {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Entries with 4 decimals, tab separated columns, newline separated rows.
pub fn format_matrix_result(result: &MatrixOutput) -> String {
    match result {
        MatrixOutput::Scalar(value) => format!("{:.4}", value),
        MatrixOutput::Matrix(m) => m
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| format!("{:.4}", v))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Checks that `m` is non-empty, rectangular and finite; returns `(rows, cols)`.
pub fn validate(m: &[Vec<f64>], name: &str) -> MathResult<(usize, usize)> {
    let rows = m.len();
    let cols = m.first().map(|row| row.len()).unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(MathError::Dimension(format!("Matrix {} is empty", name)));
    }
    for (i, row) in m.iter().enumerate() {
        if row.len() != cols {
            return Err(MathError::Dimension(format!(
                "Matrix {} is not rectangular: row {} has {} columns, expected {}",
                name,
                i + 1,
                row.len(),
                cols
            )));
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(MathError::Dimension(format!(
                "Matrix {} has a non-finite entry at ({}, {})",
                name,
                i + 1,
                j + 1
            )));
        }
    }
    Ok((rows, cols))
}

fn require_square(m: &[Vec<f64>], op: MatrixOperation) -> MathResult<usize> {
    let (rows, cols) = validate(m, "A")?;
    if rows != cols {
        return Err(MathError::Dimension(format!(
            "Matrix must be square for {} (got {}x{})",
            op, rows, cols
        )));
    }
    Ok(rows)
}

pub fn to_dmatrix(m: &[Vec<f64>]) -> DMatrix<f64> {
    let cols = m.first().map(|row| row.len()).unwrap_or(0);
    DMatrix::from_fn(m.len(), cols, |i, j| m[i][j])
}

pub fn from_dmatrix(m: &DMatrix<f64>) -> Matrix {
    (0..m.nrows())
        .map(|i| (0..m.ncols()).map(|j| m[(i, j)]).collect())
        .collect()
}

/// Minor of `m` without row 0 and column `col`.
fn first_row_minor(m: &[Vec<f64>], col: usize) -> Matrix {
    m[1..]
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(j, _)| *j != col)
                .map(|(_, v)| *v)
                .collect()
        })
        .collect()
}

/// Determinant by first-row cofactor expansion, `m` must be square and non-empty.
pub fn cofactor_determinant(m: &[Vec<f64>]) -> f64 {
    match m.len() {
        1 => m[0][0],
        2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
        n => (0..n)
            .filter(|&j| m[0][j] != 0.0)
            .map(|j| {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[0][j] * cofactor_determinant(&first_row_minor(m, j))
            })
            .sum(),
    }
}

pub fn determinant(a: &[Vec<f64>]) -> MathResult<f64> {
    let n = require_square(a, MatrixOperation::Determinant)?;
    if n <= COFACTOR_MAX_ORDER {
        Ok(cofactor_determinant(a))
    } else {
        debug!("determinant of order {} via LU decomposition", n);
        Ok(to_dmatrix(a).determinant())
    }
}

pub fn inverse(a: &[Vec<f64>]) -> MathResult<Matrix> {
    let n = require_square(a, MatrixOperation::Inverse)?;
    if determinant(a)? == 0.0 {
        warn!("Matrix is singular, the inverse does not exist");
        return Err(MathError::SingularMatrix);
    }
    let m = to_dmatrix(a);
    if n > 1 {
        poorly_conditioned(&m, CONDITION_WARNING);
    }
    match m.try_inverse() {
        Some(inv) => Ok(from_dmatrix(&inv)),
        None => {
            warn!("LU decomposition found a zero pivot, the inverse does not exist");
            Err(MathError::SingularMatrix)
        }
    }
}

pub fn transpose(a: &[Vec<f64>]) -> MathResult<Matrix> {
    validate(a, "A")?;
    Ok(from_dmatrix(&to_dmatrix(a).transpose()))
}

pub fn multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> MathResult<Matrix> {
    let (ra, ca) = validate(a, "A")?;
    let (rb, cb) = validate(b, "B")?;
    if ca != rb {
        return Err(MathError::Dimension(format!(
            "Cannot multiply {}x{} by {}x{}: columns of A must equal rows of B",
            ra, ca, rb, cb
        )));
    }
    Ok(from_dmatrix(&(to_dmatrix(a) * to_dmatrix(b))))
}

fn elementwise(a: &[Vec<f64>], b: &[Vec<f64>], op: MatrixOperation) -> MathResult<Matrix> {
    let (ra, ca) = validate(a, "A")?;
    let (rb, cb) = validate(b, "B")?;
    if (ra, ca) != (rb, cb) {
        return Err(MathError::Dimension(format!(
            "Matrix dimensions must match for {}: {}x{} vs {}x{}",
            op, ra, ca, rb, cb
        )));
    }
    let (ma, mb) = (to_dmatrix(a), to_dmatrix(b));
    let result = if op == MatrixOperation::Subtract { ma - mb } else { ma + mb };
    Ok(from_dmatrix(&result))
}

pub fn scalar_multiply(a: &[Vec<f64>], scalar: f64) -> MathResult<Matrix> {
    validate(a, "A")?;
    Ok(from_dmatrix(&(to_dmatrix(a) * scalar)))
}

/// Runs `op` on `a` (and `b` for the binary operations). `scalar` defaults to 1.
pub fn perform_operation(
    op: MatrixOperation,
    a: &[Vec<f64>],
    b: Option<&[Vec<f64>]>,
    scalar: Option<f64>,
) -> MathResult<MatrixOutput> {
    let second = || {
        b.ok_or_else(|| MathError::Dimension(format!("Operation {} requires a second matrix B", op)))
    };
    let output = match op {
        MatrixOperation::Add | MatrixOperation::Subtract => {
            MatrixOutput::Matrix(elementwise(a, second()?, op)?)
        }
        MatrixOperation::Multiply => MatrixOutput::Matrix(multiply(a, second()?)?),
        MatrixOperation::Determinant => MatrixOutput::Scalar(determinant(a)?),
        MatrixOperation::Inverse => MatrixOutput::Matrix(inverse(a)?),
        MatrixOperation::Transpose => MatrixOutput::Matrix(transpose(a)?),
        MatrixOperation::ScalarMultiply => {
            MatrixOutput::Matrix(scalar_multiply(a, scalar.unwrap_or(1.0))?)
        }
    };
    Ok(output)
}

/// Same as [`perform_operation`] with the operation given by its snake_case name.
pub fn perform_named_operation(
    name: &str,
    a: &[Vec<f64>],
    b: Option<&[Vec<f64>]>,
    scalar: Option<f64>,
) -> MathResult<MatrixOutput> {
    let op: MatrixOperation = name
        .parse()
        .map_err(|_| MathError::UnknownOperation(name.to_string()))?;
    perform_operation(op, a, b, scalar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
        (0..rows)
            .map(|_| (0..cols).map(|_| rng.random_range(-10.0..10.0)).collect())
            .collect()
    }

    #[test]
    fn test_determinant_scenario() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let result = perform_named_operation("determinant", &a, None, None).unwrap();
        assert_eq!(result, MatrixOutput::Scalar(-2.0));
    }

    #[test]
    fn test_determinant_identity_and_zero() {
        for n in 1..=8 {
            assert_relative_eq!(determinant(&identity(n)).unwrap(), 1.0);
            assert_eq!(determinant(&create_matrix(n, n)).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_cofactor_matches_lu() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 3..=5 {
            let a = random_matrix(&mut rng, n, n);
            let lu = to_dmatrix(&a).determinant();
            assert_relative_eq!(cofactor_determinant(&a), lu, epsilon = 1e-8, max_relative = 1e-10);
        }
        let a = vec![
            vec![2.0, 0.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 1.0, 1.0],
        ];
        assert_eq!(determinant(&a).unwrap(), 0.0);
        let a = vec![
            vec![2.0, 0.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 1.0, 4.0],
        ];
        assert_relative_eq!(determinant(&a).unwrap(), 18.0, epsilon = 1e-12);
    }

    #[test]
    fn test_add_subtract() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![5.0, 6.0], vec![7.0, 8.0]];
        let sum = perform_operation(MatrixOperation::Add, &a, Some(b.as_slice()), None).unwrap();
        assert_eq!(sum, MatrixOutput::Matrix(vec![vec![6.0, 8.0], vec![10.0, 12.0]]));
        let diff = perform_operation(MatrixOperation::Subtract, &a, Some(b.as_slice()), None).unwrap();
        assert_eq!(diff, MatrixOutput::Matrix(vec![vec![-4.0, -4.0], vec![-4.0, -4.0]]));
        // inputs untouched
        assert_eq!(a, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_multiply_rectangular() {
        let a = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let b = vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]];
        let product = multiply(&a, &b).unwrap();
        assert_eq!(product, vec![vec![58.0, 64.0], vec![139.0, 154.0]]);
    }

    #[test]
    fn test_transpose_roundtrip() {
        let mut rng = StdRng::seed_from_u64(5);
        for (rows, cols) in [(1, 1), (2, 3), (4, 2), (5, 5)] {
            let a = random_matrix(&mut rng, rows, cols);
            let t = transpose(&a).unwrap();
            assert_eq!(t.len(), cols);
            assert_eq!(transpose(&t).unwrap(), a);
        }
    }

    #[test]
    fn test_inverse_times_matrix_is_identity() {
        let mut rng = StdRng::seed_from_u64(9);
        for n in 1..=6 {
            let a = random_matrix(&mut rng, n, n);
            let inv = inverse(&a).unwrap();
            let product = multiply(&a, &inv).unwrap();
            for i in 0..n {
                for j in 0..n {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(product[i][j], expected, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_singular_inverse() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let err = perform_operation(MatrixOperation::Inverse, &a, None, None).unwrap_err();
        assert_eq!(err, MathError::SingularMatrix);
        assert_eq!(err.to_string(), "Cannot calculate inverse, determinant is zero");
    }

    #[test]
    fn test_scalar_multiply_defaults_to_one() {
        let a = vec![vec![1.5, -2.0]];
        let same = perform_named_operation("scalar_multiply", &a, None, None).unwrap();
        assert_eq!(same, MatrixOutput::Matrix(a.clone()));
        let tripled = perform_named_operation("scalar_multiply", &a, None, Some(3.0)).unwrap();
        assert_eq!(tripled, MatrixOutput::Matrix(vec![vec![4.5, -6.0]]));
    }

    #[test]
    fn test_dimension_errors() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![1.0, 2.0, 3.0]];
        assert!(matches!(
            perform_operation(MatrixOperation::Add, &a, Some(b.as_slice()), None),
            Err(MathError::Dimension(_))
        ));
        assert!(matches!(multiply(&b, &a), Err(MathError::Dimension(_))));
        assert!(matches!(determinant(&b), Err(MathError::Dimension(_))));
        assert!(matches!(inverse(&b), Err(MathError::Dimension(_))));
        assert!(matches!(
            perform_operation(MatrixOperation::Multiply, &a, None, None),
            Err(MathError::Dimension(_))
        ));
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(transpose(&ragged), Err(MathError::Dimension(_))));
        assert!(matches!(transpose(&[]), Err(MathError::Dimension(_))));
        let infinite = vec![vec![f64::INFINITY]];
        assert!(matches!(determinant(&infinite), Err(MathError::Dimension(_))));
    }

    #[test]
    fn test_unknown_operation() {
        let err = perform_named_operation("cross", &identity(2), None, None).unwrap_err();
        assert_eq!(err.to_string(), "Unknown operation: cross");
    }

    #[test]
    fn test_format_matrix_result() {
        let m = MatrixOutput::Matrix(vec![vec![1.0, 0.5], vec![-2.0, 1.0 / 3.0]]);
        assert_eq!(format_matrix_result(&m), "1.0000\t0.5000\n-2.0000\t0.3333");
        assert_eq!(format_matrix_result(&MatrixOutput::Scalar(-2.0)), "-2.0000");
        assert_eq!(create_matrix(2, 3), vec![vec![0.0; 3]; 2]);
    }
}
