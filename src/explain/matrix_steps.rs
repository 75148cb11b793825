//! Narration of matrix operations.
//!
//! The result is computed with [`perform_operation`], so a walk fails with exactly the
//! error the operation itself reports.

use crate::errors::MathResult;
use crate::explain::step_item::StepItem;
use crate::explain::tex_helpers::{fmt, matrix_to_tex};
use crate::somelinalg::matrix_engine::{MatrixOperation, MatrixOutput, perform_operation};

fn result_step(result: &[Vec<f64>]) -> StepItem {
    StepItem::new("Result", format!("= {}", matrix_to_tex(result)))
}

fn add_subtract_steps(op: MatrixOperation, a: &[Vec<f64>], b: &[Vec<f64>], result: &[Vec<f64>]) -> Vec<StepItem> {
    let (symbol, label, noun) = if op == MatrixOperation::Add {
        ("+", "Addition", "addition")
    } else {
        ("-", "Subtraction", "subtraction")
    };
    vec![
        StepItem::explained(
            format!("Matrix {}", label),
            format!("{} {} {}", matrix_to_tex(a), symbol, matrix_to_tex(b)),
            format!("Element-wise {}: c_{{ij}} = a_{{ij}} {} b_{{ij}}", noun, symbol),
        ),
        StepItem::explained(
            "Element-wise computation",
            format!(
                "c_{{11}} = {} {} {} = {}",
                fmt(a[0][0]),
                symbol,
                fmt(b[0][0]),
                fmt(result[0][0])
            ),
            format!("Each element: c_{{ij}} = a_{{ij}} {} b_{{ij}}", symbol),
        ),
        result_step(result),
    ]
}

fn multiply_steps(a: &[Vec<f64>], b: &[Vec<f64>], result: &[Vec<f64>]) -> Vec<StepItem> {
    let dot_terms = a[0]
        .iter()
        .zip(b.iter())
        .map(|(aik, row)| format!("{} \\cdot {}", fmt(*aik), fmt(row[0])))
        .collect::<Vec<_>>()
        .join(" + ");
    vec![
        StepItem::explained(
            "Matrix Multiplication",
            format!("{} \\times {}", matrix_to_tex(a), matrix_to_tex(b)),
            "Each element is a dot product of a row from A and a column from B",
        ),
        StepItem::explained(
            "Dot product formula",
            "c_{ij} = \\sum_{k} a_{ik} \\cdot b_{kj}",
            "Multiply corresponding elements and sum",
        ),
        StepItem::explained(
            "Example: c_{11}",
            format!("c_{{11}} = {} = {}", dot_terms, fmt(result[0][0])),
            "Dot product of row 1 of A and column 1 of B",
        ),
        result_step(result),
    ]
}

fn determinant_steps(a: &[Vec<f64>], det: f64) -> Vec<StepItem> {
    let n = a.len();
    let mut steps = vec![StepItem::explained(
        "Determinant",
        format!("\\det {}", matrix_to_tex(a)),
        format!("Computing the determinant of a {}x{} matrix", n, n),
    )];
    match n {
        2 => {
            steps.push(StepItem::explained(
                "2x2 Formula",
                "\\det = a_{11} \\cdot a_{22} - a_{12} \\cdot a_{21}",
                "det = ad - bc for a 2x2 matrix",
            ));
            steps.push(StepItem::new(
                "Substitute values",
                format!(
                    "= {} \\cdot {} - {} \\cdot {} = {}",
                    fmt(a[0][0]),
                    fmt(a[1][1]),
                    fmt(a[0][1]),
                    fmt(a[1][0]),
                    fmt(det)
                ),
            ));
        }
        3 => {
            // signs are carried by the expansion formula, the C_1j shown are the minors
            let c11 = a[1][1] * a[2][2] - a[1][2] * a[2][1];
            let c12 = a[1][0] * a[2][2] - a[1][2] * a[2][0];
            let c13 = a[1][0] * a[2][1] - a[1][1] * a[2][0];
            steps.push(StepItem::explained(
                "Cofactor expansion (row 1)",
                "\\det = a_{11} \\cdot C_{11} - a_{12} \\cdot C_{12} + a_{13} \\cdot C_{13}",
                "Expanding along the first row using cofactors",
            ));
            steps.push(StepItem::explained(
                "Compute cofactors",
                format!(
                    "C_{{11}} = {}, \\quad C_{{12}} = {}, \\quad C_{{13}} = {}",
                    fmt(c11),
                    fmt(c12),
                    fmt(c13)
                ),
                "Each cofactor is the determinant of the 2x2 minor",
            ));
            steps.push(StepItem::new(
                "Result",
                format!(
                    "= {} \\cdot {} - {} \\cdot {} + {} \\cdot {} = {}",
                    fmt(a[0][0]),
                    fmt(c11),
                    fmt(a[0][1]),
                    fmt(c12),
                    fmt(a[0][2]),
                    fmt(c13),
                    fmt(det)
                ),
            ));
        }
        _ => steps.push(StepItem::explained(
            "Result",
            format!("\\det = {}", fmt(det)),
            "Computed via cofactor expansion",
        )),
    }
    steps
}

fn inverse_steps(a: &[Vec<f64>], result: &[Vec<f64>]) -> Vec<StepItem> {
    let n = a.len();
    let mut steps = vec![StepItem::explained(
        "Matrix Inverse",
        format!("{}^{{-1}}", matrix_to_tex(a)),
        format!("Find the inverse of the {}x{} matrix", n, n),
    )];
    if n == 2 {
        let det = a[0][0] * a[1][1] - a[0][1] * a[1][0];
        steps.push(StepItem::explained(
            "2x2 Inverse formula",
            "A^{-1} = \\frac{1}{\\det(A)} \\begin{bmatrix} a_{22} & -a_{12} \\\\ -a_{21} & a_{11} \\end{bmatrix}",
            "Swap diagonal, negate off-diagonal, divide by determinant",
        ));
        steps.push(StepItem::new(
            "Determinant",
            format!(
                "\\det(A) = {} \\cdot {} - {} \\cdot {} = {}",
                fmt(a[0][0]),
                fmt(a[1][1]),
                fmt(a[0][1]),
                fmt(a[1][0]),
                fmt(det)
            ),
        ));
        steps.push(StepItem::new(
            "Adjugate / det",
            format!(
                "= \\frac{{1}}{{{}}} {}",
                fmt(det),
                matrix_to_tex(&[vec![a[1][1], -a[0][1]], vec![-a[1][0], a[0][0]]])
            ),
        ));
    } else {
        steps.push(StepItem::explained(
            "Method",
            "A^{-1} = \\frac{1}{\\det(A)} \\cdot \\text{adj}(A)",
            "Using the adjugate matrix method",
        ));
    }
    steps.push(result_step(result));
    steps
}

fn transpose_steps(a: &[Vec<f64>], result: &[Vec<f64>]) -> Vec<StepItem> {
    vec![
        StepItem::explained(
            "Transpose",
            format!("{}^T", matrix_to_tex(a)),
            "Swap rows and columns: a'_{ij} = a_{ji}",
        ),
        result_step(result),
    ]
}

fn scalar_multiply_steps(a: &[Vec<f64>], k: f64, result: &[Vec<f64>]) -> Vec<StepItem> {
    vec![
        StepItem::explained(
            "Scalar Multiplication",
            format!("{} \\cdot {}", fmt(k), matrix_to_tex(a)),
            "Every element is multiplied by the scalar: c_{ij} = k \\cdot a_{ij}",
        ),
        StepItem::explained(
            "Element-wise computation",
            format!("c_{{11}} = {} \\cdot {} = {}", fmt(k), fmt(a[0][0]), fmt(result[0][0])),
            "Each element: c_{ij} = k \\cdot a_{ij}",
        ),
        result_step(result),
    ]
}

/// Runs `op` and narrates it. `scalar` defaults to 1 like in [`perform_operation`].
pub fn matrix_steps(
    op: MatrixOperation,
    a: &[Vec<f64>],
    b: Option<&[Vec<f64>]>,
    scalar: Option<f64>,
) -> MathResult<Vec<StepItem>> {
    let output = perform_operation(op, a, b, scalar)?;
    let b = b.unwrap_or(&[]);
    let steps = match (&output, op) {
        (MatrixOutput::Scalar(det), _) => determinant_steps(a, *det),
        (MatrixOutput::Matrix(r), MatrixOperation::Add | MatrixOperation::Subtract) => {
            add_subtract_steps(op, a, b, r)
        }
        (MatrixOutput::Matrix(r), MatrixOperation::Multiply) => multiply_steps(a, b, r),
        (MatrixOutput::Matrix(r), MatrixOperation::Inverse) => inverse_steps(a, r),
        (MatrixOutput::Matrix(r), MatrixOperation::Transpose) => transpose_steps(a, r),
        (MatrixOutput::Matrix(r), MatrixOperation::ScalarMultiply) => {
            scalar_multiply_steps(a, scalar.unwrap_or(1.0), r)
        }
        (MatrixOutput::Matrix(r), MatrixOperation::Determinant) => vec![result_step(r)],
    };
    Ok(steps)
}
