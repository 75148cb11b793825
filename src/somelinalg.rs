//! some linear algebra functions used throughout the code
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// Gaussian elimination with partial pivoting, used to solve the regression normal equations
pub mod gauss_elimination;
/// diagnostics for matrices: condition number, poorly conditioned warning
pub mod linear_sys_diagnostics;
/// Matrix engine: add, subtract, multiply, determinant, inverse, transpose, scalar multiply
///  Example#1
/// ```
/// use RustedCalc::somelinalg::matrix_engine::{perform_named_operation, MatrixOutput};
/// let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
/// let det = perform_named_operation("determinant", &a, None, None).unwrap();
/// assert_eq!(det, MatrixOutput::Scalar(-2.0));
/// ```
pub mod matrix_engine;
