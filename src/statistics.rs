//! # Statistics Module
//!
//! ## Purpose
//! Descriptive statistics of a sample and least-squares regression of `(x, y)` data.
//!
//! ## Interesting Code Features
//! - mode ties are reported in order of first appearance
//! - polynomial fits solve the normal equations with the Gaussian elimination of `somelinalg`
/// mean, median, mode, population variance, quartiles
///  Example#1
/// ```
/// use RustedCalc::statistics::descriptive::{compute_stats, parse_data};
/// let data = parse_data("10, 20, 30, 40, 50").unwrap();
/// let stats = compute_stats(&data).unwrap();
/// assert_eq!(stats.mean, 30.0);
/// assert_eq!(stats.count, 5);
/// ```
pub mod descriptive;
/// linear and polynomial least squares
///  Example#1
/// ```
/// use RustedCalc::statistics::regression::{linear_regression, polynomial_regression};
/// let points = vec![(1.0, 2.0), (2.0, 4.0), (3.0, 5.0), (4.0, 8.0)];
/// let fit = linear_regression(&points).unwrap();
/// assert!((fit.coefficients[0] - 1.9).abs() < 1e-12);
/// let quadratic = polynomial_regression(&points, 2).unwrap();
/// assert_eq!(quadratic.coefficients.len(), 3);
/// ```
pub mod regression;
