//! Least-squares fits of `(x, y)` samples.
//!
//! Both fits report the coefficient of determination and a curve sampled slightly beyond the
//! data range, ready to be plotted over the scatter.
use itertools::Itertools;
use log::debug;

use crate::errors::{MathError, MathResult};
use crate::somelinalg::gauss_elimination::gaussian_elimination;

/// number of prediction steps across `[x_min, x_max]`
const PREDICTION_DIVISIONS: f64 = 100.0;
/// extra steps sampled beyond each end of the data range
const PREDICTION_MARGIN_STEPS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionResult {
    pub equation: String,
    /// `[slope, intercept]` for a linear fit, `[c0, c1, .., cd]` (ascending powers) otherwise
    pub coefficients: Vec<f64>,
    pub r_squared: f64,
    pub predictions: Vec<(f64, f64)>,
}

/// Parses one `x, y` pair per line (or per `;`), the pair separated by a comma or whitespace.
pub fn parse_points(text: &str) -> MathResult<Vec<(f64, f64)>> {
    text.split(|c: char| c == '\n' || c == ';')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let values: Vec<f64> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|piece| !piece.is_empty())
                .map(|piece| piece.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .map_err(|_| MathError::Evaluation(format!("Invalid data point: {}", line)))?;
            match values.as_slice() {
                [x, y] if x.is_finite() && y.is_finite() => Ok((*x, *y)),
                _ => Err(MathError::Evaluation(format!("Invalid data point: {}", line))),
            }
        })
        .collect()
}

fn r_squared(points: &[(f64, f64)], predict: impl Fn(f64) -> f64) -> f64 {
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / points.len() as f64;
    let ss_tot: f64 = points.iter().map(|(_, y)| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = points.iter().map(|(x, y)| (y - predict(*x)).powi(2)).sum();
    if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot }
}

/// Samples the fitted curve on an even grid reaching five steps past both ends of the data.
fn sample_curve(points: &[(f64, f64)], predict: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    let (x_min, x_max) = points
        .iter()
        .map(|(x, _)| *x)
        .minmax()
        .into_option()
        .unwrap_or((0.0, 0.0));
    let mut step = (x_max - x_min) / PREDICTION_DIVISIONS;
    if step == 0.0 {
        step = 1.0;
    }
    let start = x_min - PREDICTION_MARGIN_STEPS as f64 * step;
    let samples = PREDICTION_DIVISIONS as usize + 2 * PREDICTION_MARGIN_STEPS + 1;
    (0..samples)
        .map(|i| {
            let x = start + i as f64 * step;
            (x, predict(x))
        })
        .collect()
}

pub fn linear_regression(points: &[(f64, f64)]) -> MathResult<RegressionResult> {
    if points.len() < 2 {
        return Err(MathError::InsufficientData("Need at least 2 data points".to_string()));
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = points.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(MathError::InsufficientData(
            "Need at least 2 distinct x values".to_string(),
        ));
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    let predict = |x: f64| slope * x + intercept;
    debug!("linear fit: slope {}, intercept {}", slope, intercept);

    Ok(RegressionResult {
        equation: format!("y = {:.4}x + {:.4}", slope, intercept),
        coefficients: vec![slope, intercept],
        r_squared: r_squared(points, predict),
        predictions: sample_curve(points, predict),
    })
}

fn evaluate_polynomial(coefficients: &[f64], x: f64) -> f64 {
    // Horner, coefficients in ascending powers
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn polynomial_equation(coefficients: &[f64]) -> String {
    let terms = coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| match i {
            0 => format!("{:.4}", c),
            1 => format!("{:.4}x", c),
            _ => format!("{:.4}x^{}", c, i),
        })
        .rev()
        .join(" + ");
    format!("y = {}", terms)
}

/// Fits a polynomial of the given degree through the normal equations
/// `sum(x^(i+j)) c_j = sum(y x^i)`.
pub fn polynomial_regression(points: &[(f64, f64)], degree: usize) -> MathResult<RegressionResult> {
    if points.len() < degree + 1 {
        return Err(MathError::InsufficientData(format!(
            "Need at least {} data points for degree {}",
            degree + 1,
            degree
        )));
    }
    let size = degree + 1;
    let mut A = vec![vec![0.0; size]; size];
    let mut b = vec![0.0; size];
    for i in 0..size {
        for j in 0..size {
            A[i][j] = points.iter().map(|(x, _)| x.powi((i + j) as i32)).sum();
        }
        b[i] = points.iter().map(|(x, y)| y * x.powi(i as i32)).sum();
    }
    let coefficients = gaussian_elimination(&A, &b)?;
    debug!("polynomial fit of degree {}: {:?}", degree, coefficients);

    let predict = |x: f64| evaluate_polynomial(&coefficients, x);
    let r_squared = r_squared(points, predict);
    let predictions = sample_curve(points, predict);
    Ok(RegressionResult {
        equation: polynomial_equation(&coefficients),
        coefficients,
        r_squared,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario_points() -> Vec<(f64, f64)> {
        vec![(1.0, 2.0), (2.0, 4.0), (3.0, 5.0), (4.0, 8.0)]
    }

    #[test]
    fn test_linear_scenario() {
        let result = linear_regression(&scenario_points()).unwrap();
        assert_relative_eq!(result.coefficients[0], 1.9, epsilon = 1e-12);
        assert!(result.coefficients[1].abs() < 0.15);
        // ss_res = 0.7, ss_tot = 18.75
        assert_relative_eq!(result.r_squared, 1.0 - 0.7 / 18.75, epsilon = 1e-12);
        assert!(result.r_squared > 0.95);
        assert_eq!(result.coefficients.len(), 2);
        assert!(result.equation.starts_with("y = 1.9000x + "));
    }

    #[test]
    fn test_exact_line() {
        let points: Vec<(f64, f64)> = (0..6).map(|i| (i as f64, 3.0 * i as f64 - 2.0)).collect();
        let result = linear_regression(&points).unwrap();
        assert_relative_eq!(result.coefficients[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(result.coefficients[1], -2.0, epsilon = 1e-12);
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-12);
        assert_eq!(result.equation, "y = 3.0000x + -2.0000");
    }

    #[test]
    fn test_prediction_grid() {
        let result = linear_regression(&[(0.0, 0.0), (10.0, 10.0)]).unwrap();
        assert_eq!(result.predictions.len(), 111);
        assert_relative_eq!(result.predictions[0].0, -0.5, epsilon = 1e-12);
        assert_relative_eq!(result.predictions[110].0, 10.5, epsilon = 1e-12);
        for (x, y) in &result.predictions {
            assert_relative_eq!(*x, *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_constant_y_gives_perfect_fit() {
        let result = linear_regression(&[(1.0, 4.0), (2.0, 4.0), (3.0, 4.0)]).unwrap();
        assert_relative_eq!(result.coefficients[0], 0.0);
        assert_eq!(result.r_squared, 1.0);
    }

    #[test]
    fn test_linear_errors() {
        let err = linear_regression(&[(1.0, 1.0)]).unwrap_err();
        assert_eq!(err.to_string(), "Need at least 2 data points");
        assert!(linear_regression(&[(1.0, 1.0), (1.0, 2.0)]).is_err());
    }

    #[test]
    fn test_quadratic_recovered() {
        let points: Vec<(f64, f64)> = (-3..=3)
            .map(|i| {
                let x = i as f64;
                (x, 2.0 * x * x - x + 1.0)
            })
            .collect();
        let result = polynomial_regression(&points, 2).unwrap();
        assert_relative_eq!(result.coefficients[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(result.coefficients[1], -1.0, epsilon = 1e-8);
        assert_relative_eq!(result.coefficients[2], 2.0, epsilon = 1e-8);
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-10);
        assert_eq!(result.equation, "y = 2.0000x^2 + -1.0000x + 1.0000");
        assert_eq!(result.predictions.len(), 111);
    }

    #[test]
    fn test_degree_one_matches_linear() {
        let linear = linear_regression(&scenario_points()).unwrap();
        let poly = polynomial_regression(&scenario_points(), 1).unwrap();
        assert_relative_eq!(poly.coefficients[1], linear.coefficients[0], epsilon = 1e-9);
        assert_relative_eq!(poly.coefficients[0], linear.coefficients[1], epsilon = 1e-9);
        assert_relative_eq!(poly.r_squared, linear.r_squared, epsilon = 1e-9);
    }

    #[test]
    fn test_polynomial_errors() {
        let err = polynomial_regression(&[(1.0, 1.0), (2.0, 2.0)], 2).unwrap_err();
        assert_eq!(err.to_string(), "Need at least 3 data points for degree 2");
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points("1, 2\n3 4; 5,6\n\n").unwrap();
        assert_eq!(points, vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
        assert!(parse_points("1, 2, 3").is_err());
        assert!(parse_points("a, 2").is_err());
    }
}
