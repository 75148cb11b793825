//! # Calculus Engine
//!
//! Numerical calculus on parsed expressions: composite Simpson integration and a
//! two-sided limit probe, plus the string-level API the calculus panel calls.
//!
//! ## Numerical policy
//!
//! - Simpson sampling never aborts: a sample that fails to evaluate or is not finite
//!   contributes `0` to the sum. This keeps integrals over removable singularities defined
//! - The limit probe returns the direct value when the function is finite at the point,
//!   otherwise approaches from both sides over a fixed ladder of offsets
//! - Structural problems (parse errors, undefined symbols at the point) are errors

use std::collections::HashMap;

use log::debug;

use crate::Utils::config::CalculusConfig;
use crate::errors::{MathError, MathResult};
use crate::symbolic::symbolic_engine::Expr;

/// Offsets probed on each side of the limit point, the later (smaller) ones win.
pub const LIMIT_OFFSETS: [f64; 8] = [1e-1, 1e-2, 1e-3, 1e-4, 1e-6, 1e-8, 1e-10, 1e-12];

pub const DEFAULT_INTERVALS: usize = 1000;
pub const DEFAULT_LIMIT_PRECISION: f64 = 1e-10;

/// Value of the expression at `x`, or `0` when it cannot be evaluated or is not finite.
pub fn sample_or_zero(expr: &Expr, scope: &mut HashMap<String, f64>, var: &str, x: f64) -> f64 {
    scope.insert(var.to_string(), x);
    match expr.evaluate(scope) {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn finite_at(expr: &Expr, var: &str, x: f64) -> Option<f64> {
    expr.eval_with_var(var, x).ok().filter(|value| value.is_finite())
}

/// Interval count Simpson's rule actually uses: odd `n` becomes `n + 1`, `0` becomes `2`.
pub fn simpson_intervals(n: usize) -> usize {
    match n {
        0 => 2,
        n if n % 2 != 0 => {
            debug!("Simpson's rule needs an even interval count, using {} instead of {}", n + 1, n);
            n + 1
        }
        n => n,
    }
}

impl Expr {
    /// Composite Simpson's rule over `n` intervals (odd `n` is bumped to `n + 1`).
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2").unwrap();
    /// let area = f.numerical_integrate("x", 0.0, 1.0, 1000); // 0.3333...
    /// ```
    pub fn numerical_integrate(&self, var: &str, lower: f64, upper: f64, n: usize) -> f64 {
        let n = simpson_intervals(n);

        let h = (upper - lower) / (n as f64);
        let mut scope = HashMap::new();

        let mut sum = sample_or_zero(self, &mut scope, var, lower)
            + sample_or_zero(self, &mut scope, var, upper);

        for i in 1..n {
            let x = lower + (i as f64) * h;
            let fx = sample_or_zero(self, &mut scope, var, x);
            if i % 2 == 0 {
                sum += 2.0 * fx;
            } else {
                sum += 4.0 * fx;
            }
        }

        sum * h / 3.0
    }

    /// Limit of the expression as `var` approaches `point`.
    pub fn limit(&self, var: &str, point: f64, precision: f64) -> MathResult<f64> {
        match self.eval_with_var(var, point) {
            Ok(value) if value.is_finite() => return Ok(value),
            Err(e @ MathError::UndefinedSymbol(_)) => return Err(e),
            _ => {}
        }
        debug!("{} is not finite at {} = {}, probing both sides", self, var, point);

        let mut left = None;
        let mut right = None;
        for h in LIMIT_OFFSETS {
            if let Some(value) = finite_at(self, var, point - h) {
                left = Some(value);
            }
            if let Some(value) = finite_at(self, var, point + h) {
                right = Some(value);
            }
        }

        match (left, right) {
            (Some(l), Some(r)) if (l - r).abs() < precision * 1000.0 => Ok((l + r) / 2.0),
            (Some(l), Some(r)) => {
                debug!("one-sided estimates disagree: left {}, right {}", l, r);
                Ok(l)
            }
            (Some(l), None) => Ok(l),
            (None, Some(r)) => Ok(r),
            (None, None) => Err(MathError::LimitNotFound),
        }
    }
}

/// Definite integral of `text` over `x` with Simpson's rule.
pub fn definite_integral(text: &str, lower: f64, upper: f64, n: usize) -> MathResult<f64> {
    Ok(Expr::parse_expression(text)?.numerical_integrate("x", lower, upper, n))
}

/// Limit of `text` as `x` approaches `point`.
pub fn limit(text: &str, point: f64, precision: f64) -> MathResult<f64> {
    Expr::parse_expression(text)?.limit("x", point, precision)
}

/// Calculus API bound to a configuration: variable name, interval count and limit precision.
#[derive(Debug, Clone, Default)]
pub struct CalculusEngine {
    pub settings: CalculusConfig,
}

impl CalculusEngine {
    pub fn new(settings: CalculusConfig) -> Self {
        Self { settings }
    }

    /// Simplified derivative of `text`, every failure wrapped as a derivative error.
    pub fn derivative(&self, text: &str) -> MathResult<Expr> {
        crate::symbolic::symbolic_engine_derivatives::compute_derivative(text, &self.settings.variable)
    }

    pub fn definite_integral(&self, text: &str, lower: f64, upper: f64) -> MathResult<f64> {
        let expr = Expr::parse_expression(text)?;
        Ok(expr.numerical_integrate(
            &self.settings.variable,
            lower,
            upper,
            self.settings.integration_intervals,
        ))
    }

    pub fn limit(&self, text: &str, point: f64) -> MathResult<f64> {
        let expr = Expr::parse_expression(text)?;
        expr.limit(&self.settings.variable, point, self.settings.limit_precision)
    }
}
