//! # Expression Evaluation
//!
//! Reduces an [`Expr`] to an `f64` under a scope of named values.
//!
//! IEEE-754 semantics are kept throughout: `1/0` is `Infinity`, `0/0` is `NaN`, `log(-1)`
//! is `NaN`. The only evaluation failure is a free symbol that neither the scope nor the
//! named constants define. Range sampling never fails per point: a failing or non-finite
//! sample becomes `NaN` so the caller still receives a full-length series.

use std::collections::HashMap;

use log::debug;

use crate::errors::{MathError, MathResult};
use crate::symbolic::symbolic_engine::{Expr, named_constant};
use crate::symbolic::utils::linspace;

/// floored modulo, `a % 0 = a`
pub fn floored_mod(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return a;
    }
    a - b * (a / b).floor()
}

impl Expr {
    /// Evaluates the expression, scope entries shadow the named constants.
    pub fn evaluate(&self, scope: &HashMap<String, f64>) -> MathResult<f64> {
        let value = match self {
            Expr::Var(name) => match scope.get(name) {
                Some(value) => *value,
                None => named_constant(name).ok_or_else(|| MathError::UndefinedSymbol(name.clone()))?,
            },
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.evaluate(scope)? + rhs.evaluate(scope)?,
            Expr::Sub(lhs, rhs) => lhs.evaluate(scope)? - rhs.evaluate(scope)?,
            Expr::Mul(lhs, rhs) => lhs.evaluate(scope)? * rhs.evaluate(scope)?,
            Expr::Div(lhs, rhs) => lhs.evaluate(scope)? / rhs.evaluate(scope)?,
            Expr::Mod(lhs, rhs) => floored_mod(lhs.evaluate(scope)?, rhs.evaluate(scope)?),
            Expr::Pow(base, exp) => base.evaluate(scope)?.powf(exp.evaluate(scope)?),
            Expr::Neg(inner) => -inner.evaluate(scope)?,
            Expr::Func(func, arg) => func.apply(arg.evaluate(scope)?),
            Expr::Func2(func, a, b) => func.apply(a.evaluate(scope)?, b.evaluate(scope)?),
        };
        Ok(value)
    }

    /// Evaluates with a single variable bound.
    pub fn eval_with_var(&self, var: &str, value: f64) -> MathResult<f64> {
        let mut scope = HashMap::new();
        scope.insert(var.to_string(), value);
        self.evaluate(&scope)
    }

    /// Samples the expression at `num_points` evenly spaced values of `var` between the bounds.
    /// Failed or non-finite samples are recorded as `NaN`.
    pub fn evaluate_over_range(
        &self,
        var: &str,
        x_min: f64,
        x_max: f64,
        num_points: usize,
        extra_scope: &HashMap<String, f64>,
    ) -> Vec<(f64, f64)> {
        let mut scope = extra_scope.clone();
        let mut gaps = 0;
        let points: Vec<(f64, f64)> = linspace(x_min, x_max, num_points)
            .into_iter()
            .map(|x| {
                scope.insert(var.to_string(), x);
                let y = match self.evaluate(&scope) {
                    Ok(y) if y.is_finite() => y,
                    _ => {
                        gaps += 1;
                        f64::NAN
                    }
                };
                (x, y)
            })
            .collect();
        if gaps > 0 {
            debug!("{} of {} samples of {} are not finite", gaps, num_points, self);
        }
        points
    }
}

/// Parses and evaluates `text` under `scope`.
pub fn evaluate_expression(text: &str, scope: &HashMap<String, f64>) -> MathResult<f64> {
    Expr::parse_expression(text)?.evaluate(scope)
}

/// Parses and evaluates `text` with `x` bound to `x`.
pub fn evaluate_at(text: &str, x: f64) -> MathResult<f64> {
    Expr::parse_expression(text)?.eval_with_var("x", x)
}

/// Parses `text` and samples it over `x`; only a parse failure is an error.
pub fn evaluate_over_range(
    text: &str,
    x_min: f64,
    x_max: f64,
    num_points: usize,
    extra_scope: &HashMap<String, f64>,
) -> MathResult<Vec<(f64, f64)>> {
    let expr = Expr::parse_expression(text)?;
    Ok(expr.evaluate_over_range("x", x_min, x_max, num_points, extra_scope))
}
