//! Narration of derivatives, definite integrals and limits.
//!
//! The derivative walk classifies nodes with [`DiffRule::classify`], the same function
//! `Expr::diff` dispatches on. Integral and limit narrations compute their result with
//! the engine routines they describe.

use std::collections::HashMap;

use crate::errors::{MathError, MathResult};
use crate::explain::step_item::StepItem;
use crate::explain::tex_helpers::{derivative_tex, integral_tex, limit_tex};
use crate::numerical::calculus::{sample_or_zero, simpson_intervals};
use crate::symbolic::symbolic_engine::{Expr, format_number};
use crate::symbolic::symbolic_engine_derivatives::DiffRule;

/// offsets of the left/right approach tables
pub const APPROACH_OFFSETS: [f64; 3] = [0.1, 0.01, 0.001];

fn walk_derivative(expr: &Expr, var: &str, steps: &mut Vec<StepItem>) {
    let rule = DiffRule::classify(expr, var);
    if let DiffRule::Unsupported(_) = rule {
        return;
    }
    steps.push(StepItem::explained(
        rule.label(),
        rule.formula(var),
        format!("Apply to: {}", expr.to_tex()),
    ));
    for arg in expr.args() {
        let trivial = match arg {
            Expr::Const(_) => true,
            Expr::Var(name) => name != var,
            _ => false,
        };
        if !trivial {
            walk_derivative(arg, var, steps);
        }
    }
}

/// Setup, one step per rule application in pre-order, then the simplified derivative.
pub fn derivative_steps(text: &str, var: &str) -> MathResult<Vec<StepItem>> {
    let expr = Expr::parse_expression(text)?;
    let setup = derivative_tex(&expr.to_tex(), var);
    let mut steps = vec![StepItem::explained(
        "Setup",
        setup.clone(),
        format!("Find the derivative of {} with respect to {}", text, var),
    )];
    walk_derivative(&expr, var, &mut steps);

    let result_tex = match expr.derivative(var) {
        Ok(derivative) => derivative.to_tex(),
        Err(_) => "\\text{Could not compute}".to_string(),
    };
    steps.push(StepItem::explained(
        "Final result",
        format!("{} = {}", setup, result_tex),
        "Combining all terms",
    ));
    Ok(steps)
}

/// Setup, Simpson's formula, step size, three sample values and the result.
pub fn integral_steps(text: &str, var: &str, lower: f64, upper: f64, intervals: usize) -> MathResult<Vec<StepItem>> {
    let expr = Expr::parse_expression(text)?;
    let expr_tex = expr.to_tex();
    let (lower_text, upper_text) = (format_number(lower), format_number(upper));
    let setup = integral_tex(&expr_tex, &lower_text, &upper_text);
    let intervals = simpson_intervals(intervals);
    let result = expr.numerical_integrate(var, lower, upper, intervals);
    let h = (upper - lower) / intervals as f64;
    let mid = (lower + upper) / 2.0;
    let mut scope = HashMap::new();
    let fa = sample_or_zero(&expr, &mut scope, var, lower);
    let fmid = sample_or_zero(&expr, &mut scope, var, mid);
    let fb = sample_or_zero(&expr, &mut scope, var, upper);

    Ok(vec![
        StepItem::explained(
            "Setup",
            setup.clone(),
            format!(
                "Evaluate the definite integral of {} from {} to {}",
                text, lower_text, upper_text
            ),
        ),
        StepItem::explained(
            "Simpson's Rule",
            "\\int_{a}^{b} f(x) \\, dx \\approx \\frac{h}{3} \\left[ f(a) + 4f(x_1) + 2f(x_2) + \\cdots + f(b) \\right]",
            "Using numerical integration with Simpson's 1/3 rule",
        ),
        StepItem::explained(
            "Parameters",
            format!(
                "h = \\frac{{{} - {}}}{{{}}} = {:.6}",
                upper_text, lower_text, intervals, h
            ),
            format!("Step size h with n = {} subintervals", intervals),
        ),
        StepItem::explained(
            "Sample evaluations",
            format!(
                "f({}) = {:.6}, \\quad f({:.2}) = {:.6}, \\quad f({}) = {:.6}",
                lower_text, fa, mid, fmid, upper_text, fb
            ),
            "Evaluating the function at key points",
        ),
        StepItem::explained(
            "Result",
            format!("{} \\approx {}", setup, format_number(result)),
            "Final numerical result",
        ),
    ])
}

fn approach_table(expr: &Expr, var: &str, xs: impl Iterator<Item = f64>) -> String {
    let mut scope = HashMap::new();
    let rows: Vec<String> = xs
        .map(|x| format!("{:.4} & {:.6}", x, sample_or_zero(expr, &mut scope, var, x)))
        .collect();
    format!(
        "\\begin{{array}}{{c|c}} {} & f({}) \\\\ \\hline {} \\end{{array}}",
        var,
        var,
        rows.join(" \\\\ ")
    )
}

/// Setup, left and right approach tables and the conclusion.
pub fn limit_steps(text: &str, var: &str, point: f64, precision: f64) -> MathResult<Vec<StepItem>> {
    let expr = Expr::parse_expression(text)?;
    let point_text = format_number(point);
    let setup = limit_tex(&expr.to_tex(), var, &point_text);

    let conclusion = match expr.limit(var, point, precision) {
        Ok(value) => StepItem::explained(
            "Conclusion",
            format!("{} = {}", setup, format_number(value)),
            "Both sides converge to the same value",
        ),
        Err(MathError::LimitNotFound) => StepItem::explained(
            "Conclusion",
            format!("{} = \\text{{does not exist}}", setup),
            "Neither side produces a finite value",
        ),
        Err(e) => return Err(e),
    };

    Ok(vec![
        StepItem::explained(
            "Setup",
            setup.clone(),
            format!(
                "Evaluate the limit of {} as {} approaches {}",
                text, var, point_text
            ),
        ),
        StepItem::explained(
            "Left-hand approach",
            approach_table(&expr, var, APPROACH_OFFSETS.iter().map(|h| point - h)),
            format!("Values as {} approaches {} from the left", var, point_text),
        ),
        StepItem::explained(
            "Right-hand approach",
            approach_table(&expr, var, APPROACH_OFFSETS.iter().map(|h| point + h)),
            format!("Values as {} approaches {} from the right", var, point_text),
        ),
        conclusion,
    ])
}
