//! Step-by-step reduction of a numeric expression.
//!
//! Each iteration picks the deepest node whose operands are all literal values (numbers,
//! `pi`, `e`, ...), evaluates it and replaces it with a literal. Among equally deep
//! candidates the rightmost wins. The walk stops once the tree is a single number, when
//! nothing is reducible (a free variable remains) or after [`MAX_STEPS`] reductions.

use std::collections::HashMap;

use log::debug;

use crate::errors::MathResult;
use crate::explain::step_item::StepItem;
use crate::symbolic::symbolic_engine::{Expr, format_number};

pub const MAX_STEPS: usize = 50;

fn is_evaluable(expr: &Expr) -> bool {
    match expr {
        Expr::Const(_) => false,
        Expr::Var(_) => expr.is_leaf_value(),
        _ => expr.args().iter().all(|arg| arg.is_leaf_value()),
    }
}

/// Path and depth of the deepest evaluable node under `expr`.
fn find_deepest_evaluable(expr: &Expr, path: &mut Vec<usize>) -> Option<(Vec<usize>, usize)> {
    let mut best: Option<(Vec<usize>, usize)> = None;
    for (i, arg) in expr.args().into_iter().enumerate() {
        path.push(i);
        if let Some(candidate) = find_deepest_evaluable(arg, path) {
            if best.as_ref().is_none_or(|(_, depth)| candidate.1 >= *depth) {
                best = Some(candidate);
            }
        }
        path.pop();
    }
    if best.is_none() && is_evaluable(expr) {
        best = Some((path.clone(), path.len()));
    }
    best
}

fn describe_operation(expr: &Expr) -> String {
    match expr {
        Expr::Var(name) => format!("Substitute {}", name),
        Expr::Add(..) => "Add".to_string(),
        Expr::Sub(..) => "Subtract".to_string(),
        Expr::Mul(..) => "Multiply".to_string(),
        Expr::Div(..) => "Divide".to_string(),
        Expr::Mod(..) => "Modulo".to_string(),
        Expr::Pow(..) => "Apply power".to_string(),
        Expr::Neg(_) => "Negate".to_string(),
        Expr::Func(func, _) => format!("Evaluate {}", func),
        Expr::Func2(func, ..) => format!("Evaluate {}", func),
        Expr::Const(_) => "Evaluate".to_string(),
    }
}

/// Reduction steps of an already parsed expression.
pub fn reduction_steps(expr: &Expr) -> Vec<StepItem> {
    let scope = HashMap::new();
    let mut current = expr.clone();
    let mut steps = Vec::new();

    for _ in 0..MAX_STEPS {
        if matches!(current, Expr::Const(_)) {
            break;
        }
        let Some((path, _)) = find_deepest_evaluable(&current, &mut Vec::new()) else {
            break;
        };
        let Some(target) = current.at_path(&path) else {
            break;
        };
        let value = match target.evaluate(&scope) {
            Ok(value) => value,
            Err(e) => {
                debug!("reduction stopped at {}: {}", target, e);
                break;
            }
        };
        let value_text = format_number(value);
        steps.push(StepItem::explained(
            describe_operation(target),
            format!("{} = {}", target.to_tex(), value_text),
            current.to_tex_highlighted(&path),
        ));
        current = current.replace_at(&path, Expr::Const(value));
    }

    if let (false, Expr::Const(value)) = (steps.is_empty(), &current) {
        steps.push(StepItem::explained(
            "Final result",
            format!("= {}", format_number(*value)),
            current.to_tex(),
        ));
    }
    steps
}

/// Parses `text` and narrates its reduction to a single number.
pub fn generate_steps(text: &str) -> MathResult<Vec<StepItem>> {
    let expr = Expr::parse_expression(text)?;
    Ok(reduction_steps(&expr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(steps: &[StepItem]) -> Vec<&str> {
        steps.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_sum_of_product() {
        let steps = generate_steps("2 + 3 * 4").unwrap();
        assert_eq!(labels(&steps), vec!["Multiply", "Add", "Final result"]);
        assert_eq!(steps[0].content, "3 \\cdot 4 = 12");
        assert_eq!(
            steps[0].explanation.as_deref(),
            Some("2 + \\boxed{3 \\cdot 4}")
        );
        assert_eq!(steps[1].content, "2 + 12 = 14");
        assert_eq!(steps[2].content, "= 14");
    }

    #[test]
    fn test_rightmost_of_equal_depth_first() {
        let steps = generate_steps("(1 + 2) * (3 + 4)").unwrap();
        assert_eq!(steps[0].content, "3 + 4 = 7");
        assert_eq!(steps[1].content, "1 + 2 = 3");
        assert_eq!(steps[2].content, "3 \\cdot 7 = 21");
        assert_eq!(steps.len(), 4);
    }

    #[test]
    fn test_constants_and_functions() {
        let steps = generate_steps("sin(pi / 2)").unwrap();
        assert_eq!(
            labels(&steps),
            vec!["Substitute pi", "Divide", "Evaluate sin", "Final result"]
        );
        assert_eq!(steps.last().unwrap().content, "= 1");
    }

    #[test]
    fn test_negation_and_power() {
        let steps = generate_steps("2 ^ 3 - -1").unwrap();
        assert!(labels(&steps).contains(&"Negate"));
        assert!(labels(&steps).contains(&"Apply power"));
        assert_eq!(steps.last().unwrap().content, "= 9");
    }

    #[test]
    fn test_free_variable_is_not_reduced() {
        assert!(generate_steps("x + 1").unwrap().is_empty());
        // partial reduction, no final result
        let steps = generate_steps("x + 2 * 3").unwrap();
        assert_eq!(labels(&steps), vec!["Multiply"]);
    }

    #[test]
    fn test_plain_number_has_no_steps() {
        assert!(generate_steps("42").unwrap().is_empty());
    }

    #[test]
    fn test_step_count_is_bounded() {
        let long = vec!["1"; 80].join(" + ");
        let steps = generate_steps(&long).unwrap();
        assert_eq!(steps.len(), MAX_STEPS);
        assert_ne!(steps.last().unwrap().label, "Final result");
    }

    #[test]
    fn test_parse_error_propagates() {
        assert!(generate_steps("2 +").is_err());
    }
}
