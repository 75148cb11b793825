// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use std::collections::HashMap;

use crate::Utils::config::{AngleMode, EngineConfig};
use crate::Utils::normalize::to_math_expr;
use crate::Utils::palette::ColorCycle;
use crate::errors::MathResult;
use crate::explain::arithmetic_steps::generate_steps;
use crate::explain::step_item::render_steps;
use crate::symbolic::parse_expr::validate_expression;
use crate::symbolic::symbolic_engine::Expr;

pub fn sym_examples(example: usize, config: &EngineConfig) -> MathResult<()> {
    match example {
        0 => {
            // FUNCTION OF MULTIPLE VARIABLES
            let input = "exp(x) + log(y)";
            let parsed_expression = Expr::parse_expression(input)?;
            println!(" parsed_expression {}", parsed_expression);
            println!(" tex: {}", parsed_expression.to_tex());
            // free symbols of the expression
            let all = parsed_expression.all_arguments_are_variables();
            println!("all arguments are variables {:?}", all);
            // differentiate with respect to x and y
            let df_dx = parsed_expression.derivative("x")?;
            let df_dy = parsed_expression.derivative("y")?;
            println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
            // evaluate under a scope
            let scope = HashMap::from([("x".to_string(), 1.0), ("y".to_string(), 2.0)]);
            println!("f(1, 2) = {}", parsed_expression.evaluate(&scope)?);
        }
        1 => {
            // sample a function over the grapher window, NaN marks the gaps
            let graphing = &config.graphing;
            let mut colors = ColorCycle::new();
            for input in ["1/x", "sin(x)", "sqrt(x)"] {
                let expr = Expr::parse_expression(input)?;
                let points = expr.evaluate_over_range(
                    "x",
                    graphing.x_min,
                    graphing.x_max,
                    graphing.sample_points,
                    &HashMap::new(),
                );
                let gaps = points.iter().filter(|(_, y)| y.is_nan()).count();
                println!(
                    "{} [{}]: {} samples, {} gaps",
                    input,
                    colors.next_color(),
                    points.len(),
                    gaps
                );
            }
        }
        2 => {
            // calculator input: unicode symbols and degree mode
            let typed = "√(16) + sin(90) × 2²";
            let normalized = to_math_expr(typed, AngleMode::Deg)?;
            println!("{} -> {}", typed, normalized);
            let steps = generate_steps(&normalized)?;
            println!("{}", render_steps(&steps));
        }
        3 => {
            for input in ["2 * (x + 1", "sin x", "3 +", "foo(2)"] {
                let validation = validate_expression(input);
                println!("{:>12} valid: {} {:?}", input, validation.valid, validation.error);
            }
        }
        _ => println!("no symbolic example {}", example),
    }
    Ok(())
}
