// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::config::EngineConfig;
use crate::errors::MathResult;
use crate::explain::calculus_steps::{derivative_steps, integral_steps, limit_steps};
use crate::explain::step_item::render_steps;
use crate::numerical::calculus::CalculusEngine;

pub fn calculus_examples(example: usize, config: &EngineConfig) -> MathResult<()> {
    let engine = CalculusEngine::new(config.calculus.clone());
    let var = config.calculus.variable.as_str();
    match example {
        0 => {
            let input = format!("{}^2 * sin({})", var, var);
            let derivative = engine.derivative(&input)?;
            println!("d/d{} [{}] = {}", var, input, derivative);
            println!("{}", render_steps(&derivative_steps(&input, var)?));
        }
        1 => {
            let input = format!("{}^2", var);
            let area = engine.definite_integral(&input, 0.0, 3.0)?;
            println!("integral of {} over [0, 3] = {}", input, area);
            let steps = integral_steps(&input, var, 0.0, 3.0, config.calculus.integration_intervals)?;
            println!("{}", render_steps(&steps));
        }
        2 => {
            let input = format!("sin({}) / {}", var, var);
            let value = engine.limit(&input, 0.0)?;
            println!("lim {} -> 0 of {} = {}", var, input, value);
            let steps = limit_steps(&input, var, 0.0, config.calculus.limit_precision)?;
            println!("{}", render_steps(&steps));
        }
        _ => println!("no calculus example {}", example),
    }
    Ok(())
}
