#![allow(non_snake_case)]
use std::env;
use std::path::Path;
use std::process::ExitCode;

use log::{error, info};
use RustedCalc::Examples::calculus_examples::calculus_examples;
use RustedCalc::Examples::linalg_and_stats_examples::{matrix_examples, statistics_examples};
use RustedCalc::Examples::symbolic_examples::sym_examples;
use RustedCalc::Utils::config::EngineConfig;
use RustedCalc::Utils::logger::init_logger;
use RustedCalc::errors::MathResult;

/// usage: RustedCalc [example] [config.toml]
fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let example: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
    let config_path = args.get(2).map(String::as_str).unwrap_or("rustedcalc.toml");

    let config = match EngineConfig::load(Path::new(config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logger(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run_example(example, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("example {} failed: {}", example, e);
            ExitCode::FAILURE
        }
    }
}

fn run_example(example: usize, config: &EngineConfig) -> MathResult<()> {
    info!("running example {}", example);
    match example {
        // EXPRESSIONS: parsing, scope evaluation, sampling, validation
        0..=3 => sym_examples(example, config),
        // CALCULUS: derivative, Simpson integral, limit
        4..=6 => calculus_examples(example - 4, config),
        // MATRICES: determinant, inverse, multiply, transpose
        7..=10 => matrix_examples(example - 7),
        // STATISTICS: descriptive, regression
        11..=12 => statistics_examples(example - 11),
        _ => {
            for i in 0..=12 {
                run_example(i, config)?;
            }
            Ok(())
        }
    }
}
