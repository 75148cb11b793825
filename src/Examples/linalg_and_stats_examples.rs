// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::errors::MathResult;
use crate::explain::matrix_steps::matrix_steps;
use crate::explain::step_item::render_steps;
use crate::somelinalg::matrix_engine::{MatrixOperation, format_matrix_result, perform_operation};
use crate::statistics::descriptive::{compute_stats, parse_data};
use crate::statistics::regression::{linear_regression, parse_points, polynomial_regression};

pub fn matrix_examples(example: usize) -> MathResult<()> {
    let a = vec![vec![2.0, 0.0, 1.0], vec![1.0, 3.0, 2.0], vec![1.0, 1.0, 4.0]];
    let b = vec![vec![1.0, 2.0, 0.0], vec![0.0, 1.0, 0.0], vec![3.0, 0.0, 1.0]];
    let op = match example {
        0 => MatrixOperation::Determinant,
        1 => MatrixOperation::Inverse,
        2 => MatrixOperation::Multiply,
        _ => MatrixOperation::Transpose,
    };
    let result = perform_operation(op, &a, Some(b.as_slice()), None)?;
    println!("{}:\n{}", op, format_matrix_result(&result));
    let steps = matrix_steps(op, &a, Some(b.as_slice()), None)?;
    println!("{}", render_steps(&steps));
    Ok(())
}

pub fn statistics_examples(example: usize) -> MathResult<()> {
    match example {
        0 => {
            let data = parse_data("4, 8, 15, 16, 23, 42; 8 15")?;
            let stats = compute_stats(&data)?;
            println!("{}", stats);
        }
        _ => {
            let points = parse_points("1, 2\n2, 4\n3, 5\n4, 8\n5, 11")?;
            let linear = linear_regression(&points)?;
            println!("{}  R^2 = {:.4}", linear.equation, linear.r_squared);
            let quadratic = polynomial_regression(&points, 2)?;
            println!("{}  R^2 = {:.4}", quadratic.equation, quadratic.r_squared);
        }
    }
    Ok(())
}
