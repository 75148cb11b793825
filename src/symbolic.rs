/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedCalc::symbolic::symbolic_engine::Expr;
/// let input = "x^2.3 * log(x + 2)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let value = parsed_expression.eval_with_var("x", 1.0).unwrap();
/// assert!((value - 3.0_f64.ln()).abs() < 1e-12);
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree and its node kinds
/// 2) prints an expression as plain text with minimal parentheses
/// 3) addresses and replaces sub-trees by path
///# Example#
/// ```
/// use RustedCalc::symbolic::symbolic_engine::Expr;
/// let input = "exp(x) + log(y)";
///   let parsed_expression = Expr::parse_expression(input).unwrap();
///   // return vec of all free symbols
///   let all = parsed_expression.all_arguments_are_variables();
///   assert_eq!(all, vec!["x", "y"]);
///   // differentiate with respect to x and y
///   let df_dx = parsed_expression.derivative("x").unwrap();
///   let df_dy = parsed_expression.derivative("y").unwrap();
///   println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
///   assert_eq!(df_dy.to_string(), "1 / y");
/// ```
/// Example2#
/// ```
/// use RustedCalc::symbolic::symbolic_engine_derivatives::compute_derivative;
///   let df_dx = compute_derivative("x^3", "x").unwrap();
///   assert_eq!(df_dx.to_string(), "3 * x ^ 2");
///   assert_eq!(df_dx.to_tex(), "3 \\cdot x^{2}");
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
mod symbolic_engine_tests;
///________________________________________________________________________________________________________________________________________________
/// evaluation under a scope, sampling over a range, syntax validation
/// Example#
/// ```
/// use std::collections::HashMap;
/// use RustedCalc::symbolic::symbolic_eval::evaluate_over_range;
/// let points = evaluate_over_range("1/x", -1.0, 1.0, 3, &HashMap::new()).unwrap();
/// assert_eq!(points.len(), 3);
/// assert!(points[1].1.is_nan());
/// ```
pub mod symbolic_eval;
pub mod symbolic_simplify;
pub mod symbolic_tex;
///______________________________________________________________________________________________________________________________________________
/// sampling helpers: linspace, central difference derivative
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
