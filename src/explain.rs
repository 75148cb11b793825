//! # Explain Module
//!
//! ## Purpose
//! Step-by-step narrations of results for display: arithmetic reduction, derivative rule
//! applications, Simpson integration, limit approach tables and matrix operations.
//! Every walker returns a fresh `Vec<StepItem>` whose `content` is TeX.
//!
//! ## Interesting Code Features
//! - the derivative walk and `Expr::diff` share one rule classifier
//! - the arithmetic walk addresses the node it reduces by its child-index path and boxes it
//!   in the TeX of the whole expression
/// reduction of a numeric expression, deepest node first
///  Example#1
/// ```
/// use RustedCalc::explain::arithmetic_steps::generate_steps;
/// let steps = generate_steps("2 + 3 * 4").unwrap();
/// assert_eq!(steps[0].label, "Multiply");
/// assert_eq!(steps.last().unwrap().content, "= 14");
/// ```
pub mod arithmetic_steps;
/// derivative, integral and limit narrations
///  Example#1
/// ```
/// use RustedCalc::explain::calculus_steps::derivative_steps;
/// use RustedCalc::explain::step_item::render_steps;
/// let steps = derivative_steps("x^2 * sin(x)", "x").unwrap();
/// assert_eq!(steps[1].label, "Product Rule");
/// println!("{}", render_steps(&steps));
/// ```
pub mod calculus_steps;
/// matrix operation narrations
pub mod matrix_steps;
pub mod step_item;
pub mod tex_helpers;
