//! examples of usage of RustedCalc
/// derivative, Simpson integral and limit examples with their step narrations
pub mod calculus_examples;
/// matrix operations and statistics examples
pub mod linalg_and_stats_examples;
/// Symbolic operations examples
pub mod symbolic_examples;
