///  Calculus engine: Simpson integration and two-sided limits
///  Example#1
/// ```
/// use RustedCalc::numerical::calculus::{definite_integral, limit};
/// let area = definite_integral("x^2", 0.0, 1.0, 1000).unwrap();
/// assert!((area - 1.0 / 3.0).abs() < 1e-9);
/// let l = limit("sin(x)/x", 0.0, 1e-10).unwrap();
/// assert!((l - 1.0).abs() < 1e-9);
///  ```
/// Example#2
/// ```
/// // or bound to the configuration
/// use RustedCalc::Utils::config::EngineConfig;
/// use RustedCalc::numerical::calculus::CalculusEngine;
/// let config = EngineConfig::from_toml_str("[calculus]\nintegration_intervals = 200").unwrap();
/// let engine = CalculusEngine::new(config.calculus);
/// let area = engine.definite_integral("sin(x)", 0.0, 3.141592653589793).unwrap();
/// assert!((area - 2.0).abs() < 1e-6);
/// println!("d/dx = {}", engine.derivative("x*sin(x)").unwrap());
/// ```
pub mod calculus;
