//! Translation of calculator keypad text into parser syntax.
//!
//! The keypad produces typographic symbols (`×`, `÷`, `π`, `√`, `²`) and calculator
//! conventions (`log` is base 10, `ln` is natural). The parser knows `*`, `/`, `pi`,
//! `sqrt`, `^2`, `log10` and `log`.

use regex::{Captures, Regex};

use crate::Utils::config::AngleMode;
use crate::errors::{MathError, MathResult};

fn regex(pattern: &str) -> MathResult<Regex> {
    Regex::new(pattern).map_err(|e| MathError::Evaluation(e.to_string()))
}

/// Byte index of the `)` closing an already opened parenthesis, if balanced.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// `sin(arg)` -> `sin((arg) * pi / 180)`, recursively for nested calls.
/// An unbalanced call is left as typed so the parser can report it.
fn wrap_degrees(text: &str, trig: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(m) = trig.find(rest) {
        out.push_str(&rest[..m.start()]);
        let after = &rest[m.end()..];
        match matching_paren(after) {
            Some(close) => {
                let inner = wrap_degrees(&after[..close], trig);
                out.push_str(m.as_str());
                out.push_str(&format!("({}) * pi / 180)", inner));
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[m.start()..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Normalises keypad text into an expression the parser accepts.
pub fn to_math_expr(text: &str, angle_mode: AngleMode) -> MathResult<String> {
    let mut result = text
        .replace('×', "*")
        .replace('÷', "/")
        .replace('π', "pi")
        .replace('√', "sqrt")
        .replace("⁻¹", "^(-1)")
        .replace('²', "^2")
        .replace('³', "^3");

    // `a mod b` is the operator, `mod(a, b)` the function
    let modulo = regex(r"\bmod\b(\s*)(\()?")?;
    result = modulo
        .replace_all(&result, |caps: &Captures| {
            if caps.get(2).is_some() {
                caps[0].to_string()
            } else {
                format!("%{}", &caps[1])
            }
        })
        .into_owned();
    result = regex(r"\blog\(")?.replace_all(&result, "log10(").into_owned();
    result = regex(r"\bln\(")?.replace_all(&result, "log(").into_owned();

    if angle_mode == AngleMode::Deg {
        result = wrap_degrees(&result, &regex(r"\b(sin|cos|tan)\(")?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_eval::evaluate_at;
    use approx::assert_relative_eq;

    #[test]
    fn test_symbols() {
        assert_eq!(to_math_expr("2×3÷4", AngleMode::Rad).unwrap(), "2*3/4");
        assert_eq!(to_math_expr("2π", AngleMode::Rad).unwrap(), "2pi");
        assert_eq!(to_math_expr("√(9)", AngleMode::Rad).unwrap(), "sqrt(9)");
        assert_eq!(to_math_expr("x²+x³", AngleMode::Rad).unwrap(), "x^2+x^3");
        assert_eq!(to_math_expr("5⁻¹", AngleMode::Rad).unwrap(), "5^(-1)");
    }

    #[test]
    fn test_modulo_and_logs() {
        assert_eq!(to_math_expr("7 mod 3", AngleMode::Rad).unwrap(), "7 % 3");
        assert_eq!(to_math_expr("mod(7, 3)", AngleMode::Rad).unwrap(), "mod(7, 3)");
        assert_eq!(to_math_expr("log(100)", AngleMode::Rad).unwrap(), "log10(100)");
        assert_eq!(to_math_expr("ln(e)", AngleMode::Rad).unwrap(), "log(e)");
        assert_eq!(to_math_expr("log10(5)", AngleMode::Rad).unwrap(), "log10(5)");
    }

    #[test]
    fn test_degree_mode() {
        assert_eq!(
            to_math_expr("sin(30)", AngleMode::Deg).unwrap(),
            "sin((30) * pi / 180)"
        );
        assert_eq!(to_math_expr("asin(1)", AngleMode::Deg).unwrap(), "asin(1)");
        assert_eq!(to_math_expr("sin(30)", AngleMode::Rad).unwrap(), "sin(30)");
        let nested = to_math_expr("cos(2*(30+15))", AngleMode::Deg).unwrap();
        assert_eq!(nested, "cos((2*(30+15)) * pi / 180)");
        assert_relative_eq!(evaluate_at(&nested, 0.0).unwrap(), 0.0, epsilon = 1e-12);
        let unbalanced = to_math_expr("tan(45", AngleMode::Deg).unwrap();
        assert_eq!(unbalanced, "tan(45");
    }

    #[test]
    fn test_degree_mode_evaluates() {
        let expr = to_math_expr("sin(30) + tan(45)", AngleMode::Deg).unwrap();
        assert_relative_eq!(evaluate_at(&expr, 0.0).unwrap(), 1.5, epsilon = 1e-12);
    }
}
