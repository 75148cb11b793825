//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::{Expr, Function, format_number};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn parse(text: &str) -> Expr {
        Expr::parse_expression(text).unwrap()
    }

    #[test]
    fn test_operator_overloads() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone() + Expr::Const(2.0);
        let expected = Expr::Add(
            Box::new(Expr::Var("x".to_string())),
            Box::new(Expr::Const(2.0)),
        );
        assert_eq!(expr, expected);
        let expr = x.clone() * x.clone() - Expr::Const(1.0) / x.clone();
        assert_eq!(expr, parse("x*x - 1/x"));
        assert_eq!(-x.clone(), Expr::Neg(Box::new(x)));
    }

    #[test]
    fn test_display_minimal_parentheses() {
        assert_eq!(parse("(x + 1) * (x - 1)").to_string(), "(x + 1) * (x - 1)");
        assert_eq!(parse("x - (y + z)").to_string(), "x - (y + z)");
        assert_eq!(parse("x - y + z").to_string(), "x - y + z");
        assert_eq!(parse("x / (y * z)").to_string(), "x / (y * z)");
        assert_eq!(parse("(x ^ 2) ^ 3").to_string(), "(x ^ 2) ^ 3");
        assert_eq!(parse("x ^ 2 ^ 3").to_string(), "x ^ 2 ^ 3");
        assert_eq!(parse("-(x + 1)").to_string(), "-(x + 1)");
        assert_eq!(parse("(-x) ^ 2").to_string(), "(-x) ^ 2");
        assert_eq!(parse("2 ^ -x").to_string(), "2 ^ (-x)");
        assert_eq!(parse("atan2(y, x)").to_string(), "atan2(y, x)");
        assert_eq!(parse("x * (y / z)").to_string(), "x * (y / z)");
        assert_eq!(parse("x * (y % z)").to_string(), "x * (y % z)");
        assert_eq!(parse("x + (y - z)").to_string(), "x + (y - z)");
        assert_eq!(parse("x * (y * z)").to_string(), "x * y * z");
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        for text in ["x * (y / z)", "x + (y - z)", "u * (v % w) - (y - z)", "x / y * z", "2 * (x / 3) + 1"] {
            let expr = parse(text);
            assert_eq!(parse(&expr.to_string()), expr, "{}", text);
        }
    }

    #[test]
    fn test_display_roundtrip_keeps_value() {
        let texts = [
            "x - (x - 1)",
            "2 / (3 / x)",
            "-x ^ 2 + (-x) ^ 2",
            "(1 + x) % 3",
            "sin(x) ^ 2 + cos(x) ^ 2",
            "2 ^ 3 ^ 0.5",
        ];
        for text in texts {
            let expr = parse(text);
            let reparsed = parse(&expr.to_string());
            assert_relative_eq!(
                expr.eval_with_var("x", 0.7).unwrap(),
                reparsed.eval_with_var("x", 0.7).unwrap(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_paths() {
        let expr = parse("(2 + 3) * sin(x)");
        assert_eq!(expr.at_path(&[0, 1]), Some(&Expr::Const(3.0)));
        assert_eq!(expr.at_path(&[1, 0]), Some(&Expr::var("x")));
        assert_eq!(expr.at_path(&[2]), None);
        let replaced = expr.replace_at(&[0], Expr::Const(5.0));
        assert_eq!(replaced, parse("5 * sin(x)"));
    }

    #[test]
    fn test_variables() {
        let expr = parse("a * x ^ 2 + b * sin(pi * x) + e");
        assert_eq!(expr.all_arguments_are_variables(), vec!["a", "b", "x"]);
        assert!(expr.contains_variable("x"));
        assert!(!expr.contains_variable("y"));
        let mut map = HashMap::new();
        map.insert("a".to_string(), 2.0);
        map.insert("b".to_string(), 0.0);
        let substituted = expr.set_variable_from_map(&map).set_variable("x", 3.0);
        assert!(substituted.all_arguments_are_variables().is_empty());
        assert_relative_eq!(
            substituted.evaluate(&HashMap::new()).unwrap(),
            18.0 + std::f64::consts::E,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_leaf_values_and_constants() {
        assert!(Expr::Const(2.0).is_leaf_value());
        assert!(Expr::var("pi").is_leaf_value());
        assert!(!Expr::var("x").is_leaf_value());
        assert_eq!(parse("-2").as_constant(), Some(-2.0));
        assert_eq!(parse("x").as_constant(), None);
        assert_eq!(parse("sin(x) + 1").node_count(), 4);
    }

    #[test]
    fn test_function_names() {
        assert_eq!(Function::Log10.to_string(), "log10");
        assert_eq!("cbrt".parse::<Function>().unwrap(), Function::Cbrt);
        assert!("foo".parse::<Function>().is_err());
        assert!(Function::Sign.apply(0.0) == 0.0);
        assert_relative_eq!(Function::Sec.apply(0.0), 1.0);
    }
}
