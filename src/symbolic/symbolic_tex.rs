//! TeX printer for [`Expr`].
//!
//! Parenthesisation follows the same precedence table as the plain-text `Display`;
//! fractions, roots and absolute values carry their own grouping and need none.
//! A sub-tree can be highlighted with `\boxed{}` by its child-index path, which the
//! arithmetic step walker uses to mark the node it is about to reduce.

use crate::symbolic::symbolic_engine::{BinaryFunction, Expr, Function, format_number};

fn function_tex(func: Function, arg: &str) -> String {
    match func {
        Function::Sqrt => format!("\\sqrt{{{}}}", arg),
        Function::Cbrt => format!("\\sqrt[3]{{{}}}", arg),
        Function::Abs => format!("\\left|{}\\right|", arg),
        Function::Floor => format!("\\left\\lfloor {}\\right\\rfloor", arg),
        Function::Ceil => format!("\\left\\lceil {}\\right\\rceil", arg),
        Function::Log => format!("\\ln\\left({}\\right)", arg),
        Function::Log10 => format!("\\log_{{10}}\\left({}\\right)", arg),
        Function::Log2 => format!("\\log_{{2}}\\left({}\\right)", arg),
        Function::Asin => format!("\\arcsin\\left({}\\right)", arg),
        Function::Acos => format!("\\arccos\\left({}\\right)", arg),
        Function::Atan => format!("\\arctan\\left({}\\right)", arg),
        Function::Sign | Function::Round => format!("\\mathrm{{{}}}\\left({}\\right)", func, arg),
        _ => format!("\\{}\\left({}\\right)", func, arg),
    }
}

fn binary_function_tex(func: BinaryFunction, a: &str, b: &str) -> String {
    match func {
        BinaryFunction::Min | BinaryFunction::Max => format!("\\{}\\left({}, {}\\right)", func, a, b),
        _ => format!("\\mathrm{{{}}}\\left({}, {}\\right)", func, a, b),
    }
}

fn symbol_tex(name: &str) -> String {
    match name {
        "pi" | "tau" | "phi" => format!("\\{}", name),
        _ => name.to_string(),
    }
}

fn parens(tex: String, needed: bool) -> String {
    if needed {
        format!("\\left({}\\right)", tex)
    } else {
        tex
    }
}

impl Expr {
    /// TeX form of the expression.
    pub fn to_tex(&self) -> String {
        self.tex(None)
    }

    /// TeX form with the sub-tree at `path` wrapped in `\boxed{}`.
    /// A path that leaves the tree highlights nothing.
    pub fn to_tex_highlighted(&self, path: &[usize]) -> String {
        self.tex(Some(path))
    }

    fn tex(&self, highlight: Option<&[usize]>) -> String {
        if let Some([]) = highlight {
            return format!("\\boxed{{{}}}", self.tex(None));
        }
        let child = |index: usize, expr: &Expr| -> String {
            let sub = highlight.and_then(|path| match path.split_first() {
                Some((first, rest)) if *first == index => Some(rest),
                _ => None,
            });
            expr.tex(sub)
        };
        let binary = |lhs: &Expr, op: &str, rhs: &Expr| -> String {
            format!(
                "{} {} {}",
                parens(child(0, lhs), self.left_needs_parens(lhs)),
                op,
                // \frac is already delimited
                parens(child(1, rhs), self.right_needs_parens(rhs) && !matches!(rhs, Expr::Div(..)))
            )
        };
        match self {
            Expr::Var(name) => symbol_tex(name),
            Expr::Const(val) => format_number(*val),
            Expr::Add(lhs, rhs) => binary(lhs, "+", rhs),
            Expr::Sub(lhs, rhs) => binary(lhs, "-", rhs),
            Expr::Mul(lhs, rhs) => binary(lhs, "\\cdot", rhs),
            Expr::Mod(lhs, rhs) => binary(lhs, "\\bmod", rhs),
            Expr::Div(lhs, rhs) => format!("\\frac{{{}}}{{{}}}", child(0, lhs), child(1, rhs)),
            Expr::Pow(base, exp) => format!(
                "{}^{{{}}}",
                parens(child(0, base), self.left_needs_parens(base)),
                child(1, exp)
            ),
            Expr::Neg(inner) => format!(
                "-{}",
                parens(child(0, inner), inner.precedence() <= Expr::UNARY)
            ),
            Expr::Func(func, arg) => function_tex(*func, &child(0, arg)),
            Expr::Func2(func, a, b) => binary_function_tex(*func, &child(0, a), &child(1, b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tex(text: &str) -> String {
        Expr::parse_expression(text).unwrap().to_tex()
    }

    #[test]
    fn test_tex_basic() {
        assert_eq!(tex("x^2 + 1"), "x^{2} + 1");
        assert_eq!(tex("sin(x) / 2"), "\\frac{\\sin\\left(x\\right)}{2}");
        assert_eq!(tex("2 * pi"), "2 \\cdot \\pi");
        assert_eq!(tex("sqrt(x + 1)"), "\\sqrt{x + 1}");
        assert_eq!(tex("log(x)"), "\\ln\\left(x\\right)");
        assert_eq!(tex("abs(x)"), "\\left|x\\right|");
    }

    #[test]
    fn test_tex_parentheses() {
        assert_eq!(tex("(x + 1) * 2"), "\\left(x + 1\\right) \\cdot 2");
        assert_eq!(tex("(x + 1)^2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(tex("x - (y - z)"), "x - \\left(y - z\\right)");
        assert_eq!(tex("x + (y - z)"), "x + \\left(y - z\\right)");
        assert_eq!(tex("x * (y / z)"), "x \\cdot \\frac{y}{z}");
        assert_eq!(tex("-(x + 1)"), "-\\left(x + 1\\right)");
    }

    #[test]
    fn test_tex_highlight() {
        let expr = Expr::parse_expression("(2 + 3) * 4").unwrap();
        assert_eq!(
            expr.to_tex_highlighted(&[0]),
            "\\left(\\boxed{2 + 3}\\right) \\cdot 4"
        );
        assert_eq!(expr.to_tex_highlighted(&[]), "\\boxed{\\left(2 + 3\\right) \\cdot 4}");
        assert_eq!(expr.to_tex_highlighted(&[5]), expr.to_tex());
    }
}
