//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of [`Expr`] trees.
//!
//! ## Purpose
//!
//! This module provides:
//! - **Rule classification**: [`DiffRule`] names the differentiation rule a node's shape calls for.
//!   The same classification drives `diff` and the derivative step narration, so the
//!   explanation names exactly the rule the algorithm applies
//! - **Analytical Differentiation**: `diff(var)` applies the rules recursively
//! - **Derivative API**: `derivative(var)` differentiates and simplifies, `compute_derivative`
//!   starts from text and wraps every failure into [`MathError::Derivative`]
//!
//! ## Interesting Code Features
//!
//! 1. **Constant sub-trees short-circuit**: any sub-tree free of the variable differentiates to `0`
//!    without descending, so `floor(2) * x` is still differentiable
//! 2. **Three-way power rule**: constant exponent, constant base, and the general `u^v` case
//! 3. **Explicit rejection**: step functions (`sign`, `floor`, `ceil`, `round`), `min`/`max`
//!    and `%` fail with a descriptive error instead of producing a wrong derivative

use log::debug;

use crate::errors::{MathError, MathResult};
use crate::symbolic::symbolic_engine::{Expr, Function};

/// Differentiation rule selected by the shape of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffRule {
    /// literal or a symbol other than the variable
    Constant,
    Identity,
    SumDifference,
    Product,
    Quotient,
    /// `u^n` with an exponent free of the variable, `n` is set when the exponent is a literal
    Power(Option<f64>),
    /// `u^v` with the variable in the exponent
    Exponential,
    Negation,
    /// named function, `chain` when the argument is not the bare variable
    Function { func: Function, chain: bool },
    /// nodes without a derivative rule (`%`, `min`, `max`, ...)
    Unsupported(String),
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl DiffRule {
    pub fn classify(expr: &Expr, var: &str) -> DiffRule {
        match expr {
            Expr::Const(_) => DiffRule::Constant,
            Expr::Var(name) if name == var => DiffRule::Identity,
            Expr::Var(_) => DiffRule::Constant,
            Expr::Add(..) | Expr::Sub(..) => DiffRule::SumDifference,
            Expr::Mul(..) => DiffRule::Product,
            Expr::Div(..) => DiffRule::Quotient,
            Expr::Pow(_, exp) => {
                if exp.contains_variable(var) {
                    DiffRule::Exponential
                } else {
                    DiffRule::Power(exp.as_constant())
                }
            }
            Expr::Neg(_) => DiffRule::Negation,
            Expr::Func(func, arg) => {
                let chain = !matches!(arg.as_ref(), Expr::Var(name) if name == var);
                DiffRule::Function { func: *func, chain }
            }
            Expr::Mod(..) => DiffRule::Unsupported("%".to_string()),
            Expr::Func2(func, ..) => DiffRule::Unsupported(func.to_string()),
        }
    }

    /// Human readable rule name, e.g. `Power Rule` or `Sin Rule + Chain Rule`.
    pub fn label(&self) -> String {
        match self {
            DiffRule::Constant => "Constant Rule".to_string(),
            DiffRule::Identity => "Identity Rule".to_string(),
            DiffRule::SumDifference => "Sum/Difference Rule".to_string(),
            DiffRule::Product => "Product Rule".to_string(),
            DiffRule::Quotient => "Quotient Rule".to_string(),
            DiffRule::Power(_) => "Power Rule".to_string(),
            DiffRule::Exponential => "Exponential Rule".to_string(),
            DiffRule::Negation => "Negation Rule".to_string(),
            DiffRule::Function { func, chain } => {
                let name = capitalize(&func.to_string());
                if *chain {
                    format!("{} Rule + Chain Rule", name)
                } else {
                    format!("{} Rule", name)
                }
            }
            DiffRule::Unsupported(op) => format!("No rule for {}", op),
        }
    }

    /// Generic TeX formula of the rule.
    pub fn formula(&self, var: &str) -> String {
        let d = format!("\\frac{{d}}{{d{}}}", var);
        match self {
            DiffRule::Constant => format!("{}[c] = 0", d),
            DiffRule::Identity => format!("{}[{}] = 1", d, var),
            DiffRule::SumDifference => format!("{}[f \\pm g] = f' \\pm g'", d),
            DiffRule::Product => format!("{}[f \\cdot g] = f' \\cdot g + f \\cdot g'", d),
            DiffRule::Quotient => format!(
                "{}\\left[\\frac{{f}}{{g}}\\right] = \\frac{{f' g - f g'}}{{g^2}}",
                d
            ),
            DiffRule::Power(Some(n)) => {
                let n_minus_1 = crate::symbolic::symbolic_engine::format_number(n - 1.0);
                let n = crate::symbolic::symbolic_engine::format_number(*n);
                format!("{}[{}^{{{}}}] = {}{}^{{{}}}", d, var, n, n, var, n_minus_1)
            }
            DiffRule::Power(None) => format!("{}[u^n] = n u^{{n-1}} \\cdot u'", d),
            DiffRule::Exponential => format!("{}[f^g]", d),
            DiffRule::Negation => format!("{}[-f] = -f'", d),
            DiffRule::Function { func, .. } => format!("{}{}", d, function_formula(*func)),
            DiffRule::Unsupported(_) => format!("{}[f]", d),
        }
    }
}

fn function_formula(func: Function) -> &'static str {
    match func {
        Function::Sin => "[\\sin(u)] = \\cos(u) \\cdot u'",
        Function::Cos => "[\\cos(u)] = -\\sin(u) \\cdot u'",
        Function::Tan => "[\\tan(u)] = \\sec^2(u) \\cdot u'",
        Function::Sec => "[\\sec(u)] = \\sec(u)\\tan(u) \\cdot u'",
        Function::Csc => "[\\csc(u)] = -\\csc(u)\\cot(u) \\cdot u'",
        Function::Cot => "[\\cot(u)] = -\\csc^2(u) \\cdot u'",
        Function::Asin => "[\\arcsin(u)] = \\frac{u'}{\\sqrt{1-u^2}}",
        Function::Acos => "[\\arccos(u)] = -\\frac{u'}{\\sqrt{1-u^2}}",
        Function::Atan => "[\\arctan(u)] = \\frac{u'}{1+u^2}",
        Function::Sinh => "[\\sinh(u)] = \\cosh(u) \\cdot u'",
        Function::Cosh => "[\\cosh(u)] = \\sinh(u) \\cdot u'",
        Function::Tanh => "[\\tanh(u)] = \\frac{u'}{\\cosh^2(u)}",
        Function::Exp => "[e^u] = e^u \\cdot u'",
        Function::Log => "[\\ln(u)] = \\frac{u'}{u}",
        Function::Log10 => "[\\log_{10}(u)] = \\frac{u'}{u \\ln 10}",
        Function::Log2 => "[\\log_{2}(u)] = \\frac{u'}{u \\ln 2}",
        Function::Sqrt => "[\\sqrt{u}] = \\frac{u'}{2\\sqrt{u}}",
        Function::Cbrt => "[\\sqrt[3]{u}] = \\frac{u'}{3\\sqrt[3]{u}^2}",
        Function::Abs => "[|u|] = \\mathrm{sign}(u) \\cdot u'",
        Function::Sign | Function::Floor | Function::Ceil | Function::Round => "[f(u)] = 0 \\text{ a.e.}",
    }
}

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard rules:
    /// - Power rule: d/dx(x^n) = n*x^(n-1)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule: d/dx(f(g(x))) = f'(g(x))*g'(x)
    ///
    /// The result is not simplified, see [`Expr::derivative`].
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x").unwrap(); // 2*x^1*1 before simplification
    /// ```
    pub fn diff(&self, var: &str) -> MathResult<Expr> {
        if !self.contains_variable(var) {
            return Ok(Expr::Const(0.0));
        }
        let derivative = match self {
            Expr::Var(_) => Expr::Const(1.0),
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => lhs.diff(var)? + rhs.diff(var)?,
            Expr::Sub(lhs, rhs) => lhs.diff(var)? - rhs.diff(var)?,
            Expr::Mul(lhs, rhs) => {
                let (f, g) = (lhs.as_ref(), rhs.as_ref());
                f.diff(var)? * g.clone() + f.clone() * g.diff(var)?
            }
            Expr::Div(lhs, rhs) => {
                let (f, g) = (lhs.as_ref(), rhs.as_ref());
                (f.diff(var)? * g.clone() - f.clone() * g.diff(var)?) / g.clone().pow(Expr::Const(2.0))
            }
            Expr::Pow(base, exp) => Self::diff_pow(base, exp, var)?,
            Expr::Neg(inner) => -inner.diff(var)?,
            Expr::Func(func, arg) => Self::diff_function(*func, arg, var)?,
            Expr::Mod(..) => {
                return Err(MathError::Derivative(
                    "Operator % is not differentiable".to_string(),
                ));
            }
            Expr::Func2(func, ..) => {
                return Err(MathError::Derivative(format!(
                    "Function {} is not differentiable",
                    func
                )));
            }
        };
        Ok(derivative)
    }

    fn diff_pow(base: &Expr, exp: &Expr, var: &str) -> MathResult<Expr> {
        let base_has_var = base.contains_variable(var);
        let exp_has_var = exp.contains_variable(var);
        let result = match (base_has_var, exp_has_var) {
            // u^n -> n*u^(n-1)*u'
            (_, false) => {
                let reduced = match exp.as_constant() {
                    Some(n) => Expr::Const(n - 1.0),
                    None => exp.clone() - Expr::Const(1.0),
                };
                exp.clone() * base.clone().pow(reduced) * base.diff(var)?
            }
            // a^v -> a^v*ln(a)*v'
            (false, true) => {
                base.clone().pow(exp.clone()) * base.clone().apply(Function::Log) * exp.diff(var)?
            }
            // u^v -> u^v*(v'*ln(u) + v*u'/u)
            (true, true) => {
                base.clone().pow(exp.clone())
                    * (exp.diff(var)? * base.clone().apply(Function::Log)
                        + exp.clone() * base.diff(var)? / base.clone())
            }
        };
        Ok(result)
    }

    fn diff_function(func: Function, arg: &Expr, var: &str) -> MathResult<Expr> {
        let u = arg.clone();
        let du = arg.diff(var)?;
        let one = || Expr::Const(1.0);
        let two = || Expr::Const(2.0);
        let outer = match func {
            Function::Sin => u.apply(Function::Cos),
            Function::Cos => -u.apply(Function::Sin),
            Function::Tan => u.apply(Function::Sec).pow(two()),
            Function::Sec => u.clone().apply(Function::Sec) * u.apply(Function::Tan),
            Function::Csc => -(u.clone().apply(Function::Csc) * u.apply(Function::Cot)),
            Function::Cot => -u.apply(Function::Csc).pow(two()),
            Function::Asin => one() / (one() - u.pow(two())).apply(Function::Sqrt),
            Function::Acos => -(one() / (one() - u.pow(two())).apply(Function::Sqrt)),
            Function::Atan => one() / (one() + u.pow(two())),
            Function::Sinh => u.apply(Function::Cosh),
            Function::Cosh => u.apply(Function::Sinh),
            Function::Tanh => one() / u.apply(Function::Cosh).pow(two()),
            Function::Exp => u.apply(Function::Exp),
            Function::Log => one() / u,
            Function::Log10 => one() / (u * Expr::Const(10.0).apply(Function::Log)),
            Function::Log2 => one() / (u * Expr::Const(2.0).apply(Function::Log)),
            Function::Sqrt => one() / (two() * u.apply(Function::Sqrt)),
            Function::Cbrt => one() / (Expr::Const(3.0) * u.apply(Function::Cbrt).pow(two())),
            Function::Abs => u.apply(Function::Sign),
            Function::Sign | Function::Floor | Function::Ceil | Function::Round => {
                return Err(MathError::Derivative(format!(
                    "Function {} is not differentiable",
                    func
                )));
            }
        };
        Ok(outer * du)
    }

    /// Simplified derivative with respect to `var`.
    pub fn derivative(&self, var: &str) -> MathResult<Expr> {
        let raw = self.diff(var)?;
        let simplified = raw.simplify();
        debug!(
            "d/d{} [{}]: {} nodes raw, {} simplified",
            var,
            self,
            raw.node_count(),
            simplified.node_count()
        );
        Ok(simplified)
    }
}

/// Parses `text` and returns its simplified derivative. Every failure, including a
/// parse error, is reported as [`MathError::Derivative`].
pub fn compute_derivative(text: &str, var: &str) -> MathResult<Expr> {
    let expr = Expr::parse_expression(text).map_err(|e| MathError::Derivative(e.to_string()))?;
    expr.derivative(var)
}
