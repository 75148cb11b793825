//! # Symbolic Engine Module
//!
//! Core expression tree of the toolkit. Every textual formula handed to the calculator,
//! the grapher, the calculus panel or the step explainer is parsed into an [`Expr`] and
//! all later work (evaluation, differentiation, simplification, printing, step narration)
//! is an exhaustive `match` over its variants.
//!
//! ## Main Structures
//!
//! - [`Expr`]: closed tagged union of the node kinds (symbol, constant, binary operators,
//!   unary minus, named unary and binary functions)
//! - [`Function`]: named unary functions (`sin`, `log`, `sqrt`, ...)
//! - [`BinaryFunction`]: named two-argument functions (`atan2`, `hypot`, `min`, `max`)
//!
//! ## Interesting Code Features
//!
//! 1. **Operator Overloading**: `std::ops` traits build trees with natural syntax, which
//!    keeps the differentiation rules close to their textbook form
//! 2. **Path Addressing**: sub-trees are addressed by a path of child indices, so the
//!    step walkers can replace or highlight a node without node identity
//! 3. **Minimal Parentheses**: `Display` prints plain text (`3 * x ^ 2`) inserting
//!    parentheses only where precedence requires them

use std::collections::HashMap;
use std::fmt;

use strum_macros::{Display, EnumIter, EnumString};

/// Named unary functions recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// natural logarithm
    Log,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Round,
}

impl Function {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Sec => 1.0 / x.cos(),
            Function::Csc => 1.0 / x.sin(),
            Function::Cot => 1.0 / x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Exp => x.exp(),
            Function::Log => x.ln(),
            Function::Log10 => x.log10(),
            Function::Log2 => x.log2(),
            Function::Sqrt => x.sqrt(),
            Function::Cbrt => x.cbrt(),
            Function::Abs => x.abs(),
            Function::Sign => {
                if x == 0.0 || x.is_nan() {
                    x
                } else {
                    x.signum()
                }
            }
            Function::Floor => x.floor(),
            Function::Ceil => x.ceil(),
            Function::Round => x.round(),
        }
    }
}

/// Named two-argument functions recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum BinaryFunction {
    Atan2,
    Hypot,
    Min,
    Max,
}

impl BinaryFunction {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            BinaryFunction::Atan2 => a.atan2(b),
            BinaryFunction::Hypot => a.hypot(b),
            BinaryFunction::Min => a.min(b),
            BinaryFunction::Max => a.max(b),
        }
    }
}

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// Parentheses of the source text are not kept as nodes: grouping is the tree shape itself
/// and the printers re-insert parentheses from operator precedence.
///
/// # Examples
/// ```rust, ignore
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.to_string(), "x + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbol: the free variable, a scope variable or a named constant (`pi`, `e`)
    Var(String),
    /// Numerical literal
    Const(f64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// floored modulo, `%` in the source text
    Mod(Box<Expr>, Box<Expr>),
    /// base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// unary minus
    Neg(Box<Expr>),
    Func(Function, Box<Expr>),
    Func2(BinaryFunction, Box<Expr>, Box<Expr>),
}

/// Named constants a symbol resolves to when the scope does not define it.
pub fn named_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        "tau" => Some(std::f64::consts::TAU),
        "phi" => Some((1.0 + 5.0_f64.sqrt()) / 2.0),
        _ => None,
    }
}

/// Formats a number the way results are shown to the user: integers without a
/// fractional part, everything else rounded to 10 decimals with trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{}", value);
    }
    let rounded: f64 = format!("{:.10}", value).parse().unwrap_or(value);
    format!("{}", rounded)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", format_number(*val)),
            Expr::Add(lhs, rhs) => self.write_binary(f, lhs, "+", rhs),
            Expr::Sub(lhs, rhs) => self.write_binary(f, lhs, "-", rhs),
            Expr::Mul(lhs, rhs) => self.write_binary(f, lhs, "*", rhs),
            Expr::Div(lhs, rhs) => self.write_binary(f, lhs, "/", rhs),
            Expr::Mod(lhs, rhs) => self.write_binary(f, lhs, "%", rhs),
            Expr::Pow(lhs, rhs) => self.write_binary(f, lhs, "^", rhs),
            Expr::Neg(inner) => {
                if inner.precedence() <= Expr::UNARY {
                    write!(f, "-({})", inner)
                } else {
                    write!(f, "-{}", inner)
                }
            }
            Expr::Func(func, arg) => write!(f, "{}({})", func, arg),
            Expr::Func2(func, a, b) => write!(f, "{}({}, {})", func, a, b),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}

impl Expr {
    pub(crate) const ADDITIVE: u8 = 1;
    pub(crate) const MULTIPLICATIVE: u8 = 2;
    pub(crate) const UNARY: u8 = 3;
    pub(crate) const POWER: u8 = 4;
    pub(crate) const ATOM: u8 = 5;

    /// Binding strength of the node when printed, higher binds tighter.
    /// Negative literals print with a sign and therefore bind like unary minus.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => Expr::ADDITIVE,
            Expr::Mul(..) | Expr::Div(..) | Expr::Mod(..) => Expr::MULTIPLICATIVE,
            Expr::Neg(_) => Expr::UNARY,
            Expr::Const(val) if val.is_sign_negative() && *val != 0.0 => Expr::UNARY,
            Expr::Pow(..) => Expr::POWER,
            _ => Expr::ATOM,
        }
    }

    /// Whether the right operand of a binary node needs parentheses.
    pub(crate) fn right_needs_parens(&self, rhs: &Expr) -> bool {
        let prec = self.precedence();
        match self {
            Expr::Pow(..) => rhs.precedence() < Expr::POWER,
            // a same-level rhs stays bare only under the same associative operator
            Expr::Add(..) => rhs.precedence() < prec || (rhs.precedence() == prec && !matches!(rhs, Expr::Add(..))),
            Expr::Mul(..) => rhs.precedence() < prec || (rhs.precedence() == prec && !matches!(rhs, Expr::Mul(..))),
            _ => rhs.precedence() <= prec,
        }
    }

    /// Whether the left operand of a binary node needs parentheses.
    pub(crate) fn left_needs_parens(&self, lhs: &Expr) -> bool {
        match self {
            Expr::Pow(..) => lhs.precedence() <= Expr::POWER,
            _ => lhs.precedence() < self.precedence(),
        }
    }

    fn write_binary(&self, f: &mut fmt::Formatter, lhs: &Expr, op: &str, rhs: &Expr) -> fmt::Result {
        if self.left_needs_parens(lhs) {
            write!(f, "({})", lhs)?;
        } else {
            write!(f, "{}", lhs)?;
        }
        write!(f, " {} ", op)?;
        if self.right_needs_parens(rhs) {
            write!(f, "({})", rhs)
        } else {
            write!(f, "{}", rhs)
        }
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Wraps the expression into a unary function call.
    pub fn apply(self, func: Function) -> Expr {
        Expr::Func(func, self.boxed())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Numeric value of a literal, looking through unary minus (`-2` parses as `Neg(2)`).
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Const(val) => Some(*val),
            Expr::Neg(inner) => inner.as_constant().map(|v| -v),
            _ => None,
        }
    }

    /// A literal or one of the named constants: the leaves the arithmetic walker can reduce.
    pub fn is_leaf_value(&self) -> bool {
        match self {
            Expr::Const(_) => true,
            Expr::Var(name) => named_constant(name).is_some(),
            _ => false,
        }
    }

    /// Direct children in source order.
    pub fn args(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Vec::new(),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Mod(lhs, rhs)
            | Expr::Pow(lhs, rhs)
            | Expr::Func2(_, lhs, rhs) => vec![lhs, rhs],
            Expr::Neg(inner) | Expr::Func(_, inner) => vec![inner],
        }
    }

    /// Rebuilds this node around new children, in the order returned by [`Expr::args`].
    pub fn with_args(&self, mut args: Vec<Expr>) -> Expr {
        let mut next = || args.remove(0).boxed();
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(..) => Expr::Add(next(), next()),
            Expr::Sub(..) => Expr::Sub(next(), next()),
            Expr::Mul(..) => Expr::Mul(next(), next()),
            Expr::Div(..) => Expr::Div(next(), next()),
            Expr::Mod(..) => Expr::Mod(next(), next()),
            Expr::Pow(..) => Expr::Pow(next(), next()),
            Expr::Neg(_) => Expr::Neg(next()),
            Expr::Func(func, _) => Expr::Func(*func, next()),
            Expr::Func2(func, ..) => Expr::Func2(*func, next(), next()),
        }
    }

    /// Applies `f` to every direct child and rebuilds the node.
    pub fn map_args<F>(&self, f: F) -> Expr
    where
        F: Fn(&Expr) -> Expr,
    {
        self.with_args(self.args().into_iter().map(f).collect())
    }

    /// Sub-tree at a path of child indices, `None` when the path leaves the tree.
    pub fn at_path(&self, path: &[usize]) -> Option<&Expr> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.args().get(*first).and_then(|child| child.at_path(rest)),
        }
    }

    /// Copy of the tree with the sub-tree at `path` replaced.
    pub fn replace_at(&self, path: &[usize], replacement: Expr) -> Expr {
        match path.split_first() {
            None => replacement,
            Some((first, rest)) => {
                let args = self
                    .args()
                    .into_iter()
                    .enumerate()
                    .map(|(i, child)| {
                        if i == *first {
                            child.replace_at(rest, replacement.clone())
                        } else {
                            child.clone()
                        }
                    })
                    .collect();
                self.with_args(args)
            }
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            _ => self.map_args(|child| child.set_variable(var, value)),
        }
    }

    /// Substitutes every variable present in the map.
    pub fn set_variable_from_map(&self, var_map: &HashMap<String, f64>) -> Expr {
        match self {
            Expr::Var(name) => match var_map.get(name) {
                Some(value) => Expr::Const(*value),
                None => self.clone(),
            },
            Expr::Const(_) => self.clone(),
            _ => self.map_args(|child| child.set_variable_from_map(var_map)),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            _ => self.args().iter().any(|child| child.contains_variable(var_name)),
        }
    }

    /// Sorted, deduplicated names of the free symbols (named constants excluded).
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) if named_constant(name).is_none() => vars.push(name.clone()),
            _ => self.args().iter().for_each(|child| child.collect_variables(vars)),
        }
    }

    /// Number of nodes, used to bound the work of the walkers in logs.
    pub fn node_count(&self) -> usize {
        1 + self.args().iter().map(|child| child.node_count()).sum::<usize>()
    }
}
