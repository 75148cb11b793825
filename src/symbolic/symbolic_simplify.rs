//! # Symbolic Expression Simplification Module
//!
//! Local algebraic clean-up of expression trees, mostly applied to raw derivatives where
//! the differentiation rules leave `* 1`, `+ 0` and `x ^ 1` behind.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: arithmetic on two literals is evaluated (named functions are kept,
//!    `log(10)` stays symbolic)
//! 2. **Algebraic Identities**: `x + 0`, `x * 1`, `x * 0`, `0 / x`, `x / 1`, `x ^ 1`, `x ^ 0`, `1 ^ x`
//! 3. **Sign Normalisation**: double negation, `-1 * x = -x`, `x + -y = x - y`, `x - -y = x + y`
//! 4. **Coefficient Collection**: literal factors move to the front and merge, `x * 3 * 2 = 6 * x`
//! 5. **Like Bases**: `x * x = x ^ 2`, `x ^ a * x ^ b = x ^ (a + b)` for literal exponents
//!
//! Every pass works bottom-up; passes repeat until the tree stops changing.

use crate::symbolic::symbolic_eval::floored_mod;
use crate::symbolic::symbolic_engine::Expr;

const MAX_PASSES: usize = 10;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies until a fixpoint is reached.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("3 * x ^ 2 * 1 + 0").unwrap();
    /// assert_eq!(expr.simplify().to_string(), "3 * x ^ 2");
    /// ```
    pub fn simplify(&self) -> Expr {
        let mut current = self.clone();
        for _ in 0..MAX_PASSES {
            let next = current.simplify_();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// One bottom-up simplification pass.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Neg(inner) => {
                let inner = inner.simplify_();
                match inner {
                    Expr::Const(c) => Expr::Const(-c),
                    Expr::Neg(x) => *x, // --x = x
                    Expr::Mul(lhs, rhs) => match lhs.as_ref() {
                        Expr::Const(c) => Expr::Mul(Expr::Const(-c).boxed(), rhs),
                        _ => Expr::Neg(Expr::Mul(lhs, rhs).boxed()),
                    },
                    other => Expr::Neg(other.boxed()),
                }
            }
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (lhs, rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(z), x) | (x, Expr::Const(z)) if z == 0.0 => x,
                    (x, Expr::Neg(y)) | (Expr::Neg(y), x) => Expr::Sub(x.boxed(), y),
                    (x, Expr::Const(c)) if c < 0.0 => Expr::Sub(x.boxed(), Expr::Const(-c).boxed()),
                    (x, y) if x == y => Expr::Mul(Expr::Const(2.0).boxed(), x.boxed()),
                    (x, y) => Expr::Add(x.boxed(), y.boxed()),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (lhs, rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (x, Expr::Const(z)) if z == 0.0 => x,
                    (Expr::Const(z), y) if z == 0.0 => Expr::Neg(y.boxed()),
                    (x, y) if x == y => Expr::Const(0.0),
                    (x, Expr::Neg(y)) => Expr::Add(x.boxed(), y),
                    (x, Expr::Const(c)) if c < 0.0 => Expr::Add(x.boxed(), Expr::Const(-c).boxed()),
                    (x, y) => Expr::Sub(x.boxed(), y.boxed()),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                Self::simplify_product(lhs, rhs)
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (lhs, rhs) {
                    (Expr::Const(a), Expr::Const(b)) if b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(z), y) if z == 0.0 => {
                        // 0 / 0 stays visible
                        if y.is_zero() {
                            Expr::Div(Expr::Const(0.0).boxed(), y.boxed())
                        } else {
                            Expr::Const(0.0)
                        }
                    }
                    (x, Expr::Const(one)) if one == 1.0 => x,
                    (Expr::Neg(x), y) => Expr::Neg(Expr::Div(x, y.boxed()).boxed()),
                    // (c1 * expr) / c2 = (c1 / c2) * expr
                    (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(c)) if c != 0.0 => {
                        match inner_lhs.as_ref() {
                            Expr::Const(c1) => Expr::Mul(Expr::Const(c1 / c).boxed(), inner_rhs),
                            _ => Expr::Div(Expr::Mul(inner_lhs, inner_rhs).boxed(), Expr::Const(c).boxed()),
                        }
                    }
                    (x, y) => Expr::Div(x.boxed(), y.boxed()),
                }
            }
            Expr::Mod(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (lhs, rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(floored_mod(a, b)),
                    (x, y) => Expr::Mod(x.boxed(), y.boxed()),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (base, exp) {
                    (Expr::Const(a), Expr::Const(b)) if a.powf(b).is_finite() => Expr::Const(a.powf(b)),
                    (x, Expr::Const(one)) if one == 1.0 => x,
                    (_, Expr::Const(z)) if z == 0.0 => Expr::Const(1.0),
                    (Expr::Const(one), _) if one == 1.0 => Expr::Const(1.0),
                    // (x ^ a) ^ b = x ^ (a * b) only for integer b: (x ^ 2) ^ 0.5 is |x|
                    (Expr::Pow(inner, a), Expr::Const(b)) if b.fract() == 0.0 => match a.as_ref() {
                        Expr::Const(a) => Expr::Pow(inner, Expr::Const(a * b).boxed()),
                        _ => Expr::Pow(Expr::Pow(inner, a).boxed(), Expr::Const(b).boxed()),
                    },
                    (x, y) => Expr::Pow(x.boxed(), y.boxed()),
                }
            }
            Expr::Func(func, arg) => Expr::Func(*func, arg.simplify_().boxed()),
            Expr::Func2(func, a, b) => Expr::Func2(*func, a.simplify_().boxed(), b.simplify_().boxed()),
        }
    }

    fn simplify_product(lhs: Expr, rhs: Expr) -> Expr {
        match (lhs, rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
            (Expr::Const(z), _) | (_, Expr::Const(z)) if z == 0.0 => Expr::Const(0.0),
            (Expr::Const(one), x) | (x, Expr::Const(one)) if one == 1.0 => x,
            (Expr::Const(m), x) | (x, Expr::Const(m)) if m == -1.0 => Expr::Neg(x.boxed()),
            (Expr::Neg(x), y) => Expr::Neg(Expr::Mul(x, y.boxed()).boxed()),
            (x, Expr::Neg(y)) => Expr::Neg(Expr::Mul(x.boxed(), y).boxed()),
            // coefficient first: x * c = c * x
            (x, Expr::Const(c)) => Expr::Mul(Expr::Const(c).boxed(), x.boxed()),
            (Expr::Const(c1), Expr::Mul(inner_lhs, inner_rhs)) => match inner_lhs.as_ref() {
                Expr::Const(c2) => Expr::Mul(Expr::Const(c1 * c2).boxed(), inner_rhs),
                _ => Expr::Mul(Expr::Const(c1).boxed(), Expr::Mul(inner_lhs, inner_rhs).boxed()),
            },
            // x * (c * y) = c * (x * y)
            (x, Expr::Mul(inner_lhs, inner_rhs)) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                Expr::Mul(inner_lhs, Expr::Mul(x.boxed(), inner_rhs).boxed())
            }
            // (c * x) * y = c * (x * y)
            (Expr::Mul(inner_lhs, inner_rhs), y) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                Expr::Mul(inner_lhs, Expr::Mul(inner_rhs, y.boxed()).boxed())
            }
            (x, y) if x == y && matches!(x, Expr::Var(_)) => x.pow(Expr::Const(2.0)),
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                match (exp1.as_ref(), exp2.as_ref()) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Pow(base1, Expr::Const(a + b).boxed()),
                    _ => Expr::Mul(Expr::Pow(base1, exp1).boxed(), Expr::Pow(base2, exp2).boxed()),
                }
            }
            (x, y) => Expr::Mul(x.boxed(), y.boxed()),
        }
    }
}
