//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedCalc::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("x^2 + 2*sin(x)").unwrap();
//! assert_eq!(parsed_expression.to_string(), "x ^ 2 + 2 * sin(x)");
//! ```
use std::str::FromStr;

use crate::errors::{MathError, MathResult};
use crate::symbolic::symbolic_engine::{BinaryFunction, Expr, Function};

//                  precedence ladder (loosest first)
//                |  additive        + -               |
//                |  multiplicative  * / %  implicit   |
//                |  unary           - +               |
//                |  power           ^  (right assoc)  |
//                |  primary  number, symbol, f(...),  |
//                |           ( expression )           |

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Ident(name) => format!("symbol {}", name),
            Token::Op(c) => format!("operator {}", c),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
        }
    }
}

/// Splits the input into tokens, each tagged with its 0-based char position.
fn tokenize(input: &str) -> MathResult<Vec<(Token, usize)>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit())) {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            // exponent only when digits follow, so that `2e` stays `2 * e`
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| MathError::parse(format!("Invalid number {}", text), start + 1))?;
            tokens.push((Token::Number(value), start));
        } else if c.is_ascii_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push((Token::Ident(chars[start..i].iter().collect()), start));
        } else {
            let token = match c {
                '+' | '-' | '*' | '/' | '%' | '^' => Token::Op(c),
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                _ => {
                    return Err(MathError::parse(
                        format!("Syntax error in part \"{}\"", c),
                        start + 1,
                    ));
                }
            };
            tokens.push((token, start));
            i += 1;
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    /// char count of the input, where "end of expression" errors point
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    /// 1-based position of the current token, or one past the input at the end.
    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, at)| at + 1)
            .unwrap_or(self.end + 1)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        self.pos += 1;
        token
    }

    fn unexpected(&self) -> MathError {
        match self.peek() {
            None => MathError::parse("Unexpected end of expression", self.position()),
            Some(token) => MathError::parse(
                format!("Unexpected {}", token.describe()),
                self.position(),
            ),
        }
    }

    fn parse_additive(&mut self) -> MathResult<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            match self.peek() {
                Some(Token::Op('+')) => {
                    self.advance();
                    lhs = Expr::Add(lhs.boxed(), self.parse_multiplicative()?.boxed());
                }
                Some(Token::Op('-')) => {
                    self.advance();
                    lhs = Expr::Sub(lhs.boxed(), self.parse_multiplicative()?.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_multiplicative(&mut self) -> MathResult<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Op(op @ ('*' | '/' | '%'))) => {
                    let op = *op;
                    self.advance();
                    let rhs = self.parse_unary()?.boxed();
                    lhs = match op {
                        '*' => Expr::Mul(lhs.boxed(), rhs),
                        '/' => Expr::Div(lhs.boxed(), rhs),
                        _ => Expr::Mod(lhs.boxed(), rhs),
                    };
                }
                // implicit multiplication: 2x, 2(x+1), (x+1)(x-1)
                Some(Token::Number(_)) | Some(Token::Ident(_)) | Some(Token::LParen) => {
                    let rhs = self.parse_power()?;
                    lhs = Expr::Mul(lhs.boxed(), rhs.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_unary(&mut self) -> MathResult<Expr> {
        match self.peek() {
            Some(Token::Op('-')) => {
                self.advance();
                Ok(Expr::Neg(self.parse_unary()?.boxed()))
            }
            Some(Token::Op('+')) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> MathResult<Expr> {
        let base = self.parse_primary()?;
        if let Some(Token::Op('^')) = self.peek() {
            self.advance();
            // exponent may carry its own sign and chains to the right: 2^-1, 2^3^2
            let exponent = self.parse_unary()?;
            return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> MathResult<Expr> {
        let position = self.position();
        match self.peek().cloned() {
            Some(Token::Number(value)) => {
                self.advance();
                Ok(Expr::Const(value))
            }
            Some(Token::Ident(name)) => {
                self.advance();
                if let Some(Token::LParen) = self.peek() {
                    self.advance();
                    let args = self.parse_arguments()?;
                    return Self::build_call(&name, args, position);
                }
                if Function::from_str(&name).is_ok() || BinaryFunction::from_str(&name).is_ok() {
                    return Err(MathError::parse(
                        format!("Function {} requires arguments in parentheses", name),
                        position,
                    ));
                }
                Ok(Expr::Var(name))
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_additive()?;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.advance();
                        Ok(inner)
                    }
                    _ => Err(MathError::parse("Parenthesis ) expected", self.position())),
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Comma separated arguments after an opening parenthesis, consumes the closing one.
    fn parse_arguments(&mut self) -> MathResult<Vec<Expr>> {
        let mut args = Vec::new();
        if let Some(Token::RParen) = self.peek() {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_additive()?);
            match self.peek() {
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(Token::RParen) => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(MathError::parse("Parenthesis ) expected", self.position())),
            }
        }
    }

    fn build_call(name: &str, mut args: Vec<Expr>, position: usize) -> MathResult<Expr> {
        let arity_error = |expected: &str, provided: usize| {
            MathError::parse(
                format!(
                    "Wrong number of arguments in function {} ({} provided, {} expected)",
                    name, provided, expected
                ),
                position,
            )
        };
        match (name, args.len()) {
            ("log", 2) => {
                let base = args.remove(1);
                let value = args.remove(0);
                return Ok(Expr::Div(
                    Expr::Func(Function::Log, value.boxed()).boxed(),
                    Expr::Func(Function::Log, base.boxed()).boxed(),
                ));
            }
            ("pow", 2) => {
                let exponent = args.remove(1);
                return Ok(Expr::Pow(args.remove(0).boxed(), exponent.boxed()));
            }
            ("mod", 2) => {
                let divisor = args.remove(1);
                return Ok(Expr::Mod(args.remove(0).boxed(), divisor.boxed()));
            }
            ("pow", n) | ("mod", n) => return Err(arity_error("2", n)),
            _ => {}
        }
        if let Ok(func) = Function::from_str(name) {
            if args.len() != 1 {
                let expected = if func == Function::Log { "1 or 2" } else { "1" };
                return Err(arity_error(expected, args.len()));
            }
            return Ok(Expr::Func(func, args.remove(0).boxed()));
        }
        if let Ok(func) = BinaryFunction::from_str(name) {
            if args.len() != 2 {
                return Err(arity_error("2", args.len()));
            }
            let second = args.remove(1);
            return Ok(Expr::Func2(func, args.remove(0).boxed(), second.boxed()));
        }
        Err(MathError::parse(format!("Unknown function {}", name), position))
    }
}

/// Parses infix text into an [`Expr`]; the whole input must be consumed.
pub fn parse_expression_func(input: &str) -> MathResult<Expr> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.chars().count(),
    };
    let expr = parser.parse_additive()?;
    if parser.peek().is_some() {
        return Err(parser.unexpected());
    }
    Ok(expr)
}

/// Result of a syntax check that does not evaluate anything.
#[derive(Clone, Debug, PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub error: Option<String>,
}

pub fn validate_expression(input: &str) -> Validation {
    match parse_expression_func(input) {
        Ok(_) => Validation {
            valid: true,
            error: None,
        },
        Err(e) => Validation {
            valid: false,
            error: Some(e.to_string()),
        },
    }
}

impl Expr {
    /// Parses a string into a symbolic expression.
    pub fn parse_expression(input: &str) -> MathResult<Expr> {
        parse_expression_func(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Box<Expr> {
        Box::new(Expr::Var("x".to_string()))
    }

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Func(Function::Exp, x()));
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_expression_func("42").unwrap(), Expr::Const(42.0));
        assert_eq!(parse_expression_func(".5").unwrap(), Expr::Const(0.5));
        assert_eq!(parse_expression_func("2.5e-3").unwrap(), Expr::Const(2.5e-3));
    }

    #[test]
    fn test_parse_precedence() {
        let expr = parse_expression_func("1 + 2 * 3 ^ 2").unwrap();
        let expected = Expr::Add(
            Box::new(Expr::Const(1.0)),
            Box::new(Expr::Mul(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Pow(Box::new(Expr::Const(3.0)), Box::new(Expr::Const(2.0)))),
            )),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_left_associative_subtraction() {
        let result = parse_expression_func("x^2 - x - 1").unwrap();
        let to_check = Expr::Pow(x(), Box::new(Expr::Const(2.0))) - *x() - Expr::Const(1.0);
        assert_eq!(result, to_check);
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expression_func("2^3^2").unwrap();
        let expected = Expr::Const(2.0).pow(Expr::Const(3.0).pow(Expr::Const(2.0)));
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let expr = parse_expression_func("-x^2").unwrap();
        assert_eq!(expr, Expr::Neg(Box::new(Expr::Pow(x(), Box::new(Expr::Const(2.0))))));
        let expr = parse_expression_func("2^-1").unwrap();
        assert_eq!(expr, Expr::Const(2.0).pow(-Expr::Const(1.0)));
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(
            parse_expression_func("2x").unwrap(),
            Expr::Mul(Box::new(Expr::Const(2.0)), x())
        );
        assert_eq!(
            parse_expression_func("2e").unwrap(),
            Expr::Mul(Box::new(Expr::Const(2.0)), Box::new(Expr::var("e")))
        );
        let expr = parse_expression_func("(x+1)(x-1)").unwrap();
        assert!(matches!(expr, Expr::Mul(..)));
    }

    #[test]
    fn test_parse_functions() {
        let expr = parse_expression_func("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::Func(Function::Sin, Box::new(Expr::Func(Function::Cos, x())))
        );
        let expr = parse_expression_func("log10(x) + atan2(x, 1)").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Func(Function::Log10, x())),
                Box::new(Expr::Func2(BinaryFunction::Atan2, x(), Box::new(Expr::Const(1.0))))
            )
        );
    }

    #[test]
    fn test_two_argument_aliases() {
        assert_eq!(
            parse_expression_func("pow(x, 2)").unwrap(),
            parse_expression_func("x^2").unwrap()
        );
        assert_eq!(
            parse_expression_func("mod(x, 3)").unwrap(),
            parse_expression_func("x % 3").unwrap()
        );
        assert_eq!(
            parse_expression_func("log(x, 2)").unwrap(),
            parse_expression_func("log(x) / log(2)").unwrap()
        );
    }

    #[test]
    fn test_invalid_expression() {
        let err = parse_expression_func("(x +").unwrap_err();
        assert_eq!(err, MathError::parse("Unexpected end of expression", 5));
    }

    #[test]
    fn test_unmatched_brackets() {
        let err = parse_expression_func("(x + y").unwrap_err();
        assert_eq!(err, MathError::parse("Parenthesis ) expected", 7));
        let err = parse_expression_func("x + y)").unwrap_err();
        assert_eq!(err, MathError::parse("Unexpected )", 6));
    }

    #[test]
    fn test_trailing_operator_and_unknown_tokens() {
        assert!(parse_expression_func("x *").is_err());
        assert!(parse_expression_func("+++").is_err());
        assert!(parse_expression_func("x $ 2").is_err());
        assert!(parse_expression_func("").is_err());
    }

    #[test]
    fn test_function_errors() {
        let err = parse_expression_func("foo(x)").unwrap_err();
        assert_eq!(err, MathError::parse("Unknown function foo", 1));
        assert!(parse_expression_func("sin(x, 2)").is_err());
        assert!(parse_expression_func("atan2(x)").is_err());
        assert!(parse_expression_func("sin + 1").is_err());
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let first = parse_expression_func("x^2 + 3*x - sin(x)/2").unwrap();
        let second = parse_expression_func("x^2 + 3*x - sin(x)/2").unwrap();
        assert_eq!(first, second);
        let reprinted = parse_expression_func(&first.to_string()).unwrap();
        assert_eq!(first, reprinted);
    }

    #[test]
    fn test_validate_expression() {
        assert_eq!(
            validate_expression("sin(x) + 1"),
            Validation {
                valid: true,
                error: None
            }
        );
        let check = validate_expression("sin(x");
        assert!(!check.valid);
        assert_eq!(check.error.unwrap(), "Parenthesis ) expected (char 6)");
    }
}
