//! Crate-wide error type.
//!
//! Structural failures (bad parse, bad dimensions, too little data) always surface as a
//! `MathError`; numeric edge cases met while sampling (integration, range evaluation)
//! degrade to `0`/`NaN` inside the algorithms and never reach this type.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// malformed expression text, `position` is 1-based
    #[error("{message} (char {position})")]
    Parse { message: String, position: usize },

    #[error("Undefined symbol {0}")]
    UndefinedSymbol(String),

    #[error("{0}")]
    Evaluation(String),

    #[error("Failed to compute derivative: {0}")]
    Derivative(String),

    #[error("{0}")]
    Dimension(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Cannot calculate inverse, determinant is zero")]
    SingularMatrix,

    #[error("No data provided")]
    NoData,

    #[error("{0}")]
    InsufficientData(String),

    #[error("Limit does not exist or could not be computed.")]
    LimitNotFound,

    #[error("config error: {0}")]
    Config(String),
}

impl MathError {
    pub fn parse(message: impl Into<String>, position: usize) -> Self {
        MathError::Parse {
            message: message.into(),
            position,
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            MathError::parse("Unexpected end of expression", 4).to_string(),
            "Unexpected end of expression (char 4)"
        );
        assert_eq!(
            MathError::Derivative("Unknown function foo".to_string()).to_string(),
            "Failed to compute derivative: Unknown function foo"
        );
        assert_eq!(
            MathError::LimitNotFound.to_string(),
            "Limit does not exist or could not be computed."
        );
        assert_eq!(
            MathError::UnknownOperation("cross".to_string()).to_string(),
            "Unknown operation: cross"
        );
    }
}
