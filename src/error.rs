// ABOUTME: Error types for evaluation failures in the Lispy interpreter

use crate::value::Value;
use thiserror::Error;

/// The error taxonomy from spec.md §7. `Err` is a first-class value, not an
/// exception, so every variant here carries whatever context the printer
/// needs to reproduce the in-band message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Undefined Symbol '{0}'")]
    UndefinedSymbol(String),

    /// Type mismatch: function name, expected type, actual type, argument position.
    #[error("{function}: expected {expected}, got {actual} at argument {position}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
        position: usize,
    },

    /// Too many arguments to a lambda (variadic builtins never raise this).
    #[error("too many arguments — Got {got}, Expected {expected}")]
    TooManyArguments { got: usize, expected: usize },

    /// Arity mismatch on a builtin with a fixed (non-variadic) arity.
    #[error("{function}: expected {expected} argument(s), got {actual}")]
    ArityError {
        function: String,
        expected: String, // "2", "1 or 2", "at least 1"
        actual: usize,
    },

    #[error("Division by Zero")]
    DivisionByZero,

    #[error("Negative Exponent")]
    NegativeExponent,

    #[error("invalid number")]
    InvalidNumber,

    #[error("Symbol '&' not followed by a single symbol")]
    MalformedVariadic,

    #[error("S-Expression starts with incorrect type. Got {actual}, Expected Function")]
    NotAFunction { actual: String },

    /// Runtime error with function context, for everything not worth its own variant.
    #[error("{function}: {message}")]
    RuntimeError { function: String, message: String },

    #[error("{0}")]
    Custom(String),
}

impl EvalError {
    /// Create a type mismatch error with full context.
    pub fn type_error(function: &str, expected: &str, actual: &Value, position: usize) -> Self {
        EvalError::TypeMismatch {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
            position,
        }
    }

    /// Create an arity error with expected and actual counts.
    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityError {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a runtime error with function context.
    pub fn runtime_error(function: &str, message: impl Into<String>) -> Self {
        EvalError::RuntimeError {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
