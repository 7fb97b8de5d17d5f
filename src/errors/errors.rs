use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The stage of the pipeline an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Runtime,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lex error"),
            ErrorKind::Parse => write!(f, "parse error"),
            ErrorKind::Runtime => write!(f, "runtime error"),
        }
    }
}

#[derive(Error, Debug, Clone)]
#[error("{} at {}: {}", .internal_error.kind(), .position, .internal_error)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::RecursionLimitExceeded { .. } => "RecursionLimitExceeded",
            ErrorImpl::CapacityExceeded { .. } => "CapacityExceeded",
            ErrorImpl::StackUnavailable { .. } => "StackUnavailable",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "Input ended in the middle of a statement, is a `}` or `)` missing?",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nested more than {} levels deep, split it into smaller pieces",
                limit
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::RecursionLimitExceeded { limit } => ErrorTip::Suggestion(format!(
                "Evaluation nested deeper than {}, is there a missing base case?",
                limit
            )),
            ErrorImpl::CapacityExceeded { limit } => {
                ErrorTip::Suggestion(format!("A scope may hold at most {} variables", limit))
            }
            ErrorImpl::StackUnavailable { .. } => ErrorTip::Suggestion(String::from(
                "Lower the configured nesting depth",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing
    #[error("unexpected character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,

    // Parsing
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    // Evaluation
    #[error("undefined variable {variable:?}")]
    VariableNotDeclared { variable: String },
    #[error("undefined function {function:?}")]
    FunctionNotDeclared { function: String },
    #[error("arity mismatch calling {function:?}: expected {expected}, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("type mismatch: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },
    #[error("capacity of {limit} variables exceeded")]
    CapacityExceeded { limit: usize },
    #[error("could not reserve a {size} byte evaluation stack")]
    StackUnavailable { size: usize },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::UnterminatedString => ErrorKind::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::UnexpectedEndOfInput
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorKind::Parse,
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::FunctionNotDeclared { .. }
            | ErrorImpl::ArityMismatch { .. }
            | ErrorImpl::DivisionByZero
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::RecursionLimitExceeded { .. }
            | ErrorImpl::CapacityExceeded { .. }
            | ErrorImpl::StackUnavailable { .. } => ErrorKind::Runtime,
        }
    }
}
