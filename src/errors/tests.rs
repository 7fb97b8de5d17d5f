//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;
use std::sync::Arc;

fn at(offset: usize) -> Position {
    Position(offset, Arc::new("test.ml".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_error_kind(), ErrorKind::Lex);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.ml");
}

#[test]
fn test_error_kinds_by_stage() {
    assert_eq!(ErrorImpl::UnterminatedString.kind(), ErrorKind::Lex);
    assert_eq!(ErrorImpl::UnexpectedEndOfInput.kind(), ErrorKind::Parse);
    assert_eq!(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string()
        }
        .kind(),
        ErrorKind::Parse
    );
    assert_eq!(ErrorImpl::DivisionByZero.kind(), ErrorKind::Runtime);
    assert_eq!(
        ErrorImpl::RecursionLimitExceeded { limit: 8 }.kind(),
        ErrorKind::Runtime
    );
    assert_eq!(
        ErrorImpl::CapacityExceeded { limit: 4 }.kind(),
        ErrorKind::Runtime
    );
    assert_eq!(
        ErrorImpl::NestingTooDeep { limit: 128 }.kind(),
        ErrorKind::Parse
    );
    assert_eq!(
        ErrorImpl::StackUnavailable { size: 4096 }.kind(),
        ErrorKind::Runtime
    );
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 128 }, at(300));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(
        error.to_string(),
        "parse error at test.ml:300: nesting deeper than 128 levels"
    );
}

#[test]
fn test_arity_mismatch_error() {
    let error = Error::new(
        ErrorImpl::ArityMismatch {
            function: "add".to_string(),
            expected: 2,
            received: 3,
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "ArityMismatch");
    assert_eq!(
        error.get_message(),
        "arity mismatch calling \"add\": expected 2, received 3"
    );
}

#[test]
fn test_variable_not_declared_error() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_error_kind(), ErrorKind::Runtime);
}

#[test]
fn test_error_display_includes_stage_and_position() {
    let error = Error::new(ErrorImpl::DivisionByZero, at(7));

    assert_eq!(error.to_string(), "runtime error at test.ml:7: division by zero");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "integer".to_string(),
            received: "string".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(error.get_tip().to_string(), "Expected type `integer`, received `string`");
}
