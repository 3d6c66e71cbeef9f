//! Unit tests for error handling.
//!
//! This module contains tests for front-end error types and for the
//! rendering of semantic diagnostics.

use crate::ast::expressions::BinaryOp;
use crate::errors::diagnostics::{DiagnosticKind, Diagnostics, TypeList};
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::type_checker::types::Type;
use crate::{Position, Span};
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position(10, Rc::new("test.bt".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.bt".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position(), &pos);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "identifier".to_string()
        }
    );
}

#[test]
fn test_error_names() {
    let position = Position(0, Rc::new("test.bt".to_string()));

    let detailed = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: "=".to_string(),
            message: "only maps can be assigned to".to_string(),
        },
        position.clone(),
    );
    assert_eq!(detailed.get_error_name(), "UnexpectedTokenDetailed");

    let number = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        position,
    );
    assert_eq!(number.get_error_name(), "NumberParseError");

    let comment = Error::new(
        ErrorImpl::UnterminatedComment {
            token: "/*".to_string(),
        },
        Position(0, Rc::new("test.bt".to_string())),
    );
    assert_eq!(comment.get_error_name(), "UnterminatedComment");
    assert_eq!(
        comment.headline(),
        "UnterminatedComment (Comment opened with `/*` is never closed with `*/`)"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position(0, Rc::new("test.bt".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.headline(), "UnrecognisedToken");
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Position(0, Rc::new("test.bt".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
    assert_eq!(
        error.headline(),
        "UnexpectedToken (Unexpected token: `}`, did you miss a semicolon?)"
    );
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_type_list_display() {
    assert_eq!(TypeList(&[]).to_string(), "[ ]");
    assert_eq!(
        TypeList(&[Type::Integer, Type::None]).to_string(),
        "[ integer none ]"
    );
}

#[test]
fn test_arity_message_pluralises() {
    let one = DiagnosticKind::ArityMismatch {
        function: "quantize".to_string(),
        expected: 1,
        received: 2,
    };
    assert_eq!(one.to_string(), "quantize() should take 1 argument (2 provided)");

    let none = DiagnosticKind::ArityMismatch {
        function: "count".to_string(),
        expected: 0,
        received: 1,
    };
    assert_eq!(none.to_string(), "count() should take 0 arguments (1 provided)");
}

#[test]
fn test_binary_mismatch_message() {
    let kind = DiagnosticKind::BinaryOperandTypeMismatch {
        operator: BinaryOp::LessEquals,
        left: Type::Quantize,
        right: Type::Integer,
    };

    assert_eq!(
        kind.to_string(),
        "Type mismatch for '<=': comparing 'quantize' with 'integer'"
    );
}

#[test]
fn test_diagnostics_display() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());

    diagnostics.push(
        DiagnosticKind::UnknownBuiltin {
            name: "uid".to_string(),
        },
        Span::null(),
    );
    diagnostics.push(
        DiagnosticKind::MapValueMismatch {
            map: "@x".to_string(),
            received: Type::Integer,
            registered: Type::Count,
            function: None,
        },
        Span::null(),
    );
    diagnostics.push(
        DiagnosticKind::UnknownFunction {
            name: "foo".to_string(),
        },
        Span::null(),
    );

    assert_eq!(diagnostics.len(), 3);
    assert!(matches!(
        diagnostics.kinds().as_slice(),
        [
            DiagnosticKind::UnknownBuiltin { .. },
            DiagnosticKind::MapValueMismatch { .. },
            DiagnosticKind::UnknownFunction { .. },
        ]
    ));
    assert_eq!(
        diagnostics.messages(),
        vec![
            "Unknown builtin: 'uid'".to_string(),
            "Type mismatch for @x: trying to assign variable of type 'integer'\n\twhen map already contains a value of type 'count'".to_string(),
            "Unknown function: 'foo'".to_string(),
        ]
    );
    assert_eq!(
        diagnostics.to_string(),
        "Unknown builtin: 'uid'\n\
         Type mismatch for @x: trying to assign variable of type 'integer'\n\twhen map already contains a value of type 'count'\n\n\
         Unknown function: 'foo'\n"
    );
}
