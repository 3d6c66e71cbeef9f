//! Semantic diagnostics.
//!
//! The analyser never stops at the first problem: every violation it finds
//! is recorded in a [`Diagnostics`] sink and the run continues. Whether the
//! program is rejected is decided between passes, from the sink's contents.

use std::fmt::{self, Display};

use thiserror::Error;

use crate::{ast::expressions::BinaryOp, type_checker::types::Type, Span};

/// The violations the analyser can report.
///
/// The `#[error]` strings are the exact messages shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("Unknown builtin: '{name}'")]
    UnknownBuiltin { name: String },
    #[error("Unknown function: '{name}'")]
    UnknownFunction { name: String },
    #[error("{function}() should take {expected} {} ({received} provided)", argument_noun(.expected))]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error(
        "Argument mismatch for {map}: trying to access with arguments: {}\n\twhen map already uses the arguments: {}",
        TypeList(.received),
        TypeList(.registered)
    )]
    MapSignatureMismatch {
        map: String,
        received: Vec<Type>,
        registered: Vec<Type>,
    },
    #[error(
        "Type mismatch for {map}: trying to assign {}\n\twhen map already contains a value of type '{registered}'",
        AssignedValue(.received, .function)
    )]
    MapValueMismatch {
        map: String,
        received: Type,
        registered: Type,
        /// Set when the rejected value came from an aggregation call.
        function: Option<String>,
    },
    #[error("Type mismatch for '{operator}': comparing '{left}' with '{right}'")]
    BinaryOperandTypeMismatch {
        operator: BinaryOp,
        left: Type,
        right: Type,
    },
}

fn argument_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

/// Renders a key signature as `[ integer integer ]`.
pub struct TypeList<'a>(pub &'a [Type]);

impl Display for TypeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for ty in self.0 {
            write!(f, "{} ", ty)?;
        }
        write!(f, "]")
    }
}

struct AssignedValue<'a>(&'a Type, &'a Option<String>);

impl Display for AssignedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(function) => write!(f, "result of '{}()'", function),
            None => write!(f, "variable of type '{}'", self.0),
        }
    }
}

/// A violation together with the node it was found on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

/// Ordered, append-only collection of diagnostics for one analysis run.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, span: Span) {
        tracing::trace!("recorded diagnostic: {}", kind);
        self.entries.push(Diagnostic { kind, span });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn kinds(&self) -> Vec<&DiagnosticKind> {
        self.entries.iter().map(|diagnostic| &diagnostic.kind).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|diagnostic| diagnostic.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One message per line; multi-line messages are followed by a blank line.
impl Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.entries {
            let message = diagnostic.to_string();
            writeln!(f, "{}", message)?;
            if message.contains('\n') {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
