use crate::Span;

use super::{expressions::Expr, statements::Stmt};

/// Root of a parsed script: its probes in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub probes: Vec<Probe>,
    pub span: Span,
}

/// A block of statements attached to a tracing event.
///
/// `kprobe:sys_read /pid == 42/ { @reads = count(); }` has provider
/// `kprobe`, attach point `sys_read`, a predicate and one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub provider: String,
    pub attach_point: Option<String>,
    pub predicate: Option<Predicate>,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Probe {
    /// `provider:attach_point`, or just the provider for `BEGIN`-style probes.
    pub fn name(&self) -> String {
        match &self.attach_point {
            Some(attach_point) => format!("{}:{}", self.provider, attach_point),
            None => self.provider.clone(),
        }
    }
}

/// Guard expression between slashes; the probe body runs only when it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub expr: Expr,
    pub span: Span,
}
