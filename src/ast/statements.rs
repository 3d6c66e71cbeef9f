use crate::Span;

use super::expressions::{CallExpr, Expr, MapExpr};

/// Statement node inside a probe body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    AssignMap(AssignMapStmt),
    /// Assignment whose right-hand side is a call, e.g. `@x = count()`.
    AssignMapCall(AssignMapCallStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::AssignMap(stmt) => &stmt.span,
            Stmt::AssignMapCall(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignMapStmt {
    pub map: MapExpr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignMapCallStmt {
    pub map: MapExpr,
    pub call: CallExpr,
    pub span: Span,
}
