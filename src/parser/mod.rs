//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a [`Program`](crate::ast::ast::Program). It uses a Pratt parser for
//! expressions with C operator precedence and handles:
//!
//! - Probe headers (`kprobe:sys_read`) and `/.../` predicates
//! - Map assignments, including aggregation calls such as `count()`
//! - Expressions (binary and unary ops, calls, maps, literals, builtins)
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
