//! Semantic analysis module.
//!
//! This module assigns a type to every expression of a parsed
//! [`Program`](crate::ast::ast::Program) and validates the map model: every
//! map is used with one key signature and holds one value type.
//!
//! Analysis runs the whole program twice. The first pass registers map
//! signatures and value types from every use and assignment; the second pass
//! sees the settled tables and also requires both operands of a binary
//! operator to have the same type. Problems are accumulated as
//! [`Diagnostics`](crate::errors::diagnostics::Diagnostics) rather than
//! returned as errors.

pub mod maps;
pub mod type_checker;
pub mod types;
