//! Error types and error handling for the compiler.
//!
//! This module defines the two kinds of failure the front end and the
//! semantic analyser report:
//!
//! - Positioned lexing and parsing errors, returned as `Result`s
//! - Semantic diagnostics, accumulated in a sink during analysis
//! - Error names, tips and message formatting for both

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
