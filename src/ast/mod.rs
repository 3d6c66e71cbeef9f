/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, probes and predicates
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes found inside probe bodies
///
/// The tree is built once by the parser and only read afterwards.
pub mod ast;
pub mod expressions;
pub mod statements;
