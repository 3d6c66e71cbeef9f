use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use lazy_static::lazy_static;
use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Predicate, Probe, Program},
        expressions::{BinaryExpr, CallExpr, Expr, ExprKind, MapExpr},
        statements::Stmt,
    },
    errors::diagnostics::{DiagnosticKind, Diagnostics},
    Span,
};

use super::{
    maps::{MapSignatures, MapValues, Registration},
    types::Type,
};

/// Arity and result type of a builtin function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub arity: usize,
    pub returns: Type,
}

lazy_static! {
    static ref BUILTINS: HashSet<&'static str> = HashSet::from(["nsecs", "pid", "tid"]);
    static ref FUNCTIONS: HashMap<&'static str, FunctionSignature> = HashMap::from([
        ("quantize", FunctionSignature { arity: 1, returns: Type::Quantize }),
        ("count", FunctionSignature { arity: 0, returns: Type::Count }),
    ]);
}

/// Looks up a builtin function by name.
pub fn function_signature(name: &str) -> Option<FunctionSignature> {
    FUNCTIONS.get(name).copied()
}

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(name)
}

/// One full traversal of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pass {
    /// Registers map signatures and value types from every use and
    /// assignment.
    First = 1,
    /// Re-checks with the tables settled and enforces equal operand types.
    Second = 2,
}

impl Pass {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Operand types are only compared once every map assignment has been
    /// seen; before that a map read ahead of its assignment is still `none`.
    fn checks_operands(self) -> bool {
        self == Pass::Second
    }
}

impl Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Result of analysing a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    Success,
    /// Diagnostics were recorded during this pass. Pass 1 failures are map
    /// signature and assignment errors; pass 2 failures are operand type
    /// mismatches.
    FailedAtPass(Pass),
}

impl AnalysisStatus {
    pub fn is_success(&self) -> bool {
        *self == AnalysisStatus::Success
    }

    /// `0` on success, otherwise the number of the failing pass.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalysisStatus::Success => 0,
            AnalysisStatus::FailedAtPass(pass) => i32::from(pass.number()),
        }
    }
}

/// Assigns a type to every expression of a program and checks that each map
/// is used with one key signature and holds one value type.
///
/// All state belongs to a single run of [`SemanticAnalyser::analyse`]: the
/// two map tables and the diagnostics are shared by both passes of that run
/// and are readable afterwards.
#[derive(Debug)]
pub struct SemanticAnalyser<'a> {
    root: &'a Program,
    map_signatures: MapSignatures,
    map_values: MapValues,
    diagnostics: Diagnostics,
    pass: Pass,
    passes_run: u8,
}

impl<'a> SemanticAnalyser<'a> {
    pub fn new(root: &'a Program) -> Self {
        SemanticAnalyser {
            root,
            map_signatures: MapSignatures::new(),
            map_values: MapValues::new(),
            diagnostics: Diagnostics::new(),
            pass: Pass::First,
            passes_run: 0,
        }
    }

    /// Runs both passes over the program.
    ///
    /// Stops after the first pass that leaves any diagnostic behind, so the
    /// second pass only ever runs on a program whose maps are consistent.
    /// Diagnostics are kept, not printed; see [`analyse`] for the variant
    /// that reports them.
    pub fn analyse(&mut self) -> AnalysisStatus {
        self.map_signatures = MapSignatures::new();
        self.map_values = MapValues::new();
        self.diagnostics = Diagnostics::new();
        self.passes_run = 0;

        let root = self.root;

        for pass in [Pass::First, Pass::Second] {
            self.pass = pass;
            debug!(pass = pass.number(), probes = root.probes.len(), "semantic pass started");

            self.check_program(root);
            self.passes_run += 1;

            if !self.diagnostics.is_empty() {
                debug!(
                    pass = pass.number(),
                    diagnostics = self.diagnostics.len(),
                    "semantic analysis failed"
                );
                return AnalysisStatus::FailedAtPass(pass);
            }
        }

        debug!(
            maps = self.map_signatures.len(),
            "semantic analysis succeeded"
        );
        AnalysisStatus::Success
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn map_signatures(&self) -> &MapSignatures {
        &self.map_signatures
    }

    pub fn map_values(&self) -> &MapValues {
        &self.map_values
    }

    /// Number of passes that ran to completion in the last run.
    pub fn passes_run(&self) -> u8 {
        self.passes_run
    }

    fn check_program(&mut self, program: &Program) {
        for probe in &program.probes {
            self.check_probe(probe);
        }
    }

    fn check_probe(&mut self, probe: &Probe) {
        trace!(probe = %probe.name(), "checking probe");

        if let Some(predicate) = &probe.predicate {
            self.check_predicate(predicate);
        }
        for stmt in &probe.stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_predicate(&mut self, predicate: &Predicate) {
        self.infer_expr(&predicate.expr);
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(stmt) => {
                self.infer_expr(&stmt.expression);
            }
            Stmt::AssignMap(assignment) => {
                self.infer_map(&assignment.map);
                let value = self.infer_expr(&assignment.value);
                self.assign_map_value(&assignment.map, value, None, &assignment.span);
            }
            Stmt::AssignMapCall(assignment) => {
                self.infer_map(&assignment.map);
                let value = self.infer_call(&assignment.call);
                self.assign_map_value(
                    &assignment.map,
                    value,
                    Some(&assignment.call.func),
                    &assignment.span,
                );
            }
        }
    }

    /// The first assignment to a map fixes its value type.
    fn assign_map_value(&mut self, map: &MapExpr, value: Type, function: Option<&str>, span: &Span) {
        if let Registration::Conflict(registered) = self.map_values.register(&map.ident, value) {
            let registered = *registered;
            self.diagnostics.push(
                DiagnosticKind::MapValueMismatch {
                    map: map.ident.clone(),
                    received: value,
                    registered,
                    function: function.map(String::from),
                },
                span.clone(),
            );
        }
    }

    /// Infers the type of `expr`, checking its children first.
    pub fn infer_expr(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Integer(_) => Type::Integer,
            ExprKind::Builtin(name) => self.infer_builtin(name, &expr.span),
            ExprKind::Call(call) => self.infer_call(call),
            ExprKind::Map(map) => self.infer_map(map),
            ExprKind::Binary(binary) => self.infer_binary(binary, &expr.span),
            ExprKind::Unary(unary) => {
                self.infer_expr(&unary.expr);
                Type::Integer
            }
        }
    }

    fn infer_builtin(&mut self, name: &str, span: &Span) -> Type {
        if is_builtin(name) {
            return Type::Integer;
        }

        self.diagnostics.push(
            DiagnosticKind::UnknownBuiltin {
                name: name.to_string(),
            },
            span.clone(),
        );
        Type::None
    }

    fn infer_call(&mut self, call: &CallExpr) -> Type {
        for arg in &call.args {
            self.infer_expr(arg);
        }

        let Some(signature) = function_signature(&call.func) else {
            self.diagnostics.push(
                DiagnosticKind::UnknownFunction {
                    name: call.func.clone(),
                },
                call.span.clone(),
            );
            return Type::None;
        };

        // A wrong argument count still yields the declared result type.
        if call.args.len() != signature.arity {
            self.diagnostics.push(
                DiagnosticKind::ArityMismatch {
                    function: call.func.clone(),
                    expected: signature.arity,
                    received: call.args.len(),
                },
                call.span.clone(),
            );
        }

        signature.returns
    }

    fn infer_map(&mut self, map: &MapExpr) -> Type {
        let args: Vec<Type> = map.args.iter().map(|arg| self.infer_expr(arg)).collect();

        if let Registration::Conflict(registered) = self.map_signatures.register(&map.ident, &args) {
            let registered = registered.to_vec();
            self.diagnostics.push(
                DiagnosticKind::MapSignatureMismatch {
                    map: map.ident.clone(),
                    received: args,
                    registered,
                },
                map.span.clone(),
            );
        }

        // A map read before any assignment is `none`; pass 2 operand checks
        // are what report it.
        self.map_values.get(&map.ident).unwrap_or_default()
    }

    fn infer_binary(&mut self, binary: &BinaryExpr, span: &Span) -> Type {
        let left = self.infer_expr(&binary.left);
        let right = self.infer_expr(&binary.right);

        if self.pass.checks_operands() && left != right {
            self.diagnostics.push(
                DiagnosticKind::BinaryOperandTypeMismatch {
                    operator: binary.operator,
                    left,
                    right,
                },
                span.clone(),
            );
        }

        Type::Integer
    }
}

/// Analyses `program`, writing any diagnostics to stderr.
///
/// Code generation must not run unless this returns
/// [`AnalysisStatus::Success`].
pub fn analyse(program: &Program) -> AnalysisStatus {
    let mut analyser = SemanticAnalyser::new(program);
    let status = analyser.analyse();

    if !status.is_success() {
        eprint!("{}", analyser.diagnostics());
    }

    status
}
