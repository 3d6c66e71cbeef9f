//! Integration tests for end-to-end checking.
//!
//! These tests verify that the complete pipeline works correctly from source
//! code through tokenization, parsing and both passes of semantic analysis.

use std::rc::Rc;

use tracec::{
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{
        type_checker::{analyse, AnalysisStatus, Pass, SemanticAnalyser},
        types::Type,
    },
};

fn check(source: &str) -> AnalysisStatus {
    let tokens = tokenize(source.to_string(), Some("test.bt".to_string())).unwrap();
    let program = parse(tokens, Rc::new("test.bt".to_string())).unwrap();
    analyse(&program)
}

#[test]
fn test_check_syscall_latency_script() {
    let source = r#"
        // Histogram of read latency per process.
        kprobe:sys_read {
            @start[tid] = nsecs;
        }

        kretprobe:sys_read /@start[tid] != 0/ {
            @latency[pid] = quantize(nsecs - @start[tid]);
            @calls[pid] = count();
            @start[tid] = 0;
        }
    "#;

    assert_eq!(check(source), AnalysisStatus::Success);
}

#[test]
fn test_check_counts_only() {
    assert_eq!(
        check("tracepoint:sched_switch { @switches = count(); }"),
        AnalysisStatus::Success
    );
}

#[test]
fn test_check_empty_program() {
    assert_eq!(check(""), AnalysisStatus::Success);
}

#[test]
fn test_check_unknown_builtin_fails_first_pass() {
    assert_eq!(
        check("kprobe:f { @x = uid; }"),
        AnalysisStatus::FailedAtPass(Pass::First)
    );
}

#[test]
fn test_check_map_used_with_two_signatures() {
    let source = "
        kprobe:a { @bytes[pid] = count(); }
        kprobe:b { @bytes[pid, tid] = count(); }
    ";

    assert_eq!(check(source), AnalysisStatus::FailedAtPass(Pass::First));
}

#[test]
fn test_check_aggregation_compared_with_integer() {
    let source = "
        kprobe:a { @calls = count(); }
        kprobe:b /@calls > 10/ { @big = 1; }
    ";

    assert_eq!(check(source), AnalysisStatus::FailedAtPass(Pass::Second));
}

#[test]
fn test_check_use_before_assignment_in_later_probe() {
    let source = "
        kprobe:a { @total = @last + 1; }
        kprobe:b { @last = nsecs; }
    ";

    assert_eq!(check(source), AnalysisStatus::Success);
}

#[test]
fn test_tables_after_success() {
    let source = "kprobe:f { @a[pid, tid] = quantize(1); @b = 2; }";
    let tokens = tokenize(source.to_string(), None).unwrap();
    let program = parse(tokens, Rc::new("stdin".to_string())).unwrap();

    let mut analyser = SemanticAnalyser::new(&program);
    assert_eq!(analyser.analyse(), AnalysisStatus::Success);

    let signatures: Vec<(&str, Vec<Type>)> = analyser
        .map_signatures()
        .iter()
        .map(|(name, args)| (name, args.to_vec()))
        .collect();
    assert_eq!(
        signatures,
        vec![
            ("@a", vec![Type::Integer, Type::Integer]),
            ("@b", vec![]),
        ]
    );

    let values: Vec<(&str, Type)> = analyser.map_values().iter().collect();
    assert_eq!(values, vec![("@a", Type::Quantize), ("@b", Type::Integer)]);
}
