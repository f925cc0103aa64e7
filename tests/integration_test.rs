// Integration tests for the relapse interpreter

use std::str::FromStr;

use num_bigint::BigUint;

use relapse::interpreter::{Interpreter, Outcome, RuntimeError, TraceLog};
use relapse::scan::ScanError;
use relapse::source::{MemorySource, SourceId};
use relapse::symtab::SymbolTable;

/// Build the table and run `main` over one or more source texts.
fn run(texts: &[&str], register: u32) -> Result<Outcome, RuntimeError> {
    run_from(texts, "main", register)
}

fn run_from(texts: &[&str], entry: &str, register: u32) -> Result<Outcome, RuntimeError> {
    let mut sources: Vec<MemorySource> = texts.iter().map(|t| MemorySource::from(*t)).collect();
    let symbols = SymbolTable::build(&mut sources).expect("scan failed");
    Interpreter::new(sources, symbols, entry, BigUint::from(register), false).run()
}

fn success(n: u32) -> Outcome {
    Outcome::Success(BigUint::from(n))
}

#[test]
fn test_empty_body_returns_initial_register() {
    assert_eq!(run(&["main { }"], 5).unwrap(), success(5));
}

#[test]
fn test_three_increments() {
    assert_eq!(run(&["main { + + + }"], 0).unwrap(), success(3));
}

#[test]
fn test_decrement_at_zero_yields_no_value() {
    assert_eq!(run(&["main { - }"], 0).unwrap(), Outcome::Failure);
    assert_eq!(run(&["main { - }"], 0).unwrap().value(), None);
}

#[test]
fn test_inner_failure_caught_by_outer_choice_point() {
    // The inner group fails on `-`, failure propagates to the inner `}`,
    // the outer `|` restores the register to 0, then `+` runs.
    assert_eq!(run(&["main { { - } | + }"], 0).unwrap(), success(1));
}

#[test]
fn test_cross_source_call_and_return() {
    // Control transfers to source B for `b`, then returns to the correct
    // offset in source A.
    assert_eq!(run(&["main { b }", "b { + }"], 0).unwrap(), success(1));

    // The return address matters: tokens after the call still run.
    assert_eq!(run(&["main { b + }", "b { + + }"], 0).unwrap(), success(3));
}

#[test]
fn test_call_chain_across_three_sources() {
    let outcome = run(&["main { a + }", "a { b + }", "b { + }"], 0).unwrap();
    assert_eq!(outcome, success(3));
}

#[test]
fn test_failure_propagates_through_calls() {
    // `f` fails with no choice point of its own; the caller's `|` catches
    // it after the return.
    assert_eq!(run(&["main { f | + + }", "f { - }"], 0).unwrap(), success(2));
}

#[test]
fn test_recursive_zeroing() {
    // z decrements and recurses until the register hits zero, then the
    // chain of `|`s unwinds every invocation in success mode.
    let program = &["main { z }", "z { - z | }"];
    assert_eq!(run(program, 0).unwrap(), success(0));
    assert_eq!(run(program, 1).unwrap(), success(0));
    assert_eq!(run(program, 7).unwrap(), success(0));
}

#[test]
fn test_saturating_subtraction_idiom() {
    // `- - - |` means: subtract three, or leave the register alone if it
    // is too small to bear it.
    let program = &["main { { - - - | } }"];
    assert_eq!(run(program, 10).unwrap(), success(7));
    assert_eq!(run(program, 2).unwrap(), success(2));
}

#[test]
fn test_alternatives_after_taken_branch_are_skipped() {
    assert_eq!(run(&["main { + + | - - - - }"], 0).unwrap(), success(2));
}

#[test]
fn test_register_is_arbitrary_precision() {
    let big = "340282366920938463463374607431768211456"; // 2^128
    let mut sources = vec![MemorySource::from("main { + }")];
    let symbols = SymbolTable::build(&mut sources).unwrap();
    let initial = BigUint::from_str(big).unwrap();
    let outcome = Interpreter::new(sources, symbols, "main", initial.clone(), false)
        .run()
        .unwrap();
    assert_eq!(outcome, Outcome::Success(initial + 1u32));
}

#[test]
fn test_custom_entry_point() {
    let program = &["main { + }\nalt { + + }"];
    assert_eq!(run_from(program, "alt", 0).unwrap(), success(2));
}

#[test]
fn test_single_character_function_names() {
    // An unreserved single byte is a valid identifier.
    assert_eq!(run(&["main { x x }", "x { + }"], 0).unwrap(), success(2));
}

#[test]
fn test_comments_everywhere() {
    let program = "\
# leading comment
main # name
{ # open
  + + # work
} # close
";
    assert_eq!(run(&[program], 0).unwrap(), success(2));
}

#[test]
fn test_duplicate_definition_across_sources_rejected() {
    let mut sources = vec![
        MemorySource::from("foo { }"),
        MemorySource::from("foo { }"),
    ];
    let err = SymbolTable::build(&mut sources).unwrap_err();
    assert!(matches!(err, ScanError::DuplicateFunctionName { name } if name == "foo"));
}

#[test]
fn test_unclosed_group_caught_before_execution() {
    let mut sources = vec![MemorySource::from("main { +")];
    let err = SymbolTable::build(&mut sources).unwrap_err();
    assert!(matches!(err, ScanError::UnclosedGroup { .. }));
}

#[test]
fn test_definitions_merge_in_input_order() {
    let mut sources = vec![
        MemorySource::from("main { helper }"),
        MemorySource::from("helper { + }"),
    ];
    let symbols = SymbolTable::build(&mut sources).unwrap();
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols.lookup("main").unwrap().source, SourceId(0));
    assert_eq!(symbols.lookup("helper").unwrap().source, SourceId(1));
}

#[test]
fn test_debug_trace_records_values_and_frames() {
    let mut sources = vec![
        MemorySource::from("main { + f ! }"),
        MemorySource::from("f { + ! @ }"),
    ];
    let symbols = SymbolTable::build(&mut sources).unwrap();
    let mut interp = Interpreter::with_trace(
        sources,
        symbols,
        "main",
        BigUint::from(0u32),
        true,
        TraceLog::new(),
    );
    let outcome = interp.run().unwrap();
    assert_eq!(outcome, success(2));
    assert_eq!(interp.trace().lines(), ["2", "f main", "2"]);
}

#[test]
fn test_trace_silent_without_debug_flag() {
    let mut sources = vec![MemorySource::from("main { ! @ + }")];
    let symbols = SymbolTable::build(&mut sources).unwrap();
    let mut interp = Interpreter::with_trace(
        sources,
        symbols,
        "main",
        BigUint::from(0u32),
        false,
        TraceLog::new(),
    );
    assert_eq!(interp.run().unwrap(), success(1));
    assert!(interp.trace().lines().is_empty());
}
