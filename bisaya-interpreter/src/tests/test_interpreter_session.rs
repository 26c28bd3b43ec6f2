//! Driving one interpreter across several statement batches

use crate::io::{CapturedOutput, ScriptedInput, WriterSink};
use crate::{Interpreter, RuntimeError, Value, run_source};
use bisaya_parser::{DataType, DiagnosticCollector, parse_statements, tokenize};

type Session = Interpreter<CapturedOutput, ScriptedInput>;

fn session(input: &[&str]) -> Session {
    Interpreter::new(CapturedOutput::new(), ScriptedInput::new(input.iter().copied()))
}

fn execute(interpreter: &mut Session, source: &str) -> Result<(), RuntimeError> {
    let mut diagnostics = DiagnosticCollector::new(source);
    let tokens = tokenize(source, &mut diagnostics);
    assert!(!diagnostics.has_errors(), "{source}");
    let statements = parse_statements(&tokens, interpreter.environment().names()).unwrap();
    interpreter.execute_statements(&statements)
}

#[test]
fn test_variables_persist_between_batches() {
    let mut interpreter = session(&[]);
    execute(&mut interpreter, "MUGNA NUMERO x = 2").unwrap();
    execute(&mut interpreter, "x = x * 21").unwrap();
    execute(&mut interpreter, "IPAKITA: x").unwrap();
    assert_eq!(interpreter.output().contents(), "42");

    interpreter.finish().unwrap();
    assert_eq!(interpreter.output_mut().take(), "42\n");

    // nothing open, nothing written
    interpreter.finish().unwrap();
    assert_eq!(interpreter.output().contents(), "");
}

#[test]
fn test_earlier_declarations_satisfy_dawat() {
    let mut interpreter = session(&["5"]);
    execute(&mut interpreter, "MUGNA NUMERO n").unwrap();
    execute(&mut interpreter, "DAWAT: n").unwrap();
    assert_eq!(interpreter.environment().get("n"), Ok(Value::Integer(5)));
}

#[test]
fn test_failed_batch_keeps_earlier_state() {
    let mut interpreter = session(&[]);
    execute(&mut interpreter, "MUGNA NUMERO a = 1").unwrap();
    let error = execute(&mut interpreter, "a = 2\nMUGNA NUMERO a").unwrap_err();
    assert!(matches!(error, RuntimeError::AlreadyDeclared { .. }));
    assert_eq!(interpreter.environment().get("a"), Ok(Value::Integer(2)));
}

#[test]
fn test_failed_counter_initializer_declares_nothing() {
    let mut interpreter = session(&[]);
    let error = execute(&mut interpreter, "ALANG SA (i = 1.5, i < 3, i++) PUNDOK {\n}").unwrap_err();
    assert!(matches!(error, RuntimeError::DecimalValue { .. }));
    assert!(!interpreter.environment().is_declared("i"));

    execute(&mut interpreter, "ALANG SA (i = 1, i < 3, i++) PUNDOK {\n}").unwrap();
    assert_eq!(interpreter.environment().data_type("i"), Some(DataType::Numero));
    assert_eq!(interpreter.environment().get("i"), Ok(Value::Integer(3)));
}

#[test]
fn test_environment_listing_in_declaration_order() {
    let mut interpreter = session(&[]);
    execute(
        &mut interpreter,
        "MUGNA TIPIK f = 1.5\nMUGNA TINUOD t = \"OO\"\nMUGNA LETRA c",
    )
    .unwrap();

    let listing: Vec<_> = interpreter
        .environment()
        .iter()
        .map(|(name, data_type, value)| (name.to_string(), data_type, value.clone()))
        .collect();
    assert_eq!(
        listing,
        vec![
            ("f".to_string(), DataType::Tipik, Value::Float(1.5)),
            ("t".to_string(), DataType::Tinuod, Value::Boolean(true)),
            ("c".to_string(), DataType::Letra, Value::Absent),
        ]
    );

    interpreter.environment_mut().clear();
    assert!(interpreter.environment().is_empty());
}

#[test]
fn test_into_parts_returns_unread_input() {
    let mut interpreter = session(&["1", "2"]);
    execute(&mut interpreter, "MUGNA NUMERO a\nDAWAT: a").unwrap();
    let (environment, _, input) = interpreter.into_parts();
    assert_eq!(environment.len(), 1);
    assert_eq!(input.remaining(), 1);
}

#[test]
fn test_run_source_through_a_writer() {
    let mut sink = WriterSink::new(Vec::new());
    let source = "SUGOD\nIPAKITA: \"kumusta\"\nKATAPUSAN";
    run_source(source, &mut sink, ScriptedInput::default()).unwrap();
    assert_eq!(sink.into_inner(), b"kumusta\n");
}
