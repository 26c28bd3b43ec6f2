//! DAWAT with scripted console input

use super::program;
use crate::{BisayaTestHarness, RuntimeError};
use bisaya_parser::DataType;

fn with_input(lines: &[&str]) -> BisayaTestHarness {
    BisayaTestHarness::new().with_input(lines.iter().copied())
}

#[test]
fn test_read_two_numbers() {
    let source = program("MUGNA NUMERO a, b\nDAWAT: a, b\nIPAKITA: a + b");
    with_input(&["3, 4"]).assert_output(&source, "7\n").unwrap();
}

#[test]
fn test_fields_are_trimmed() {
    let source = program("MUGNA NUMERO a, b\nDAWAT: a, b\nIPAKITA: a & \"|\" & b");
    with_input(&["  10 ,20  "])
        .assert_output(&source, "10|20\n")
        .unwrap();
}

#[test]
fn test_negative_numbers() {
    let source = program("MUGNA NUMERO a\nMUGNA TIPIK f\nDAWAT: a, f\nIPAKITA: a & \" \" & f");
    with_input(&["-5, -0.25"])
        .assert_output(&source, "-5 -0.25\n")
        .unwrap();
}

#[test]
fn test_every_declared_type() {
    let source = program(
        "MUGNA LETRA c\nMUGNA TINUOD t\nMUGNA TIPIK f\nDAWAT: c, t, f\nIPAKITA: c & t & f",
    );
    with_input(&["z, DILI, 2.5"])
        .assert_output(&source, "zDILI2.5\n")
        .unwrap();
}

#[test]
fn test_each_dawat_reads_one_line() {
    let source = program("MUGNA NUMERO a, b\nDAWAT: a\nDAWAT: b\nIPAKITA: a * b");
    with_input(&["6", "7"]).assert_output(&source, "42\n").unwrap();
}

#[test]
fn test_prompt_is_printed_before_reading() {
    let source = program("MUGNA NUMERO a\nIPAKITA: \"a? \"\nDAWAT: a\nIPAKITA: $ & a");
    with_input(&["9"])
        .assert_output(&source, "a? \n9\n")
        .unwrap();
}

#[test]
fn test_wrong_field_count() {
    let source = program("MUGNA NUMERO a, b\nDAWAT: a, b");
    for line in ["1", "1, 2, 3", ""] {
        let error = with_input(&[line]).assert_runtime_error(&source).unwrap();
        assert!(
            matches!(error, RuntimeError::InputArity { expected: 2, .. }),
            "{line:?}: {error:?}"
        );
    }
}

#[test]
fn test_input_exhausted() {
    let source = program("MUGNA NUMERO a\nDAWAT: a");
    let error = BisayaTestHarness::new()
        .assert_runtime_error(&source)
        .unwrap();
    assert!(matches!(
        error,
        RuntimeError::InputExhausted { line: 3, column: 1, .. }
    ));
}

#[test]
fn test_field_coercion_failures() {
    let source = program("MUGNA NUMERO a\nDAWAT: a");

    let error = with_input(&["x"]).assert_runtime_error(&source).unwrap();
    assert!(matches!(
        error,
        RuntimeError::InvalidValue { ref name, data_type: DataType::Numero, .. } if name == "a"
    ));

    let error = with_input(&["1.5"]).assert_runtime_error(&source).unwrap();
    assert!(matches!(error, RuntimeError::DecimalValue { .. }));
}

#[test]
fn test_boolean_input_must_be_literal() {
    let source = program("MUGNA TINUOD t\nDAWAT: t");
    let error = with_input(&["true"]).assert_runtime_error(&source).unwrap();
    assert!(matches!(
        error,
        RuntimeError::InvalidValue {
            data_type: DataType::Tinuod,
            ..
        }
    ));
}

#[test]
fn test_input_into_loop_counter() {
    let source = program(
        "ALANG SA (i=1, i<=1, i++) PUNDOK {\n}\nDAWAT: i\nIPAKITA: i",
    );
    with_input(&["8"]).assert_output(&source, "8\n").unwrap();
}
