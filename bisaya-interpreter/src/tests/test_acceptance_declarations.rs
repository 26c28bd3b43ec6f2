//! Declarations, assignment and type coercion

use super::program;
use crate::{BisayaTestHarness, RuntimeError};
use bisaya_parser::DataType;

fn output(body: &str) -> String {
    BisayaTestHarness::new().output_of(&program(body)).unwrap()
}

fn runtime_error(body: &str) -> RuntimeError {
    BisayaTestHarness::new()
        .assert_runtime_error(&program(body))
        .unwrap()
}

#[test]
fn test_chained_assignment() {
    assert_eq!(output("MUGNA NUMERO x, y\nx=y=4\nIPAKITA: x & y"), "44\n");
}

#[test]
fn test_redeclaration_fails() {
    for body in [
        "MUGNA NUMERO x\nMUGNA NUMERO x",
        "MUGNA NUMERO x\nMUGNA TIPIK x",
        "MUGNA LETRA x, x",
    ] {
        assert!(
            matches!(runtime_error(body), RuntimeError::AlreadyDeclared { ref name, .. } if name == "x"),
            "{body}"
        );
    }
}

#[test]
fn test_redeclaration_reports_position() {
    let error = runtime_error("MUGNA NUMERO x\nMUGNA TIPIK x");
    assert_eq!(error.line(), 3);
    assert!(error.to_string().contains("line 3, column 13"));
}

#[test]
fn test_undeclared_read_fails() {
    assert!(matches!(
        runtime_error("IPAKITA: y"),
        RuntimeError::UndefinedVariable { ref name, line: 2, column: 10, .. } if name == "y"
    ));
}

#[test]
fn test_undeclared_assignment_fails() {
    assert!(matches!(
        runtime_error("y = 5"),
        RuntimeError::UndefinedVariable { .. }
    ));
}

#[test]
fn test_assignment_keeps_declared_type() {
    assert_eq!(output("MUGNA TIPIK f\nf = 3\nIPAKITA: f / 2"), "1.5\n");
    assert_eq!(output("MUGNA NUMERO n\nn = 6.0\nIPAKITA: n / 4"), "1.5\n");
    assert!(matches!(
        runtime_error("MUGNA NUMERO n\nn = 6.5"),
        RuntimeError::DecimalValue { .. }
    ));
}

#[test]
fn test_numero_from_text() {
    assert_eq!(output("MUGNA NUMERO n=\"12\"\nIPAKITA: n + 1"), "13\n");
}

#[test]
fn test_letra_needs_one_character() {
    assert_eq!(output("MUGNA LETRA c=\"z\"\nIPAKITA: c"), "z\n");
    assert!(matches!(
        runtime_error("MUGNA LETRA c='ab'"),
        RuntimeError::InvalidValue {
            data_type: DataType::Letra,
            ..
        }
    ));
    assert!(matches!(
        runtime_error("MUGNA LETRA c=\"\""),
        RuntimeError::InvalidValue { .. }
    ));
}

#[test]
fn test_tinuod_accepts_only_boolean_literals() {
    assert!(matches!(
        runtime_error("MUGNA TINUOD b=\"yes\""),
        RuntimeError::InvalidValue {
            data_type: DataType::Tinuod,
            ..
        }
    ));
    assert!(matches!(
        runtime_error("MUGNA TINUOD b=1"),
        RuntimeError::InvalidValue { .. }
    ));
}

#[test]
fn test_boolean_reads_back_as_literal() {
    assert_eq!(output("MUGNA TINUOD b=\"OO\"\nIPAKITA: b"), "OO\n");
    assert_eq!(output("MUGNA TINUOD b=\"DILI\"\nIPAKITA: b"), "DILI\n");
    assert_eq!(output("MUGNA TINUOD b = 1 < 2\nIPAKITA: b"), "OO\n");
    assert_eq!(
        output("MUGNA TINUOD a=\"OO\", b\nb = a\nIPAKITA: b"),
        "OO\n"
    );
}

#[test]
fn test_type_mismatch_on_declaration() {
    assert!(matches!(
        runtime_error("MUGNA NUMERO n='c'"),
        RuntimeError::InvalidValue {
            data_type: DataType::Numero,
            ..
        }
    ));
    assert!(matches!(
        runtime_error("MUGNA TIPIK f=\"abc\""),
        RuntimeError::InvalidValue {
            data_type: DataType::Tipik,
            ..
        }
    ));
}

#[test]
fn test_initializer_sees_earlier_declarators() {
    assert_eq!(output("MUGNA NUMERO a=2, b=a*3\nIPAKITA: b"), "6\n");
}
