//! Arithmetic, unary operators and concatenation

use super::program;
use crate::{BisayaTestHarness, RuntimeError};

fn output(body: &str) -> String {
    BisayaTestHarness::new().output_of(&program(body)).unwrap()
}

#[test]
fn test_integer_division_truncates_toward_zero() {
    assert_eq!(output("MUGNA NUMERO p=7, q=2\nIPAKITA: p/q"), "3\n");
    assert_eq!(output("MUGNA NUMERO a=-7, b=2\nIPAKITA: a/b"), "-3\n");
    assert_eq!(output("MUGNA NUMERO a=7, b=-2\nIPAKITA: a/b"), "-3\n");
}

#[test]
fn test_integer_modulo_takes_sign_of_dividend() {
    assert_eq!(output("MUGNA NUMERO a=-7, b=2\nIPAKITA: a%b"), "-1\n");
    assert_eq!(output("MUGNA NUMERO a=7, b=-2\nIPAKITA: a%b"), "1\n");
    assert_eq!(output("MUGNA NUMERO a=7, b=3\nIPAKITA: a%b"), "1\n");
}

#[test]
fn test_number_literals_are_floats() {
    assert_eq!(output("IPAKITA: 7/2"), "3.5\n");
    assert_eq!(output("IPAKITA: 6/2"), "3\n");
}

#[test]
fn test_mixed_operands_give_float() {
    assert_eq!(output("MUGNA NUMERO p=7\nMUGNA TIPIK f=2.5\nIPAKITA: p*f"), "17.5\n");
    assert_eq!(output("MUGNA NUMERO p=7\nMUGNA TIPIK f=0.5\nIPAKITA: p+f"), "7.5\n");
}

#[test]
fn test_precedence_at_runtime() {
    assert_eq!(output("IPAKITA: 1 + 2 * 3"), "7\n");
    assert_eq!(output("IPAKITA: (1 + 2) * 3"), "9\n");
    assert_eq!(output("IPAKITA: 10 - 4 - 3"), "3\n");
}

#[test]
fn test_unary_operators() {
    assert_eq!(output("MUGNA NUMERO n=4\nIPAKITA: -n & \" \" & +n"), "-4 4\n");
    assert_eq!(output("MUGNA TIPIK f=1.5\nIPAKITA: -f"), "-1.5\n");
}

#[test]
fn test_increment_and_decrement_keep_type() {
    assert_eq!(output("MUGNA TIPIK f=1.5\nf++\nIPAKITA: f"), "2.5\n");
    assert_eq!(output("MUGNA NUMERO n=0\n--n\nn--\nIPAKITA: n"), "-2\n");
}

#[test]
fn test_concatenation_stringifies() {
    assert_eq!(output("IPAKITA: 1 & 2"), "12\n");
    assert_eq!(output("MUGNA TIPIK f=2.0\nIPAKITA: f & \"|\" & 2.5"), "2|2.5\n");
    assert_eq!(output("MUGNA LETRA c='x'\nIPAKITA: c & c"), "xx\n");
    assert_eq!(output("IPAKITA: (1 < 2) & (2 < 1)"), "OODILI\n");
}

#[test]
fn test_absent_renders_as_null() {
    assert_eq!(output("MUGNA NUMERO u\nIPAKITA: u"), "null\n");
}

#[test]
fn test_division_by_zero_for_every_type() {
    let harness = BisayaTestHarness::new();
    for body in [
        "MUGNA NUMERO p=1, q=0\nIPAKITA: p/q",
        "MUGNA NUMERO p=1, q=0\nIPAKITA: p%q",
        "IPAKITA: 1/0",
        "IPAKITA: 1%0",
        "MUGNA TIPIK f=1.5\nIPAKITA: f/0.0",
    ] {
        let error = harness.assert_runtime_error(&program(body)).unwrap();
        assert!(
            matches!(error, RuntimeError::DivisionByZero { .. }),
            "{body}: {error:?}"
        );
    }
}

#[test]
fn test_arithmetic_needs_numbers() {
    let harness = BisayaTestHarness::new();
    for body in [
        "MUGNA NUMERO u\nIPAKITA: u + 1",
        "IPAKITA: \"a\" + 1",
        "MUGNA LETRA c='c'\nIPAKITA: c * 2",
        "MUGNA TINUOD t=\"OO\"\nIPAKITA: t - 1",
        "IPAKITA: -\"a\"",
    ] {
        let error = harness.assert_runtime_error(&program(body)).unwrap();
        assert!(
            matches!(error, RuntimeError::TypeMismatch { .. }),
            "{body}: {error:?}"
        );
    }
}

#[test]
fn test_integer_overflow_wraps() {
    assert_eq!(
        output("MUGNA NUMERO big=\"9223372036854775807\"\nbig++\nIPAKITA: big"),
        "-9223372036854775808\n"
    );
}
