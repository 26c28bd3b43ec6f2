// `--` is either a decrement or a comment depending on its neighbours

use crate::{DiagnosticCollector, TokenKind, tokenize};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut diagnostics = DiagnosticCollector::new(source);
    let tokens = tokenize(source, &mut diagnostics);
    assert!(!diagnostics.has_errors());
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_comment_on_its_own_line() {
    assert_eq!(
        kinds("-- this is a comment\nx"),
        vec![TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn test_comment_after_statement() {
    assert_eq!(
        kinds("SUGOD -- start here\nKATAPUSAN"),
        vec![TokenKind::Sugod, TokenKind::Katapusan, TokenKind::Eof]
    );
}

#[test]
fn test_comment_after_spaced_operand() {
    assert_eq!(
        kinds("x -- not a decrement"),
        vec![TokenKind::Identifier, TokenKind::Eof]
    );
}

#[test]
fn test_postfix_decrement_after_identifier() {
    assert_eq!(
        kinds("x--"),
        vec![TokenKind::Identifier, TokenKind::MinusMinus, TokenKind::Eof]
    );
}

#[test]
fn test_postfix_decrement_after_closing_paren() {
    assert_eq!(
        kinds("(x)--"),
        vec![
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::MinusMinus,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_prefix_decrement_before_identifier() {
    assert_eq!(
        kinds("--x"),
        vec![TokenKind::MinusMinus, TokenKind::Identifier, TokenKind::Eof]
    );
    assert_eq!(
        kinds("y = --x"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::MinusMinus,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_dashes_before_a_digit_open_a_comment() {
    assert_eq!(kinds("--5"), vec![TokenKind::Eof]);
}

#[test]
fn test_single_minus_is_subtraction() {
    assert_eq!(
        kinds("5 - 3"),
        vec![
            TokenKind::Number,
            TokenKind::Minus,
            TokenKind::Number,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_comment_ends_at_newline() {
    assert_eq!(
        kinds("-- one\n-- two\nKATAPUSAN"),
        vec![TokenKind::Katapusan, TokenKind::Eof]
    );
}
