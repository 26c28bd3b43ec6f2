use crate::{DiagnosticCollector, DiagnosticError, ParseError, TokenKind, tokenize};
use pretty_assertions::assert_eq;

fn collect(source: &str) -> DiagnosticCollector {
    let mut diagnostics = DiagnosticCollector::new(source);
    tokenize(source, &mut diagnostics);
    diagnostics
}

#[test]
fn test_unexpected_character_triple() {
    let diagnostics = collect("@");
    assert_eq!(
        diagnostics.triples(),
        vec![(
            1,
            1,
            "Unexpected character '@' at line 1, column 1".to_string()
        )]
    );
}

#[test]
fn test_scanning_continues_after_errors() {
    let source = "@ # x";
    let mut diagnostics = DiagnosticCollector::new(source);
    let tokens = tokenize(source, &mut diagnostics);

    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Identifier, TokenKind::Eof]
    );
    assert_eq!(diagnostics.diagnostics()[1].column(), 3);
}

#[test]
fn test_unterminated_string() {
    let diagnostics = collect("x = \"abc");
    assert_eq!(diagnostics.error_count(), 1);
    assert!(matches!(
        diagnostics.diagnostics()[0],
        DiagnosticError::UnterminatedString { line: 1, column: 5, .. }
    ));
}

#[test]
fn test_unterminated_character_stops_at_newline() {
    let diagnostics = collect("'a\nKATAPUSAN");
    assert_eq!(diagnostics.error_count(), 1);
    assert!(matches!(
        diagnostics.diagnostics()[0],
        DiagnosticError::UnterminatedCharacter { line: 1, column: 1, .. }
    ));
}

#[test]
fn test_max_errors_caps_storage_not_count() {
    let mut diagnostics = DiagnosticCollector::with_max_errors("@@@", 1);
    tokenize("@@@", &mut diagnostics);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 3);
    assert_eq!(diagnostics.diagnostics().len(), 1);
}

#[test]
fn test_lexical_summary_counts_past_the_storage_cap() {
    let source = "@".repeat(150);
    let diagnostics = collect(&source);
    assert_eq!(diagnostics.diagnostics().len(), 100);
    assert_eq!(diagnostics.summary().errors, 150);

    match ParseError::from_diagnostics(&diagnostics) {
        Some(ParseError::LexicalErrors { count, column, .. }) => {
            assert_eq!(count, 150);
            assert_eq!(column, 1);
        }
        other => panic!("expected a lexical summary, got {other:?}"),
    }
}

#[test]
fn test_reset_starts_a_new_unit() {
    let mut diagnostics = collect("@");
    assert!(diagnostics.has_errors());

    diagnostics.reset("x");
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.source(), "x");
}

#[test]
fn test_sort_by_location() {
    let mut diagnostics = DiagnosticCollector::new("@ #");
    diagnostics.add_diagnostic(DiagnosticError::unexpected_character(
        '#',
        crate::Span::new(2, 3, 1, 3),
    ));
    diagnostics.add_diagnostic(DiagnosticError::unexpected_character(
        '@',
        crate::Span::new(0, 1, 1, 1),
    ));
    diagnostics.sort_by_location();
    assert_eq!(diagnostics.diagnostics()[0].column(), 1);
}

#[test]
fn test_summary() {
    assert_eq!(collect("x").summary().to_string(), "No diagnostics");
    assert_eq!(collect("@").summary().to_string(), "1 lexical error");
    assert_eq!(collect("@ @").summary().to_string(), "2 lexical errors");
}

#[test]
fn test_reports_carry_source() {
    let diagnostics = collect("@ @");
    assert_eq!(diagnostics.create_reports_with_filename("test.bpp").len(), 2);
}

#[test]
fn test_parse_error_from_clean_collector() {
    assert_eq!(ParseError::from_diagnostics(&collect("SUGOD")), None);
}

#[test]
fn test_parse_error_summarises_first_diagnostic() {
    let error = ParseError::from_diagnostics(&collect("x\n  @ @")).expect("lexical errors");
    assert_eq!(error.line(), 2);
    assert_eq!(error.column(), 3);
    assert!(matches!(error, ParseError::LexicalErrors { count: 2, .. }));
}
