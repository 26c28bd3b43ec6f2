// Bisaya++ Parser Diagnostics
// Lexical diagnostic types and the per-unit collector consulted between stages

use crate::ast::Span;
use miette::{Diagnostic, SourceSpan};
use std::fmt;
use thiserror::Error;

/// Lexical diagnostic with source location
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DiagnosticError {
    #[error("Unexpected character '{found}' at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::lex::unexpected_character),
        help("This character is not part of the Bisaya++ language")
    )]
    UnexpectedCharacter {
        found: char,
        line: usize,
        column: usize,
        #[label("unexpected character")]
        span: SourceSpan,
    },

    #[error("Unterminated string at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::lex::unterminated_string),
        help("Close the string with a matching '\"'")
    )]
    UnterminatedString {
        line: usize,
        column: usize,
        #[label("string starts here")]
        span: SourceSpan,
    },

    #[error("Unterminated character literal at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::lex::unterminated_character),
        help("Close the character literal with a matching \"'\"")
    )]
    UnterminatedCharacter {
        line: usize,
        column: usize,
        #[label("character literal starts here")]
        span: SourceSpan,
    },

    #[error("Unterminated escape code at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::lex::unterminated_escape),
        help("Escape codes are written [&], [n], [t], [\"], ['], [[], []] or []")
    )]
    UnterminatedEscape {
        line: usize,
        column: usize,
        #[label("escape code starts here")]
        span: SourceSpan,
    },

    #[error("Unknown escape code '[{body}]' at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::lex::unknown_escape),
        help("Escape codes are written [&], [n], [t], [\"], ['], [[], []] or []")
    )]
    UnknownEscape {
        body: String,
        line: usize,
        column: usize,
        #[label("unknown escape code")]
        span: SourceSpan,
    },
}

impl DiagnosticError {
    pub fn unexpected_character(found: char, span: Span) -> Self {
        DiagnosticError::UnexpectedCharacter {
            found,
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn unterminated_string(span: Span) -> Self {
        DiagnosticError::UnterminatedString {
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn unterminated_character(span: Span) -> Self {
        DiagnosticError::UnterminatedCharacter {
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn unterminated_escape(span: Span) -> Self {
        DiagnosticError::UnterminatedEscape {
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn unknown_escape(body: String, span: Span) -> Self {
        DiagnosticError::UnknownEscape {
            body,
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    /// 1-based line of the diagnostic
    pub fn line(&self) -> usize {
        match self {
            DiagnosticError::UnexpectedCharacter { line, .. }
            | DiagnosticError::UnterminatedString { line, .. }
            | DiagnosticError::UnterminatedCharacter { line, .. }
            | DiagnosticError::UnterminatedEscape { line, .. }
            | DiagnosticError::UnknownEscape { line, .. } => *line,
        }
    }

    /// 1-based column of the diagnostic
    pub fn column(&self) -> usize {
        match self {
            DiagnosticError::UnexpectedCharacter { column, .. }
            | DiagnosticError::UnterminatedString { column, .. }
            | DiagnosticError::UnterminatedCharacter { column, .. }
            | DiagnosticError::UnterminatedEscape { column, .. }
            | DiagnosticError::UnknownEscape { column, .. } => *column,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            DiagnosticError::UnexpectedCharacter { span, .. }
            | DiagnosticError::UnterminatedString { span, .. }
            | DiagnosticError::UnterminatedCharacter { span, .. }
            | DiagnosticError::UnterminatedEscape { span, .. }
            | DiagnosticError::UnknownEscape { span, .. } => *span,
        }
    }

    /// The `(line, column, message)` triple
    pub fn as_triple(&self) -> (usize, usize, String) {
        (self.line(), self.column(), self.to_string())
    }
}

/// Diagnostic collector for one compilation unit
///
/// Replaces a process-wide "had error" flag: the lexer and driver share one
/// collector by reference, and `reset` starts a new unit.
#[derive(Debug, Clone)]
pub struct DiagnosticCollector {
    /// Source code being scanned
    source: String,
    /// Collected diagnostics in the order they were reported
    diagnostics: Vec<DiagnosticError>,
    /// Maximum number of diagnostics to keep
    max_errors: usize,
    /// Every diagnostic reported, including those past `max_errors`
    reported: usize,
}

impl DiagnosticCollector {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            diagnostics: Vec::new(),
            max_errors: 100,
            reported: 0,
        }
    }

    pub fn with_max_errors(source: impl Into<String>, max_errors: usize) -> Self {
        Self {
            max_errors,
            ..Self::new(source)
        }
    }

    /// Record a diagnostic; it is counted even past `max_errors`
    pub fn add_diagnostic(&mut self, diagnostic: DiagnosticError) {
        tracing::debug!(
            line = diagnostic.line(),
            column = diagnostic.column(),
            "{}",
            diagnostic
        );
        self.reported += 1;
        if self.diagnostics.len() < self.max_errors {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.reported > 0
    }

    /// Total reported, which may exceed the number kept
    pub fn error_count(&self) -> usize {
        self.reported
    }

    pub fn diagnostics(&self) -> &[DiagnosticError] {
        &self.diagnostics
    }

    /// All diagnostics as `(line, column, message)` triples
    pub fn triples(&self) -> Vec<(usize, usize, String)> {
        self.diagnostics.iter().map(|d| d.as_triple()).collect()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Start a new compilation unit with fresh source
    pub fn reset(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.diagnostics.clear();
        self.reported = 0;
    }

    pub fn sort_by_location(&mut self) {
        self.diagnostics.sort_by_key(|d| d.span().offset());
    }

    /// Create miette reports carrying the source for highlighting
    pub fn create_reports_with_filename(&self, filename: &str) -> Vec<miette::Report> {
        use miette::NamedSource;

        let named_source = NamedSource::new(filename, self.source.clone());

        self.diagnostics
            .iter()
            .map(|diagnostic| {
                miette::Report::new(diagnostic.clone()).with_source_code(named_source.clone())
            })
            .collect()
    }

    pub fn print_diagnostics(&self, filename: &str) {
        for report in self.create_reports_with_filename(filename) {
            eprintln!("{report:?}");
        }
    }

    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary {
            errors: self.error_count(),
        }
    }
}

/// Summary of diagnostic counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub errors: usize,
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors {
            0 => write!(f, "No diagnostics"),
            1 => write!(f, "1 lexical error"),
            n => write!(f, "{n} lexical errors"),
        }
    }
}
