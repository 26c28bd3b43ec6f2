// Bisaya++ Parser Error Handling
// Fail-fast parse errors with miette integration

use crate::ast::Span;
use crate::diagnostics::DiagnosticCollector;
use crate::token::Token;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Parse error type; parsing stops at the first one
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected {found} at line {line}, column {column}: expected {expected}")]
    #[diagnostic(
        code(bisaya::parse::unexpected_token),
        help("Expected {expected}")
    )]
    UnexpectedToken {
        found: String,
        expected: String,
        line: usize,
        column: usize,
        #[label("found this")]
        span: SourceSpan,
    },

    #[error("Invalid assignment target '{target}' at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::parse::invalid_assignment_target),
        help("Only a variable name can appear on the left of '='")
    )]
    InvalidAssignmentTarget {
        target: String,
        line: usize,
        column: usize,
        #[label("cannot assign to this")]
        span: SourceSpan,
    },

    #[error("Invalid operand for '{operator}' at line {line}, column {column}: '{target}' is not a variable")]
    #[diagnostic(
        code(bisaya::parse::invalid_increment_target),
        help("Postfix '++' and '--' can only follow a variable name")
    )]
    InvalidIncrementTarget {
        operator: String,
        target: String,
        line: usize,
        column: usize,
        #[label("not a variable")]
        span: SourceSpan,
    },

    #[error("DAWAT at line {line}, column {column} needs at least one variable")]
    #[diagnostic(
        code(bisaya::parse::empty_input_list),
        help("Write DAWAT: name1, name2, ...")
    )]
    EmptyInputList {
        line: usize,
        column: usize,
        #[label("no variables listed")]
        span: SourceSpan,
    },

    #[error("Variable '{name}' at line {line}, column {column} is read by DAWAT before it is declared")]
    #[diagnostic(
        code(bisaya::parse::undeclared_input_target),
        help("Declare '{name}' with MUGNA before this DAWAT statement")
    )]
    UndeclaredInputTarget {
        name: String,
        line: usize,
        column: usize,
        #[label("not declared yet")]
        span: SourceSpan,
    },

    #[error("Variable '{name}' appears more than once in DAWAT at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::parse::duplicate_input_target),
        help("List each variable only once")
    )]
    DuplicateInputTarget {
        name: String,
        line: usize,
        column: usize,
        #[label("repeated here")]
        span: SourceSpan,
    },

    #[error("Unexpected {found} after KATAPUSAN at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::parse::trailing_tokens),
        help("Nothing may follow the end of the program")
    )]
    TrailingTokens {
        found: String,
        line: usize,
        column: usize,
        #[label("after end of program")]
        span: SourceSpan,
    },

    #[error("Source has {count} lexical error(s); first at line {line}, column {column}: {message}")]
    #[diagnostic(code(bisaya::parse::lexical_errors))]
    LexicalErrors {
        count: usize,
        message: String,
        line: usize,
        column: usize,
        #[label("first lexical error")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub fn unexpected_token(found: &Token, expected: impl Into<String>) -> Self {
        ParseError::UnexpectedToken {
            found: found.to_string(),
            expected: expected.into(),
            line: found.line(),
            column: found.column(),
            span: found.span.into(),
        }
    }

    pub fn invalid_assignment_target(target: String, span: Span) -> Self {
        ParseError::InvalidAssignmentTarget {
            target,
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn invalid_increment_target(operator: &Token, target: String, span: Span) -> Self {
        ParseError::InvalidIncrementTarget {
            operator: operator.lexeme.clone(),
            target,
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn empty_input_list(keyword: &Token) -> Self {
        ParseError::EmptyInputList {
            line: keyword.line(),
            column: keyword.column(),
            span: keyword.span.into(),
        }
    }

    pub fn undeclared_input_target(name: &Token) -> Self {
        ParseError::UndeclaredInputTarget {
            name: name.lexeme.clone(),
            line: name.line(),
            column: name.column(),
            span: name.span.into(),
        }
    }

    pub fn duplicate_input_target(name: &Token) -> Self {
        ParseError::DuplicateInputTarget {
            name: name.lexeme.clone(),
            line: name.line(),
            column: name.column(),
            span: name.span.into(),
        }
    }

    pub fn trailing_tokens(found: &Token) -> Self {
        ParseError::TrailingTokens {
            found: found.to_string(),
            line: found.line(),
            column: found.column(),
            span: found.span.into(),
        }
    }

    /// Summarise a collector that reported lexical errors; `None` when it is clean
    pub fn from_diagnostics(diagnostics: &DiagnosticCollector) -> Option<Self> {
        if !diagnostics.has_errors() {
            return None;
        }
        let first = diagnostics.diagnostics().first()?;
        Some(ParseError::LexicalErrors {
            count: diagnostics.error_count(),
            message: first.to_string(),
            line: first.line(),
            column: first.column(),
            span: first.span(),
        })
    }

    /// 1-based line where the error was detected
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::InvalidAssignmentTarget { line, .. }
            | ParseError::InvalidIncrementTarget { line, .. }
            | ParseError::EmptyInputList { line, .. }
            | ParseError::UndeclaredInputTarget { line, .. }
            | ParseError::DuplicateInputTarget { line, .. }
            | ParseError::TrailingTokens { line, .. }
            | ParseError::LexicalErrors { line, .. } => *line,
        }
    }

    /// 1-based column where the error was detected
    pub fn column(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { column, .. }
            | ParseError::InvalidAssignmentTarget { column, .. }
            | ParseError::InvalidIncrementTarget { column, .. }
            | ParseError::EmptyInputList { column, .. }
            | ParseError::UndeclaredInputTarget { column, .. }
            | ParseError::DuplicateInputTarget { column, .. }
            | ParseError::TrailingTokens { column, .. }
            | ParseError::LexicalErrors { column, .. } => *column,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
