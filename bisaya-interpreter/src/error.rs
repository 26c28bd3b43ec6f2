//! Runtime error types for the Bisaya++ interpreter.
//!
//! Every variant carries the source position of the construct that failed,
//! so reports can point at it through miette.

use crate::coercion::CoercionError;
use crate::environment::EnvironmentError;
use bisaya_parser::{DataType, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Runtime errors; the first one stops execution
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Type mismatch at line {line}, column {column}: {message}")]
    #[diagnostic(
        code(bisaya::runtime::type_mismatch),
        help("Check the types of the values this operator is applied to")
    )]
    TypeMismatch {
        message: String,
        line: usize,
        column: usize,
        #[label("type mismatch here")]
        span: SourceSpan,
    },

    #[error("Division by zero at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::runtime::division_by_zero),
        help("Ensure the right operand of '{operator}' is not zero")
    )]
    DivisionByZero {
        operator: String,
        line: usize,
        column: usize,
        #[label("division by zero here")]
        span: SourceSpan,
    },

    #[error("Undefined variable '{name}' at line {line}, column {column}")]
    #[diagnostic(
        code(bisaya::runtime::undefined_variable),
        help("Declare '{name}' with MUGNA before using it")
    )]
    UndefinedVariable {
        name: String,
        line: usize,
        column: usize,
        #[label("undefined variable")]
        span: SourceSpan,
    },

    #[error("Variable '{name}' is already declared (line {line}, column {column})")]
    #[diagnostic(
        code(bisaya::runtime::already_declared),
        help("A name can only be declared once per program")
    )]
    AlreadyDeclared {
        name: String,
        line: usize,
        column: usize,
        #[label("declared again here")]
        span: SourceSpan,
    },

    #[error(
        "Cannot store decimal value {value} in {data_type} variable '{name}' at line {line}, column {column}"
    )]
    #[diagnostic(
        code(bisaya::runtime::decimal_value),
        help("NUMERO holds whole numbers only; declare the variable as TIPIK instead")
    )]
    DecimalValue {
        value: String,
        data_type: DataType,
        name: String,
        line: usize,
        column: usize,
        #[label("decimal value here")]
        span: SourceSpan,
    },

    #[error("Cannot store {found} in {data_type} variable '{name}' at line {line}, column {column}")]
    #[diagnostic(code(bisaya::runtime::invalid_value))]
    InvalidValue {
        found: String,
        data_type: DataType,
        name: String,
        line: usize,
        column: usize,
        #[label("wrong kind of value")]
        span: SourceSpan,
    },

    #[error("DAWAT at line {line}, column {column} expected {expected} value(s) but got {found}")]
    #[diagnostic(
        code(bisaya::runtime::input_arity),
        help("Separate the values with commas")
    )]
    InputArity {
        expected: usize,
        found: usize,
        line: usize,
        column: usize,
        #[label("reads {expected} value(s)")]
        span: SourceSpan,
    },

    #[error("No more input for DAWAT at line {line}, column {column}")]
    #[diagnostic(code(bisaya::runtime::input_exhausted))]
    InputExhausted {
        line: usize,
        column: usize,
        #[label("waiting for input here")]
        span: SourceSpan,
    },

    #[error("Condition at line {line}, column {column} must be OO or DILI, found {found}")]
    #[diagnostic(code(bisaya::runtime::non_boolean_condition))]
    NonBooleanCondition {
        found: String,
        line: usize,
        column: usize,
        #[label("not a boolean")]
        span: SourceSpan,
    },

    #[error("'{operator}' needs a variable operand at line {line}, column {column}, found '{target}'")]
    #[diagnostic(
        code(bisaya::runtime::invalid_increment_target),
        help("Only a variable name can be incremented or decremented")
    )]
    InvalidIncrementTarget {
        operator: String,
        target: String,
        line: usize,
        column: usize,
        #[label("not a variable")]
        span: SourceSpan,
    },

    #[error("I/O failure at line {line}, column {column}: {message}")]
    #[diagnostic(code(bisaya::runtime::io))]
    Io {
        message: String,
        line: usize,
        column: usize,
        #[label("while running this")]
        span: SourceSpan,
    },
}

impl RuntimeError {
    pub fn type_mismatch(message: impl Into<String>, span: Span) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn division_by_zero(operator: impl ToString, span: Span) -> Self {
        Self::DivisionByZero {
            operator: operator.to_string(),
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn input_arity(expected: usize, found: usize, span: Span) -> Self {
        Self::InputArity {
            expected,
            found,
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn input_exhausted(span: Span) -> Self {
        Self::InputExhausted {
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn non_boolean_condition(found: impl Into<String>, span: Span) -> Self {
        Self::NonBooleanCondition {
            found: found.into(),
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn invalid_increment_target(
        operator: impl ToString,
        target: impl ToString,
        span: Span,
    ) -> Self {
        Self::InvalidIncrementTarget {
            operator: operator.to_string(),
            target: target.to_string(),
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    pub fn io(message: impl ToString, span: Span) -> Self {
        Self::Io {
            message: message.to_string(),
            line: span.line,
            column: span.column,
            span: span.into(),
        }
    }

    /// Place an environment failure at `span`
    pub fn from_environment(error: EnvironmentError, span: Span) -> Self {
        let (line, column) = (span.line, span.column);
        match error {
            EnvironmentError::AlreadyDeclared { name } => Self::AlreadyDeclared {
                name,
                line,
                column,
                span: span.into(),
            },
            EnvironmentError::UndefinedVariable { name } => Self::UndefinedVariable {
                name,
                line,
                column,
                span: span.into(),
            },
            EnvironmentError::Coercion {
                name,
                source: CoercionError::DecimalValue { value, data_type },
            } => Self::DecimalValue {
                value,
                data_type,
                name,
                line,
                column,
                span: span.into(),
            },
            EnvironmentError::Coercion {
                name,
                source: CoercionError::InvalidValue { found, data_type },
            } => Self::InvalidValue {
                found,
                data_type,
                name,
                line,
                column,
                span: span.into(),
            },
        }
    }

    /// 1-based line of the failing construct
    pub fn line(&self) -> usize {
        match self {
            Self::TypeMismatch { line, .. }
            | Self::DivisionByZero { line, .. }
            | Self::UndefinedVariable { line, .. }
            | Self::AlreadyDeclared { line, .. }
            | Self::DecimalValue { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::InputArity { line, .. }
            | Self::InputExhausted { line, .. }
            | Self::NonBooleanCondition { line, .. }
            | Self::InvalidIncrementTarget { line, .. }
            | Self::Io { line, .. } => *line,
        }
    }
}

/// Result type for interpreter operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
