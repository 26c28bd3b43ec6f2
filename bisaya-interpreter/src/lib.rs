//! Bisaya++ Interpreter
//!
//! Tree-walking execution of parsed Bisaya++ programs: runtime values and
//! type coercion, the flat environment, expression evaluation, statement
//! execution and the console I/O boundary.

pub mod coercion;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod io;
pub mod test_harness;
pub mod value;

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

pub use coercion::{CoercionError, coerce};
pub use environment::{Binding, Environment, EnvironmentError};
pub use error::RuntimeError;
pub use evaluator::ExpressionEvaluator;
pub use interpreter::Interpreter;
pub use io::{
    CapturedOutput, InputError, InputSource, LineSource, OutputSink, ScriptedInput, WriterSink,
};
pub use test_harness::{BisayaTestHarness, TestHarnessError};
pub use value::Value;

use bisaya_parser::{DiagnosticCollector, DiagnosticError, ParseError, parse_tokens, tokenize};
use miette::Diagnostic;
use thiserror::Error;

/// Failure of the whole lex → parse → run pipeline
#[derive(Error, Diagnostic, Debug)]
pub enum RunError {
    #[error("{count} lexical error(s)")]
    #[diagnostic(code(bisaya::lex::failed))]
    Lexical {
        count: usize,
        #[related]
        diagnostics: Vec<DiagnosticError>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),
}

impl RunError {
    /// Process exit code: 1 when nothing ran, 2 when execution failed part way
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Lexical { .. } | RunError::Parse(_) => 1,
            RunError::Runtime(_) => 2,
        }
    }
}

impl From<&DiagnosticCollector> for RunError {
    fn from(diagnostics: &DiagnosticCollector) -> Self {
        RunError::Lexical {
            count: diagnostics.error_count(),
            diagnostics: diagnostics.diagnostics().to_vec(),
        }
    }
}

/// Scan, parse and execute `source`
///
/// Lexical and parse failures stop before anything runs. Pass `&mut` sinks
/// to inspect them afterwards.
pub fn run_source<O: OutputSink, I: InputSource>(
    source: &str,
    output: O,
    input: I,
) -> Result<(), RunError> {
    let mut diagnostics = DiagnosticCollector::new(source);
    let tokens = tokenize(source, &mut diagnostics);
    if diagnostics.has_errors() {
        return Err(RunError::from(&diagnostics));
    }

    let program = parse_tokens(&tokens)?;
    let mut interpreter = Interpreter::new(output, input);
    interpreter.interpret(&program)?;
    Ok(())
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
