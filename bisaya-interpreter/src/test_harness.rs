//! Test harness for running whole Bisaya++ programs
//!
//! Runs a source string through the full pipeline with scripted console
//! input and captured output, and asserts on what came out:
//! - the exact output text
//! - which stage failed (lexing, parsing or execution)

use crate::io::{CapturedOutput, ScriptedInput};
use crate::{RunError, RuntimeError, run_source};
use bisaya_parser::{DiagnosticError, ParseError};
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during test harness operations
#[derive(Debug, Error, Diagnostic)]
pub enum TestHarnessError {
    #[error("Program failed: {source}")]
    Run {
        #[from]
        source: RunError,
    },

    #[error("Output mismatch: expected {expected:?}, but got {actual:?}")]
    OutputMismatch { expected: String, actual: String },

    #[error("Expected a {expected} failure, but the program {actual}")]
    WrongOutcome { expected: String, actual: String },
}

/// Outcome of one harness run
#[derive(Debug)]
pub struct HarnessRun {
    pub output: String,
    pub result: Result<(), RunError>,
}

/// Program runner with scripted console input
#[derive(Debug, Clone, Default)]
pub struct BisayaTestHarness {
    input: Vec<String>,
}

impl BisayaTestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines handed to DAWAT, one per statement executed
    pub fn with_input<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn run(&self, source: &str) -> HarnessRun {
        let mut output = CapturedOutput::new();
        let input = ScriptedInput::new(self.input.iter().cloned());
        let result = run_source(source, &mut output, input);
        HarnessRun {
            output: output.take(),
            result,
        }
    }

    /// Output of a program that must run to completion
    pub fn output_of(&self, source: &str) -> Result<String, TestHarnessError> {
        let run = self.run(source);
        run.result?;
        Ok(run.output)
    }

    pub fn assert_output(&self, source: &str, expected: &str) -> Result<(), TestHarnessError> {
        let actual = self.output_of(source)?;
        if actual != expected {
            return Err(TestHarnessError::OutputMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(())
    }

    /// The runtime error a program stops with, plus the output written before it
    pub fn runtime_failure(&self, source: &str) -> Result<(RuntimeError, String), TestHarnessError> {
        let run = self.run(source);
        match run.result {
            Err(RunError::Runtime(error)) => Ok((error, run.output)),
            other => Err(wrong_outcome("runtime", other)),
        }
    }

    pub fn assert_runtime_error(&self, source: &str) -> Result<RuntimeError, TestHarnessError> {
        self.runtime_failure(source).map(|(error, _)| error)
    }

    pub fn assert_parse_error(&self, source: &str) -> Result<ParseError, TestHarnessError> {
        match self.run(source).result {
            Err(RunError::Parse(error)) => Ok(error),
            other => Err(wrong_outcome("parse", other)),
        }
    }

    pub fn assert_lex_error(&self, source: &str) -> Result<Vec<DiagnosticError>, TestHarnessError> {
        match self.run(source).result {
            Err(RunError::Lexical { diagnostics, .. }) => Ok(diagnostics),
            other => Err(wrong_outcome("lexical", other)),
        }
    }
}

fn wrong_outcome(expected: &str, result: Result<(), RunError>) -> TestHarnessError {
    let actual = match result {
        Ok(()) => "ran to completion".to_string(),
        Err(error) => format!("failed with: {error}"),
    };
    TestHarnessError::WrongOutcome {
        expected: expected.to_string(),
        actual,
    }
}
