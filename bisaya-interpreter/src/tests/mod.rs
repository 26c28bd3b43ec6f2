//! Acceptance tests for the Bisaya++ interpreter
//!
//! Whole programs go through the lexer → parser → interpreter pipeline with
//! scripted input and captured output.

pub mod test_acceptance_arithmetic;
pub mod test_acceptance_declarations;
pub mod test_acceptance_input;
pub mod test_interpreter_session;

/// Wrap statements in SUGOD / KATAPUSAN, one per line
pub fn program(body: &str) -> String {
    format!("SUGOD\n{body}\nKATAPUSAN")
}
