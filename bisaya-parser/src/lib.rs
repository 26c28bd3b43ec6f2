// Bisaya++ Parser Library
// Hand-written lexer and recursive-descent parser for the Bisaya++ teaching language

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use diagnostics::*;
pub use error::*;
pub use lexer::{tokenize, Lexer};
pub use parser::BisayaParser;
pub use token::*;

#[cfg(test)]
mod tests;

/// Parse an already scanned token stream as a whole program
pub fn parse_tokens(tokens: &[Token]) -> ParseResult<Program> {
    BisayaParser::new(tokens.to_vec()).parse_program()
}

/// Scan and parse a whole program, failing on the first lexical or syntax problem
pub fn parse_program(input: &str) -> ParseResult<Program> {
    parse_program_with_diagnostics(input).0
}

/// Scan and parse a whole program, handing back the lexical diagnostics as well
///
/// When the lexer reported anything the parser is not run and the result is
/// `ParseError::LexicalErrors` summarising the collector.
pub fn parse_program_with_diagnostics(input: &str) -> (ParseResult<Program>, DiagnosticCollector) {
    let mut diagnostics = DiagnosticCollector::new(input);
    let tokens = tokenize(input, &mut diagnostics);

    let result = match ParseError::from_diagnostics(&diagnostics) {
        Some(error) => Err(error),
        None => parse_tokens(&tokens),
    };
    (result, diagnostics)
}

/// Parse bare statements, treating `known_names` as already declared
pub fn parse_statements<I, S>(tokens: &[Token], known_names: I) -> ParseResult<Vec<Statement>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    BisayaParser::with_declared(tokens.to_vec(), known_names).parse_statements()
}

pub fn parse_expression(input: &str) -> ParseResult<Expression> {
    let mut diagnostics = DiagnosticCollector::new(input);
    let tokens = tokenize(input, &mut diagnostics);
    if let Some(error) = ParseError::from_diagnostics(&diagnostics) {
        return Err(error);
    }
    BisayaParser::new(tokens).parse_expression()
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
