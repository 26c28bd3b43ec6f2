// Bisaya++ Parser
// Recursive-descent parser over the token stream; stops at the first error

mod control_flow;
mod expressions;
mod statements;

use crate::ast::*;
use crate::error::*;
use crate::token::{Token, TokenKind};
use std::collections::HashSet;

pub struct BisayaParser {
    tokens: Vec<Token>,
    current: usize,
    /// Names declared so far in this single linear pass
    declared: HashSet<String>,
}

impl BisayaParser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| !t.is(TokenKind::Eof)) {
            let span = tokens
                .last()
                .map(|t| Span::new(t.span.end, t.span.end, t.span.line, t.span.column))
                .unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, String::new(), None, span));
        }

        Self {
            tokens,
            current: 0,
            declared: HashSet::new(),
        }
    }

    /// Seed the declaration record, e.g. with names already live in a REPL session
    pub fn with_declared<I, S>(tokens: Vec<Token>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parser = Self::new(tokens);
        parser.declared.extend(names.into_iter().map(Into::into));
        parser
    }

    /// `SUGOD statement* KATAPUSAN` followed only by end of input
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let begin = self.expect(TokenKind::Sugod, "SUGOD to start the program")?.clone();

        let mut statements = Vec::new();
        while !self.check(TokenKind::Katapusan) {
            if self.is_at_end() {
                return Err(ParseError::unexpected_token(
                    self.peek(),
                    "KATAPUSAN to end the program",
                ));
            }
            statements.push(self.statement()?);
        }

        let end = self.advance().clone();
        if !self.is_at_end() {
            return Err(ParseError::trailing_tokens(self.peek()));
        }

        let span = begin.span.merge(&end.span);
        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Program {
            body: Block { statements, span },
            span,
        })
    }

    /// Bare statements up to end of input, without the program markers
    pub fn parse_statements(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    /// A single expression that must consume the whole input
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        let expression = self.expression()?;
        if !self.is_at_end() {
            return Err(ParseError::unexpected_token(
                self.peek(),
                "end of expression",
            ));
        }
        Ok(expression)
    }

    // Token cursor helpers

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_next(&self) -> &Token {
        &self.tokens[(self.current + 1).min(self.tokens.len() - 1)]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Consume the next token if it is one of `kinds`
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.iter().any(|kind| self.check(*kind)) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected_token(self.peek(), expected))
        }
    }

    /// Statements may optionally end with ';'
    pub(crate) fn skip_semicolon(&mut self) {
        if self.check(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Span from `start` through the most recently consumed token
    pub(crate) fn span_from(&self, start: &Span) -> Span {
        start.merge(&self.previous().span)
    }
}
