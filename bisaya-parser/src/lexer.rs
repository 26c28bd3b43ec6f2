// Bisaya++ Lexer
// Single-pass scanner; problems are reported to the collector and scanning continues

use crate::ast::Span;
use crate::diagnostics::{DiagnosticCollector, DiagnosticError};
use crate::token::{keyword, Token, TokenKind, TokenLiteral};

/// Scan `source` into tokens terminated by a single `Eof` token
pub fn tokenize(source: &str, diagnostics: &mut DiagnosticCollector) -> Vec<Token> {
    Lexer::new(source, diagnostics).scan_tokens()
}

pub struct Lexer<'src, 'diag> {
    source: &'src str,
    chars: Vec<(usize, char)>,
    tokens: Vec<Token>,
    diagnostics: &'diag mut DiagnosticCollector,

    /// Index into `chars` of the first character of the current token
    start: usize,
    /// Index into `chars` of the next unread character
    current: usize,

    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
}

impl<'src, 'diag> Lexer<'src, 'diag> {
    pub fn new(source: &'src str, diagnostics: &'diag mut DiagnosticCollector) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            tokens: Vec::new(),
            diagnostics,
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token();
        }

        let end = self.source.len();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            None,
            Span::new(end, end, self.line, self.column),
        ));

        tracing::debug!(
            tokens = self.tokens.len(),
            errors = self.diagnostics.error_count(),
            "scanned source"
        );
        self.tokens
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            ':' => self.add_token(TokenKind::Colon),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '/' => self.add_token(TokenKind::Slash),
            '%' => self.add_token(TokenKind::Percent),
            '&' => self.add_token(TokenKind::Ampersand),
            '$' => self.add_literal_token(
                TokenKind::NewlineLiteral,
                TokenLiteral::String("\n".to_string()),
            ),
            '+' => {
                let kind = if self.matches('+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                };
                self.add_token(kind);
            }
            '-' => self.minus(),
            '=' => {
                let kind = if self.matches('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.matches('=') {
                    TokenKind::LessEqual
                } else if self.matches('>') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.matches('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }
            '"' => self.string(),
            '\'' => self.character(),
            '[' => self.escape_code(),
            ' ' | '\r' | '\t' | '\n' => {}
            c if c.is_ascii_digit() => self.number(),
            c if is_identifier_start(c) => self.identifier(),
            other => {
                let span = self.current_span();
                self.diagnostics
                    .add_diagnostic(DiagnosticError::unexpected_character(other, span));
            }
        }
    }

    /// `-`, `--` (decrement) or a `--` line comment
    ///
    /// `--` is a decrement when the character just before it ends an operand
    /// (`x--`) or the character just after it starts an identifier (`--x`);
    /// otherwise it opens a comment running to the end of the line.
    fn minus(&mut self) {
        if self.peek() != Some('-') {
            self.add_token(TokenKind::Minus);
            return;
        }

        let before = self.start.checked_sub(1).map(|i| self.chars[i].1);
        let after = self.peek_next();

        let postfix = before.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ')');
        let prefix = after.is_some_and(is_identifier_start);

        if postfix || prefix {
            self.advance();
            self.add_token(TokenKind::MinusMinus);
        } else {
            while self.peek().is_some_and(|c| c != '\n') {
                self.advance();
            }
        }
    }

    fn string(&mut self) {
        while self.peek().is_some_and(|c| c != '"') {
            self.advance();
        }

        if self.is_at_end() {
            let span = self.current_span();
            self.diagnostics
                .add_diagnostic(DiagnosticError::unterminated_string(span));
            return;
        }

        // closing quote
        self.advance();
        let contents = self.slice(self.start + 1, self.current - 1).to_string();
        self.add_literal_token(TokenKind::String, TokenLiteral::String(contents));
    }

    fn character(&mut self) {
        while self.peek().is_some_and(|c| c != '\'' && c != '\n') {
            self.advance();
        }

        if self.peek() != Some('\'') {
            let span = self.current_span();
            self.diagnostics
                .add_diagnostic(DiagnosticError::unterminated_character(span));
            return;
        }

        self.advance();
        let contents = self.slice(self.start + 1, self.current - 1).to_string();
        self.add_literal_token(TokenKind::Character, TokenLiteral::Character(contents));
    }

    /// Bracketed escape code; the opening `[` is already consumed
    fn escape_code(&mut self) {
        // `[[]` and `[]]` escape the brackets themselves
        if matches!((self.peek(), self.peek_next()), (Some('['), Some(']')))
            || matches!((self.peek(), self.peek_next()), (Some(']'), Some(']')))
        {
            let bracket = self.advance();
            self.advance();
            self.add_literal_token(
                TokenKind::EscapedString,
                TokenLiteral::String(bracket.to_string()),
            );
            return;
        }

        while self.peek().is_some_and(|c| c != ']' && c != '\n') {
            self.advance();
        }

        if self.peek() != Some(']') {
            let span = self.current_span();
            self.diagnostics
                .add_diagnostic(DiagnosticError::unterminated_escape(span));
            return;
        }

        self.advance();
        let body = self.slice(self.start + 1, self.current - 1).to_string();
        let text = match body.as_str() {
            "" => "",
            "&" => "&",
            "n" => "\n",
            "t" => "\t",
            "\"" => "\"",
            "'" => "'",
            _ => {
                let span = self.current_span();
                self.diagnostics
                    .add_diagnostic(DiagnosticError::unknown_escape(body, span));
                ""
            }
        };
        self.add_literal_token(
            TokenKind::EscapedString,
            TokenLiteral::String(text.to_string()),
        );
    }

    fn number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // digits with at most one interior '.' always parse as f64
        let value = self.lexeme().parse::<f64>().unwrap_or_default();
        self.add_literal_token(TokenKind::Number, TokenLiteral::Number(value));
    }

    fn identifier(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let kind = keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    // Cursor helpers

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current].1;
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).map(|(_, c)| *c)
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.chars
            .get(index)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.source.len())
    }

    fn slice(&self, from: usize, to: usize) -> &'src str {
        &self.source[self.byte_offset(from)..self.byte_offset(to)]
    }

    fn lexeme(&self) -> &'src str {
        self.slice(self.start, self.current)
    }

    fn current_span(&self) -> Span {
        Span::new(
            self.byte_offset(self.start),
            self.byte_offset(self.current),
            self.start_line,
            self.start_column,
        )
    }

    fn add_token(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.lexeme().to_string(), None, self.current_span());
        self.tokens.push(token);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: TokenLiteral) {
        let token = Token::new(
            kind,
            self.lexeme().to_string(),
            Some(literal),
            self.current_span(),
        );
        self.tokens.push(token);
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
