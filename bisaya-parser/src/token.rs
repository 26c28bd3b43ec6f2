// Bisaya++ Tokens
// Closed token-kind enumeration, literal payloads and the keyword table

use crate::ast::Span;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Semicolon,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Ampersand,
    Equal,
    EqualEqual,
    NotEqual, // <>
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    PlusPlus,
    MinusMinus,

    // Literals
    Identifier,
    Number,
    String,
    EscapedString,
    Character,
    NewlineLiteral, // $

    // Keywords
    Sugod,
    Katapusan,
    Mugna,
    Numero,
    Tipik,
    Letra,
    Tinuod,
    Ipakita,
    Dawat,
    Kung,
    Wala,
    Pundok,
    Alang,
    Sa,
    Samtang,
    Ug,
    O,
    Dili,

    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Sugod
                | TokenKind::Katapusan
                | TokenKind::Mugna
                | TokenKind::Numero
                | TokenKind::Tipik
                | TokenKind::Letra
                | TokenKind::Tinuod
                | TokenKind::Ipakita
                | TokenKind::Dawat
                | TokenKind::Kung
                | TokenKind::Wala
                | TokenKind::Pundok
                | TokenKind::Alang
                | TokenKind::Sa
                | TokenKind::Samtang
                | TokenKind::Ug
                | TokenKind::O
                | TokenKind::Dili
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Ampersand => "'&'",
            TokenKind::Equal => "'='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::NotEqual => "'<>'",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::EscapedString => "escape code",
            TokenKind::Character => "character",
            TokenKind::NewlineLiteral => "'$'",
            TokenKind::Sugod => "SUGOD",
            TokenKind::Katapusan => "KATAPUSAN",
            TokenKind::Mugna => "MUGNA",
            TokenKind::Numero => "NUMERO",
            TokenKind::Tipik => "TIPIK",
            TokenKind::Letra => "LETRA",
            TokenKind::Tinuod => "TINUOD",
            TokenKind::Ipakita => "IPAKITA",
            TokenKind::Dawat => "DAWAT",
            TokenKind::Kung => "KUNG",
            TokenKind::Wala => "WALA",
            TokenKind::Pundok => "PUNDOK",
            TokenKind::Alang => "ALANG",
            TokenKind::Sa => "SA",
            TokenKind::Samtang => "SAMTANG",
            TokenKind::Ug => "UG",
            TokenKind::O => "O",
            TokenKind::Dili => "DILI",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

lazy_static! {
    /// Exact-match keyword table consulted after an identifier is scanned
    pub static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut keywords = HashMap::new();
        keywords.insert("SUGOD", TokenKind::Sugod);
        keywords.insert("KATAPUSAN", TokenKind::Katapusan);
        keywords.insert("MUGNA", TokenKind::Mugna);
        keywords.insert("NUMERO", TokenKind::Numero);
        keywords.insert("TIPIK", TokenKind::Tipik);
        keywords.insert("LETRA", TokenKind::Letra);
        keywords.insert("TINUOD", TokenKind::Tinuod);
        keywords.insert("IPAKITA", TokenKind::Ipakita);
        keywords.insert("DAWAT", TokenKind::Dawat);
        keywords.insert("KUNG", TokenKind::Kung);
        keywords.insert("WALA", TokenKind::Wala);
        keywords.insert("PUNDOK", TokenKind::Pundok);
        keywords.insert("ALANG", TokenKind::Alang);
        keywords.insert("SA", TokenKind::Sa);
        keywords.insert("SAMTANG", TokenKind::Samtang);
        keywords.insert("UG", TokenKind::Ug);
        keywords.insert("O", TokenKind::O);
        keywords.insert("DILI", TokenKind::Dili);
        keywords
    };
}

/// Look up an identifier in the keyword table
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

/// Literal payload carried by literal tokens
#[derive(Debug, Clone, PartialEq)]
pub enum TokenLiteral {
    /// Every numeric literal is scanned as a float; integer-ness is decided by coercion
    Number(f64),
    /// Raw contents between single quotes, length unchecked
    Character(String),
    String(String),
}

/// A scanned token with its position in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<TokenLiteral>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, literal: Option<TokenLiteral>, span: Span) -> Self {
        Self {
            kind,
            lexeme,
            literal,
            span,
        }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::String | TokenKind::EscapedString => write!(f, "{:?}", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
