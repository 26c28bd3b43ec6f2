// Statement parsing module
// Declarations, IPAKITA, DAWAT and expression statements

use std::collections::HashSet;

use crate::ast::*;
use crate::error::*;
use crate::parser::BisayaParser;
use crate::token::TokenKind;

impl BisayaParser {
    pub(crate) fn statement(&mut self) -> ParseResult<Statement> {
        match self.peek().kind {
            TokenKind::Mugna => self.var_declaration(),
            TokenKind::Ipakita => self.print_statement(),
            TokenKind::Dawat => self.input_statement(),
            TokenKind::Kung => self.conditional(),
            TokenKind::Alang => self.for_loop(),
            TokenKind::Samtang => self.while_loop(),
            _ => self.expression_statement(),
        }
    }

    /// `MUGNA <type> name (= value)? (, name (= value)?)*`
    fn var_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone();

        let data_type = match self.peek().kind {
            TokenKind::Numero => DataType::Numero,
            TokenKind::Tipik => DataType::Tipik,
            TokenKind::Letra => DataType::Letra,
            TokenKind::Tinuod => DataType::Tinuod,
            _ => {
                return Err(ParseError::unexpected_token(
                    self.peek(),
                    "a type (NUMERO, TIPIK, LETRA or TINUOD) after MUGNA",
                ));
            }
        };
        self.advance();

        let mut declarators = Vec::new();
        loop {
            let name = self.expect(TokenKind::Identifier, "a variable name")?.clone();
            let initializer = if self.match_any(&[TokenKind::Equal]).is_some() {
                Some(self.concatenation()?)
            } else {
                None
            };

            self.declared.insert(name.lexeme.clone());
            declarators.push(Declarator {
                name: Identifier {
                    name: name.lexeme,
                    span: name.span,
                },
                initializer,
            });

            if self.match_any(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
        self.skip_semicolon();

        Ok(Statement {
            kind: StatementKind::VarDecl(VarDecl {
                data_type,
                declarators,
            }),
            span: self.span_from(&keyword.span),
        })
    }

    /// `IPAKITA: part (& part)*`
    fn print_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone();
        self.expect(TokenKind::Colon, "':' after IPAKITA")?;

        let mut parts = vec![self.logical()?];
        while self.match_any(&[TokenKind::Ampersand]).is_some() {
            parts.push(self.logical()?);
        }
        self.skip_semicolon();

        Ok(Statement {
            kind: StatementKind::Print(parts),
            span: self.span_from(&keyword.span),
        })
    }

    /// `DAWAT: name (, name)*`, every name already declared and listed once
    fn input_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone();
        self.expect(TokenKind::Colon, "':' after DAWAT")?;

        if !self.check(TokenKind::Identifier) {
            return match self.peek().kind {
                TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::RightBrace
                | TokenKind::Katapusan => Err(ParseError::empty_input_list(&keyword)),
                _ => Err(ParseError::unexpected_token(self.peek(), "a variable name")),
            };
        }

        let mut seen = HashSet::new();
        let mut names = Vec::new();
        loop {
            let name = self.expect(TokenKind::Identifier, "a variable name after ','")?.clone();
            if !self.declared.contains(&name.lexeme) {
                return Err(ParseError::undeclared_input_target(&name));
            }
            if !seen.insert(name.lexeme.clone()) {
                return Err(ParseError::duplicate_input_target(&name));
            }
            names.push(Identifier {
                name: name.lexeme,
                span: name.span,
            });

            if self.match_any(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
        self.skip_semicolon();

        Ok(Statement {
            kind: StatementKind::Input(names),
            span: self.span_from(&keyword.span),
        })
    }

    fn expression_statement(&mut self) -> ParseResult<Statement> {
        let expression = self.expression()?;
        self.skip_semicolon();
        let span = self.span_from(&expression.span);
        Ok(Statement {
            kind: StatementKind::Expression(expression),
            span,
        })
    }
}
