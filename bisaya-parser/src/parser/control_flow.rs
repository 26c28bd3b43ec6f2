// Control flow parsing module
// KUNG chains, ALANG SA and SAMTANG loops, and PUNDOK blocks

use crate::ast::*;
use crate::error::*;
use crate::parser::BisayaParser;
use crate::token::TokenKind;

impl BisayaParser {
    /// `KUNG (c) block (KUNG DILI (c) block)* (KUNG WALA block)?`
    pub(crate) fn conditional(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone();

        let condition = self.parenthesized_condition("KUNG")?;
        let body = self.block()?;
        let mut branches = vec![ConditionalBranch {
            condition: Some(condition),
            body,
        }];

        while self.check(TokenKind::Kung) {
            match self.peek_next().kind {
                TokenKind::Dili => {
                    self.advance();
                    self.advance();
                    let condition = self.parenthesized_condition("KUNG DILI")?;
                    let body = self.block()?;
                    branches.push(ConditionalBranch {
                        condition: Some(condition),
                        body,
                    });
                }
                TokenKind::Wala => {
                    self.advance();
                    self.advance();
                    let body = self.block()?;
                    branches.push(ConditionalBranch {
                        condition: None,
                        body,
                    });
                    break;
                }
                // a fresh KUNG statement
                _ => break,
            }
        }

        Ok(Statement {
            kind: StatementKind::Conditional(branches),
            span: self.span_from(&keyword.span),
        })
    }

    /// `ALANG SA (init, condition, update) block`
    pub(crate) fn for_loop(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone();
        self.expect(TokenKind::Sa, "SA after ALANG")?;
        self.expect(TokenKind::LeftParen, "'(' after ALANG SA")?;

        let initializer = self.expression()?;
        // `i = 1` on an undeclared counter declares it
        if let ExpressionKind::Assign(assignment) = &initializer.kind {
            self.declared.insert(assignment.target.name.clone());
        }
        self.expect(TokenKind::Comma, "',' after the loop initializer")?;

        let condition = self.expression()?;
        self.expect(TokenKind::Comma, "',' after the loop condition")?;

        let update = self.expression()?;
        self.expect(TokenKind::RightParen, "')' after the loop update")?;

        let body = self.block()?;

        Ok(Statement {
            kind: StatementKind::ForLoop(ForLoop {
                initializer,
                condition,
                update,
                body,
            }),
            span: self.span_from(&keyword.span),
        })
    }

    /// `SAMTANG (condition) block`
    pub(crate) fn while_loop(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone();
        let condition = self.parenthesized_condition("SAMTANG")?;
        let body = self.block()?;

        Ok(Statement {
            kind: StatementKind::WhileLoop(WhileLoop { condition, body }),
            span: self.span_from(&keyword.span),
        })
    }

    /// `PUNDOK { statement* }`
    pub(crate) fn block(&mut self) -> ParseResult<Block> {
        let start = self.expect(TokenKind::Pundok, "PUNDOK to open a block")?.span;
        self.expect(TokenKind::LeftBrace, "'{' after PUNDOK")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(ParseError::unexpected_token(
                    self.peek(),
                    "'}' to close the block",
                ));
            }
            statements.push(self.statement()?);
        }
        self.advance();

        Ok(Block {
            statements,
            span: self.span_from(&start),
        })
    }

    fn parenthesized_condition(&mut self, after: &str) -> ParseResult<Expression> {
        self.expect(TokenKind::LeftParen, &format!("'(' after {after}"))?;
        let condition = self.expression()?;
        self.expect(TokenKind::RightParen, "')' after the condition")?;
        Ok(condition)
    }
}
