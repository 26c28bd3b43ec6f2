// Expression parsing module
// One method per precedence level, loosest first

use crate::ast::*;
use crate::error::*;
use crate::parser::BisayaParser;
use crate::token::{Token, TokenKind, TokenLiteral};

impl BisayaParser {
    pub(crate) fn expression(&mut self) -> ParseResult<Expression> {
        self.assignment()
    }

    /// Right-associative `name = value`
    fn assignment(&mut self) -> ParseResult<Expression> {
        let target = self.concatenation()?;

        if self.match_any(&[TokenKind::Equal]).is_none() {
            return Ok(target);
        }

        let value = self.assignment()?;
        let span = target.span.merge(&value.span);
        match target.kind {
            ExpressionKind::Variable(identifier) => Ok(Expression {
                kind: ExpressionKind::Assign(Assignment {
                    target: identifier,
                    value: Box::new(value),
                }),
                span,
            }),
            _ => Err(ParseError::invalid_assignment_target(
                target.to_string(),
                target.span,
            )),
        }
    }

    pub(crate) fn concatenation(&mut self) -> ParseResult<Expression> {
        let mut expr = self.logical()?;
        while self.match_any(&[TokenKind::Ampersand]).is_some() {
            let right = self.logical()?;
            expr = binary(expr, BinaryOperator::Concat, right);
        }
        Ok(expr)
    }

    /// UG and O share one level, left to right
    pub(crate) fn logical(&mut self) -> ParseResult<Expression> {
        let mut expr = self.equality()?;
        while let Some(token) = self.match_any(&[TokenKind::Ug, TokenKind::O]) {
            let operator = if token.is(TokenKind::Ug) {
                BinaryOperator::And
            } else {
                BinaryOperator::Or
            };
            let right = self.equality()?;
            expr = binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expression> {
        let mut expr = self.comparison()?;
        while let Some(token) = self.match_any(&[TokenKind::EqualEqual, TokenKind::NotEqual]) {
            let operator = match token.kind {
                TokenKind::EqualEqual => BinaryOperator::Equal,
                _ => BinaryOperator::NotEqual,
            };
            let right = self.comparison()?;
            expr = binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expression> {
        let mut expr = self.additive()?;
        while let Some(token) = self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = match token.kind {
                TokenKind::Greater => BinaryOperator::Greater,
                TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
                TokenKind::Less => BinaryOperator::Less,
                _ => BinaryOperator::LessEqual,
            };
            let right = self.additive()?;
            expr = binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn additive(&mut self) -> ParseResult<Expression> {
        let mut expr = self.multiplicative()?;
        while let Some(token) = self.match_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let operator = match token.kind {
                TokenKind::Plus => BinaryOperator::Add,
                _ => BinaryOperator::Subtract,
            };
            let right = self.multiplicative()?;
            expr = binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn multiplicative(&mut self) -> ParseResult<Expression> {
        let mut expr = self.unary()?;
        while let Some(token) =
            self.match_any(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent])
        {
            let operator = match token.kind {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                _ => BinaryOperator::Modulo,
            };
            let right = self.unary()?;
            expr = binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.match_any(&[
            TokenKind::Minus,
            TokenKind::Plus,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Dili,
        ]) else {
            return self.postfix();
        };

        let operator = match token.kind {
            TokenKind::Minus => UnaryOperator::Minus,
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::PlusPlus => UnaryOperator::Increment,
            TokenKind::MinusMinus => UnaryOperator::Decrement,
            _ => UnaryOperator::Not,
        };
        let operand = self.unary()?;
        let span = token.span.merge(&operand.span);

        Ok(Expression {
            kind: ExpressionKind::UnaryOp(UnaryOperation {
                operator,
                operand: Box::new(operand),
            }),
            span,
        })
    }

    /// `name++` / `name--`; the operator must sit on the operand's line
    fn postfix(&mut self) -> ParseResult<Expression> {
        let mut expr = self.primary()?;

        while (self.check(TokenKind::PlusPlus) || self.check(TokenKind::MinusMinus))
            && self.peek().line() == self.previous().line()
        {
            let token = self.advance().clone();
            let operator = if token.is(TokenKind::PlusPlus) {
                PostfixOperator::Increment
            } else {
                PostfixOperator::Decrement
            };

            if expr.as_variable().is_none() {
                return Err(ParseError::invalid_increment_target(
                    &token,
                    expr.to_string(),
                    expr.span,
                ));
            }

            let span = expr.span.merge(&token.span);
            expr = Expression {
                kind: ExpressionKind::PostfixOp(PostfixOperation {
                    operand: Box::new(expr),
                    operator,
                }),
                span,
            };
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expression> {
        let token = self.peek().clone();

        let kind = match token.kind {
            TokenKind::Number => {
                self.advance();
                ExpressionKind::Literal(Literal::Number(number_value(&token)))
            }
            TokenKind::String | TokenKind::EscapedString | TokenKind::NewlineLiteral => {
                self.advance();
                ExpressionKind::Literal(Literal::String(text_value(&token)))
            }
            TokenKind::Character => {
                self.advance();
                ExpressionKind::Literal(Literal::Character(text_value(&token)))
            }
            TokenKind::Identifier => {
                self.advance();
                ExpressionKind::Variable(Identifier {
                    name: token.lexeme.clone(),
                    span: token.span,
                })
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RightParen, "')' to close the group")?;
                return Ok(Expression {
                    kind: ExpressionKind::Grouping(Box::new(inner)),
                    span: self.span_from(&token.span),
                });
            }
            _ => return Err(ParseError::unexpected_token(&token, "an expression")),
        };

        Ok(Expression {
            kind,
            span: token.span,
        })
    }
}

fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    let span = left.span.merge(&right.span);
    Expression {
        kind: ExpressionKind::BinaryOp(BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
        span,
    }
}

fn number_value(token: &Token) -> f64 {
    match &token.literal {
        Some(TokenLiteral::Number(value)) => *value,
        _ => token.lexeme.parse().unwrap_or_default(),
    }
}

fn text_value(token: &Token) -> String {
    match &token.literal {
        Some(TokenLiteral::String(text)) | Some(TokenLiteral::Character(text)) => text.clone(),
        _ => token.lexeme.clone(),
    }
}
