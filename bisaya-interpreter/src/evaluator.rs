//! Expression evaluator for the Bisaya++ interpreter.
//!
//! One method per expression kind, all evaluating against a borrowed
//! environment. Statements and console I/O live in the interpreter.

use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::value::{NumericPair, Value};
use bisaya_parser::{
    Assignment, BinaryOperation, BinaryOperator, Expression, ExpressionKind, PostfixOperation,
    PostfixOperator, Span, UnaryOperation, UnaryOperator,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, expr: &Expression, env: &mut Environment) -> Result<Value> {
        match &expr.kind {
            ExpressionKind::Literal(literal) => Ok(Value::from_literal(literal)),
            ExpressionKind::Variable(identifier) => env
                .get(&identifier.name)
                .map_err(|e| RuntimeError::from_environment(e, identifier.span)),
            ExpressionKind::Assign(assign) => self.evaluate_assignment(assign, env),
            ExpressionKind::BinaryOp(op) => self.evaluate_binary(op, expr.span, env),
            ExpressionKind::UnaryOp(op) => self.evaluate_unary(op, expr.span, env),
            ExpressionKind::PostfixOp(op) => self.evaluate_postfix(op, expr.span, env),
            ExpressionKind::Grouping(inner) => self.evaluate(inner, env),
        }
    }

    /// Evaluate a KUNG / ALANG SA / SAMTANG condition
    pub fn evaluate_condition(&self, expr: &Expression, env: &mut Environment) -> Result<bool> {
        let value = self.evaluate(expr, env)?;
        value
            .as_condition()
            .ok_or_else(|| RuntimeError::non_boolean_condition(value.describe(), expr.span))
    }

    fn evaluate_assignment(&self, assign: &Assignment, env: &mut Environment) -> Result<Value> {
        let value = self.evaluate(&assign.value, env)?;
        env.assign(&assign.target.name, value)
            .map_err(|e| RuntimeError::from_environment(e, assign.target.span))
    }

    fn evaluate_binary(
        &self,
        op: &BinaryOperation,
        span: Span,
        env: &mut Environment,
    ) -> Result<Value> {
        match op.operator {
            // UG and O decide from the left operand alone when they can
            BinaryOperator::And | BinaryOperator::Or => self.evaluate_logical(op, env),
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo => {
                let (left, right) = self.operands(op, env)?;
                arithmetic(op.operator, &left, &right, span)
            }
            BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual => {
                let (left, right) = self.operands(op, env)?;
                compare(op.operator, &left, &right, span)
            }
            BinaryOperator::Equal => {
                let (left, right) = self.operands(op, env)?;
                Ok(Value::Boolean(left.equals(&right)))
            }
            BinaryOperator::NotEqual => {
                let (left, right) = self.operands(op, env)?;
                Ok(Value::Boolean(!left.equals(&right)))
            }
            BinaryOperator::Concat => {
                let (left, right) = self.operands(op, env)?;
                Ok(Value::String(format!(
                    "{}{}",
                    left.to_display_string(),
                    right.to_display_string()
                )))
            }
        }
    }

    /// Both operands, left to right
    fn operands(&self, op: &BinaryOperation, env: &mut Environment) -> Result<(Value, Value)> {
        let left = self.evaluate(&op.left, env)?;
        let right = self.evaluate(&op.right, env)?;
        Ok((left, right))
    }

    fn evaluate_logical(&self, op: &BinaryOperation, env: &mut Environment) -> Result<Value> {
        let left = self.logical_operand(&op.left, op.operator, env)?;
        let decided = match op.operator {
            BinaryOperator::And => !left,
            _ => left,
        };
        if decided {
            tracing::trace!(operator = %op.operator, "short-circuit");
            return Ok(Value::Boolean(left));
        }

        let right = self.logical_operand(&op.right, op.operator, env)?;
        Ok(Value::Boolean(right))
    }

    fn logical_operand(
        &self,
        expr: &Expression,
        operator: BinaryOperator,
        env: &mut Environment,
    ) -> Result<bool> {
        let value = self.evaluate(expr, env)?;
        value.as_condition().ok_or_else(|| {
            RuntimeError::type_mismatch(
                format!("'{operator}' needs OO or DILI operands, found {}", value.describe()),
                expr.span,
            )
        })
    }

    fn evaluate_unary(
        &self,
        op: &UnaryOperation,
        span: Span,
        env: &mut Environment,
    ) -> Result<Value> {
        match op.operator {
            UnaryOperator::Increment => self.step(&op.operand, 1, true, span, env),
            UnaryOperator::Decrement => self.step(&op.operand, -1, true, span, env),
            UnaryOperator::Not => {
                let value = self.evaluate(&op.operand, env)?;
                Ok(Value::Boolean(!value.is_truthy()))
            }
            UnaryOperator::Minus => match self.evaluate(&op.operand, env)? {
                Value::Integer(i) => Ok(Value::Integer(i.wrapping_neg())),
                Value::Float(f) => Ok(Value::Float(-f)),
                other => Err(unary_mismatch(op.operator, &other, span)),
            },
            UnaryOperator::Plus => match self.evaluate(&op.operand, env)? {
                value if value.is_numeric() => Ok(value),
                other => Err(unary_mismatch(op.operator, &other, span)),
            },
        }
    }

    fn evaluate_postfix(
        &self,
        op: &PostfixOperation,
        span: Span,
        env: &mut Environment,
    ) -> Result<Value> {
        let delta = match op.operator {
            PostfixOperator::Increment => 1,
            PostfixOperator::Decrement => -1,
        };
        self.step(&op.operand, delta, false, span, env)
    }

    /// `++` / `--` on a variable; returns the new value for prefix, the old one for postfix
    fn step(
        &self,
        operand: &Expression,
        delta: i64,
        prefix: bool,
        span: Span,
        env: &mut Environment,
    ) -> Result<Value> {
        let operator = if delta > 0 { "++" } else { "--" };
        let Some(identifier) = operand.as_variable() else {
            return Err(RuntimeError::invalid_increment_target(
                operator, operand, span,
            ));
        };

        let old = env
            .get_raw(&identifier.name)
            .map_err(|e| RuntimeError::from_environment(e, identifier.span))?;
        let new = match old {
            Value::Integer(i) => Value::Integer(i.wrapping_add(delta)),
            Value::Float(f) => Value::Float(f + delta as f64),
            ref other => {
                return Err(RuntimeError::type_mismatch(
                    format!("'{operator}' needs a numeric variable, found {}", other.describe()),
                    span,
                ));
            }
        };

        let stored = env
            .assign(&identifier.name, new)
            .map_err(|e| RuntimeError::from_environment(e, identifier.span))?;
        Ok(if prefix { stored } else { old })
    }
}

fn arithmetic(operator: BinaryOperator, left: &Value, right: &Value, span: Span) -> Result<Value> {
    let pair = left
        .numeric_pair(right)
        .ok_or_else(|| binary_mismatch(operator, left, right, span))?;

    let divides = matches!(operator, BinaryOperator::Divide | BinaryOperator::Modulo);
    let zero_divisor = match pair {
        NumericPair::Integers(_, b) => b == 0,
        NumericPair::Floats(_, b) => b == 0.0,
    };
    if divides && zero_divisor {
        return Err(RuntimeError::division_by_zero(operator, span));
    }

    let value = match pair {
        NumericPair::Integers(a, b) => Value::Integer(match operator {
            BinaryOperator::Add => a.wrapping_add(b),
            BinaryOperator::Subtract => a.wrapping_sub(b),
            BinaryOperator::Multiply => a.wrapping_mul(b),
            BinaryOperator::Divide => a.wrapping_div(b),
            _ => a.wrapping_rem(b),
        }),
        NumericPair::Floats(a, b) => Value::Float(match operator {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
            _ => a % b,
        }),
    };
    Ok(value)
}

fn compare(operator: BinaryOperator, left: &Value, right: &Value, span: Span) -> Result<Value> {
    let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
        return Err(binary_mismatch(operator, left, right, span));
    };

    let result = match operator {
        BinaryOperator::Greater => a > b,
        BinaryOperator::GreaterEqual => a >= b,
        BinaryOperator::Less => a < b,
        _ => a <= b,
    };
    Ok(Value::Boolean(result))
}

fn binary_mismatch(operator: BinaryOperator, left: &Value, right: &Value, span: Span) -> RuntimeError {
    RuntimeError::type_mismatch(
        format!(
            "cannot apply '{operator}' to {} and {}",
            left.describe(),
            right.describe()
        ),
        span,
    )
}

fn unary_mismatch(operator: UnaryOperator, operand: &Value, span: Span) -> RuntimeError {
    RuntimeError::type_mismatch(
        format!(
            "cannot apply unary '{}' to {}",
            operator.to_string().trim(),
            operand.describe()
        ),
        span,
    )
}
