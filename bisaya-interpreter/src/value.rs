//! Runtime value representation for the Bisaya++ interpreter.
//!
//! Closed set of value tags plus the helpers every operator shares:
//! numeric widening, textual booleans and stringification.

use bisaya_parser::Literal;
use std::fmt;

/// Surface text of the true boolean literal
pub const TRUE_LITERAL: &str = "OO";
/// Surface text of the false boolean literal
pub const FALSE_LITERAL: &str = "DILI";

/// Runtime values in the Bisaya++ interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer (NUMERO)
    Integer(i64),
    /// 64-bit floating point number (TIPIK, and every number literal)
    Float(f64),
    /// Single character (LETRA)
    Character(char),
    /// Boolean value (TINUOD and comparison results)
    Boolean(bool),
    /// UTF-8 string
    String(String),
    /// Declared without an initializer
    Absent,
}

/// Both operands of an arithmetic operator after numeric promotion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericPair {
    Integers(i64, i64),
    Floats(f64, f64),
}

impl Value {
    /// Evaluate a literal node
    ///
    /// A character literal holding anything but exactly one character
    /// evaluates to a string, so storing it into a LETRA slot fails.
    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Number(n) => Value::Float(*n),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Character(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Character(c),
                    _ => Value::String(s.clone()),
                }
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Character(_) => "Character",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
            Value::Absent => "null",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Numeric value widened to a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Promote two operands for arithmetic; `None` when either is not numeric
    pub fn numeric_pair(&self, other: &Value) -> Option<NumericPair> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(NumericPair::Integers(*a, *b)),
            _ => Some(NumericPair::Floats(self.as_f64()?, other.as_f64()?)),
        }
    }

    /// Value usable as a condition or a UG/O operand
    ///
    /// Booleans stand for themselves; the strings "OO" and "DILI" stand for
    /// true and false because boolean variables read back as text.
    pub fn as_condition(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::String(s) => text_boolean(s),
            _ => None,
        }
    }

    /// Truthiness used by DILI (not)
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Boolean(b) => *b,
            Value::String(s) => s == TRUE_LITERAL,
            Value::Integer(_) | Value::Float(_) | Value::Character(_) => true,
        }
    }

    /// `==` semantics
    ///
    /// Integers and floats compare by numeric value, and a Boolean equals its
    /// own textual literal. Everything else compares by tag and payload.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(b), Value::String(s)) | (Value::String(s), Value::Boolean(b)) => {
                text_boolean(s) == Some(*b)
            }
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => self == other,
            },
        }
    }

    /// Text produced by `&` and IPAKITA
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Character(c) => c.to_string(),
            Value::Boolean(b) => boolean_text(*b).to_string(),
            Value::String(s) => s.clone(),
            Value::Absent => "null".to_string(),
        }
    }

    /// Debug-friendly description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("String \"{s}\""),
            Value::Character(c) => format!("Character '{c}'"),
            Value::Absent => "null".to_string(),
            other => format!("{} {}", other.type_name(), other.to_display_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

/// "OO" / "DILI"
pub fn boolean_text(value: bool) -> &'static str {
    if value { TRUE_LITERAL } else { FALSE_LITERAL }
}

/// Parse one of the two textual boolean literals
pub fn text_boolean(text: &str) -> Option<bool> {
    match text {
        TRUE_LITERAL => Some(true),
        FALSE_LITERAL => Some(false),
        _ => None,
    }
}

/// Integral floats print without a decimal point
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
