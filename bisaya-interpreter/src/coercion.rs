//! Conversion of values into declared-type slots.

use crate::value::{Value, text_boolean};
use bisaya_parser::DataType;
use thiserror::Error;

/// Why a value could not be stored under a declared type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("cannot store decimal value {value} in a {data_type} variable")]
    DecimalValue { value: String, data_type: DataType },

    #[error("cannot store {found} in a {data_type} variable")]
    InvalidValue { found: String, data_type: DataType },
}

/// Coerce `value` to `data_type`; `Absent` is kept as-is for every type
pub fn coerce(value: Value, data_type: DataType) -> Result<Value, CoercionError> {
    if value == Value::Absent {
        return Ok(Value::Absent);
    }

    match data_type {
        DataType::Numero => to_integer(value),
        DataType::Tipik => to_float(value),
        DataType::Letra => to_character(value),
        DataType::Tinuod => to_boolean(value),
    }
}

fn to_integer(value: Value) -> Result<Value, CoercionError> {
    match &value {
        Value::Integer(_) => Ok(value),
        Value::Float(f) if f.fract() != 0.0 => Err(decimal(value.to_display_string())),
        // 2^63 itself does not fit, hence the strict upper bound
        Value::Float(f) if f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Ok(Value::Integer(*f as i64))
        }
        Value::String(s) => {
            let text = s.trim();
            if is_integer_text(text) {
                text.parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| invalid(&value, DataType::Numero))
            } else if is_decimal_text(text) {
                Err(decimal(text.to_string()))
            } else {
                Err(invalid(&value, DataType::Numero))
            }
        }
        _ => Err(invalid(&value, DataType::Numero)),
    }
}

fn to_float(value: Value) -> Result<Value, CoercionError> {
    match &value {
        Value::Float(_) => Ok(value),
        Value::Integer(i) => Ok(Value::Float(*i as f64)),
        Value::String(s) => {
            let text = s.trim();
            if is_integer_text(text) || is_decimal_text(text) {
                text.parse::<f64>()
                    .map(Value::Float)
                    .map_err(|_| invalid(&value, DataType::Tipik))
            } else {
                Err(invalid(&value, DataType::Tipik))
            }
        }
        _ => Err(invalid(&value, DataType::Tipik)),
    }
}

fn to_character(value: Value) -> Result<Value, CoercionError> {
    match &value {
        Value::Character(_) => Ok(value),
        Value::String(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Character(c)),
                _ => Err(invalid(&value, DataType::Letra)),
            }
        }
        _ => Err(invalid(&value, DataType::Letra)),
    }
}

fn to_boolean(value: Value) -> Result<Value, CoercionError> {
    match &value {
        Value::Boolean(_) => Ok(value),
        Value::String(s) => text_boolean(s)
            .map(Value::Boolean)
            .ok_or_else(|| invalid(&value, DataType::Tinuod)),
        _ => Err(invalid(&value, DataType::Tinuod)),
    }
}

/// Optional sign followed by one or more ASCII digits
fn is_integer_text(text: &str) -> bool {
    is_digits(text.strip_prefix(['-', '+']).unwrap_or(text))
}

/// Optional sign, digits, '.', digits
fn is_decimal_text(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    unsigned
        .split_once('.')
        .is_some_and(|(whole, fraction)| is_digits(whole) && is_digits(fraction))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn decimal(value: String) -> CoercionError {
    CoercionError::DecimalValue {
        value,
        data_type: DataType::Numero,
    }
}

fn invalid(value: &Value, data_type: DataType) -> CoercionError {
    CoercionError::InvalidValue {
        found: value.describe(),
        data_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_absent_is_kept_for_every_type() {
        for data_type in [
            DataType::Numero,
            DataType::Tipik,
            DataType::Letra,
            DataType::Tinuod,
        ] {
            assert_eq!(coerce(Value::Absent, data_type), Ok(Value::Absent));
        }
    }

    #[test]
    fn test_numero() {
        assert_eq!(coerce(Value::Float(4.0), DataType::Numero), Ok(Value::Integer(4)));
        assert_eq!(coerce(Value::Integer(-3), DataType::Numero), Ok(Value::Integer(-3)));
        assert_eq!(coerce(text("42"), DataType::Numero), Ok(Value::Integer(42)));
        assert_eq!(coerce(text("-17"), DataType::Numero), Ok(Value::Integer(-17)));
        assert_eq!(coerce(text("+8"), DataType::Numero), Ok(Value::Integer(8)));
    }

    #[test]
    fn test_numero_rejects_decimals() {
        assert_eq!(
            coerce(Value::Float(3.14), DataType::Numero),
            Err(CoercionError::DecimalValue {
                value: "3.14".to_string(),
                data_type: DataType::Numero
            })
        );
        assert!(matches!(
            coerce(text("2.5"), DataType::Numero),
            Err(CoercionError::DecimalValue { .. })
        ));
    }

    #[test]
    fn test_numero_rejects_other_values() {
        assert!(matches!(
            coerce(text("abc"), DataType::Numero),
            Err(CoercionError::InvalidValue { .. })
        ));
        assert!(matches!(
            coerce(text(""), DataType::Numero),
            Err(CoercionError::InvalidValue { .. })
        ));
        assert!(matches!(
            coerce(Value::Character('5'), DataType::Numero),
            Err(CoercionError::InvalidValue { .. })
        ));
        assert!(matches!(
            coerce(Value::Boolean(true), DataType::Numero),
            Err(CoercionError::InvalidValue { .. })
        ));
        assert!(matches!(
            coerce(text("99999999999999999999"), DataType::Numero),
            Err(CoercionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_tipik() {
        assert_eq!(coerce(Value::Integer(2), DataType::Tipik), Ok(Value::Float(2.0)));
        assert_eq!(coerce(Value::Float(2.5), DataType::Tipik), Ok(Value::Float(2.5)));
        assert_eq!(coerce(text("3.75"), DataType::Tipik), Ok(Value::Float(3.75)));
        assert_eq!(coerce(text("-0.5"), DataType::Tipik), Ok(Value::Float(-0.5)));
        assert_eq!(coerce(text("7"), DataType::Tipik), Ok(Value::Float(7.0)));
        assert!(coerce(text("1.2.3"), DataType::Tipik).is_err());
        assert!(coerce(text(".5"), DataType::Tipik).is_err());
        assert!(coerce(text("5."), DataType::Tipik).is_err());
        assert!(coerce(Value::Character('1'), DataType::Tipik).is_err());
    }

    #[test]
    fn test_letra() {
        assert_eq!(
            coerce(Value::Character('c'), DataType::Letra),
            Ok(Value::Character('c'))
        );
        assert_eq!(coerce(text("z"), DataType::Letra), Ok(Value::Character('z')));
        assert!(coerce(text(""), DataType::Letra).is_err());
        assert!(coerce(text("ab"), DataType::Letra).is_err());
        assert!(coerce(Value::Integer(1), DataType::Letra).is_err());
    }

    #[test]
    fn test_tinuod() {
        assert_eq!(coerce(text("OO"), DataType::Tinuod), Ok(Value::Boolean(true)));
        assert_eq!(coerce(text("DILI"), DataType::Tinuod), Ok(Value::Boolean(false)));
        assert_eq!(
            coerce(Value::Boolean(true), DataType::Tinuod),
            Ok(Value::Boolean(true))
        );
        assert!(coerce(text("true"), DataType::Tinuod).is_err());
        assert!(coerce(Value::Integer(1), DataType::Tinuod).is_err());
    }

    #[test]
    fn test_error_messages_name_the_type() {
        let error = coerce(Value::Float(3.14), DataType::Numero).unwrap_err();
        assert_eq!(
            error.to_string(),
            "cannot store decimal value 3.14 in a NUMERO variable"
        );

        let error = coerce(text("ab"), DataType::Letra).unwrap_err();
        assert_eq!(
            error.to_string(),
            "cannot store String \"ab\" in a LETRA variable"
        );
    }
}
