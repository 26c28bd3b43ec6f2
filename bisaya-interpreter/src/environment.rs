//! Flat variable environment for one program execution.
//!
//! Every declaration lands in the same map regardless of the block it came
//! from; names are kept in declaration order for the REPL `:vars` listing.

use crate::coercion::{CoercionError, coerce};
use crate::value::{Value, boolean_text};
use bisaya_parser::DataType;
use indexmap::IndexMap;
use thiserror::Error;

/// Position-free environment failure; the evaluator attaches the location
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    #[error("variable '{name}' is already declared")]
    AlreadyDeclared { name: String },

    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("variable '{name}': {source}")]
    Coercion {
        name: String,
        #[source]
        source: CoercionError,
    },
}

/// A declared variable's fixed type and current value
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub data_type: DataType,
    pub value: Value,
}

/// Variable environment without scopes
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: IndexMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with `value` coerced to `data_type`
    pub fn declare(
        &mut self,
        name: &str,
        data_type: DataType,
        value: Value,
    ) -> Result<(), EnvironmentError> {
        if self.bindings.contains_key(name) {
            return Err(EnvironmentError::AlreadyDeclared {
                name: name.to_string(),
            });
        }

        let value = coerce(value, data_type).map_err(|source| EnvironmentError::Coercion {
            name: name.to_string(),
            source,
        })?;
        tracing::trace!(name, %data_type, value = %value, "declare");
        self.bindings
            .insert(name.to_string(), Binding { data_type, value });
        Ok(())
    }

    /// Store `value` coerced to the variable's declared type, returning what was stored
    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, EnvironmentError> {
        let binding =
            self.bindings
                .get_mut(name)
                .ok_or_else(|| EnvironmentError::UndefinedVariable {
                    name: name.to_string(),
                })?;

        let value =
            coerce(value, binding.data_type).map_err(|source| EnvironmentError::Coercion {
                name: name.to_string(),
                source,
            })?;
        tracing::trace!(name, value = %value, "assign");
        binding.value = value.clone();
        Ok(value)
    }

    /// Read a variable; TINUOD values come back as "OO" / "DILI" text
    pub fn get(&self, name: &str) -> Result<Value, EnvironmentError> {
        self.get_raw(name).map(|value| match value {
            Value::Boolean(b) => Value::String(boolean_text(b).to_string()),
            other => other,
        })
    }

    /// Read the stored value without projecting booleans to text
    pub fn get_raw(&self, name: &str) -> Result<Value, EnvironmentError> {
        self.bindings
            .get(name)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| EnvironmentError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    pub fn data_type(&self, name: &str) -> Option<DataType> {
        self.bindings.get(name).map(|binding| binding.data_type)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// `(name, type, value)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, DataType, &Value)> {
        self.bindings
            .iter()
            .map(|(name, binding)| (name.as_str(), binding.data_type, &binding.value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Forget every variable
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_and_get() {
        let mut env = Environment::new();
        env.declare("x", DataType::Numero, Value::Float(10.0)).unwrap();

        assert_eq!(env.get("x").unwrap(), Value::Integer(10));
        assert_eq!(env.data_type("x"), Some(DataType::Numero));
        assert!(env.is_declared("x"));
    }

    #[test]
    fn test_redeclaration_fails_regardless_of_type() {
        let mut env = Environment::new();
        env.declare("x", DataType::Numero, Value::Absent).unwrap();

        for data_type in [
            DataType::Numero,
            DataType::Tipik,
            DataType::Letra,
            DataType::Tinuod,
        ] {
            assert_eq!(
                env.declare("x", data_type, Value::Absent),
                Err(EnvironmentError::AlreadyDeclared {
                    name: "x".to_string()
                })
            );
        }
    }

    #[test]
    fn test_undeclared_access_fails() {
        let mut env = Environment::new();
        assert!(matches!(
            env.get("missing"),
            Err(EnvironmentError::UndefinedVariable { .. })
        ));
        assert!(matches!(
            env.assign("missing", Value::Integer(1)),
            Err(EnvironmentError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_assignment_coerces_to_declared_type() {
        let mut env = Environment::new();
        env.declare("f", DataType::Tipik, Value::Absent).unwrap();

        assert_eq!(env.assign("f", Value::Integer(3)).unwrap(), Value::Float(3.0));
        assert_eq!(env.get("f").unwrap(), Value::Float(3.0));
    }

    #[test]
    fn test_failed_assignment_keeps_old_value() {
        let mut env = Environment::new();
        env.declare("n", DataType::Numero, Value::Float(1.0)).unwrap();

        assert!(matches!(
            env.assign("n", Value::Float(1.5)),
            Err(EnvironmentError::Coercion { .. })
        ));
        assert_eq!(env.get("n").unwrap(), Value::Integer(1));
    }

    #[test]
    fn test_booleans_read_back_as_text() {
        let mut env = Environment::new();
        env.declare("t", DataType::Tinuod, Value::String("OO".to_string()))
            .unwrap();

        assert_eq!(env.get_raw("t").unwrap(), Value::Boolean(true));
        assert_eq!(env.get("t").unwrap(), Value::String("OO".to_string()));

        env.assign("t", Value::Boolean(false)).unwrap();
        assert_eq!(env.get("t").unwrap(), Value::String("DILI".to_string()));
    }

    #[test]
    fn test_absent_values() {
        let mut env = Environment::new();
        env.declare("c", DataType::Letra, Value::Absent).unwrap();
        assert_eq!(env.get("c").unwrap(), Value::Absent);
    }

    #[test]
    fn test_iteration_in_declaration_order() {
        let mut env = Environment::new();
        env.declare("z", DataType::Numero, Value::Float(1.0)).unwrap();
        env.declare("a", DataType::Letra, Value::Character('q')).unwrap();
        env.declare("m", DataType::Tinuod, Value::Boolean(true)).unwrap();

        let listed: Vec<(&str, DataType)> = env.iter().map(|(n, t, _)| (n, t)).collect();
        assert_eq!(
            listed,
            vec![
                ("z", DataType::Numero),
                ("a", DataType::Letra),
                ("m", DataType::Tinuod)
            ]
        );
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut env = Environment::new();
        env.declare("x", DataType::Numero, Value::Absent).unwrap();
        env.clear();
        assert!(env.is_empty());
        assert!(!env.is_declared("x"));
    }
}
