//! Cell values and keyed records.

use crate::error::TableError;
use serde::Deserialize;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// One table cell. `"True"`/`"False"` strings and JSON booleans both decode to `Bool`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Truthiness: false, null, zero and the empty string are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => match s.as_str() {
                "True" => Value::Bool(true),
                "False" => Value::Bool(false),
                _ => Value::Str(s),
            },
            other => Value::Str(other.to_string()),
        }
    }
}

// Floats compare bitwise so values can key a HashSet for distinct counts.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

/// One decoded row, keyed by column name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub(crate) fn from_fields(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Result<&Value, TableError> {
        self.fields
            .get(column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))
    }

    /// Lookup for columns that some tool versions omit
    pub fn try_get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Whether `column` holds exactly the given string
    pub fn text_is(&self, column: &str, expected: &str) -> Result<bool, TableError> {
        Ok(self.get(column)?.as_str() == Some(expected))
    }

    /// Non-negative integer column; null reads as 0
    pub fn count(&self, column: &str) -> Result<u64, TableError> {
        match self.get(column)? {
            Value::Null => Ok(0),
            Value::Int(i) if *i >= 0 => Ok(*i as u64),
            other => Err(TableError::TypeMismatch {
                column: column.to_string(),
                expected: "non-negative integer",
                found: other.kind(),
            }),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
