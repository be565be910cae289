// Schema module for model metadata and typed values
// Author: Gabriel Demetrios Lafis

mod category;
mod coerce;

pub use category::*;
pub use coerce::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Represents a queryable model: one relational table exposed by the
/// execution backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub table: String,
    pub primary_key: String,
    pub fields: Vec<Field>,
}

impl Model {
    /// Create a new model descriptor
    pub fn new(name: &str, table: &str, primary_key: &str, fields: Vec<Field>) -> Self {
        Model {
            name: name.to_string(),
            table: table.to_string(),
            primary_key: primary_key.to_string(),
            fields,
        }
    }

    /// Get a reference to a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether the model declares a field with the given name
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Get the declared field names in schema order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Get the category of a field, defaulting to Text for unknown names
    pub fn category_of(&self, name: &str) -> FieldCategory {
        self.field(name)
            .map(|f| f.category)
            .unwrap_or(FieldCategory::Text)
    }

    /// Get the names of all fields a free-text search may target
    pub fn searchable_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.category.is_searchable())
            .map(|f| f.name.clone())
            .collect()
    }
}

/// Represents a field in a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub declared_type: String,
    pub category: FieldCategory,
}

impl Field {
    /// Create a new field, classifying its declared type once at build time
    pub fn new(name: &str, declared_type: &str) -> Self {
        Field {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            category: classify(declared_type),
        }
    }
}

/// In-memory catalog of the models announced by the execution backend,
/// loaded once per session
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<Model>,
}

impl ModelCatalog {
    /// Create a catalog from a list of models
    pub fn new(models: Vec<Model>) -> Self {
        ModelCatalog { models }
    }

    /// Get a model by name
    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Get the model names in announcement order
    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Iterate over the models
    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    /// Get the number of models in the catalog
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Represents a typed scalar value in a filter comparison or a form
/// submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Convert a JSON scalar into a typed value. Arrays and objects have no
    /// scalar representation and are carried as their JSON text.
    pub fn from_json(value: &JsonValue) -> Value {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            JsonValue::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }

    /// Convert the value into its JSON representation
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Integer(i) => JsonValue::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
        }
    }

    /// Compare two values, treating integers and floats numerically
    pub fn eq_loose(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                (*a as f64) == *b
            }
            (a, b) => a == b,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
