use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::DEFAULT_REQUIRED_FIELDS;
use crate::errors::DomainError;

/// The structured payload of one completed intake conversation. Field sets
/// vary by deployment, so the record is a key/value mapping rather than a
/// fixed struct; the deployment's `FieldPolicy` decides which keys matter.
/// Unknown keys are preserved untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntakeRecord {
    fields: Map<String, Value>,
}

impl IntakeRecord {
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Scalar field rendered for human-readable output (summary lines, log
    /// context). Null and missing fields are both `None`; structured values
    /// fall back to their JSON form.
    pub fn field_text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Number(number) => Some(number.to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Per-deployment required-field contract, enforced at dispatch time. The
/// extractor never applies it: extraction is syntactic, interpretation is
/// semantic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPolicy {
    required: Vec<String>,
}

impl FieldPolicy {
    pub fn new(required: Vec<String>) -> Self {
        Self { required }
    }

    /// Policy for the appointment-scheduling deployment.
    pub fn appointment() -> Self {
        Self::new(DEFAULT_REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect())
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn validate(&self, record: &IntakeRecord) -> Result<(), DomainError> {
        for field in &self.required {
            match record.get(field) {
                None => {
                    return Err(DomainError::MissingRequiredField { field: field.clone() });
                }
                Some(value) if value_is_empty(value) => {
                    return Err(DomainError::EmptyRequiredField { field: field.clone() });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
