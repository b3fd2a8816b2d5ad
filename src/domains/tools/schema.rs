//! Argument schema translation and validation.
//!
//! Each tool's [`InputSchema`] is translated once, when the registry is
//! built, into an [`ArgumentSchema`]: one [`FieldRule`] per property. Every
//! call's arguments are checked against it before the callback runs.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::definition::InputSchema;
use super::error::ToolError;
use super::properties::PropertyKind;

/// Validation rule for one argument.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    String { allowed: &'static [&'static str] },
    Number { minimum: Option<f64>, maximum: Option<f64> },
    Boolean { default: Option<bool> },
    StringArray,
}

impl From<PropertyKind> for FieldRule {
    fn from(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::String { allowed } => Self::String { allowed },
            PropertyKind::Number {
                minimum, maximum, ..
            } => Self::Number {
                minimum: minimum.map(|m| m as f64),
                maximum: maximum.map(|m| m as f64),
            },
            PropertyKind::Boolean { default } => Self::Boolean { default },
            PropertyKind::StringArray => Self::StringArray,
        }
    }
}

impl FieldRule {
    fn check(&self, field: &str, value: &Value) -> Result<(), ToolError> {
        match self {
            Self::String { allowed } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| type_mismatch(field, "a string", value))?;
                if !allowed.is_empty() && !allowed.contains(&text) {
                    return Err(ToolError::invalid_arguments(format!(
                        "'{}' must be one of {:?}, got {:?}",
                        field, allowed, text
                    )));
                }
            }
            Self::Number { minimum, maximum } => {
                let number = value
                    .as_f64()
                    .ok_or_else(|| type_mismatch(field, "a number", value))?;
                if let Some(min) = minimum.filter(|min| number < *min) {
                    return Err(ToolError::invalid_arguments(format!(
                        "'{}' must be >= {}, got {}",
                        field, min, value
                    )));
                }
                if let Some(max) = maximum.filter(|max| number > *max) {
                    return Err(ToolError::invalid_arguments(format!(
                        "'{}' must be <= {}, got {}",
                        field, max, value
                    )));
                }
            }
            Self::Boolean { .. } => {
                if !value.is_boolean() {
                    return Err(type_mismatch(field, "a boolean", value));
                }
            }
            Self::StringArray => {
                let items = value
                    .as_array()
                    .ok_or_else(|| type_mismatch(field, "an array of strings", value))?;
                if !items.iter().all(Value::is_string) {
                    return Err(type_mismatch(field, "an array of strings", value));
                }
            }
        }
        Ok(())
    }

    fn default_value(&self) -> Option<Value> {
        match self {
            Self::Boolean { default } => default.map(Value::Bool),
            _ => None,
        }
    }
}

fn type_mismatch(field: &str, expected: &str, value: &Value) -> ToolError {
    ToolError::invalid_arguments(format!("'{}' must be {}, got {}", field, expected, value))
}

/// One translated field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub rule: FieldRule,
    pub optional: bool,
}

/// Translated, closed argument schema of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSchema {
    fields: Vec<FieldSchema>,
}

impl ArgumentSchema {
    /// Translate a declared input schema. Fields not listed as required
    /// become optional.
    pub fn translate(schema: &InputSchema) -> Self {
        let fields = schema
            .properties()
            .iter()
            .map(|(name, spec)| FieldSchema {
                name: *name,
                rule: FieldRule::from(spec.kind),
                optional: !schema.is_required(name),
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check call arguments and fill defaults.
    ///
    /// Unknown fields are rejected. `null` counts as absent for optional
    /// fields and is dropped from the returned map.
    pub fn validate(&self, arguments: Option<JsonObject>) -> Result<JsonObject, ToolError> {
        let mut arguments = arguments.unwrap_or_default();

        if let Some(unknown) = arguments.keys().find(|key| self.field(key).is_none()) {
            return Err(ToolError::invalid_arguments(format!(
                "unknown field '{}'",
                unknown
            )));
        }

        for field in &self.fields {
            if let Some(value) = arguments.get(field.name).filter(|v| !v.is_null()) {
                field.rule.check(field.name, value)?;
                continue;
            }

            if !field.optional {
                return Err(ToolError::invalid_arguments(format!(
                    "missing required field '{}'",
                    field.name
                )));
            }
            arguments.remove(field.name);
            if let Some(default) = field.rule.default_value() {
                arguments.insert(field.name.to_string(), default);
            }
        }

        Ok(arguments)
    }
}
