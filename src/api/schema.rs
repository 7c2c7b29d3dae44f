//! JSON response contracts
//!
//! A [`Schema`] is a list of field rules addressed by path (`products[0].id`).
//! Validation collects every violation instead of stopping at the first one,
//! so a single run shows the whole contract drift.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::NewProduct;
use crate::error::{E2eError, Result};

/// Expected JSON type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }
}

fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Categories of contract violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Required field absent
    MissingField,
    /// Field present with the wrong JSON type
    TypeMismatch,
    /// Field present with an unexpected value
    UnexpectedValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_type: ViolationType,
    pub message: String,
    /// Path of the offending field, e.g. `products[0].price`
    pub field_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.is_valid = false;
    }

    /// `Ok` when valid, otherwise a [`E2eError::Contract`] listing every violation.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(E2eError::Contract(
                self.errors.into_iter().map(|e| e.message).collect(),
            ))
        }
    }
}

#[derive(Debug, Clone)]
struct FieldRule {
    path: String,
    field_type: FieldType,
    value: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `path` to be present with type `field_type`.
    pub fn field(mut self, path: &str, field_type: FieldType) -> Self {
        self.rules.push(FieldRule {
            path: path.to_string(),
            field_type,
            value: None,
        });
        self
    }

    /// Require `path` to be present, typed, and equal to `value`.
    pub fn field_eq(mut self, path: &str, field_type: FieldType, value: impl Into<Value>) -> Self {
        self.rules.push(FieldRule {
            path: path.to_string(),
            field_type,
            value: Some(value.into()),
        });
        self
    }

    /// `GET /products`
    pub fn product_list() -> Self {
        Self::new()
            .field("products", FieldType::Array)
            .field("total", FieldType::Number)
            .field("limit", FieldType::Number)
            .field("products[0].id", FieldType::Number)
            .field("products[0].title", FieldType::String)
            .field("products[0].price", FieldType::Number)
            .field("products[0].description", FieldType::String)
    }

    /// A created product echoing `sent` back unchanged.
    pub fn created_product(sent: &NewProduct) -> Self {
        Self::new()
            .field("id", FieldType::Number)
            .field_eq("title", FieldType::String, sent.title.as_str())
            .field_eq("description", FieldType::String, sent.description.as_str())
            .field_eq("price", FieldType::Number, sent.price)
            .field_eq("category", FieldType::String, sent.category.as_str())
    }

    /// Body of an unknown route, when the server sends one.
    pub fn route_not_found() -> Self {
        Self::new().field_eq("message", FieldType::String, "Route not found")
    }

    /// Body of a rejected product.
    pub fn rejection() -> Self {
        Self::new().field("error", FieldType::String)
    }

    pub fn validate(&self, body: &Value) -> ValidationResult {
        let mut result = ValidationResult::success();

        for rule in &self.rules {
            let Some(actual) = lookup(body, &rule.path) else {
                result.add_error(ValidationError {
                    error_type: ViolationType::MissingField,
                    message: format!("missing field '{}'", rule.path),
                    field_path: rule.path.clone(),
                });
                continue;
            };

            if !rule.field_type.matches(actual) {
                result.add_error(ValidationError {
                    error_type: ViolationType::TypeMismatch,
                    message: format!(
                        "field '{}' should be {}, got {}",
                        rule.path,
                        rule.field_type.name(),
                        type_of(actual)
                    ),
                    field_path: rule.path.clone(),
                });
                continue;
            }

            if let Some(expected) = &rule.value {
                if !same_value(expected, actual) {
                    result.add_error(ValidationError {
                        error_type: ViolationType::UnexpectedValue,
                        message: format!(
                            "field '{}' should be {}, got {}",
                            rule.path, expected, actual
                        ),
                        field_path: rule.path.clone(),
                    });
                }
            }
        }

        result
    }

    /// Validate and convert violations into an assertion failure.
    pub fn check(&self, body: &Value) -> Result<()> {
        self.validate(body).into_result()
    }
}

// Numbers compare by value so `100` and `100.0` agree.
fn same_value(expected: &Value, actual: &Value) -> bool {
    match (expected.as_f64(), actual.as_f64()) {
        (Some(a), Some(b)) if expected.is_number() && actual.is_number() => a == b,
        _ => expected == actual,
    }
}

/// Resolve `a.b[0].c` inside `root`.
fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = root;
    for segment in path.split('.') {
        let (key, indices) = match segment.find('[') {
            Some(pos) => (&segment[..pos], &segment[pos..]),
            None => (segment, ""),
        };
        if !key.is_empty() {
            current = current.get(key)?;
        }
        for index in indices
            .split(|c: char| c == '[' || c == ']')
            .filter(|s| !s.is_empty())
        {
            current = current.get(index.parse::<usize>().ok()?)?;
        }
    }
    Some(current)
}
