//! Request payload validation
//!
//! Payloads arrive as loose JSON written by browser forms, so numeric fields
//! are coerced before range checks:
//! - numbers are accepted as JSON numbers or as numeric strings
//! - integer fields accept integral floats (`5.0`) but not fractions (`5.5`)
//! - strings are trimmed; `name` and `sku` must stay non-empty
//!
//! Booleans are never coerced to numbers.

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{generate_id, NewProduct};

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Why a payload was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Body is not a JSON object
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// Required field is absent or null
    #[error("missing field '{0}'")]
    Missing(&'static str),

    /// Field has a JSON type that cannot be coerced
    #[error("field '{field}' must be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// String field is blank after trimming
    #[error("field '{0}' must not be empty")]
    Empty(&'static str),

    /// Numeric string could not be parsed
    #[error("field '{field}' is not a valid number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    /// Number is negative
    #[error("field '{0}' must not be negative")]
    Negative(&'static str),

    /// Number is NaN/infinite, fractional where an integer is required, or too large
    #[error("field '{0}' is out of range")]
    OutOfRange(&'static str),
}

impl NewProduct {
    /// Validate a creation payload.
    ///
    /// A missing, null or empty `id` is replaced by a random UUID.
    pub fn from_json(body: &Value) -> ValidationResult<Self> {
        let obj = as_object(body)?;

        let id = match obj.get("id") {
            None | Some(Value::Null) => generate_id(),
            Some(Value::String(s)) if s.is_empty() => generate_id(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(ValidationError::WrongType {
                    field: "id",
                    expected: "a string",
                    found: json_type_name(other),
                })
            }
        };

        Ok(Self {
            id,
            name: required_text(obj, "name")?,
            sku: required_text(obj, "sku")?,
            price: non_negative_float(obj, "price")?,
            quantity: non_negative_int(obj, "quantity")?,
            min_stock: non_negative_int(obj, "minStock")?,
        })
    }
}

/// Validate the body of a quantity adjustment: `{"quantity": n}`.
pub fn parse_quantity(body: &Value) -> ValidationResult<u32> {
    non_negative_int(as_object(body)?, "quantity")
}

fn as_object(body: &Value) -> ValidationResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ValidationError::NotAnObject(json_type_name(body)))
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> ValidationResult<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(value) => Ok(value),
    }
}

fn required_text(obj: &Map<String, Value>, field: &'static str) -> ValidationResult<String> {
    match required(obj, field)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(ValidationError::Empty(field))
            } else {
                Ok(trimmed.to_string())
            }
        }
        other => Err(ValidationError::WrongType {
            field,
            expected: "a string",
            found: json_type_name(other),
        }),
    }
}

fn non_negative_float(obj: &Map<String, Value>, field: &'static str) -> ValidationResult<f64> {
    let value = match required(obj, field)? {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::OutOfRange(field))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::NotANumber {
                field,
                value: s.clone(),
            })?,
        other => {
            return Err(ValidationError::WrongType {
                field,
                expected: "a number",
                found: json_type_name(other),
            })
        }
    };

    if !value.is_finite() {
        return Err(ValidationError::OutOfRange(field));
    }
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

fn non_negative_int(obj: &Map<String, Value>, field: &'static str) -> ValidationResult<u32> {
    let value: i128 = match required(obj, field)? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i128::from(i)
            } else if let Some(u) = n.as_u64() {
                i128::from(u)
            } else {
                integral(n.as_f64().unwrap_or(f64::NAN), field)?
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| ValidationError::NotANumber {
                field,
                value: s.clone(),
            })?,
        other => {
            return Err(ValidationError::WrongType {
                field,
                expected: "an integer",
                found: json_type_name(other),
            })
        }
    };

    if value < 0 {
        return Err(ValidationError::Negative(field));
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange(field))
}

fn integral(value: f64, field: &'static str) -> ValidationResult<i128> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > u64::MAX as f64 {
        return Err(ValidationError::OutOfRange(field));
    }
    Ok(value as i128)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
