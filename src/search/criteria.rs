// Strict validation of untyped search request bodies

use serde_json::Value;

use crate::models::Platform;

/// Validation failure carrying the single message surfaced to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Platform constraint of a search; `""` on the wire means any platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFilter {
    Any,
    Only(Platform),
}

/// Validated, typed search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Substring to look for in game names; empty means no name constraint.
    pub name: String,
    pub platform: PlatformFilter,
}

/// Validate a raw request body into [`SearchCriteria`].
///
/// Rules run in a fixed order and only the first failure is reported: the
/// body must be an object, then `name`, then `platform`. Unknown fields are
/// ignored.
pub fn validate(raw: &Value) -> Result<SearchCriteria, ValidationError> {
    let body = raw.as_object().ok_or_else(|| {
        ValidationError::new(format!("Expected object, received {}", type_name(raw)))
    })?;

    let name = match body.get("name") {
        None => return Err(ValidationError::new("name field is required")),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ValidationError::new("name field must be a string")),
    };

    let platform = match body.get("platform") {
        None => return Err(ValidationError::new("platform field is required")),
        Some(Value::String(s)) => parse_platform_filter(s)?,
        Some(_) => {
            return Err(ValidationError::new(
                "platform field must be one of: ios, android",
            ))
        }
    };

    Ok(SearchCriteria { name, platform })
}

fn parse_platform_filter(raw: &str) -> Result<PlatformFilter, ValidationError> {
    match raw {
        "" => Ok(PlatformFilter::Any),
        "ios" => Ok(PlatformFilter::Only(Platform::Ios)),
        "android" => Ok(PlatformFilter::Only(Platform::Android)),
        other => Err(ValidationError::new(format!(
            "Invalid enum value. Expected '' | 'ios' | 'android', received '{other}'"
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
