use serde::Serialize;
use serde_json::Value;

/// Body returned by `POST /1/log`.
///
/// Fields are read one at a time so an odd-typed field never hides the
/// others. Anything that is not an object reads as an empty, unsuccessful
/// response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogResponse {
    pub success: bool,
    pub id: Option<String>,
    pub url: Option<String>,
    pub raw: Option<String>,
    pub error: Option<String>,
}

impl LogResponse {
    pub fn from_value(value: &Value) -> Self {
        Self {
            success: value.get("success").and_then(Value::as_bool).unwrap_or(false),
            id: scalar_field(value, "id"),
            url: scalar_field(value, "url"),
            raw: scalar_field(value, "raw"),
            error: scalar_field(value, "error"),
        }
    }
}

/// String value of `key`; numbers are accepted and rendered as text
fn scalar_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A log accepted by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedLog {
    pub url: String,
    pub id: String,
}
