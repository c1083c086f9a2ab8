//! Dump line framing and JSON field extraction.
//!
//! A dump line is `<ignored prefix><JSON object>`: the Open Library dumps
//! carry tab-separated type, key, revision and timestamp columns before the
//! record itself. Everything from the first `{` on is the payload.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::AppError;

pub type JsonObject = Map<String, Value>;

/// Failure confined to a single optional field of a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{field}`: {reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Why a single dump line did not produce a stored record
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("no JSON object on line")]
    NoPayload,

    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing or non-string `key`")]
    MissingKey,

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("store error: {0}")]
    Store(#[from] AppError),
}

impl RecordError {
    /// Store failures are counted apart from bad input
    pub fn is_store_failure(&self) -> bool {
        matches!(self, RecordError::Store(_))
    }
}

/// Slice of the line starting at the first `{`
pub fn payload(line: &str) -> Option<&str> {
    line.find('{').map(|start| &line[start..])
}

/// Frame a dump line and parse its payload as a JSON object.
///
/// Only the first JSON value is read; whatever follows it is ignored.
pub fn parse_line(line: &str) -> Result<JsonObject, RecordError> {
    let json = payload(line).ok_or(RecordError::NoPayload)?;
    let mut values = serde_json::Deserializer::from_str(json).into_iter::<Value>();
    match values.next() {
        Some(Ok(Value::Object(object))) => Ok(object),
        Some(Ok(_)) => Err(RecordError::NotAnObject),
        Some(Err(e)) => Err(RecordError::MalformedJson(e)),
        None => Err(RecordError::NoPayload),
    }
}

/// Lenient string read: scalars are rendered as text, anything else is empty.
///
/// Objects and arrays give `""`, not their JSON text.
pub fn opt_string(object: &JsonObject, field: &str) -> String {
    match object.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Required string `key` with `prefix` removed
pub fn required_key(object: &JsonObject, prefix: &str) -> Result<String, RecordError> {
    match object.get("key") {
        Some(Value::String(key)) => Ok(strip_prefix(key, prefix)),
        _ => Err(RecordError::MissingKey),
    }
}

pub fn strip_prefix(value: &str, prefix: &str) -> String {
    value.strip_prefix(prefix).unwrap_or(value).to_string()
}

/// Nested object under `field`, ignoring values of any other shape
pub fn opt_object<'a>(object: &'a JsonObject, field: &str) -> Option<&'a JsonObject> {
    object.get(field).and_then(Value::as_object)
}

/// Array under `field`, ignoring values of any other shape
pub fn opt_array<'a>(object: &'a JsonObject, field: &str) -> Option<&'a Vec<Value>> {
    object.get(field).and_then(Value::as_array)
}
