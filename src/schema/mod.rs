//! Structured-output contracts for model responses.
//!
//! The model is asked to answer with a single JSON object. Parsing happens in
//! two steps: locate a JSON value inside the raw text, then validate it field
//! by field against the expected shape. Validation is strict about types and
//! enum values and ignores unknown fields.

mod decision;
mod response;

use serde_json::{Map, Value};
use thiserror::Error;

pub use decision::{Action, AgentDecision};
pub use response::ResearchResponse;

/// Reasons a model response does not conform to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("no JSON object found in model output")]
    NoJson,

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` has wrong type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` has invalid value `{value}`")]
    InvalidEnumValue { field: &'static str, value: String },
}

/// Render the instruction block that tells the model which JSON shape to emit.
pub(crate) fn render_format_instructions(schema: &Value) -> String {
    let schema = serde_json::to_string(schema).unwrap_or_default();
    format!(
        "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\n\
         As an example, for the schema {{\"properties\": {{\"foo\": {{\"title\": \"Foo\", \"description\": \"a list of strings\", \"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"foo\"]}}\n\
         the object {{\"foo\": [\"bar\", \"baz\"]}} is a well-formatted instance of the schema. \
         The object {{\"properties\": {{\"foo\": [\"bar\", \"baz\"]}}}} is not well-formatted.\n\n\
         Here is the output schema:\n```\n{schema}\n```"
    )
}

/// Locate the JSON object in a model response and return its fields.
pub(crate) fn parse_object(content: &str) -> Result<Map<String, Value>, SchemaError> {
    match extract_json(content).ok_or(SchemaError::NoJson)? {
        Value::Object(map) => Ok(map),
        other => Err(SchemaError::NotAnObject(json_type(&other))),
    }
}

/// Find a JSON value in free-form model output.
///
/// Tries, in order: the whole trimmed text, the body of a fenced code block,
/// and the span from the first `{` to the last `}`.
fn extract_json(content: &str) -> Option<Value> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(start) = trimmed.find("```") {
        let fenced = &trimmed[start + 3..];
        let fenced = fenced
            .strip_prefix("json")
            .or_else(|| fenced.strip_prefix("JSON"))
            .unwrap_or(fenced);
        if let Some(end) = fenced.find("```") {
            if let Ok(value) = serde_json::from_str::<Value>(fenced[..end].trim()) {
                return Some(value);
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Some(value);
            }
        }
    }

    None
}

pub(crate) fn required_string(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<String, SchemaError> {
    match map.get(field) {
        None | Some(Value::Null) => Err(SchemaError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::WrongType {
            field,
            expected: "string",
        }),
    }
}

pub(crate) fn optional_string(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, SchemaError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SchemaError::WrongType {
            field,
            expected: "string or null",
        }),
    }
}

pub(crate) fn required_string_list(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, SchemaError> {
    let wrong_type = SchemaError::WrongType {
        field,
        expected: "array of strings",
    };
    match map.get(field) {
        None | Some(Value::Null) => Err(SchemaError::MissingField { field }),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or(wrong_type.clone()))
            .collect(),
        Some(_) => Err(wrong_type),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
