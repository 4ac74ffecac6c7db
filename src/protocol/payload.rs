//! The sole input gate before a request leaves the client.

use serde_json::Value;
use thiserror::Error;

/// Fields every chat request must carry as strings.
const REQUIRED_STRING_FIELDS: [&str; 3] = ["to_username", "from_username", "text"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("payload must be a keyed object, not a sequence, primitive, or null")]
    NotAnObject,
    #[error("payload is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("payload field `{0}` must be a string")]
    FieldNotAString(&'static str),
    #[error("payload could not be serialized: {0}")]
    Serialize(String),
}

/// Canonical serialized form of a validated payload, suitable for wire
/// transmission. Round-trips string/number/null/boolean/nested-object
/// fields losslessly; key order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedPayload(String);

impl SerializedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Accepts any keyed (non-array) object and produces its canonical
/// serialization. Sequences, primitives, and null are rejected.
pub fn validate(value: &Value) -> Result<SerializedPayload, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    serde_json::to_string(object)
        .map(SerializedPayload)
        .map_err(|error| ValidationError::Serialize(error.to_string()))
}

/// Schema-checked gate for chat submissions: the generic object check
/// plus presence and type of the required request fields.
pub fn validate_chat_request(value: &Value) -> Result<SerializedPayload, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    for field in REQUIRED_STRING_FIELDS {
        match object.get(field) {
            None => return Err(ValidationError::MissingField(field)),
            Some(Value::String(_)) => {}
            Some(_) => return Err(ValidationError::FieldNotAString(field)),
        }
    }

    validate(value)
}
