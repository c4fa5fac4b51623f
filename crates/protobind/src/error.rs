use std::fmt;

use prost_reflect::FieldDescriptor;
use serde_json::Value;
use thiserror::Error;

/// The kind of JSON token a value starts with, named the way streaming JSON
/// parsers report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonToken {
    StartObject,
    StartArray,
    ValueString,
    ValueNumberInt,
    ValueNumberFloat,
    ValueTrue,
    ValueFalse,
    ValueNull,
}

impl JsonToken {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonToken::StartObject,
            Value::Array(_) => JsonToken::StartArray,
            Value::String(_) => JsonToken::ValueString,
            Value::Number(n) if n.is_f64() => JsonToken::ValueNumberFloat,
            Value::Number(_) => JsonToken::ValueNumberInt,
            Value::Bool(true) => JsonToken::ValueTrue,
            Value::Bool(false) => JsonToken::ValueFalse,
            Value::Null => JsonToken::ValueNull,
        }
    }
}

impl fmt::Display for JsonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonToken::StartObject => "START_OBJECT",
            JsonToken::StartArray => "START_ARRAY",
            JsonToken::ValueString => "VALUE_STRING",
            JsonToken::ValueNumberInt => "VALUE_NUMBER_INT",
            JsonToken::ValueNumberFloat => "VALUE_NUMBER_FLOAT",
            JsonToken::ValueTrue => "VALUE_TRUE",
            JsonToken::ValueFalse => "VALUE_FALSE",
            JsonToken::ValueNull => "VALUE_NULL",
        };
        f.write_str(name)
    }
}

/// Failure to bind a JSON tree to a protobuf message or back.
///
/// Every variant that concerns a single field carries the field's full name.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindingError {
    /// The input is well-formed JSON but its shape does not fit the field.
    #[error("{message}")]
    InputMismatch { field: String, message: String },

    #[error("unexpected token ({found}), expected {expected}: {message}")]
    WrongToken {
        field: String,
        expected: JsonToken,
        found: JsonToken,
        message: String,
    },

    #[error("cannot deserialize value of type {target} from string {value:?}: {reason}")]
    InvalidString {
        field: String,
        target: String,
        value: String,
        reason: String,
    },

    #[error("cannot deserialize value of type {target} from number {value}: {reason}")]
    InvalidNumber {
        field: String,
        target: String,
        value: String,
        reason: String,
    },

    #[error("unrecognized field {name:?} (message {message}), not marked as ignorable")]
    UnknownProperty { message: String, name: String },

    /// The message could not be converted to or from its protobuf form.
    #[error("malformed {message}: {reason}")]
    Malformed { message: String, reason: String },

    #[error("malformed JSON: {0}")]
    Json(String),
}

impl BindingError {
    pub(crate) fn input_mismatch(field: &FieldDescriptor, message: impl Into<String>) -> Self {
        BindingError::InputMismatch {
            field: field.full_name().to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn wrong_token(
        field: impl Into<String>,
        expected: JsonToken,
        found: &Value,
        message: impl Into<String>,
    ) -> Self {
        BindingError::WrongToken {
            field: field.into(),
            expected,
            found: JsonToken::of(found),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_string(
        field: impl Into<String>,
        target: impl Into<String>,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        BindingError::InvalidString {
            field: field.into(),
            target: target.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_number(
        field: impl Into<String>,
        target: impl Into<String>,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        BindingError::InvalidNumber {
            field: field.into(),
            target: target.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>, reason: impl fmt::Display) -> Self {
        BindingError::Malformed {
            message: message.into(),
            reason: reason.to_string(),
        }
    }

    /// Full name of the field the error concerns, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            BindingError::InputMismatch { field, .. }
            | BindingError::WrongToken { field, .. }
            | BindingError::InvalidString { field, .. }
            | BindingError::InvalidNumber { field, .. } => Some(field),
            BindingError::UnknownProperty { .. }
            | BindingError::Malformed { .. }
            | BindingError::Json(_) => None,
        }
    }
}

impl From<serde_json::Error> for BindingError {
    fn from(err: serde_json::Error) -> Self {
        BindingError::Json(err.to_string())
    }
}
