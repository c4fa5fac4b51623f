use prost_reflect::{DynamicMessage, MessageDescriptor};
use serde_json::Value;

use crate::error::{BindingError, JsonToken};

/// Reads an RFC 3339 timestamp.
pub(super) fn read(desc: &MessageDescriptor, json: &Value) -> Result<DynamicMessage, BindingError> {
    let mut message = DynamicMessage::new(desc.clone());
    let text = match json {
        Value::String(text) => text,
        Value::Null => return Ok(message),
        other => {
            return Err(BindingError::wrong_token(
                desc.full_name(),
                JsonToken::ValueString,
                other,
                "timestamps are written as RFC 3339 strings",
            ))
        }
    };
    let timestamp: prost_types::Timestamp = text
        .parse()
        .map_err(|err| BindingError::invalid_string(desc.full_name(), desc.full_name(), text, format!("{err}")))?;
    message
        .transcode_from(&timestamp)
        .map_err(|err| BindingError::malformed(desc.full_name(), err))?;
    Ok(message)
}

pub(super) fn write(message: &DynamicMessage) -> Result<Value, BindingError> {
    let timestamp: prost_types::Timestamp = message
        .transcode_to()
        .map_err(|err| BindingError::malformed("google.protobuf.Timestamp", err))?;
    Ok(Value::String(timestamp.to_string()))
}
