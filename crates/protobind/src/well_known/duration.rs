use prost_reflect::{DynamicMessage, MessageDescriptor};
use serde_json::Value;

use crate::error::{BindingError, JsonToken};

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
                "durations are written as strings such as \"1.5s\"",
            ))
        }
    };
    let duration: prost_types::Duration = text
        .parse()
        .map_err(|err| BindingError::invalid_string(desc.full_name(), desc.full_name(), text, format!("{err}")))?;
    message
        .transcode_from(&duration)
        .map_err(|err| BindingError::malformed(desc.full_name(), err))?;
    Ok(message)
}

pub(super) fn write(message: &DynamicMessage) -> Result<Value, BindingError> {
    let duration: prost_types::Duration = message
        .transcode_to()
        .map_err(|err| BindingError::malformed("google.protobuf.Duration", err))?;
    Ok(Value::String(duration.to_string()))
}
