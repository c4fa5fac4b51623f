use prost_reflect::{DynamicMessage, MessageDescriptor, ReflectMessage};
use protobind_util::naming::{camel_to_snake, snake_to_camel};
use serde_json::Value;

use super::{known_field, set};
use crate::error::{BindingError, JsonToken};

/// Reads `"fooBar,baz.quxQuux"` into the paths `foo_bar` and `baz.qux_quux`.
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
                "field masks are written as comma-separated paths",
            ))
        }
    };
    let paths: Vec<prost_reflect::Value> = text
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(|path| prost_reflect::Value::String(convert_path(path, camel_to_snake)))
        .collect();
    if !paths.is_empty() {
        let field = known_field(desc, "paths")?;
        set(&mut message, &field, prost_reflect::Value::List(paths))?;
    }
    Ok(message)
}

pub(super) fn write(message: &DynamicMessage) -> Result<Value, BindingError> {
    let field = known_field(&message.descriptor(), "paths")?;
    let value = message.get_field(&field);
    let paths: Vec<String> = value
        .as_list()
        .unwrap_or_default()
        .iter()
        .filter_map(prost_reflect::Value::as_str)
        .map(|path| convert_path(path, snake_to_camel))
        .collect();
    Ok(Value::String(paths.join(",")))
}

fn convert_path(path: &str, convert: fn(&str) -> String) -> String {
    path.split('.').map(convert).collect::<Vec<_>>().join(".")
}
