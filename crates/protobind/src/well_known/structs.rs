use prost_reflect::{DynamicMessage, MessageDescriptor, ReflectMessage};
use serde_json::Value;

use super::{known_field, set};
use crate::error::{BindingError, JsonToken};
use crate::reader::FieldReader;
use crate::writer::FieldWriter;

pub(super) fn read_struct(
    reader: &FieldReader<'_>,
    desc: &MessageDescriptor,
    json: &Value,
) -> Result<DynamicMessage, BindingError> {
    let mut message = DynamicMessage::new(desc.clone());
    let field = known_field(desc, "fields")?;
    let entries = reader.read_map(&field, json)?;
    if !entries.is_empty() {
        set(
            &mut message,
            &field,
            prost_reflect::Value::Map(entries.into_iter().collect()),
        )?;
    }
    Ok(message)
}

/// Reads any JSON value, storing it in the matching `kind` field.
pub(super) fn read_value(
    reader: &FieldReader<'_>,
    desc: &MessageDescriptor,
    json: &Value,
) -> Result<DynamicMessage, BindingError> {
    let (name, value) = match json {
        Value::Null => return null_value(desc),
        Value::Bool(b) => ("bool_value", prost_reflect::Value::Bool(*b)),
        Value::Number(n) => {
            let number = n.as_f64().ok_or_else(|| {
                BindingError::invalid_number(desc.full_name(), "double", n, "not representable")
            })?;
            ("number_value", prost_reflect::Value::F64(number))
        }
        Value::String(s) => ("string_value", prost_reflect::Value::String(s.clone())),
        Value::Array(_) => {
            let field = known_field(desc, "list_value")?;
            let list = message_type(&field, desc)?;
            ("list_value", prost_reflect::Value::Message(read_list(reader, &list, json)?))
        }
        Value::Object(_) => {
            let field = known_field(desc, "struct_value")?;
            let object = message_type(&field, desc)?;
            ("struct_value", prost_reflect::Value::Message(read_struct(reader, &object, json)?))
        }
    };
    let mut message = DynamicMessage::new(desc.clone());
    let field = known_field(desc, name)?;
    set(&mut message, &field, value)?;
    Ok(message)
}

pub(super) fn read_list(
    reader: &FieldReader<'_>,
    desc: &MessageDescriptor,
    json: &Value,
) -> Result<DynamicMessage, BindingError> {
    let mut message = DynamicMessage::new(desc.clone());
    let field = known_field(desc, "values")?;
    let values = match json {
        Value::Array(_) | Value::Null => reader.read_array(&field, json)?,
        other => {
            return Err(BindingError::wrong_token(
                desc.full_name(),
                JsonToken::StartArray,
                other,
                format!("cannot read {} out of {} token", desc.full_name(), JsonToken::of(other)),
            ))
        }
    };
    if !values.is_empty() {
        set(&mut message, &field, prost_reflect::Value::List(values))?;
    }
    Ok(message)
}

/// A `Value` holding `NULL_VALUE`.
pub(super) fn null_value(desc: &MessageDescriptor) -> Result<DynamicMessage, BindingError> {
    let mut message = DynamicMessage::new(desc.clone());
    let field = known_field(desc, "null_value")?;
    set(&mut message, &field, prost_reflect::Value::EnumNumber(0))?;
    Ok(message)
}

pub(super) fn write_struct(
    writer: &FieldWriter<'_>,
    message: &DynamicMessage,
) -> Result<Value, BindingError> {
    let field = known_field(&message.descriptor(), "fields")?;
    writer.write_field(&field, &message.get_field(&field))
}

/// Writes whichever `kind` field is set, or `null` when none is.
pub(super) fn write_value(
    writer: &FieldWriter<'_>,
    message: &DynamicMessage,
) -> Result<Value, BindingError> {
    match message.fields().next() {
        Some((field, value)) => writer.write_field(&field, value),
        None => Ok(Value::Null),
    }
}

pub(super) fn write_list(
    writer: &FieldWriter<'_>,
    message: &DynamicMessage,
) -> Result<Value, BindingError> {
    let field = known_field(&message.descriptor(), "values")?;
    writer.write_field(&field, &message.get_field(&field))
}

fn message_type(
    field: &prost_reflect::FieldDescriptor,
    parent: &MessageDescriptor,
) -> Result<MessageDescriptor, BindingError> {
    field.kind().as_message().cloned().ok_or_else(|| {
        BindingError::malformed(parent.full_name(), format_args!("{} is not a message field", field.name()))
    })
}
