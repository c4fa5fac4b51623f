use prost_reflect::{DynamicMessage, MessageDescriptor, ReflectMessage};
use serde_json::Value;

use super::{known_field, set};
use crate::error::BindingError;
use crate::reader::FieldReader;
use crate::writer::FieldWriter;

/// Reads the bare scalar into the wrapper's `value` field. `null` is the
/// empty wrapper whatever the null policy for primitives.
pub(super) fn read(
    reader: &FieldReader<'_>,
    desc: &MessageDescriptor,
    json: &Value,
) -> Result<DynamicMessage, BindingError> {
    let mut message = DynamicMessage::new(desc.clone());
    if json.is_null() {
        return Ok(message);
    }
    let field = known_field(desc, "value")?;
    if let Some(value) = reader.read_value(&field, json)? {
        set(&mut message, &field, value)?;
    }
    Ok(message)
}

/// Writes the wrapped scalar, even when it holds its default.
pub(super) fn write(writer: &FieldWriter<'_>, message: &DynamicMessage) -> Result<Value, BindingError> {
    let field = known_field(&message.descriptor(), "value")?;
    writer.write_field(&field, &message.get_field(&field))
}
