//! Adapters for the `google.protobuf` well-known types, which have a JSON form
//! of their own instead of a field-keyed object.
//!
//! | type | JSON form |
//! |------|-----------|
//! | `Duration` | `"1.500s"` |
//! | `Timestamp` | `"1972-01-01T10:00:20.021Z"` |
//! | `Struct` | an object of JSON values |
//! | `Value` | any JSON value |
//! | `ListValue` | an array of JSON values |
//! | `FieldMask` | `"foo,bar.bazQux"` |
//! | wrappers | the wrapped scalar |
//! | `NullValue` | `null` |

mod duration;
mod field_mask;
pub(crate) mod null_value;
mod structs;
mod timestamp;
mod wrappers;

use prost_reflect::{DynamicMessage, FieldDescriptor, MessageDescriptor, ReflectMessage};
use serde_json::Value;

use crate::error::BindingError;
use crate::reader::FieldReader;
use crate::writer::FieldWriter;

pub use null_value::NULL_VALUE;

/// A `google.protobuf` message type with a dedicated JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownType {
    Duration,
    Timestamp,
    Struct,
    Value,
    ListValue,
    FieldMask,
    /// One of the nine scalar wrappers, such as `Int32Value`.
    Wrapper,
}

impl WellKnownType {
    pub fn from_full_name(name: &str) -> Option<Self> {
        let kind = match name {
            "google.protobuf.Duration" => WellKnownType::Duration,
            "google.protobuf.Timestamp" => WellKnownType::Timestamp,
            "google.protobuf.Struct" => WellKnownType::Struct,
            "google.protobuf.Value" => WellKnownType::Value,
            "google.protobuf.ListValue" => WellKnownType::ListValue,
            "google.protobuf.FieldMask" => WellKnownType::FieldMask,
            "google.protobuf.DoubleValue"
            | "google.protobuf.FloatValue"
            | "google.protobuf.Int64Value"
            | "google.protobuf.UInt64Value"
            | "google.protobuf.Int32Value"
            | "google.protobuf.UInt32Value"
            | "google.protobuf.BoolValue"
            | "google.protobuf.StringValue"
            | "google.protobuf.BytesValue" => WellKnownType::Wrapper,
            _ => return None,
        };
        Some(kind)
    }
}

pub(crate) fn read(
    kind: WellKnownType,
    reader: &FieldReader<'_>,
    desc: &MessageDescriptor,
    json: &Value,
) -> Result<DynamicMessage, BindingError> {
    match kind {
        WellKnownType::Duration => duration::read(desc, json),
        WellKnownType::Timestamp => timestamp::read(desc, json),
        WellKnownType::Struct => structs::read_struct(reader, desc, json),
        WellKnownType::Value => structs::read_value(reader, desc, json),
        WellKnownType::ListValue => structs::read_list(reader, desc, json),
        WellKnownType::FieldMask => field_mask::read(desc, json),
        WellKnownType::Wrapper => wrappers::read(reader, desc, json),
    }
}

pub(crate) fn write(
    kind: WellKnownType,
    writer: &FieldWriter<'_>,
    message: &DynamicMessage,
) -> Result<Value, BindingError> {
    match kind {
        WellKnownType::Duration => duration::write(message),
        WellKnownType::Timestamp => timestamp::write(message),
        WellKnownType::Struct => structs::write_struct(writer, message),
        WellKnownType::Value => structs::write_value(writer, message),
        WellKnownType::ListValue => structs::write_list(writer, message),
        WellKnownType::FieldMask => field_mask::write(message),
        WellKnownType::Wrapper => wrappers::write(writer, message),
    }
}

/// `google.protobuf.Value` reads `null` as a value with `null_value` set; every
/// other type leaves the field unset.
pub(crate) fn null_message(kind: WellKnownType, desc: &MessageDescriptor) -> Option<DynamicMessage> {
    match kind {
        WellKnownType::Value => structs::null_value(desc).ok(),
        _ => None,
    }
}

/// Looks up a field a well-known type is declared with.
fn known_field(desc: &MessageDescriptor, name: &str) -> Result<FieldDescriptor, BindingError> {
    desc.get_field_by_name(name).ok_or_else(|| {
        BindingError::malformed(desc.full_name(), format_args!("no field named {name:?}"))
    })
}

fn set(
    message: &mut DynamicMessage,
    field: &FieldDescriptor,
    value: prost_reflect::Value,
) -> Result<(), BindingError> {
    message
        .try_set_field(field, value)
        .map_err(|err| BindingError::malformed(message.descriptor().full_name(), err))
}
