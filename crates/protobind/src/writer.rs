//! Message to JSON binding.

use std::cmp::Ordering;
use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use prost_reflect::{
    DynamicMessage, EnumDescriptor, FieldDescriptor, MapKey, ReflectMessage, Value as ProtoValue,
};
use serde_json::{Map, Number, Value};

use crate::error::BindingError;
use crate::options::WriteOptions;
use crate::registry::{CodecCache, MessageCodec};
use crate::well_known::{self, null_value};

/// Writes [`DynamicMessage`]s as JSON trees.
///
/// Objects are keyed by JSON field names and list fields in declaration order.
/// Unset fields are omitted unless [`WriteOptions::include_default_values`] is
/// on. Map entries are written in key order so output is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FieldWriter<'a> {
    options: &'a WriteOptions,
    cache: &'a CodecCache,
}

impl<'a> FieldWriter<'a> {
    pub fn new(options: &'a WriteOptions, cache: &'a CodecCache) -> Self {
        Self { options, cache }
    }

    pub fn options(&self) -> &WriteOptions {
        self.options
    }

    pub fn write_message(&self, message: &DynamicMessage) -> Result<Value, BindingError> {
        self.write_with(MessageCodec::resolve(&message.descriptor()), message)
    }

    fn write_with(&self, codec: MessageCodec, message: &DynamicMessage) -> Result<Value, BindingError> {
        match codec {
            MessageCodec::WellKnown(kind) => well_known::write(kind, self, message),
            MessageCodec::Generic => self.write_object(message),
        }
    }

    fn write_object(&self, message: &DynamicMessage) -> Result<Value, BindingError> {
        let mut object = Map::new();
        for field in message.descriptor().fields() {
            let present = message.has_field(&field);
            if !present && !(self.options.include_default_values && !field.supports_presence()) {
                continue;
            }
            let key = if self.options.preserve_proto_field_names {
                field.name()
            } else {
                field.json_name()
            };
            let value = self.write_field(&field, &message.get_field(&field))?;
            object.insert(key.to_string(), value);
        }
        Ok(Value::Object(object))
    }

    /// Writes the complete value of `field`: an array for lists, an object for
    /// maps, a single JSON value otherwise.
    pub fn write_field(&self, field: &FieldDescriptor, value: &ProtoValue) -> Result<Value, BindingError> {
        match value {
            ProtoValue::List(items) => self.write_list(field, items),
            ProtoValue::Map(entries) => self.write_map(field, entries),
            single => self.write_singular(field, single),
        }
    }

    pub fn write_list(&self, field: &FieldDescriptor, items: &[ProtoValue]) -> Result<Value, BindingError> {
        items
            .iter()
            .map(|item| self.write_singular(field, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    pub fn write_map(
        &self,
        field: &FieldDescriptor,
        entries: &HashMap<MapKey, ProtoValue>,
    ) -> Result<Value, BindingError> {
        let Some(entry) = field.kind().as_message().cloned() else {
            return Err(BindingError::input_mismatch(
                field,
                format!("{} is not a map field", field.full_name()),
            ));
        };
        let value_field = entry.map_entry_value_field();

        let mut sorted: Vec<_> = entries.iter().collect();
        sorted.sort_by(|(a, _), (b, _)| compare_keys(a, b));

        let mut object = Map::new();
        for (key, value) in sorted {
            object.insert(key_text(key), self.write_singular(&value_field, value)?);
        }
        Ok(Value::Object(object))
    }

    /// Writes one element of `field`'s type.
    pub fn write_singular(&self, field: &FieldDescriptor, value: &ProtoValue) -> Result<Value, BindingError> {
        let json = match value {
            ProtoValue::Bool(b) => Value::Bool(*b),
            ProtoValue::I32(v) => Value::from(*v),
            ProtoValue::U32(v) => Value::from(*v),
            ProtoValue::I64(v) if self.options.int64_as_string => Value::String(v.to_string()),
            ProtoValue::I64(v) => Value::from(*v),
            ProtoValue::U64(v) if self.options.int64_as_string => Value::String(v.to_string()),
            ProtoValue::U64(v) => Value::from(*v),
            // the shortest decimal for the f32, not the widened f64
            ProtoValue::F32(v) => float(v.to_string().parse().unwrap_or(f64::from(*v))),
            ProtoValue::F64(v) => float(*v),
            ProtoValue::String(s) => Value::String(s.clone()),
            ProtoValue::Bytes(b) => Value::String(STANDARD.encode(b)),
            ProtoValue::EnumNumber(number) => self.write_enum(field, *number),
            ProtoValue::Message(message) => {
                let codec = self.cache.codec_for_field(field, &message.descriptor());
                self.write_with(codec, message)?
            }
            ProtoValue::List(_) | ProtoValue::Map(_) => return self.write_field(field, value),
        };
        Ok(json)
    }

    fn write_enum(&self, field: &FieldDescriptor, number: i32) -> Value {
        let Some(desc) = field.kind().as_enum().cloned() else {
            return Value::from(number);
        };
        if null_value::is_null_value(&desc) {
            return Value::Null;
        }
        if self.options.enums_as_ints {
            return Value::from(number);
        }
        enum_name(&desc, number).map_or(Value::from(number), Value::String)
    }
}

fn enum_name(desc: &EnumDescriptor, number: i32) -> Option<String> {
    desc.get_value(number).map(|v| v.name().to_string())
}

/// `NaN` and the infinities have no JSON number form and are written as strings.
fn float(v: f64) -> Value {
    if v.is_nan() {
        Value::String("NaN".to_string())
    } else if v.is_infinite() {
        let text = if v > 0.0 { "Infinity" } else { "-Infinity" };
        Value::String(text.to_string())
    } else {
        Number::from_f64(v).map_or(Value::Null, Value::Number)
    }
}

fn key_text(key: &MapKey) -> String {
    match key {
        MapKey::Bool(b) => b.to_string(),
        MapKey::I32(v) => v.to_string(),
        MapKey::I64(v) => v.to_string(),
        MapKey::U32(v) => v.to_string(),
        MapKey::U64(v) => v.to_string(),
        MapKey::String(s) => s.clone(),
    }
}

fn compare_keys(a: &MapKey, b: &MapKey) -> Ordering {
    fn integer(key: &MapKey) -> Option<i128> {
        match key {
            MapKey::I32(v) => Some(i128::from(*v)),
            MapKey::I64(v) => Some(i128::from(*v)),
            MapKey::U32(v) => Some(i128::from(*v)),
            MapKey::U64(v) => Some(i128::from(*v)),
            MapKey::Bool(b) => Some(i128::from(*b)),
            MapKey::String(_) => None,
        }
    }
    match (integer(a), integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => key_text(a).cmp(&key_text(b)),
    }
}
