//! JSON to message binding.
//!
//! [`FieldReader`] walks a JSON tree against a message descriptor. Each field is
//! decoded according to its [`FieldType`]: scalars are coerced from numbers,
//! strings and booleans, enums are looked up by name or number, and nested
//! messages recurse through the codec resolved for the field.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use prost_reflect::{
    DynamicMessage, EnumDescriptor, FieldDescriptor, MapKey, MessageDescriptor,
    Value as ProtoValue,
};
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{BindingError, JsonToken};
use crate::field_type::{Cardinality, FieldType};
use crate::options::ReadOptions;
use crate::registry::{CodecCache, MessageCodec};
use crate::well_known::{self, null_value};

/// Reads JSON trees into [`DynamicMessage`]s.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    options: &'a ReadOptions,
    cache: &'a CodecCache,
}

impl<'a> FieldReader<'a> {
    pub fn new(options: &'a ReadOptions, cache: &'a CodecCache) -> Self {
        Self { options, cache }
    }

    pub fn options(&self) -> &ReadOptions {
        self.options
    }

    /// Reads a complete message of type `desc`.
    ///
    /// A JSON `null` reads as the empty message.
    pub fn read_message(
        &self,
        desc: &MessageDescriptor,
        json: &Value,
    ) -> Result<DynamicMessage, BindingError> {
        self.read_with(MessageCodec::resolve(desc), desc, json)
    }

    fn read_with(
        &self,
        codec: MessageCodec,
        desc: &MessageDescriptor,
        json: &Value,
    ) -> Result<DynamicMessage, BindingError> {
        match codec {
            MessageCodec::WellKnown(kind) => well_known::read(kind, self, desc, json),
            MessageCodec::Generic => self.read_object(desc, json),
        }
    }

    fn read_object(
        &self,
        desc: &MessageDescriptor,
        json: &Value,
    ) -> Result<DynamicMessage, BindingError> {
        let mut message = DynamicMessage::new(desc.clone());
        let object = match json {
            Value::Object(object) => object,
            Value::Null => return Ok(message),
            other => {
                return Err(BindingError::wrong_token(
                    desc.full_name(),
                    JsonToken::StartObject,
                    other,
                    format!(
                        "cannot read {} out of {} token",
                        desc.full_name(),
                        JsonToken::of(other)
                    ),
                ))
            }
        };

        for (key, value) in object {
            let Some(field) = desc
                .get_field_by_json_name(key)
                .or_else(|| desc.get_field_by_name(key))
            else {
                if self.options.fail_on_unknown_properties {
                    return Err(BindingError::UnknownProperty {
                        message: desc.full_name().to_string(),
                        name: key.clone(),
                    });
                }
                debug!(message = desc.full_name(), property = %key, "skipping unknown property");
                continue;
            };

            let read = match Cardinality::of(&field) {
                Cardinality::Map => {
                    let entries = self.read_map(&field, value)?;
                    (!entries.is_empty()).then(|| ProtoValue::Map(entries.into_iter().collect()))
                }
                Cardinality::List => {
                    let values = self.read_array(&field, value)?;
                    (!values.is_empty()).then_some(ProtoValue::List(values))
                }
                Cardinality::Singular => self
                    .read_value(&field, value)?
                    // fields without presence hold their default by being unset
                    .filter(|v| field.supports_presence() || !v.is_default(&field.kind())),
            };
            if let Some(read) = read {
                message
                    .try_set_field(&field, read)
                    .map_err(|err| BindingError::input_mismatch(&field, err.to_string()))?;
            }
        }
        Ok(message)
    }

    /// Reads one value of `field`'s element type.
    ///
    /// Returns `None` when the input stands for "no value": `null` for most
    /// fields, or an enum name or number that may be ignored.
    pub fn read_value(
        &self,
        field: &FieldDescriptor,
        json: &Value,
    ) -> Result<Option<ProtoValue>, BindingError> {
        let field_type = FieldType::of(field);

        if json.is_array() {
            if let FieldType::Message(desc) = &field_type {
                let codec = self.cache.codec_for_field(field, desc);
                if codec.accepts_array() {
                    return self
                        .read_with(codec, desc, json)
                        .map(|m| Some(ProtoValue::Message(m)));
                }
            }
            return Err(BindingError::input_mismatch(
                field,
                format!(
                    "Encountered START_ARRAY token for non-repeated field {}",
                    field.full_name()
                ),
            ));
        }

        if json.is_null() {
            return self.read_null(field, &field_type);
        }

        let value = match &field_type {
            FieldType::Int32 => {
                ProtoValue::I32(narrow(field, &field_type, integral(field, &field_type, json)?)?)
            }
            FieldType::UInt32 => {
                ProtoValue::U32(narrow(field, &field_type, integral(field, &field_type, json)?)?)
            }
            FieldType::Int64 => {
                ProtoValue::I64(narrow(field, &field_type, integral(field, &field_type, json)?)?)
            }
            FieldType::UInt64 => {
                ProtoValue::U64(narrow(field, &field_type, integral(field, &field_type, json)?)?)
            }
            FieldType::Float => {
                ProtoValue::F32(single(field, &field_type, floating(field, &field_type, json)?)?)
            }
            FieldType::Double => ProtoValue::F64(floating(field, &field_type, json)?),
            FieldType::Bool => ProtoValue::Bool(boolean(field, json)?),
            FieldType::String => ProtoValue::String(string(field, json)?),
            FieldType::Bytes => ProtoValue::Bytes(bytes(field, json)?.into()),
            FieldType::Enum(desc) => return self.read_enum(field, desc, json),
            FieldType::Message(desc) => {
                let codec = self.cache.codec_for_field(field, desc);
                ProtoValue::Message(self.read_with(codec, desc, json)?)
            }
        };
        Ok(Some(value))
    }

    fn read_null(
        &self,
        field: &FieldDescriptor,
        field_type: &FieldType,
    ) -> Result<Option<ProtoValue>, BindingError> {
        match field_type {
            t if t.is_primitive() && self.options.fail_on_null_for_primitives => {
                Err(BindingError::input_mismatch(
                    field,
                    format!(
                        "cannot map null into {} field {} (disable fail_on_null_for_primitives to allow)",
                        t.name(),
                        field.full_name()
                    ),
                ))
            }
            FieldType::Enum(desc) if null_value::is_null_value(desc) => {
                Ok(Some(ProtoValue::EnumNumber(0)))
            }
            FieldType::Message(desc) => {
                let codec = self.cache.codec_for_field(field, desc);
                Ok(codec.null_message(desc).map(ProtoValue::Message))
            }
            _ => Ok(None),
        }
    }

    fn read_enum(
        &self,
        field: &FieldDescriptor,
        desc: &EnumDescriptor,
        json: &Value,
    ) -> Result<Option<ProtoValue>, BindingError> {
        if null_value::is_null_value(desc) {
            return Err(null_value::reject(field, json));
        }
        match json {
            Value::String(name) => match desc.get_value_by_name(name) {
                Some(value) => Ok(Some(ProtoValue::EnumNumber(value.number()))),
                None if self.options.ignores_enum_name(name.trim()) => {
                    debug!(field = field.full_name(), value = %name, "reading unknown enum name as absent");
                    Ok(None)
                }
                None => Err(BindingError::invalid_string(
                    field.full_name(),
                    desc.full_name(),
                    name,
                    format!("value not one of declared names {}", declared_names(desc)),
                )),
            },
            Value::Number(n) if n.is_i64() || n.is_u64() => {
                if self.options.fail_on_numbers_for_enums {
                    return Err(BindingError::wrong_token(
                        field.full_name(),
                        JsonToken::ValueString,
                        json,
                        "numbers are not accepted for enums (disable fail_on_numbers_for_enums to allow)",
                    ));
                }
                let number = n.as_i64().and_then(|v| i32::try_from(v).ok());
                match number.and_then(|v| desc.get_value(v)) {
                    Some(value) => Ok(Some(ProtoValue::EnumNumber(value.number()))),
                    None if self.options.read_unknown_enum_values_as_null => {
                        debug!(field = field.full_name(), value = %n, "reading unknown enum number as absent");
                        Ok(None)
                    }
                    None => Err(BindingError::invalid_number(
                        field.full_name(),
                        desc.full_name(),
                        n,
                        format!("value not one of declared numbers {}", declared_numbers(desc)),
                    )),
                }
            }
            other => Err(BindingError::wrong_token(
                field.full_name(),
                JsonToken::ValueString,
                other,
                format!("cannot read enum {} out of {} token", desc.full_name(), JsonToken::of(other)),
            )),
        }
    }

    /// Reads the elements of a repeated field.
    ///
    /// `null` is the empty list and elements that read as no value are dropped.
    pub fn read_array(
        &self,
        field: &FieldDescriptor,
        json: &Value,
    ) -> Result<Vec<ProtoValue>, BindingError> {
        match json {
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(value) = self.read_value(field, item)? {
                        values.push(value);
                    }
                }
                Ok(values)
            }
            Value::Null => Ok(Vec::new()),
            other if self.options.accept_single_value_as_array => {
                Ok(self.read_value(field, other)?.into_iter().collect())
            }
            other => Err(BindingError::wrong_token(
                field.full_name(),
                JsonToken::StartArray,
                other,
                format!("expected an array for repeated field {}", field.full_name()),
            )),
        }
    }

    /// Reads the entries of a map field in the order they appear.
    ///
    /// `null` is the empty map and entries whose value reads as no value are
    /// dropped.
    pub fn read_map(
        &self,
        field: &FieldDescriptor,
        json: &Value,
    ) -> Result<Vec<(MapKey, ProtoValue)>, BindingError> {
        let object = match json {
            Value::Object(object) => object,
            Value::Null => return Ok(Vec::new()),
            other => {
                return Err(BindingError::wrong_token(
                    field.full_name(),
                    JsonToken::StartObject,
                    other,
                    format!("cannot read map field out of {} token", JsonToken::of(other)),
                ))
            }
        };
        let Some(entry) = field.kind().as_message().cloned() else {
            return Err(BindingError::input_mismatch(
                field,
                format!("{} is not a map field", field.full_name()),
            ));
        };
        let key_field = entry.map_entry_key_field();
        let value_field = entry.map_entry_value_field();

        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            let key = self.read_key(&key_field, key)?;
            if let Some(value) = self.read_value(&value_field, value)? {
                entries.push((key, value));
            }
        }
        Ok(entries)
    }

    /// Parses an object key as a map key of `key_field`'s type.
    ///
    /// Numeric keys may carry surrounding whitespace. Boolean keys are `true`,
    /// `True`, `false` or `False`.
    pub fn read_key(&self, key_field: &FieldDescriptor, text: &str) -> Result<MapKey, BindingError> {
        let field_type = FieldType::of(key_field);
        let trimmed = text.trim();
        let invalid = |reason: &str| {
            BindingError::invalid_string(key_field.full_name(), field_type.name(), text, reason)
        };
        match &field_type {
            FieldType::Int32 => trimmed
                .parse()
                .map(MapKey::I32)
                .map_err(|_| invalid("not a valid int32 value")),
            FieldType::UInt32 => trimmed
                .parse()
                .map(MapKey::U32)
                .map_err(|_| invalid("not a valid uint32 value")),
            FieldType::Int64 => trimmed
                .parse()
                .map(MapKey::I64)
                .map_err(|_| invalid("not a valid int64 value")),
            FieldType::UInt64 => trimmed
                .parse()
                .map(MapKey::U64)
                .map_err(|_| invalid("not a valid uint64 value")),
            FieldType::Bool => match trimmed {
                "true" | "True" => Ok(MapKey::Bool(true)),
                "false" | "False" => Ok(MapKey::Bool(false)),
                _ => Err(invalid("only \"true\" or \"false\" recognized")),
            },
            FieldType::String => Ok(MapKey::String(text.to_string())),
            other => Err(BindingError::input_mismatch(
                key_field,
                format!("unexpected map key type {other}"),
            )),
        }
    }
}

/// Coerces a number or numeric string to an integer.
///
/// Fractional numbers are truncated toward zero; strings must hold an integer.
fn integral(field: &FieldDescriptor, field_type: &FieldType, json: &Value) -> Result<i128, BindingError> {
    match json {
        Value::Number(n) => number_as_i128(n).ok_or_else(|| {
            BindingError::invalid_number(field.full_name(), field_type.name(), n, "not an integral value")
        }),
        Value::String(s) => s.trim().parse::<i128>().map_err(|_| {
            BindingError::invalid_string(
                field.full_name(),
                field_type.name(),
                s,
                "not a valid integer value",
            )
        }),
        other => Err(BindingError::wrong_token(
            field.full_name(),
            JsonToken::ValueNumberInt,
            other,
            format!("cannot read {} out of {} token", field_type.name(), JsonToken::of(other)),
        )),
    }
}

fn number_as_i128(n: &Number) -> Option<i128> {
    if let Some(v) = n.as_i64() {
        return Some(i128::from(v));
    }
    if let Some(v) = n.as_u64() {
        return Some(i128::from(v));
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.abs() < 1e38)
        .map(|f| f.trunc() as i128)
}

fn narrow<T: TryFrom<i128>>(
    field: &FieldDescriptor,
    field_type: &FieldType,
    value: i128,
) -> Result<T, BindingError> {
    T::try_from(value).map_err(|_| {
        BindingError::invalid_number(
            field.full_name(),
            field_type.name(),
            value,
            format!("out of range of {}", field_type.name()),
        )
    })
}

/// Narrows to `f32`. Finite values beyond its range fail instead of
/// becoming infinite.
fn single(field: &FieldDescriptor, field_type: &FieldType, value: f64) -> Result<f32, BindingError> {
    let narrowed = value as f32;
    if narrowed.is_infinite() && value.is_finite() {
        return Err(BindingError::invalid_number(
            field.full_name(),
            field_type.name(),
            value,
            format!("out of range of {}", field_type.name()),
        ));
    }
    Ok(narrowed)
}

/// Coerces a number or numeric string to a float. Strings may spell `NaN`,
/// `Infinity` and `-Infinity`.
fn floating(field: &FieldDescriptor, field_type: &FieldType, json: &Value) -> Result<f64, BindingError> {
    match json {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            BindingError::invalid_number(field.full_name(), field_type.name(), n, "not representable")
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            BindingError::invalid_string(
                field.full_name(),
                field_type.name(),
                s,
                "not a valid floating point value",
            )
        }),
        other => Err(BindingError::wrong_token(
            field.full_name(),
            JsonToken::ValueNumberFloat,
            other,
            format!("cannot read {} out of {} token", field_type.name(), JsonToken::of(other)),
        )),
    }
}

fn boolean(field: &FieldDescriptor, json: &Value) -> Result<bool, BindingError> {
    match json {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim() {
            "true" | "True" => Ok(true),
            "false" | "False" => Ok(false),
            _ => Err(BindingError::invalid_string(
                field.full_name(),
                "BOOL",
                s,
                "only \"true\" or \"false\" recognized",
            )),
        },
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.as_i64() != Some(0)),
        other => Err(BindingError::wrong_token(
            field.full_name(),
            JsonToken::ValueTrue,
            other,
            format!("cannot read BOOL out of {} token", JsonToken::of(other)),
        )),
    }
}

/// Strings are taken as-is; other scalars are read as their JSON text.
fn string(field: &FieldDescriptor, json: &Value) -> Result<String, BindingError> {
    match json {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(BindingError::wrong_token(
            field.full_name(),
            JsonToken::ValueString,
            other,
            format!("cannot read STRING out of {} token", JsonToken::of(other)),
        )),
    }
}

/// Decodes base64 in either the standard or the URL-safe alphabet, padded or not.
fn bytes(field: &FieldDescriptor, json: &Value) -> Result<Vec<u8>, BindingError> {
    let Value::String(s) = json else {
        return Err(BindingError::wrong_token(
            field.full_name(),
            JsonToken::ValueString,
            json,
            format!("cannot read BYTES out of {} token", JsonToken::of(json)),
        ));
    };
    STANDARD
        .decode(s)
        .or_else(|_| URL_SAFE.decode(s))
        .or_else(|_| STANDARD_NO_PAD.decode(s))
        .or_else(|_| URL_SAFE_NO_PAD.decode(s))
        .map_err(|err| BindingError::invalid_string(field.full_name(), "BYTES", s, err.to_string()))
}

fn declared_names(desc: &EnumDescriptor) -> String {
    let names: Vec<String> = desc.values().map(|v| v.name().to_string()).collect();
    format!("[{}]", names.join(", "))
}

fn declared_numbers(desc: &EnumDescriptor) -> String {
    let mut numbers: Vec<i32> = desc.values().map(|v| v.number()).collect();
    numbers.sort_unstable();
    numbers.dedup();
    let numbers: Vec<String> = numbers.iter().map(i32::to_string).collect();
    format!("[{}]", numbers.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_reflect::DescriptorPool;
    use serde_json::json;

    fn wrapper_field(name: &str) -> FieldDescriptor {
        DescriptorPool::global()
            .get_message_by_name(name)
            .unwrap()
            .get_field_by_name("value")
            .unwrap()
    }

    #[test]
    fn test_integral_coercion() {
        let field = wrapper_field("google.protobuf.Int32Value");
        let t = FieldType::Int32;
        assert_eq!(integral(&field, &t, &json!(12)).unwrap(), 12);
        assert_eq!(integral(&field, &t, &json!(12.9)).unwrap(), 12);
        assert_eq!(integral(&field, &t, &json!(" -7 ")).unwrap(), -7);
        assert!(integral(&field, &t, &json!("1.5")).is_err());
        assert!(integral(&field, &t, &json!(true)).is_err());
        assert!(narrow::<i32>(&field, &t, i128::from(i64::MAX)).is_err());
        assert_eq!(narrow::<u64>(&field, &t, i128::from(u64::MAX)).unwrap(), u64::MAX);
    }

    #[test]
    fn test_floating_coercion() {
        let field = wrapper_field("google.protobuf.DoubleValue");
        let t = FieldType::Double;
        assert_eq!(floating(&field, &t, &json!(1.25)).unwrap(), 1.25);
        assert_eq!(floating(&field, &t, &json!("Infinity")).unwrap(), f64::INFINITY);
        assert_eq!(floating(&field, &t, &json!("-Infinity")).unwrap(), f64::NEG_INFINITY);
        assert!(floating(&field, &t, &json!("NaN")).unwrap().is_nan());
        assert!(floating(&field, &t, &json!("abc")).is_err());
    }

    #[test]
    fn test_bytes_alphabets() {
        let field = wrapper_field("google.protobuf.BytesValue");
        assert_eq!(bytes(&field, &json!("+/8=")).unwrap(), vec![0xfb, 0xff]);
        assert_eq!(bytes(&field, &json!("-_8=")).unwrap(), vec![0xfb, 0xff]);
        assert_eq!(bytes(&field, &json!("-_8")).unwrap(), vec![0xfb, 0xff]);
        assert!(bytes(&field, &json!("!!")).is_err());
        assert!(bytes(&field, &json!(12)).is_err());
    }

    #[test]
    fn test_boolean_and_string_coercion() {
        let field = wrapper_field("google.protobuf.BoolValue");
        assert!(boolean(&field, &json!("true")).unwrap());
        assert!(!boolean(&field, &json!(0)).unwrap());
        assert!(boolean(&field, &json!("yes")).is_err());
        assert_eq!(string(&field, &json!(1.5)).unwrap(), "1.5");
        assert!(string(&field, &json!({})).is_err());
    }
}
