use prost_reflect::{EnumDescriptor, FieldDescriptor};
use serde_json::Value;

use crate::error::{BindingError, JsonToken};

/// Full name of the enum whose only JSON form is `null`.
pub const NULL_VALUE: &str = "google.protobuf.NullValue";

pub(crate) fn is_null_value(desc: &EnumDescriptor) -> bool {
    desc.full_name() == NULL_VALUE
}

/// `NullValue` fields accept nothing but `null`, which is read before the enum
/// value is looked at; anything reaching here is a mismatch.
pub(crate) fn reject(field: &FieldDescriptor, json: &Value) -> BindingError {
    BindingError::wrong_token(
        field.full_name(),
        JsonToken::ValueNull,
        json,
        format!("expected null for field {}", field.full_name()),
    )
}
