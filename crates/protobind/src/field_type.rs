use std::fmt;

use prost_reflect::{EnumDescriptor, FieldDescriptor, Kind, MessageDescriptor};

/// The closed set of protobuf value kinds the codec dispatches on.
///
/// Fixed-width and zigzag encodings collapse onto the integer kind they store,
/// since JSON does not distinguish them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    Bool,
    String,
    Bytes,
    Enum(EnumDescriptor),
    Message(MessageDescriptor),
}

impl FieldType {
    pub fn of(field: &FieldDescriptor) -> Self {
        Self::from(field.kind())
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Int32 => "INT32",
            FieldType::UInt32 => "UINT32",
            FieldType::Int64 => "INT64",
            FieldType::UInt64 => "UINT64",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Bool => "BOOL",
            FieldType::String => "STRING",
            FieldType::Bytes => "BYTES",
            FieldType::Enum(_) => "ENUM",
            FieldType::Message(_) => "MESSAGE",
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            FieldType::String | FieldType::Bytes | FieldType::Enum(_) | FieldType::Message(_)
        )
    }
}

impl From<Kind> for FieldType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => FieldType::Int32,
            Kind::Uint32 | Kind::Fixed32 => FieldType::UInt32,
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => FieldType::Int64,
            Kind::Uint64 | Kind::Fixed64 => FieldType::UInt64,
            Kind::Float => FieldType::Float,
            Kind::Double => FieldType::Double,
            Kind::Bool => FieldType::Bool,
            Kind::String => FieldType::String,
            Kind::Bytes => FieldType::Bytes,
            Kind::Enum(desc) => FieldType::Enum(desc),
            Kind::Message(desc) => FieldType::Message(desc),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Enum(desc) => f.write_str(desc.full_name()),
            FieldType::Message(desc) => f.write_str(desc.full_name()),
            other => f.write_str(other.name()),
        }
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Singular,
    List,
    Map,
}

impl Cardinality {
    pub fn of(field: &FieldDescriptor) -> Self {
        if field.is_map() {
            Cardinality::Map
        } else if field.is_list() {
            Cardinality::List
        } else {
            Cardinality::Singular
        }
    }
}
