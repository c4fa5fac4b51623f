#![allow(dead_code)]

use std::sync::OnceLock;

use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor, ReflectMessage, Value};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MessageOptions, OneofDescriptorProto,
};

pub const SAMPLE: &str = "protobind.test.Sample";
pub const COLOR: &str = "protobind.test.Color";

fn field(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn typed(name: &str, number: i32, ty: Type, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field(name, number, ty)
    }
}

fn message(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    typed(name, number, Type::Message, type_name)
}

fn repeated(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.label = Some(Label::Repeated as i32);
    field
}

fn map_entry(name: &str, key: Type, value: FieldDescriptorProto) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: vec![
            field("key", 1, key),
            FieldDescriptorProto {
                name: Some("value".to_string()),
                number: Some(2),
                ..value
            },
        ],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn in_oneof(mut field: FieldDescriptorProto, index: i32) -> FieldDescriptorProto {
    field.oneof_index = Some(index);
    field
}

fn color() -> EnumDescriptorProto {
    let value = |name: &str, number: i32| EnumValueDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        ..Default::default()
    };
    EnumDescriptorProto {
        name: Some("Color".to_string()),
        value: vec![
            value("COLOR_UNSPECIFIED", 0),
            value("RED", 1),
            value("GREEN", 2),
            value("BLUE", 5),
        ],
        ..Default::default()
    }
}

fn sample() -> DescriptorProto {
    DescriptorProto {
        name: Some("Sample".to_string()),
        field: vec![
            field("count", 1, Type::Int32),
            field("total", 2, Type::Int64),
            field("small", 3, Type::Uint32),
            field("big", 4, Type::Fixed64),
            field("ratio", 5, Type::Float),
            field("score", 6, Type::Double),
            field("active", 7, Type::Bool),
            field("display_name", 8, Type::String),
            field("payload", 9, Type::Bytes),
            typed("color", 10, Type::Enum, ".protobind.test.Color"),
            message("child", 11, ".protobind.test.Sample"),
            repeated(field("tags", 12, Type::String)),
            repeated(typed("palette", 13, Type::Enum, ".protobind.test.Color")),
            repeated(message("labels", 14, ".protobind.test.Sample.LabelsEntry")),
            repeated(message("flags", 15, ".protobind.test.Sample.FlagsEntry")),
            message("limit", 16, ".google.protobuf.Int32Value"),
            message("nickname", 17, ".google.protobuf.StringValue"),
            message("timeout", 18, ".google.protobuf.Duration"),
            message("created_at", 19, ".google.protobuf.Timestamp"),
            message("attributes", 20, ".google.protobuf.Struct"),
            message("extra", 21, ".google.protobuf.Value"),
            message("items", 22, ".google.protobuf.ListValue"),
            message("mask", 23, ".google.protobuf.FieldMask"),
            typed("nothing", 24, Type::Enum, ".google.protobuf.NullValue"),
            repeated(message("children", 25, ".protobind.test.Sample.ChildrenEntry")),
            repeated(field("numbers", 26, Type::Sint32)),
            in_oneof(field("email", 27, Type::String), 0),
            in_oneof(field("phone", 28, Type::String), 0),
            repeated(message("history", 29, ".google.protobuf.Value")),
        ],
        nested_type: vec![
            map_entry("LabelsEntry", Type::Int32, field("", 0, Type::String)),
            map_entry("FlagsEntry", Type::Bool, field("", 0, Type::Int64)),
            map_entry(
                "ChildrenEntry",
                Type::String,
                message("", 0, ".protobind.test.Sample"),
            ),
        ],
        oneof_decl: vec![OneofDescriptorProto {
            name: Some("contact".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// A pool holding the well-known types plus `protobind.test`.
pub fn pool() -> &'static DescriptorPool {
    static POOL: OnceLock<DescriptorPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let mut pool = DescriptorPool::global();
        let file = FileDescriptorProto {
            name: Some("protobind/test/sample.proto".to_string()),
            package: Some("protobind.test".to_string()),
            dependency: vec![
                "google/protobuf/duration.proto".to_string(),
                "google/protobuf/field_mask.proto".to_string(),
                "google/protobuf/struct.proto".to_string(),
                "google/protobuf/timestamp.proto".to_string(),
                "google/protobuf/wrappers.proto".to_string(),
            ],
            message_type: vec![sample()],
            enum_type: vec![color()],
            syntax: Some("proto3".to_string()),
            ..Default::default()
        };
        pool.add_file_descriptor_proto(file)
            .expect("test descriptors are valid");
        pool
    })
}

pub fn descriptor(name: &str) -> MessageDescriptor {
    pool()
        .get_message_by_name(name)
        .unwrap_or_else(|| panic!("no message {name}"))
}

pub fn sample_descriptor() -> MessageDescriptor {
    descriptor(SAMPLE)
}

/// The value of field `name`, if set.
pub fn get(message: &DynamicMessage, name: &str) -> Option<Value> {
    let field = message.descriptor().get_field_by_name(name)?;
    message
        .has_field(&field)
        .then(|| message.get_field(&field).into_owned())
}

pub fn get_message(message: &DynamicMessage, name: &str) -> DynamicMessage {
    match get(message, name) {
        Some(Value::Message(m)) => m,
        other => panic!("field {name} is not a set message: {other:?}"),
    }
}
