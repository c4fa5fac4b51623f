mod common;

use common::{get, get_message, sample_descriptor};
use prost_reflect::{MapKey, Value};
use protobind::{BindingError, ProtobufCodec, ReadOptions, WriteOptions};
use serde_json::json;

fn strict() -> ProtobufCodec {
    ProtobufCodec::default()
}

fn with(read: ReadOptions) -> ProtobufCodec {
    ProtobufCodec::new(read, WriteOptions::default())
}

#[test]
fn reads_scalars() {
    let message = strict()
        .read(
            &sample_descriptor(),
            &json!({
                "count": 1,
                "total": "9007199254740993",
                "small": 3,
                "big": "18446744073709551615",
                "ratio": 0.5,
                "score": "-Infinity",
                "active": true,
                "displayName": "Ada",
                "payload": "AQI=",
                "color": "RED"
            }),
        )
        .unwrap();
    assert_eq!(get(&message, "count"), Some(Value::I32(1)));
    assert_eq!(get(&message, "total"), Some(Value::I64(9007199254740993)));
    assert_eq!(get(&message, "small"), Some(Value::U32(3)));
    assert_eq!(get(&message, "big"), Some(Value::U64(u64::MAX)));
    assert_eq!(get(&message, "ratio"), Some(Value::F32(0.5)));
    assert_eq!(get(&message, "score"), Some(Value::F64(f64::NEG_INFINITY)));
    assert_eq!(get(&message, "active"), Some(Value::Bool(true)));
    assert_eq!(get(&message, "display_name"), Some(Value::String("Ada".into())));
    assert_eq!(get(&message, "payload"), Some(Value::Bytes(vec![1u8, 2].into())));
    assert_eq!(get(&message, "color"), Some(Value::EnumNumber(1)));
}

#[test]
fn accepts_proto_field_names() {
    let message = strict()
        .read(&sample_descriptor(), &json!({"display_name": "Ada", "created_at": null}))
        .unwrap();
    assert_eq!(get(&message, "display_name"), Some(Value::String("Ada".into())));
    assert_eq!(get(&message, "created_at"), None);
}

#[test]
fn unknown_properties() {
    let input = json!({"count": 2, "extraField": {"nested": [1, 2]}});
    let err = strict().read(&sample_descriptor(), &input).unwrap_err();
    assert_eq!(
        err,
        BindingError::UnknownProperty {
            message: "protobind.test.Sample".into(),
            name: "extraField".into(),
        }
    );

    let message = with(ReadOptions::lenient()).read(&sample_descriptor(), &input).unwrap();
    assert_eq!(get(&message, "count"), Some(Value::I32(2)));
}

#[test]
fn out_of_range_integers_fail() {
    let err = strict()
        .read(&sample_descriptor(), &json!({"count": 2147483648i64}))
        .unwrap_err();
    assert_eq!(err.field(), Some("protobind.test.Sample.count"));
    assert!(matches!(err, BindingError::InvalidNumber { .. }));

    let err = strict()
        .read(&sample_descriptor(), &json!({"small": -1}))
        .unwrap_err();
    assert!(matches!(err, BindingError::InvalidNumber { .. }));
}

#[test]
fn out_of_range_floats_fail() {
    let err = strict()
        .read(&sample_descriptor(), &json!({"ratio": 1e40}))
        .unwrap_err();
    assert_eq!(err.field(), Some("protobind.test.Sample.ratio"));
    assert!(matches!(err, BindingError::InvalidNumber { .. }), "{err}");

    let message = strict()
        .read(&sample_descriptor(), &json!({"ratio": 3.0e38, "score": 1e300}))
        .unwrap();
    assert_eq!(get(&message, "ratio"), Some(Value::F32(3.0e38_f64 as f32)));
    assert_eq!(get(&message, "score"), Some(Value::F64(1e300)));

    let message = strict()
        .read(&sample_descriptor(), &json!({"ratio": "-Infinity"}))
        .unwrap();
    assert_eq!(get(&message, "ratio"), Some(Value::F32(f32::NEG_INFINITY)));
}

#[test]
fn array_for_singular_field_fails() {
    let err = strict()
        .read(&sample_descriptor(), &json!({"count": [1]}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Encountered START_ARRAY token for non-repeated field protobind.test.Sample.count"
    );
    let err = strict()
        .read(&sample_descriptor(), &json!({"child": []}))
        .unwrap_err();
    assert_eq!(err.field(), Some("protobind.test.Sample.child"));
}

#[test]
fn nulls() {
    let message = strict()
        .read(
            &sample_descriptor(),
            &json!({"count": null, "child": null, "tags": null, "labels": null}),
        )
        .unwrap();
    assert_eq!(message, prost_reflect::DynamicMessage::new(sample_descriptor()));
    assert!(strict()
        .read(&sample_descriptor(), &json!({"nothing": null}))
        .is_ok());

    let codec = with(ReadOptions::new().with_fail_on_null_for_primitives(true));
    let err = codec
        .read(&sample_descriptor(), &json!({"active": null}))
        .unwrap_err();
    assert!(err.to_string().contains("fail_on_null_for_primitives"));
    // strings are not primitives
    assert!(codec
        .read(&sample_descriptor(), &json!({"displayName": null}))
        .is_ok());
}

#[test]
fn null_value_accepts_only_null() {
    for input in [json!({"nothing": 0}), json!({"nothing": "NULL_VALUE"})] {
        let err = strict().read(&sample_descriptor(), &input).unwrap_err();
        assert!(matches!(err, BindingError::WrongToken { .. }), "{input}");
    }
}

#[test]
fn enums_by_name_and_number() {
    let message = strict()
        .read(&sample_descriptor(), &json!({"color": 5, "palette": ["GREEN", 1]}))
        .unwrap();
    assert_eq!(get(&message, "color"), Some(Value::EnumNumber(5)));
    assert_eq!(
        get(&message, "palette"),
        Some(Value::List(vec![Value::EnumNumber(2), Value::EnumNumber(1)]))
    );

    let err = strict()
        .read(&sample_descriptor(), &json!({"color": 3}))
        .unwrap_err();
    assert!(err.to_string().contains("[0,1,2,5]"), "{err}");

    let err = strict()
        .read(&sample_descriptor(), &json!({"color": "PURPLE"}))
        .unwrap_err();
    assert!(matches!(err, BindingError::InvalidString { .. }));
}

#[test]
fn unknown_enums_read_as_absent() {
    let codec = with(ReadOptions::new().with_read_unknown_enum_values_as_null(true));
    let message = codec
        .read(
            &sample_descriptor(),
            &json!({"color": "PURPLE", "palette": ["RED", "PURPLE", 7, "BLUE"]}),
        )
        .unwrap();
    assert_eq!(get(&message, "color"), None);
    assert_eq!(
        get(&message, "palette"),
        Some(Value::List(vec![Value::EnumNumber(1), Value::EnumNumber(5)]))
    );
}

#[test]
fn empty_string_enum() {
    let input = json!({"color": ""});
    assert!(strict().read(&sample_descriptor(), &input).is_err());
    let codec = with(ReadOptions::new().with_accept_empty_string_as_null_enum(true));
    let message = codec.read(&sample_descriptor(), &input).unwrap();
    assert_eq!(get(&message, "color"), None);
}

#[test]
fn numbers_for_enums_can_be_rejected() {
    let codec = with(ReadOptions::new().with_fail_on_numbers_for_enums(true));
    let err = codec
        .read(&sample_descriptor(), &json!({"color": 1}))
        .unwrap_err();
    assert!(matches!(err, BindingError::WrongToken { .. }));
    assert!(codec.read(&sample_descriptor(), &json!({"color": "RED"})).is_ok());
}

#[test]
fn single_value_as_array() {
    let input = json!({"tags": "solo", "numbers": 7});
    let err = strict().read(&sample_descriptor(), &input).unwrap_err();
    assert!(matches!(err, BindingError::WrongToken { .. }));

    let codec = with(ReadOptions::new().with_accept_single_value_as_array(true));
    let message = codec.read(&sample_descriptor(), &input).unwrap();
    assert_eq!(
        get(&message, "tags"),
        Some(Value::List(vec![Value::String("solo".into())]))
    );
    assert_eq!(get(&message, "numbers"), Some(Value::List(vec![Value::I32(7)])));
}

#[test]
fn map_keys() {
    let message = strict()
        .read(
            &sample_descriptor(),
            &json!({
                "labels": {" 1 ": "one", "-2": "minus two"},
                "flags": {"True": 1, "false": "2"}
            }),
        )
        .unwrap();
    let Some(Value::Map(labels)) = get(&message, "labels") else {
        panic!("labels not set");
    };
    assert_eq!(labels.get(&MapKey::I32(1)), Some(&Value::String("one".into())));
    assert_eq!(labels.get(&MapKey::I32(-2)), Some(&Value::String("minus two".into())));

    let Some(Value::Map(flags)) = get(&message, "flags") else {
        panic!("flags not set");
    };
    assert_eq!(flags.get(&MapKey::Bool(true)), Some(&Value::I64(1)));
    assert_eq!(flags.get(&MapKey::Bool(false)), Some(&Value::I64(2)));

    for input in [json!({"labels": {"x": "y"}}), json!({"flags": {"yes": 1}})] {
        let err = strict().read(&sample_descriptor(), &input).unwrap_err();
        assert!(matches!(err, BindingError::InvalidString { .. }), "{input}");
    }
}

#[test]
fn map_entries_keep_encounter_order() {
    let codec = strict();
    let labels = sample_descriptor().get_field_by_name("labels").unwrap();
    let keys = |input: serde_json::Value| -> Vec<MapKey> {
        codec
            .reader()
            .read_map(&labels, &input)
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    };
    assert_eq!(
        keys(json!({"3": "x", "10": "y"})),
        vec![MapKey::I32(3), MapKey::I32(10)]
    );
    assert_eq!(
        keys(json!({"10": "y", "-1": "z", "3": "x"})),
        vec![MapKey::I32(10), MapKey::I32(-1), MapKey::I32(3)]
    );
}

#[test]
fn nested_messages() {
    let message = strict()
        .read(
            &sample_descriptor(),
            &json!({
                "child": {"count": 2, "child": {"tags": ["deep"]}},
                "children": {"a": {"count": 1}}
            }),
        )
        .unwrap();
    let child = get_message(&message, "child");
    assert_eq!(get(&child, "count"), Some(Value::I32(2)));
    let grandchild = get_message(&child, "child");
    assert_eq!(
        get(&grandchild, "tags"),
        Some(Value::List(vec![Value::String("deep".into())]))
    );

    let Some(Value::Map(children)) = get(&message, "children") else {
        panic!("children not set");
    };
    let Some(Value::Message(a)) = children.get(&MapKey::String("a".into())) else {
        panic!("child a missing");
    };
    assert_eq!(get(a, "count"), Some(Value::I32(1)));
}

#[test]
fn oneof_keeps_the_last_member() {
    let message = strict()
        .read(&sample_descriptor(), &json!({"email": "a@b.c", "phone": "555"}))
        .unwrap();
    assert_eq!(get(&message, "email"), None);
    assert_eq!(get(&message, "phone"), Some(Value::String("555".into())));
}

#[test]
fn coercions() {
    let message = strict()
        .read(
            &sample_descriptor(),
            &json!({"count": "42", "total": 3.0, "active": "false", "displayName": 12, "score": "NaN"}),
        )
        .unwrap();
    assert_eq!(get(&message, "count"), Some(Value::I32(42)));
    assert_eq!(get(&message, "total"), Some(Value::I64(3)));
    // false is the default and leaves the field without presence
    assert_eq!(get(&message, "active"), None);
    assert_eq!(get(&message, "display_name"), Some(Value::String("12".into())));
    assert!(matches!(get(&message, "score"), Some(Value::F64(f)) if f.is_nan()));

    let err = strict()
        .read(&sample_descriptor(), &json!({"displayName": {"a": 1}}))
        .unwrap_err();
    assert!(matches!(err, BindingError::WrongToken { .. }));
}

#[test]
fn malformed_input() {
    let err = strict().read_str(&sample_descriptor(), "{\"count\": ").unwrap_err();
    assert!(matches!(err, BindingError::Json(_)));
    let err = strict().read(&sample_descriptor(), &json!([1])).unwrap_err();
    assert!(matches!(err, BindingError::WrongToken { .. }));
}

#[test]
fn codec_cache_is_filled_by_nested_fields() {
    let codec = strict();
    assert!(codec.cache().is_empty());
    codec
        .read(&sample_descriptor(), &json!({"child": {}, "limit": 3, "timeout": "1s"}))
        .unwrap();
    assert_eq!(codec.cache().len(), 3);
}
