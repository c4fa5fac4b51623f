//! Property tests: JSON written by the codec reads back to the same message.

mod common;

use common::sample_descriptor;
use proptest::prelude::*;
use protobind::{ProtobufCodec, ReadOptions, WriteOptions};
use serde_json::json;

proptest! {
    #[test]
    fn scalars_round_trip(
        count in any::<i32>(),
        total in any::<i64>(),
        big in any::<u64>(),
        active in any::<bool>(),
        name in "\\PC{0,16}",
        payload in prop::collection::vec(any::<u8>(), 1..32),
    ) {
        let codec = ProtobufCodec::default();
        let input = json!({
            "count": count,
            "total": total.to_string(),
            "big": big,
            "active": active,
            "displayName": name,
        });
        let message = codec.read(&sample_descriptor(), &input).unwrap();
        let mut with_payload = message.clone();
        with_payload.set_field_by_name("payload", prost_reflect::Value::Bytes(payload.into()));

        let written = codec.write(&with_payload).unwrap();
        prop_assert_eq!(codec.read(&sample_descriptor(), &written).unwrap(), with_payload);
    }

    #[test]
    fn int64_as_string_round_trips(total in any::<i64>(), big in any::<u64>()) {
        let codec = ProtobufCodec::new(
            ReadOptions::new(),
            WriteOptions::new().with_int64_as_string(true),
        );
        let message = codec
            .read(&sample_descriptor(), &json!({"total": total, "big": big}))
            .unwrap();
        let written = codec.write(&message).unwrap();
        if total != 0 {
            prop_assert_eq!(&written["total"], &json!(total.to_string()));
        }
        prop_assert_eq!(codec.read(&sample_descriptor(), &written).unwrap(), message);
    }

    #[test]
    fn durations_round_trip(seconds in -315_576_000_000i64..315_576_000_000, millis in 0u32..1000) {
        let codec = ProtobufCodec::default();
        let sign = if seconds < 0 { "-" } else { "" };
        let text = format!("{sign}{}.{millis:03}s", seconds.unsigned_abs());
        let message = codec
            .read(&sample_descriptor(), &json!({"timeout": text}))
            .unwrap();
        let written = codec.write(&message).unwrap();
        prop_assert_eq!(codec.read(&sample_descriptor(), &written).unwrap(), message);
    }
}
