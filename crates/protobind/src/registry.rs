//! Resolution of the codec used for each message type, memoized per field.

use dashmap::DashMap;
use prost_reflect::{DynamicMessage, FieldDescriptor, MessageDescriptor};
use tracing::trace;

use crate::well_known::{self, WellKnownType};

/// How a message is mapped to and from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCodec {
    /// A JSON object keyed by field names.
    Generic,
    /// A well-known type with its own JSON form.
    WellKnown(WellKnownType),
}

impl MessageCodec {
    pub fn resolve(desc: &MessageDescriptor) -> Self {
        WellKnownType::from_full_name(desc.full_name())
            .map_or(MessageCodec::Generic, MessageCodec::WellKnown)
    }

    /// Whether a JSON array is a valid input for a singular field of this type.
    pub fn accepts_array(&self) -> bool {
        matches!(
            self,
            MessageCodec::WellKnown(WellKnownType::ListValue | WellKnownType::Value)
        )
    }

    /// The message a JSON `null` reads as, or `None` to leave the field unset.
    pub fn null_message(&self, desc: &MessageDescriptor) -> Option<DynamicMessage> {
        match self {
            MessageCodec::WellKnown(kind) => well_known::null_message(*kind, desc),
            MessageCodec::Generic => None,
        }
    }
}

/// Thread-safe memo of the codec resolved for each message-typed field,
/// keyed by the field's full name.
///
/// Resolution is pure, so racing inserts for the same field agree and the
/// first one wins.
#[derive(Debug, Default)]
pub struct CodecCache {
    by_field: DashMap<String, MessageCodec>,
}

impl CodecCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn codec_for_field(&self, field: &FieldDescriptor, desc: &MessageDescriptor) -> MessageCodec {
        if let Some(codec) = self.by_field.get(field.full_name()) {
            return *codec;
        }
        let codec = MessageCodec::resolve(desc);
        trace!(field = field.full_name(), ?codec, "resolved message codec");
        *self
            .by_field
            .entry(field.full_name().to_string())
            .or_insert(codec)
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }
}
