//! Protobuf content types for HTTP bodies.
//!
//! A message travels as binary, text format or JSON depending on the media
//! type. Anything that is not recognizably text format or JSON is binary.

use std::fmt;

use prost::Message as _;
use prost_reflect::{DynamicMessage, MessageDescriptor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::codec::ProtobufCodec;
use crate::error::BindingError;

pub const APPLICATION_PROTOBUF: &str = "application/x-protobuf";
pub const APPLICATION_PROTOBUF_TEXT_FORMAT: &str = "application/x-protobuf-text-format";
pub const APPLICATION_PROTOBUF_JSON: &str = "application/x-protobuf-json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtobufMediaType {
    Binary,
    TextFormat,
    Json,
}

impl ProtobufMediaType {
    pub const ALL: [ProtobufMediaType; 3] = [
        ProtobufMediaType::Binary,
        ProtobufMediaType::TextFormat,
        ProtobufMediaType::Json,
    ];

    /// Picks the encoding for a `Content-Type` or `Accept` value.
    ///
    /// Parameters such as `charset` are ignored. A subtype mentioning
    /// `text-format` selects text format, one mentioning `json` selects JSON.
    pub fn from_media_type(media_type: &str) -> Self {
        let essence = media_type.split(';').next().unwrap_or_default().trim();
        let subtype = essence
            .split_once('/')
            .map_or(essence, |(_, subtype)| subtype)
            .to_ascii_lowercase();
        if subtype.contains("text-format") {
            ProtobufMediaType::TextFormat
        } else if subtype.contains("json") {
            ProtobufMediaType::Json
        } else {
            ProtobufMediaType::Binary
        }
    }

    /// Whether `media_type` is exactly one of the three protobuf media types.
    pub fn is_supported(media_type: &str) -> bool {
        let essence = media_type.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .iter()
            .any(|t| t.as_str().eq_ignore_ascii_case(essence))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtobufMediaType::Binary => APPLICATION_PROTOBUF,
            ProtobufMediaType::TextFormat => APPLICATION_PROTOBUF_TEXT_FORMAT,
            ProtobufMediaType::Json => APPLICATION_PROTOBUF_JSON,
        }
    }
}

impl fmt::Display for ProtobufMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid protobuf binary payload: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("invalid protobuf text format payload: {0}")]
    TextFormat(#[from] prost_reflect::text_format::ParseError),
    #[error("text format payload is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Decodes a request body of the given media type.
pub fn decode_message(
    codec: &ProtobufCodec,
    desc: &MessageDescriptor,
    media_type: ProtobufMediaType,
    body: &[u8],
) -> Result<DynamicMessage, MediaError> {
    let message = match media_type {
        ProtobufMediaType::Binary => DynamicMessage::decode(desc.clone(), body)?,
        ProtobufMediaType::TextFormat => {
            DynamicMessage::parse_text_format(desc.clone(), std::str::from_utf8(body)?)?
        }
        ProtobufMediaType::Json => codec.read_slice(desc, body)?,
    };
    Ok(message)
}

/// Encodes a response body. JSON is pretty-printed.
pub fn encode_message(
    codec: &ProtobufCodec,
    message: &DynamicMessage,
    media_type: ProtobufMediaType,
) -> Result<Vec<u8>, MediaError> {
    let body = match media_type {
        ProtobufMediaType::Binary => message.encode_to_vec(),
        ProtobufMediaType::TextFormat => message.to_text_format().into_bytes(),
        ProtobufMediaType::Json => codec.write_string_pretty(message)?.into_bytes(),
    };
    Ok(body)
}

/// The length of the body [`encode_message`] would produce.
pub fn encoded_len(
    codec: &ProtobufCodec,
    message: &DynamicMessage,
    media_type: ProtobufMediaType,
) -> Result<usize, MediaError> {
    match media_type {
        ProtobufMediaType::Binary => Ok(message.encoded_len()),
        other => encode_message(codec, message, other).map(|body| body.len()),
    }
}

/// Body returned when a request payload cannot be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
}

impl ErrorBody {
    pub const BAD_REQUEST: u16 = 400;

    pub fn bad_request(err: &MediaError) -> Self {
        debug!(error = %err, "unable to process protocol buffer payload");
        Self {
            message: "Unable to process protocol buffer".to_string(),
            code: Self::BAD_REQUEST,
        }
    }
}
