//! Descriptor-driven binding between protobuf messages and JSON trees.
//!
//! Messages are handled reflectively through [`prost_reflect`]: the codec needs
//! only a [`MessageDescriptor`](prost_reflect::MessageDescriptor) to read a JSON
//! tree into a [`DynamicMessage`](prost_reflect::DynamicMessage) and to write one
//! back. The `google.protobuf` well-known types use their canonical JSON forms.
//!
//! - [`ProtobufCodec`]: the entry point, holding options and the codec cache
//! - [`FieldReader`] and [`FieldWriter`]: per-field decoding and encoding
//! - [`well_known`]: `Duration`, `Timestamp`, `Struct`, `Value`, `ListValue`,
//!   `FieldMask` and the scalar wrappers
//! - [`media`]: binary, text format and JSON request bodies

mod codec;
pub mod error;
pub mod field_type;
pub mod media;
pub mod options;
pub mod reader;
pub mod registry;
pub mod well_known;
pub mod writer;

pub use codec::ProtobufCodec;
pub use error::{BindingError, JsonToken};
pub use field_type::{Cardinality, FieldType};
pub use media::{ErrorBody, MediaError, ProtobufMediaType};
pub use options::{ReadOptions, WriteOptions};
pub use reader::FieldReader;
pub use registry::{CodecCache, MessageCodec};
pub use well_known::WellKnownType;
pub use writer::FieldWriter;
