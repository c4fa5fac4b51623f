//! Preconfigured object mappers for serde values and protobuf messages.
//!
//! Each mapper pairs a text [`Format`] with inclusion and naming rules and
//! with a [`ProtobufCodec`](protobind::ProtobufCodec) for protobuf messages.
//! Mappers are plain values; build one per use site from a preset:
//!
//! - [`ObjectMapper::default_json`]: JSON, skips nulls, ignores unknown properties
//! - [`ObjectMapper::snake_case`]: the default with snake_case field names
//! - [`ObjectMapper::compact`]: the default without default-valued properties
//! - [`ObjectMapper::yaml`]: YAML, writes everything, fails on unknown properties
//! - [`ObjectMapper::xml`]: XML, writes everything, ignores unknown properties

pub mod config;
pub mod error;
mod mapper;
mod rename;
pub mod tree;

pub use config::{Format, Inclusion, MapperConfig, Naming};
pub use error::DataFormatError;
pub use mapper::ObjectMapper;
