use prost_reflect::{DynamicMessage, MessageDescriptor};
use serde_json::Value;

use crate::error::BindingError;
use crate::options::{ReadOptions, WriteOptions};
use crate::reader::FieldReader;
use crate::registry::CodecCache;
use crate::writer::FieldWriter;

/// Reads and writes protobuf messages as JSON under a fixed set of options.
///
/// The codec is `Sync`; share one instance so the codec cache is warmed once.
///
/// ```
/// use prost_reflect::DescriptorPool;
/// use protobind::ProtobufCodec;
/// use serde_json::json;
///
/// let desc = DescriptorPool::global()
///     .get_message_by_name("google.protobuf.Duration")
///     .unwrap();
/// let codec = ProtobufCodec::default();
/// let message = codec.read(&desc, &json!("1.5s")).unwrap();
/// assert_eq!(codec.write(&message).unwrap(), json!("1.500s"));
/// ```
#[derive(Debug, Default)]
pub struct ProtobufCodec {
    read: ReadOptions,
    write: WriteOptions,
    cache: CodecCache,
}

impl ProtobufCodec {
    pub fn new(read: ReadOptions, write: WriteOptions) -> Self {
        Self {
            read,
            write,
            cache: CodecCache::new(),
        }
    }

    pub fn read_options(&self) -> &ReadOptions {
        &self.read
    }

    pub fn write_options(&self) -> &WriteOptions {
        &self.write
    }

    pub fn cache(&self) -> &CodecCache {
        &self.cache
    }

    pub fn reader(&self) -> FieldReader<'_> {
        FieldReader::new(&self.read, &self.cache)
    }

    pub fn writer(&self) -> FieldWriter<'_> {
        FieldWriter::new(&self.write, &self.cache)
    }

    pub fn read(&self, desc: &MessageDescriptor, json: &Value) -> Result<DynamicMessage, BindingError> {
        self.reader().read_message(desc, json)
    }

    pub fn read_str(&self, desc: &MessageDescriptor, text: &str) -> Result<DynamicMessage, BindingError> {
        let json: Value = serde_json::from_str(text)?;
        self.read(desc, &json)
    }

    pub fn read_slice(&self, desc: &MessageDescriptor, bytes: &[u8]) -> Result<DynamicMessage, BindingError> {
        let json: Value = serde_json::from_slice(bytes)?;
        self.read(desc, &json)
    }

    pub fn write(&self, message: &DynamicMessage) -> Result<Value, BindingError> {
        self.writer().write_message(message)
    }

    pub fn write_string(&self, message: &DynamicMessage) -> Result<String, BindingError> {
        Ok(serde_json::to_string(&self.write(message)?)?)
    }

    pub fn write_string_pretty(&self, message: &DynamicMessage) -> Result<String, BindingError> {
        Ok(serde_json::to_string_pretty(&self.write(message)?)?)
    }
}
