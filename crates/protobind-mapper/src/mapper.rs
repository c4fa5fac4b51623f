use prost_reflect::{DynamicMessage, MessageDescriptor};
use protobind::ProtobufCodec;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::{Format, Inclusion, MapperConfig};
use crate::error::DataFormatError;
use crate::rename::{self, TreeDeserializer};
use crate::tree;

/// Converts serde values and protobuf messages to and from text.
///
/// Serde values pass through a JSON tree, so inclusion and naming rules apply
/// uniformly to JSON and YAML. Naming translates declared struct field names
/// and leaves map keys alone. XML is written straight from the value and
/// ignores both rules.
///
/// ```
/// use protobind_mapper::ObjectMapper;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Order { id: Option<String>, cents: i64 }
///
/// let mapper = ObjectMapper::default_json();
/// let order = Order { id: None, cents: 0 };
/// assert_eq!(mapper.write_value(&order).unwrap(), r#"{"cents":0}"#);
/// assert_eq!(mapper.write_compact(&order).unwrap(), "{}");
/// ```
#[derive(Debug)]
pub struct ObjectMapper {
    config: MapperConfig,
    codec: ProtobufCodec,
}

impl ObjectMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self {
            codec: ProtobufCodec::new(config.read, config.write),
            config,
        }
    }

    pub fn default_json() -> Self {
        Self::new(MapperConfig::default_json())
    }

    pub fn snake_case() -> Self {
        Self::new(MapperConfig::snake_case())
    }

    pub fn compact() -> Self {
        Self::new(MapperConfig::compact())
    }

    pub fn yaml() -> Self {
        Self::new(MapperConfig::yaml())
    }

    pub fn xml() -> Self {
        Self::new(MapperConfig::xml())
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn codec(&self) -> &ProtobufCodec {
        &self.codec
    }

    /// Serializes `value` to a JSON tree shaped by this mapper's rules.
    pub fn to_tree<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value, DataFormatError> {
        self.shaped_tree(value, self.config.inclusion)
    }

    fn shaped_tree<T: Serialize + ?Sized>(
        &self,
        value: &T,
        inclusion: Inclusion,
    ) -> Result<Value, DataFormatError> {
        let mut tree = rename::to_tree(value, self.config.naming)?;
        tree::retain(&mut tree, inclusion);
        Ok(tree)
    }

    /// Deserializes a tree produced by [`read_tree`](Self::read_tree) or by hand.
    ///
    /// Keys naming struct fields may be written either translated or as
    /// declared.
    pub fn from_tree<T: DeserializeOwned>(&self, tree: Value) -> Result<T, DataFormatError> {
        self.deserialize(TreeDeserializer::new(tree, self.config.naming))
    }

    /// Runs `deserializer`, failing on the first ignored property when the
    /// read options ask for it.
    fn deserialize<'de, D, T>(&self, deserializer: D) -> Result<T, DataFormatError>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
        DataFormatError: From<D::Error>,
    {
        let mut ignored = Vec::new();
        let value = serde_ignored::deserialize(deserializer, |path| ignored.push(path.to_string()))?;
        match ignored.into_iter().next() {
            Some(path) if self.config.read.fail_on_unknown_properties => {
                Err(DataFormatError::UnknownProperty { path })
            }
            _ => Ok(value),
        }
    }

    pub fn write_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, DataFormatError> {
        match self.config.format {
            Format::Json => Ok(serde_json::to_string(&self.to_tree(value)?)?),
            Format::Yaml => Ok(serde_yaml::to_string(&self.to_tree(value)?)?),
            Format::Xml => Ok(quick_xml::se::to_string(value)?),
        }
    }

    pub fn write_value_pretty<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<String, DataFormatError> {
        match self.config.format {
            Format::Json => Ok(serde_json::to_string_pretty(&self.to_tree(value)?)?),
            Format::Yaml => self.write_value(value),
            Format::Xml => {
                let mut out = String::new();
                let mut serializer = quick_xml::se::Serializer::new(&mut out);
                serializer.indent(' ', 2);
                value.serialize(serializer)?;
                Ok(out)
            }
        }
    }

    /// Writes `value` as JSON without `null` and default-valued properties,
    /// whatever this mapper's inclusion.
    pub fn write_compact<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, DataFormatError> {
        Ok(serde_json::to_string(&self.shaped_tree(value, Inclusion::NonDefault)?)?)
    }

    /// Parses text into a tree. Keys are kept as written.
    pub fn read_tree(&self, text: &str) -> Result<Value, DataFormatError> {
        Ok(match self.config.format {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
            Format::Xml => quick_xml::de::from_str(text)?,
        })
    }

    pub fn read_value<T: DeserializeOwned>(&self, text: &str) -> Result<T, DataFormatError> {
        match self.config.format {
            Format::Xml => self.deserialize(&mut quick_xml::de::Deserializer::from_str(text)),
            Format::Json | Format::Yaml => self.from_tree(self.read_tree(text)?),
        }
    }

    pub fn write_proto(&self, message: &DynamicMessage) -> Result<String, DataFormatError> {
        let tree = self.codec.write(message)?;
        match self.config.format {
            Format::Json => Ok(serde_json::to_string(&tree)?),
            Format::Yaml => Ok(serde_yaml::to_string(&tree)?),
            Format::Xml => Err(unsupported(Format::Xml, "writing protobuf messages")),
        }
    }

    pub fn write_proto_pretty(&self, message: &DynamicMessage) -> Result<String, DataFormatError> {
        match self.config.format {
            Format::Json => Ok(serde_json::to_string_pretty(&self.codec.write(message)?)?),
            _ => self.write_proto(message),
        }
    }

    pub fn read_proto(
        &self,
        desc: &MessageDescriptor,
        text: &str,
    ) -> Result<DynamicMessage, DataFormatError> {
        let tree: Value = match self.config.format {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
            Format::Xml => return Err(unsupported(Format::Xml, "reading protobuf messages")),
        };
        Ok(self.codec.read(desc, &tree)?)
    }
}

impl Default for ObjectMapper {
    fn default() -> Self {
        Self::default_json()
    }
}

fn unsupported(format: Format, operation: &'static str) -> DataFormatError {
    DataFormatError::Unsupported { format, operation }
}
