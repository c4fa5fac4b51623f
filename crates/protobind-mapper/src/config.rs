use std::borrow::Cow;

use protobind::{ReadOptions, WriteOptions};
use protobind_util::naming::camel_to_snake;

/// Text format a mapper reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Xml,
}

/// Which object properties are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inclusion {
    /// Every property.
    Always,
    /// Properties that are not `null`.
    NonNull,
    /// Properties that are neither `null` nor the default of their type:
    /// `false`, zero, `""`, `[]` and `{}` are dropped.
    NonDefault,
}

/// How struct field names are translated between values and text.
///
/// Only declared field names are translated; map keys are written and read
/// as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Naming {
    /// Names are written as declared.
    Identity,
    /// camelCase names are written as snake_case. Names that are already
    /// snake_case stay unchanged.
    SnakeCase,
}

impl Naming {
    /// Name written for the declared field `declared`.
    pub fn field_name(self, declared: &str) -> Cow<'_, str> {
        match self {
            Naming::Identity => Cow::Borrowed(declared),
            Naming::SnakeCase => Cow::Owned(camel_to_snake(declared)),
        }
    }

    /// Declared field among `fields` that `written` names, or `None` when no
    /// field is written that way.
    pub fn declared<'f>(self, fields: &[&'f str], written: &str) -> Option<&'f str> {
        fields
            .iter()
            .copied()
            .find(|field| *field == written || self.field_name(field) == written)
    }
}

/// Complete configuration of an [`ObjectMapper`](crate::ObjectMapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperConfig {
    pub format: Format,
    pub inclusion: Inclusion,
    pub naming: Naming,
    /// Options for protobuf messages read through the mapper.
    pub read: ReadOptions,
    /// Options for protobuf messages written through the mapper.
    pub write: WriteOptions,
}

impl MapperConfig {
    /// JSON that skips nulls, ignores unknown properties and reads unknown
    /// enum values as absent.
    pub const fn default_json() -> Self {
        Self {
            format: Format::Json,
            inclusion: Inclusion::NonNull,
            naming: Naming::Identity,
            read: ReadOptions::lenient(),
            write: WriteOptions::new(),
        }
    }

    /// [`default_json`](Self::default_json) with snake_case property names.
    pub const fn snake_case() -> Self {
        Self {
            naming: Naming::SnakeCase,
            ..Self::default_json()
        }
    }

    /// [`default_json`](Self::default_json) that also drops default values.
    pub const fn compact() -> Self {
        Self {
            inclusion: Inclusion::NonDefault,
            ..Self::default_json()
        }
    }

    /// YAML with every property written. Unknown properties fail.
    pub const fn yaml() -> Self {
        Self {
            format: Format::Yaml,
            inclusion: Inclusion::Always,
            naming: Naming::Identity,
            read: ReadOptions::new(),
            write: WriteOptions::new(),
        }
    }

    /// XML with every property written. Unknown properties are ignored.
    pub const fn xml() -> Self {
        Self {
            format: Format::Xml,
            inclusion: Inclusion::Always,
            naming: Naming::Identity,
            read: ReadOptions::new().with_fail_on_unknown_properties(false),
            write: WriteOptions::new(),
        }
    }

    pub const fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = inclusion;
        self
    }

    pub const fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    pub const fn with_read_options(mut self, read: ReadOptions) -> Self {
        self.read = read;
        self
    }

    pub const fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self::default_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(MapperConfig::default(), MapperConfig::default_json());
        assert_eq!(MapperConfig::snake_case().naming, Naming::SnakeCase);
        assert_eq!(MapperConfig::snake_case().inclusion, Inclusion::NonNull);
        assert_eq!(MapperConfig::compact().inclusion, Inclusion::NonDefault);
        assert!(MapperConfig::yaml().read.fail_on_unknown_properties);
        assert!(!MapperConfig::xml().read.fail_on_unknown_properties);
        assert!(MapperConfig::default_json().read.read_unknown_enum_values_as_null);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Naming::SnakeCase.field_name("skuIds"), "sku_ids");
        assert_eq!(Naming::SnakeCase.field_name("order_id"), "order_id");
        assert_eq!(Naming::SnakeCase.field_name("screenshotURLs"), "screenshot_urls");
        assert_eq!(Naming::Identity.field_name("skuIds"), "skuIds");

        let fields = ["orderId", "screenshotURLs", "line_item"];
        assert_eq!(Naming::SnakeCase.declared(&fields, "order_id"), Some("orderId"));
        assert_eq!(Naming::SnakeCase.declared(&fields, "orderId"), Some("orderId"));
        assert_eq!(
            Naming::SnakeCase.declared(&fields, "screenshot_urls"),
            Some("screenshotURLs")
        );
        assert_eq!(Naming::SnakeCase.declared(&fields, "line_item"), Some("line_item"));
        assert_eq!(Naming::SnakeCase.declared(&fields, "shelf"), None);
        assert_eq!(Naming::Identity.declared(&fields, "order_id"), None);
    }
}
