//! protobind-util - small, stateless helpers shared by the protobind crates.
//!
//! - [`json`]: typed accessors over `serde_json::Value` trees that fall back to a
//!   caller-supplied default
//! - [`enums`]: lookup of fieldless enums by declared name or ordinal
//! - [`time`]: `YYYY-MM-DD HH:MM:SS` parsing in UTC, CST or any fixed offset
//! - [`naming`]: snake_case ⇄ camelCase property-name translation

pub mod enums;
pub mod json;
pub mod naming;
pub mod time;

// Re-exports for convenience
pub use enums::{from_name, from_name_or, from_ordinal, from_ordinal_or, DeclaredEnum};
pub use json::{
    as_text, field_as_f64_or, field_as_i32_or, field_as_i64_or, field_as_text,
    field_as_text_or, for_kv, strings_field_or,
};
pub use naming::{camel_to_snake, snake_to_camel};
pub use time::{
    must_parse_cst, must_parse_in_offset, must_parse_utc, parse_cst, parse_in_offset, parse_utc,
    time_in_utc,
    TimeFormatError,
};
