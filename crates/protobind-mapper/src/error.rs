use protobind::BindingError;
use quick_xml::errors::serialize::{DeError, SeError};
use thiserror::Error;

use crate::config::Format;

/// Failure to convert between values and text.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("xml: {0}")]
    Xml(String),
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("Unrecognized field \"{path}\"")]
    UnknownProperty { path: String },
    #[error("{operation} is not supported for {format:?}")]
    Unsupported {
        format: Format,
        operation: &'static str,
    },
}

impl From<DeError> for DataFormatError {
    fn from(err: DeError) -> Self {
        DataFormatError::Xml(err.to_string())
    }
}

impl From<SeError> for DataFormatError {
    fn from(err: SeError) -> Self {
        DataFormatError::Xml(err.to_string())
    }
}
