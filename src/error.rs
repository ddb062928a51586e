use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Rejections raised while validating the calculator form.
/// All of them are recoverable; the caller shows the message and waits for new input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Error)]
pub enum ValidationError {
    #[error("missing field: fuel efficiency and distance are both required")]
    MissingField,
    #[error("invalid number: fuel efficiency and distance must be numeric")]
    InvalidNumber,
    #[error("out of range: fuel efficiency must be > 0 and distance >= 0")]
    OutOfRange,
}

impl ValidationError {
    /// Inline message shown next to the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField => "Please fill all fields",
            ValidationError::InvalidNumber | ValidationError::OutOfRange => {
                "Please enter valid positive numbers"
            }
        }
    }
}

/// Errors while loading or checking an estimator config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Strict label parsing failed (fuel type or time frame).
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unrecognized {kind} label: {label:?}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}
