//! Configuration error types

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// File format a configuration was read as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => f.write_str("YAML"),
            ConfigFormat::Json => f.write_str("JSON"),
        }
    }
}

/// Failure to produce a usable [`CodecConfig`](super::CodecConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read codec config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {format} codec config '{}'{}: {message}",
            .path.display(), LineColumn(.location))]
    Parse {
        path: PathBuf,
        format: ConfigFormat,
        /// Line and column, when the parser reported them
        location: Option<(usize, usize)>,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("environment variable '{var}' referenced by codec config is not set")]
    MissingEnvVar { var: String },

    /// A bug in this crate rather than in the configuration
    #[error("internal configuration error: {message}")]
    Internal { message: String },
}

struct LineColumn<'a>(&'a Option<(usize, usize)>);

impl fmt::Display for LineColumn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((line, column)) => write!(f, " at line {line}, column {column}"),
            None => Ok(()),
        }
    }
}

/// A configuration value that parsed but is not acceptable
#[derive(Debug, Error)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `decoding.max_content_blocks`
    pub field_path: String,
    pub kind: ValidationErrorKind,
    /// Environment variable the value came from, if it did not come from the file
    pub env_var: Option<&'static str>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid codec config at '{}': {}", self.field_path, self.kind)?;
        if let Some(var) = self.env_var {
            write!(f, " (set by {var})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("value is missing")]
    Missing,

    #[error("expected {expected}, got '{actual}'")]
    InvalidValue { expected: String, actual: String },

    #[error("out of range: {message}")]
    OutOfRange { message: String },

    #[error("bad format: {message}")]
    InvalidFormat { message: String },

    #[error("unsupported version '{actual}', supported: {}", .supported.join(", "))]
    UnsupportedVersion {
        supported: &'static [&'static str],
        actual: String,
    },
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
            env_var: None,
        }
    }

    /// Attribute the value to an environment variable
    pub fn from_env_var(mut self, var: &'static str) -> Self {
        self.env_var = Some(var);
        self
    }

    pub fn missing(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::Missing)
    }

    pub fn invalid_value(
        field_path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::InvalidValue {
                expected: expected.into(),
                actual: actual.into(),
            },
        )
    }

    pub fn out_of_range(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::OutOfRange {
                message: message.into(),
            },
        )
    }

    pub fn invalid_format(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::InvalidFormat {
                message: message.into(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_location() {
        let err = ConfigError::Parse {
            path: PathBuf::from("codec.yaml"),
            format: ConfigFormat::Yaml,
            location: Some((3, 7)),
            message: "unknown field `max_blocks`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse YAML codec config 'codec.yaml' at line 3, column 7: \
             unknown field `max_blocks`"
        );
    }

    #[test]
    fn test_env_attribution() {
        let err = ValidationError::invalid_value(
            "compatibility.legacy_text",
            "accept, warn or reject",
            "maybe",
        )
        .from_env_var("INFERWIRE_LEGACY_TEXT");
        assert_eq!(
            err.to_string(),
            "invalid codec config at 'compatibility.legacy_text': expected accept, warn or reject, \
             got 'maybe' (set by INFERWIRE_LEGACY_TEXT)"
        );
    }
}
