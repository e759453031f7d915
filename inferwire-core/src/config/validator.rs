//! Configuration validation utilities

use super::error::{ConfigError, ValidationError, ValidationErrorKind};
use super::schema::CodecConfig;
use regex::Regex;

/// Schema versions this crate understands
pub const SUPPORTED_VERSIONS: &[&str] = &["0.1"];

/// Block limits above this are almost certainly a typo
const MAX_SANE_CONTENT_BLOCKS: usize = 1_000_000;

/// Configuration validator with additional validation rules
pub struct ConfigValidator {
    /// Pattern for `major.minor` version strings
    version_pattern: Regex,
    /// Pattern for placeholders left behind by interpolation
    placeholder_pattern: Regex,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Result<Self, ConfigError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| ConfigError::Internal {
                message: format!("bad validation pattern: {}", e),
            })
        };
        Ok(Self {
            version_pattern: compile(r"^\d+\.\d+$")?,
            placeholder_pattern: compile(r"\$\{[^}]*\}")?,
        })
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &CodecConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_version(config)?;
        self.validate_limits(config)?;

        Ok(())
    }

    fn validate_version(&self, config: &CodecConfig) -> Result<(), ValidationError> {
        if self.placeholder_pattern.is_match(&config.version) {
            return Err(ValidationError::invalid_format(
                "version",
                "unresolved environment placeholder",
            ));
        }

        if !self.version_pattern.is_match(&config.version) {
            return Err(ValidationError::invalid_format(
                "version",
                format!("'{}' is not of the form major.minor", config.version),
            ));
        }

        if !SUPPORTED_VERSIONS.contains(&config.version.as_str()) {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::UnsupportedVersion {
                    supported: SUPPORTED_VERSIONS,
                    actual: config.version.clone(),
                },
            ));
        }

        Ok(())
    }

    fn validate_limits(&self, config: &CodecConfig) -> Result<(), ValidationError> {
        if let Some(limit) = config.decoding.max_content_blocks {
            if limit > MAX_SANE_CONTENT_BLOCKS {
                return Err(ValidationError::out_of_range(
                    "decoding.max_content_blocks",
                    format!("{} exceeds {}", limit, MAX_SANE_CONTENT_BLOCKS),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let validator = ConfigValidator::new().unwrap();
        assert!(validator.validate(&CodecConfig::default()).is_ok());
    }

    #[test]
    fn test_version_checks() {
        let validator = ConfigValidator::new().unwrap();

        let mut config = CodecConfig::default();
        config.version = "v1".to_string();
        let err = validator.validate(&config).unwrap_err();
        assert!(matches!(err.kind, ValidationErrorKind::InvalidFormat { .. }));

        config.version = "9.9".to_string();
        let err = validator.validate(&config).unwrap_err();
        assert!(matches!(err.kind, ValidationErrorKind::UnsupportedVersion { .. }));

        config.version = "${CODEC_VERSION}".to_string();
        let err = validator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("unresolved environment placeholder"));
    }

    #[test]
    fn test_absurd_block_limit() {
        let validator = ConfigValidator::new().unwrap();
        let mut config = CodecConfig::default();
        config.decoding.max_content_blocks = Some(MAX_SANE_CONTENT_BLOCKS + 1);
        let err = validator.validate(&config).unwrap_err();
        assert!(matches!(err.kind, ValidationErrorKind::OutOfRange { .. }));
    }
}
