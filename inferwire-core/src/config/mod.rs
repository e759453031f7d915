//! Configuration module for the wire codec
//!
//! Configuration only changes how tolerant decoding is of deprecated shapes
//! and how large a payload it accepts. Files are YAML or JSON, may reference
//! `${ENV_VARS}`, and can be overridden with `INFERWIRE_*` variables.

mod env;
mod error;
mod schema;
mod validator;

pub use env::{
    apply_env_overrides, interpolate_env_vars, LEGACY_TEXT_ENV, MAX_CONTENT_BLOCKS_ENV,
};
pub use error::{ConfigError, ConfigFormat, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{CodecConfig, CompatibilityConfig, DecodingConfig};
pub use validator::{ConfigValidator, SUPPORTED_VERSIONS};

use std::fs;
use std::path::Path;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<CodecConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    // Interpolate environment variables before parsing
    let interpolated = env::interpolate_env_vars(&content)?;

    let config: CodecConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            format: ConfigFormat::Yaml,
            location: e.location().map(|l| (l.line(), l.column())),
            message: e.to_string(),
        })?;

    finish(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<CodecConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    // Interpolate environment variables before parsing
    let interpolated = env::interpolate_env_vars(&content)?;

    let config: CodecConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            format: ConfigFormat::Json,
            location: Some((e.line(), e.column())),
            message: e.to_string(),
        })?;

    finish(config)
}

/// Default configuration with `INFERWIRE_*` overrides applied
pub fn from_env() -> ConfigResult<CodecConfig> {
    finish(CodecConfig::default())
}

fn read_config(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn finish(mut config: CodecConfig) -> ConfigResult<CodecConfig> {
    env::apply_env_overrides(&mut config)?;

    let validator = ConfigValidator::new()?;
    validator.validate(&config)?;
    tracing::debug!(version = %config.version, "loaded codec configuration");
    Ok(config)
}
