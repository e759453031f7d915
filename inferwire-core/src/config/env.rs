//! Environment variable interpolation and overrides for configuration

use super::error::{ConfigError, ValidationError};
use super::schema::CodecConfig;
use crate::protocol::LegacyTextPolicy;
use regex::{Captures, Regex};
use std::env;

/// Overrides `compatibility.legacy_text` when set
pub const LEGACY_TEXT_ENV: &str = "INFERWIRE_LEGACY_TEXT";

/// Overrides `decoding.max_content_blocks` when set
pub const MAX_CONTENT_BLOCKS_ENV: &str = "INFERWIRE_MAX_CONTENT_BLOCKS";

fn env_var_pattern() -> Result<Regex, ConfigError> {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| ConfigError::Internal {
        message: format!("bad interpolation pattern: {}", e),
    })
}

/// Replace every `${VAR}` in `content` with the variable's value.
///
/// Fails on the first variable that is not set.
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let pattern = env_var_pattern()?;
    let mut missing: Option<String> = None;

    let interpolated = pattern.replace_all(content, |caps: &Captures<'_>| {
        env::var(&caps[1]).unwrap_or_else(|_| {
            missing.get_or_insert_with(|| caps[1].to_string());
            String::new()
        })
    });

    match missing {
        Some(var) => Err(ConfigError::MissingEnvVar { var }),
        None => Ok(interpolated.into_owned()),
    }
}

/// Apply `INFERWIRE_*` overrides on top of a loaded configuration
pub fn apply_env_overrides(config: &mut CodecConfig) -> Result<(), ConfigError> {
    if let Ok(raw) = env::var(LEGACY_TEXT_ENV) {
        config.compatibility.legacy_text = parse_legacy_text(&raw)?;
        tracing::debug!(
            policy = ?config.compatibility.legacy_text,
            "legacy text policy overridden from environment"
        );
    }

    if let Ok(raw) = env::var(MAX_CONTENT_BLOCKS_ENV) {
        let limit = raw.trim().parse::<usize>().map_err(|_| {
            ValidationError::invalid_value(
                "decoding.max_content_blocks",
                "a positive integer",
                &raw,
            )
            .from_env_var(MAX_CONTENT_BLOCKS_ENV)
        })?;
        config.decoding.max_content_blocks = Some(limit);
    }

    Ok(())
}

fn parse_legacy_text(raw: &str) -> Result<LegacyTextPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "accept" => Ok(LegacyTextPolicy::Accept),
        "warn" => Ok(LegacyTextPolicy::Warn),
        "reject" => Ok(LegacyTextPolicy::Reject),
        _ => Err(ValidationError::invalid_value(
            "compatibility.legacy_text",
            "one of accept, warn, reject",
            raw,
        )
        .from_env_var(LEGACY_TEXT_ENV)
        .into()),
    }
}
