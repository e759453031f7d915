//! Configuration schema structures with serde support

use super::error::ValidationError;
use crate::protocol::{DecodeOptions, LegacyTextPolicy};
use serde::{Deserialize, Serialize};

/// Root configuration of the wire codec
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Backward-compatibility switches
    #[serde(default)]
    pub compatibility: CompatibilityConfig,

    /// Decoder limits
    #[serde(default)]
    pub decoding: DecodingConfig,
}

/// Handling of deprecated wire shapes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompatibilityConfig {
    /// Structured values in a text block's `text` field
    #[serde(default)]
    pub legacy_text: LegacyTextPolicy,

    /// Accept `text` on thought blocks that lack `value`
    #[serde(default = "default_true")]
    pub thought_text_alias: bool,
}

/// Limits applied while decoding
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DecodingConfig {
    /// Maximum content blocks per response or chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_content_blocks: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            legacy_text: LegacyTextPolicy::default(),
            thought_text_alias: default_true(),
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            compatibility: CompatibilityConfig::default(),
            decoding: DecodingConfig::default(),
        }
    }
}

impl CodecConfig {
    /// Field-level validation
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.trim().is_empty() {
            return Err(ValidationError::missing("version"));
        }

        if self.decoding.max_content_blocks == Some(0) {
            return Err(ValidationError::out_of_range(
                "decoding.max_content_blocks",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Decode options described by this configuration
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            legacy_text: self.compatibility.legacy_text,
            thought_text_alias: self.compatibility.thought_text_alias,
            max_content_blocks: self.decoding.max_content_blocks,
        }
    }
}
