//! Decode options shared by every decoder

use super::error::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};

/// Log target for deprecation notices
pub const DEPRECATION_TARGET: &str = "inferwire::deprecation";

/// What to do with a text block whose `text` holds a structured value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyTextPolicy {
    /// Accept silently; the block still carries the legacy marker
    Accept,
    /// Accept and emit a deprecation notice
    #[default]
    Warn,
    /// Fail the decode
    Reject,
}

/// Knobs that change how payloads are decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Handling of structured values in a text block's `text` field
    pub legacy_text: LegacyTextPolicy,

    /// Accept `text` in place of `value` on thought blocks
    pub thought_text_alias: bool,

    /// Upper bound on content blocks per response or chunk
    pub max_content_blocks: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            legacy_text: LegacyTextPolicy::Warn,
            thought_text_alias: true,
            max_content_blocks: None,
        }
    }
}

impl DecodeOptions {
    /// Set the legacy text policy
    pub fn with_legacy_text(mut self, policy: LegacyTextPolicy) -> Self {
        self.legacy_text = policy;
        self
    }

    /// Enable or disable the thought `text` alias
    pub fn with_thought_text_alias(mut self, enabled: bool) -> Self {
        self.thought_text_alias = enabled;
        self
    }

    /// Limit the number of content blocks per response or chunk
    pub fn with_max_content_blocks(mut self, limit: usize) -> Self {
        self.max_content_blocks = Some(limit);
        self
    }

    pub(crate) fn check_block_count(
        &self,
        context: &'static str,
        count: usize,
    ) -> DecodeResult<()> {
        match self.max_content_blocks {
            Some(limit) if count > limit => Err(DecodeError::TooManyContentBlocks {
                context,
                count,
                limit,
            }),
            _ => Ok(()),
        }
    }
}
