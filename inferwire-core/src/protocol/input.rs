//! Inference input and request extras

use super::types::InputContent;
use crate::error::InternalContractError;
use crate::protocol::wire::to_wire;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of an input message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// System prompt: literal text, or arguments for a system template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum System {
    Text(String),
    Template(Map<String, Value>),
}

impl From<&str> for System {
    fn from(text: &str) -> Self {
        System::Text(text.to_string())
    }
}

impl From<String> for System {
    fn from(text: String) -> Self {
        System::Text(text)
    }
}

/// One message of an inference input.
///
/// `content` is either a string or a list of content objects in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMessage {
    pub role: Role,
    pub content: Value,
}

impl InputMessage {
    pub fn new(role: Role, content: impl Into<Value>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<Value>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<Value>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Message whose content is a list of typed blocks
    pub fn with_blocks(role: Role, blocks: &[InputContent]) -> Result<Self, InternalContractError> {
        Ok(Self::new(role, to_wire(blocks)?))
    }
}

/// Input of an inference or datapoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<InputMessage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<System>,
}

impl InferenceInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, system: impl Into<System>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_message(mut self, message: InputMessage) -> Self {
        self.messages.get_or_insert_with(Vec::new).push(message);
        self
    }
}

/// Extra request body patch applied for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantExtraBody {
    pub variant_name: String,
    /// JSON pointer into the provider request body
    pub pointer: String,
    pub value: Value,
}

/// Extra request body patch applied for one model provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderExtraBody {
    pub model_provider_name: String,
    /// JSON pointer into the provider request body
    pub pointer: String,
    pub value: Value,
}

/// A patch to the provider request body, scoped to a variant or a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraBody {
    Variant(VariantExtraBody),
    Provider(ProviderExtraBody),
}

impl ExtraBody {
    pub fn variant(
        variant_name: impl Into<String>,
        pointer: impl Into<String>,
        value: Value,
    ) -> Self {
        ExtraBody::Variant(VariantExtraBody {
            variant_name: variant_name.into(),
            pointer: pointer.into(),
            value,
        })
    }

    pub fn provider(
        model_provider_name: impl Into<String>,
        pointer: impl Into<String>,
        value: Value,
    ) -> Self {
        ExtraBody::Provider(ProviderExtraBody {
            model_provider_name: model_provider_name.into(),
            pointer: pointer.into(),
            value,
        })
    }

    pub fn pointer(&self) -> &str {
        match self {
            ExtraBody::Variant(extra) => &extra.pointer,
            ExtraBody::Provider(extra) => &extra.pointer,
        }
    }
}
