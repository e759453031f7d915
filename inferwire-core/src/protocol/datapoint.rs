//! Stored dataset examples ("datapoints") and their insert payloads
//!
//! Datapoints are never removed by this crate. Deleting one is a state change:
//! [`Datapoint::soft_deleted`] returns a copy with `is_deleted` set and a
//! `staled_at` timestamp.

use super::error::{DecodeError, DecodeResult};
use super::fields::{json_kind, Fields};
use super::input::InferenceInput;
use super::options::DecodeOptions;
use super::response::JsonInferenceOutput;
use super::types::ContentBlock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

const CHAT_FIELDS: &[&str] = &[
    "type",
    "dataset_name",
    "function_name",
    "id",
    "input",
    "episode_id",
    "output",
    "tool_params",
    "tags",
    "source_inference_id",
    "staled_at",
    "is_deleted",
];

const JSON_FIELDS: &[&str] = &[
    "type",
    "dataset_name",
    "function_name",
    "id",
    "input",
    "episode_id",
    "output",
    "output_schema",
    "tags",
    "source_inference_id",
    "staled_at",
    "is_deleted",
];

/// A tool available to a chat datapoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tool {
    pub description: String,
    /// JSON Schema of the tool's arguments
    pub parameters: Value,
    pub name: String,
    /// Whether the provider should enforce `parameters` strictly
    pub strict: bool,
}

/// Tool configuration stored with a chat datapoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolParams {
    pub tools_available: Vec<Tool>,
    pub tool_choice: String,
    #[serde(default)]
    pub parallel_tool_calls: Option<bool>,
}

/// A stored example of a chat function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatDatapoint {
    pub dataset_name: String,
    pub function_name: String,
    pub id: Uuid,
    pub input: InferenceInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<ContentBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_params: Option<ToolParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    /// Inference this datapoint was created from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_inference_id: Option<Uuid>,
    /// When the datapoint went stale (soft delete timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staled_at: Option<String>,
    pub is_deleted: bool,
}

/// A stored example of a JSON function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonDatapoint {
    pub dataset_name: String,
    pub function_name: String,
    pub id: Uuid,
    pub input: InferenceInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<JsonInferenceOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_inference_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staled_at: Option<String>,
    pub is_deleted: bool,
}

/// A stored example, tagged by function kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Datapoint {
    Chat(ChatDatapoint),
    Json(JsonDatapoint),
}

impl ChatDatapoint {
    fn decode(fields: &Fields<'_>, options: &DecodeOptions) -> DecodeResult<Self> {
        fields.ensure_known(CHAT_FIELDS)?;

        let output = match fields.get("output") {
            None => None,
            Some(Value::Array(blocks)) => Some(
                blocks
                    .iter()
                    .map(|block| ContentBlock::decode(block, options))
                    .collect::<DecodeResult<Vec<_>>>()?,
            ),
            Some(other) => {
                return Err(fields.invalid(
                    "output",
                    format!("expected an array of content blocks, found {}", json_kind(other)),
                ))
            }
        };

        Ok(Self {
            dataset_name: fields.required_str("dataset_name")?.to_string(),
            function_name: fields.required_str("function_name")?.to_string(),
            id: fields.required_uuid("id")?,
            input: fields.required_as("input")?,
            episode_id: fields.optional_uuid("episode_id")?,
            output,
            tool_params: fields.optional_as("tool_params")?,
            tags: fields.optional_as("tags")?,
            source_inference_id: fields.optional_uuid("source_inference_id")?,
            staled_at: fields.optional_str("staled_at")?.map(str::to_string),
            is_deleted: fields.optional_bool("is_deleted")?.unwrap_or(false),
        })
    }
}

impl JsonDatapoint {
    fn decode(fields: &Fields<'_>) -> DecodeResult<Self> {
        fields.ensure_known(JSON_FIELDS)?;

        Ok(Self {
            dataset_name: fields.required_str("dataset_name")?.to_string(),
            function_name: fields.required_str("function_name")?.to_string(),
            id: fields.required_uuid("id")?,
            input: fields.required_as("input")?,
            episode_id: fields.optional_uuid("episode_id")?,
            output: fields.optional_as("output")?,
            output_schema: fields.get("output_schema").cloned(),
            tags: fields.optional_as("tags")?,
            source_inference_id: fields.optional_uuid("source_inference_id")?,
            staled_at: fields.optional_str("staled_at")?.map(str::to_string),
            is_deleted: fields.optional_bool("is_deleted")?.unwrap_or(false),
        })
    }
}

impl Datapoint {
    pub(crate) fn decode(value: &Value, options: &DecodeOptions) -> DecodeResult<Self> {
        let fields = Fields::new(value, "datapoint")?;
        let datapoint_type = fields.required_str("type")?;
        tracing::debug!(datapoint_type, "decoding datapoint");

        match datapoint_type {
            "json" => JsonDatapoint::decode(&fields.with_context("json datapoint"))
                .map(Datapoint::Json),
            "chat" => ChatDatapoint::decode(&fields.with_context("chat datapoint"), options)
                .map(Datapoint::Chat),
            other => Err(DecodeError::UnknownDatapointType(other.to_string())),
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Datapoint::Chat(datapoint) => datapoint.id,
            Datapoint::Json(datapoint) => datapoint.id,
        }
    }

    pub fn dataset_name(&self) -> &str {
        match self {
            Datapoint::Chat(datapoint) => &datapoint.dataset_name,
            Datapoint::Json(datapoint) => &datapoint.dataset_name,
        }
    }

    pub fn function_name(&self) -> &str {
        match self {
            Datapoint::Chat(datapoint) => &datapoint.function_name,
            Datapoint::Json(datapoint) => &datapoint.function_name,
        }
    }

    pub fn tags(&self) -> Option<&HashMap<String, String>> {
        match self {
            Datapoint::Chat(datapoint) => datapoint.tags.as_ref(),
            Datapoint::Json(datapoint) => datapoint.tags.as_ref(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        match self {
            Datapoint::Chat(datapoint) => datapoint.is_deleted,
            Datapoint::Json(datapoint) => datapoint.is_deleted,
        }
    }

    pub fn staled_at(&self) -> Option<&str> {
        match self {
            Datapoint::Chat(datapoint) => datapoint.staled_at.as_deref(),
            Datapoint::Json(datapoint) => datapoint.staled_at.as_deref(),
        }
    }

    /// A copy of this datapoint marked deleted as of `staled_at`
    pub fn soft_deleted(&self, staled_at: impl Into<String>) -> Self {
        let staled_at = Some(staled_at.into());
        match self {
            Datapoint::Chat(datapoint) => Datapoint::Chat(ChatDatapoint {
                staled_at,
                is_deleted: true,
                ..datapoint.clone()
            }),
            Datapoint::Json(datapoint) => Datapoint::Json(JsonDatapoint {
                staled_at,
                is_deleted: true,
                ..datapoint.clone()
            }),
        }
    }
}

/// Decode a stored datapoint with default options
pub fn decode_datapoint(value: &Value) -> DecodeResult<Datapoint> {
    Datapoint::decode(value, &DecodeOptions::default())
}

// ============================================================================
// Insert payloads
// ============================================================================

/// A new chat datapoint to add to a dataset.
///
/// The wire form lists every field; unset ones are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatDatapointInsert {
    pub function_name: String,
    pub input: InferenceInput,
    pub output: Option<Value>,
    pub allowed_tools: Option<Vec<String>>,
    pub additional_tools: Option<Vec<Value>>,
    pub tool_choice: Option<String>,
    pub parallel_tool_calls: Option<bool>,
    pub tags: Option<HashMap<String, String>>,
}

impl ChatDatapointInsert {
    pub fn new(function_name: impl Into<String>, input: InferenceInput) -> Self {
        Self {
            function_name: function_name.into(),
            input,
            output: None,
            allowed_tools: None,
            additional_tools: None,
            tool_choice: None,
            parallel_tool_calls: None,
            tags: None,
        }
    }

    /// Set the reference output, usually a list of content blocks in wire form
    pub fn with_output(mut self, output: Value) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_allowed_tools(mut self, tools: Vec<String>) -> Self {
        self.allowed_tools = Some(tools);
        self
    }

    pub fn with_additional_tool(mut self, tool: Value) -> Self {
        self.additional_tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: impl Into<String>) -> Self {
        self.tool_choice = Some(tool_choice.into());
        self
    }

    pub fn with_parallel_tool_calls(mut self, enabled: bool) -> Self {
        self.parallel_tool_calls = Some(enabled);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// A new JSON datapoint to add to a dataset.
///
/// The wire form lists every field; unset ones are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonDatapointInsert {
    pub function_name: String,
    pub input: InferenceInput,
    pub output: Option<Value>,
    pub output_schema: Option<Value>,
    pub tags: Option<HashMap<String, String>>,
}

impl JsonDatapointInsert {
    pub fn new(function_name: impl Into<String>, input: InferenceInput) -> Self {
        Self {
            function_name: function_name.into(),
            input,
            output: None,
            output_schema: None,
            tags: None,
        }
    }

    pub fn with_output(mut self, output: Value) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_lists_differ_only_in_config_field() {
        let chat_only: Vec<_> = CHAT_FIELDS.iter().filter(|f| !JSON_FIELDS.contains(*f)).collect();
        let json_only: Vec<_> = JSON_FIELDS.iter().filter(|f| !CHAT_FIELDS.contains(*f)).collect();
        assert_eq!(chat_only, vec![&"tool_params"]);
        assert_eq!(json_only, vec![&"output_schema"]);
    }

    #[test]
    fn test_insert_builders() {
        let insert = ChatDatapointInsert::new("assistant", InferenceInput::new())
            .with_allowed_tools(vec!["search".to_string()])
            .with_tool_choice("auto")
            .with_parallel_tool_calls(false)
            .with_tag("split", "train");

        assert_eq!(insert.allowed_tools, Some(vec!["search".to_string()]));
        assert_eq!(insert.tool_choice.as_deref(), Some("auto"));
        assert_eq!(insert.parallel_tool_calls, Some(false));
        assert_eq!(
            insert.tags.as_ref().and_then(|t| t.get("split")).map(String::as_str),
            Some("train")
        );

        let insert = JsonDatapointInsert::new("extract", InferenceInput::new())
            .with_output_schema(json!({"type": "object"}));
        assert_eq!(insert.output_schema, Some(json!({"type": "object"})));
        assert_eq!(insert.output, None);
    }
}
