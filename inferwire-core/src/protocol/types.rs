//! Content blocks and usage metadata
//!
//! [`ContentBlock`] is the closed union of blocks a gateway can emit: text,
//! tool calls and thoughts. Blocks that only ever travel from the caller to
//! the gateway ([`RawText`], [`ImageBase64`], [`ImageUrl`], [`ToolResult`])
//! are separate types, gathered with `ContentBlock` under [`InputContent`].

use super::error::{DecodeError, DecodeResult};
use super::fields::{json_kind, Fields};
use super::options::{DecodeOptions, LegacyTextPolicy, DEPRECATION_TARGET};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Token usage for one inference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Usage {
    /// Tokens consumed by the input
    pub input_tokens: u32,

    /// Tokens produced by the model
    pub output_tokens: u32,
}

impl Usage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Sum of input and output tokens
    pub fn total_tokens(&self) -> u64 {
        u64::from(self.input_tokens) + u64::from(self.output_tokens)
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCall,
    ContentFilter,
    /// Reported by the gateway as `unknown`; not the same as an absent reason
    Unknown,
}

impl FinishReason {
    /// Wire spelling of this reason
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ToolCall => "tool_call",
            FinishReason::ContentFilter => "content_filter",
            FinishReason::Unknown => "unknown",
        }
    }

    /// Read an optional `finish_reason` field.
    ///
    /// Absent, `null` and `""` all mean "not specified".
    pub(crate) fn decode_field(fields: &Fields<'_>) -> DecodeResult<Option<Self>> {
        match fields.optional_str("finish_reason")? {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

impl FromStr for FinishReason {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stop" => Ok(FinishReason::Stop),
            "length" => Ok(FinishReason::Length),
            "tool_call" => Ok(FinishReason::ToolCall),
            "content_filter" => Ok(FinishReason::ContentFilter),
            "unknown" => Ok(FinishReason::Unknown),
            other => Err(DecodeError::UnknownFinishReason(other.to_string())),
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Content blocks
// ============================================================================

/// One unit of model output content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(Text),
    ToolCall(ToolCall),
    Thought(Thought),
}

/// What a text block carries
#[derive(Debug, Clone, PartialEq)]
pub enum TextBody {
    /// Literal text
    Text(String),
    /// Arguments for a prompt template or schema
    Arguments(Value),
}

/// Text content, either literal or templated.
///
/// Older callers put template arguments in `text`. That shape still decodes
/// (see [`LegacyTextPolicy`]) and is marked with [`Text::is_legacy`], but it
/// always serializes as `arguments`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    body: TextBody,
    legacy: bool,
}

impl Text {
    /// Literal text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            body: TextBody::Text(text.into()),
            legacy: false,
        }
    }

    /// Template arguments
    pub fn with_arguments(arguments: Value) -> Self {
        Self {
            body: TextBody::Arguments(arguments),
            legacy: false,
        }
    }

    /// Build from a value given as `text` by an older caller.
    ///
    /// Strings become literal text. Objects are treated as template
    /// arguments, marked legacy, and reported as deprecated. Any other value
    /// is rejected.
    pub fn from_legacy(value: Value) -> DecodeResult<Self> {
        match value {
            Value::String(text) => Ok(Self::new(text)),
            Value::Object(arguments) => {
                legacy_text_notice();
                Ok(Self::legacy(Value::Object(arguments)))
            }
            other => Err(invalid_text(json_kind(&other))),
        }
    }

    fn legacy(arguments: Value) -> Self {
        Self {
            body: TextBody::Arguments(arguments),
            legacy: true,
        }
    }

    pub fn body(&self) -> &TextBody {
        &self.body
    }

    /// The literal text, if this is not a templated block
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            TextBody::Text(text) => Some(text),
            TextBody::Arguments(_) => None,
        }
    }

    /// The template arguments, if any
    pub fn arguments(&self) -> Option<&Value> {
        match &self.body {
            TextBody::Arguments(arguments) => Some(arguments),
            TextBody::Text(_) => None,
        }
    }

    /// Whether this block arrived through the deprecated structured-`text` shape
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    fn decode(fields: &Fields<'_>, options: &DecodeOptions) -> DecodeResult<Self> {
        match (fields.get("text"), fields.get("arguments")) {
            (Some(_), Some(_)) => Err(DecodeError::TextAndArguments),
            (None, None) => Err(DecodeError::MissingTextAndArguments),
            (Some(Value::String(text)), None) => Ok(Self::new(text.as_str())),
            (Some(structured @ Value::Object(_)), None) => match options.legacy_text {
                LegacyTextPolicy::Reject => Err(DecodeError::LegacyTextRejected),
                LegacyTextPolicy::Warn => {
                    legacy_text_notice();
                    Ok(Self::legacy(structured.clone()))
                }
                LegacyTextPolicy::Accept => Ok(Self::legacy(structured.clone())),
            },
            (Some(other), None) => Err(invalid_text(json_kind(other))),
            (None, Some(arguments)) => Ok(Self::with_arguments(arguments.clone())),
        }
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match &self.body {
            TextBody::Text(text) => map.serialize_entry("text", text)?,
            TextBody::Arguments(arguments) => map.serialize_entry("arguments", arguments)?,
        }
        map.end()
    }
}

fn invalid_text(found: &'static str) -> DecodeError {
    DecodeError::InvalidField {
        context: "text content block",
        field: "text",
        message: format!("expected string or object, found {found}"),
    }
}

fn legacy_text_notice() {
    tracing::warn!(
        target: DEPRECATION_TARGET,
        legacy = "text",
        replacement = "arguments",
        "Structured values in `text` are deprecated; provide prompt template arguments as \
         `arguments`. A future release will require `text` to be a string."
    );
}

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back in the matching tool result
    pub id: String,

    /// Tool name exactly as the provider sent it
    pub raw_name: String,

    /// Arguments exactly as the provider sent them (JSON text, possibly invalid)
    pub raw_arguments: String,

    /// Validated tool name, when the gateway resolved one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parsed arguments, when the gateway resolved them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl ToolCall {
    /// A tool call with only the raw provider strings
    pub fn new(
        id: impl Into<String>,
        raw_name: impl Into<String>,
        raw_arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            raw_name: raw_name.into(),
            raw_arguments: raw_arguments.into(),
            name: None,
            arguments: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = Some(arguments);
        self
    }

    fn decode(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(Self {
            id: fields.required_str("id")?.to_string(),
            raw_name: fields.required_str("raw_name")?.to_string(),
            raw_arguments: fields.required_str("raw_arguments")?.to_string(),
            name: fields.optional_str("name")?.map(str::to_string),
            // `null` means unresolved, same as an absent key
            arguments: fields.get("arguments").cloned(),
        })
    }
}

/// A reasoning trace. The wire key is `value`, not `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thought {
    #[serde(rename = "value")]
    pub text: String,
}

impl Thought {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    fn decode(fields: &Fields<'_>, options: &DecodeOptions) -> DecodeResult<Self> {
        let text = match fields.get("value") {
            Some(_) => fields.required_str("value")?,
            None if options.thought_text_alias && fields.get("text").is_some() => {
                fields.required_str("text")?
            }
            None => fields.required_str("value")?,
        };
        Ok(Self::new(text))
    }
}

impl ContentBlock {
    pub(crate) fn decode(value: &Value, options: &DecodeOptions) -> DecodeResult<Self> {
        let fields = Fields::new(value, "content block")?;
        let block_type = fields.required_str("type")?;
        tracing::trace!(block_type, "decoding content block");

        match block_type {
            "text" => Text::decode(&fields.with_context("text content block"), options)
                .map(ContentBlock::Text),
            "tool_call" => ToolCall::decode(&fields.with_context("tool_call content block"))
                .map(ContentBlock::ToolCall),
            "thought" => Thought::decode(&fields.with_context("thought content block"), options)
                .map(ContentBlock::Thought),
            other => Err(DecodeError::UnknownContentBlockType {
                block_type: other.to_string(),
                payload: value.clone(),
            }),
        }
    }

    /// Wire discriminator of this block
    pub fn block_type(&self) -> &'static str {
        match self {
            ContentBlock::Text(_) => "text",
            ContentBlock::ToolCall(_) => "tool_call",
            ContentBlock::Thought(_) => "thought",
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ContentBlock::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            ContentBlock::ToolCall(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_thought(&self) -> Option<&Thought> {
        match self {
            ContentBlock::Thought(thought) => Some(thought),
            _ => None,
        }
    }
}

impl From<Text> for ContentBlock {
    fn from(text: Text) -> Self {
        ContentBlock::Text(text)
    }
}

impl From<ToolCall> for ContentBlock {
    fn from(call: ToolCall) -> Self {
        ContentBlock::ToolCall(call)
    }
}

impl From<Thought> for ContentBlock {
    fn from(thought: Thought) -> Self {
        ContentBlock::Thought(thought)
    }
}

/// Decode one content block with default options
pub fn decode_content_block(value: &Value) -> DecodeResult<ContentBlock> {
    ContentBlock::decode(value, &DecodeOptions::default())
}

// ============================================================================
// Input-only blocks
// ============================================================================

/// Text passed to the model verbatim, bypassing templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "raw_text")]
pub struct RawText {
    pub value: String,
}

/// An inline image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "image")]
pub struct ImageBase64 {
    /// Base64-encoded image bytes
    pub data: String,
    pub mime_type: String,
}

/// An image fetched by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "image")]
pub struct ImageUrl {
    pub url: String,
}

/// The result of running a tool, sent back to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "tool_result")]
pub struct ToolResult {
    pub name: String,
    pub result: String,
    /// Id of the tool call this answers
    pub id: String,
}

impl RawText {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ImageBase64 {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ToolResult {
    pub fn new(name: impl Into<String>, result: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: result.into(),
            id: id.into(),
        }
    }
}

/// Anything that can appear in an outbound message's content list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputContent {
    Block(ContentBlock),
    RawText(RawText),
    ImageBase64(ImageBase64),
    ImageUrl(ImageUrl),
    ToolResult(ToolResult),
}

impl From<ContentBlock> for InputContent {
    fn from(block: ContentBlock) -> Self {
        InputContent::Block(block)
    }
}

impl From<Text> for InputContent {
    fn from(text: Text) -> Self {
        InputContent::Block(text.into())
    }
}

impl From<ToolCall> for InputContent {
    fn from(call: ToolCall) -> Self {
        InputContent::Block(call.into())
    }
}

impl From<Thought> for InputContent {
    fn from(thought: Thought) -> Self {
        InputContent::Block(thought.into())
    }
}

impl From<RawText> for InputContent {
    fn from(raw: RawText) -> Self {
        InputContent::RawText(raw)
    }
}

impl From<ImageBase64> for InputContent {
    fn from(image: ImageBase64) -> Self {
        InputContent::ImageBase64(image)
    }
}

impl From<ImageUrl> for InputContent {
    fn from(image: ImageUrl) -> Self {
        InputContent::ImageUrl(image)
    }
}

impl From<ToolResult> for InputContent {
    fn from(result: ToolResult) -> Self {
        InputContent::ToolResult(result)
    }
}
