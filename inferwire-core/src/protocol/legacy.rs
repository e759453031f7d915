//! Deprecated names for the datapoint insert payloads
//!
//! These build exactly the same values as their replacements. Each call emits
//! one deprecation notice on the [`DEPRECATION_TARGET`] log target.
#![allow(deprecated)]

use super::datapoint::{ChatDatapointInsert, JsonDatapointInsert};
use super::input::InferenceInput;
use super::options::DEPRECATION_TARGET;

/// Old name of [`ChatDatapointInsert`]
#[deprecated(since = "0.1.0", note = "use `ChatDatapointInsert` instead")]
#[derive(Debug, Clone, Copy)]
pub struct ChatInferenceDatapointInput;

impl ChatInferenceDatapointInput {
    pub fn new(function_name: impl Into<String>, input: InferenceInput) -> ChatDatapointInsert {
        deprecation_notice("ChatInferenceDatapointInput", "ChatDatapointInsert");
        ChatDatapointInsert::new(function_name, input)
    }
}

/// Old name of [`JsonDatapointInsert`]
#[deprecated(since = "0.1.0", note = "use `JsonDatapointInsert` instead")]
#[derive(Debug, Clone, Copy)]
pub struct JsonInferenceDatapointInput;

impl JsonInferenceDatapointInput {
    pub fn new(function_name: impl Into<String>, input: InferenceInput) -> JsonDatapointInsert {
        deprecation_notice("JsonInferenceDatapointInput", "JsonDatapointInsert");
        JsonDatapointInsert::new(function_name, input)
    }
}

fn deprecation_notice(legacy: &'static str, replacement: &'static str) {
    tracing::warn!(
        target: DEPRECATION_TARGET,
        legacy,
        replacement,
        "Please use `{replacement}` instead of `{legacy}`. In a future release, `{legacy}` will be removed."
    );
}
