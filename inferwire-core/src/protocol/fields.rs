//! Field-by-name readers over borrowed JSON objects
//!
//! Every decoder in this crate goes through [`Fields`]: it reads the fields it
//! needs by name and never mutates the payload it was handed.

use super::error::{DecodeError, DecodeResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Read-only view over one JSON object being decoded
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    context: &'static str,
}

impl<'a> Fields<'a> {
    /// Borrow `value` as an object; `context` names it in error messages
    pub(crate) fn new(value: &'a Value, context: &'static str) -> DecodeResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { map, context }),
            other => Err(DecodeError::NotAnObject {
                context,
                found: json_kind(other),
            }),
        }
    }

    /// Same object, reported under a more specific name
    pub(crate) fn with_context(self, context: &'static str) -> Self {
        Self { context, ..self }
    }

    /// The field as sent, `null` included
    pub(crate) fn raw(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field)
    }

    /// The field, with `null` treated as absent
    pub(crate) fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    pub(crate) fn required(&self, field: &'static str) -> DecodeResult<&'a Value> {
        match self.map.get(field) {
            None => Err(DecodeError::MissingField {
                context: self.context,
                field,
            }),
            Some(Value::Null) => Err(self.invalid(field, "expected a value, found null")),
            Some(value) => Ok(value),
        }
    }

    pub(crate) fn required_str(&self, field: &'static str) -> DecodeResult<&'a str> {
        let value = self.required(field)?;
        value.as_str().ok_or_else(|| {
            self.invalid(field, format!("expected string, found {}", json_kind(value)))
        })
    }

    pub(crate) fn optional_str(&self, field: &'static str) -> DecodeResult<Option<&'a str>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(
                field,
                format!("expected string, found {}", json_kind(other)),
            )),
        }
    }

    pub(crate) fn optional_bool(&self, field: &'static str) -> DecodeResult<Option<bool>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(
                field,
                format!("expected boolean, found {}", json_kind(other)),
            )),
        }
    }

    pub(crate) fn required_uuid(&self, field: &'static str) -> DecodeResult<Uuid> {
        let raw = self.required_str(field)?;
        self.parse_uuid(field, raw)
    }

    pub(crate) fn optional_uuid(&self, field: &'static str) -> DecodeResult<Option<Uuid>> {
        self.optional_str(field)?
            .map(|raw| self.parse_uuid(field, raw))
            .transpose()
    }

    /// Deserialize a required field into a serde type
    pub(crate) fn required_as<T: DeserializeOwned>(&self, field: &'static str) -> DecodeResult<T> {
        let value = self.required(field)?;
        self.deserialize(field, value)
    }

    /// Deserialize an optional field; absent and `null` both yield `None`
    pub(crate) fn optional_as<T: DeserializeOwned>(
        &self,
        field: &'static str,
    ) -> DecodeResult<Option<T>> {
        self.get(field)
            .map(|value| self.deserialize(field, value))
            .transpose()
    }

    /// Reject any key that is not in `allowed`
    pub(crate) fn ensure_known(&self, allowed: &[&str]) -> DecodeResult<()> {
        match self.map.keys().find(|key| !allowed.contains(&key.as_str())) {
            Some(key) => Err(DecodeError::UnexpectedField {
                context: self.context,
                field: key.clone(),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn invalid(&self, field: &'static str, message: impl Into<String>) -> DecodeError {
        DecodeError::InvalidField {
            context: self.context,
            field,
            message: message.into(),
        }
    }

    fn parse_uuid(&self, field: &'static str, raw: &str) -> DecodeResult<Uuid> {
        Uuid::parse_str(raw).map_err(|source| DecodeError::InvalidUuid {
            context: self.context,
            field,
            source,
        })
    }

    fn deserialize<T: DeserializeOwned>(
        &self,
        field: &'static str,
        value: &Value,
    ) -> DecodeResult<T> {
        T::deserialize(value).map_err(|e| self.invalid(field, e.to_string()))
    }
}

/// Short name of a JSON value's kind, for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
