//! Outbound rendering to the wire representation
//!
//! Every domain type implements `Serialize` with its exact wire shape, so a
//! single block, a `Vec` of them, or any structure containing them renders
//! through the same entry points.

use crate::error::InternalContractError;
use serde::Serialize;
use serde_json::Value;

/// Render a domain object (or a collection of them) as a wire JSON value
pub fn to_wire<T: Serialize + ?Sized>(value: &T) -> Result<Value, InternalContractError> {
    serde_json::to_value(value)
        .map_err(|e| InternalContractError::new(format!("failed to render wire value: {e}")))
}

/// Render a domain object (or a collection of them) as wire JSON text
pub fn to_wire_string<T: Serialize + ?Sized>(value: &T) -> Result<String, InternalContractError> {
    serde_json::to_string(value)
        .map_err(|e| InternalContractError::new(format!("failed to render wire value: {e}")))
}
