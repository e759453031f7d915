//! Crate-level error types

use crate::config::ConfigError;
use crate::http::TransportError;
use crate::protocol::DecodeError;
use thiserror::Error;

/// Result type for operations that may fail in more than one way
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced by this crate.
///
/// None of these are retried here. `Transport` is the one callers are
/// expected to branch on (rate limits, bad requests); `Decode` and `Internal`
/// point at protocol drift or a caller bug.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Internal(#[from] InternalContractError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// The transport error, if this is one
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// An internal invariant was broken, e.g. a collaborator handed over state
/// this crate cannot represent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InternalContractError {
    pub message: String,
}

impl InternalContractError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
