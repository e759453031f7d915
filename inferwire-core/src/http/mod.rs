//! HTTP boundary helpers
//!
//! Requests are sent by an external transport. This module only covers what
//! crosses back into this crate when a call fails.

pub mod error;

pub use error::{parse_retry_after, TransportError};
