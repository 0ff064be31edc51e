//! Error types for the Stream client

use bridge_traits::error::BridgeError;
use bridge_traits::upload::TransportFailure;
use thiserror::Error;

/// Stream client errors
#[derive(Error, Debug)]
pub enum StreamError {
    /// Credentials missing or empty at construction
    #[error("Cloudflare credentials required: {0}")]
    Configuration(String),

    /// Upload input could not be resolved to readable bytes
    #[error("Input file required: {0}")]
    Input(String),

    /// The API answered with a non-empty error list, carried verbatim
    #[error("Cloudflare API returned {} error(s)", .0.len())]
    Api(Vec<serde_json::Value>),

    /// Connection-level failure, message resolved by
    /// [`classify_transport_failure`]
    #[error("{0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, StreamError>;

/// Resolve a transport failure to one concrete message.
///
/// Preference order: a 403 status always reads as rejected credentials,
/// then the raw response text, then the plain failure reason, then the
/// generic message.
pub fn classify_transport_failure(failure: &TransportFailure) -> String {
    if failure.status == Some(403) {
        return "invalid credentials".to_string();
    }
    if let Some(text) = failure.response_text.as_deref() {
        if !text.is_empty() {
            return text.to_string();
        }
    }
    if let Some(reason) = failure.reason.as_deref() {
        if !reason.is_empty() {
            return reason.to_string();
        }
    }
    failure.message.clone()
}

impl StreamError {
    /// Build a `Transport` error from a raw failure record.
    pub(crate) fn transport(failure: &TransportFailure) -> Self {
        StreamError::Transport(classify_transport_failure(failure))
    }

    /// Build a `Transport` error from a bridge-level failure, which carries
    /// no HTTP context.
    pub(crate) fn from_bridge(error: BridgeError) -> Self {
        StreamError::transport(&TransportFailure::new(error.to_string()))
    }
}
