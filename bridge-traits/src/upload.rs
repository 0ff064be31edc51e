//! Resumable Upload Engine Abstraction
//!
//! Contract for the external chunked-upload engine. The engine owns the
//! wire protocol: it splits the payload into fixed-size chunks, transmits
//! them with its own retry and resumption handling, and reports lifecycle
//! through the callbacks it is handed at session creation. This crate only
//! defines the boundary; no protocol implementation lives in the workspace.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Configuration for a single upload session.
///
/// Headers are carried per session so two clients with different
/// credentials never share engine-global state.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Creation endpoint the session is opened against
    pub endpoint: String,
    /// Fixed chunk size in bytes
    pub chunk_size: u64,
    /// Metadata attached to the session at creation
    pub metadata: BTreeMap<String, String>,
    /// Headers sent with every session request
    pub headers: HashMap<String, String>,
}

impl SessionOptions {
    pub fn new(endpoint: impl Into<String>, chunk_size: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            chunk_size,
            metadata: BTreeMap::new(),
            headers: HashMap::new(),
        }
    }

    pub fn metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Merge a header map into the session headers. Existing keys are
    /// overwritten.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Progress report forwarded verbatim from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_uploaded: u64,
    pub bytes_total: u64,
}

/// Terminal success report from the engine.
#[derive(Debug, Clone)]
pub struct UploadComplete {
    /// Location of the created resource, as reported by the session
    pub location: String,
}

/// Connection-level failure record surfaced by transports and engines.
///
/// Carries every piece of context a failed exchange may have produced;
/// callers resolve it to a single message with their own preference rules.
#[derive(Debug, Clone, Default)]
pub struct TransportFailure {
    /// HTTP status of the failed exchange, when one was received
    pub status: Option<u16>,
    /// Raw response body text, when one was received
    pub response_text: Option<String>,
    /// Plain failure reason, for failures that never reached the wire
    pub reason: Option<String>,
    /// Generic fallback message
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_response_text(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Lifecycle callbacks handed to the engine for a single session.
///
/// The engine must invoke exactly one of `on_error` / `on_success` per
/// session, and may invoke `on_progress` any number of times before the
/// terminal callback.
pub struct UploadEvents {
    pub on_error: Box<dyn FnOnce(TransportFailure) + Send>,
    pub on_progress: Box<dyn Fn(UploadProgress) + Send + Sync>,
    pub on_success: Box<dyn FnOnce(UploadComplete) + Send>,
}

/// Handle to an upload session in flight.
///
/// Offers introspection only; pause and abort stay with the engine.
pub trait UploadSession: Send + Sync {
    /// Resumable session URL, available once the engine has created the
    /// remote session.
    fn upload_url(&self) -> Option<String>;
}

/// Resumable upload engine trait
///
/// Hosts inject an implementation; the workspace ships none. The engine is
/// solely responsible for chunking, retry, and resumption.
#[async_trait]
pub trait UploadEngine: Send + Sync {
    /// Create a session for `input` and start transmitting immediately.
    ///
    /// Lifecycle is reported through `events`; the returned handle allows
    /// session introspection while the transfer runs.
    ///
    /// # Errors
    ///
    /// Returns error only when the session cannot be created at all;
    /// failures after creation are delivered via `events.on_error`.
    async fn start(
        &self,
        input: Bytes,
        options: SessionOptions,
        events: UploadEvents,
    ) -> Result<Arc<dyn UploadSession>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_options_builder() {
        let mut identity = HashMap::new();
        identity.insert("X-Auth-Email".to_string(), "user@example.com".to_string());

        let mut metadata = BTreeMap::new();
        metadata.insert("name".to_string(), "clip".to_string());

        let options = SessionOptions::new("https://upload.example.com", 5_242_880)
            .metadata(metadata)
            .headers(identity)
            .header("X-Custom", "1");

        assert_eq!(options.endpoint, "https://upload.example.com");
        assert_eq!(options.chunk_size, 5_242_880);
        assert_eq!(options.metadata.get("name"), Some(&"clip".to_string()));
        assert_eq!(
            options.headers.get("X-Auth-Email"),
            Some(&"user@example.com".to_string())
        );
        assert_eq!(options.headers.get("X-Custom"), Some(&"1".to_string()));
    }

    #[test]
    fn test_transport_failure_builder() {
        let failure = TransportFailure::new("request failed")
            .with_status(500)
            .with_response_text("internal error");

        assert_eq!(failure.status, Some(500));
        assert_eq!(failure.response_text.as_deref(), Some("internal error"));
        assert_eq!(failure.reason, None);
        assert_eq!(failure.to_string(), "request failed");
    }
}
