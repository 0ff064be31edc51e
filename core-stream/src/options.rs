//! Per-call request and upload options

use bridge_traits::http::HttpMethod;
use bridge_traits::upload::{UploadProgress, UploadSession};
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::StreamError;

/// Sub-resource views of a single video.
///
/// Only these two views exist; anything else in a request is ignored when
/// the path is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceView {
    /// Embeddable player snippet
    Embed,
    /// Signed preview link
    Preview,
}

impl ResourceView {
    /// Parse a view from its path segment
    ///
    /// # Examples
    ///
    /// ```
    /// use core_stream::ResourceView;
    ///
    /// assert_eq!(ResourceView::parse("preview"), Some(ResourceView::Preview));
    /// assert_eq!(ResourceView::parse("bogus"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "embed" => Some(ResourceView::Embed),
            "preview" => Some(ResourceView::Preview),
            _ => None,
        }
    }

    /// Path segment for this view
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceView::Embed => "embed",
            ResourceView::Preview => "preview",
        }
    }
}

impl fmt::Display for ResourceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for a single API request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Video id; without it the request targets the whole collection
    pub id: Option<String>,
    /// Sub-resource view, kept as the raw string and parsed when the path
    /// is built so unrecognized values drop out silently
    pub view: Option<String>,
    /// HTTP verb, GET when unset
    pub method: Option<HttpMethod>,
    /// Request body
    pub payload: Option<Bytes>,
    /// Extra headers, layered on top of the identity headers
    pub headers: HashMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Target of a raw API request: a literal path (or absolute URL) used
/// as-is, or structured options the client builds a path from.
#[derive(Debug, Clone)]
pub enum RequestTarget {
    Path(String),
    Options(RequestOptions),
}

impl From<&str> for RequestTarget {
    fn from(path: &str) -> Self {
        RequestTarget::Path(path.to_string())
    }
}

impl From<String> for RequestTarget {
    fn from(path: String) -> Self {
        RequestTarget::Path(path)
    }
}

impl From<RequestOptions> for RequestTarget {
    fn from(options: RequestOptions) -> Self {
        RequestTarget::Options(options)
    }
}

/// Observer of upload session start; receives the engine's session handle.
pub type StartObserver = Box<dyn Fn(&Arc<dyn UploadSession>) + Send + Sync>;
/// Observer of engine progress reports, forwarded untransformed.
pub type ProgressObserver = Box<dyn Fn(UploadProgress) + Send + Sync>;
/// Observer of the canonical resource record fetched after completion.
pub type SuccessObserver = Box<dyn Fn(&serde_json::Value) + Send + Sync>;
/// Observer of the failure an upload settled with.
pub type ErrorObserver = Box<dyn Fn(&StreamError) + Send + Sync>;

/// Options for a single upload
///
/// Each lifecycle event accepts zero or more observers; they fire in
/// registration order. Observers are best-effort notifications; the
/// settled result of [`upload`](crate::StreamClient::upload) is the
/// authoritative outcome.
#[derive(Default)]
pub struct UploadOptions {
    /// Explicit resource name; wins over any name derived from a file path
    pub name: Option<String>,
    /// Caller metadata attached to the session, copied before derivation
    pub meta: BTreeMap<String, String>,
    pub(crate) on_start: Vec<StartObserver>,
    pub(crate) on_progress: Vec<ProgressObserver>,
    pub(crate) on_success: Vec<SuccessObserver>,
    pub(crate) on_error: Vec<ErrorObserver>,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn on_start<F>(mut self, observer: F) -> Self
    where
        F: Fn(&Arc<dyn UploadSession>) + Send + Sync + 'static,
    {
        self.on_start.push(Box::new(observer));
        self
    }

    pub fn on_progress<F>(mut self, observer: F) -> Self
    where
        F: Fn(UploadProgress) + Send + Sync + 'static,
    {
        self.on_progress.push(Box::new(observer));
        self
    }

    pub fn on_success<F>(mut self, observer: F) -> Self
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        self.on_success.push(Box::new(observer));
        self
    }

    pub fn on_error<F>(mut self, observer: F) -> Self
    where
        F: Fn(&StreamError) + Send + Sync + 'static,
    {
        self.on_error.push(Box::new(observer));
        self
    }
}

impl fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOptions")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .field("on_start", &self.on_start.len())
            .field("on_progress", &self.on_progress.len())
            .field("on_success", &self.on_success.len())
            .field("on_error", &self.on_error.len())
            .finish()
    }
}
