//! # Host Bridge Traits
//!
//! Contracts for the external collaborators the Stream client delegates to.
//!
//! ## Overview
//!
//! The client core orchestrates; everything that touches the outside world
//! is a capability injected by the host. This crate defines those
//! capabilities:
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP execution for the REST
//!   surface
//! - [`UploadEngine`](upload::UploadEngine) - the resumable chunked-upload
//!   engine (chunking, retry, resumption all live behind this boundary)
//! - [`FileSystemAccess`](storage::FileSystemAccess) - local reads for
//!   path-shaped upload input
//!
//! Desktop hosts get `HttpClient` and `FileSystemAccess` implementations
//! from `bridge-desktop`. No `UploadEngine` implementation ships in this
//! workspace; hosts wire in their own.
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert platform-specific errors into it and keep messages
//! actionable.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so handles can be shared
//! across async tasks as `Arc<dyn Trait>`.

pub mod error;
pub mod http;
pub mod storage;
pub mod upload;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use storage::{FileMetadata, FileSystemAccess};
pub use upload::{
    SessionOptions, TransportFailure, UploadComplete, UploadEngine, UploadEvents, UploadProgress,
    UploadSession,
};
