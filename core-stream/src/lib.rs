//! # Cloudflare Stream Client
//!
//! Thin async client binding the Cloudflare Stream REST API and a
//! resumable-upload engine into one convenience object.
//!
//! ## Overview
//!
//! This crate provides:
//! - Credential validation and endpoint derivation, fixed per client
//! - Request normalization over the Stream REST surface (path building,
//!   identity headers, body-driven response classification)
//! - Upload orchestration: input resolution, metadata derivation, and
//!   delegation to the injected chunked-upload engine
//! - The fixed convenience operations (list, get, preview link, embed
//!   code, delete)
//!
//! The HTTP transport, the upload engine, and filesystem access are
//! external collaborators injected via [`StreamDependencies`]. This layer
//! owns no wire protocol and performs no retries of its own.

pub mod client;
pub mod credentials;
pub mod error;
pub mod options;
pub mod upload;

pub use client::{StreamClient, StreamDependencies};
pub use credentials::{Credentials, API_HOST};
pub use error::{classify_transport_failure, Result, StreamError};
pub use options::{
    ErrorObserver, ProgressObserver, RequestOptions, RequestTarget, ResourceView, StartObserver,
    SuccessObserver, UploadOptions,
};
pub use upload::{UploadSource, UPLOAD_CHUNK_SIZE};
