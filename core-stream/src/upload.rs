//! Upload orchestration over the resumable-upload engine
//!
//! Resolves caller input to bytes, derives session metadata, delegates the
//! transfer to the injected engine, and bridges the engine's lifecycle
//! callbacks into one settled result plus the caller's observers.

use bridge_traits::upload::{SessionOptions, TransportFailure, UploadComplete, UploadEvents};
use bytes::Bytes;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::{debug, instrument};

use crate::client::StreamClient;
use crate::error::{Result, StreamError};
use crate::options::UploadOptions;

/// Fixed chunk size handed to the engine (5 MiB).
pub const UPLOAD_CHUNK_SIZE: u64 = 5_242_880;

/// Upload input, resolved once at the orchestrator's entry point.
///
/// Downstream code branches on this tag only.
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// Local file, read whole through the filesystem capability
    FilePath(PathBuf),
    /// In-memory buffer, used directly
    InMemory(Bytes),
}

impl From<&str> for UploadSource {
    fn from(path: &str) -> Self {
        UploadSource::FilePath(PathBuf::from(path))
    }
}

impl From<&Path> for UploadSource {
    fn from(path: &Path) -> Self {
        UploadSource::FilePath(path.to_path_buf())
    }
}

impl From<PathBuf> for UploadSource {
    fn from(path: PathBuf) -> Self {
        UploadSource::FilePath(path)
    }
}

impl From<Bytes> for UploadSource {
    fn from(bytes: Bytes) -> Self {
        UploadSource::InMemory(bytes)
    }
}

impl From<Vec<u8>> for UploadSource {
    fn from(bytes: Vec<u8>) -> Self {
        UploadSource::InMemory(Bytes::from(bytes))
    }
}

impl StreamClient {
    /// Upload a video and return its canonical resource record.
    ///
    /// The transfer itself is delegated to the injected engine with a
    /// fixed 5 MiB chunk size; this call settles once the engine reports a
    /// terminal event and, on success, the follow-up record fetch
    /// resolves. Exactly one of the `on_success` / `on_error` observer
    /// sets fires per upload.
    ///
    /// # Errors
    ///
    /// [`StreamError::Input`] when the source yields no readable bytes
    /// (nothing is sent in that case), [`StreamError::Transport`] for
    /// engine failures, [`StreamError::Api`] / [`StreamError::Transport`]
    /// from the follow-up record fetch.
    #[instrument(skip(self, source, options))]
    pub async fn upload(
        &self,
        source: impl Into<UploadSource>,
        options: UploadOptions,
    ) -> Result<Value> {
        let source = source.into();
        let UploadOptions {
            name,
            meta,
            on_start,
            on_progress,
            on_success,
            on_error,
        } = options;

        let deps = self.dependencies();

        let buffer = match &source {
            UploadSource::FilePath(path) => {
                deps.filesystem.read_file(path).await.map_err(|e| {
                    StreamError::Input(format!("{}: {e}", path.display()))
                })?
            }
            UploadSource::InMemory(bytes) => bytes.clone(),
        };
        if buffer.is_empty() {
            return Err(StreamError::Input("no readable content".to_string()));
        }

        let metadata = derive_metadata(&source, name.as_deref(), &meta);
        debug!(?metadata, size = buffer.len(), "starting upload session");

        let session_options =
            SessionOptions::new(self.credentials().upload_endpoint(), UPLOAD_CHUNK_SIZE)
                .metadata(metadata)
                .headers(self.credentials().identity_headers());

        // One terminal event settles the call; the shared slot drops any
        // second report from the engine.
        let (settled_tx, settled_rx) =
            oneshot::channel::<std::result::Result<UploadComplete, TransportFailure>>();
        let settled_tx = Arc::new(Mutex::new(Some(settled_tx)));

        let error_tx = Arc::clone(&settled_tx);
        let success_tx = settled_tx;
        let events = UploadEvents {
            on_error: Box::new(move |failure| {
                if let Some(tx) = error_tx.lock().ok().and_then(|mut slot| slot.take()) {
                    let _ = tx.send(Err(failure));
                }
            }),
            on_progress: Box::new(move |progress| {
                for observer in &on_progress {
                    observer(progress);
                }
            }),
            on_success: Box::new(move |complete| {
                if let Some(tx) = success_tx.lock().ok().and_then(|mut slot| slot.take()) {
                    let _ = tx.send(Ok(complete));
                }
            }),
        };

        let session = match deps
            .upload_engine
            .start(buffer, session_options, events)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                let err = StreamError::transport(&TransportFailure::new(e.to_string()));
                for observer in &on_error {
                    observer(&err);
                }
                return Err(err);
            }
        };

        for observer in &on_start {
            observer(&session);
        }

        match settled_rx.await {
            Ok(Ok(complete)) => {
                debug!(location = %complete.location, "upload complete, fetching resource record");
                match self.request(complete.location).await {
                    Ok(record) => {
                        for observer in &on_success {
                            observer(&record);
                        }
                        Ok(record)
                    }
                    Err(err) => {
                        for observer in &on_error {
                            observer(&err);
                        }
                        Err(err)
                    }
                }
            }
            Ok(Err(failure)) => {
                let err = StreamError::transport(&failure);
                for observer in &on_error {
                    observer(&err);
                }
                Err(err)
            }
            Err(_) => {
                let err = StreamError::Transport(
                    "upload engine dropped the session without reporting a result".to_string(),
                );
                for observer in &on_error {
                    observer(&err);
                }
                Err(err)
            }
        }
    }
}

/// Derive the session metadata for an upload.
///
/// Starts from the caller's metadata (copied). `name` is the explicit name
/// when given, else the file stem for path input. `type` becomes
/// `video/mp4` only for path input with the `mp4` extension.
fn derive_metadata(
    source: &UploadSource,
    explicit_name: Option<&str>,
    meta: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut metadata = meta.clone();

    let path = match source {
        UploadSource::FilePath(path) => Some(path.as_path()),
        UploadSource::InMemory(_) => None,
    };

    match (explicit_name, path) {
        (Some(name), _) => {
            metadata.insert("name".to_string(), name.to_string());
        }
        (None, Some(path)) => {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                metadata.insert("name".to_string(), stem.to_string());
            }
        }
        (None, None) => {}
    }

    if let Some(path) = path {
        if path.extension().and_then(|e| e.to_str()) == Some("mp4") {
            metadata.insert("type".to_string(), "video/mp4".to_string());
        }
    }

    metadata
}
