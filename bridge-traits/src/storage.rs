//! File System Abstraction
//!
//! Platform-agnostic file access used to resolve path-shaped upload input.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

use crate::error::Result;

/// File metadata information
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub modified_at: Option<i64>,
    pub is_directory: bool,
}

/// File system access trait
///
/// Abstracts local reads so the client core stays portable across hosts
/// (direct filesystem, sandboxed app directories, virtual stores).
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::FileSystemAccess;
/// use std::path::Path;
///
/// async fn load(fs: &dyn FileSystemAccess) -> Result<bytes::Bytes> {
///     fs.read_file(Path::new("clip.mp4")).await
/// }
/// ```
#[async_trait]
pub trait FileSystemAccess: Send + Sync {
    /// Check if a file or directory exists
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Get metadata for a file or directory
    async fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Read entire file contents into memory
    ///
    /// Upload input is buffered whole before being handed to the engine.
    async fn read_file(&self, path: &Path) -> Result<Bytes>;
}
