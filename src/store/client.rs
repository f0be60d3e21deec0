//! Backing store contract
//!
//! The driver reaches the object store exclusively through the
//! [`BlobStoreClient`] trait, so any SDK (or an in-memory double) can sit
//! behind it. All calls are synchronous and act on one object at a time;
//! the store guarantees per-object atomicity and nothing more.

use crate::Result;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Options for blob creation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateBlobOptions {
    /// Content type recorded on the blob, e.g. `text/plain`
    pub content_type: Option<String>,
}

/// Metadata attached to a stored blob
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobProperties {
    /// Content length in bytes
    pub content_length: u64,
    /// Last modification time as unix seconds
    pub last_modified: u64,
    /// Content type, if one was recorded
    pub content_type: Option<String>,
}

/// A fetched blob: its key, full content and properties
#[derive(Clone, Debug)]
pub struct Blob {
    /// The blob's name (= its identifier in the emulated filesystem)
    pub name: String,
    /// Full content, materialized in memory for the duration of one call
    pub content: Bytes,
    pub properties: BlobProperties,
}

/// One entry of a prefix listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobInfo {
    pub name: String,
    pub content_length: u64,
    /// Last modification time as unix seconds
    pub last_modified: u64,
}

/// Metadata of a container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerProperties {
    /// Last modification time as unix seconds
    pub last_modified: u64,
}

/// The object-store operations the driver depends on.
///
/// Implementations wrap a storage SDK; [`MemoryBlobStore`](crate::MemoryBlobStore)
/// implements the same contract in memory for tests.
pub trait BlobStoreClient: Send + Sync {
    /// Create a container. Creating an existing container is a success.
    fn create_container(&self, container: &str) -> Result<()>;

    /// Create or replace the blob at `key`
    fn create_blob(
        &self,
        container: &str,
        key: &str,
        content: Bytes,
        options: Option<&CreateBlobOptions>,
    ) -> Result<()>;

    /// Fetch a blob with its content. `Ok(None)` when the key does not exist.
    fn get_blob(&self, container: &str, key: &str) -> Result<Option<Blob>>;

    /// Delete the blob at `key`. Deleting a missing blob is an error.
    fn delete_blob(&self, container: &str, key: &str) -> Result<()>;

    /// Server-side copy from `source_key` to `target_key`
    fn copy_blob(
        &self,
        container: &str,
        target_key: &str,
        source_container: &str,
        source_key: &str,
    ) -> Result<()>;

    /// List every blob whose key starts with `prefix`. An empty listing is
    /// a valid result, not an error.
    fn list_blobs(&self, container: &str, prefix: &str) -> Result<Vec<BlobInfo>>;

    /// Fetch container metadata
    fn get_container_properties(&self, container: &str) -> Result<ContainerProperties>;
}
