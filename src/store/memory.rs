//! In-memory blob store
//!
//! A [`BlobStoreClient`] double backed by ordered maps, used by the test
//! suite and handy for hosts that want a throwaway storage instance.

use crate::store::client::{
    Blob, BlobInfo, BlobProperties, BlobStoreClient, ContainerProperties, CreateBlobOptions,
};
use crate::{Error, Result};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

struct StoredBlob {
    content: Bytes,
    content_type: Option<String>,
    last_modified: u64,
}

struct Container {
    blobs: BTreeMap<String, StoredBlob>,
    last_modified: u64,
}

/// An in-memory [`BlobStoreClient`] implementation
#[derive(Default)]
pub struct MemoryBlobStore {
    containers: RwLock<BTreeMap<String, Container>>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_secs())
        .unwrap_or(0)
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All blob names in a container, in key order. Test helper.
    pub fn blob_names(&self, container: &str) -> Vec<String> {
        let containers = self.containers.read();
        containers
            .get(container)
            .map(|c| c.blobs.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether a container exists
    pub fn has_container(&self, container: &str) -> bool {
        self.containers.read().contains_key(container)
    }

    fn with_container<T>(
        &self,
        container: &str,
        f: impl FnOnce(&mut Container) -> Result<T>,
    ) -> Result<T> {
        let mut containers = self.containers.write();
        let entry = containers
            .get_mut(container)
            .ok_or_else(|| Error::ContainerNotFound(container.to_string()))?;
        f(entry)
    }
}

impl BlobStoreClient for MemoryBlobStore {
    fn create_container(&self, container: &str) -> Result<()> {
        let mut containers = self.containers.write();
        containers.entry(container.to_string()).or_insert(Container {
            blobs: BTreeMap::new(),
            last_modified: unix_now(),
        });
        Ok(())
    }

    fn create_blob(
        &self,
        container: &str,
        key: &str,
        content: Bytes,
        options: Option<&CreateBlobOptions>,
    ) -> Result<()> {
        self.with_container(container, |entry| {
            entry.last_modified = unix_now();
            entry.blobs.insert(
                key.to_string(),
                StoredBlob {
                    content,
                    content_type: options.and_then(|o| o.content_type.clone()),
                    last_modified: unix_now(),
                },
            );
            Ok(())
        })
    }

    fn get_blob(&self, container: &str, key: &str) -> Result<Option<Blob>> {
        let containers = self.containers.read();
        let entry = containers
            .get(container)
            .ok_or_else(|| Error::ContainerNotFound(container.to_string()))?;
        Ok(entry.blobs.get(key).map(|stored| Blob {
            name: key.to_string(),
            content: stored.content.clone(),
            properties: BlobProperties {
                content_length: stored.content.len() as u64,
                last_modified: stored.last_modified,
                content_type: stored.content_type.clone(),
            },
        }))
    }

    fn delete_blob(&self, container: &str, key: &str) -> Result<()> {
        self.with_container(container, |entry| {
            entry
                .blobs
                .remove(key)
                .map(|_| ())
                .ok_or_else(|| Error::BlobNotFound(key.to_string()))
        })
    }

    fn copy_blob(
        &self,
        container: &str,
        target_key: &str,
        source_container: &str,
        source_key: &str,
    ) -> Result<()> {
        let source = self
            .get_blob(source_container, source_key)?
            .ok_or_else(|| Error::BlobNotFound(source_key.to_string()))?;
        let options = CreateBlobOptions {
            content_type: source.properties.content_type,
        };
        self.create_blob(container, target_key, source.content, Some(&options))
    }

    fn list_blobs(&self, container: &str, prefix: &str) -> Result<Vec<BlobInfo>> {
        let containers = self.containers.read();
        let entry = containers
            .get(container)
            .ok_or_else(|| Error::ContainerNotFound(container.to_string()))?;
        Ok(entry
            .blobs
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, stored)| BlobInfo {
                name: key.clone(),
                content_length: stored.content.len() as u64,
                last_modified: stored.last_modified,
            })
            .collect())
    }

    fn get_container_properties(&self, container: &str) -> Result<ContainerProperties> {
        let containers = self.containers.read();
        let entry = containers
            .get(container)
            .ok_or_else(|| Error::ContainerNotFound(container.to_string()))?;
        Ok(ContainerProperties {
            last_modified: entry.last_modified,
        })
    }
}
