//! High-level hierarchical driver API
//!
//! This module provides the main entry point for working with a flat blob
//! store as if it were a filesystem. Folders are not stored entities: a
//! folder exists when a marker blob with a trailing-slash key exists, and
//! its contents are whatever blobs share its key prefix. Recursive folder
//! operations are plain sequences of single-blob calls with identifier
//! rewriting; there is no atomicity across them (see the crate docs).

use crate::capabilities::Capabilities;
use crate::config::DriverConfiguration;
use crate::identifier::{
    base_name, hash_identifier, is_folder, is_sub_sub_folder, normalize_folder_name,
    parent_folder_name, slash_count,
};
use crate::store::{Blob, BlobStoreClient, CreateBlobOptions};
use crate::{Error, Result, EOF_PLACEHOLDER};
use bytes::Bytes;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Whether a folder transfer duplicates or relocates its blobs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransferAction {
    Copy,
    Move,
}

/// Metadata record for a file or folder, as reported to the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    pub identifier: String,
    /// Last path component of the identifier
    pub name: String,
    /// Content length; `None` for folders and the root
    pub size: Option<u64>,
    /// Hash of the identifier string (content-independent)
    pub identifier_hash: String,
    /// Hash of the parent folder's identifier
    pub folder_hash: String,
    /// Last modification time as unix seconds
    pub mtime: u64,
}

/// Access permissions for an identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
}

/// The hierarchical filesystem driver
///
/// Translates folder-oriented operations into sequences of flat blob
/// operations against a [`BlobStoreClient`]. Construct it with a validated
/// configuration and an already-connected client, then call
/// [`initialize`](Self::initialize) before use.
pub struct HierarchicalBlobDriver {
    configuration: DriverConfiguration,
    client: Arc<dyn BlobStoreClient>,
    capabilities: Capabilities,
}

impl HierarchicalBlobDriver {
    /// Create a driver. No backend calls happen until [`initialize`](Self::initialize).
    pub fn new(configuration: DriverConfiguration, client: Arc<dyn BlobStoreClient>) -> Self {
        HierarchicalBlobDriver {
            configuration,
            client,
            capabilities: Capabilities::NONE,
        }
    }

    /// Validate the configuration, lazily create the container and
    /// establish capabilities.
    ///
    /// On a configuration error the driver stays non-functional
    /// (capabilities remain empty) but the host keeps running.
    pub fn initialize(&mut self) -> Result<()> {
        self.configuration.validate()?;
        self.client.create_container(self.container())?;
        self.capabilities =
            Capabilities::BROWSABLE | Capabilities::PUBLIC | Capabilities::WRITABLE;
        info!(
            "initialized blob driver for container {:?}",
            self.container()
        );
        Ok(())
    }

    pub fn container(&self) -> &str {
        &self.configuration.container_name
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Intersect the driver's capabilities with the host-configured mask
    pub fn merge_configuration_capabilities(&mut self, mask: Capabilities) -> Capabilities {
        self.capabilities &= mask;
        self.capabilities
    }

    // === Object creation ===

    /// Create or replace a blob at `key`.
    ///
    /// Empty content is replaced with a single `0x1A` byte so the blob
    /// exists for listing and existence checks.
    pub fn create_object(
        &self,
        key: &str,
        content: Bytes,
        options: Option<&CreateBlobOptions>,
    ) -> Result<()> {
        let content = if content.is_empty() {
            Bytes::from_static(&[EOF_PLACEHOLDER])
        } else {
            content
        };
        self.client
            .create_blob(self.container(), key, content, options)
    }

    /// Create an empty placeholder file, returning its identifier
    pub fn create_file(&self, file_name: &str, parent_folder_identifier: &str) -> Result<String> {
        let parent = normalize_folder_name(parent_folder_identifier);
        let identifier = format!("{parent}{file_name}");
        self.create_object(&identifier, Bytes::new(), None)?;
        Ok(identifier)
    }

    /// Create a folder by writing its marker blob, returning its identifier
    pub fn create_folder(
        &self,
        new_folder_name: &str,
        parent_folder_identifier: &str,
    ) -> Result<String> {
        let parent = normalize_folder_name(parent_folder_identifier);
        let name = normalize_folder_name(new_folder_name);
        let identifier = normalize_folder_name(&format!("{parent}{name}"));
        self.create_object(&identifier, Bytes::new(), None)?;
        Ok(identifier)
    }

    /// Upload a local file into a folder, returning the new identifier.
    ///
    /// Uses the local file's name when `new_file_name` is empty; removes
    /// the local source afterwards when `remove_original` is set. Content
    /// types are the caller's business: pass them through
    /// [`create_object`](Self::create_object) when needed.
    pub fn add_file(
        &self,
        local_file_path: &Path,
        target_folder_identifier: &str,
        new_file_name: &str,
        remove_original: bool,
    ) -> Result<String> {
        let file_name = if new_file_name.is_empty() {
            local_file_path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    Error::InvalidIdentifier(local_file_path.display().to_string())
                })?
                .to_string()
        } else {
            new_file_name.to_string()
        };
        let target = normalize_folder_name(target_folder_identifier);
        let identifier = format!("{target}{file_name}");

        let content = std::fs::read(local_file_path)?;
        self.create_object(&identifier, Bytes::from(content), None)?;
        if remove_original {
            std::fs::remove_file(local_file_path)?;
        }
        Ok(identifier)
    }

    /// Replace a file's content with that of a local file
    pub fn replace_file(&self, file_identifier: &str, local_file_path: &Path) -> Result<String> {
        let target_folder = parent_folder_name(file_identifier);
        let file_name = base_name(file_identifier).to_string();
        self.add_file(local_file_path, &target_folder, &file_name, false)
    }

    // === Existence checks ===

    /// Whether a file exists. Folder identifiers are never files.
    pub fn file_exists(&self, file_identifier: &str) -> Result<bool> {
        if is_folder(file_identifier) {
            return Ok(false);
        }
        Ok(self.fetch(file_identifier)?.is_some())
    }

    /// Whether a folder exists: the root always does, any other folder
    /// exists iff its marker blob does.
    pub fn folder_exists(&self, folder_identifier: &str) -> Result<bool> {
        let folder_identifier = normalize_folder_name(folder_identifier);
        if folder_identifier == normalize_folder_name(self.get_root_level_folder()) {
            return Ok(true);
        }
        Ok(self.fetch(&folder_identifier)?.is_some())
    }

    pub fn file_exists_in_folder(
        &self,
        file_name: &str,
        folder_identifier: &str,
    ) -> Result<bool> {
        let folder = normalize_folder_name(folder_identifier);
        Ok(self.fetch(&format!("{folder}{file_name}"))?.is_some())
    }

    pub fn folder_exists_in_folder(
        &self,
        folder_name: &str,
        folder_identifier: &str,
    ) -> Result<bool> {
        let identifier = self.get_folder_in_folder(folder_name, folder_identifier);
        Ok(self.fetch(&identifier)?.is_some())
    }

    // === Listing ===

    /// Identifiers of files in a folder, in backend listing order.
    ///
    /// Non-recursive mode keeps only direct children: a file in a deeper
    /// sub-folder carries more `/` separators than the folder prefix.
    /// Sorting and paging are left to the host until a listing order is
    /// defined at this layer.
    pub fn get_files_in_folder(
        &self,
        folder_identifier: &str,
        recursive: bool,
    ) -> Result<Vec<String>> {
        let prefix = normalize_folder_name(folder_identifier);
        let prefix_depth = slash_count(&prefix);
        let mut files = Vec::new();
        for info in self.client.list_blobs(self.container(), &prefix)? {
            if is_folder(&info.name) {
                continue;
            }
            if !recursive && slash_count(&info.name) > prefix_depth {
                // lives in a sub-folder
                continue;
            }
            files.push(info.name);
        }
        Ok(files)
    }

    /// Identifiers of folders in a folder, in backend listing order.
    ///
    /// The queried folder's own marker is never part of the result. A
    /// direct child marker carries exactly one more `/` than the prefix,
    /// hence the `+ 1` asymmetry against the file filter.
    pub fn get_folders_in_folder(
        &self,
        folder_identifier: &str,
        recursive: bool,
    ) -> Result<Vec<String>> {
        let prefix = normalize_folder_name(folder_identifier);
        let mut folders = Vec::new();
        for info in self.client.list_blobs(self.container(), &prefix)? {
            if info.name == prefix || !is_folder(&info.name) {
                continue;
            }
            if !recursive && is_sub_sub_folder(&info.name, &prefix) {
                continue;
            }
            folders.push(info.name);
        }
        Ok(folders)
    }

    pub fn count_files_in_folder(&self, folder_identifier: &str, recursive: bool) -> Result<usize> {
        Ok(self.get_files_in_folder(folder_identifier, recursive)?.len())
    }

    pub fn count_folders_in_folder(
        &self,
        folder_identifier: &str,
        recursive: bool,
    ) -> Result<usize> {
        Ok(self
            .get_folders_in_folder(folder_identifier, recursive)?
            .len())
    }

    /// Whether nothing at all lives under the folder prefix
    pub fn is_folder_empty(&self, folder_identifier: &str) -> Result<bool> {
        let prefix = normalize_folder_name(folder_identifier);
        Ok(self.client.list_blobs(self.container(), &prefix)?.is_empty())
    }

    // === Single-file move / copy ===

    /// Copy a file into a folder, returning the new identifier
    pub fn copy_file_within_storage(
        &self,
        file_identifier: &str,
        target_folder_identifier: &str,
        file_name: &str,
    ) -> Result<String> {
        let target = normalize_folder_name(target_folder_identifier);
        let target_identifier = format!("{target}{file_name}");
        self.copy_object(file_identifier, &target_identifier)?;
        Ok(target_identifier)
    }

    /// Move a file into a folder, returning the new identifier.
    ///
    /// Copy then delete; a failure between the two leaves both blobs in
    /// place or the copy behind, never rolls back.
    pub fn move_file_within_storage(
        &self,
        file_identifier: &str,
        target_folder_identifier: &str,
        new_file_name: &str,
    ) -> Result<String> {
        let target = normalize_folder_name(target_folder_identifier);
        let target_identifier = format!("{target}{new_file_name}");
        self.move_object(file_identifier, &target_identifier)?;
        Ok(target_identifier)
    }

    /// Rename a file in place, returning the new identifier
    pub fn rename_file(&self, file_identifier: &str, new_name: &str) -> Result<String> {
        let target_folder = parent_folder_name(file_identifier);
        self.move_file_within_storage(file_identifier, &target_folder, new_name)
    }

    // === Recursive folder move / copy ===

    /// Move a folder subtree under a new parent and name.
    ///
    /// Returns the mapping from every affected identifier to its rewritten
    /// destination identifier.
    pub fn move_folder_within_storage(
        &self,
        source_folder_identifier: &str,
        target_folder_identifier: &str,
        new_folder_name: &str,
    ) -> Result<BTreeMap<String, String>> {
        self.move_or_copy_folder(
            source_folder_identifier,
            target_folder_identifier,
            new_folder_name,
            TransferAction::Move,
        )
    }

    /// Copy a folder subtree under a new parent and name.
    ///
    /// Returns the same identifier mapping as
    /// [`move_folder_within_storage`](Self::move_folder_within_storage).
    pub fn copy_folder_within_storage(
        &self,
        source_folder_identifier: &str,
        target_folder_identifier: &str,
        new_folder_name: &str,
    ) -> Result<BTreeMap<String, String>> {
        self.move_or_copy_folder(
            source_folder_identifier,
            target_folder_identifier,
            new_folder_name,
            TransferAction::Copy,
        )
    }

    /// Rename a folder in place, returning its new identifier
    pub fn rename_folder(&self, folder_identifier: &str, new_name: &str) -> Result<String> {
        let target_parent = normalize_folder_name(&parent_folder_name(folder_identifier));
        let new_name = normalize_folder_name(new_name);
        let folder_identifier = normalize_folder_name(folder_identifier);
        self.move_folder_within_storage(&folder_identifier, &target_parent, &new_name)?;
        Ok(format!("{target_parent}{new_name}"))
    }

    fn move_or_copy_folder(
        &self,
        source_folder_identifier: &str,
        target_folder_identifier: &str,
        new_folder_name: &str,
        action: TransferAction,
    ) -> Result<BTreeMap<String, String>> {
        let destination = normalize_folder_name(&format!(
            "{}{}",
            normalize_folder_name(target_folder_identifier),
            normalize_folder_name(new_folder_name)
        ));
        let source = normalize_folder_name(source_folder_identifier);

        let mut affected = BTreeMap::new();
        for info in self.client.list_blobs(self.container(), &source)? {
            let new_identifier = format!("{destination}{}", &info.name[source.len()..]);
            match action {
                TransferAction::Copy => self.copy_object(&info.name, &new_identifier)?,
                TransferAction::Move => self.move_object(&info.name, &new_identifier)?,
            }
            affected.insert(info.name, new_identifier);
        }
        debug!(
            "{:?} folder {:?} -> {:?}: {} blobs",
            action,
            source,
            destination,
            affected.len()
        );
        Ok(affected)
    }

    // === Deletion ===

    /// Delete a file. Backend failures are reported as `false`, a missing
    /// file is not a failure.
    pub fn delete_file(&self, file_identifier: &str) -> bool {
        let attempt = || -> Result<()> {
            if self.file_exists(file_identifier)? {
                self.client.delete_blob(self.container(), file_identifier)?;
            }
            Ok(())
        };
        match attempt() {
            Ok(()) => true,
            Err(err) => {
                warn!("deleting file {:?} failed: {}", file_identifier, err);
                false
            }
        }
    }

    /// Delete a folder and everything beneath it.
    ///
    /// Deletion is always recursive regardless of `delete_recursively`;
    /// the flag exists for host-interface compatibility. Each blob is
    /// deleted independently, so a failure partway leaves a partial tree.
    pub fn delete_folder(&self, folder_identifier: &str, _delete_recursively: bool) -> Result<()> {
        let prefix = normalize_folder_name(folder_identifier);
        for info in self.client.list_blobs(self.container(), &prefix)? {
            self.client.delete_blob(self.container(), &info.name)?;
        }
        Ok(())
    }

    // === File content ===

    /// Full content of a file; empty bytes when the blob does not exist
    pub fn get_file_contents(&self, file_identifier: &str) -> Result<Bytes> {
        Ok(self
            .fetch(file_identifier)?
            .map(|blob| blob.content)
            .unwrap_or_default())
    }

    /// Unconditionally create or replace a file with the given content
    pub fn set_file_contents(&self, file_identifier: &str, contents: Bytes) -> Result<()> {
        self.client
            .create_blob(self.container(), file_identifier, contents, None)
    }

    /// Fetch a file and persist it to a caller-provided local path.
    ///
    /// Returns whether the file materialized (`false` when the blob is
    /// missing). A failed local write is fatal: a caller that assumes the
    /// temporary copy exists would silently corrupt data otherwise.
    pub fn get_file_for_local_processing(
        &self,
        file_identifier: &str,
        temporary_path: &Path,
    ) -> Result<bool> {
        match self.fetch(file_identifier)? {
            Some(blob) => {
                std::fs::write(temporary_path, &blob.content)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Stream a file's content into a writer, returning the bytes written
    pub fn dump_file_contents(
        &self,
        file_identifier: &str,
        writer: &mut dyn Write,
    ) -> Result<u64> {
        match self.fetch(file_identifier)? {
            Some(blob) => {
                writer.write_all(&blob.content)?;
                Ok(blob.content.len() as u64)
            }
            None => Ok(0),
        }
    }

    // === Metadata ===

    /// Metadata for a file identifier; the empty identifier reads the
    /// container's own properties.
    pub fn get_file_info_by_identifier(&self, file_identifier: &str) -> Result<ResourceInfo> {
        let (size, mtime) = if file_identifier.is_empty() {
            let properties = self.client.get_container_properties(self.container())?;
            (None, properties.last_modified)
        } else {
            let blob = self
                .fetch(file_identifier)?
                .ok_or_else(|| Error::BlobNotFound(file_identifier.to_string()))?;
            (
                Some(blob.properties.content_length),
                blob.properties.last_modified,
            )
        };
        Ok(ResourceInfo {
            identifier: file_identifier.to_string(),
            name: base_name(file_identifier).to_string(),
            size,
            identifier_hash: hash_identifier(file_identifier),
            folder_hash: hash_identifier(&parent_folder_name(file_identifier)),
            mtime,
        })
    }

    /// Metadata for a folder identifier
    pub fn get_folder_info_by_identifier(&self, folder_identifier: &str) -> Result<ResourceInfo> {
        let folder_identifier = normalize_folder_name(folder_identifier);
        self.get_file_info_by_identifier(&folder_identifier)
    }

    /// Access permissions for an identifier. The driver does not model
    /// per-entry permissions; everything is readable and writable.
    pub fn get_permissions(&self, _identifier: &str) -> Permissions {
        Permissions {
            read: true,
            write: true,
        }
    }

    // === URL / hashing ===

    /// Public URL of an identifier. Pure string composition, no backend call.
    pub fn get_public_url(&self, identifier: &str) -> String {
        format!(
            "{}://{}.blob.core.windows.net/{}/{}",
            self.configuration.protocol,
            self.configuration.account_name,
            self.container(),
            identifier
        )
    }

    /// Hash a file identifier. The algorithm parameter is accepted for
    /// host-interface compatibility; the hash is always BLAKE3 of the
    /// identifier string and never depends on content.
    pub fn hash(&self, file_identifier: &str, _hash_algorithm: &str) -> String {
        hash_identifier(file_identifier)
    }

    /// Hash an identifier string (content-independent)
    pub fn hash_identifier(&self, identifier: &str) -> String {
        hash_identifier(identifier)
    }

    // === Path composition ===

    /// Identifier of a file inside a folder
    pub fn get_file_in_folder(&self, file_name: &str, folder_identifier: &str) -> String {
        format!("{}{}", normalize_folder_name(folder_identifier), file_name)
    }

    /// Identifier of a folder inside a folder
    pub fn get_folder_in_folder(&self, folder_name: &str, folder_identifier: &str) -> String {
        normalize_folder_name(&format!(
            "{}{}",
            normalize_folder_name(folder_identifier),
            folder_name
        ))
    }

    /// Identifier of the folder containing `identifier`
    pub fn get_parent_folder_identifier(&self, identifier: &str) -> String {
        parent_folder_name(identifier)
    }

    /// The root folder identifier (canonically the empty string)
    pub fn get_root_level_folder(&self) -> &'static str {
        ""
    }

    /// The folder new content lands in by default
    pub fn get_default_folder(&self) -> &'static str {
        self.get_root_level_folder()
    }

    /// Whether `identifier` lies within `folder_identifier`. The root
    /// contains everything.
    pub fn is_within(&self, folder_identifier: &str, identifier: &str) -> bool {
        if folder_identifier.is_empty() {
            return true;
        }
        identifier.starts_with(&normalize_folder_name(folder_identifier))
    }

    // === Helpers ===

    /// Fetch a blob, mapping backend not-found to `None`
    fn fetch(&self, identifier: &str) -> Result<Option<Blob>> {
        self.client.get_blob(self.container(), identifier)
    }

    fn copy_object(&self, source_identifier: &str, target_identifier: &str) -> Result<()> {
        self.client.copy_blob(
            self.container(),
            target_identifier,
            self.container(),
            source_identifier,
        )
    }

    fn move_object(&self, source_identifier: &str, target_identifier: &str) -> Result<()> {
        self.copy_object(source_identifier, target_identifier)?;
        self.client.delete_blob(self.container(), source_identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBlobStore;

    fn driver() -> (HierarchicalBlobDriver, Arc<MemoryBlobStore>) {
        let store = Arc::new(MemoryBlobStore::new());
        let configuration = DriverConfiguration {
            container_name: "mycontainer".to_string(),
            account_name: "myaccount".to_string(),
            account_key: "secret".to_string(),
            protocol: "https".to_string(),
        };
        let mut driver = HierarchicalBlobDriver::new(configuration, store.clone());
        driver.initialize().unwrap();
        (driver, store)
    }

    fn seed(driver: &HierarchicalBlobDriver, keys: &[&str]) {
        for key in keys {
            driver
                .create_object(key, Bytes::from_static(b"content"), None)
                .unwrap();
        }
    }

    #[test]
    fn test_initialize_requires_configuration() {
        let store = Arc::new(MemoryBlobStore::new());
        let configuration = DriverConfiguration {
            container_name: String::new(),
            account_name: "a".to_string(),
            account_key: "k".to_string(),
            protocol: "https".to_string(),
        };
        let mut driver = HierarchicalBlobDriver::new(configuration, store);

        assert!(matches!(
            driver.initialize(),
            Err(Error::Configuration(_))
        ));
        assert!(driver.capabilities().is_empty());
    }

    #[test]
    fn test_initialize_sets_capabilities() {
        let (driver, store) = driver();
        assert!(store.has_container("mycontainer"));
        assert_eq!(
            driver.capabilities(),
            Capabilities::BROWSABLE | Capabilities::PUBLIC | Capabilities::WRITABLE
        );
    }

    #[test]
    fn test_merge_configuration_capabilities() {
        let (mut driver, _) = driver();
        let merged = driver
            .merge_configuration_capabilities(Capabilities::BROWSABLE | Capabilities::WRITABLE);
        assert!(!merged.contains(Capabilities::PUBLIC));
        assert_eq!(driver.capabilities(), merged);
    }

    #[test]
    fn test_create_file_roundtrip() {
        let (driver, _) = driver();
        let identifier = driver.create_file("test.txt", "foo").unwrap();
        assert_eq!(identifier, "foo/test.txt");
        assert!(driver.file_exists("foo/test.txt").unwrap());
    }

    #[test]
    fn test_empty_content_gets_placeholder_byte() {
        let (driver, _) = driver();
        driver.create_file("empty.txt", "").unwrap();
        let contents = driver.get_file_contents("empty.txt").unwrap();
        assert_eq!(contents, Bytes::from_static(&[EOF_PLACEHOLDER]));
    }

    #[test]
    fn test_file_exists_rejects_folder_identifiers() {
        let (driver, _) = driver();
        seed(&driver, &["foo/"]);
        assert!(!driver.file_exists("foo/").unwrap());
    }

    #[test]
    fn test_folder_exists() {
        let (driver, _) = driver();
        assert!(driver.folder_exists("").unwrap());
        assert!(driver.folder_exists("/").unwrap());
        assert!(!driver.folder_exists("foo").unwrap());

        driver.create_folder("foo", "").unwrap();
        assert!(driver.folder_exists("foo").unwrap());
        assert!(driver.folder_exists("foo/").unwrap());
    }

    #[test]
    fn test_exists_in_folder() {
        let (driver, _) = driver();
        seed(&driver, &["bar/test.txt", "bar/sub/"]);
        assert!(driver.file_exists_in_folder("test.txt", "bar").unwrap());
        assert!(!driver.file_exists_in_folder("nope.txt", "bar").unwrap());
        assert!(driver.folder_exists_in_folder("sub", "bar").unwrap());
        assert!(!driver.folder_exists_in_folder("other", "bar").unwrap());
    }

    #[test]
    fn test_files_in_folder_depth_filter() {
        let (driver, _) = driver();
        seed(
            &driver,
            &["bar/test.txt", "bar/test2.txt", "bar/foo/test2.txt", "bar/foo/"],
        );

        let direct = driver.get_files_in_folder("bar", false).unwrap();
        assert_eq!(direct, vec!["bar/test.txt", "bar/test2.txt"]);

        let all = driver.get_files_in_folder("bar", true).unwrap();
        assert_eq!(all, vec!["bar/foo/test2.txt", "bar/test.txt", "bar/test2.txt"]);
    }

    #[test]
    fn test_folders_in_folder_depth_filter() {
        let (driver, _) = driver();
        seed(&driver, &["bar/", "bar/a/", "bar/a/deep/", "bar/b/", "bar/x.txt"]);

        let direct = driver.get_folders_in_folder("bar", false).unwrap();
        assert_eq!(direct, vec!["bar/a/", "bar/b/"]);

        let all = driver.get_folders_in_folder("bar", true).unwrap();
        assert_eq!(all, vec!["bar/a/", "bar/a/deep/", "bar/b/"]);
    }

    #[test]
    fn test_counts() {
        let (driver, _) = driver();
        seed(&driver, &["bar/", "bar/a/", "bar/a/x.txt", "bar/y.txt"]);
        assert_eq!(driver.count_files_in_folder("bar", false).unwrap(), 1);
        assert_eq!(driver.count_files_in_folder("bar", true).unwrap(), 2);
        assert_eq!(driver.count_folders_in_folder("bar", false).unwrap(), 1);
    }

    #[test]
    fn test_is_folder_empty() {
        let (driver, _) = driver();
        assert!(driver.is_folder_empty("bar").unwrap());
        seed(&driver, &["bar/test.txt"]);
        assert!(!driver.is_folder_empty("bar").unwrap());
    }

    #[test]
    fn test_move_folder_rewrites_identifiers() {
        let (driver, store) = driver();
        seed(&driver, &["bar/test.txt"]);

        let affected = driver
            .move_folder_within_storage("bar", "foo", "hans")
            .unwrap();

        let expected: BTreeMap<String, String> =
            [("bar/test.txt".to_string(), "foo/hans/test.txt".to_string())]
                .into_iter()
                .collect();
        assert_eq!(affected, expected);
        assert_eq!(store.blob_names("mycontainer"), vec!["foo/hans/test.txt"]);
    }

    #[test]
    fn test_copy_folder_keeps_source() {
        let (driver, store) = driver();
        seed(&driver, &["bar/", "bar/test.txt", "bar/sub/", "bar/sub/deep.txt"]);

        let affected = driver
            .copy_folder_within_storage("bar", "foo", "hans")
            .unwrap();

        assert_eq!(affected.len(), 4);
        assert_eq!(affected["bar/sub/deep.txt"], "foo/hans/sub/deep.txt");
        let names = store.blob_names("mycontainer");
        assert!(names.contains(&"bar/test.txt".to_string()));
        assert!(names.contains(&"foo/hans/test.txt".to_string()));
        assert!(names.contains(&"foo/hans/".to_string()));
    }

    #[test]
    fn test_rename_folder() {
        let (driver, store) = driver();
        seed(&driver, &["a/b/", "a/b/file.txt"]);

        let new_identifier = driver.rename_folder("a/b", "c").unwrap();
        assert_eq!(new_identifier, "a/c/");
        let names = store.blob_names("mycontainer");
        assert_eq!(names, vec!["a/c/", "a/c/file.txt"]);
    }

    #[test]
    fn test_rename_file() {
        let (driver, store) = driver();
        seed(&driver, &["foo/old.txt"]);

        let new_identifier = driver.rename_file("foo/old.txt", "new.txt").unwrap();
        assert_eq!(new_identifier, "foo/new.txt");
        assert_eq!(store.blob_names("mycontainer"), vec!["foo/new.txt"]);
    }

    #[test]
    fn test_move_file_within_storage() {
        let (driver, store) = driver();
        seed(&driver, &["bar/test.txt"]);

        let new_identifier = driver
            .move_file_within_storage("bar/test.txt", "foo", "moved.txt")
            .unwrap();
        assert_eq!(new_identifier, "foo/moved.txt");
        assert_eq!(store.blob_names("mycontainer"), vec!["foo/moved.txt"]);
    }

    #[test]
    fn test_copy_file_within_storage() {
        let (driver, _) = driver();
        seed(&driver, &["bar/test.txt"]);

        let new_identifier = driver
            .copy_file_within_storage("bar/test.txt", "foo", "copy.txt")
            .unwrap();
        assert_eq!(new_identifier, "foo/copy.txt");
        assert!(driver.file_exists("bar/test.txt").unwrap());
        assert!(driver.file_exists("foo/copy.txt").unwrap());
    }

    #[test]
    fn test_delete_file() {
        let (driver, _) = driver();
        seed(&driver, &["doomed.txt"]);
        assert!(driver.delete_file("doomed.txt"));
        assert!(!driver.file_exists("doomed.txt").unwrap());
        // deleting a missing file is not a failure
        assert!(driver.delete_file("doomed.txt"));
    }

    #[test]
    fn test_delete_folder_is_always_recursive() {
        let (driver, store) = driver();
        seed(&driver, &["bar/", "bar/a.txt", "bar/sub/", "bar/sub/b.txt", "keep.txt"]);

        driver.delete_folder("bar", false).unwrap();
        assert_eq!(store.blob_names("mycontainer"), vec!["keep.txt"]);
    }

    #[test]
    fn test_get_file_contents_missing_is_empty() {
        let (driver, _) = driver();
        assert!(driver.get_file_contents("missing.txt").unwrap().is_empty());
    }

    #[test]
    fn test_set_file_contents_overwrites() {
        let (driver, _) = driver();
        driver
            .set_file_contents("f.txt", Bytes::from_static(b"one"))
            .unwrap();
        driver
            .set_file_contents("f.txt", Bytes::from_static(b"two"))
            .unwrap();
        assert_eq!(
            driver.get_file_contents("f.txt").unwrap(),
            Bytes::from_static(b"two")
        );
    }

    #[test]
    fn test_dump_file_contents() {
        let (driver, _) = driver();
        seed(&driver, &["foo/test.txt"]);

        let mut out = Vec::new();
        let written = driver.dump_file_contents("foo/test.txt", &mut out).unwrap();
        assert_eq!(written, 7);
        assert_eq!(out, b"content");

        let mut empty = Vec::new();
        assert_eq!(driver.dump_file_contents("missing", &mut empty).unwrap(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_get_public_url_is_pure() {
        let (driver, _) = driver();
        let url = driver.get_public_url("foo/test.txt");
        assert_eq!(
            url,
            "https://myaccount.blob.core.windows.net/mycontainer/foo/test.txt"
        );
        assert_eq!(url, driver.get_public_url("foo/test.txt"));
    }

    #[test]
    fn test_hash_ignores_content() {
        let (driver, _) = driver();
        seed(&driver, &["foo/test.txt"]);
        let before = driver.hash("foo/test.txt", "sha1");
        driver
            .set_file_contents("foo/test.txt", Bytes::from_static(b"changed"))
            .unwrap();
        let after = driver.hash("foo/test.txt", "sha1");
        assert_eq!(before, after);
        assert_eq!(before, driver.hash_identifier("foo/test.txt"));
    }

    #[test]
    fn test_file_info() {
        let (driver, _) = driver();
        seed(&driver, &["foo/test.txt"]);

        let info = driver.get_file_info_by_identifier("foo/test.txt").unwrap();
        assert_eq!(info.identifier, "foo/test.txt");
        assert_eq!(info.name, "test.txt");
        assert_eq!(info.size, Some(7));
        assert_eq!(info.identifier_hash, hash_identifier("foo/test.txt"));
        assert_eq!(info.folder_hash, hash_identifier("foo"));
    }

    #[test]
    fn test_file_info_for_root_reads_container() {
        let (driver, _) = driver();
        let info = driver.get_file_info_by_identifier("").unwrap();
        assert_eq!(info.identifier, "");
        assert_eq!(info.size, None);
    }

    #[test]
    fn test_folder_info_normalizes() {
        let (driver, _) = driver();
        seed(&driver, &["foo/"]);
        let info = driver.get_folder_info_by_identifier("foo").unwrap();
        assert_eq!(info.identifier, "foo/");
        assert_eq!(info.name, "foo");
    }

    #[test]
    fn test_missing_file_info_is_an_error() {
        let (driver, _) = driver();
        assert!(matches!(
            driver.get_file_info_by_identifier("missing.txt"),
            Err(Error::BlobNotFound(_))
        ));
    }

    #[test]
    fn test_path_composition() {
        let (driver, _) = driver();
        assert_eq!(driver.get_file_in_folder("a.txt", "foo"), "foo/a.txt");
        assert_eq!(driver.get_folder_in_folder("bar", "foo"), "foo/bar/");
        assert_eq!(driver.get_parent_folder_identifier("foo/bar/a.txt"), "foo/bar");
        assert_eq!(driver.get_root_level_folder(), "");
        assert_eq!(driver.get_default_folder(), "");
    }

    #[test]
    fn test_is_within() {
        let (driver, _) = driver();
        assert!(driver.is_within("", "anything/at/all.txt"));
        assert!(driver.is_within("foo", "foo/a.txt"));
        assert!(!driver.is_within("foo", "foobar/a.txt"));
    }

    #[test]
    fn test_permissions() {
        let (driver, _) = driver();
        let permissions = driver.get_permissions("foo/test.txt");
        assert!(permissions.read);
        assert!(permissions.write);
    }
}
