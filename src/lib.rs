//! # blobfs
//!
//! A hierarchical filesystem driver over flat blob storage.
//!
//! blobfs exposes folder and file semantics (create, move, copy, rename,
//! delete, list, read, write) on top of an object store that has no
//! directory concept. Folders are emulated: a trailing-slash marker blob
//! makes a folder "exist", and prefix listing makes it enumerable.
//!
//! ## Core Concepts
//!
//! - **Identifier**: a path-like blob key; trailing `/` marks a folder,
//!   the root is the empty string
//! - **Folder marker**: a tiny blob whose key ends in `/`, the only trace
//!   a folder leaves in the store
//! - **Prefix listing**: the single backend primitive used to emulate
//!   directory listing and recursive operations
//!
//! Recursive folder operations (move/copy/delete) are batches of
//! independent single-blob calls with consistent identifier rewriting.
//! The backing store guarantees per-object atomicity only; a failure
//! partway through a folder operation leaves a mixed state, and concurrent
//! callers on overlapping prefixes can observe partial trees. Callers that
//! need stronger guarantees must coordinate above this layer.
//!
//! ## Example
//!
//! ```
//! use blobfs::{DriverConfiguration, HierarchicalBlobDriver, MemoryBlobStore};
//! use std::sync::Arc;
//!
//! # fn main() -> blobfs::Result<()> {
//! let config = DriverConfiguration {
//!     container_name: "mycontainer".into(),
//!     account_name: "myaccount".into(),
//!     account_key: "secret".into(),
//!     protocol: "https".into(),
//! };
//! let mut driver = HierarchicalBlobDriver::new(config, Arc::new(MemoryBlobStore::new()));
//! driver.initialize()?;
//!
//! driver.create_folder("documents", "")?;
//! let id = driver.create_file("notes.txt", "documents")?;
//! assert!(driver.file_exists(&id)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod identifier;
pub mod store;

mod capabilities;
mod error;

pub use capabilities::Capabilities;
pub use config::DriverConfiguration;
pub use driver::{HierarchicalBlobDriver, Permissions, ResourceInfo};
pub use error::{Error, Result};
pub use store::{
    Blob, BlobInfo, BlobProperties, BlobStoreClient, ContainerProperties, CreateBlobOptions,
    MemoryBlobStore,
};

/// Placeholder byte stored in place of empty content, so that empty files
/// and folder markers still exist as blobs (the DOS EOF marker, kept for
/// compatibility with stores written by older drivers)
pub const EOF_PLACEHOLDER: u8 = 0x1A;
