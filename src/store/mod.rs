//! Flat blob storage layer
//!
//! The backing store is a single flat namespace of named byte objects with
//! server-side prefix listing as its only query primitive. Everything
//! hierarchical lives above this layer, in the driver.

mod client;
mod memory;

pub use client::{
    Blob, BlobInfo, BlobProperties, BlobStoreClient, ContainerProperties, CreateBlobOptions,
};
pub use memory::MemoryBlobStore;
