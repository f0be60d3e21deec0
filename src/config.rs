//! Driver configuration
//!
//! Carries the storage-account coordinates the driver needs to address its
//! container and compose public URLs. Building the actual connection or
//! signing requests is the backing client's business, not ours.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a [`HierarchicalBlobDriver`](crate::HierarchicalBlobDriver)
///
/// Deserializes from the host's camelCase configuration records:
///
/// ```json
/// {
///     "containerName": "mycontainer",
///     "accountName": "myaccount",
///     "accountKey": "...",
///     "defaultEndpointsProtocol": "https"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverConfiguration {
    /// Name of the flat container holding every blob of this storage
    pub container_name: String,
    /// Storage account name, used as the public URL host prefix
    pub account_name: String,
    /// Storage account key (consumed by the backing client, not the driver)
    pub account_key: String,
    /// URL scheme for public URLs, usually `https`
    #[serde(rename = "defaultEndpointsProtocol")]
    pub protocol: String,
}

impl DriverConfiguration {
    /// Check that every required setting is present.
    ///
    /// Fails with [`Error::Configuration`] naming the first missing setting;
    /// an invalid configuration leaves the driver non-functional but must
    /// not take the host down.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("containerName", &self.container_name),
            ("accountName", &self.account_name),
            ("accountKey", &self.account_key),
            ("defaultEndpointsProtocol", &self.protocol),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(Error::Configuration(name.to_string()));
            }
        }
        Ok(())
    }
}
