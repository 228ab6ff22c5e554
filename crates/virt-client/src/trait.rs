//! VirtClient trait for mocking
//!
//! This trait abstracts the libvirt storage pool operations so the sync
//! controller can run against `VirshClient` in production and an in-memory
//! mock in unit tests.

use crate::error::VirtError;
use crate::models::PoolType;

/// Trait for libvirt storage pool operations
///
/// Descriptors cross this boundary as XML strings, the same way libvirt
/// itself exchanges them. Use [`crate::StoragePool`] to parse or build them.
#[async_trait::async_trait]
pub trait VirtClientTrait: Send + Sync {
    /// Connection URI this client talks to
    fn uri(&self) -> &str;

    /// Names of all pools (active and inactive) of the given type
    async fn list_storage_pools(&self, pool_type: PoolType) -> Result<Vec<String>, VirtError>;

    /// XML descriptor of a pool
    async fn get_pool_xml_desc(&self, name: &str) -> Result<String, VirtError>;

    /// Define a persistent pool from an XML descriptor
    async fn define_pool_xml(&self, xml: &str) -> Result<(), VirtError>;

    /// Enable or disable autostart for a defined pool
    async fn set_autostart(&self, name: &str, autostart: bool) -> Result<(), VirtError>;

    /// Start (activate) a defined pool
    async fn start_pool(&self, name: &str) -> Result<(), VirtError>;
}
