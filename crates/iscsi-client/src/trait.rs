//! TargetDiscovery trait for mocking

use crate::error::IscsiError;
use crate::target::Target;

/// Trait for iSCSI target discovery
///
/// Implemented by `IscsiAdmClient`; tests use `MockTargetDiscovery`.
#[async_trait::async_trait]
pub trait TargetDiscoveryTrait: Send + Sync {
    /// Targets advertised by `portal`, in the order reported
    async fn discover(&self, portal: &str) -> Result<Vec<Target>, IscsiError>;
}
