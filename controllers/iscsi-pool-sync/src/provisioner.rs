//! Pool provisioning.
//!
//! Each new target becomes a persistent iSCSI pool that is defined, marked
//! autostart and started, in that order. A failure stops at the failing step
//! and nothing already done is undone, so a defined but inactive pool may be
//! left behind for the operator.

use crate::error::ControllerError;
use iscsi_client::Target;
use std::fmt;
use tracing::info;
use uuid::Uuid;
use virt_client::{StoragePool, VirtClientTrait};

/// How far a pool got through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStage {
    Undefined,
    Defined,
    AutostartEnabled,
    Started,
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            ProvisionStage::Undefined => "undefined",
            ProvisionStage::Defined => "defined",
            ProvisionStage::AutostartEnabled => "autostart-enabled",
            ProvisionStage::Started => "started",
        };
        f.write_str(stage)
    }
}

/// A pool created for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedPool {
    pub name: String,
    pub uuid: Uuid,
    pub target: Target,
}

/// Fresh random pool UUID; collisions are not checked for.
pub fn generate_pool_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Descriptor for the pool backing `target` on `portal`.
pub fn pool_descriptor(target: &Target, portal: &str, uuid: Uuid) -> Result<StoragePool, ControllerError> {
    let name = target
        .pool_name()
        .ok_or_else(|| ControllerError::InvalidTarget(target.to_string()))?;

    Ok(StoragePool::iscsi(
        name,
        uuid.hyphenated().to_string(),
        portal,
        target.as_str(),
    ))
}

/// Define, autostart and start a pool for `target`.
pub async fn provision_pool<V>(virt: &V, portal: &str, target: &Target) -> Result<ProvisionedPool, ControllerError>
where
    V: VirtClientTrait + ?Sized,
{
    let uuid = generate_pool_uuid();
    let descriptor = pool_descriptor(target, portal, uuid)?;
    let name = descriptor.name.clone();
    let xml = descriptor.to_xml()?;

    info!("Creating pool '{}' for target '{}'", name, target);

    let failed = |stage, source| ControllerError::Provisioning {
        pool: name.clone(),
        stage,
        source,
    };

    virt.define_pool_xml(&xml)
        .await
        .map_err(|e| failed(ProvisionStage::Undefined, e))?;
    virt.set_autostart(&name, true)
        .await
        .map_err(|e| failed(ProvisionStage::Defined, e))?;
    virt.start_pool(&name)
        .await
        .map_err(|e| failed(ProvisionStage::AutostartEnabled, e))?;

    info!("Pool '{}' is {}", name, ProvisionStage::Started);

    Ok(ProvisionedPool {
        name,
        uuid,
        target: target.clone(),
    })
}
