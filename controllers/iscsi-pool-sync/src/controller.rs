//! Main controller implementation.
//!
//! A sync run is a straight pipeline, executed once per invocation:
//! discover targets on the portal, read the existing pool inventory, diff
//! the two, then provision (or, in show-only mode, print) each new target.
//! Every step runs to completion before the next starts and the first
//! failure ends the run.

use crate::config::SyncConfig;
use crate::error::ControllerError;
use crate::inventory;
use crate::provisioner::{self, ProvisionedPool};
use crate::reconciler;
use iscsi_client::{Target, TargetDiscoveryTrait};
use std::io::Write;
use tracing::info;
use virt_client::VirtClientTrait;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Everything advertised is already registered
    NoNewTargets,
    /// Show-only mode: these targets would have been provisioned
    Shown(Vec<Target>),
    /// A pool was created for each of these targets
    Provisioned(Vec<ProvisionedPool>),
}

/// Runs one reconciliation of the portal against libvirt.
#[derive(Debug)]
pub struct Controller<V, D> {
    config: SyncConfig,
    virt: V,
    discovery: D,
}

impl<V, D> Controller<V, D>
where
    V: VirtClientTrait,
    D: TargetDiscoveryTrait,
{
    /// Creates a new controller instance.
    pub fn new(config: SyncConfig, virt: V, discovery: D) -> Self {
        Self {
            config,
            virt,
            discovery,
        }
    }

    /// Targets advertised by the portal that have no pool yet.
    ///
    /// Read-only; calling it repeatedly without provisioning in between
    /// returns the same answer.
    pub async fn pending_targets(&self) -> Result<Vec<Target>, ControllerError> {
        let portal = &self.config.portal;

        let discovered = self.discovery.discover(portal).await?;
        let existing = inventory::iscsi_device_paths(&self.virt, portal).await?;

        info!(
            "Portal {} advertises {} targets, {} already registered on {}",
            portal,
            discovered.len(),
            existing.len(),
            self.virt.uri()
        );

        Ok(reconciler::new_targets(&discovered, &existing))
    }

    /// Execute a full run. Show-only output goes to `out`, one target per line.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<SyncOutcome, ControllerError> {
        let targets = self.pending_targets().await?;

        if targets.is_empty() {
            info!("No new targets found.");
            return Ok(SyncOutcome::NoNewTargets);
        }

        if self.config.show_only {
            for target in &targets {
                writeln!(out, "{}", target)?;
            }
            out.flush()?;
            info!("Show-only mode: {} new targets not provisioned", targets.len());
            return Ok(SyncOutcome::Shown(targets));
        }

        let mut provisioned = Vec::with_capacity(targets.len());
        for target in &targets {
            provisioned.push(provisioner::provision_pool(&self.virt, &self.config.portal, target).await?);
        }

        info!("Provisioned {} new pools", provisioned.len());
        Ok(SyncOutcome::Provisioned(provisioned))
    }
}
