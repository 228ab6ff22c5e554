//! libvirt iSCSI Pool Sync
//!
//! Registers iSCSI targets advertised by a portal as libvirt storage pools.
//!
//! Meant to be run periodically (systemd timer, cron). Each run discovers
//! the portal's targets, compares them with the iSCSI pools libvirt already
//! has for that portal and defines, autostarts and starts a pool for every
//! target that is new. With `--show` the new targets are only printed.

mod config;
mod controller;
mod error;
mod inventory;
mod logging;
mod provisioner;
mod reconciler;
#[cfg(test)]
mod test_utils;

use crate::config::{Cli, SyncConfig};
use crate::controller::{Controller, SyncOutcome};
use crate::error::ControllerError;
use clap::{CommandFactory, Parser};
use iscsi_client::IscsiAdmClient;
use std::process::ExitCode;
use tracing::{error, info};
use virt_client::VirshClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match SyncConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n", e);
            if let Err(help_err) = Cli::command().print_help() {
                eprintln!("{}", help_err);
            }
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.log_file) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting libvirt iSCSI sync");
    info!("Configuration:");
    info!("  libvirt URI: {}", config.libvirt_uri);
    info!("  iSCSI portal: {}", config.portal);
    info!("  iscsiadm: {}", config.iscsiadm_path.display());
    info!("  Show only: {}", config.show_only);

    match run(&config).await {
        Ok(SyncOutcome::Provisioned(pools)) => {
            for pool in &pools {
                info!("Created pool '{}' ({}) for target '{}'", pool.name, pool.uuid, pool.target);
            }
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &SyncConfig) -> Result<SyncOutcome, ControllerError> {
    let virt = VirshClient::connect(&config.virsh_path, &config.libvirt_uri).await?;
    let discovery = IscsiAdmClient::new(&config.iscsiadm_path);

    let controller = Controller::new(config.clone(), virt, discovery);
    let mut stdout = std::io::stdout().lock();
    controller.run(&mut stdout).await
}
