//! Command line and environment configuration.
//!
//! Flags are parsed once into `Cli` and validated into an immutable
//! `SyncConfig`, which is what the rest of the controller sees.

use crate::error::ControllerError;
use clap::Parser;
use std::path::PathBuf;

/// Register newly advertised iSCSI targets as libvirt storage pools
#[derive(Debug, Parser)]
#[command(name = "libvirt-iscsi-sync", version, about)]
pub struct Cli {
    /// Log file path
    #[arg(long, env = "LOG_FILE", default_value = "/var/log/libvirt_iscsi_sync.log")]
    pub log: PathBuf,

    /// libvirt connection URI
    #[arg(long, env = "LIBVIRT_URI", default_value = "qemu:///system")]
    pub uri: String,

    /// Path of the iscsiadm binary
    #[arg(long = "path", env = "ISCSIADM_PATH", default_value = "/usr/sbin/iscsiadm")]
    pub iscsiadm_path: PathBuf,

    /// Path of the virsh binary
    #[arg(long = "virsh", env = "VIRSH_PATH", default_value = "virsh")]
    pub virsh_path: PathBuf,

    /// iSCSI portal address (required)
    #[arg(long, env = "ISCSI_ADDR")]
    pub addr: Option<String>,

    /// Do not create pools, just print new targets
    #[arg(long)]
    pub show: bool,
}

/// Validated settings for one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub log_file: PathBuf,
    pub libvirt_uri: String,
    pub iscsiadm_path: PathBuf,
    pub virsh_path: PathBuf,
    /// Portal queried for targets and matched against pool source hosts
    pub portal: String,
    pub show_only: bool,
}

impl TryFrom<Cli> for SyncConfig {
    type Error = ControllerError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        // Matched verbatim against pool host names, so only emptiness is checked
        let portal = cli.addr.filter(|addr| !addr.is_empty()).ok_or_else(|| {
            ControllerError::InvalidConfig("ISCSI host address must be set.".to_string())
        })?;

        Ok(Self {
            log_file: cli.log,
            libvirt_uri: cli.uri,
            iscsiadm_path: cli.iscsiadm_path,
            virsh_path: cli.virsh_path,
            portal,
            show_only: cli.show,
        })
    }
}
