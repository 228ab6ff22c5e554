//! Controller-specific error types.
//!
//! Every failure in a sync run ends up here; `main` logs it and exits
//! non-zero.

use crate::provisioner::ProvisionStage;
use iscsi_client::IscsiError;
use thiserror::Error;
use virt_client::VirtError;

/// Errors that can occur during a sync run.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// libvirt error
    #[error("libvirt error: {0}")]
    Virt(#[from] VirtError),

    /// Target discovery error
    #[error("Discovery error: {0}")]
    Discovery(#[from] IscsiError),

    /// An existing pool's descriptor cannot be attributed reliably
    #[error("Malformed pool '{pool}': {reason}")]
    MalformedPool { pool: String, reason: String },

    /// Target name has no pool name suffix
    #[error("Invalid target '{0}': no pool name after ':'")]
    InvalidTarget(String),

    /// A pool lifecycle step failed; earlier steps are not rolled back
    #[error("Provisioning pool '{pool}' failed (reached stage: {stage}): {source}")]
    Provisioning {
        pool: String,
        stage: ProvisionStage,
        #[source]
        source: VirtError,
    },

    /// Writing show-only output failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Log destination could not be set up
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
