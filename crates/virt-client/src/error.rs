//! libvirt client errors

use thiserror::Error;

/// Errors that can occur when talking to libvirt
#[derive(Debug, Error)]
pub enum VirtError {
    /// The `virsh` binary could not be executed
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// A libvirt operation returned a failure status
    #[error("`{command}` failed ({status}): {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    /// Pool XML could not be parsed or produced
    #[error("invalid pool descriptor: {0}")]
    Descriptor(String),

    /// Writing the descriptor handed to `pool-define` failed
    #[error("descriptor file error: {0}")]
    TempFile(#[from] std::io::Error),
}
