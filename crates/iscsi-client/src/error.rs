//! iSCSI discovery errors

use thiserror::Error;

/// Errors that can occur while discovering targets
#[derive(Debug, Error)]
pub enum IscsiError {
    /// The iscsiadm binary could not be executed
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// iscsiadm exited unsuccessfully; its stderr has already been logged
    #[error("iscsiadm discovery against {portal} failed: {status}")]
    DiscoveryFailed { portal: String, status: String },

    /// A line of discovery output did not have the `<portal> <target>` shape
    #[error("malformed discovery output at line {line_number}: {line:?}")]
    MalformedLine { line_number: usize, line: String },
}
