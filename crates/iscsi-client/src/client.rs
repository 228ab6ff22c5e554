//! iscsiadm-backed discovery
//!
//! Runs `iscsiadm -m discovery -t sendtargets -p <portal>` once per call.
//! There is no retry; a failed discovery is reported as an error, never as
//! an empty target list.

use crate::discovery_trait::TargetDiscoveryTrait;
use crate::error::IscsiError;
use crate::target::{parse_sendtargets, Target};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, error, trace};

/// Discovery client that drives the `iscsiadm` executable
#[derive(Debug, Clone)]
pub struct IscsiAdmClient {
    binary: PathBuf,
}

impl IscsiAdmClient {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait::async_trait]
impl TargetDiscoveryTrait for IscsiAdmClient {
    async fn discover(&self, portal: &str) -> Result<Vec<Target>, IscsiError> {
        let args = ["-m", "discovery", "-t", "sendtargets", "-p", portal];

        trace!("iscsiadm {:?}", &args);

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|source| IscsiError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stderr.lines().filter(|l| !l.is_empty()) {
                error!("{}", line);
            }
            return Err(IscsiError::DiscoveryFailed {
                portal: portal.to_string(),
                status: output.status.to_string(),
            });
        }

        let targets = parse_sendtargets(&String::from_utf8_lossy(&output.stdout))?;
        debug!("Portal {} advertises {} targets", portal, targets.len());

        Ok(targets)
    }
}
