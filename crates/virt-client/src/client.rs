//! virsh-backed libvirt client
//!
//! Every operation runs `virsh --connect <uri> ...` and captures its output.
//! Failures carry the command line and virsh's stderr.

use crate::error::VirtError;
use crate::models::PoolType;
use crate::virt_trait::VirtClientTrait;
use std::io::Write;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info, trace};

/// libvirt client that drives the `virsh` executable
#[derive(Debug, Clone)]
pub struct VirshClient {
    binary: PathBuf,
    uri: String,
}

impl VirshClient {
    /// Open a client and verify the connection
    ///
    /// # Arguments
    /// * `binary` - Path to `virsh` (a bare name is looked up in `PATH`)
    /// * `uri` - libvirt connection URI (e.g., "qemu:///system")
    pub async fn connect(binary: impl Into<PathBuf>, uri: impl Into<String>) -> Result<Self, VirtError> {
        let client = Self {
            binary: binary.into(),
            uri: uri.into(),
        };

        let canonical = client.virsh(&["uri"]).await?;
        info!("Connected to libvirt at {}", canonical.trim());

        Ok(client)
    }

    async fn virsh(&self, args: &[&str]) -> Result<String, VirtError> {
        let command = format!("virsh --connect {} {}", self.uri, args.join(" "));
        trace!("{}", command);

        let output = Command::new(&self.binary)
            .arg("--connect")
            .arg(&self.uri)
            .args(args)
            .output()
            .await
            .map_err(|source| VirtError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        Err(VirtError::Command {
            command,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Split `virsh pool-list --name` output into pool names
pub(crate) fn parse_pool_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait::async_trait]
impl VirtClientTrait for VirshClient {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn list_storage_pools(&self, pool_type: PoolType) -> Result<Vec<String>, VirtError> {
        let output = self
            .virsh(&["pool-list", "--all", "--type", pool_type.as_str(), "--name"])
            .await?;
        let names = parse_pool_names(&output);
        debug!("Found {} {} pools", names.len(), pool_type);
        Ok(names)
    }

    async fn get_pool_xml_desc(&self, name: &str) -> Result<String, VirtError> {
        self.virsh(&["pool-dumpxml", name]).await
    }

    async fn define_pool_xml(&self, xml: &str) -> Result<(), VirtError> {
        // virsh only reads descriptors from a file
        let mut file = tempfile::Builder::new()
            .prefix("pool-")
            .suffix(".xml")
            .tempfile()?;
        file.write_all(xml.as_bytes())?;
        file.flush()?;

        let path = file.path().to_string_lossy().into_owned();
        self.virsh(&["pool-define", &path]).await?;
        Ok(())
    }

    async fn set_autostart(&self, name: &str, autostart: bool) -> Result<(), VirtError> {
        if autostart {
            self.virsh(&["pool-autostart", name]).await?;
        } else {
            self.virsh(&["pool-autostart", "--disable", name]).await?;
        }
        Ok(())
    }

    async fn start_pool(&self, name: &str) -> Result<(), VirtError> {
        self.virsh(&["pool-start", name]).await?;
        Ok(())
    }
}
