//! libvirt storage pool data models
//!
//! Subset of the libvirt storage pool XML schema
//! (<https://libvirt.org/formatstorage.html>). Elements not modelled here are
//! ignored when reading a descriptor.

use crate::error::VirtError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device path template for iSCSI pools; libvirt exposes LUNs by path there
pub const ISCSI_TARGET_PATH: &str = "/dev/disk/by-path";

/// Storage pool backend types, as accepted by `virsh pool-list --type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolType {
    Dir,
    Fs,
    Netfs,
    Logical,
    Disk,
    Iscsi,
    IscsiDirect,
    Scsi,
    Mpath,
    Rbd,
    Gluster,
    Zfs,
}

impl PoolType {
    /// Type name used in pool XML and on the virsh command line
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolType::Dir => "dir",
            PoolType::Fs => "fs",
            PoolType::Netfs => "netfs",
            PoolType::Logical => "logical",
            PoolType::Disk => "disk",
            PoolType::Iscsi => "iscsi",
            PoolType::IscsiDirect => "iscsi-direct",
            PoolType::Scsi => "scsi",
            PoolType::Mpath => "mpath",
            PoolType::Rbd => "rbd",
            PoolType::Gluster => "gluster",
            PoolType::Zfs => "zfs",
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage pool descriptor (`<pool type='...'>`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "pool")]
pub struct StoragePool {
    #[serde(rename = "@type")]
    pub pool_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Capacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Capacity>,
    #[serde(default)]
    pub source: PoolSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PoolTarget>,
}

/// Size element with a unit attribute, e.g. `<capacity unit='bytes'>0</capacity>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    #[serde(rename = "@unit", default = "default_unit")]
    pub unit: String,
    #[serde(rename = "$text")]
    pub value: u64,
}

impl Capacity {
    pub fn bytes(value: u64) -> Self {
        Self {
            unit: default_unit(),
            value,
        }
    }
}

fn default_unit() -> String {
    "bytes".to_string()
}

/// `<source>` block of a pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolSource {
    #[serde(rename = "host", default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<SourceHost>,
    #[serde(rename = "device", default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<SourceDevice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceHost {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@port", default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDevice {
    #[serde(rename = "@path")]
    pub path: String,
}

/// `<target>` block of a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolTarget {
    pub path: String,
}

impl StoragePool {
    /// Build a descriptor for an iSCSI pool backed by `device` on portal `host`
    ///
    /// Sizes are zero; libvirt fills in real values once the pool is started.
    pub fn iscsi(
        name: impl Into<String>,
        uuid: impl Into<String>,
        host: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            pool_type: PoolType::Iscsi.as_str().to_string(),
            name: name.into(),
            uuid: Some(uuid.into()),
            capacity: Some(Capacity::bytes(0)),
            allocation: Some(Capacity::bytes(0)),
            available: Some(Capacity::bytes(0)),
            source: PoolSource {
                hosts: vec![SourceHost {
                    name: host.into(),
                    port: None,
                }],
                devices: vec![SourceDevice {
                    path: device.into(),
                }],
            },
            target: Some(PoolTarget {
                path: ISCSI_TARGET_PATH.to_string(),
            }),
        }
    }

    /// Parse a descriptor as returned by `virsh pool-dumpxml`
    pub fn from_xml(xml: &str) -> Result<Self, VirtError> {
        quick_xml::de::from_str(xml).map_err(|e| VirtError::Descriptor(e.to_string()))
    }

    /// Render the descriptor for `virsh pool-define`
    pub fn to_xml(&self) -> Result<String, VirtError> {
        quick_xml::se::to_string(self).map_err(|e| VirtError::Descriptor(e.to_string()))
    }

    /// Name of the first source host, if any
    pub fn first_host(&self) -> Option<&str> {
        self.source.hosts.first().map(|h| h.name.as_str())
    }

    /// Path of the first source device, if any
    pub fn first_device(&self) -> Option<&str> {
        self.source.devices.first().map(|d| d.path.as_str())
    }
}
