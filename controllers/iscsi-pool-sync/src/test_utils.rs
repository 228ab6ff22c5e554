//! Test utilities for unit testing the sync controller
//!
//! This module provides helpers for creating test data and setting up test scenarios.

use crate::config::SyncConfig;
use crate::controller::Controller;
use iscsi_client::MockTargetDiscovery;
use std::path::PathBuf;
use virt_client::{MockVirtClient, StoragePool};

pub const TEST_PORTAL: &str = "10.0.0.5";
pub const TEST_URI: &str = "test:///default";

/// Helper to create a test configuration
pub fn test_config(show_only: bool) -> SyncConfig {
    SyncConfig {
        log_file: PathBuf::from("/dev/null"),
        libvirt_uri: TEST_URI.to_string(),
        iscsiadm_path: PathBuf::from("/usr/sbin/iscsiadm"),
        virsh_path: PathBuf::from("virsh"),
        portal: TEST_PORTAL.to_string(),
        show_only,
    }
}

/// Helper to create an already registered iSCSI pool descriptor
pub fn existing_pool(name: &str, host: &str, device: &str) -> StoragePool {
    StoragePool::iscsi(name, format!("00000000-0000-4000-8000-{:012}", name.len()), host, device)
}

/// Helper to build a controller over mocks that share state with the returned handles
pub fn test_controller(
    show_only: bool,
    virt: &MockVirtClient,
    discovery: &MockTargetDiscovery,
) -> Controller<MockVirtClient, MockTargetDiscovery> {
    Controller::new(test_config(show_only), virt.clone(), discovery.clone())
}
