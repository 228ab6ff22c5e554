//! Mock VirtClient for unit testing
//!
//! Keeps pools in memory, records every call made against it and can be told
//! to fail a given operation, so controller logic can be tested without a
//! running libvirtd.

use crate::error::VirtError;
use crate::models::{PoolType, StoragePool};
use crate::virt_trait::VirtClientTrait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Operation kinds that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ListPools,
    GetXmlDesc,
    DefinePool,
    SetAutostart,
    StartPool,
}

/// A recorded call against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListPools(PoolType),
    GetXmlDesc(String),
    /// Carries the name of the defined pool
    DefinePool(String),
    SetAutostart(String, bool),
    StartPool(String),
}

/// A pool held by the mock
#[derive(Debug, Clone)]
pub struct MockPool {
    pub descriptor: StoragePool,
    pub xml: String,
    pub autostart: bool,
    pub active: bool,
}

/// Mock libvirt client for testing
#[derive(Debug, Clone)]
pub struct MockVirtClient {
    uri: String,
    pools: Arc<Mutex<Vec<MockPool>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    failures: Arc<Mutex<HashSet<MockOperation>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockVirtClient {
    /// Create a new mock client with no pools
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            pools: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Add an existing (active, autostarted) pool to the mock store (for test setup)
    pub fn add_pool(&self, descriptor: StoragePool) {
        let xml = descriptor.to_xml().unwrap_or_default();
        lock(&self.pools).push(MockPool {
            descriptor,
            xml,
            autostart: true,
            active: true,
        });
    }

    /// Add a pool by raw XML, bypassing descriptor validation (for test setup)
    ///
    /// Used to simulate pools whose XML the reader cannot handle.
    pub fn add_raw_pool(&self, name: &str, pool_type: PoolType, xml: &str) {
        let descriptor = StoragePool {
            pool_type: pool_type.as_str().to_string(),
            name: name.to_string(),
            uuid: None,
            capacity: None,
            allocation: None,
            available: None,
            source: Default::default(),
            target: None,
        };
        lock(&self.pools).push(MockPool {
            descriptor,
            xml: xml.to_string(),
            autostart: false,
            active: false,
        });
    }

    /// Make every subsequent call of `operation` fail
    pub fn fail_on(&self, operation: MockOperation) {
        lock(&self.failures).insert(operation);
    }

    /// Snapshot of all pools
    pub fn pools(&self) -> Vec<MockPool> {
        lock(&self.pools).clone()
    }

    /// Look up a pool by name
    pub fn pool(&self, name: &str) -> Option<MockPool> {
        lock(&self.pools).iter().find(|p| p.descriptor.name == name).cloned()
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    /// Number of define/autostart/start calls made so far
    pub fn mutating_calls(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    MockCall::DefinePool(_) | MockCall::SetAutostart(..) | MockCall::StartPool(_)
                )
            })
            .count()
    }

    fn record(&self, call: MockCall, operation: MockOperation) -> Result<(), VirtError> {
        let command = format!("{:?}", call);
        lock(&self.calls).push(call);

        if lock(&self.failures).contains(&operation) {
            return Err(VirtError::Command {
                command,
                status: "exit status: 1".to_string(),
                stderr: "error: injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(name: &str) -> VirtError {
        VirtError::Command {
            command: format!("pool lookup {}", name),
            status: "exit status: 1".to_string(),
            stderr: format!("error: failed to get pool '{}'", name),
        }
    }
}

#[async_trait::async_trait]
impl VirtClientTrait for MockVirtClient {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn list_storage_pools(&self, pool_type: PoolType) -> Result<Vec<String>, VirtError> {
        self.record(MockCall::ListPools(pool_type), MockOperation::ListPools)?;
        Ok(lock(&self.pools)
            .iter()
            .filter(|p| p.descriptor.pool_type == pool_type.as_str())
            .map(|p| p.descriptor.name.clone())
            .collect())
    }

    async fn get_pool_xml_desc(&self, name: &str) -> Result<String, VirtError> {
        self.record(MockCall::GetXmlDesc(name.to_string()), MockOperation::GetXmlDesc)?;
        self.pool(name).map(|p| p.xml).ok_or_else(|| Self::not_found(name))
    }

    async fn define_pool_xml(&self, xml: &str) -> Result<(), VirtError> {
        let descriptor = StoragePool::from_xml(xml)?;
        self.record(
            MockCall::DefinePool(descriptor.name.clone()),
            MockOperation::DefinePool,
        )?;

        let mut pools = lock(&self.pools);
        if pools.iter().any(|p| p.descriptor.name == descriptor.name) {
            return Err(VirtError::Command {
                command: format!("pool-define {}", descriptor.name),
                status: "exit status: 1".to_string(),
                stderr: format!("error: pool '{}' already exists", descriptor.name),
            });
        }
        pools.push(MockPool {
            descriptor,
            xml: xml.to_string(),
            autostart: false,
            active: false,
        });
        Ok(())
    }

    async fn set_autostart(&self, name: &str, autostart: bool) -> Result<(), VirtError> {
        self.record(
            MockCall::SetAutostart(name.to_string(), autostart),
            MockOperation::SetAutostart,
        )?;
        let mut pools = lock(&self.pools);
        let pool = pools
            .iter_mut()
            .find(|p| p.descriptor.name == name)
            .ok_or_else(|| Self::not_found(name))?;
        pool.autostart = autostart;
        Ok(())
    }

    async fn start_pool(&self, name: &str) -> Result<(), VirtError> {
        self.record(MockCall::StartPool(name.to_string()), MockOperation::StartPool)?;
        let mut pools = lock(&self.pools);
        let pool = pools
            .iter_mut()
            .find(|p| p.descriptor.name == name)
            .ok_or_else(|| Self::not_found(name))?;
        pool.active = true;
        Ok(())
    }
}
