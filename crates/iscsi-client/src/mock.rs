//! Mock target discovery for unit testing

use crate::discovery_trait::TargetDiscoveryTrait;
use crate::error::IscsiError;
use crate::target::Target;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock discovery returning a configured target list
#[derive(Debug, Clone, Default)]
pub struct MockTargetDiscovery {
    targets: Arc<Mutex<Vec<Target>>>,
    fail: Arc<Mutex<bool>>,
    portals: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTargetDiscovery {
    /// Create a mock advertising `targets`
    pub fn new<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        let mock = Self::default();
        mock.set_targets(targets);
        mock
    }

    /// Replace the advertised targets
    pub fn set_targets<I, T>(&self, targets: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        *lock(&self.targets) = targets.into_iter().map(Into::into).collect();
    }

    /// Make discovery fail as if iscsiadm exited non-zero
    pub fn fail(&self) {
        *lock(&self.fail) = true;
    }

    /// Portals queried so far
    pub fn portals(&self) -> Vec<String> {
        lock(&self.portals).clone()
    }
}

#[async_trait::async_trait]
impl TargetDiscoveryTrait for MockTargetDiscovery {
    async fn discover(&self, portal: &str) -> Result<Vec<Target>, IscsiError> {
        lock(&self.portals).push(portal.to_string());

        if *lock(&self.fail) {
            return Err(IscsiError::DiscoveryFailed {
                portal: portal.to_string(),
                status: "exit status: 4".to_string(),
            });
        }
        Ok(lock(&self.targets).clone())
    }
}
