//! Existing pool inventory.
//!
//! Reads the iSCSI pools libvirt already knows about and returns the device
//! paths of those registered against our portal. These are compared to
//! discovered target names as opaque strings.

use crate::error::ControllerError;
use tracing::debug;
use virt_client::{PoolType, StoragePool, VirtClientTrait};

/// Device paths of all iSCSI pools whose first source host is `portal`.
///
/// Any listing or descriptor failure aborts: a partial inventory would make
/// already registered targets look new.
pub async fn iscsi_device_paths<V>(virt: &V, portal: &str) -> Result<Vec<String>, ControllerError>
where
    V: VirtClientTrait + ?Sized,
{
    let mut paths = Vec::new();

    for name in virt.list_storage_pools(PoolType::Iscsi).await? {
        let xml = virt.get_pool_xml_desc(&name).await?;
        let pool = StoragePool::from_xml(&xml).map_err(|e| ControllerError::MalformedPool {
            pool: name.clone(),
            reason: e.to_string(),
        })?;

        match pool.first_host() {
            Some(host) if host == portal => {}
            Some(host) => {
                debug!("Pool {} belongs to portal {}, skipping", name, host);
                continue;
            }
            None => {
                debug!("Pool {} has no source host, skipping", name);
                continue;
            }
        }

        let device = pool.first_device().ok_or_else(|| ControllerError::MalformedPool {
            pool: name.clone(),
            reason: "no source device".to_string(),
        })?;
        paths.push(device.to_string());
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use virt_client::{MockOperation, MockVirtClient};

    #[tokio::test]
    async fn test_only_pools_on_portal_are_counted() {
        let virt = MockVirtClient::new(TEST_URI);
        virt.add_pool(existing_pool("a", TEST_PORTAL, "iqn:a"));
        virt.add_pool(existing_pool("other", "10.9.9.9", "iqn:other"));
        virt.add_pool(existing_pool("b", TEST_PORTAL, "iqn:b"));

        let paths = iscsi_device_paths(&virt, TEST_PORTAL).await.unwrap();
        assert_eq!(paths, vec!["iqn:a", "iqn:b"]);
    }

    #[tokio::test]
    async fn test_host_match_is_exact() {
        let virt = MockVirtClient::new(TEST_URI);
        virt.add_pool(existing_pool("a", "10.0.0.50", "iqn:a"));

        assert!(iscsi_device_paths(&virt, TEST_PORTAL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_iscsi_pools_are_ignored() {
        let virt = MockVirtClient::new(TEST_URI);
        virt.add_raw_pool(
            "default",
            PoolType::Dir,
            "<pool type='dir'><name>default</name><target><path>/var/lib/libvirt/images</path></target></pool>",
        );

        assert!(iscsi_device_paths(&virt, TEST_PORTAL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pool_without_host_is_skipped() {
        let virt = MockVirtClient::new(TEST_URI);
        virt.add_raw_pool(
            "nohost",
            PoolType::Iscsi,
            "<pool type='iscsi'><name>nohost</name><source><device path='iqn:x'/></source></pool>",
        );

        assert!(iscsi_device_paths(&virt, TEST_PORTAL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_matching_pool_without_device_fails() {
        let virt = MockVirtClient::new(TEST_URI);
        virt.add_raw_pool(
            "nodev",
            PoolType::Iscsi,
            "<pool type='iscsi'><name>nodev</name><source><host name='10.0.0.5'/></source></pool>",
        );

        let result = iscsi_device_paths(&virt, TEST_PORTAL).await;
        assert!(matches!(result, Err(ControllerError::MalformedPool { pool, .. }) if pool == "nodev"));
    }

    #[tokio::test]
    async fn test_unparseable_descriptor_fails() {
        let virt = MockVirtClient::new(TEST_URI);
        virt.add_raw_pool("broken", PoolType::Iscsi, "<pool type='iscsi'><name>");

        let result = iscsi_device_paths(&virt, TEST_PORTAL).await;
        assert!(matches!(result, Err(ControllerError::MalformedPool { .. })));
    }

    #[tokio::test]
    async fn test_descriptor_read_failure_is_fatal() {
        let virt = MockVirtClient::new(TEST_URI);
        virt.add_pool(existing_pool("a", TEST_PORTAL, "iqn:a"));
        virt.fail_on(MockOperation::GetXmlDesc);

        let result = iscsi_device_paths(&virt, TEST_PORTAL).await;
        assert!(matches!(result, Err(ControllerError::Virt(_))));
    }
}
