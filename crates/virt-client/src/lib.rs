//! libvirt Storage Pool Client
//!
//! A small client for the libvirt storage pool API, driven through the
//! `virsh` command line tool. Provides typed pool descriptors and the
//! handful of operations needed to register remote block devices as pools.
//!
//! # Example
//!
//! ```no_run
//! use virt_client::{PoolType, StoragePool, VirshClient, VirtClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VirshClient::connect("virsh", "qemu:///system").await?;
//!
//! for name in client.list_storage_pools(PoolType::Iscsi).await? {
//!     let pool = StoragePool::from_xml(&client.get_pool_xml_desc(&name).await?)?;
//!     println!("{} -> {:?}", pool.name, pool.first_device());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod virt_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::VirshClient;
pub use error::VirtError;
pub use models::*;
pub use virt_trait::VirtClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{MockCall, MockOperation, MockPool, MockVirtClient};
