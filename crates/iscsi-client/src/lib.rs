//! iSCSI Target Discovery Client
//!
//! Runs `iscsiadm` in sendtargets discovery mode against a portal and parses
//! the advertised targets.
//!
//! # Example
//!
//! ```no_run
//! use iscsi_client::{IscsiAdmClient, TargetDiscoveryTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let iscsiadm = IscsiAdmClient::new("/usr/sbin/iscsiadm");
//! for target in iscsiadm.discover("10.0.0.5").await? {
//!     println!("{} ({:?})", target, target.pool_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod target;
#[path = "trait.rs"]
pub mod discovery_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::IscsiAdmClient;
pub use discovery_trait::TargetDiscoveryTrait;
pub use error::IscsiError;
pub use target::{parse_sendtargets, Target};
#[cfg(feature = "test-util")]
pub use mock::MockTargetDiscovery;
