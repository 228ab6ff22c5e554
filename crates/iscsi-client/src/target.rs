//! iSCSI targets and the sendtargets output grammar
//!
//! `iscsiadm -m discovery -t sendtargets` prints one record per line:
//!
//! ```text
//! <portal>[,<tpgt>] <target> [ignored...]
//! ```
//!
//! e.g. `10.0.0.5:3260,1 iqn.2020-01.com.example:lun1`. Blank lines are
//! skipped; any other line without a second field is an error.

use crate::error::IscsiError;
use std::fmt;

/// An advertised target name, e.g. `iqn.2020-01.com.example:lun1`
///
/// Compared as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target(String);

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable suffix after the first colon
    ///
    /// `None` when the name has no colon or nothing follows it.
    pub fn pool_name(&self) -> Option<&str> {
        self.0
            .split_once(':')
            .map(|(_, suffix)| suffix)
            .filter(|suffix| !suffix.is_empty())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse sendtargets discovery output into targets, keeping output order
pub fn parse_sendtargets(output: &str) -> Result<Vec<Target>, IscsiError> {
    let mut targets = Vec::new();

    for (index, line) in output.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(_portal), Some(target)) => targets.push(Target::new(target)),
            _ => {
                return Err(IscsiError::MalformedLine {
                    line_number: index + 1,
                    line: line.to_string(),
                });
            }
        }
    }

    Ok(targets)
}
