//! Process contract tests for `IscsiAdmClient`
//!
//! Each test installs a throwaway shell script standing in for iscsiadm.

use iscsi_client::{IscsiAdmClient, IscsiError, Target, TargetDiscoveryTrait};
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

fn fake_iscsiadm(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("iscsiadm");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Collects formatted log records in memory
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_discover_parses_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_iscsiadm(
        &dir,
        r#"[ "$*" = "-m discovery -t sendtargets -p 10.0.0.5" ] || exit 9
echo "10.0.0.5:3260,1 iqn.2020-01.com.example:a"
echo ""
echo "10.0.0.5:3260,1 iqn.2020-01.com.example:b""#,
    );

    let client = IscsiAdmClient::new(binary);
    let targets = client.discover("10.0.0.5").await.unwrap();

    assert_eq!(
        targets,
        vec![
            Target::new("iqn.2020-01.com.example:a"),
            Target::new("iqn.2020-01.com.example:b"),
        ]
    );
}

#[tokio::test]
async fn test_discover_non_zero_exit_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_iscsiadm(
        &dir,
        r#"echo "iscsiadm: cannot make connection to 10.0.0.5: No route to host" >&2
echo "iscsiadm: connection login retries (reopen_max) 5 exceeded" >&2
echo "10.0.0.5:3260,1 iqn.2020-01.com.example:stale"
exit 4"#,
    );

    let client = IscsiAdmClient::new(binary);
    let result = client.discover("10.0.0.5").await;

    match result {
        Err(IscsiError::DiscoveryFailed { portal, status }) => {
            assert_eq!(portal, "10.0.0.5");
            assert!(status.contains('4'), "status was {}", status);
        }
        other => panic!("expected DiscoveryFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_discover_malformed_output_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_iscsiadm(&dir, r#"echo "10.0.0.5:3260,1""#);

    let client = IscsiAdmClient::new(binary);
    let result = client.discover("10.0.0.5").await;

    assert!(matches!(result, Err(IscsiError::MalformedLine { line_number: 1, .. })));
}

#[tokio::test]
async fn test_discover_missing_binary() {
    let client = IscsiAdmClient::new("/nonexistent/iscsiadm");
    let result = client.discover("10.0.0.5").await;

    assert!(matches!(result, Err(IscsiError::Spawn { .. })));
}

#[tokio::test]
async fn test_discover_failure_logs_each_stderr_line() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_iscsiadm(
        &dir,
        r#"echo "iscsiadm: cannot make connection to 10.0.0.5: No route to host" >&2
echo "" >&2
echo "iscsiadm: connection login retries (reopen_max) 5 exceeded" >&2
exit 4"#,
    );

    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish();
    // tokio::test runs on a current-thread runtime, so the thread default covers the call
    let _guard = tracing::subscriber::set_default(subscriber);

    let result = IscsiAdmClient::new(binary).discover("10.0.0.5").await;
    assert!(matches!(result, Err(IscsiError::DiscoveryFailed { .. })));

    let output = logs.contents();
    let errors: Vec<&str> = output
        .lines()
        .filter(|line| line.trim_start().starts_with("ERROR"))
        .map(|line| line.trim_start().trim_start_matches("ERROR").trim())
        .collect();

    assert_eq!(
        errors,
        vec![
            "iscsiadm: cannot make connection to 10.0.0.5: No route to host",
            "iscsiadm: connection login retries (reopen_max) 5 exceeded",
        ],
        "log output was:\n{}",
        output
    );
}
