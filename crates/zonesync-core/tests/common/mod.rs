//! Test doubles and helpers for the pipeline/protocol contract tests
//!
//! The mocks stand in for the dnscontrol-invoking exporter/publisher so the
//! tests can observe exactly which stages ran, with which zone names, and
//! what the dump file looked like when it reached the publish stage.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use zonesync_core::config::{Config, DnscontrolConfig, SocketConfig, ZoneConfig};
use zonesync_core::{Error, Result, ZoneExporter, ZonePublisher};

/// Dump content in the shape `dnscontrol get-zones --format=js` produces
pub const RAW_DUMP: &str = concat!(
    "var DSP_POWERDNS = NewDnsProvider(\"powerdns\");\n",
    "D(\"foo\",\n",
    "    DnsProvider(DSP_POWERDNS),\n",
    "    DefaultTTL(300),\n",
    "    A(\"www\", \"192.0.2.10\")\n",
    ")\n",
);

/// A mock ZoneExporter that writes a canned dump file and tracks calls
pub struct MockExporter {
    export_calls: Arc<AtomicUsize>,
    exported_zones: Arc<Mutex<Vec<String>>>,
    payload: String,
    fail: bool,
}

impl MockExporter {
    pub fn new() -> Self {
        Self {
            export_calls: Arc::new(AtomicUsize::new(0)),
            exported_zones: Arc::new(Mutex::new(Vec::new())),
            payload: RAW_DUMP.to_string(),
            fail: false,
        }
    }

    /// An exporter whose every call fails, touching no files
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn export_calls(&self) -> usize {
        self.export_calls.load(Ordering::SeqCst)
    }

    pub fn exported_zones(&self) -> Vec<String> {
        self.exported_zones.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneExporter for MockExporter {
    async fn export(&self, zone: &str, out: &Path) -> Result<()> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        self.exported_zones.lock().unwrap().push(zone.to_string());

        if self.fail {
            return Err(Error::export(zone, "mock export failure"));
        }

        tokio::fs::write(out, &self.payload).await?;
        Ok(())
    }

    fn exporter_name(&self) -> &'static str {
        "mock-exporter"
    }
}

/// A mock ZonePublisher that tracks calls and can snapshot the dump file
/// as it looked at publish time (it is deleted once the job ends)
pub struct MockPublisher {
    publish_calls: Arc<AtomicUsize>,
    published_zones: Arc<Mutex<Vec<String>>>,
    snapshot_path: Option<PathBuf>,
    snapshot: Arc<Mutex<Option<String>>>,
    fail: bool,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            publish_calls: Arc::new(AtomicUsize::new(0)),
            published_zones: Arc::new(Mutex::new(Vec::new())),
            snapshot_path: None,
            snapshot: Arc::new(Mutex::new(None)),
            fail: false,
        }
    }

    /// A publisher whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Capture the contents of `path` whenever publish is called
    pub fn snapshotting(path: PathBuf) -> Self {
        Self {
            snapshot_path: Some(path),
            ..Self::new()
        }
    }

    pub fn publish_calls(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }

    pub fn published_zones(&self) -> Vec<String> {
        self.published_zones.lock().unwrap().clone()
    }

    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZonePublisher for MockPublisher {
    async fn publish(&self, zone: &str) -> Result<()> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        self.published_zones.lock().unwrap().push(zone.to_string());

        if let Some(path) = &self.snapshot_path {
            *self.snapshot.lock().unwrap() = tokio::fs::read_to_string(path).await.ok();
        }

        if self.fail {
            return Err(Error::publish(zone, "mock publish failure"));
        }
        Ok(())
    }

    fn publisher_name(&self) -> &'static str {
        "mock-publisher"
    }
}

/// Config pointing the pipeline at a test spool directory
pub fn test_config(dump_dir: &Path, public_suffix: &str) -> Config {
    Config {
        socket: SocketConfig {
            address: "127.0.0.1".to_string(),
            port: 0,
        },
        zone: ZoneConfig {
            public_suffix: public_suffix.to_string(),
        },
        dnscontrol: DnscontrolConfig {
            creds_file: PathBuf::from("/data/creds.json"),
            config_file: PathBuf::from("/data/dnsconfig.js"),
            provider_name: "powerdns".to_string(),
            provider_id: "POWERDNS".to_string(),
            dump_dir: dump_dir.to_path_buf(),
        },
        log_level: "info".to_string(),
    }
}
