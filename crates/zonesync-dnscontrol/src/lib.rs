// # zonesync-dnscontrol
//
// Process-invoking [`ZoneExporter`]/[`ZonePublisher`] implementations that
// shell out to the `dnscontrol` CLI:
//
// - export:  `dnscontrol get-zones --creds <creds> --format=js
//            --out=<dump> <provider_name> <provider_id> <zone>`
// - publish: `dnscontrol push --config <dnsconfig> --creds <creds>
//            --domains <zone>`
//
// A non-zero exit status is a failure; stdout/stderr pass through to the
// daemon's streams, dnscontrol's own output is the operator's diagnostics.
// No retries, no timeouts: a hung dnscontrol blocks only its own job task.

use std::ffi::OsString;
use std::path::Path;
use std::process::ExitStatus;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use zonesync_core::config::DnscontrolConfig;
use zonesync_core::{Error, Result, ZoneExporter, ZonePublisher};

const DNSCONTROL_BIN: &str = "dnscontrol";

/// dnscontrol-backed exporter and publisher.
///
/// One value implements both capability traits; the daemon hands the same
/// instance to the pipeline twice, behind each trait object.
#[derive(Debug, Clone)]
pub struct DnscontrolCli {
    settings: DnscontrolConfig,
}

impl DnscontrolCli {
    /// Create a CLI wrapper over validated dnscontrol settings
    pub fn new(settings: DnscontrolConfig) -> Self {
        Self { settings }
    }

    /// Startup probe: the credentials file must exist and parse as JSON.
    ///
    /// A malformed environment is the only condition that should stop the
    /// daemon from starting at all, so this runs once before the listener
    /// binds, not per job.
    pub fn check_creds(&self) -> Result<()> {
        let path = &self.settings.creds_file;
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read creds file {}: {e}", path.display()))
        })?;
        serde_json::from_str::<serde_json::Value>(&raw).map_err(|e| {
            Error::config(format!("creds file {} is not valid JSON: {e}", path.display()))
        })?;
        Ok(())
    }

    fn export_args(&self, zone: &str, out: &Path) -> Vec<OsString> {
        let mut out_flag = OsString::from("--out=");
        out_flag.push(out);

        vec![
            OsString::from("get-zones"),
            OsString::from("--creds"),
            self.settings.creds_file.clone().into(),
            OsString::from("--format=js"),
            out_flag,
            OsString::from(&self.settings.provider_name),
            OsString::from(&self.settings.provider_id),
            OsString::from(zone),
        ]
    }

    fn push_args(&self, zone: &str) -> Vec<OsString> {
        vec![
            OsString::from("push"),
            OsString::from("--config"),
            self.settings.config_file.clone().into(),
            OsString::from("--creds"),
            self.settings.creds_file.clone().into(),
            OsString::from("--domains"),
            OsString::from(zone),
        ]
    }

    async fn run_dnscontrol(&self, args: &[OsString]) -> std::io::Result<ExitStatus> {
        Command::new(DNSCONTROL_BIN).args(args).status().await
    }
}

#[async_trait]
impl ZoneExporter for DnscontrolCli {
    async fn export(&self, zone: &str, out: &Path) -> Result<()> {
        debug!(zone, out = %out.display(), "dumping zone data");

        let args = self.export_args(zone, out);
        let status = self
            .run_dnscontrol(&args)
            .await
            .map_err(|e| Error::export(zone, format!("spawning {DNSCONTROL_BIN} failed: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::export(
                zone,
                format!("{DNSCONTROL_BIN} get-zones exited with {status}"),
            ))
        }
    }

    fn exporter_name(&self) -> &'static str {
        "dnscontrol get-zones"
    }
}

#[async_trait]
impl ZonePublisher for DnscontrolCli {
    async fn publish(&self, zone: &str) -> Result<()> {
        debug!(zone, "pushing zone data");

        let args = self.push_args(zone);
        let status = self
            .run_dnscontrol(&args)
            .await
            .map_err(|e| Error::publish(zone, format!("spawning {DNSCONTROL_BIN} failed: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::publish(
                zone,
                format!("{DNSCONTROL_BIN} push exited with {status}"),
            ))
        }
    }

    fn publisher_name(&self) -> &'static str {
        "dnscontrol push"
    }
}
