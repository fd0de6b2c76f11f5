//! Per-zone update pipeline
//!
//! Every accepted NOTIFY spawns one detached job that runs the stages in
//! strict order, first failure aborting the rest:
//!
//! ```text
//! adapt ──▶ export ──▶ rewrite ──▶ publish
//!              │
//!              └─ once export succeeded, the dump file is deleted when
//!                 the job ends, whether or not later stages failed
//! ```
//!
//! Failures are caught and logged at the job boundary; nothing is retried.
//! The next NOTIFY from the primary is the retry.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::Result;
use crate::traits::{ZoneExporter, ZonePublisher};
use crate::zone::ZoneName;

/// Pipeline stage, carried in logs for failure context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStage {
    Export,
    Rewrite,
    Publish,
}

impl fmt::Display for UpdateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStage::Export => f.write_str("export"),
            UpdateStage::Rewrite => f.write_str("rewrite"),
            UpdateStage::Publish => f.write_str("publish"),
        }
    }
}

/// Runs export → rewrite → publish jobs, one detached task per zone update
pub struct UpdatePipeline {
    exporter: Arc<dyn ZoneExporter>,
    publisher: Arc<dyn ZonePublisher>,
    config: Arc<Config>,
}

impl UpdatePipeline {
    /// Create a new pipeline over the given capabilities
    pub fn new(
        exporter: Arc<dyn ZoneExporter>,
        publisher: Arc<dyn ZonePublisher>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            exporter,
            publisher,
            config,
        }
    }

    /// Fire-and-forget an update job for `zone`.
    ///
    /// The spawned task is never joined; its outcome is observable only in
    /// the logs. This is what keeps the NOTIFY response independent of the
    /// update's fate.
    pub fn spawn_update(self: &Arc<Self>, zone: ZoneName) {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            pipeline.run_update(zone).await;
        });
    }

    /// Run one update job to completion. Never returns an error: every
    /// failure is logged here, with the zone as context.
    pub async fn run_update(&self, zone: ZoneName) {
        let suffix = &self.config.zone.public_suffix;
        let adapted = zone.adapted(suffix).to_string();
        let dump_path = self
            .config
            .dnscontrol
            .dump_dir
            .join(zone.dump_file_name(suffix));

        info!(zone = %adapted, "updating zone data");

        if let Err(err) = self.exporter.export(zone.trimmed(), &dump_path).await {
            error!(zone = %adapted, stage = %UpdateStage::Export, %err, "updating zone data failed");
            // No dump file is assumed to exist after a failed export, so
            // nothing is cleaned up; whatever is there stays for inspection.
            return;
        }

        match self.rewrite_and_publish(&adapted, &dump_path).await {
            Ok(()) => info!(zone = %adapted, "finished"),
            Err(err) => {
                let stage = match err {
                    crate::Error::Publish { .. } => UpdateStage::Publish,
                    _ => UpdateStage::Rewrite,
                };
                error!(zone = %adapted, stage = %stage, %err, "updating zone data failed");
            }
        }

        self.remove_dump(&adapted, &dump_path).await;
    }

    async fn rewrite_and_publish(&self, adapted: &str, dump_path: &Path) -> Result<()> {
        crate::rewrite::wrap_for_extend(adapted, dump_path).await?;
        debug!(zone = %adapted, "dump file rewritten for D_EXTEND");

        self.publisher.publish(adapted).await?;
        Ok(())
    }

    /// Delete the dump file once the job is over. Runs only after a
    /// successful export; a failed deletion is logged and ignored.
    async fn remove_dump(&self, adapted: &str, dump_path: &Path) {
        debug!(zone = %adapted, path = %dump_path.display(), "deleting dump file");
        if let Err(err) = tokio::fs::remove_file(dump_path).await {
            error!(zone = %adapted, path = %dump_path.display(), %err, "deleting dump file failed");
        }
    }
}
