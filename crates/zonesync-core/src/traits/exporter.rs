// # Zone Exporter Trait
//
// Defines the interface for dumping a zone's current authoritative data
// into a local file in the provider's declarative format.
//
// ## Implementations
//
// - dnscontrol get-zones: `zonesync-dnscontrol` crate
// - Mocks for contract tests: `tests/common`

use async_trait::async_trait;
use std::path::Path;

/// Trait for zone export implementations
///
/// Implementations run exactly one export per invocation and report
/// success or failure; the pipeline owns sequencing, failure handling and
/// cleanup. Implementations must not retry, must not spawn tasks, and must
/// not touch files other than the given output path.
///
/// # Thread Safety
///
/// Implementations must be thread-safe: concurrent update jobs call
/// `export` from independent tasks.
#[async_trait]
pub trait ZoneExporter: Send + Sync {
    /// Dump the zone's records into a file at `out`.
    ///
    /// # Parameters
    ///
    /// - `zone`: the zone to export, trailing dot already trimmed,
    ///   public suffix *not* stripped
    /// - `out`: path the dump file must be written to
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the dump file exists at `out`
    /// - `Err(Error)`: the export failed; the state of `out` is unknown
    async fn export(&self, zone: &str, out: &Path) -> crate::Result<()>;

    /// Name of the exporter (for logging/debugging)
    fn exporter_name(&self) -> &'static str;
}
