// # Zone Publisher Trait
//
// Defines the interface for applying the currently staged declarative
// configuration to the downstream DNS provider, scoped to one zone.
//
// ## Implementations
//
// - dnscontrol push: `zonesync-dnscontrol` crate
// - Mocks for contract tests: `tests/common`

use async_trait::async_trait;

/// Trait for zone publish implementations
///
/// Implementations run exactly one publish per invocation and report
/// success or failure. A failed publish is not retried by anyone; the next
/// NOTIFY from the primary triggers a fresh pipeline run.
///
/// # Thread Safety
///
/// Implementations must be thread-safe: concurrent update jobs call
/// `publish` from independent tasks.
#[async_trait]
pub trait ZonePublisher: Send + Sync {
    /// Push the staged state downstream for `zone`.
    ///
    /// # Parameters
    ///
    /// - `zone`: the adapted zone name (trailing dot and public suffix
    ///   stripped) scoping the publish
    async fn publish(&self, zone: &str) -> crate::Result<()>;

    /// Name of the publisher (for logging/debugging)
    fn publisher_name(&self) -> &'static str;
}
