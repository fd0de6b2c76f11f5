//! Core traits for the zone republisher
//!
//! These are the capability seams the update pipeline consumes:
//!
//! - [`ZoneExporter`]: dump a zone's authoritative data to a local file
//! - [`ZonePublisher`]: push the staged declarative state downstream
//!
//! `zonesync-dnscontrol` provides the process-invoking implementations;
//! tests substitute in-memory fakes.

pub mod exporter;
pub mod publisher;

pub use exporter::ZoneExporter;
pub use publisher::ZonePublisher;
