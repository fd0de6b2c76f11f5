// # zonesync-core
//
// Core library for the NOTIFY-driven zone republisher.
//
// ## Architecture Overview
//
// This library provides the core functionality for reacting to DNS NOTIFY
// messages from a primary nameserver:
// - **Listener**: UDP receive loop that decodes, validates and answers NOTIFY
// - **notify**: the wire-protocol contract (validation state machine, replies)
// - **ZoneExporter / ZonePublisher**: traits for the external export/publish
//   capabilities (`zonesync-dnscontrol` provides the process-invoking ones)
// - **UpdatePipeline**: per-zone export → rewrite → publish job runner
//
// ## Design Principles
//
// 1. **Separation of Concerns**: protocol handling is separate from the
//    update pipeline, and the pipeline is separate from subprocess execution
// 2. **Fire-and-Forget**: one detached task per datagram, one per accepted
//    notification; a failed update never affects the NOTIFY response
// 3. **Failure Isolation**: every pipeline error is caught and logged at the
//    job boundary; the daemon never terminates because one zone failed

pub mod config;
pub mod error;
pub mod listener;
pub mod notify;
pub mod pipeline;
pub mod rewrite;
pub mod traits;
pub mod zone;

// Re-export core types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use listener::Listener;
pub use notify::ValidationOutcome;
pub use pipeline::UpdatePipeline;
pub use traits::{ZoneExporter, ZonePublisher};
pub use zone::ZoneName;
