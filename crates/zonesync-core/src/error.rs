//! Error types for the zone republisher
//!
//! Protocol violations are deliberately *not* part of this taxonomy: they are
//! handled in-band as [`crate::ValidationOutcome::Rejected`] and only ever
//! turn into a reply code, never into an aborted task.

use thiserror::Error;

/// Result type alias for zonesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the zone republisher
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed wire bytes (unparseable datagram)
    #[error("decode error: {0}")]
    Decode(#[from] hickory_proto::error::ProtoError),

    /// Socket and other I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// The export command failed for a zone
    #[error("export failed for zone {zone}: {detail}")]
    Export {
        /// Zone the export was running for
        zone: String,
        /// Captured failure detail (exit status or spawn error)
        detail: String,
    },

    /// Rewriting the dump file failed
    #[error("rewrite failed for {path}: {detail}")]
    Rewrite {
        /// Path of the dump file being rewritten
        path: String,
        /// Captured failure detail
        detail: String,
    },

    /// The publish command failed for a zone
    #[error("publish failed for zone {zone}: {detail}")]
    Publish {
        /// Zone the publish was running for
        zone: String,
        /// Captured failure detail (exit status or spawn error)
        detail: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an export error
    pub fn export(zone: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Export {
            zone: zone.into(),
            detail: detail.into(),
        }
    }

    /// Create a rewrite error
    pub fn rewrite(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Rewrite {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create a publish error
    pub fn publish(zone: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Publish {
            zone: zone.into(),
            detail: detail.into(),
        }
    }
}
