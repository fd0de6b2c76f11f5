//! Zone name handling
//!
//! A notified zone name arrives in trailing-dot canonical form. Three forms
//! of it matter downstream:
//! - `raw`: as received, trailing dot present
//! - `trimmed`: trailing root-label dot removed; the export command argument
//! - `adapted`: trimmed form with the configured public suffix removed from
//!   the end, if present; used for the dump file name and the publish scope

/// A zone name as carried in the question of an accepted NOTIFY
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneName {
    raw: String,
}

impl ZoneName {
    /// Wrap a zone name as received on the wire
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The name as received, trailing dot present
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The name with the trailing root-label dot removed
    pub fn trimmed(&self) -> &str {
        self.raw.strip_suffix('.').unwrap_or(&self.raw)
    }

    /// The trimmed name with `public_suffix` removed from the end.
    ///
    /// If the name does not end with the suffix, or the suffix is empty, the
    /// trimmed name is returned unchanged.
    pub fn adapted<'a>(&'a self, public_suffix: &str) -> &'a str {
        let trimmed = self.trimmed();
        if public_suffix.is_empty() {
            return trimmed;
        }
        trimmed.strip_suffix(public_suffix).unwrap_or(trimmed)
    }

    /// File name of the zone dump, derived from the adapted name
    pub fn dump_file_name(&self, public_suffix: &str) -> String {
        format!("{}.dump.js", self.adapted(public_suffix))
    }
}

impl std::fmt::Display for ZoneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
