//! Dump file rewriting
//!
//! `dnscontrol get-zones` emits a self-contained zone description that
//! redeclares setup the aggregate dnsconfig.js already provides once,
//! centrally: the provider variable, the `D(...)` domain declaration, the
//! `DnsProvider(...)` registration and the `DefaultTTL(...)` call. To make
//! the per-zone dump composable it is wrapped in a `D_EXTEND` declaration
//! and those boilerplate lines are dropped.
//!
//! The rewrite is applied to the raw export output, never chained onto its
//! own result.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Line prefixes (after leading whitespace) dropped from the dump
const BOILERPLATE_PREFIXES: [&str; 4] = ["var", "D(", "DnsProvider(", "DefaultTTL("];

fn is_boilerplate(line: &str) -> bool {
    let trimmed = line.trim_start();
    BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Rewrite the dump file at `path` into a `D_EXTEND("<zone>", ...)` block.
///
/// Writes the filtered content to a sibling temp file first and renames it
/// over the original, so the canonical path never holds a half-written file.
pub async fn wrap_for_extend(zone: &str, path: &Path) -> Result<()> {
    let to_rewrite_error = |e: std::io::Error| Error::rewrite(path.display().to_string(), e.to_string());

    let body = tokio::fs::read_to_string(path).await.map_err(to_rewrite_error)?;

    let mut wrapped = String::with_capacity(body.len() + 64);
    wrapped.push_str("D_EXTEND(\"");
    wrapped.push_str(zone);
    wrapped.push_str("\",\n");
    for line in body.lines() {
        if !is_boilerplate(line) {
            wrapped.push_str(line);
            wrapped.push('\n');
        }
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, wrapped).await.map_err(to_rewrite_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(to_rewrite_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_DUMP: &str = concat!(
        "var DSP_POWERDNS = NewDnsProvider(\"powerdns\");\n",
        "D(\"foo\",\n",
        "    DnsProvider(DSP_POWERDNS),\n",
        "\tDefaultTTL(300),\n",
        "    A(\"www\", \"192.0.2.10\"),\n",
        "    TXT(\"_info\", \"var is data here, not a declaration\")\n",
        ")\n",
    );

    #[test]
    fn boilerplate_matches_after_leading_whitespace() {
        assert!(is_boilerplate("var x = 1;"));
        assert!(is_boilerplate("  D(\"foo\","));
        assert!(is_boilerplate("\tDnsProvider(DSP),"));
        assert!(is_boilerplate("    DefaultTTL(300),"));
        assert!(!is_boilerplate("    A(\"www\", \"192.0.2.10\"),"));
        assert!(!is_boilerplate(")"));
    }

    #[tokio::test]
    async fn dump_is_wrapped_and_boilerplate_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo.dump.js");
        tokio::fs::write(&path, RAW_DUMP).await.unwrap();

        wrap_for_extend("foo", &path).await.unwrap();

        let rewritten = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = rewritten.lines().collect();
        assert_eq!(lines[0], "D_EXTEND(\"foo\",");
        assert!(rewritten.contains("A(\"www\", \"192.0.2.10\")"));
        assert!(rewritten.contains("var is data here"));
        assert!(!rewritten.contains("NewDnsProvider"));
        assert!(!rewritten.contains("DnsProvider(DSP_POWERDNS)"));
        assert!(!rewritten.contains("DefaultTTL"));
        assert!(!lines.iter().any(|l| l.trim_start().starts_with("D(")));
    }

    #[tokio::test]
    async fn no_temp_file_is_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo.dump.js");
        tokio::fs::write(&path, RAW_DUMP).await.unwrap();

        wrap_for_extend("foo", &path).await.unwrap();

        assert!(!temp_path(&path).exists());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn missing_dump_file_fails_the_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.dump.js");

        let err = wrap_for_extend("absent", &path).await.unwrap_err();
        assert!(matches!(err, Error::Rewrite { .. }));
    }
}
