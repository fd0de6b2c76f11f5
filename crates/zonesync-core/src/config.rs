//! Configuration types for the zone republisher
//!
//! The configuration is read once at startup and passed into every component
//! as an immutable value; nothing in this crate mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

/// Main zonesync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Socket the NOTIFY listener binds to
    pub socket: SocketConfig,

    /// Zone name handling
    #[serde(default)]
    pub zone: ZoneConfig,

    /// dnscontrol invocation settings
    pub dnscontrol: DnscontrolConfig,

    /// Log level for the daemon (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.socket.bind_addr()?;
        self.dnscontrol.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(crate::Error::config(format!(
                    "log_level '{other}' is not valid (trace, debug, info, warn, error)"
                )));
            }
        }

        Ok(())
    }
}

/// Listener socket configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketConfig {
    /// Bind address. A string containing `:` selects IPv6, anything else
    /// IPv4; the empty string binds the IPv4 wildcard address.
    #[serde(default)]
    pub address: String,

    /// Bind port
    pub port: u16,
}

impl SocketConfig {
    /// Resolve the configured address/port into a bindable socket address
    pub fn bind_addr(&self) -> Result<SocketAddr, crate::Error> {
        let ip: IpAddr = if self.address.is_empty() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else if self.address.contains(':') {
            self.address
                .parse::<Ipv6Addr>()
                .map(IpAddr::V6)
                .map_err(|e| {
                    crate::Error::config(format!("invalid IPv6 address '{}': {e}", self.address))
                })?
        } else {
            self.address
                .parse::<Ipv4Addr>()
                .map(IpAddr::V4)
                .map_err(|e| {
                    crate::Error::config(format!("invalid IPv4 address '{}': {e}", self.address))
                })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Zone name handling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Public suffix stripped from notified zone names to derive the name
    /// used for dump files and the publish scope. Empty disables stripping.
    #[serde(default)]
    pub public_suffix: String,
}

/// dnscontrol invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnscontrolConfig {
    /// Path to the dnscontrol credentials file (creds.json)
    pub creds_file: PathBuf,

    /// Path to the aggregate dnscontrol configuration (dnsconfig.js)
    pub config_file: PathBuf,

    /// Provider name as declared in the credentials file (e.g. "powerdns")
    pub provider_name: String,

    /// Provider identifier for get-zones (e.g. "POWERDNS")
    pub provider_id: String,

    /// Directory dump files are written to
    #[serde(default = "default_dump_dir")]
    pub dump_dir: PathBuf,
}

impl DnscontrolConfig {
    /// Validate the dnscontrol configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.creds_file.as_os_str().is_empty() {
            return Err(crate::Error::config("dnscontrol.creds_file cannot be empty"));
        }
        if self.config_file.as_os_str().is_empty() {
            return Err(crate::Error::config(
                "dnscontrol.config_file cannot be empty",
            ));
        }
        if self.provider_name.is_empty() {
            return Err(crate::Error::config(
                "dnscontrol.provider_name cannot be empty",
            ));
        }
        if self.provider_id.is_empty() {
            return Err(crate::Error::config(
                "dnscontrol.provider_id cannot be empty",
            ));
        }
        Ok(())
    }
}

fn default_dump_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}
