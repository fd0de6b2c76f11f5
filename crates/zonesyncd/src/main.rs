// # zonesyncd - NOTIFY republish daemon
//
// The zonesyncd daemon is a thin integration layer. It is responsible for:
// 1. Reading the TOML configuration file
// 2. Initializing logging and the runtime
// 3. Wiring the dnscontrol exporter/publisher into the update pipeline
// 4. Running the NOTIFY listener until SIGTERM/SIGINT
//
// All protocol and pipeline logic lives in zonesync-core.
//
// ## Configuration
//
// The config file path comes from `ZONESYNC_CONFIG` (default
// `/data/zonesync.toml`):
//
// ```toml
// log_level = "debug"
//
// [socket]
// address = ""        # "" = IPv4 wildcard; a `:` selects IPv6
// port = 53
//
// [zone]
// public_suffix = ".example.com"
//
// [dnscontrol]
// creds_file = "/data/creds.json"
// config_file = "/data/dnsconfig.js"
// provider_name = "powerdns"
// provider_id = "POWERDNS"
// dump_dir = "/data/hosts"
// ```

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use zonesync_core::{Config, Listener, UpdatePipeline, ZoneExporter, ZonePublisher};
use zonesync_dnscontrol::DnscontrolCli;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

const CONFIG_ENV: &str = "ZONESYNC_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "/data/zonesync.toml";

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Load and validate the configuration file
fn load_config() -> Result<Config> {
    let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read config file '{path}'"))?;
    let config: Config =
        toml::from_str(&raw).with_context(|| format!("cannot parse config file '{path}'"))?;
    config
        .validate()
        .with_context(|| format!("invalid configuration in '{path}'"))?;

    Ok(config)
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    info!("starting zonesyncd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return DaemonExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => DaemonExitCode::CleanShutdown,
            Err(e) => {
                error!("daemon error: {e:#}");
                DaemonExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run the daemon until shutdown
async fn run_daemon(config: Config) -> Result<()> {
    let config = Arc::new(config);

    let dnscontrol = DnscontrolCli::new(config.dnscontrol.clone());
    // A missing or malformed creds file is the one condition that should
    // stop the daemon from starting at all.
    dnscontrol.check_creds()?;

    let exporter: Arc<dyn ZoneExporter> = Arc::new(dnscontrol.clone());
    let publisher: Arc<dyn ZonePublisher> = Arc::new(dnscontrol);
    let pipeline = Arc::new(UpdatePipeline::new(exporter, publisher, Arc::clone(&config)));

    let listener = Listener::bind(&config, pipeline).await?;

    tokio::select! {
        result = listener.run() => {
            result.context("listener failed")?;
        }
        signal = wait_for_shutdown() => {
            let signal = signal?;
            info!("received {signal}, shutting down");
        }
    }

    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("failed to setup SIGINT handler")?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("failed to wait for CTRL-C")?;
    Ok("SIGINT")
}
