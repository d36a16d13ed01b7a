//! Command line and page configuration for the dashboard server

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::PageConfig;

/// Port used when none is configured
pub const DEFAULT_PORT: u16 = 8501;

/// Errors related to dashboard configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read page config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid page config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Synthetic time-series demo dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the dashboard page described by a page config file
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Page config file (JSON); built-in defaults are used if it does not exist
    pub target: PathBuf,

    #[arg(long = "server.port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long = "server.address", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub address: IpAddr,

    /// Reject cross-origin requests (false allows any origin)
    #[arg(long = "server.enableCORS", default_value_t = true, action = ArgAction::Set)]
    pub enable_cors: bool,

    /// Require a matching XSRF token on widget submissions
    #[arg(long = "server.enableXsrfProtection", default_value_t = true, action = ArgAction::Set)]
    pub enable_xsrf_protection: bool,

    /// Seed every request's RNG so the page shows the same series each time
    #[arg(long = "data.seed")]
    pub seed: Option<u64>,
}

impl RunArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Load the page config from `path`.
///
/// A missing file yields the built-in defaults; a file that exists but
/// cannot be read or parsed is an error.
pub fn load_page_config(path: &Path) -> Result<PageConfig, ConfigError> {
    if !path.exists() {
        info!("Page config {} not found, using built-in defaults", path.display());
        return Ok(PageConfig::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: PageConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded page config from {}: {:?}", path.display(), config);
    Ok(config)
}
