//! Application settings read through [`ConfigPort`].
//!
//! Every key is optional; missing keys fall back to the defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::error::DashboardError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8501";
pub const DEFAULT_PORTFOLIO_PATH: &str = "portfolio.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub listen: SocketAddr,
    pub portfolio_path: PathBuf,
    pub provider: ProviderSettings,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSettings {
    /// Limit for each provider call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8501)),
            portfolio_path: PathBuf::from(DEFAULT_PORTFOLIO_PATH),
            provider: ProviderSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        Ok(Self {
            listen: parse_listen(config)?,
            portfolio_path: config
                .get_string("portfolio", "path")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PORTFOLIO_PATH)),
            provider: ProviderSettings {
                timeout: parse_timeout(config)?,
            },
        })
    }
}

fn parse_listen(config: &dyn ConfigPort) -> Result<SocketAddr, DashboardError> {
    let raw = config
        .get_string("server", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    raw.trim().parse().map_err(|_| DashboardError::ConfigInvalid {
        section: "server".to_string(),
        key: "listen".to_string(),
        reason: format!("{raw:?} is not a socket address"),
    })
}

fn parse_timeout(config: &dyn ConfigPort) -> Result<Option<Duration>, DashboardError> {
    let secs = config.get_int("provider", "timeout_secs", 0);
    if secs < 0 {
        return Err(DashboardError::ConfigInvalid {
            section: "provider".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be non-negative".to_string(),
        });
    }
    Ok((secs > 0).then(|| Duration::from_secs(secs as u64)))
}
