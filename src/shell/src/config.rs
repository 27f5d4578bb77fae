use anyhow::{Context, Result, ensure};
use std::{env, time::Duration};

/// Shell configuration loaded and validated at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Device connection configuration
    pub device: DeviceConnectionConfig,

    /// Status polling configuration
    pub polling: PollingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceConnectionConfig {
    /// Base URL the `/status` and `/update` paths are resolved against
    pub url: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

impl AppConfig {
    /// Load all configuration from environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a variable if set
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let device = DeviceConnectionConfig::load(&lookup)?;
        let polling = PollingConfig::load(&lookup)?;

        Ok(Self { device, polling })
    }
}

impl DeviceConnectionConfig {
    fn load(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("DEVICE_URL").unwrap_or_else(|| "http://192.168.4.1".to_string());
        ensure!(
            url.starts_with("http://") || url.starts_with("https://"),
            "failed to parse DEVICE_URL: expected http:// or https:// scheme, got {url}"
        );
        let url = url.trim_end_matches('/').to_string();

        let timeout_ms = lookup("HTTP_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u64>()
            .context("failed to parse HTTP_TIMEOUT_MS: invalid format")?;

        Ok(Self {
            url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

impl PollingConfig {
    fn load(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let interval_ms = lookup("POLL_INTERVAL_MS")
            .unwrap_or_else(|| panel_sync_core::DEFAULT_POLL_INTERVAL_MS.to_string())
            .parse::<u64>()
            .context("failed to parse POLL_INTERVAL_MS: invalid format")?;
        ensure!(interval_ms > 0, "POLL_INTERVAL_MS must be greater than 0");

        Ok(Self { interval_ms })
    }
}
