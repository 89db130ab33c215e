//! Settings file management

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::MockError;
use crate::logs::LogLevel;

/// Service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Write operator logs to stdout
    #[serde(default = "default_true")]
    pub log_stdout: bool,

    /// Emit operator logs as JSON
    #[serde(default)]
    pub log_json: bool,

    /// Directory for rolling log files
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Log store configuration
    #[serde(default)]
    pub sink: SinkSettings,

    /// Simulated device behaviour
    #[serde(default)]
    pub simulation: SimulationSettings,
}

impl Settings {
    /// Read settings from a JSON file
    pub async fn load(path: &Path) -> Result<Self, MockError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), MockError> {
        let url = Url::parse(&self.sink.base_url).map_err(|e| {
            MockError::ConfigError(format!(
                "invalid sink base_url {:?}: {}",
                self.sink.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MockError::ConfigError(format!(
                "sink base_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.sink.index.trim().is_empty() || self.sink.index.contains('/') {
            return Err(MockError::ConfigError(format!(
                "invalid sink index {:?}",
                self.sink.index
            )));
        }

        if self.sink.timeout_secs == 0 {
            return Err(MockError::ConfigError(
                "sink timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.simulation.reboot_wait_min_secs > self.simulation.reboot_wait_max_secs {
            return Err(MockError::ConfigError(format!(
                "reboot wait range is empty: {}..={}",
                self.simulation.reboot_wait_min_secs, self.simulation.reboot_wait_max_secs
            )));
        }

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_stdout: true,
            log_json: false,
            log_dir: None,
            server: ServerSettings::default(),
            sink: SinkSettings::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Log store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkSettings {
    /// Base URL of the document store
    #[serde(default = "default_sink_url")]
    pub base_url: String,

    /// Index events are written into
    #[serde(default = "default_sink_index")]
    pub index: String,

    /// Upper bound on a single write, in seconds
    #[serde(default = "default_sink_timeout")]
    pub timeout_secs: u64,
}

fn default_sink_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_sink_index() -> String {
    "device-upgrade-logs".to_string()
}

fn default_sink_timeout() -> u64 {
    10
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            base_url: default_sink_url(),
            index: default_sink_index(),
            timeout_secs: default_sink_timeout(),
        }
    }
}

/// Simulated latency settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(default = "default_reboot_wait_min")]
    pub reboot_wait_min_secs: u64,

    #[serde(default = "default_reboot_wait_max")]
    pub reboot_wait_max_secs: u64,
}

fn default_reboot_wait_min() -> u64 {
    5
}

fn default_reboot_wait_max() -> u64 {
    10
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            reboot_wait_min_secs: default_reboot_wait_min(),
            reboot_wait_max_secs: default_reboot_wait_max(),
        }
    }
}
