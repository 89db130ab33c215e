//! Application configuration options

use std::time::Duration;

use crate::storage::settings::Settings;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Server configuration
    pub server: ServerOptions,

    /// Log store configuration
    pub sink: SinkOptions,

    /// Simulated device behaviour
    pub simulation: SimulationOptions,

    /// Maximum delay for graceful shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            server: ServerOptions::default(),
            sink: SinkOptions::default(),
            simulation: SimulationOptions::default(),
            max_shutdown_delay: Duration::from_secs(30),
        }
    }
}

impl From<&Settings> for AppOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            server: ServerOptions {
                host: settings.server.host.clone(),
                port: settings.server.port,
            },
            sink: SinkOptions {
                base_url: settings.sink.base_url.clone(),
                index: settings.sink.index.clone(),
                timeout: Duration::from_secs(settings.sink.timeout_secs),
            },
            simulation: SimulationOptions {
                reboot_wait_min_secs: settings.simulation.reboot_wait_min_secs,
                reboot_wait_max_secs: settings.simulation.reboot_wait_max_secs,
            },
            ..Default::default()
        }
    }
}

/// HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Log store options
#[derive(Debug, Clone)]
pub struct SinkOptions {
    pub base_url: String,
    pub index: String,

    /// Upper bound on a single write
    pub timeout: Duration,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8081".to_string(),
            index: "device-upgrade-logs".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Simulated latency options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub reboot_wait_min_secs: u64,
    pub reboot_wait_max_secs: u64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            reboot_wait_min_secs: 5,
            reboot_wait_max_secs: 10,
        }
    }
}
