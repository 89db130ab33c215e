//! Command line handling

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::errors::MockError;
use crate::storage::settings::Settings;

/// Settings file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "settings.json";

/// Parse `--key=value` pairs and standalone `--flag`s
pub fn parse_args<I>(args: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = String>,
{
    let mut cli_args = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    cli_args
}

/// Load settings from the configured file and apply command line overrides.
///
/// A missing default settings file yields defaults; a missing file named
/// with `--config` is an error.
pub async fn load_settings(cli_args: &HashMap<String, String>) -> Result<Settings, MockError> {
    let settings = match cli_args.get("config") {
        Some(path) => Settings::load(Path::new(path))
            .await
            .with_context(|| format!("reading settings file {}", path))?,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if tokio::fs::metadata(&path).await.is_ok() {
                Settings::load(&path).await?
            } else {
                debug!("No {} found, using default settings", DEFAULT_CONFIG_FILE);
                Settings::default()
            }
        }
    };

    let settings = apply_overrides(settings, cli_args)?;
    settings.validate()?;
    Ok(settings)
}

/// Apply `--host`, `--port`, `--sink-url`, `--sink-index` and `--log-level`
pub fn apply_overrides(
    mut settings: Settings,
    cli_args: &HashMap<String, String>,
) -> Result<Settings, MockError> {
    if let Some(host) = cli_args.get("host") {
        settings.server.host = host.clone();
    }

    if let Some(port) = cli_args.get("port") {
        settings.server.port = port
            .parse()
            .map_err(|_| MockError::ConfigError(format!("invalid port: {}", port)))?;
    }

    if let Some(url) = cli_args.get("sink-url") {
        settings.sink.base_url = url.clone();
    }

    if let Some(index) = cli_args.get("sink-index") {
        settings.sink.index = index.clone();
    }

    if let Some(level) = cli_args.get("log-level") {
        settings.log_level = level.parse().map_err(MockError::ConfigError)?;
    }

    Ok(settings)
}
