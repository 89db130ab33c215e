//! Upgrade Mock - Entry Point
//!
//! Serves the simulated device upgrade stages over HTTP.

use std::env;

use upgrade_mock::app::cli::{load_settings, parse_args};
use upgrade_mock::app::options::AppOptions;
use upgrade_mock::app::run::run;
use upgrade_mock::logs::{init_logging, LogOptions};
use upgrade_mock::utils::version_info;

use tracing::{error, info};

const USAGE: &str = "\
Usage: upgrade-mock [--config=<path>] [--host=<host>] [--port=<port>]
                    [--sink-url=<url>] [--sink-index=<index>] [--log-level=<level>]
       upgrade-mock --version";

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli_args = parse_args(env::args().skip(1));

    // Print version and exit
    let version = version_info();
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version) {
            Ok(json) => println!("{}", json),
            Err(_) => println!("{}", version.version),
        }
        return;
    }

    if cli_args.contains_key("help") {
        println!("{}", USAGE);
        return;
    }

    // Retrieve the settings
    let settings = match load_settings(&cli_args).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to load settings: {}", e);
            std::process::exit(2);
        }
    };

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        stdout: settings.log_stdout,
        log_dir: settings.log_dir.clone(),
        json_format: settings.log_json,
    };
    let _log_guard = match init_logging(log_options) {
        Ok(guard) => guard,
        Err(e) => {
            println!("Failed to initialize logging: {e}");
            None
        }
    };

    // Run the server
    let options = AppOptions::from(&settings);
    info!("Running upgrade mock {} with options: {:?}", version.version, options);
    if let Err(e) = run(options, await_shutdown_signal()).await {
        error!("Failed to run the service: {e}");
        std::process::exit(1);
    }
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to listen for SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to listen for SIGINT");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("Ctrl+C received, shutting down...");
    }
}
