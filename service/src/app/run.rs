//! Main application run loop

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app::options::AppOptions;
use crate::clock::{SystemClock, TokioDelay};
use crate::errors::MockError;
use crate::events::Recorder;
use crate::http::client::HttpClient;
use crate::server::serve::serve;
use crate::server::state::ServerState;
use crate::sink::HttpLogStore;
use crate::workflow::Simulator;

/// Run the upgrade mock service until `shutdown_signal` resolves
pub async fn run(
    options: AppOptions,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), MockError> {
    info!("Initializing upgrade mock service...");

    let (shutdown_tx, _shutdown_rx): (broadcast::Sender<()>, _) = broadcast::channel(1);

    let state = init_server_state(&options)?;
    let mut server_rx = shutdown_tx.subscribe();
    let mut server_handle = serve(&options.server, state, async move {
        let _ = server_rx.recv().await;
    })
    .await?;

    tokio::select! {
        _ = shutdown_signal => {
            info!("Shutdown signal received, shutting down...");
        }
        result = &mut server_handle => {
            error!("HTTP server stopped unexpectedly");
            return join_result(result);
        }
    }

    shutdown(shutdown_tx, server_handle, options.max_shutdown_delay).await
}

/// Wire the log store, recorder and stage simulator from options
pub fn init_server_state(options: &AppOptions) -> Result<Arc<ServerState>, MockError> {
    info!(
        "Logging events to {}/{} (timeout {:?})",
        options.sink.base_url, options.sink.index, options.sink.timeout
    );

    let http_client = HttpClient::new(&options.sink.base_url, options.sink.timeout)?;
    let store = Arc::new(HttpLogStore::new(http_client, options.sink.index.clone()));
    let recorder = Arc::new(Recorder::new(
        store,
        Arc::new(SystemClock),
        options.sink.timeout,
    ));
    let simulator = Arc::new(Simulator::new(
        recorder,
        Arc::new(TokioDelay),
        options.simulation,
    ));

    Ok(Arc::new(ServerState::new(simulator)))
}

// ================================= SHUTDOWN ===================================== //

async fn shutdown(
    shutdown_tx: broadcast::Sender<()>,
    server_handle: JoinHandle<Result<(), MockError>>,
    max_shutdown_delay: Duration,
) -> Result<(), MockError> {
    info!("Shutting down upgrade mock service...");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(max_shutdown_delay, server_handle).await {
        Ok(result) => {
            join_result(result)?;
            info!("Shutdown complete");
            Ok(())
        }
        Err(_) => Err(MockError::ServerError(format!(
            "shutdown timed out after {:?}",
            max_shutdown_delay
        ))),
    }
}

fn join_result(
    result: Result<Result<(), MockError>, tokio::task::JoinError>,
) -> Result<(), MockError> {
    result.map_err(|e| MockError::ServerError(e.to_string()))?
}
