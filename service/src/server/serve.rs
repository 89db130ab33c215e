//! HTTP server setup

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::options::ServerOptions;
use crate::errors::MockError;
use crate::server::handlers::{
    check_device_compatibility_handler, device_activation_handler, health_handler,
    mgmt_port_handler, post_activation_check_handler, post_reboot_checks_handler,
    pre_upgrade_backup_handler, reboot_device_handler, version_handler,
};
use crate::server::state::ServerState;
use crate::workflow::UpgradeStage;

/// Build the service router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health and version
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Upgrade stages
        .route(
            &UpgradeStage::CheckDeviceCompatibility.route(),
            post(check_device_compatibility_handler),
        )
        .route(
            &UpgradeStage::PreUpgradeBackup.route(),
            post(pre_upgrade_backup_handler),
        )
        .route(&UpgradeStage::RebootDevice.route(), post(reboot_device_handler))
        .route(&UpgradeStage::MgmtPort.route(), post(mgmt_port_handler))
        .route(
            &UpgradeStage::PostRebootChecks.route(),
            post(post_reboot_checks_handler),
        )
        .route(
            &UpgradeStage::DeviceActivation.route(),
            post(device_activation_handler),
        )
        .route(
            &UpgradeStage::PostActivationCheck.route(),
            post(post_activation_check_handler),
        )
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), MockError>>, MockError> {
    let app = router(state);

    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| MockError::ServerError(e.to_string()))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| MockError::ServerError(e.to_string()))
    });

    Ok(handle)
}
