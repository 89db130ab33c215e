//! HTTP request handlers

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use openapi_server::models::{DeviceRequest, HealthResponse, VersionResponse};

use crate::events::Event;
use crate::server::state::ServerState;
use crate::utils::version_info;
use crate::workflow::UpgradeStage;

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "upgrade-mock".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

async fn run_stage(state: &ServerState, stage: UpgradeStage, request: DeviceRequest) -> Json<Event> {
    Json(state.simulator.run(stage, &request).await)
}

/// Device compatibility check handler
pub async fn check_device_compatibility_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<DeviceRequest>,
) -> Json<Event> {
    run_stage(&state, UpgradeStage::CheckDeviceCompatibility, request).await
}

/// Pre-upgrade backup handler
pub async fn pre_upgrade_backup_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<DeviceRequest>,
) -> Json<Event> {
    run_stage(&state, UpgradeStage::PreUpgradeBackup, request).await
}

/// Device reboot handler
pub async fn reboot_device_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<DeviceRequest>,
) -> Json<Event> {
    run_stage(&state, UpgradeStage::RebootDevice, request).await
}

/// Management port check handler
pub async fn mgmt_port_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<DeviceRequest>,
) -> Json<Event> {
    run_stage(&state, UpgradeStage::MgmtPort, request).await
}

/// Post-reboot checks handler
pub async fn post_reboot_checks_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<DeviceRequest>,
) -> Json<Event> {
    run_stage(&state, UpgradeStage::PostRebootChecks, request).await
}

/// Device activation handler
pub async fn device_activation_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<DeviceRequest>,
) -> Json<Event> {
    run_stage(&state, UpgradeStage::DeviceActivation, request).await
}

/// Post-activation check handler
pub async fn post_activation_check_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<DeviceRequest>,
) -> Json<Event> {
    run_stage(&state, UpgradeStage::PostActivationCheck, request).await
}
