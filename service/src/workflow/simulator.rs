//! Fixed scripts for each upgrade stage
//!
//! Every stage emits a handful of sub-step events with placeholder results
//! and returns the last one. Nothing here talks to a real device.

use std::sync::Arc;
use std::time::Duration;

use openapi_server::models::DeviceRequest;
use rand::Rng;
use serde_json::{json, Value};
use tracing::info;

use crate::app::options::SimulationOptions;
use crate::clock::DelayExt;
use crate::events::{details, Event, Recorder, StepRecorder};
use crate::workflow::stage::UpgradeStage;
use crate::workflow::{STATUS_SUCCESS, UPGRADE_STAGE};

/// Runs the scripted upgrade stages against a recorder
pub struct Simulator {
    recorder: Arc<Recorder>,
    delay: Arc<dyn DelayExt>,
    options: SimulationOptions,
}

impl Simulator {
    pub fn new(
        recorder: Arc<Recorder>,
        delay: Arc<dyn DelayExt>,
        options: SimulationOptions,
    ) -> Self {
        Self {
            recorder,
            delay,
            options,
        }
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Run one stage for the given flow and device, returning its final event
    pub async fn run(&self, stage: UpgradeStage, request: &DeviceRequest) -> Event {
        info!(
            "Starting {} endpoint for flow {} device {}",
            stage, request.flow_instance_id, request.device_id
        );

        let log = self.recorder.for_step(
            &request.flow_instance_id,
            &request.device_id,
            UPGRADE_STAGE,
            &request.step,
        );

        match stage {
            UpgradeStage::CheckDeviceCompatibility => check_device_compatibility(&log).await,
            UpgradeStage::PreUpgradeBackup => pre_upgrade_backup(&log).await,
            UpgradeStage::RebootDevice => self.reboot_device(&log).await,
            UpgradeStage::MgmtPort => mgmt_port(&log).await,
            UpgradeStage::PostRebootChecks => post_reboot_checks(&log).await,
            UpgradeStage::DeviceActivation => device_activation(&log).await,
            UpgradeStage::PostActivationCheck => post_activation_check(&log).await,
        }
    }

    async fn reboot_device(&self, log: &StepRecorder<'_>) -> Event {
        emit(
            log,
            vec![
                ("Initiating device reboot process", json!({"action": "reboot_initiated"})),
                ("Preparing device for reboot", json!({"preparation_status": "completed"})),
                ("Stopping device services", json!({"services_stopped": "all"})),
                ("Issuing reboot command to device", json!({"command_status": "sent"})),
            ],
        )
        .await;

        let wait_secs = self.reboot_wait_secs();
        info!("Waiting for {} seconds to simulate reboot time...", wait_secs);
        self.delay.sleep(Duration::from_secs(wait_secs)).await;

        log.log(
            STATUS_SUCCESS,
            &format!("Waiting for reboot completion, waited {} seconds", wait_secs),
            details(json!({"wait_duration": wait_secs})),
        )
        .await;

        emit(
            log,
            vec![
                ("Checking device reboot status", json!({"reboot_status": "in_progress"})),
                (
                    "Device reboot process completed successfully",
                    json!({"final_status": "completed"}),
                ),
            ],
        )
        .await;

        log.log(
            STATUS_SUCCESS,
            "Reboot completed",
            details(json!({"upgrade_status": "Completed"})),
        )
        .await
    }

    fn reboot_wait_secs(&self) -> u64 {
        let min = self.options.reboot_wait_min_secs;
        let max = self.options.reboot_wait_max_secs;
        rand::thread_rng().gen_range(min.min(max)..=min.max(max))
    }
}

async fn emit(log: &StepRecorder<'_>, steps: Vec<(&str, Value)>) {
    for (message, payload) in steps {
        log.log(STATUS_SUCCESS, message, details(payload)).await;
    }
}

async fn check_device_compatibility(log: &StepRecorder<'_>) -> Event {
    emit(
        log,
        vec![
            ("Starting check-device-compatibility check", json!({"action": "initiated"})),
            ("Checking UCPE version compatibility", json!({"ucpe_version": "v1.0"})),
            ("Verifying disk status", json!({"disk_status": "Good"})),
            ("Validating image version", json!({"image_version": "1.2.3"})),
        ],
    )
    .await;

    log.log(
        STATUS_SUCCESS,
        "Compatibility check passed",
        details(json!({
            "ucpe_version": "v1.0",
            "disk_status": "Good",
            "image_version": "1.2.3",
            "bios_cpld": "Updated",
            "nic_fw": "1.0.0",
            "ssd_fw": "1.0.1"
        })),
    )
    .await
}

async fn pre_upgrade_backup(log: &StepRecorder<'_>) -> Event {
    emit(
        log,
        vec![
            ("Initiating pre-upgrade backup process", json!({"action": "backup_started"})),
            ("Creating image backup", json!({"backup_path": "/path/to/image"})),
            ("Generating MD5 checksum for backup", json!({"checksum": "abc123"})),
            ("Verifying out-of-band connection", json!({"oob_status": "Verified"})),
        ],
    )
    .await;

    log.log(
        STATUS_SUCCESS,
        "Backup completed",
        details(json!({
            "Image Backup": "/path/to/image",
            "MD5 Checksum": "abc123",
            "OOB connection": "Verified",
            "Staging Image": "/path/to/staging"
        })),
    )
    .await
}

async fn mgmt_port(log: &StepRecorder<'_>) -> Event {
    emit(
        log,
        vec![
            ("Starting management port verification", json!({"action": "port_check_initiated"})),
            ("Testing management port connectivity", json!({"connectivity_test": "passed"})),
            ("Verifying management port configuration", json!({"config_status": "valid"})),
            ("Management port status confirmed as operational", json!({"port_status": "Up"})),
        ],
    )
    .await;

    log.log(
        STATUS_SUCCESS,
        "Management port is up",
        details(json!({"port_status": "Up"})),
    )
    .await
}

async fn post_reboot_checks(log: &StepRecorder<'_>) -> Event {
    emit(
        log,
        vec![
            ("Initiating post-reboot verification checks", json!({"action": "checks_started"})),
            ("Verifying device connectivity after reboot", json!({"connectivity": "OK"})),
            ("Checking storage availability", json!({"storage": "Sufficient"})),
            ("Validating system integrity post-reboot", json!({"integrity_check": "passed"})),
        ],
    )
    .await;

    log.log(
        STATUS_SUCCESS,
        "Post reboot checks passed",
        details(json!({"connectivity": "OK", "storage": "Sufficient"})),
    )
    .await
}

async fn device_activation(log: &StepRecorder<'_>) -> Event {
    emit(
        log,
        vec![
            ("Initiating device activation process", json!({"action": "activation_started"})),
            ("Configuring device settings for activation", json!({"config_status": "applied"})),
            ("Activating device services", json!({"services_activated": "all"})),
            (
                "Device activation process completed successfully",
                json!({"activation_status": "Completed"}),
            ),
        ],
    )
    .await;

    log.log(
        STATUS_SUCCESS,
        "Device activation completed",
        details(json!({"activation_status": "Completed"})),
    )
    .await
}

async fn post_activation_check(log: &StepRecorder<'_>) -> Event {
    emit(
        log,
        vec![
            ("Initiating post-activation verification", json!({"action": "checks_started"})),
            ("Checking device connectivity after activation", json!({"connectivity": "OK"})),
            ("Verifying storage availability post-activation", json!({"storage": "Sufficient"})),
            ("Validating device activation status", json!({"validation_status": "passed"})),
        ],
    )
    .await;

    log.log(
        STATUS_SUCCESS,
        "Post activation checks passed",
        details(json!({"connectivity": "OK", "storage": "Sufficient"})),
    )
    .await
}
