//! Upgrade mock API models

use serde::{Deserialize, Serialize};

/// Health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Version response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Body accepted by every upgrade stage endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRequest {
    #[serde(rename = "flowInstanceID")]
    pub flow_instance_id: String,

    #[serde(rename = "deviceID")]
    pub device_id: String,

    pub step: String,
}

impl DeviceRequest {
    pub fn new(
        flow_instance_id: impl Into<String>,
        device_id: impl Into<String>,
        step: impl Into<String>,
    ) -> Self {
        Self {
            flow_instance_id: flow_instance_id.into(),
            device_id: device_id.into(),
            step: step.into(),
        }
    }
}
