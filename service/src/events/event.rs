//! Upgrade event model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form payload attached to an event
pub type Details = Map<String, Value>;

/// Build a [`Details`] map from a JSON value.
///
/// Anything other than a JSON object yields an empty map.
pub fn details(value: Value) -> Details {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// One structured record describing a simulated workflow sub-step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: String,
    flow_instance_id: String,
    device_id: String,
    stage: String,
    timestamp: i64,
    step: String,
    status: String,
    message: String,
    #[serde(default)]
    details: Details,
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        timestamp: i64,
        flow_instance_id: &str,
        device_id: &str,
        stage: &str,
        step: &str,
        status: &str,
        message: &str,
        details: Details,
    ) -> Self {
        Self {
            id,
            flow_instance_id: flow_instance_id.to_string(),
            device_id: device_id.to_string(),
            stage: stage.to_string(),
            timestamp,
            step: step.to_string(),
            status: status.to_string(),
            message: message.to_string(),
            details,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn flow_instance_id(&self) -> &str {
        &self.flow_instance_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &Details {
        &self.details
    }
}
