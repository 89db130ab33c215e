//! Event recorder
//!
//! Builds an [`Event`], makes one bounded attempt to write it to the log
//! store and hands the event back whatever the outcome of that write.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::ClockExt;
use crate::errors::SinkError;
use crate::events::event::{Details, Event};
use crate::sink::LogStoreExt;
use crate::utils::generate_uuid;

/// Records upgrade events to a best-effort log store
pub struct Recorder {
    store: Arc<dyn LogStoreExt>,
    clock: Arc<dyn ClockExt>,
    timeout: Duration,
}

impl Recorder {
    /// Create a new recorder writing to `store`, waiting at most `timeout` per write
    pub fn new(store: Arc<dyn LogStoreExt>, clock: Arc<dyn ClockExt>, timeout: Duration) -> Self {
        Self {
            store,
            clock,
            timeout,
        }
    }

    /// Upper bound on a single store write
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Record an event.
    ///
    /// Never fails: store errors, non-success responses and timeouts are
    /// logged and the fully built event is returned regardless.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        &self,
        flow_instance_id: &str,
        device_id: &str,
        stage: &str,
        step: &str,
        status: &str,
        message: &str,
        details: Option<Details>,
    ) -> Event {
        let event = Event::new(
            generate_uuid(),
            self.clock.now_millis(),
            flow_instance_id,
            device_id,
            stage,
            step,
            status,
            message,
            details.unwrap_or_default(),
        );

        match self.write(&event).await {
            Ok(()) => {
                debug!(
                    "Logged event {}: {} - {} - {} - {}",
                    event.id(),
                    flow_instance_id,
                    device_id,
                    step,
                    status
                );
            }
            Err(e) => {
                warn!(
                    "Log store write failed for event {}, returning it unindexed: {}",
                    event.id(),
                    e
                );
            }
        }

        event
    }

    /// Fix the correlation fields for a run of events in one step
    pub fn for_step<'a>(
        &'a self,
        flow_instance_id: &'a str,
        device_id: &'a str,
        stage: &'a str,
        step: &'a str,
    ) -> StepRecorder<'a> {
        StepRecorder {
            recorder: self,
            flow_instance_id,
            device_id,
            stage,
            step,
        }
    }

    async fn write(&self, event: &Event) -> Result<(), SinkError> {
        match tokio::time::timeout(self.timeout, self.store.put(event)).await {
            Ok(result) => result,
            Err(_) => Err(SinkError::Timeout(self.timeout)),
        }
    }
}

/// A [`Recorder`] bound to one flow, device, stage and step
pub struct StepRecorder<'a> {
    recorder: &'a Recorder,
    flow_instance_id: &'a str,
    device_id: &'a str,
    stage: &'a str,
    step: &'a str,
}

impl StepRecorder<'_> {
    pub async fn log(&self, status: &str, message: &str, details: Details) -> Event {
        self.recorder
            .record(
                self.flow_instance_id,
                self.device_id,
                self.stage,
                self.step,
                status,
                message,
                Some(details),
            )
            .await
    }
}
