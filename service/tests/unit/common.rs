//! Test doubles for the log store, clock and delay

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use upgrade_mock::clock::{ClockExt, DelayExt, SystemClock};
use upgrade_mock::errors::SinkError;
use upgrade_mock::events::{Event, Recorder};
use upgrade_mock::sink::LogStoreExt;

/// Store that keeps every written event in memory
#[derive(Default)]
pub struct MemoryStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogStoreExt for MemoryStore {
    async fn put(&self, event: &Event) -> Result<(), SinkError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Store that rejects every write as a server error
#[derive(Default)]
pub struct FailingStore {
    attempts: AtomicUsize,
}

impl FailingStore {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogStoreExt for FailingStore {
    async fn put(&self, _event: &Event) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Status {
            status: 500,
            body: "internal error".to_string(),
        })
    }
}

/// Store that answers only after a long pause
pub struct HangingStore(pub Duration);

#[async_trait]
impl LogStoreExt for HangingStore {
    async fn put(&self, _event: &Event) -> Result<(), SinkError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Clock that advances by one millisecond per reading
pub struct SteppingClock(AtomicI64);

impl SteppingClock {
    pub fn starting_at(millis: i64) -> Self {
        Self(AtomicI64::new(millis))
    }
}

impl ClockExt for SteppingClock {
    fn now_millis(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Delay that records the requested wait and returns at once
#[derive(Default)]
pub struct InstantDelay {
    waits: Mutex<Vec<Duration>>,
}

impl InstantDelay {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl DelayExt for InstantDelay {
    async fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

pub fn recorder_with(store: Arc<dyn LogStoreExt>, timeout: Duration) -> Recorder {
    Recorder::new(store, Arc::new(SystemClock), timeout)
}

/// In-memory writer for asserting on operator log output
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Subscriber writing WARN and above into this buffer
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || logs.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
