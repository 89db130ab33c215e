//! Injectable time sources

use std::time::Duration;

use async_trait::async_trait;

/// Wall-clock source for event timestamps
pub trait ClockExt: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockExt for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Bounded wait used to simulate device latency
#[async_trait]
pub trait DelayExt: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Delay backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl DelayExt for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
