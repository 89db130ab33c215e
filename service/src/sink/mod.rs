//! Log store seam

pub mod http_store;

use async_trait::async_trait;

use crate::errors::SinkError;
use crate::events::Event;

pub use http_store::HttpLogStore;

/// Write-by-ID contract of the external log store
#[async_trait]
pub trait LogStoreExt: Send + Sync {
    /// Upsert `event` under its own id
    async fn put(&self, event: &Event) -> Result<(), SinkError>;
}
