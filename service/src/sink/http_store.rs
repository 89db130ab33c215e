//! Document-index log store over HTTP

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SinkError;
use crate::events::Event;
use crate::http::client::HttpClient;
use crate::sink::LogStoreExt;

/// Log store addressed as `<base>/<index>/_doc/<id>`
pub struct HttpLogStore {
    client: HttpClient,
    index: String,
}

impl HttpLogStore {
    pub fn new(client: HttpClient, index: impl Into<String>) -> Self {
        Self {
            client,
            index: index.into(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn doc_path(&self, id: &str) -> String {
        format!("/{}/_doc/{}", self.index, id)
    }
}

#[async_trait]
impl LogStoreExt for HttpLogStore {
    async fn put(&self, event: &Event) -> Result<(), SinkError> {
        let status = self.client.put_json(&self.doc_path(event.id()), event).await?;
        debug!("Indexed event {} into {}: {}", event.id(), self.index, status);
        Ok(())
    }
}
