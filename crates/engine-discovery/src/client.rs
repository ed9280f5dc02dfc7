//! HTTP client for the discovery service's query endpoint.

use std::time::Duration;

use http_body_util::{BodyExt, Empty};
use hyper_util::rt::TokioIo;
use tracing::{debug, warn};

use engine_core::EngineRecord;

use crate::error::DiscoveryError;
use crate::wire::WireEntry;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for `GET /v1/query` on the discovery service.
pub struct DiscoveryClient {
    host: String,
    port: u16,
    timeout: Duration,
}

impl DiscoveryClient {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the current inventory snapshot for engines matching
    /// `properties`.
    pub async fn query(
        &self,
        properties: &serde_json::Value,
    ) -> Result<Vec<EngineRecord>, DiscoveryError> {
        let address = format!("{}:{}", self.host, self.port);
        let uri = format!(
            "http://{address}/v1/query?properties={}",
            encode_properties(properties)
        );

        let records = tokio::time::timeout(self.timeout, self.fetch(&address, &uri))
            .await
            .map_err(|_| DiscoveryError::Timeout(self.timeout))??;
        debug!(engines = records.len(), "discovery query completed");
        Ok(records)
    }

    async fn fetch(
        &self,
        address: &str,
        uri: &str,
    ) -> Result<Vec<EngineRecord>, DiscoveryError> {
        let stream = tokio::net::TcpStream::connect(address).await.map_err(|source| {
            DiscoveryError::Connect {
                address: address.to_string(),
                source,
            }
        })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let req = http::Request::builder()
            .method("GET")
            .uri(uri)
            .header("host", address)
            .header("accept", "application/json")
            .body(Empty::<bytes::Bytes>::new())?;

        let resp = sender.send_request(req).await?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "discovery returned non-success");
            return Err(DiscoveryError::Status(resp.status()));
        }

        let body = resp.into_body().collect().await?.to_bytes();
        let entries: Vec<WireEntry> = serde_json::from_slice(&body)?;
        Ok(entries.into_iter().map(WireEntry::into_record).collect())
    }
}

/// Percent-encode the JSON property filter for the query string.
fn encode_properties(properties: &serde_json::Value) -> String {
    url::form_urlencoded::byte_serialize(properties.to_string().as_bytes()).collect()
}
