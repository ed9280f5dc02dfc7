//! Session service — discovery, selection, and session open in one step.
//!
//! The collaborators are trait seams so tests can stub them: discovery
//! returns a fresh snapshot per request, the selector reduces it to one
//! engine, and the opener performs the document handshake. Upstream
//! failures pass through unchanged; retry policy belongs to the caller.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use engine_balancer::{BalancerError, EngineSelector};
use engine_core::{EngineAddress, EngineRecord};
use engine_discovery::{DiscoveryClient, DiscoveryError};
use engine_session::{SessionError, SessionInfo, SessionOpener};

/// Errors surfaced by [`SessionService::open_session`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    NoEligibleEngine(#[from] BalancerError),

    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("session open failed: {0}")]
    Session(#[from] SessionError),
}

/// Source of inventory snapshots.
#[async_trait]
pub trait Discover: Send + Sync {
    async fn query(&self, properties: &Value) -> Result<Vec<EngineRecord>, DiscoveryError>;
}

#[async_trait]
impl Discover for DiscoveryClient {
    async fn query(&self, properties: &Value) -> Result<Vec<EngineRecord>, DiscoveryError> {
        DiscoveryClient::query(self, properties).await
    }
}

/// Session establishment against a chosen engine.
#[async_trait]
pub trait OpenSession: Send + Sync {
    async fn open(
        &self,
        engine: &EngineAddress,
        doc_id: Option<&str>,
        credential: &str,
    ) -> Result<SessionInfo, SessionError>;
}

#[async_trait]
impl OpenSession for SessionOpener {
    async fn open(
        &self,
        engine: &EngineAddress,
        doc_id: Option<&str>,
        credential: &str,
    ) -> Result<SessionInfo, SessionError> {
        SessionOpener::open(self, engine, doc_id, credential).await
    }
}

pub struct SessionService<D = DiscoveryClient, O = SessionOpener> {
    discovery: D,
    selector: EngineSelector,
    opener: O,
}

impl<D: Discover, O: OpenSession> SessionService<D, O> {
    pub fn new(discovery: D, selector: EngineSelector, opener: O) -> Self {
        Self {
            discovery,
            selector,
            opener,
        }
    }

    /// Open a session: fetch a fresh inventory snapshot, select one
    /// engine, and perform the document handshake against it.
    pub async fn open_session(
        &self,
        doc_id: Option<&str>,
        credential: &str,
    ) -> Result<SessionInfo, ServiceError> {
        let snapshot = self.discovery.query(&engine_properties()).await?;
        if snapshot.is_empty() {
            warn!("discovery returned an empty inventory");
        }

        let engine = self.selector.select(&snapshot)?;
        info!(engine = %engine.address, "engine selected for session");

        let session = self.opener.open(&engine.address, doc_id, credential).await?;
        Ok(session)
    }
}

/// Property filter for the discovery query. No filter: the capacity gate
/// and strategies do their own narrowing on the full inventory.
fn engine_properties() -> Value {
    serde_json::json!({})
}
