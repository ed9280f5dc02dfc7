//! WebSocket session opener.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use http::header::HeaderValue;
use serde::Serialize;
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tracing::{debug, error};
use uuid::Uuid;

use engine_core::EngineAddress;

use crate::error::SessionError;
use crate::rpc;

pub const DEFAULT_TTL_SECS: u64 = 60;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SESSION_HEADER: &str = "x-session-id";

/// An opened session, ready to be handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub engine: EngineAddress,
}

/// Opens sessions against engines over their WebSocket document API.
pub struct SessionOpener {
    /// Seconds the engine keeps the session alive after the opening
    /// socket disconnects.
    ttl_secs: u64,
    timeout: Duration,
}

impl SessionOpener {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Open a session on `engine` for `doc_id` (an anonymous session
    /// document when absent), authorized by `credential`.
    ///
    /// The credential is passed through opaquely in the `Authorization`
    /// header; this crate never inspects it.
    pub async fn open(
        &self,
        engine: &EngineAddress,
        doc_id: Option<&str>,
        credential: &str,
    ) -> Result<SessionInfo, SessionError> {
        let session_id = Uuid::new_v4().to_string();
        let url = format!("ws://{engine}/app/engineData/ttl/{}", self.ttl_secs);

        let mut request = url.into_client_request()?;
        let headers = request.headers_mut();
        headers.insert(
            SESSION_HEADER,
            HeaderValue::from_str(&session_id).map_err(http::Error::from)?,
        );
        if !credential.is_empty() {
            headers.insert(
                http::header::AUTHORIZATION,
                HeaderValue::from_str(credential).map_err(http::Error::from)?,
            );
        }

        let (ws, _) = tokio::time::timeout(self.timeout, connect_async(request))
            .await
            .map_err(|_| SessionError::Timeout(self.timeout))?
            .map_err(|source| SessionError::Handshake {
                address: engine.to_string(),
                source,
            })?;
        let (mut tx, mut rx) = ws.split();

        let open_request = match doc_id {
            Some(doc_id) => rpc::open_doc(1, doc_id),
            None => rpc::create_session_doc(1),
        };
        tx.send(Message::Text(open_request.to_string())).await?;

        let reply = tokio::time::timeout(self.timeout, async {
            while let Some(frame) = rx.next().await {
                match frame? {
                    Message::Text(text) => {
                        let value: Value = serde_json::from_str(&text)?;
                        // Engines may push notifications before the
                        // reply; only frames with an id answer us.
                        if value.get("id").is_some() {
                            return Ok(value);
                        }
                    }
                    Message::Close(_) => return Err(SessionError::ClosedEarly),
                    _ => {}
                }
            }
            Err(SessionError::ClosedEarly)
        })
        .await
        .map_err(|_| SessionError::Timeout(self.timeout))??;

        if let Some(detail) = rpc::reply_error(&reply) {
            error!(engine = %engine, error = %detail, "engine rejected document open");
            return Err(SessionError::Rejected(detail));
        }

        // The engine holds the session for the TTL; dropping the socket
        // here is deliberate.
        let _ = tx.send(Message::Close(None)).await;

        debug!(engine = %engine, session_id = %session_id, "session opened");
        Ok(SessionInfo {
            session_id,
            engine: engine.clone(),
        })
    }
}
