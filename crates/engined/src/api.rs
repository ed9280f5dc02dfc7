//! REST API handlers.
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/v1/health` | Liveness probe |
//! | GET | `/v1/session/doc/{doc_id}` | Open a session on a named document |
//! | GET | `/v1/session/session-doc` | Open a session on an anonymous document |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::error;

use engine_session::SessionInfo;

use crate::service::{ServiceError, SessionService};

type AppState = Arc<SessionService>;

pub fn build_router(service: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/session/doc/{doc_id}", get(open_doc))
        .route("/v1/session/session-doc", get(open_session_doc))
        .with_state(service)
}

async fn health() -> &'static str {
    "OK"
}

async fn open_doc(
    State(service): State<AppState>,
    Path(doc_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let doc_id = format!("/doc/{doc_id}");
    respond(service.open_session(Some(&doc_id), credential(&headers)).await)
}

async fn open_session_doc(State(service): State<AppState>, headers: HeaderMap) -> Response {
    respond(service.open_session(None, credential(&headers)).await)
}

/// The caller's credential, passed through to the engine opaquely.
fn credential(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn respond(result: Result<SessionInfo, ServiceError>) -> Response {
    match result {
        Ok(session) => Json(session).into_response(),
        Err(err) => {
            let status = match &err {
                ServiceError::NoEligibleEngine(_) => StatusCode::SERVICE_UNAVAILABLE,
                ServiceError::Discovery(_) | ServiceError::Session(_) => StatusCode::BAD_GATEWAY,
            };
            error!(error = %err, %status, "session request failed");
            (
                status,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    use engine_balancer::EngineSelector;
    use engine_core::Strategy;
    use engine_discovery::DiscoveryClient;
    use engine_session::SessionOpener;

    fn app(discovery_port: u16) -> Router {
        let service = Arc::new(SessionService::new(
            DiscoveryClient::new("127.0.0.1", discovery_port),
            EngineSelector::new(Strategy::RoundRobin, None),
            SessionOpener::new(60),
        ));
        build_router(service)
    }

    /// Stub discovery: answer one HTTP request with a canned JSON body.
    async fn stub_discovery(listener: TcpListener, body: &'static str) {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let _ = stream.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app(1)
            .oneshot(Request::get("/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn empty_inventory_maps_to_service_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(stub_discovery(listener, "[]"));

        let response = app(port)
            .oneshot(
                Request::get("/v1/session/session-doc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn discovery_failure_maps_to_bad_gateway() {
        // Bind then drop: nothing listens on this port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let response = app(port)
            .oneshot(
                Request::get("/v1/session/doc/sales")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
