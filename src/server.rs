//! HTTP service exposing receipt submission and points lookup.
//!
//! Routes:
//!
//! - `POST /receipts/process` stores a receipt and returns `{"id": ...}`.
//! - `GET /receipts/{id}/points` scores a stored receipt and returns
//!   `{"points": ...}`.
//! - `GET /health` reports liveness and the number of stored receipts.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ReceiptError, Result};
use crate::models::{Receipt, ReceiptId};
use crate::scoring::ScoringEngine;
use crate::storage::ReceiptStore;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Receipt storage shared by all requests.
    store: Arc<dyn ReceiptStore>,
}

impl AppState {
    /// Creates handler state backed by `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        Self { store }
    }
}

/// Response body for `POST /receipts/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Identifier assigned to the stored receipt.
    pub id: ReceiptId,
}

/// Response body for `GET /receipts/{id}/points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResponse {
    /// Points awarded to the receipt.
    pub points: u64,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the service is able to answer.
    pub status: String,
    /// Number of receipts currently stored.
    pub receipts: usize,
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Client-facing error message.
    error: &'static str,
}

impl ReceiptError {
    /// HTTP status and client-facing message for this error.
    const fn status(&self) -> (StatusCode, &'static str) {
        match *self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Receipt not found"),
            Self::Serialization(_)
            | Self::InvalidAmount { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidTime { .. } => (StatusCode::BAD_REQUEST, "Invalid JSON input"),
            Self::Storage(_) | Self::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ReceiptError {
    #[inline]
    fn into_response(self) -> Response {
        let (status, error) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Builds the service router over `state`.
#[inline]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/{id}/points", get(receipt_points))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if the listener cannot be bound or the
/// server fails while running.
#[inline]
pub async fn serve(config: ServerConfig, store: Arc<dyn ReceiptStore>) -> Result<()> {
    let listener = TcpListener::bind(config.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(bind = %local_addr, "listening");

    axum::serve(listener, router(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            core::future::pending::<()>().await;
        }
    }
}

/// `GET /health`.
#[tracing::instrument(skip_all)]
async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let receipts = state.store.len()?;
    Ok(Json(HealthResponse {
        status: "ok".to_owned(),
        receipts,
    }))
}

/// `POST /receipts/process`.
#[tracing::instrument(skip_all)]
async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>> {
    let receipt: Receipt = serde_json::from_slice(&body)?;
    let id = state.store.put(receipt)?;
    tracing::info!(id = %id, "receipt processed");
    Ok(Json(ProcessResponse { id }))
}

/// `GET /receipts/{id}/points`.
#[tracing::instrument(skip_all, fields(id = %id))]
async fn receipt_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>> {
    let receipt = state.store.get(&ReceiptId::new(id))?;
    let points = ScoringEngine::compute(&receipt);
    tracing::debug!(points, "receipt scored");
    Ok(Json(PointsResponse { points }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt as _;
    use tower::ServiceExt as _;

    use super::*;
    use crate::storage::InMemoryReceiptStore;

    const TARGET_RECEIPT: &str = r#"{
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
            {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
            {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
            {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
            {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
        ],
        "total": "35.35"
    }"#;

    fn test_state() -> (AppState, Arc<InMemoryReceiptStore>) {
        let store = Arc::new(InMemoryReceiptStore::new());
        let shared: Arc<dyn ReceiptStore> = Arc::<InMemoryReceiptStore>::clone(&store);
        (AppState::new(shared), store)
    }

    async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn process_then_points() {
        let (state, store) = test_state();
        let app = router(state);

        let (status, body) =
            send(app.clone(), Method::POST, "/receipts/process", TARGET_RECEIPT).await;
        assert_eq!(status, StatusCode::OK);
        let processed: ProcessResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(store.len().unwrap(), 1);

        let uri = format!("/receipts/{}/points", processed.id);
        let (points_status, points_body) = send(app, Method::GET, &uri, "").await;
        assert_eq!(points_status, StatusCode::OK);
        let points: PointsResponse = serde_json::from_slice(&points_body).unwrap();
        assert_eq!(points, PointsResponse { points: 33 });
    }

    #[tokio::test]
    async fn handler_state_shares_the_store() {
        let (state, store) = test_state();
        let _id = state
            .store
            .put(serde_json::from_str(TARGET_RECEIPT).unwrap())
            .unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn process_accepts_missing_content_type() {
        let (state, _store) = test_state();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/receipts/process")
            .body(Body::from(TARGET_RECEIPT))
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn process_rejects_invalid_json() {
        let (state, store) = test_state();
        let (status, body) =
            send(router(state), Method::POST, "/receipts/process", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid JSON input");
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn process_rejects_wrong_shape() {
        let (state, _store) = test_state();
        let (status, _body) = send(
            router(state),
            Method::POST,
            "/receipts/process",
            r#"{"retailer": "Target"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn process_keeps_receipt_with_malformed_total() {
        let (state, _store) = test_state();
        let app = router(state);
        let receipt = TARGET_RECEIPT.replace("35.35", "lots");

        let (status, body) = send(app.clone(), Method::POST, "/receipts/process", &receipt).await;
        assert_eq!(status, StatusCode::OK);
        let processed: ProcessResponse = serde_json::from_slice(&body).unwrap();

        let uri = format!("/receipts/{}/points", processed.id);
        let (points_status, points_body) = send(app, Method::GET, &uri, "").await;
        assert_eq!(points_status, StatusCode::OK);
        let points: PointsResponse = serde_json::from_slice(&points_body).unwrap();
        assert_eq!(points.points, 28);
    }

    #[tokio::test]
    async fn points_for_unknown_id_is_not_found() {
        let (state, _store) = test_state();
        let (status, body) =
            send(router(state), Method::GET, "/receipts/nope/points", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Receipt not found");
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let (state, _store) = test_state();
        let (status, _body) = send(router(state), Method::GET, "/receipts/process", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn health_reports_receipt_count() {
        let (state, store) = test_state();
        let _id = store
            .put(serde_json::from_str(TARGET_RECEIPT).unwrap())
            .unwrap();
        let (status, body) = send(router(state), Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.receipts, 1);
    }

    #[test]
    fn error_status_mapping() {
        let not_found = ReceiptError::NotFound(ReceiptId::new("x".to_owned()));
        assert_eq!(not_found.status().0, StatusCode::NOT_FOUND);
        let storage = ReceiptError::Storage("poisoned".into());
        assert_eq!(storage.status().0, StatusCode::INTERNAL_SERVER_ERROR);
        let bad_json = ReceiptError::from(serde_json::from_str::<Receipt>("[]").unwrap_err());
        assert_eq!(bad_json.status().0, StatusCode::BAD_REQUEST);
    }
}
