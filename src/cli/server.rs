//! HTTP server mode
//!
//! Exposes the pipeline over HTTP. The filtered record stream is adapted
//! directly into the response body, so records are serialized as they are
//! pulled and a disconnecting client stops further page fetches.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::http::{BeerApiClient, BeerApiConfig};
use crate::pipeline;
use crate::types::Beer;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Fetch client configuration
    pub client_config: BeerApiConfig,
    /// Default minimum ABV for the filter
    pub min_abv: f64,
}

/// App state shared across handlers
struct AppState {
    client: Arc<BeerApiClient>,
    min_abv: f64,
}

/// Query parameters for the filtered listing endpoint
#[derive(Debug, Deserialize)]
struct StrongBeersQuery {
    /// Override the configured ABV threshold
    min_abv: Option<f64>,
}

/// Response wrapper for error payloads
#[derive(Debug, Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
        }
    }
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, router(config))
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Build the application router
pub fn router(config: ServerConfig) -> Router {
    let state = AppState {
        client: Arc::new(BeerApiClient::with_config(config.client_config)),
        min_abv: config.min_abv,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/beers/strong", get(strong_beers))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Stream the filtered records as a JSON array.
///
/// Page 1 is fetched before the response is committed, so a fetch failure on
/// the very first page maps to 502. A failure on a later page aborts the
/// chunked body; records already delivered stay delivered.
async fn strong_beers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StrongBeersQuery>,
) -> Response {
    let min_abv = query.min_abv.unwrap_or(state.min_abv);

    let mut pages = Box::pin(pipeline::pages(state.client.clone()).peekable());

    if let Some(Err(e)) = pages.as_mut().peek().await {
        tracing::warn!(error = %e, "upstream fetch failed before response start");
        return (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::error(format!("Upstream fetch failed: {e}"))),
        )
            .into_response();
    }

    let records = pipeline::filter_records(pipeline::flatten_pages(pages), move |beer: &Beer| {
        beer.abv > min_abv
    });
    let body = Body::from_stream(pipeline::json_array_chunks(records));

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
