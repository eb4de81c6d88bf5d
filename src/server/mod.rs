pub mod cache;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, instrument};

use crate::client::VlrClient;
use crate::fetch::PageFetcher;
pub use cache::{CachedResponse, ResponseCache};

/// Body of the `404` returned when a match detail cannot be produced.
pub const MATCH_NOT_FOUND: &str = "Match not found or error occurred";

/// Shared state of the HTTP layer: the extraction client plus the injected cache.
pub struct AppState<F> {
    client: VlrClient<F>,
    cache: ResponseCache,
    ttl: Duration,
}

impl<F: PageFetcher> AppState<F> {
    pub fn new(client: VlrClient<F>, cache: ResponseCache, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }
}

/// Build the JSON API router. Every route is cached by request path and
/// open to cross-origin requests from any origin.
pub fn router<F: PageFetcher>(state: AppState<F>) -> Router {
    Router::new()
        .route("/matches", get(get_matches::<F>))
        .route("/match/{id}", get(get_match::<F>))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[instrument(skip_all, fields(path = %uri.path()))]
async fn get_matches<F: PageFetcher>(
    State(state): State<Arc<AppState<F>>>,
    uri: Uri,
) -> CachedResponse {
    let client = &state.client;
    state
        .cache
        .get_or_compute(uri.path(), state.ttl, move || async move {
            let matches = client.get_matches().await;
            json_response(StatusCode::OK, &matches)
        })
        .await
}

#[instrument(skip_all, fields(path = %uri.path()))]
async fn get_match<F: PageFetcher>(
    State(state): State<Arc<AppState<F>>>,
    uri: Uri,
    Path(id): Path<String>,
) -> CachedResponse {
    let client = &state.client;
    let id = id.as_str();
    state
        .cache
        .get_or_compute(uri.path(), state.ttl, move || async move {
            match client.get_match(id).await {
                Some(detail) => json_response(StatusCode::OK, &detail),
                None => json_response(
                    StatusCode::NOT_FOUND,
                    &serde_json::json!({ "error": MATCH_NOT_FOUND }),
                ),
            }
        })
        .await
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> CachedResponse {
    match serde_json::to_string(value) {
        Ok(body) => CachedResponse::json(status, body),
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            CachedResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": e.to_string() }).to_string(),
            )
        }
    }
}
