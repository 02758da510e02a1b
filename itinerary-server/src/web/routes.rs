//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::domain::Itinerary;
use crate::store::StoreError;

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itineraries", get(list_itineraries))
        .route("/itineraries/:line", get(get_itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every stored itinerary.
async fn list_itineraries(
    State(state): State<AppState>,
) -> Result<Json<Vec<Itinerary>>, AppError> {
    Ok(Json(state.resolver.all().await?))
}

/// The itinerary for one line; a placeholder when the feed is unavailable.
async fn get_itinerary(
    State(state): State<AppState>,
    Path(line): Path<String>,
) -> Result<Json<Itinerary>, AppError> {
    Ok(Json(state.resolver.line(&line).await?))
}

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
