//! The health check endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, db::ConnectionCache};

/// The state needed by the health check.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// The cached database connection.
    pub db: Arc<ConnectionCache>,
}

impl FromRef<AppState> for HealthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
        }
    }
}

/// A route handler that reports whether the transaction store is reachable.
///
/// Acquiring the connection opens the database on first use, so a passing
/// health check also means the schema exists.
pub async fn get_health_endpoint(State(state): State<HealthState>) -> Response {
    match state.db.acquire() {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "message": "store connected" })),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("health check could not reach the store: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": error.to_string() })),
            )
                .into_response()
        }
    }
}
