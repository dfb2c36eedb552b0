//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    dashboard::{get_daily_totals_endpoint, get_dashboard_endpoint},
    endpoints,
    health::get_health_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint)
                .post(create_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(endpoints::DASHBOARD_API, get(get_dashboard_endpoint))
        .route(endpoints::DASHBOARD_DAILY_API, get(get_daily_totals_endpoint))
        .route(endpoints::HEALTH_API, get(get_health_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The JSON 404 response for paths outside the API surface.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
