//! A route handler for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::Error;

use super::core::{Transaction, TransactionState, create_transaction};

/// The request body for creating a transaction.
///
/// Amount and description are required. The date defaults to today (UTC) and
/// the category falls back to the uncategorized sentinel.
#[derive(Debug, Deserialize)]
pub struct NewTransactionRequest {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened, e.g. "2024-01-05".
    #[serde(default)]
    pub date: Option<Date>,
    /// The category the transaction belongs to.
    #[serde(default)]
    pub category: Option<String>,
}

/// A route handler for creating a new transaction, responds with the stored
/// record including its assigned ID.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<NewTransactionRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) =
        payload.map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))?;

    let date = request
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let handle = state.connection()?;
    let connection = handle.lock().map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(
        Transaction::build(request.amount, date, &request.description)
            .category(request.category),
        &connection,
    )?;

    Ok((StatusCode::CREATED, Json(transaction)).into_response())
}
