//! A route handler for updating an existing transaction in place.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::Date;

use crate::Error;

use super::{
    core::{TransactionChanges, TransactionState, update_transaction},
    get_endpoint::IdQuery,
};

/// The request body for updating a transaction.
///
/// All fields are optional; omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// The new amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The new description.
    #[serde(default)]
    pub description: Option<String>,
    /// The new date.
    #[serde(default)]
    pub date: Option<Date>,
    /// The new category.
    #[serde(default)]
    pub category: Option<String>,
}

/// A route handler for updating the transaction named by the `id` query
/// parameter, responds with the updated record.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<IdQuery>,
    payload: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let id = query.id.ok_or(Error::MissingId)?;
    let Json(request) =
        payload.map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))?;

    let handle = state.connection()?;
    let connection = handle.lock().map_err(|_| Error::DatabaseLockError)?;

    let transaction = update_transaction(
        id,
        TransactionChanges {
            amount: request.amount,
            date: request.date,
            description: request.description,
            category: request.category,
        },
        &connection,
    )?;

    Ok((StatusCode::OK, Json(transaction)).into_response())
}
