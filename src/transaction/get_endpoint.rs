//! A route handler for fetching transactions, either the full collection or a
//! single record by ID.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{Error, database_id::TransactionId};

use super::core::{TransactionState, get_all_transactions, get_transaction};

/// The query parameters accepted by the transaction collection endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    /// The ID of a single transaction to operate on.
    pub id: Option<TransactionId>,
}

/// A route handler for reading transactions.
///
/// Without an `id` query parameter, responds with the full transaction list
/// ordered by date descending. With `id`, responds with the single matching
/// transaction or 404.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, Error> {
    let handle = state.connection()?;
    let connection = handle.lock().map_err(|_| Error::DatabaseLockError)?;

    match query.id {
        Some(id) => {
            let transaction = get_transaction(id, &connection)?;
            Ok((StatusCode::OK, Json(transaction)).into_response())
        }
        None => {
            let transactions = get_all_transactions(&connection)?;
            Ok((StatusCode::OK, Json(transactions)).into_response())
        }
    }
}
