//! A route handler for deleting a transaction.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::Error;

use super::{
    core::{TransactionState, delete_transaction},
    get_endpoint::IdQuery,
};

/// A route handler for deleting the transaction named by the `id` query
/// parameter, responds with a confirmation message.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, Error> {
    let id = query.id.ok_or(Error::MissingId)?;

    let handle = state.connection()?;
    let connection = handle.lock().map_err(|_| Error::DatabaseLockError)?;

    match delete_transaction(id, &connection)? {
        0 => Err(Error::DeleteMissingTransaction),
        _ => Ok((
            StatusCode::OK,
            Json(json!({ "message": "Transaction deleted" })),
        )
            .into_response()),
    }
}
