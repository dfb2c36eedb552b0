//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used for a transaction description.
    ///
    /// Descriptions identify what a transaction was for, so blank values are
    /// rejected before they reach the database.
    #[error("transaction description cannot be empty")]
    EmptyDescription,

    /// The request body could not be parsed as the expected JSON shape.
    #[error("could not parse request body: {0}")]
    InvalidRequestBody(String),

    /// An endpoint that operates on a single transaction was called without
    /// an `id` query parameter.
    #[error("missing id in query")]
    MissingId,

    /// A month label did not match any of the twelve three-letter month names.
    #[error("\"{0}\" is not a recognised month")]
    InvalidMonthLabel(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// The SQLite database could not be opened.
    #[error("could not open the database at {path}: {reason}")]
    Unavailable {
        /// The file path of the database that could not be opened.
        path: String,
        /// The error reported by the SQLite driver.
        reason: String,
    },

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Error::EmptyDescription
            | Error::InvalidRequestBody(_)
            | Error::MissingId
            | Error::InvalidMonthLabel(_) => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction => StatusCode::NOT_FOUND,
            // Internal errors are logged but the details are not intended
            // to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "an internal error occurred" })),
                )
                    .into_response();
            }
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
