//! Defines the core data model and database queries for transactions.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{AppState, Error, database_id::TransactionId, db::ConnectionCache};

/// The category label assigned when a transaction is created without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Amounts are signed: negative values conventionally denote expenses. The
/// dashboard aggregations use the absolute value uniformly.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: Date, description: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            category: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The category is optional and falls back to [UNCATEGORIZED] when absent or
/// blank. The ID is assigned by the database on insert.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
    /// The category of the transaction, if any.
    pub category: Option<String>,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }
}

/// Replace an absent or blank category with the [UNCATEGORIZED] sentinel.
pub fn normalize_category(category: Option<String>) -> String {
    match category {
        Some(category) if !category.trim().is_empty() => category,
        _ => UNCATEGORIZED.to_owned(),
    }
}

/// The fields of a transaction that may be changed after creation.
///
/// `None` fields are left untouched by [update_transaction].
#[derive(Debug, Default, PartialEq)]
pub struct TransactionChanges {
    /// The new amount, if any.
    pub amount: Option<f64>,
    /// The new date, if any.
    pub date: Option<Date>,
    /// The new description, if any.
    pub description: Option<String>,
    /// The new category, if any.
    pub category: Option<String>,
}

/// The state needed by the transaction CRUD endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The cached database connection for managing transactions.
    pub db: Arc<ConnectionCache>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
        }
    }
}

impl TransactionState {
    /// Get the database connection handle, opening the database if this is
    /// the first use.
    pub fn connection(&self) -> Result<Arc<Mutex<Connection>>, Error> {
        self.db.acquire()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyDescription] if the description is blank,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.description.trim().is_empty() {
        return Err(Error::EmptyDescription);
    }

    let category = normalize_category(builder.category);

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, category)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, date, description, category",
        )?
        .query_row(
            (builder.amount, builder.date, builder.description, category),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, description, category
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions from the database, most recent first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category
             FROM \"transaction\"
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Update a transaction in place, leaving `None` fields unchanged.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyDescription] if a blank description is given,
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid
///   transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    changes: TransactionChanges,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if let Some(description) = &changes.description {
        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }
    }

    let category = changes.category.map(|category| normalize_category(Some(category)));

    let transaction = connection
        .prepare(
            "UPDATE \"transaction\" SET
                amount = COALESCE(?2, amount),
                date = COALESCE(?3, date),
                description = COALESCE(?4, description),
                category = COALESCE(?5, category)
             WHERE id = ?1
             RETURNING id, amount, date, description, category",
        )?
        .query_row(
            params![id, changes.amount, changes.date, changes.description, category],
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
            error => error.into(),
        })?;

    Ok(transaction)
}

/// The number of rows changed by a delete statement.
pub type RowsAffected = usize;

/// Delete the transaction with the given `id`.
///
/// Returns the number of rows deleted, which is zero if `id` does not refer
/// to a transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
    })
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{Error, initialize_db};

    use super::{
        Transaction, TransactionChanges, UNCATEGORIZED, count_transactions, create_transaction,
        delete_transaction, get_all_transactions, get_transaction, normalize_category,
        update_transaction,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        connection
    }

    #[test]
    fn create_assigns_ids_from_one() {
        let connection = get_test_connection();

        let first = create_transaction(
            Transaction::build(-12.5, date!(2024 - 01 - 05), "Lunch"),
            &connection,
        )
        .unwrap();
        let second = create_transaction(
            Transaction::build(-30.0, date!(2024 - 01 - 06), "Taxi"),
            &connection,
        )
        .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_defaults_category_to_sentinel() {
        let connection = get_test_connection();

        let transaction = create_transaction(
            Transaction::build(-12.5, date!(2024 - 01 - 05), "Lunch"),
            &connection,
        )
        .unwrap();

        assert_eq!(transaction.category, UNCATEGORIZED);
    }

    #[test]
    fn create_keeps_explicit_category() {
        let connection = get_test_connection();

        let transaction = create_transaction(
            Transaction::build(-12.5, date!(2024 - 01 - 05), "Lunch")
                .category(Some("Food".to_owned())),
            &connection,
        )
        .unwrap();

        assert_eq!(transaction.category, "Food");
    }

    #[test]
    fn create_rejects_blank_description() {
        let connection = get_test_connection();

        let result = create_transaction(
            Transaction::build(-12.5, date!(2024 - 01 - 05), "   "),
            &connection,
        );

        assert_eq!(result, Err(Error::EmptyDescription));
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }

    #[test]
    fn get_returns_created_transaction() {
        let connection = get_test_connection();

        let created = create_transaction(
            Transaction::build(42.0, date!(2024 - 03 - 01), "Refund"),
            &connection,
        )
        .unwrap();

        let fetched = get_transaction(created.id, &connection).unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn get_unknown_id_returns_not_found() {
        let connection = get_test_connection();

        assert_eq!(get_transaction(999, &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_all_orders_by_date_descending() {
        let connection = get_test_connection();

        create_transaction(
            Transaction::build(-10.0, date!(2024 - 01 - 05), "Oldest"),
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(-20.0, date!(2024 - 03 - 05), "Newest"),
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(-15.0, date!(2024 - 02 - 05), "Middle"),
            &connection,
        )
        .unwrap();

        let transactions = get_all_transactions(&connection).unwrap();
        let descriptions: Vec<&str> = transactions
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();

        assert_eq!(descriptions, vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let connection = get_test_connection();

        let created = create_transaction(
            Transaction::build(-12.5, date!(2024 - 01 - 05), "Lunch")
                .category(Some("Food".to_owned())),
            &connection,
        )
        .unwrap();

        let updated = update_transaction(
            created.id,
            TransactionChanges {
                amount: Some(-15.0),
                ..Default::default()
            },
            &connection,
        )
        .unwrap();

        assert_eq!(updated.amount, -15.0);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.category, created.category);
    }

    #[test]
    fn update_missing_transaction_fails() {
        let connection = get_test_connection();

        let result = update_transaction(
            999,
            TransactionChanges {
                amount: Some(-15.0),
                ..Default::default()
            },
            &connection,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn update_normalizes_blank_category() {
        let connection = get_test_connection();

        let created = create_transaction(
            Transaction::build(-12.5, date!(2024 - 01 - 05), "Lunch")
                .category(Some("Food".to_owned())),
            &connection,
        )
        .unwrap();

        let updated = update_transaction(
            created.id,
            TransactionChanges {
                category: Some("  ".to_owned()),
                ..Default::default()
            },
            &connection,
        )
        .unwrap();

        assert_eq!(updated.category, UNCATEGORIZED);
    }

    #[test]
    fn delete_removes_transaction() {
        let connection = get_test_connection();

        let created = create_transaction(
            Transaction::build(-12.5, date!(2024 - 01 - 05), "Lunch"),
            &connection,
        )
        .unwrap();

        let rows_affected = delete_transaction(created.id, &connection).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_transaction(created.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_affects_no_rows() {
        let connection = get_test_connection();

        assert_eq!(delete_transaction(999, &connection).unwrap(), 0);
    }

    #[test]
    fn normalize_category_falls_back_to_sentinel() {
        assert_eq!(normalize_category(None), UNCATEGORIZED);
        assert_eq!(normalize_category(Some("".to_owned())), UNCATEGORIZED);
        assert_eq!(normalize_category(Some(" \t".to_owned())), UNCATEGORIZED);
        assert_eq!(normalize_category(Some("Rent".to_owned())), "Rent");
    }
}
