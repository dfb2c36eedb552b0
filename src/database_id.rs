//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// Alias for IDs that refer to transactions.
pub type TransactionId = DatabaseId;
