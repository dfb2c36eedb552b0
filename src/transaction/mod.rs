//! Transaction management for the finance dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - The JSON CRUD endpoints for the transaction collection

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod update_endpoint;

pub use core::{
    Transaction, TransactionBuilder, UNCATEGORIZED, create_transaction_table,
    get_all_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use get_endpoint::get_transactions_endpoint;
pub use update_endpoint::update_transaction_endpoint;
