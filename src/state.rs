//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{config::BudgetConfig, db::ConnectionCache};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The cached database connection.
    pub db: Arc<ConnectionCache>,

    /// The budget and insight thresholds used by the dashboard.
    pub budget_config: BudgetConfig,
}

impl AppState {
    /// Create a new [AppState] from a SQLite connection cache.
    ///
    /// The database itself is opened lazily, on the first request that needs
    /// it.
    pub fn new(db: ConnectionCache, budget_config: BudgetConfig) -> Self {
        Self {
            db: Arc::new(db),
            budget_config,
        }
    }
}
