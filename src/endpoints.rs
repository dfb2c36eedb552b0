//! The API endpoint URIs.

/// The route to access transactions.
///
/// `GET` lists all transactions, or fetches a single one with the `id` query
/// parameter. `POST` creates a transaction. `PUT` and `DELETE` update and
/// delete the transaction named by the `id` query parameter.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the dashboard summary.
pub const DASHBOARD_API: &str = "/api/dashboard";
/// The route for daily totals within a single month.
pub const DASHBOARD_DAILY_API: &str = "/api/dashboard/daily";
/// The route for the health check.
pub const HEALTH_API: &str = "/api/health";
