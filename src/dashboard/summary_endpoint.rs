//! Route handlers for the dashboard summary and the daily breakdown of a
//! single month.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, config::BudgetConfig, db::ConnectionCache, transaction::get_all_transactions,
};

use super::{
    aggregation::{
        BudgetComparison, CategoryTotal, MonthlyTotal, budget_comparison, category_totals,
        daily_totals, month_from_label, monthly_totals, round_to_cents,
    },
    insight::{SpendingLevel, classify_spending, total_spend},
};

/// The state needed by the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The cached database connection.
    pub db: Arc<ConnectionCache>,
    /// The budget and insight thresholds.
    pub budget_config: BudgetConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            budget_config: state.budget_config,
        }
    }
}

/// The spending insight for the current transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// The classified spending level.
    pub level: SpendingLevel,
    /// The fixed message for the level.
    pub message: String,
}

/// Everything the dashboard needs in one response, recomputed from the full
/// transaction list on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Absolute spend per month name, in calendar order.
    pub monthly: Vec<MonthlyTotal>,
    /// Absolute spend per category, in first-occurrence order.
    pub categories: Vec<CategoryTotal>,
    /// Monthly actuals next to the configured budget.
    pub budget: Vec<BudgetComparison>,
    /// The total absolute spend over all transactions.
    pub total_spend: f64,
    /// The spending insight derived from the total.
    pub insight: Insight,
}

/// A route handler that serves the aggregated dashboard summary.
pub async fn get_dashboard_endpoint(
    State(state): State<DashboardState>,
) -> Result<Response, Error> {
    let handle = state.db.acquire()?;
    let connection = handle.lock().map_err(|_| Error::DatabaseLockError)?;
    let transactions = get_all_transactions(&connection)?;
    drop(connection);

    let total = round_to_cents(total_spend(&transactions));
    let level = classify_spending(total, &state.budget_config);

    let summary = DashboardSummary {
        monthly: monthly_totals(&transactions),
        categories: category_totals(&transactions),
        budget: budget_comparison(&transactions, state.budget_config.monthly_budget),
        total_spend: total,
        insight: Insight {
            level,
            message: level.message().to_owned(),
        },
    };

    Ok((StatusCode::OK, Json(summary)).into_response())
}

/// The query parameters for the daily breakdown endpoint.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// The three-letter month name to break down, e.g. "Jan".
    pub month: String,
}

/// A route handler that serves per-day totals for a single month label.
pub async fn get_daily_totals_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month =
        month_from_label(&query.month).ok_or_else(|| Error::InvalidMonthLabel(query.month.clone()))?;

    let handle = state.db.acquire()?;
    let connection = handle.lock().map_err(|_| Error::DatabaseLockError)?;
    let transactions = get_all_transactions(&connection)?;
    drop(connection);

    Ok((StatusCode::OK, Json(daily_totals(&transactions, month))).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        AppState, BudgetConfig, build_router,
        dashboard::{DailyTotal, SpendingLevel},
        db::ConnectionCache,
        endpoints,
    };

    use super::DashboardSummary;

    fn test_server_with_config(budget_config: BudgetConfig) -> TestServer {
        let state = AppState::new(ConnectionCache::in_memory(), budget_config);
        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    fn test_server() -> TestServer {
        test_server_with_config(BudgetConfig::default())
    }

    async fn add_transaction(server: &TestServer, amount: f64, date: &str, category: &str) {
        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "amount": amount,
                "description": "Test",
                "date": date,
                "category": category
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn summary_aggregates_transactions() {
        let server = test_server();
        add_transaction(&server, -500.0, "2024-01-05", "Food").await;
        add_transaction(&server, -300.0, "2025-01-20", "Rent").await;
        add_transaction(&server, -200.0, "2024-02-14", "Food").await;

        let response = server.get(endpoints::DASHBOARD_API).await;
        response.assert_status_ok();

        let summary = response.json::<DashboardSummary>();

        assert_eq!(summary.total_spend, 1000.0);
        assert_eq!(summary.monthly.len(), 2);
        assert_eq!(summary.monthly[0].month, "Jan");
        assert_eq!(summary.monthly[0].total, 800.0);
        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.budget.len(), 2);
        assert_eq!(summary.budget[0].budget, 10_000.0);
        assert_eq!(summary.insight.level, SpendingLevel::Normal);
    }

    #[tokio::test]
    async fn summary_of_empty_store_is_empty_and_normal() {
        let server = test_server();

        let response = server.get(endpoints::DASHBOARD_API).await;
        response.assert_status_ok();

        let summary = response.json::<DashboardSummary>();

        assert_eq!(summary.monthly, vec![]);
        assert_eq!(summary.categories, vec![]);
        assert_eq!(summary.budget, vec![]);
        assert_eq!(summary.total_spend, 0.0);
        assert_eq!(summary.insight.level, SpendingLevel::Normal);
    }

    #[tokio::test]
    async fn summary_insight_reflects_thresholds() {
        let server = test_server_with_config(BudgetConfig {
            monthly_budget: 100.0,
            notice_threshold: 200.0,
            alert_threshold: 500.0,
        });
        add_transaction(&server, -250.0, "2024-01-05", "Food").await;

        let response = server.get(endpoints::DASHBOARD_API).await;
        let summary = response.json::<DashboardSummary>();

        assert_eq!(summary.insight.level, SpendingLevel::Notice);
        assert_eq!(
            summary.insight.message,
            SpendingLevel::Notice.message()
        );
    }

    #[tokio::test]
    async fn daily_breakdown_filters_by_month_label() {
        let server = test_server();
        add_transaction(&server, -100.0, "2024-01-15", "Food").await;
        add_transaction(&server, -50.0, "2025-01-15", "Food").await;
        add_transaction(&server, -75.0, "2024-02-01", "Food").await;

        let response = server
            .get(endpoints::DASHBOARD_DAILY_API)
            .add_query_param("month", "Jan")
            .await;
        response.assert_status_ok();

        let totals = response.json::<Vec<DailyTotal>>();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].day, "Jan 15");
        assert_eq!(totals[0].total, 150.0);
    }

    #[tokio::test]
    async fn daily_breakdown_rejects_unknown_month_label() {
        let server = test_server();

        let response = server
            .get(endpoints::DASHBOARD_DAILY_API)
            .add_query_param("month", "Janvier")
            .await;

        response.assert_status_bad_request();
    }
}
