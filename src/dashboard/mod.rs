//! The dashboard: aggregation of transactions into chart-ready buckets and
//! the endpoints that serve them.

mod aggregation;
mod insight;
mod summary_endpoint;

pub use aggregation::{
    BudgetComparison, CategoryTotal, DailyTotal, MonthlyTotal, budget_comparison,
    category_totals, daily_totals, month_from_label, monthly_totals, round_to_cents,
};
pub use insight::{SpendingLevel, classify_spending, total_spend};
pub use summary_endpoint::{get_daily_totals_endpoint, get_dashboard_endpoint};
