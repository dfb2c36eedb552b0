//! Configuration for the budget comparison and spending insight.

/// The fixed budget and insight thresholds used by the dashboard.
///
/// A single budget applies uniformly to every month, there is no per-category
/// budgeting. `notice_threshold` must be below `alert_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetConfig {
    /// The budget that each month's actual spend is compared against.
    pub monthly_budget: f64,
    /// Total spend at or above this amount produces the "notice" insight.
    pub notice_threshold: f64,
    /// Total spend at or above this amount produces the "alert" insight.
    pub alert_threshold: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            monthly_budget: 10_000.0,
            notice_threshold: 20_000.0,
            alert_threshold: 50_000.0,
        }
    }
}
