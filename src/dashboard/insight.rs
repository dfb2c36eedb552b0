//! Classifies total spend into one of three coarse insight levels.

use serde::{Deserialize, Serialize};

use crate::{config::BudgetConfig, transaction::Transaction};

/// How a total spend compares against the configured insight thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingLevel {
    /// Spending is below the notice threshold.
    Normal,
    /// Spending is at or above the notice threshold but below the alert
    /// threshold.
    Notice,
    /// Spending is at or above the alert threshold.
    Alert,
}

impl SpendingLevel {
    /// The fixed insight message shown for this level.
    pub fn message(self) -> &'static str {
        match self {
            SpendingLevel::Normal => "Keep it up! Your spending seems under control.",
            SpendingLevel::Notice => {
                "Notice: You are getting close to your budget. Monitor your spending."
            }
            SpendingLevel::Alert => {
                "Alert: Your spending is high this month. Consider reviewing your expenses."
            }
        }
    }
}

/// The total absolute spend over all transactions, with no time windowing.
pub fn total_spend(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount.abs())
        .sum()
}

/// Classify `total_spend` against the thresholds in `config`.
///
/// Both thresholds are inclusive: a total exactly on a threshold takes the
/// higher level. Total and deterministic, there are no error cases.
pub fn classify_spending(total_spend: f64, config: &BudgetConfig) -> SpendingLevel {
    if total_spend >= config.alert_threshold {
        SpendingLevel::Alert
    } else if total_spend >= config.notice_threshold {
        SpendingLevel::Notice
    } else {
        SpendingLevel::Normal
    }
}
