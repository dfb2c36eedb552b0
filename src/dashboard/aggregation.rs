//! Transaction data aggregation and transformation for the dashboard.
//!
//! Provides pure functions that reduce a transaction list into monthly,
//! daily and category buckets, and pair monthly actuals with the configured
//! budget. All functions use the absolute value of the transaction amount,
//! never mutate their input, and recompute from scratch on every call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Month;

use crate::transaction::{Transaction, UNCATEGORIZED};

/// The summed absolute spend for one month bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// The three-letter month name, e.g. "Jan".
    pub month: String,
    /// The summed absolute amount for the month.
    pub total: f64,
}

/// The summed absolute spend for one day within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The day label, e.g. "Jan 5".
    pub day: String,
    /// The summed absolute amount for the day.
    pub total: f64,
}

/// The summed absolute spend for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category name, or the uncategorized sentinel.
    pub category: String,
    /// The summed absolute amount for the category.
    pub total: f64,
}

/// One month's actual spend next to the fixed budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    /// The three-letter month name, e.g. "Jan".
    pub month: String,
    /// The summed absolute amount for the month.
    pub actual: f64,
    /// The configured budget, repeated for every month bucket.
    pub budget: f64,
}

/// Round a monetary value to whole cents.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Parse a three-letter month label back into a [Month].
///
/// The inverse of the labels produced by [monthly_totals]. Returns `None` for
/// anything that is not one of the twelve labels.
pub fn month_from_label(label: &str) -> Option<Month> {
    match label {
        "Jan" => Some(Month::January),
        "Feb" => Some(Month::February),
        "Mar" => Some(Month::March),
        "Apr" => Some(Month::April),
        "May" => Some(Month::May),
        "Jun" => Some(Month::June),
        "Jul" => Some(Month::July),
        "Aug" => Some(Month::August),
        "Sep" => Some(Month::September),
        "Oct" => Some(Month::October),
        "Nov" => Some(Month::November),
        "Dec" => Some(Month::December),
        _ => None,
    }
}

/// Aggregate absolute transaction amounts into one bucket per month name.
///
/// The year is deliberately not part of the bucket key: transactions dated in
/// the same calendar month of different years merge into one bucket. Callers
/// that need year-disambiguated buckets must pre-filter the input. Buckets
/// are returned in calendar order, Jan through Dec.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut totals: HashMap<u8, f64> = HashMap::new();

    for transaction in transactions {
        *totals
            .entry(transaction.date.month() as u8)
            .or_insert(0.0) += transaction.amount.abs();
    }

    let mut months: Vec<u8> = totals.keys().copied().collect();
    months.sort_unstable();

    months
        .into_iter()
        .map(|month| MonthlyTotal {
            month: month_label(Month::try_from(month).unwrap()).to_owned(),
            total: round_to_cents(totals[&month]),
        })
        .collect()
}

/// Aggregate absolute amounts per day for transactions within `month`.
///
/// The same year-erasure policy as [monthly_totals] applies: the fifth of
/// January is one bucket no matter the year. Buckets are returned in order of
/// day of month.
pub fn daily_totals(transactions: &[Transaction], month: Month) -> Vec<DailyTotal> {
    let mut totals: HashMap<u8, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.date.month() == month)
    {
        *totals.entry(transaction.date.day()).or_insert(0.0) += transaction.amount.abs();
    }

    let mut days: Vec<u8> = totals.keys().copied().collect();
    days.sort_unstable();

    days.into_iter()
        .map(|day| DailyTotal {
            day: format!("{} {}", month_label(month), day),
            total: round_to_cents(totals[&day]),
        })
        .collect()
}

/// Aggregate absolute amounts into one bucket per category.
///
/// A blank category falls back to the [UNCATEGORIZED] sentinel. Buckets are
/// returned in order of first occurrence in the input.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for transaction in transactions {
        let category = if transaction.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            transaction.category.as_str()
        };

        if !totals.contains_key(category) {
            order.push(category.to_owned());
        }

        *totals.entry(category.to_owned()).or_insert(0.0) += transaction.amount.abs();
    }

    order
        .into_iter()
        .map(|category| {
            let total = round_to_cents(totals[&category]);
            CategoryTotal { category, total }
        })
        .collect()
}

/// Pair each month's actual spend with the fixed per-month `budget`.
///
/// The budget is a configuration constant, not derived from the data, and is
/// repeated for every month bucket present in the input.
pub fn budget_comparison(transactions: &[Transaction], budget: f64) -> Vec<BudgetComparison> {
    monthly_totals(transactions)
        .into_iter()
        .map(|bucket| BudgetComparison {
            month: bucket.month,
            actual: bucket.total,
            budget,
        })
        .collect()
}
