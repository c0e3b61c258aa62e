//! Aggregate figures shown on the dashboard and report views

use crate::models::{Goal, Transaction};

/// Multiplier applied to the savings/expenses ratio
pub const HEALTH_SCORE_FACTOR: f64 = 10.0;

/// Upper bound of the health score
pub const HEALTH_SCORE_MAX: i64 = 100;

/// Round to `decimals` places, ties to even on the exact binary value
///
/// Goes through the formatter, which rounds the value actually stored rather
/// than a scaled copy, so `1.115` (stored just below the tie) gives `1.11`
/// and the exact tie `500.125` gives `500.12`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value)
        .parse()
        .unwrap_or(value)
}

/// Sum of all goal targets
pub fn total_target(goals: &[Goal]) -> f64 {
    goals.iter().map(|g| g.target).sum()
}

/// Sum of all goal balances (total savings)
pub fn total_current(goals: &[Goal]) -> f64 {
    goals.iter().map(|g| g.current).sum()
}

/// Sum of all transaction amounts
pub fn total_expenses(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

/// `current / target * 100` rounded to one decimal; None when target is 0
pub fn completion_percentage(current: f64, target: f64) -> Option<f64> {
    if target == 0.0 {
        return None;
    }
    let pct = current / target * 100.0;
    pct.is_finite().then(|| round_to(pct, 1))
}

/// Share of `part` in `total` as a percentage; 0 when total is 0
pub fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

/// Financial health score: `min(100, trunc(savings / expenses * 10))`
///
/// `total_expenses` is `None` when no transactions exist, in which case it
/// counts as 1. With transactions summing to exactly 0, any positive savings
/// score the maximum and zero savings score 0.
pub fn health_score(total_savings: f64, total_expenses: Option<f64>) -> i64 {
    let expenses = total_expenses.unwrap_or(1.0);
    let raw = total_savings / expenses * HEALTH_SCORE_FACTOR;

    if raw.is_nan() {
        return 0;
    }
    if raw >= HEALTH_SCORE_MAX as f64 {
        return HEALTH_SCORE_MAX;
    }
    // Saturating float-to-int cast, truncates toward zero
    raw.trunc() as i64
}

/// [`health_score`] computed from stored records
pub fn health_score_for(goals: &[Goal], transactions: &[Transaction]) -> i64 {
    let expenses = (!transactions.is_empty()).then(|| total_expenses(transactions));
    health_score(total_current(goals), expenses)
}
