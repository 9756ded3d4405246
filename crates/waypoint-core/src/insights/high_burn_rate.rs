//! High burn rate rule
//!
//! Fires when the month's total spend exceeds 80% of the month's income.
//! Months without positive income are skipped.

use super::engine::InsightRule;
use super::types::{Insight, InsightKind, MonthSnapshot, Severity};

/// Share of income above which spending is flagged
pub const BURN_RATE_THRESHOLD: f64 = 0.8;

pub struct HighBurnRateRule;

impl HighBurnRateRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighBurnRateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for HighBurnRateRule {
    fn id(&self) -> InsightKind {
        InsightKind::HighBurnRate
    }

    fn name(&self) -> &'static str {
        "High Burn Rate"
    }

    fn evaluate(&self, month: &MonthSnapshot) -> Option<Insight> {
        if month.income <= 0.0 {
            return None;
        }
        if month.total_spent() <= month.income * BURN_RATE_THRESHOLD {
            return None;
        }

        Some(Insight::new(
            self.id(),
            Severity::Warning,
            "High Burn Rate: You have spent over 80% of your income this month.",
            "Check your \"Wants\" category.",
        ))
    }
}
