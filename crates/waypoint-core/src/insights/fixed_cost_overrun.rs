//! Fixed-cost overrun rule
//!
//! Fires when locked expenses exceed the ideal "needs" share of the month's
//! income from the 50/30/20 budget split.

use crate::finance_math::budget_split;

use super::engine::InsightRule;
use super::types::{Insight, InsightKind, MonthSnapshot, Severity};

pub struct FixedCostOverrunRule;

impl FixedCostOverrunRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FixedCostOverrunRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for FixedCostOverrunRule {
    fn id(&self) -> InsightKind {
        InsightKind::FixedCostOverrun
    }

    fn name(&self) -> &'static str {
        "Fixed-Cost Overrun"
    }

    fn evaluate(&self, month: &MonthSnapshot) -> Option<Insight> {
        let ideal_needs = budget_split(month.income).needs;
        if month.fixed_expenses <= ideal_needs {
            return None;
        }

        Some(Insight::new(
            self.id(),
            Severity::Warning,
            format!(
                "Fixed costs of {:.2} exceed the ideal 50% needs budget of {:.2}.",
                month.fixed_expenses, ideal_needs
            ),
            "Review rent, subscriptions, and other locked expenses.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_fixed_exceeds_needs() {
        let month = MonthSnapshot {
            income: 4_000.0,
            fixed_expenses: 2_500.0,
            variable_expenses: 0.0,
        };
        let insight = FixedCostOverrunRule::new().evaluate(&month).unwrap();
        assert_eq!(insight.kind, InsightKind::FixedCostOverrun);
        assert!(insight.message.contains("2500.00"));
    }

    #[test]
    fn test_quiet_at_or_below_needs() {
        let month = MonthSnapshot {
            income: 4_000.0,
            fixed_expenses: 2_000.0,
            variable_expenses: 1_900.0,
        };
        assert!(FixedCostOverrunRule::new().evaluate(&month).is_none());
    }

    #[test]
    fn test_fixed_costs_without_income_fire() {
        let month = MonthSnapshot {
            income: 0.0,
            fixed_expenses: 100.0,
            variable_expenses: 0.0,
        };
        assert!(FixedCostOverrunRule::new().evaluate(&month).is_some());
    }
}
