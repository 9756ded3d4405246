//! Debt payoff planning
//!
//! Orders active debts avalanche-style (highest rate first) with a snowball
//! tiebreak (smallest balance first among equal rates), then projects a payoff
//! timeline for each debt.
//!
//! The extra monthly payment is added to every debt's minimum independently.
//! Payment capacity freed by clearing one debt is not rolled into the next, so
//! the timelines are per-debt what-ifs rather than a cascading schedule.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::finance_math::{debt_payoff_months, PayoffMonths};
use crate::models::{Debt, DebtStatus, OwnerId};
use crate::store::DebtStore;

/// Debts above this APR are flagged critical
pub const CRITICAL_RATE_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Critical,
    Manageable,
}

impl PriorityLevel {
    pub fn for_rate(interest_rate: f64) -> Self {
        if interest_rate > CRITICAL_RATE_THRESHOLD {
            Self::Critical
        } else {
            Self::Manageable
        }
    }
}

/// One line of the payoff plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPlanEntry {
    pub debt_id: i64,
    pub debt_name: String,
    pub remaining: f64,
    pub interest: f64,
    pub months_to_free: PayoffMonths,
    pub priority_level: PriorityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtStrategyReport {
    pub total_debt: f64,
    pub extra_monthly_payment: f64,
    pub strategy_report: Vec<DebtPlanEntry>,
}

/// Order debts and project each one's payoff
pub fn plan_debts(debts: &[Debt], extra_monthly_payment: f64) -> DebtStrategyReport {
    let mut ordered: Vec<&Debt> = debts.iter().collect();
    ordered.sort_by(|a, b| {
        b.interest_rate
            .total_cmp(&a.interest_rate)
            .then(a.current_amount.total_cmp(&b.current_amount))
    });

    let total_debt = debts.iter().map(|d| d.current_amount).sum();

    let strategy_report = ordered
        .into_iter()
        .map(|debt| DebtPlanEntry {
            debt_id: debt.id,
            debt_name: debt.name.clone(),
            remaining: debt.current_amount,
            interest: debt.interest_rate,
            months_to_free: debt_payoff_months(
                debt.current_amount,
                debt.interest_rate,
                debt.minimum_payment + extra_monthly_payment,
            ),
            priority_level: PriorityLevel::for_rate(debt.interest_rate),
        })
        .collect();

    DebtStrategyReport {
        total_debt,
        extra_monthly_payment,
        strategy_report,
    }
}

/// Build the payoff plan for an owner's active debts
///
/// `extra` is an optional what-if monthly payment on top of each minimum; it
/// must be a non-negative finite number.
pub fn debt_strategy<S: DebtStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    extra: Option<f64>,
) -> Result<DebtStrategyReport> {
    let extra = extra.unwrap_or(0.0);
    if !extra.is_finite() || extra < 0.0 {
        return Err(Error::validation(
            "extra payment must be a non-negative number",
        ));
    }

    let debts = store.find_debts(owner, Some(DebtStatus::Active))?;
    debug!(owner, debts = debts.len(), extra, "Planning debt payoff");

    Ok(plan_debts(&debts, extra))
}
