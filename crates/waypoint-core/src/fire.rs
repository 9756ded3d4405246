//! FIRE (financial independence) progress
//!
//! Average monthly spend comes from a fixed three-month trailing window of
//! expenses regardless of how old the account is. Progress is measured against
//! the money saved toward goals rather than full net worth.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::finance_math::{fire_number, round_to};
use crate::models::{today, Goal, OwnerId, TransactionType};
use crate::store::{GoalStore, TransactionQuery, TransactionStore};

/// Length of the trailing expense window
pub const TRAILING_MONTHS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireMetrics {
    /// Trailing expenses divided by the window length, rounded to a whole unit
    pub average_monthly_expense: f64,
    pub annual_expense: f64,
    pub fire_target: f64,
    /// Sum of every goal's saved amount
    pub current_net_worth: f64,
    /// Percent of target reached, two decimals; 0 when there is no target
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireReport {
    pub metrics: FireMetrics,
    pub goals: Vec<Goal>,
}

/// Start of the trailing window ending on `today` (inclusive)
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(TRAILING_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}

/// Compute FIRE metrics from the trailing expense total and the goal list
pub fn fire_metrics(trailing_expenses: f64, goals: &[Goal]) -> FireMetrics {
    let average_monthly_expense = (trailing_expenses / TRAILING_MONTHS as f64).round();
    let annual_expense = average_monthly_expense * 12.0;
    let fire_target = fire_number(annual_expense);
    let current_net_worth: f64 = goals.iter().map(|g| g.saved_amount).sum();

    let progress = if fire_target > 0.0 {
        round_to(current_net_worth / fire_target * 100.0, 2)
    } else {
        0.0
    };

    FireMetrics {
        average_monthly_expense,
        annual_expense,
        fire_target,
        current_net_worth,
        progress,
    }
}

pub fn fire_status_at<S: TransactionStore + GoalStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    today: NaiveDate,
) -> Result<FireReport> {
    let query = TransactionQuery::new()
        .transaction_type(TransactionType::Expense)
        .since(window_start(today))
        .until(today);
    let expenses = store.find_transactions(owner, &query)?;
    let trailing: f64 = expenses.iter().map(|t| t.amount).sum();

    let goals = store.find_goals(owner)?;
    debug!(
        owner,
        expenses = expenses.len(),
        goals = goals.len(),
        "Computing FIRE status"
    );

    Ok(FireReport {
        metrics: fire_metrics(trailing, &goals),
        goals,
    })
}

pub fn fire_status<S: TransactionStore + GoalStore + ?Sized>(
    store: &S,
    owner: OwnerId,
) -> Result<FireReport> {
    fire_status_at(store, owner, today())
}
