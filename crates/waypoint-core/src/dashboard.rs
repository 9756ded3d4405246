//! Financial health dashboard
//!
//! A single pass over an owner's full transaction history produces:
//! - the lifetime wallet balance (all transactions, any date)
//! - a per-month income/expense history, oldest first
//! - the current month's income with a fixed vs variable expense split
//! - the five most recent transactions
//! - rule-based insights and the 50/30/20 benchmarks for the current month
//!
//! The balance is lifetime-cumulative while the summary income and expenses
//! cover only the current calendar month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::finance_math::budget_split;
use crate::insights::{Insight, InsightEngine, MonthSnapshot};
use crate::models::{today, OwnerId, Transaction, TransactionType};
use crate::store::{TransactionQuery, TransactionStore};

/// Number of transactions in the recent-activity feed
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Current-month income
    pub income: f64,
    /// Current-month locked expenses
    pub fixed_expenses: f64,
    /// Current-month unlocked expenses
    pub variable_expenses: f64,
    /// Lifetime income minus expenses and debt payments
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHistory {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmarks {
    pub ideal_needs: f64,
    pub ideal_wants: f64,
    pub ideal_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub history: Vec<MonthlyHistory>,
    pub recent_transactions: Vec<Transaction>,
    pub insights: Vec<Insight>,
    pub benchmarks: Benchmarks,
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Reduce a transaction history into the dashboard for the month containing `today`
pub fn build_dashboard(
    transactions: &[Transaction],
    today: NaiveDate,
    engine: &InsightEngine,
) -> Dashboard {
    let current = (today.year(), today.month());
    let mut balance = 0.0;
    let mut month = MonthSnapshot::default();
    let mut history: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let entry = history.entry(month_key(tx.date)).or_insert((0.0, 0.0));
        let in_current_month = (tx.date.year(), tx.date.month()) == current;

        match tx.transaction_type {
            TransactionType::Income => {
                balance += tx.amount;
                entry.0 += tx.amount;
                if in_current_month {
                    month.income += tx.amount;
                }
            }
            TransactionType::Expense => {
                balance -= tx.amount;
                entry.1 += tx.amount;
                if in_current_month {
                    if tx.is_locked {
                        month.fixed_expenses += tx.amount;
                    } else {
                        month.variable_expenses += tx.amount;
                    }
                }
            }
            TransactionType::DebtPayment => {
                balance -= tx.amount;
            }
        }
    }

    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
    let recent_transactions = recent
        .into_iter()
        .take(RECENT_TRANSACTIONS)
        .cloned()
        .collect();

    let ideal = budget_split(month.income);

    Dashboard {
        summary: DashboardSummary {
            income: month.income,
            fixed_expenses: month.fixed_expenses,
            variable_expenses: month.variable_expenses,
            balance,
        },
        history: history
            .into_iter()
            .map(|(month, (income, expense))| MonthlyHistory {
                month,
                income,
                expense,
            })
            .collect(),
        recent_transactions,
        insights: engine.analyze_all(&month),
        benchmarks: Benchmarks {
            ideal_needs: ideal.needs,
            ideal_wants: ideal.wants,
            ideal_savings: ideal.savings,
        },
    }
}

/// Dashboard for an owner as of `today`
pub fn dashboard_at<S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    today: NaiveDate,
) -> Result<Dashboard> {
    let transactions = store.find_transactions(owner, &TransactionQuery::new())?;
    debug!(owner, transactions = transactions.len(), "Building dashboard");

    Ok(build_dashboard(&transactions, today, &InsightEngine::new()))
}

/// Dashboard for an owner as of the current date
pub fn dashboard<S: TransactionStore + ?Sized>(store: &S, owner: OwnerId) -> Result<Dashboard> {
    dashboard_at(store, owner, today())
}
