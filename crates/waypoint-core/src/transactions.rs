//! Transaction entry, listing, and per-category analytics

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{today, NewTransaction, OwnerId, Transaction, TransactionType};
use crate::store::{TransactionQuery, TransactionStore};

/// Default page size for transaction listings
pub const DEFAULT_LIST_LIMIT: usize = 50;
/// Largest page a caller may request
pub const MAX_LIST_LIMIT: usize = 1000;

/// Check a transaction before it is written
pub fn validate_transaction(tx: &NewTransaction) -> Result<()> {
    if !tx.amount.is_finite() || tx.amount <= 0.0 {
        return Err(Error::validation("amount must be a positive number"));
    }
    if tx.category.trim().is_empty() {
        return Err(Error::validation("category is required"));
    }
    if tx.is_locked && tx.transaction_type != TransactionType::Expense {
        return Err(Error::validation("Only expenses can be locked."));
    }
    Ok(())
}

pub fn add_transaction<S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    tx: &NewTransaction,
) -> Result<Transaction> {
    validate_transaction(tx)?;
    let created = store.insert_transaction(owner, tx)?;
    debug!(owner, id = created.id, kind = %created.transaction_type, "Added transaction");
    Ok(created)
}

/// Newest transactions first, `limit` clamped to `1..=MAX_LIST_LIMIT`
pub fn list_transactions<S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    limit: Option<usize>,
) -> Result<Vec<Transaction>> {
    let limit = limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    store.find_transactions(owner, &TransactionQuery::new().newest_first().limit(limit))
}

pub fn delete_transaction<S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    id: i64,
) -> Result<()> {
    if !store.delete_transaction(owner, id)? {
        return Err(Error::not_found("transaction", id));
    }
    info!(owner, id, "Deleted transaction");
    Ok(())
}

/// First and last day of the month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Current-month expenses grouped by category, largest total first
pub fn monthly_breakdown_at<S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    today: NaiveDate,
) -> Result<Vec<CategoryTotal>> {
    let (start, end) = month_bounds(today);
    let query = TransactionQuery::new()
        .transaction_type(TransactionType::Expense)
        .since(start)
        .until(end);

    let mut by_category: HashMap<String, (f64, usize)> = HashMap::new();
    for tx in store.find_transactions(owner, &query)? {
        let entry = by_category.entry(tx.category).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    Ok(totals)
}

pub fn monthly_breakdown<S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
) -> Result<Vec<CategoryTotal>> {
    monthly_breakdown_at(store, owner, today())
}
