//! Recurring bill templates
//!
//! A bill is not a transaction. Paying bills materializes the selected
//! templates into locked monthly expenses dated on the day of payment.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{
    today, Bill, NewBill, NewTransaction, OwnerId, Recurrence, TransactionType,
};
use crate::store::{BillStore, TransactionStore};

pub const DEFAULT_BILL_CATEGORY: &str = "Bills";

pub fn add_bill<S: BillStore + ?Sized>(store: &S, owner: OwnerId, bill: &NewBill) -> Result<Bill> {
    if bill.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    if !bill.amount.is_finite() || bill.amount <= 0.0 {
        return Err(Error::validation("amount must be a positive number"));
    }
    if !(1..=31).contains(&bill.due_day) {
        return Err(Error::validation("dueDay must be a day of the month (1-31)"));
    }

    let bill = NewBill {
        category: Some(
            bill.category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_BILL_CATEGORY)
                .to_string(),
        ),
        ..bill.clone()
    };
    let created = store.insert_bill(owner, &bill)?;
    info!(owner, id = created.id, "Added bill");
    Ok(created)
}

/// Bills ordered by due day
pub fn list_bills<S: BillStore + ?Sized>(store: &S, owner: OwnerId) -> Result<Vec<Bill>> {
    store.find_bills(owner)
}

pub fn delete_bill<S: BillStore + ?Sized>(store: &S, owner: OwnerId, id: i64) -> Result<()> {
    if !store.delete_bill(owner, id)? {
        return Err(Error::not_found("bill", id));
    }
    Ok(())
}

/// The expense a bill turns into when paid on `date`
pub fn bill_expense(bill: &Bill, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        transaction_type: TransactionType::Expense,
        category: bill.category.clone(),
        amount: bill.amount,
        description: bill.name.clone(),
        is_recurring: true,
        is_locked: true,
        recurrence: Recurrence::Monthly,
        date,
    }
}

/// Turn the selected bills into expenses dated `today`
///
/// Every id must name one of the owner's bills; otherwise nothing is written.
pub fn materialize_bills_at<S: BillStore + TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    bill_ids: &[i64],
    today: NaiveDate,
) -> Result<usize> {
    if bill_ids.is_empty() {
        return Err(Error::validation("billIds must not be empty"));
    }

    let bills = store.find_bills(owner)?;
    let expenses = bill_ids
        .iter()
        .map(|id| {
            bills
                .iter()
                .find(|b| b.id == *id)
                .map(|bill| bill_expense(bill, today))
                .ok_or_else(|| Error::not_found("bill", *id))
        })
        .collect::<Result<Vec<_>>>()?;

    let created = store.insert_transactions(owner, &expenses)?;
    info!(owner, created, "Materialized bills");
    Ok(created)
}

pub fn materialize_bills<S: BillStore + TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    bill_ids: &[i64],
) -> Result<usize> {
    materialize_bills_at(store, owner, bill_ids, today())
}
