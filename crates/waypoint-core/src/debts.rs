//! Debt management
//!
//! Status changes are manual overrides, not payment events: marking a debt paid
//! off zeroes its balance, and reactivating it restores the original principal.

use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Debt, DebtStatus, NewDebt, OwnerId};
use crate::store::DebtStore;

fn non_negative(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(format!("{} must be zero or more", field)));
    }
    Ok(())
}

pub fn validate_debt(debt: &NewDebt) -> Result<()> {
    if debt.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    if !debt.total_amount.is_finite() || debt.total_amount <= 0.0 {
        return Err(Error::validation("totalAmount must be a positive number"));
    }
    if let Some(current) = debt.current_amount {
        non_negative(current, "currentAmount")?;
    }
    non_negative(debt.interest_rate, "interestRate")?;
    non_negative(debt.minimum_payment, "minimumPayment")?;
    if let Some(day) = debt.due_date {
        if !(1..=31).contains(&day) {
            return Err(Error::validation("dueDate must be a day of the month (1-31)"));
        }
    }
    Ok(())
}

pub fn add_debt<S: DebtStore + ?Sized>(store: &S, owner: OwnerId, debt: &NewDebt) -> Result<Debt> {
    validate_debt(debt)?;
    let created = store.insert_debt(owner, debt)?;
    info!(owner, id = created.id, "Added debt");
    Ok(created)
}

pub fn list_debts<S: DebtStore + ?Sized>(store: &S, owner: OwnerId) -> Result<Vec<Debt>> {
    store.find_debts(owner, None)
}

/// Flip a debt between active and paid off
pub fn toggle_debt_status<S: DebtStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    id: i64,
) -> Result<Debt> {
    let mut debt = store
        .get_debt(owner, id)?
        .ok_or_else(|| Error::not_found("debt", id))?;

    match debt.status {
        DebtStatus::Active => {
            debt.status = DebtStatus::PaidOff;
            debt.current_amount = 0.0;
        }
        DebtStatus::PaidOff => {
            debt.status = DebtStatus::Active;
            debt.current_amount = debt.total_amount;
        }
    }

    if !store.update_debt(owner, &debt)? {
        return Err(Error::not_found("debt", id));
    }
    info!(owner, id, status = debt.status.as_str(), "Debt status changed");
    Ok(debt)
}

pub fn delete_debt<S: DebtStore + ?Sized>(store: &S, owner: OwnerId, id: i64) -> Result<()> {
    if !store.delete_debt(owner, id)? {
        return Err(Error::not_found("debt", id));
    }
    Ok(())
}
