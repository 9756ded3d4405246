//! Consumption items ("survival" list)
//!
//! Purchases that last several months are amortized into a monthly cost. The
//! derived cost is computed here, before every write, never by the store.

use tracing::info;

use crate::error::{Error, Result};
use crate::models::{ConsumptionItem, ConsumptionItemInput, NewConsumptionItem, OwnerId};
use crate::store::ConsumptionStore;

/// Cost per month of an item lasting `months` months
pub fn monthly_cost(cost: f64, months: u32) -> f64 {
    cost / months.max(1) as f64
}

impl NewConsumptionItem {
    /// Validate input and derive the monthly cost
    pub fn from_input(input: &ConsumptionItemInput) -> Result<Self> {
        if input.name.trim().is_empty() {
            return Err(Error::validation("name is required"));
        }
        if !input.cost.is_finite() || input.cost < 0.0 {
            return Err(Error::validation("cost must be zero or more"));
        }
        if input.months < 1 {
            return Err(Error::validation("months must be at least 1"));
        }

        Ok(Self {
            name: input.name.clone(),
            cost: input.cost,
            months: input.months,
            monthly_cost: monthly_cost(input.cost, input.months),
        })
    }
}

pub fn add_item<S: ConsumptionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    input: &ConsumptionItemInput,
) -> Result<ConsumptionItem> {
    let item = NewConsumptionItem::from_input(input)?;
    let created = store.insert_item(owner, &item)?;
    info!(owner, id = created.id, "Added consumption item");
    Ok(created)
}

pub fn list_items<S: ConsumptionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
) -> Result<Vec<ConsumptionItem>> {
    store.find_items(owner)
}

/// Replace an item's fields, recomputing its monthly cost
pub fn update_item<S: ConsumptionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    id: i64,
    input: &ConsumptionItemInput,
) -> Result<ConsumptionItem> {
    let item = NewConsumptionItem::from_input(input)?;
    store
        .update_item(owner, id, &item)?
        .ok_or_else(|| Error::not_found("consumption item", id))
}

pub fn delete_item<S: ConsumptionStore + ?Sized>(store: &S, owner: OwnerId, id: i64) -> Result<()> {
    if !store.delete_item(owner, id)? {
        return Err(Error::not_found("consumption item", id));
    }
    Ok(())
}
