//! Net worth snapshot
//!
//! Paid-off debts carry a zero balance, so summing every debt's current amount
//! needs no status filter.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{Asset, Debt, OwnerId};
use crate::store::{AssetStore, DebtStore};

/// Raw records behind the totals, for client-side drill-down
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetWorthBreakdown {
    pub assets: Vec<Asset>,
    pub debts: Vec<Debt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthReport {
    pub total_assets: f64,
    pub total_debt: f64,
    pub net_worth: f64,
    pub liquid_assets: f64,
    pub breakdown: NetWorthBreakdown,
}

/// Combine assets and debts (any status) into a snapshot
pub fn summarize(assets: Vec<Asset>, debts: Vec<Debt>) -> NetWorthReport {
    let total_assets: f64 = assets.iter().map(|a| a.value).sum();
    let total_debt: f64 = debts.iter().map(|d| d.current_amount).sum();
    let liquid_assets = assets
        .iter()
        .filter(|a| a.is_liquid)
        .map(|a| a.value)
        .sum();

    NetWorthReport {
        total_assets,
        total_debt,
        net_worth: total_assets - total_debt,
        liquid_assets,
        breakdown: NetWorthBreakdown { assets, debts },
    }
}

pub fn net_worth<S: AssetStore + DebtStore + ?Sized>(
    store: &S,
    owner: OwnerId,
) -> Result<NetWorthReport> {
    let assets = store.find_assets(owner)?;
    let debts = store.find_debts(owner, None)?;
    debug!(
        owner,
        assets = assets.len(),
        debts = debts.len(),
        "Computing net worth"
    );

    Ok(summarize(assets, debts))
}
