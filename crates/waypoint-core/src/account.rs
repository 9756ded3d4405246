//! Account reset
//!
//! Clears an owner's transactions, debts, and assets. Goals, bills, and
//! consumption items are left in place.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::models::OwnerId;
use crate::store::{AssetStore, DebtStore, TransactionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetReport {
    pub transactions: usize,
    pub debts: usize,
    pub assets: usize,
}

pub fn reset_account<S: TransactionStore + DebtStore + AssetStore + ?Sized>(
    store: &S,
    owner: OwnerId,
) -> Result<ResetReport> {
    let report = ResetReport {
        transactions: store.delete_all_transactions(owner)?,
        debts: store.delete_all_debts(owner)?,
        assets: store.delete_all_assets(owner)?,
    };

    info!(
        owner,
        transactions = report.transactions,
        debts = report.debts,
        assets = report.assets,
        "Account reset complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{
        AssetType, ConsumptionItemInput, NewAsset, NewBill, NewDebt, NewGoal, NewTransaction,
        TransactionType,
    };
    use crate::store::{BillStore, ConsumptionStore, GoalStore, TransactionQuery};

    #[test]
    fn test_reset_keeps_goals_bills_and_items() {
        let store = MemoryStore::new();
        store
            .insert_transaction(1, &NewTransaction::new(TransactionType::Income, "Salary", 10.0))
            .unwrap();
        store
            .insert_debt(
                1,
                &NewDebt {
                    name: "Loan".into(),
                    total_amount: 10.0,
                    current_amount: None,
                    interest_rate: 0.0,
                    minimum_payment: 0.0,
                    due_date: None,
                },
            )
            .unwrap();
        store
            .insert_asset(
                1,
                &NewAsset {
                    name: "Cash".into(),
                    asset_type: AssetType::Cash,
                    value: 5.0,
                    is_liquid: true,
                },
            )
            .unwrap();
        store
            .insert_goal(
                1,
                &NewGoal {
                    title: "Trip".into(),
                    target_amount: 100.0,
                    saved_amount: 0.0,
                    deadline: None,
                    priority: Default::default(),
                },
            )
            .unwrap();
        crate::bills::add_bill(
            &store,
            1,
            &NewBill {
                name: "Phone".into(),
                amount: 20.0,
                due_day: 3,
                category: None,
            },
        )
        .unwrap();
        crate::consumption::add_item(
            &store,
            1,
            &ConsumptionItemInput {
                name: "Soap".into(),
                cost: 12.0,
                months: 3,
            },
        )
        .unwrap();
        // Someone else's data survives
        store
            .insert_transaction(2, &NewTransaction::new(TransactionType::Income, "Salary", 10.0))
            .unwrap();

        let report = reset_account(&store, 1).unwrap();
        assert_eq!(
            report,
            ResetReport {
                transactions: 1,
                debts: 1,
                assets: 1
            }
        );

        assert!(store.find_transactions(1, &TransactionQuery::new()).unwrap().is_empty());
        assert!(store.find_debts(1, None).unwrap().is_empty());
        assert!(store.find_assets(1).unwrap().is_empty());
        assert_eq!(store.find_goals(1).unwrap().len(), 1);
        assert_eq!(store.find_bills(1).unwrap().len(), 1);
        assert_eq!(store.find_items(1).unwrap().len(), 1);
        assert_eq!(store.find_transactions(2, &TransactionQuery::new()).unwrap().len(), 1);
    }
}
