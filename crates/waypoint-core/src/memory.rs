//! In-memory store for tests
//!
//! Implements every store trait over mutex-guarded vectors so aggregators and
//! services can be exercised without SQLite.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::{
    Asset, Bill, ConsumptionItem, Debt, DebtStatus, Goal, GoalStatus, NewAsset, NewBill,
    NewConsumptionItem, NewDebt, NewGoal, NewTransaction, OwnerId, Transaction,
};
use crate::store::{
    AssetStore, BillStore, ConsumptionStore, DebtStore, GoalStore, SortOrder, TransactionQuery,
    TransactionStore,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    transactions: Vec<(OwnerId, Transaction)>,
    debts: Vec<(OwnerId, Debt)>,
    assets: Vec<(OwnerId, Asset)>,
    goals: Vec<(OwnerId, Goal)>,
    bills: Vec<(OwnerId, Bill)>,
    items: Vec<(OwnerId, ConsumptionItem)>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Remove the owner's row with this id, reporting whether one existed
fn remove_one<T>(rows: &mut Vec<(OwnerId, T)>, owner: OwnerId, pred: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|(o, r)| !(*o == owner && pred(r)));
    rows.len() != before
}

fn remove_all<T>(rows: &mut Vec<(OwnerId, T)>, owner: OwnerId) -> usize {
    let before = rows.len();
    rows.retain(|(o, _)| *o != owner);
    before - rows.len()
}

fn owned<T: Clone>(rows: &[(OwnerId, T)], owner: OwnerId) -> Vec<T> {
    rows.iter()
        .filter(|(o, _)| *o == owner)
        .map(|(_, r)| r.clone())
        .collect()
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))
    }

    fn build_transaction(tables: &mut Tables, tx: &NewTransaction) -> Transaction {
        Transaction {
            id: tables.next_id(),
            transaction_type: tx.transaction_type,
            category: tx.category.clone(),
            amount: tx.amount,
            description: tx.description.clone(),
            is_recurring: tx.is_recurring,
            is_locked: tx.is_locked,
            recurrence: tx.recurrence,
            date: tx.date,
            created_at: Utc::now(),
        }
    }
}

impl TransactionStore for MemoryStore {
    fn insert_transaction(&self, owner: OwnerId, tx: &NewTransaction) -> Result<Transaction> {
        let mut tables = self.lock()?;
        let row = Self::build_transaction(&mut tables, tx);
        tables.transactions.push((owner, row.clone()));
        Ok(row)
    }

    fn insert_transactions(&self, owner: OwnerId, txs: &[NewTransaction]) -> Result<usize> {
        let mut tables = self.lock()?;
        for tx in txs {
            let row = Self::build_transaction(&mut tables, tx);
            tables.transactions.push((owner, row));
        }
        Ok(txs.len())
    }

    fn find_transactions(
        &self,
        owner: OwnerId,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        let tables = self.lock()?;
        let mut rows: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|(o, tx)| *o == owner && query.matches(tx))
            .map(|(_, tx)| tx.clone())
            .collect();

        rows.sort_by_key(|tx| (tx.date, tx.id));
        if query.order == SortOrder::Descending {
            rows.reverse();
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn delete_transaction(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        Ok(remove_one(&mut tables.transactions, owner, |tx| tx.id == id))
    }

    fn delete_all_transactions(&self, owner: OwnerId) -> Result<usize> {
        let mut tables = self.lock()?;
        Ok(remove_all(&mut tables.transactions, owner))
    }
}

impl DebtStore for MemoryStore {
    fn insert_debt(&self, owner: OwnerId, debt: &NewDebt) -> Result<Debt> {
        let mut tables = self.lock()?;
        let row = Debt {
            id: tables.next_id(),
            name: debt.name.clone(),
            total_amount: debt.total_amount,
            current_amount: debt.current_amount.unwrap_or(debt.total_amount),
            interest_rate: debt.interest_rate,
            minimum_payment: debt.minimum_payment,
            due_date: debt.due_date,
            status: DebtStatus::Active,
        };
        tables.debts.push((owner, row.clone()));
        Ok(row)
    }

    fn find_debts(&self, owner: OwnerId, status: Option<DebtStatus>) -> Result<Vec<Debt>> {
        let tables = self.lock()?;
        Ok(owned(&tables.debts, owner)
            .into_iter()
            .filter(|d| status.map_or(true, |s| d.status == s))
            .collect())
    }

    fn get_debt(&self, owner: OwnerId, id: i64) -> Result<Option<Debt>> {
        let tables = self.lock()?;
        Ok(owned(&tables.debts, owner).into_iter().find(|d| d.id == id))
    }

    fn update_debt(&self, owner: OwnerId, debt: &Debt) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables
            .debts
            .iter_mut()
            .find(|(o, d)| *o == owner && d.id == debt.id)
        {
            Some((_, row)) => {
                *row = debt.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_debt(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        Ok(remove_one(&mut tables.debts, owner, |d| d.id == id))
    }

    fn delete_all_debts(&self, owner: OwnerId) -> Result<usize> {
        let mut tables = self.lock()?;
        Ok(remove_all(&mut tables.debts, owner))
    }
}

impl AssetStore for MemoryStore {
    fn insert_asset(&self, owner: OwnerId, asset: &NewAsset) -> Result<Asset> {
        let mut tables = self.lock()?;
        let row = Asset {
            id: tables.next_id(),
            name: asset.name.clone(),
            asset_type: asset.asset_type,
            value: asset.value,
            is_liquid: asset.is_liquid,
            last_updated: Utc::now(),
        };
        tables.assets.push((owner, row.clone()));
        Ok(row)
    }

    fn find_assets(&self, owner: OwnerId) -> Result<Vec<Asset>> {
        let tables = self.lock()?;
        Ok(owned(&tables.assets, owner))
    }

    fn update_asset_value(&self, owner: OwnerId, id: i64, value: f64) -> Result<Option<Asset>> {
        let mut tables = self.lock()?;
        Ok(tables
            .assets
            .iter_mut()
            .find(|(o, a)| *o == owner && a.id == id)
            .map(|(_, asset)| {
                asset.value = value;
                asset.last_updated = Utc::now();
                asset.clone()
            }))
    }

    fn delete_asset(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        Ok(remove_one(&mut tables.assets, owner, |a| a.id == id))
    }

    fn delete_all_assets(&self, owner: OwnerId) -> Result<usize> {
        let mut tables = self.lock()?;
        Ok(remove_all(&mut tables.assets, owner))
    }
}

impl GoalStore for MemoryStore {
    fn insert_goal(&self, owner: OwnerId, goal: &NewGoal) -> Result<Goal> {
        let mut tables = self.lock()?;
        let row = Goal {
            id: tables.next_id(),
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            saved_amount: goal.saved_amount,
            deadline: goal.deadline,
            priority: goal.priority,
            status: GoalStatus::Active,
            completed_date: None,
            created_at: Utc::now(),
        };
        tables.goals.push((owner, row.clone()));
        Ok(row)
    }

    fn find_goals(&self, owner: OwnerId) -> Result<Vec<Goal>> {
        let tables = self.lock()?;
        Ok(owned(&tables.goals, owner))
    }

    fn get_goal(&self, owner: OwnerId, id: i64) -> Result<Option<Goal>> {
        let tables = self.lock()?;
        Ok(owned(&tables.goals, owner).into_iter().find(|g| g.id == id))
    }

    fn update_goal(&self, owner: OwnerId, goal: &Goal) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables
            .goals
            .iter_mut()
            .find(|(o, g)| *o == owner && g.id == goal.id)
        {
            Some((_, row)) => {
                *row = goal.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_goal(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        Ok(remove_one(&mut tables.goals, owner, |g| g.id == id))
    }
}

impl BillStore for MemoryStore {
    fn insert_bill(&self, owner: OwnerId, bill: &NewBill) -> Result<Bill> {
        let mut tables = self.lock()?;
        let row = Bill {
            id: tables.next_id(),
            name: bill.name.clone(),
            amount: bill.amount,
            due_day: bill.due_day,
            category: bill
                .category
                .clone()
                .unwrap_or_else(|| crate::bills::DEFAULT_BILL_CATEGORY.to_string()),
        };
        tables.bills.push((owner, row.clone()));
        Ok(row)
    }

    fn find_bills(&self, owner: OwnerId) -> Result<Vec<Bill>> {
        let tables = self.lock()?;
        let mut bills = owned(&tables.bills, owner);
        bills.sort_by_key(|b| (b.due_day, b.id));
        Ok(bills)
    }

    fn delete_bill(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        Ok(remove_one(&mut tables.bills, owner, |b| b.id == id))
    }
}

impl ConsumptionStore for MemoryStore {
    fn insert_item(&self, owner: OwnerId, item: &NewConsumptionItem) -> Result<ConsumptionItem> {
        let mut tables = self.lock()?;
        let row = ConsumptionItem {
            id: tables.next_id(),
            name: item.name.clone(),
            cost: item.cost,
            months: item.months,
            monthly_cost: item.monthly_cost,
        };
        tables.items.push((owner, row.clone()));
        Ok(row)
    }

    fn find_items(&self, owner: OwnerId) -> Result<Vec<ConsumptionItem>> {
        let tables = self.lock()?;
        Ok(owned(&tables.items, owner))
    }

    fn get_item(&self, owner: OwnerId, id: i64) -> Result<Option<ConsumptionItem>> {
        let tables = self.lock()?;
        Ok(owned(&tables.items, owner).into_iter().find(|i| i.id == id))
    }

    fn update_item(
        &self,
        owner: OwnerId,
        id: i64,
        item: &NewConsumptionItem,
    ) -> Result<Option<ConsumptionItem>> {
        let mut tables = self.lock()?;
        Ok(tables
            .items
            .iter_mut()
            .find(|(o, i)| *o == owner && i.id == id)
            .map(|(_, row)| {
                row.name = item.name.clone();
                row.cost = item.cost;
                row.months = item.months;
                row.monthly_cost = item.monthly_cost;
                row.clone()
            }))
    }

    fn delete_item(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        Ok(remove_one(&mut tables.items, owner, |i| i.id == id))
    }
}
