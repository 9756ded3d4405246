//! Per-entity store traits
//!
//! Each aggregator and service depends only on the narrow trait for the
//! records it reads or writes. Every method is scoped by owner: a record that
//! exists but belongs to someone else behaves exactly like a missing one.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{
    Asset, Bill, ConsumptionItem, Debt, DebtStatus, Goal, NewAsset, NewBill, NewConsumptionItem,
    NewDebt, NewGoal, NewTransaction, OwnerId, Transaction, TransactionType,
};

/// Sort direction for transaction queries (by date, then id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Builder for transaction lookups
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub transaction_type: Option<TransactionType>,
    /// Inclusive lower bound
    pub since: Option<NaiveDate>,
    /// Inclusive upper bound
    pub until: Option<NaiveDate>,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transaction_type(mut self, t: TransactionType) -> Self {
        self.transaction_type = Some(t);
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = SortOrder::Descending;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a transaction passes the type and date filters
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.transaction_type
            .map_or(true, |t| t == tx.transaction_type)
            && self.since.map_or(true, |d| tx.date >= d)
            && self.until.map_or(true, |d| tx.date <= d)
    }
}

pub trait TransactionStore {
    fn insert_transaction(&self, owner: OwnerId, tx: &NewTransaction) -> Result<Transaction>;

    /// Insert a batch, returning how many rows were written
    fn insert_transactions(&self, owner: OwnerId, txs: &[NewTransaction]) -> Result<usize>;

    fn find_transactions(&self, owner: OwnerId, query: &TransactionQuery)
        -> Result<Vec<Transaction>>;

    /// Returns false when no transaction with this id belongs to the owner
    fn delete_transaction(&self, owner: OwnerId, id: i64) -> Result<bool>;

    fn delete_all_transactions(&self, owner: OwnerId) -> Result<usize>;
}

pub trait DebtStore {
    fn insert_debt(&self, owner: OwnerId, debt: &NewDebt) -> Result<Debt>;

    fn find_debts(&self, owner: OwnerId, status: Option<DebtStatus>) -> Result<Vec<Debt>>;

    fn get_debt(&self, owner: OwnerId, id: i64) -> Result<Option<Debt>>;

    /// Overwrite the mutable fields of an existing debt
    fn update_debt(&self, owner: OwnerId, debt: &Debt) -> Result<bool>;

    fn delete_debt(&self, owner: OwnerId, id: i64) -> Result<bool>;

    fn delete_all_debts(&self, owner: OwnerId) -> Result<usize>;
}

pub trait AssetStore {
    fn insert_asset(&self, owner: OwnerId, asset: &NewAsset) -> Result<Asset>;

    fn find_assets(&self, owner: OwnerId) -> Result<Vec<Asset>>;

    /// Set a new value and stamp `last_updated`
    fn update_asset_value(&self, owner: OwnerId, id: i64, value: f64) -> Result<Option<Asset>>;

    fn delete_asset(&self, owner: OwnerId, id: i64) -> Result<bool>;

    fn delete_all_assets(&self, owner: OwnerId) -> Result<usize>;
}

pub trait GoalStore {
    fn insert_goal(&self, owner: OwnerId, goal: &NewGoal) -> Result<Goal>;

    fn find_goals(&self, owner: OwnerId) -> Result<Vec<Goal>>;

    fn get_goal(&self, owner: OwnerId, id: i64) -> Result<Option<Goal>>;

    fn update_goal(&self, owner: OwnerId, goal: &Goal) -> Result<bool>;

    fn delete_goal(&self, owner: OwnerId, id: i64) -> Result<bool>;
}

pub trait BillStore {
    fn insert_bill(&self, owner: OwnerId, bill: &NewBill) -> Result<Bill>;

    /// Bills ordered by due day
    fn find_bills(&self, owner: OwnerId) -> Result<Vec<Bill>>;

    fn delete_bill(&self, owner: OwnerId, id: i64) -> Result<bool>;
}

pub trait ConsumptionStore {
    fn insert_item(&self, owner: OwnerId, item: &NewConsumptionItem) -> Result<ConsumptionItem>;

    fn find_items(&self, owner: OwnerId) -> Result<Vec<ConsumptionItem>>;

    fn get_item(&self, owner: OwnerId, id: i64) -> Result<Option<ConsumptionItem>>;

    fn update_item(
        &self,
        owner: OwnerId,
        id: i64,
        item: &NewConsumptionItem,
    ) -> Result<Option<ConsumptionItem>>;

    fn delete_item(&self, owner: OwnerId, id: i64) -> Result<bool>;
}
