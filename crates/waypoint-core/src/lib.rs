//! Waypoint Core Library
//!
//! Shared functionality for the Waypoint personal finance API:
//! - Domain models and per-entity store traits
//! - SQLite-backed store with migrations and encryption at rest
//! - Finance math (budget split, amortization, FIRE number, sinking funds)
//! - Aggregators: dashboard, debt strategy, net worth, FIRE progress, advisor
//! - Rule-based dashboard insights
//! - Bulk transaction import and account reset

pub mod account;
pub mod advisor;
pub mod assets;
pub mod bills;
pub mod consumption;
pub mod dashboard;
pub mod db;
pub mod debt_strategy;
pub mod debts;
pub mod error;
pub mod finance_math;
pub mod fire;
pub mod goals;
pub mod import;
pub mod insights;
pub mod models;
pub mod net_worth;
pub mod store;
pub mod transactions;

/// In-memory store for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use advisor::{Advice, AdvisorConfig, AdvisoryStatus};
pub use dashboard::Dashboard;
pub use db::Database;
pub use debt_strategy::DebtStrategyReport;
pub use error::{Error, Result};
pub use finance_math::PayoffMonths;
pub use fire::FireReport;
pub use import::{ImportReport, ImportRowError, ParsedImport};
pub use insights::{Insight, InsightEngine, InsightRule};
pub use net_worth::NetWorthReport;
pub use store::{
    AssetStore, BillStore, ConsumptionStore, DebtStore, GoalStore, SortOrder, TransactionQuery,
    TransactionStore,
};
