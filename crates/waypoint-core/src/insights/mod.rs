//! Dashboard insight rules
//!
//! Each rule looks at the current month's totals and produces at most one
//! advisory record. Rules are independent of one another; new rules are added
//! by implementing [`InsightRule`] and registering them with the engine.
//!
//! ## Built-in rules
//!
//! - **High burn rate** - spending above 80% of the month's income
//! - **Fixed-cost overrun** - locked expenses above the 50% "needs" benchmark

pub mod engine;
pub mod fixed_cost_overrun;
pub mod high_burn_rate;
pub mod types;

pub use engine::{InsightEngine, InsightRule};
pub use fixed_cost_overrun::FixedCostOverrunRule;
pub use high_burn_rate::HighBurnRateRule;
pub use types::{Insight, InsightKind, MonthSnapshot, Severity};
