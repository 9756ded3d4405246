//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db)
//! - `import` - CSV import
//! - `reports` - JSON reports from the aggregators
//! - `serve` - Web server command

pub mod core;
pub mod import;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use import::*;
pub use reports::*;
pub use serve::*;
