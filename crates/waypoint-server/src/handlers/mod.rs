//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod account;
pub mod assets;
pub mod auth;
pub mod bills;
pub mod debts;
pub mod goals;
pub mod import;
pub mod reports;
pub mod survival;
pub mod transactions;

// Re-export all handlers for use in router
pub use account::*;
pub use assets::*;
pub use auth::*;
pub use bills::*;
pub use debts::*;
pub use goals::*;
pub use import::*;
pub use reports::*;
pub use survival::*;
pub use transactions::*;
