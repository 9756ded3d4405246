//! Report commands - print any aggregator as pretty JSON

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use waypoint_core::{
    advisor::investment_advice, dashboard::dashboard, db::Database, debt_strategy::debt_strategy,
    fire::fire_status, net_worth::net_worth, AdvisorConfig,
};

use super::open_db;
use crate::cli::ReportKind;

/// Build the requested report for `user` as JSON
pub fn build_report(
    db: &Database,
    kind: ReportKind,
    user: &str,
    extra: Option<f64>,
) -> Result<Value> {
    let owner = db
        .resolve_owner(user)
        .with_context(|| format!("Invalid user: {}", user))?;

    let report = match kind {
        ReportKind::Dashboard => serde_json::to_value(dashboard(db, owner)?)?,
        ReportKind::Networth => serde_json::to_value(net_worth(db, owner)?)?,
        ReportKind::Fire => serde_json::to_value(fire_status(db, owner)?)?,
        ReportKind::Debts => serde_json::to_value(debt_strategy(db, owner, extra)?)?,
        ReportKind::Advice => {
            serde_json::to_value(investment_advice(db, owner, &AdvisorConfig::from_env())?)?
        }
    };
    Ok(report)
}

pub fn cmd_report(
    db_path: &Path,
    kind: ReportKind,
    user: &str,
    extra: Option<f64>,
    no_encrypt: bool,
) -> Result<()> {
    if extra.is_some() && kind != ReportKind::Debts {
        tracing::warn!("--extra only applies to the debts report");
    }

    let db = open_db(db_path, no_encrypt)?;
    let report = build_report(&db, kind, user, extra)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
