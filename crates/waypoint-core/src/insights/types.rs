//! Core types for dashboard insights

use serde::Serialize;
use std::fmt;

/// Which rule produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    HighBurnRate,
    FixedCostOverrun,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::HighBurnRate => "HIGH_BURN_RATE",
            InsightKind::FixedCostOverrun => "FIXED_COST_OVERRUN",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Alert => "ALERT",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Alert => 3,
        }
    }
}

/// An advisory record shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub action: String,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        severity: Severity,
        message: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            action: action.into(),
        }
    }
}

/// Current-month totals the rules evaluate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthSnapshot {
    pub income: f64,
    /// Locked (essential) expenses
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
}

impl MonthSnapshot {
    pub fn total_spent(&self) -> f64 {
        self.fixed_expenses + self.variable_expenses
    }
}
