//! Investment advisor
//!
//! A fixed, ordered rule table evaluated top-down. The first rule whose
//! predicate matches produces the advice and the remaining rules are never
//! evaluated. When no rule matches the owner is considered healthy and gets
//! the model portfolio.
//!
//! The emergency-fund check uses a configured monthly-expense reference
//! ([`AdvisorConfig::monthly_expenses`]) rather than the owner's real spending.

use serde::Serialize;
use tracing::{debug, warn};

use crate::debt_strategy::CRITICAL_RATE_THRESHOLD;
use crate::error::Result;
use crate::models::{DebtStatus, OwnerId};
use crate::store::{AssetStore, DebtStore};

/// Months of expenses the emergency fund must cover
pub const EMERGENCY_FUND_MONTHS: f64 = 6.0;

/// Monthly-expense reference used until a real average is wired in
pub const PLACEHOLDER_MONTHLY_EXPENSES: f64 = 20_000.0;

/// Environment variable overriding the monthly-expense reference
pub const MONTHLY_EXPENSES_ENV: &str = "WAYPOINT_ADVISOR_MONTHLY_EXPENSES";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisorConfig {
    pub monthly_expenses: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            monthly_expenses: PLACEHOLDER_MONTHLY_EXPENSES,
        }
    }
}

impl AdvisorConfig {
    /// Defaults, with `WAYPOINT_ADVISOR_MONTHLY_EXPENSES` applied when it is a
    /// non-negative number
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(MONTHLY_EXPENSES_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => config.monthly_expenses = v,
                _ => warn!(value = %raw, "Ignoring invalid {}", MONTHLY_EXPENSES_ENV),
            }
        }
        config
    }

    pub fn required_emergency_fund(&self) -> f64 {
        self.monthly_expenses * EMERGENCY_FUND_MONTHS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryStatus {
    Critical,
    Warning,
    Healthy,
}

impl AdvisoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Healthy => "HEALTHY",
        }
    }
}

/// Percent of new money to direct at each bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub debt: u8,
    pub equity: u8,
    pub gold: u8,
}

impl Allocation {
    const ALL_TO_DEBT: Self = Self {
        debt: 100,
        equity: 0,
        gold: 0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioLine {
    #[serde(rename = "type")]
    pub instrument: &'static str,
    pub percentage: u8,
    pub reason: &'static str,
}

/// Model portfolio for owners with no toxic debt and a full emergency fund
pub const MODEL_PORTFOLIO: [PortfolioLine; 4] = [
    PortfolioLine {
        instrument: "Index Mutual Funds (Nifty 50)",
        percentage: 60,
        reason: "Highest growth potential (avg 12%) for long term (>7 yrs).",
    },
    PortfolioLine {
        instrument: "Mid-Cap/Flexi-Cap Funds",
        percentage: 20,
        reason: "Higher risk, higher reward. Good for aggressive growth.",
    },
    PortfolioLine {
        instrument: "Gold (SGB/ETF)",
        percentage: 10,
        reason: "Hedge against inflation and market crashes.",
    },
    PortfolioLine {
        instrument: "Debt/Bonds",
        percentage: 10,
        reason: "Stability for short-term goals.",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub status: AdvisoryStatus,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Allocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deficit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_portfolio: Option<Vec<PortfolioLine>>,
}

/// The figures the rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialSnapshot {
    /// Remaining balance across active debts above the critical rate
    pub high_interest_debt: f64,
    /// Value of liquid assets
    pub liquid_assets: f64,
    pub required_emergency_fund: f64,
}

/// One row of the advisory rule table
pub struct AdvisoryRule {
    pub status: AdvisoryStatus,
    pub applies: fn(&FinancialSnapshot) -> bool,
    pub advise: fn(&FinancialSnapshot) -> Advice,
}

fn has_toxic_debt(s: &FinancialSnapshot) -> bool {
    s.high_interest_debt > 0.0
}

fn pay_off_toxic_debt(s: &FinancialSnapshot) -> Advice {
    Advice {
        status: AdvisoryStatus::Critical,
        message: "Stop investing! You have high-interest debt.".to_string(),
        action: format!(
            "Pay off {:.2} in loans first. Return on paying debt (12-24%) is guaranteed.",
            s.high_interest_debt
        ),
        allocation: Some(Allocation::ALL_TO_DEBT),
        deficit: None,
        suggested_portfolio: None,
    }
}

fn buffer_too_thin(s: &FinancialSnapshot) -> bool {
    s.liquid_assets < s.required_emergency_fund
}

fn build_safety_net(s: &FinancialSnapshot) -> Advice {
    let deficit = s.required_emergency_fund - s.liquid_assets;
    Advice {
        status: AdvisoryStatus::Warning,
        message: "Build your safety net.".to_string(),
        action: format!(
            "You need {:.2} more in liquid funds (FD/Savings). Do not lock money in stocks yet.",
            deficit
        ),
        allocation: Some(Allocation::ALL_TO_DEBT),
        deficit: Some(deficit),
        suggested_portfolio: None,
    }
}

/// Rules in evaluation order
pub const RULES: [AdvisoryRule; 2] = [
    AdvisoryRule {
        status: AdvisoryStatus::Critical,
        applies: has_toxic_debt,
        advise: pay_off_toxic_debt,
    },
    AdvisoryRule {
        status: AdvisoryStatus::Warning,
        applies: buffer_too_thin,
        advise: build_safety_net,
    },
];

fn healthy_advice() -> Advice {
    Advice {
        status: AdvisoryStatus::Healthy,
        message: "You are ready to build wealth!".to_string(),
        action: "Start a monthly SIP. Focus on equity for long horizons.".to_string(),
        allocation: None,
        deficit: None,
        suggested_portfolio: Some(MODEL_PORTFOLIO.to_vec()),
    }
}

/// Walk the rule table and return the first matching advice
pub fn advise(snapshot: &FinancialSnapshot) -> Advice {
    match RULES.iter().find(|rule| (rule.applies)(snapshot)) {
        Some(rule) => {
            debug!(status = rule.status.as_str(), "Advisory rule matched");
            (rule.advise)(snapshot)
        }
        None => healthy_advice(),
    }
}

pub fn investment_advice<S: AssetStore + DebtStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    config: &AdvisorConfig,
) -> Result<Advice> {
    let high_interest_debt: f64 = store
        .find_debts(owner, Some(DebtStatus::Active))?
        .iter()
        .filter(|d| d.interest_rate > CRITICAL_RATE_THRESHOLD)
        .map(|d| d.current_amount)
        .sum();

    let liquid_assets: f64 = store
        .find_assets(owner)?
        .iter()
        .filter(|a| a.is_liquid)
        .map(|a| a.value)
        .sum();

    Ok(advise(&FinancialSnapshot {
        high_interest_debt,
        liquid_assets,
        required_emergency_fund: config.required_emergency_fund(),
    }))
}
