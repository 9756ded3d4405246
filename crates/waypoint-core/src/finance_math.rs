//! Personal-finance formulas
//!
//! Pure functions with no I/O. Edge cases that would otherwise divide by zero
//! or never terminate are encoded as values (see [`PayoffMonths`]) rather than
//! errors.

use serde::{Serialize, Serializer};

/// Share of income for essentials in the 50/30/20 rule
pub const NEEDS_RATIO: f64 = 0.50;
/// Share of income for discretionary spend
pub const WANTS_RATIO: f64 = 0.30;
/// Share of income for savings and debt reduction
pub const SAVINGS_RATIO: f64 = 0.20;

/// Months of expenses an emergency fund should cover by default
pub const DEFAULT_RISK_FACTOR: f64 = 6.0;

/// Multiple of annual expenses needed for a 4% withdrawal rate
pub const FIRE_MULTIPLIER: f64 = 25.0;

/// Default annual inflation used for projections
pub const DEFAULT_INFLATION_RATE: f64 = 0.07;

/// Ideal allocation of a month's income
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSplit {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

/// Split income 50/30/20 into needs, wants, and savings
pub fn budget_split(income: f64) -> BudgetSplit {
    BudgetSplit {
        needs: income * NEEDS_RATIO,
        wants: income * WANTS_RATIO,
        savings: income * SAVINGS_RATIO,
    }
}

/// Emergency fund target: monthly outgoings times the risk factor
pub fn emergency_fund_target(fixed: f64, variable_avg: f64, risk_factor: f64) -> f64 {
    (fixed + variable_avg) * risk_factor
}

/// Net worth needed to retire on a 4% withdrawal rate
pub fn fire_number(annual_expenses: f64) -> f64 {
    annual_expenses * FIRE_MULTIPLIER
}

/// Value of `current` after `years` of compounding at `rate`
pub fn future_value(current: f64, years: f64, rate: f64) -> f64 {
    current * (1.0 + rate).powf(years)
}

/// Monthly contribution needed to reach `target` in `months_until_due` months
///
/// With no months left the whole target is due now.
pub fn sinking_fund_monthly(target: f64, months_until_due: i32) -> f64 {
    if months_until_due <= 0 {
        return target;
    }
    (target / months_until_due as f64).ceil()
}

/// Result of a payoff-timeline calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoffMonths {
    /// Cleared after this many monthly payments
    Months(u32),
    /// The payment does not cover the interest accruing each month
    Never,
    /// No payment is being made at all
    Infinite,
}

impl PayoffMonths {
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::Months(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for PayoffMonths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Months(n) => write!(f, "{}", n),
            Self::Never => write!(f, "NEVER"),
            Self::Infinite => write!(f, "INFINITE"),
        }
    }
}

/// Serialized as a bare number of months, or the string `NEVER` / `INFINITE`
impl Serialize for PayoffMonths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Months(n) => serializer.serialize_u32(*n),
            Self::Never => serializer.serialize_str("NEVER"),
            Self::Infinite => serializer.serialize_str("INFINITE"),
        }
    }
}

/// Months until `balance` is cleared at `annual_rate_pct` with a fixed monthly payment
pub fn debt_payoff_months(balance: f64, annual_rate_pct: f64, monthly_payment: f64) -> PayoffMonths {
    if !(monthly_payment > 0.0) {
        return PayoffMonths::Infinite;
    }
    if balance <= 0.0 {
        return PayoffMonths::Months(0);
    }

    if annual_rate_pct == 0.0 || !annual_rate_pct.is_finite() {
        return to_months((balance / monthly_payment).ceil());
    }

    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if balance * monthly_rate >= monthly_payment {
        return PayoffMonths::Never;
    }

    let n = -(1.0 - monthly_rate * balance / monthly_payment).ln() / (1.0 + monthly_rate).ln();
    to_months(n.ceil())
}

fn to_months(n: f64) -> PayoffMonths {
    if n.is_finite() {
        // `as` saturates at u32::MAX
        PayoffMonths::Months(n.max(0.0) as u32)
    } else {
        PayoffMonths::Never
    }
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10_f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_split_sums_to_income() {
        for income in [0.0, 1.0, 1234.56, 50_000.0, 999_999.99] {
            let split = budget_split(income);
            let total = split.needs + split.wants + split.savings;
            assert!((total - income).abs() < 1e-6, "income {}", income);
        }
        let split = budget_split(10_000.0);
        assert_eq!(split.needs, 5_000.0);
        assert_eq!(split.wants, 3_000.0);
        assert_eq!(split.savings, 2_000.0);
    }

    #[test]
    fn test_emergency_fund_and_fire_number() {
        assert_eq!(
            emergency_fund_target(1_000.0, 500.0, DEFAULT_RISK_FACTOR),
            9_000.0
        );
        assert_eq!(fire_number(36_000.0), 900_000.0);
    }

    #[test]
    fn test_future_value() {
        assert_eq!(future_value(1_000.0, 0.0, DEFAULT_INFLATION_RATE), 1_000.0);
        let fv = future_value(1_000.0, 2.0, 0.1);
        assert!((fv - 1_210.0).abs() < 1e-9);
    }

    #[test]
    fn test_sinking_fund_monthly() {
        assert_eq!(sinking_fund_monthly(1_200.0, 0), 1_200.0);
        assert_eq!(sinking_fund_monthly(1_200.0, -3), 1_200.0);
        assert_eq!(sinking_fund_monthly(1_000.0, 3), 334.0);
        assert_eq!(sinking_fund_monthly(1_200.0, 12), 100.0);
    }

    #[test]
    fn test_payoff_interest_free_is_linear() {
        assert_eq!(debt_payoff_months(1_000.0, 0.0, 300.0), PayoffMonths::Months(4));
        assert_eq!(debt_payoff_months(900.0, 0.0, 300.0), PayoffMonths::Months(3));
        assert_eq!(debt_payoff_months(1.0, 0.0, 300.0), PayoffMonths::Months(1));
    }

    #[test]
    fn test_payoff_without_payment_is_infinite() {
        assert_eq!(debt_payoff_months(1_000.0, 0.0, 0.0), PayoffMonths::Infinite);
        assert_eq!(debt_payoff_months(1_000.0, 18.0, -50.0), PayoffMonths::Infinite);
    }

    #[test]
    fn test_payoff_never_when_interest_exceeds_payment() {
        // 12% APR on 10k accrues exactly 100/month
        assert_eq!(debt_payoff_months(10_000.0, 12.0, 100.0), PayoffMonths::Never);
        assert_eq!(debt_payoff_months(10_000.0, 24.0, 150.0), PayoffMonths::Never);
    }

    #[test]
    fn test_payoff_amortization() {
        // 1000 at 12% APR paying 100/month clears in 11 payments
        assert_eq!(debt_payoff_months(1_000.0, 12.0, 100.0), PayoffMonths::Months(11));
        // Interest makes it strictly longer than the linear payoff
        let linear = debt_payoff_months(5_000.0, 0.0, 200.0).months().unwrap();
        let amortized = debt_payoff_months(5_000.0, 18.0, 200.0).months().unwrap();
        assert!(amortized > linear);
    }

    #[test]
    fn test_payoff_months_serialization() {
        assert_eq!(serde_json::to_value(PayoffMonths::Months(7)).unwrap(), 7);
        assert_eq!(serde_json::to_value(PayoffMonths::Never).unwrap(), "NEVER");
        assert_eq!(
            serde_json::to_value(PayoffMonths::Infinite).unwrap(),
            "INFINITE"
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(2_999.5, 0), 3_000.0);
    }
}
