//! Insight engine - runs every registered rule over a month's totals

use super::types::{Insight, InsightKind, MonthSnapshot};
use super::{FixedCostOverrunRule, HighBurnRateRule};

/// A single dashboard rule
pub trait InsightRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Produce an insight if the rule fires for this month
    fn evaluate(&self, month: &MonthSnapshot) -> Option<Insight>;
}

/// Holds the registered rules in evaluation order
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(HighBurnRateRule::new()));
        engine.register(Box::new(FixedCostOverrunRule::new()));

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule and collect the ones that fire
    ///
    /// Results are ordered by severity (most urgent first); rules of equal
    /// severity keep their registration order.
    pub fn analyze_all(&self, month: &MonthSnapshot) -> Vec<Insight> {
        let mut insights: Vec<Insight> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let insight = rule.evaluate(month);
                tracing::debug!(
                    rule = rule.id().as_str(),
                    name = rule.name(),
                    fired = insight.is_some(),
                    "Insight rule evaluated"
                );
                insight
            })
            .collect();

        insights.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
        insights
    }

    /// Registered rule ids, in evaluation order
    pub fn rule_kinds(&self) -> Vec<InsightKind> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}
