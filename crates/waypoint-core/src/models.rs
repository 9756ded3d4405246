//! Domain models for Waypoint
//!
//! Every record belongs to exactly one owner. Owner ids are not carried on the
//! records themselves; stores scope every read and write by `OwnerId`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the user that owns a record
pub type OwnerId = i64;

/// Today's date in the server's local timezone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Kind of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
    DebtPayment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::DebtPayment => "DEBT_PAYMENT",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            "DEBT_PAYMENT" => Ok(Self::DebtPayment),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How often a transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recurrence {
    #[default]
    None,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl std::str::FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            _ => Err(format!("Unknown recurrence: {}", s)),
        }
    }
}

/// A logged income, expense, or debt payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    /// Always positive; the type carries the direction
    pub amount: f64,
    pub description: String,
    pub is_recurring: bool,
    /// Fixed/essential expense (rent, subscriptions). Only set on expenses.
    pub is_locked: bool,
    pub recurrence: Recurrence,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A transaction to be stored (before insertion)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default = "today")]
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Minimal constructor; flags default to false and the date to today
    pub fn new(
        transaction_type: TransactionType,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            transaction_type,
            category: category.into(),
            amount,
            description: String::new(),
            is_recurring: false,
            is_locked: false,
            recurrence: Recurrence::None,
            date: today(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Lifecycle of a debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebtStatus {
    #[default]
    Active,
    PaidOff,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::PaidOff => "PAID_OFF",
        }
    }
}

impl std::str::FromStr for DebtStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "PAID_OFF" => Ok(Self::PaidOff),
            _ => Err(format!("Unknown debt status: {}", s)),
        }
    }
}

/// A loan, card balance, or informal debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: i64,
    pub name: String,
    /// Original principal, fixed at creation
    pub total_amount: f64,
    /// Remaining balance; always 0 once paid off
    pub current_amount: f64,
    /// Annual percentage rate, 0 for interest-free
    pub interest_rate: f64,
    pub minimum_payment: f64,
    /// Day of month the payment is due
    pub due_date: Option<u8>,
    pub status: DebtStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDebt {
    pub name: String,
    pub total_amount: f64,
    /// Defaults to `total_amount`
    #[serde(default)]
    pub current_amount: Option<f64>,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub minimum_payment: f64,
    #[serde(default)]
    pub due_date: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Cash,
    Investment,
    RealEstate,
    Gold,
    Epf,
    Other,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Investment => "INVESTMENT",
            Self::RealEstate => "REAL_ESTATE",
            Self::Gold => "GOLD",
            Self::Epf => "EPF",
            Self::Other => "OTHER",
        }
    }
}

impl std::str::FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "INVESTMENT" => Ok(Self::Investment),
            "REAL_ESTATE" => Ok(Self::RealEstate),
            "GOLD" => Ok(Self::Gold),
            "EPF" => Ok(Self::Epf),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!("Unknown asset type: {}", s)),
        }
    }
}

/// Something the user owns, valued manually
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Current market value
    pub value: f64,
    /// Spendable today without penalty or delay
    pub is_liquid: bool,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub value: f64,
    #[serde(default)]
    pub is_liquid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::str::FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(format!("Unknown goal priority: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "PAUSED" => Ok(Self::Paused),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

/// A savings goal. `saved_amount` is funded explicitly, never derived from transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub deadline: Option<NaiveDate>,
    pub priority: GoalPriority,
    pub status: GoalStatus,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: GoalPriority,
}

/// Template for a monthly bill, materialized into expenses on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    /// Day of month the bill is due
    pub due_day: u8,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub name: String,
    pub amount: f64,
    pub due_day: u8,
    /// Defaults to "Bills"
    #[serde(default)]
    pub category: Option<String>,
}

/// A purchase amortized over the months it lasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionItem {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    pub months: u32,
    /// Derived: cost / months
    pub monthly_cost: f64,
}

/// Request shape for creating or updating a consumption item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionItemInput {
    pub name: String,
    pub cost: f64,
    pub months: u32,
}

/// A validated consumption item with its derived monthly cost
#[derive(Debug, Clone, PartialEq)]
pub struct NewConsumptionItem {
    pub name: String,
    pub cost: f64,
    pub months: u32,
    pub monthly_cost: f64,
}
