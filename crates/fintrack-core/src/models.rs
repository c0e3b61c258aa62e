//! Domain models for FinTrack

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named savings target with a deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target: f64,
    pub current: f64,
    /// Stored verbatim; the advisor copes with malformed values
    pub deadline: String,
}

/// A goal as submitted from the planner (before DB insertion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    pub deadline: String,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target: f64, current: f64, deadline: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target,
            current,
            deadline: deadline.into(),
        }
    }

    /// Minimum-value checks from the planner form: target > 0, current >= 0
    pub fn validate(&self) -> Result<()> {
        if !self.target.is_finite() || self.target <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Target amount must be greater than 0 (got {})",
                self.target
            )));
        }
        if !self.current.is_finite() || self.current < 0.0 {
            return Err(Error::InvalidData(format!(
                "Current amount cannot be negative (got {})",
                self.current
            )));
        }
        Ok(())
    }
}

/// Expense categories offered by the expenses view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Kitchen,
    Rent,
    Entertainment,
    Transport,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kitchen => "kitchen",
            Self::Rent => "rent",
            Self::Entertainment => "entertainment",
            Self::Transport => "transport",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kitchen => "Kitchen",
            Self::Rent => "Rent",
            Self::Entertainment => "Entertainment",
            Self::Transport => "Transport",
            Self::Other => "Other",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::Kitchen,
            Self::Rent,
            Self::Entertainment,
            Self::Transport,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Turkish labels are accepted alongside the English ones
        match s.trim().to_lowercase().as_str() {
            "kitchen" | "groceries" | "mutfak" => Ok(Self::Kitchen),
            "rent" | "kira" => Ok(Self::Rent),
            "entertainment" | "eğlence" | "eglence" => Ok(Self::Entertainment),
            "transport" | "transportation" | "ulaşım" | "ulasim" => Ok(Self::Transport),
            "other" | "diğer" | "diger" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
}

/// An expense as submitted from the expenses view (before DB insertion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: Category,
    /// Defaults to the submission day when absent
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NewTransaction {
    pub fn new(amount: f64, category: Category) -> Self {
        Self {
            amount,
            category,
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Amount must be a finite number (got {})",
                self.amount
            )));
        }
        Ok(())
    }
}

// ========== Report Models ==========

/// One bar pair of the dashboard's target-vs-current chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalBar {
    pub name: String,
    pub target: f64,
    pub current: f64,
}

/// Dashboard summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub goal_count: usize,
    pub total_target: f64,
    pub total_current: f64,
    pub goals: Vec<GoalBar>,
}

/// A goal's share of the total target (goal distribution chart)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalShare {
    pub name: String,
    pub target: f64,
    pub percentage: f64,
}

/// Spending in one category (expense distribution chart)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// A row of the strategic status table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    /// None when the goal's target is zero
    pub completion_percentage: Option<f64>,
}

/// Full financial analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    pub goal_distribution: Vec<GoalShare>,
    pub expense_distribution: Vec<CategoryTotal>,
    pub goal_progress: Vec<GoalProgress>,
    pub total_savings: f64,
    pub total_expenses: f64,
    pub transaction_count: usize,
    pub health_score: i64,
}
