//! Virtual savings advisor
//!
//! Converts a goal's target, current balance and deadline into the monthly
//! contribution needed to reach it. The calculation is total: a malformed
//! deadline or a non-finite amount never produces an error, it produces
//! [`Advice::Fallback`], which reads as `(0, 1)` to callers that only want
//! the numbers.
//!
//! "Today" is always passed in (directly or through a [`Clock`]) so the
//! calculation itself never reads ambient time.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::metrics::round_to;

/// Date format accepted for deadlines
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Length of an advisory "month" in days
pub const DAYS_PER_MONTH: i64 = 30;

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Why the advisor fell back to `(0, 1)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Deadline is not a `YYYY-MM-DD` calendar date
    InvalidDeadline(String),
    /// Target or current amount is NaN or infinite
    NonFiniteInput,
    /// The division overflowed
    NonFiniteResult,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeadline(detail) => write!(f, "invalid deadline: {}", detail),
            Self::NonFiniteInput => write!(f, "target or current amount is not a finite number"),
            Self::NonFiniteResult => write!(f, "monthly amount is not a finite number"),
        }
    }
}

/// Outcome of the advisory calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Advice {
    Computed { monthly_amount: f64, months: i64 },
    Fallback { reason: FallbackReason },
}

impl Advice {
    /// Amount to save per month; 0 for a fallback
    pub fn monthly_amount(&self) -> f64 {
        match self {
            Self::Computed { monthly_amount, .. } => *monthly_amount,
            Self::Fallback { .. } => 0.0,
        }
    }

    /// Months used in the computation; 1 for a fallback
    pub fn months(&self) -> i64 {
        match self {
            Self::Computed { months, .. } => *months,
            Self::Fallback { .. } => 1,
        }
    }

    /// `(monthly_amount, months)` exactly as the dashboard shows it
    pub fn as_pair(&self) -> (f64, i64) {
        (self.monthly_amount(), self.months())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Fallback { reason } => Some(reason),
            Self::Computed { .. } => None,
        }
    }

    /// Recommendation sentence shown after a goal is analysed
    pub fn message(&self, currency: &str) -> String {
        format!(
            "To reach this goal you must save {:.2}{} per month for {} months.",
            self.monthly_amount(),
            currency,
            self.months()
        )
    }
}

/// Compute the monthly contribution needed to go from `current` to `target`
/// by `deadline`, measured from `today`.
///
/// Months are whole 30-day periods, never fewer than one, so a deadline that
/// is today, past, or under 30 days away asks for the full gap at once. An
/// already exceeded goal yields a negative amount.
pub fn calculate(target: f64, current: f64, deadline: &str, today: NaiveDate) -> Advice {
    let advice = compute(target, current, deadline, today);
    if let Advice::Fallback { reason } = &advice {
        warn!(deadline, target, current, "Advisor fell back to (0, 1): {}", reason);
    }
    advice
}

/// [`calculate`] with "today" taken from a clock
pub fn calculate_with(clock: &dyn Clock, target: f64, current: f64, deadline: &str) -> Advice {
    calculate(target, current, deadline, clock.today())
}

/// [`calculate`] against the local calendar date
pub fn calculate_now(target: f64, current: f64, deadline: &str) -> Advice {
    calculate_with(&SystemClock, target, current, deadline)
}

/// Parse a `YYYY-MM-DD` deadline.
///
/// chrono tolerates leading whitespace, a sign and extra year digits; none of
/// those are accepted here. The year has exactly four digits and month and
/// day one or two.
pub fn parse_deadline(deadline: &str) -> Result<NaiveDate, String> {
    let parts: Vec<&str> = deadline.split('-').collect();
    let well_formed = matches!(
        parts.as_slice(),
        [year, month, day]
            if year.len() == 4
                && (1..=2).contains(&month.len())
                && (1..=2).contains(&day.len())
    ) && parts
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(format!("{:?} does not match {}", deadline, DEADLINE_FORMAT));
    }

    let date = NaiveDate::parse_from_str(deadline, DEADLINE_FORMAT)
        .map_err(|e| format!("{:?}: {}", deadline, e))?;
    if date.year() < 1 {
        return Err(format!("{:?}: year out of range", deadline));
    }
    Ok(date)
}

fn compute(target: f64, current: f64, deadline: &str, today: NaiveDate) -> Advice {
    let deadline = match parse_deadline(deadline) {
        Ok(date) => date,
        Err(detail) => {
            return Advice::Fallback {
                reason: FallbackReason::InvalidDeadline(detail),
            }
        }
    };

    if !target.is_finite() || !current.is_finite() {
        return Advice::Fallback {
            reason: FallbackReason::NonFiniteInput,
        };
    }

    let days = deadline.signed_duration_since(today).num_days();
    let months = days.div_euclid(DAYS_PER_MONTH).max(1);

    let needed = (target - current) / months as f64;
    if !needed.is_finite() {
        return Advice::Fallback {
            reason: FallbackReason::NonFiniteResult,
        };
    }

    Advice::Computed {
        monthly_amount: round_to(needed, 2),
        months,
    }
}
