//! Expense model
//!
//! A single recorded expense: a positive amount, a category label, a
//! description and the instant it happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::{Money, MoneyParseError};

/// Largest amount a single expense may carry (999,999,999.99)
pub const MAX_AMOUNT: Money = Money::from_cents(99_999_999_999);

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned key; `None` until persisted
    pub id: Option<ExpenseId>,

    /// Amount spent (always positive for valid records)
    pub amount: Money,

    /// Category label
    pub category: String,

    /// What the money was spent on
    pub description: String,

    /// When the expense happened
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create an unsaved expense dated now
    pub fn new(amount: Money, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_date(amount, category, description, Utc::now())
    }

    /// Create an unsaved expense with an explicit date
    pub fn with_date(
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            amount,
            category: category.into(),
            description: description.into(),
            date: truncate_to_millis(date),
        }
    }

    /// Whether the store has assigned this expense a key
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Date as milliseconds since the Unix epoch
    pub fn date_millis(&self) -> i64 {
        self.date.timestamp_millis()
    }

    /// Validate a record before it is written
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_amount(self.amount)?;

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// Convert stored milliseconds back into a timestamp
pub fn datetime_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Drop sub-millisecond precision so a record survives a store round-trip unchanged
pub fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    datetime_from_millis(date.timestamp_millis()).unwrap_or(date)
}

/// Parse a user-entered amount, accepting only strictly positive values
pub fn parse_amount(input: &str) -> Result<Money, ExpenseValidationError> {
    let amount = Money::parse(input).map_err(ExpenseValidationError::InvalidAmount)?;
    check_amount(amount)?;
    Ok(amount)
}

fn check_amount(amount: Money) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ExpenseValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    InvalidAmount(MoneyParseError),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyDescription,
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(e) => write!(f, "{}", e),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
