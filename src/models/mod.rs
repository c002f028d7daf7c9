//! Core data models for ControlFast
//!
//! The expense record, its key and amount types, and the suggested
//! category labels.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{normalize_category, DefaultCategory};
pub use expense::{parse_amount, Expense, ExpenseValidationError, MAX_AMOUNT};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
