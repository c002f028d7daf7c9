//! ControlFast - personal expense tracker
//!
//! Records individual expenses (amount, category, description, date) in a
//! local SQLite store and summarizes them: totals, per-category breakdowns
//! and simple statistics.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expense, money and category types
//! - `storage`: SQLite expense store, bundled with the audit journal and snapshot feed
//! - `reports`: Aggregation engine, month boundaries and the summary report
//! - `services`: Business logic and snapshot publish/subscribe
//! - `audit`: Append-only audit journal
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use controlfast::models::Money;
//! use controlfast::reports::compute_statistics;
//! use controlfast::services::{CreateExpenseInput, ExpenseService};
//! use controlfast::storage::Storage;
//!
//! let storage = Storage::in_memory()?;
//! let service = ExpenseService::new(&storage);
//! service.create(CreateExpenseInput::new(Money::from_cents(2550), "Lunch").category("Food"))?;
//!
//! let stats = compute_statistics(&service.snapshot()?);
//! assert_eq!(stats.count, 1);
//! # Ok::<(), controlfast::ControlFastError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ControlFastError, ControlFastResult};
