//! Service layer for ControlFast
//!
//! Business logic on top of the storage layer: input validation, audit
//! logging and snapshot publishing.

pub mod expense;
pub mod feed;

pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
pub use feed::{Snapshot, SnapshotFeed, Subscription};
