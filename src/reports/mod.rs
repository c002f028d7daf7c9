//! Reports module for ControlFast
//!
//! The aggregation engine, calendar month boundaries and the summary
//! report built on top of them.

pub mod aggregate;
pub mod month;
pub mod summary;

pub use aggregate::{
    compute_category_totals, compute_statistics, compute_total, filter_by_date_range,
    CategoryTotal, ExpenseStatistics, TOP_CATEGORY_NONE,
};
pub use month::{end_of_current_month, start_of_current_month};
pub use summary::{CategoryShare, SummaryReport};
