//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod expense;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::{ControlFastError, ControlFastResult};
use crate::reports::month::day_bounds;

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date_arg(value: &str) -> ControlFastResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ControlFastError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", value))
    })
}

/// Local midnight at the start of the given day
pub(crate) fn start_of_day(value: &str) -> ControlFastResult<DateTime<Utc>> {
    let (start, _) = day_bounds(&Local, parse_date_arg(value)?);
    Ok(start.with_timezone(&Utc))
}

/// Last local millisecond of the given day
pub(crate) fn end_of_day(value: &str) -> ControlFastResult<DateTime<Utc>> {
    let (_, end) = day_bounds(&Local, parse_date_arg(value)?);
    Ok(end.with_timezone(&Utc))
}
