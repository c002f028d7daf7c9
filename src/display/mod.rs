//! Display formatting for terminal output

pub mod expense;
pub mod report;

pub use expense::{
    format_category_list, format_date, format_expense_details, format_expense_list,
    format_expense_row,
};
pub use report::{format_bar, format_money, format_percentage, separator, truncate};
