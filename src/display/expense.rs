//! Expense display formatting

use chrono::{DateTime, Local, Utc};

use crate::config::Settings;
use crate::models::{DefaultCategory, Expense};

use super::report::{format_money, truncate};

/// Format a timestamp in local time using the configured date format
pub fn format_date(date: &DateTime<Utc>, date_format: &str) -> String {
    date.with_timezone(&Local).format(date_format).to_string()
}

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, settings: &Settings) -> String {
    let id = expense
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<8} {:<10} {:<15} {:<28} {:>12}",
        id,
        format_date(&expense.date, &settings.date_format),
        truncate(&expense.category, 15),
        truncate(&expense.description, 28),
        format_money(expense.amount, &settings.currency_symbol)
    )
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<10} {:<15} {:<28} {:>12}\n",
        "ID", "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(77));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, settings));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    if let Some(id) = expense.id {
        output.push_str(&format!("Expense:     {}\n", id));
    }
    output.push_str(&format!(
        "Date:        {}\n",
        expense
            .date
            .with_timezone(&Local)
            .format(&format!("{} %H:%M", settings.date_format))
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_money(expense.amount, &settings.currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Description: {}\n", expense.description));

    output
}

/// List the suggested categories with their chart colors
pub fn format_category_list() -> String {
    let mut output = String::from("Categories:\n");
    for category in DefaultCategory::all() {
        output.push_str(&format!("  {:<15} {}\n", category.display_name(), category.color()));
    }
    output.push_str("\nAny other label is accepted as a custom category.\n");
    output
}
