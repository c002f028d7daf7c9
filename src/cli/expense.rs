//! Expense CLI commands
//!
//! Recording, listing, editing and removing expenses.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::display::report::format_money;
use crate::error::{ControlFastError, ControlFastResult};
use crate::models::{parse_amount, ExpenseId, Money};
use crate::reports::month::{end_of_current_month, start_of_current_month};
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
use crate::storage::Storage;

use super::{end_of_day, start_of_day};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g. "25.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Category label (defaults to the configured default category)
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long, conflicts_with = "month")]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long, conflicts_with = "month")]
        to: Option<String>,
        /// Only the current month
        #[arg(short, long)]
        month: bool,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID (e.g. "7" or "exp-7")
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Delete every expense
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn amount_arg(value: &str) -> ControlFastResult<Money> {
    parse_amount(value).map_err(|e| {
        ControlFastError::Validation(format!("Invalid amount '{}': {}", value, e))
    })
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ControlFastResult<()> {
    let service = ExpenseService::new(storage).with_default_category(&settings.default_category);

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
        } => {
            let mut input = CreateExpenseInput::new(amount_arg(&amount)?, description);
            if let Some(category) = category {
                input = input.category(category);
            }
            if let Some(date) = date {
                input = input.date(start_of_day(&date)?);
            }

            let expense = service.create(input)?;

            println!("Recorded expense:");
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::List {
            category,
            from,
            to,
            month,
            limit,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit.unwrap_or(settings.list_limit));

            if let Some(category) = category {
                filter = filter.category(category);
            }

            if month {
                filter = filter.date_range(start_of_current_month(), end_of_current_month());
            }
            if let Some(from) = from {
                filter = filter.since(start_of_day(&from)?);
            }
            if let Some(to) = to {
                filter = filter.until(end_of_day(&to)?);
            }

            let expenses = service.list(filter)?;
            print!("{}", format_expense_list(&expenses, settings));

            if !expenses.is_empty() {
                let shown: Money = expenses.iter().map(|e| e.amount).sum();
                println!(
                    "\nShowing {} expense(s), {}",
                    expenses.len(),
                    format_money(shown, &settings.currency_symbol)
                );
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.require(&id)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => {
            let existing = service.require(&id)?;
            let expense_id = existing.id.ok_or_else(|| ControlFastError::expense_not_found(&id))?;

            let input = UpdateExpenseInput {
                amount: amount.as_deref().map(amount_arg).transpose()?,
                category,
                description,
                date: date.as_deref().map(start_of_day).transpose()?,
            };

            if input.is_empty() {
                return Err(ControlFastError::Validation(
                    "Nothing to change. Pass --amount, --category, --description or --date".into(),
                ));
            }

            let updated = service.update(expense_id, input)?;
            println!("Updated expense:");
            print!("{}", format_expense_details(&updated, settings));
        }

        ExpenseCommands::Delete { id, force } => {
            let expense = service.require(&id)?;
            let expense_id: ExpenseId = expense
                .id
                .ok_or_else(|| ControlFastError::expense_not_found(&id))?;

            if !force {
                println!("About to delete:");
                print!("{}", format_expense_details(&expense, settings));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let removed = service.delete(expense_id)?;
            println!("Deleted expense {} ({})", expense_id, removed.description);
        }

        ExpenseCommands::Clear { force } => {
            if !force {
                let count = storage.expenses.count()?;
                println!("About to delete all {} expense(s).", count);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let removed = service.delete_all()?;
            println!("Deleted {} expense(s)", removed);
        }
    }

    Ok(())
}
