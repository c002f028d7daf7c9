//! CLI commands for reports
//!
//! Summaries, statistics, the category list and the audit history.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::format_category_list;
use crate::display::report::{format_money, separator};
use crate::error::ControlFastResult;
use crate::reports::month::{end_of_current_month, month_label, start_of_current_month};
use crate::reports::SummaryReport;
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{end_of_day, start_of_day};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals and per-category breakdown
    Summary {
        /// Only the current month
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        month: bool,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,
    },
    /// Total, average, count and top category of all expenses
    Stats,
    /// Suggested categories and the totals of categories in use
    Categories,
    /// Recent changes from the audit journal
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ControlFastResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { month, from, to } => {
            let (expenses, label) = if month {
                let expenses = service.list(
                    ExpenseFilter::new().date_range(start_of_current_month(), end_of_current_month()),
                )?;
                (expenses, month_label(&Local::now()))
            } else if from.is_some() || to.is_some() {
                let mut filter = ExpenseFilter::new();
                if let Some(from) = &from {
                    filter = filter.since(start_of_day(from)?);
                }
                if let Some(to) = &to {
                    filter = filter.until(end_of_day(to)?);
                }
                let label = format!(
                    "{} to {}",
                    from.as_deref().unwrap_or("beginning"),
                    to.as_deref().unwrap_or("now")
                );
                (service.list(filter)?, label)
            } else {
                (service.snapshot()?, "All time".to_string())
            };

            let report = SummaryReport::generate(&expenses, label);
            print!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Stats => {
            let stats = service.statistics()?;
            println!("Statistics");
            println!("{}", separator(30));
            println!("Total:        {}", format_money(stats.total, symbol));
            println!("Average:      {}{:.2}", symbol, stats.average);
            println!("Count:        {}", stats.count);
            println!("Top category: {}", stats.top_category_label());
        }

        ReportCommands::Categories => {
            print!("{}", format_category_list());

            let totals = service.category_totals()?;
            if !totals.is_empty() {
                println!();
                println!("In use:");
                for total in totals {
                    println!("  {:<15} {:>12}", total.category, format_money(total.total, symbol));
                }
            }
        }

        ReportCommands::History { count } => {
            let entries = storage.audit.read_recent(count)?;
            if entries.is_empty() {
                println!("No history recorded.");
            } else {
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
    }

    Ok(())
}
