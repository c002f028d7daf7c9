use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use controlfast::cli::{
    handle_expense_command, handle_report_command, ExpenseCommands, ReportCommands,
};
use controlfast::config::{paths::ControlFastPaths, settings::Settings};
use controlfast::storage::Storage;

#[derive(Parser)]
#[command(
    name = "controlfast",
    version,
    about = "Personal expense tracker",
    long_about = "ControlFast records everyday expenses and summarizes them \
                  by category, month and overall statistics."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ControlFastPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("ControlFast Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Database:       {}", paths.database_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default category: {}", settings.default_category);
            println!("  List limit:       {}", settings.list_limit);
            println!("  Log level:        {}", settings.log_level);
        }
        None => {
            println!("ControlFast - personal expense tracker");
            println!();
            println!("Run 'controlfast --help' for usage information.");
            println!("Run 'controlfast add 25.50 Lunch -c Food' to record an expense.");
        }
    }

    Ok(())
}
