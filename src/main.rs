use anyhow::Result;
use clap::{Parser, Subcommand};

use gastos_cli::cli::{
    handle_add_command, handle_audit_command, handle_balance_command, handle_delete_command,
    handle_export_command, handle_import_command, handle_list_command, handle_months_command,
    handle_summary_command, AddCommands, ExportCommands, ImportCommands,
};
use gastos_cli::config::{paths::GastosPaths, settings::Settings};
use gastos_cli::models::MonthKey;
use gastos_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "gastos",
    version,
    about = "Monthly income and expense tracker",
    long_about = "gastos keeps your incomes and withdrawals in one CSV file per month. \
                  It can read the net pay from a payslip PDF and export any month \
                  to CSV or Excel. Run without a command to open the interactive interface."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Create the data directories, settings and the current month's file
    Init,

    /// Show current configuration and paths
    Config,

    /// Add an income or a withdrawal
    #[command(subcommand)]
    Add(AddCommands),

    /// List the movements of a month, newest first
    #[command(alias = "ls")]
    List {
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthKey>,
        /// Only show movements matching this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the balance of a month
    Balance {
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthKey>,
    },

    /// Show income and withdrawal totals, by category
    Summary {
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthKey>,
    },

    /// Delete the movement shown at row N by `list`
    #[command(alias = "rm")]
    Delete {
        /// Row number as shown by `list`
        row: usize,
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthKey>,
        /// Number rows within this search, as `list --search` does
        #[arg(short, long)]
        search: Option<String>,
        /// Delete without asking
        #[arg(short, long)]
        force: bool,
    },

    /// List the months that have data
    Months,

    /// Import movements from a payslip PDF or a CSV file
    #[command(subcommand)]
    Import(ImportCommands),

    /// Export a month to CSV or Excel
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = GastosPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        None | Some(Commands::Tui) => {
            gastos_cli::tui::run_tui(&storage, &settings)?;
        }
        Some(Commands::Init) => {
            println!("Initializing gastos at: {}", paths.base_dir().display());
            gastos_cli::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!(
                "Created {}",
                paths.month_file(&MonthKey::current()).display()
            );
            println!("Run 'gastos add income 100 \"Description\"' to record a movement.");
        }
        Some(Commands::Config) => {
            println!("gastos Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Default category: {}", settings.default_category);
            println!("  Payslip category: {}", settings.payslip_category);
            println!(
                "  Payslip range:    {} - {}",
                settings.payslip_min_amount, settings.payslip_max_amount
            );
        }
        Some(Commands::Add(cmd)) => {
            handle_add_command(&storage, &settings, cmd)?;
        }
        Some(Commands::List { month, search }) => {
            handle_list_command(&storage, &settings, month, search)?;
        }
        Some(Commands::Balance { month }) => {
            handle_balance_command(&storage, &settings, month)?;
        }
        Some(Commands::Summary { month }) => {
            handle_summary_command(&storage, &settings, month)?;
        }
        Some(Commands::Delete {
            row,
            month,
            search,
            force,
        }) => {
            handle_delete_command(&storage, &settings, row, month, search, force)?;
        }
        Some(Commands::Months) => {
            handle_months_command(&storage, &settings)?;
        }
        Some(Commands::Import(cmd)) => {
            handle_import_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&storage, count)?;
        }
    }

    Ok(())
}
