//! Movement CLI commands
//!
//! Adding, listing, deleting and summarizing the movements of a month.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{
    format_balance, format_month_list, format_movement_line, format_movement_table,
    format_summary,
};
use crate::error::{GastosError, GastosResult};
use crate::models::{parse_timestamp, Money, MonthKey, MovementKind};
use crate::services::{compute_balance, CreateMovementInput, MonthSummary, MovementService};
use crate::storage::Storage;

/// Arguments shared by both kinds of movement
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount, e.g. "12.50" or "1.234,56"
    pub amount: String,
    /// Description
    pub description: String,
    /// Category (defaults to the configured default category)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Month file to write into (YYYY-MM); defaults to the date's month
    #[arg(short, long)]
    pub month: Option<MonthKey>,
    /// Date and time ("YYYY-MM-DD HH:MM"); defaults to now
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Add subcommands
#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Record money coming in
    #[command(alias = "ingreso")]
    Income(AddArgs),
    /// Record money going out
    #[command(aliases = ["retiro", "expense"])]
    Withdrawal(AddArgs),
}

/// Handle `add income|withdrawal`
pub fn handle_add_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AddCommands,
) -> GastosResult<()> {
    let (kind, args) = match cmd {
        AddCommands::Income(args) => (MovementKind::Income, args),
        AddCommands::Withdrawal(args) => (MovementKind::Withdrawal, args),
    };

    let amount = Money::parse(&args.amount)
        .map_err(|e| GastosError::Validation(e.to_string()))?;
    let timestamp = args
        .date
        .as_deref()
        .map(parse_timestamp)
        .transpose()
        .map_err(|e| GastosError::Validation(e.to_string()))?;

    let mut input = CreateMovementInput::new(kind, amount, args.description);
    input.category = args.category;
    input.timestamp = timestamp;
    input.month = args.month;

    let service =
        MovementService::new(storage).with_default_category(settings.default_category.clone());
    let (month, movement) = service.add(input)?;

    println!("Added to {}:", month);
    println!(
        "  {}",
        format_movement_line(&movement, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `list`
pub fn handle_list_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<MonthKey>,
    search: Option<String>,
) -> GastosResult<()> {
    let month = month.unwrap_or_else(MonthKey::current);
    let service = MovementService::new(storage);
    let movements = service.list(&month, search.as_deref())?;
    let balance = compute_balance(&service.month(&month)?.movements);

    if let Some(query) = search.as_deref().filter(|q| !q.trim().is_empty()) {
        println!("Movements of {} matching \"{}\":", month, query.trim());
    } else {
        println!("Movements of {}:", month);
    }
    print!(
        "{}",
        format_movement_table(&movements, &settings.currency_symbol)
    );
    print!(
        "{}",
        format_balance(&month, balance, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `balance`
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<MonthKey>,
) -> GastosResult<()> {
    let month = month.unwrap_or_else(MonthKey::current);
    let ledger = storage.ledger.read_month(&month)?;

    print!(
        "{}",
        format_balance(&month, compute_balance(&ledger.movements), &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `summary`
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<MonthKey>,
) -> GastosResult<()> {
    let month = month.unwrap_or_else(MonthKey::current);
    let ledger = storage.ledger.read_month(&month)?;

    print!(
        "{}",
        format_summary(&MonthSummary::from_ledger(&ledger), &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `delete`
///
/// `row` is numbered like `list` with the same `search`. Without `force`
/// only shows what would be removed.
pub fn handle_delete_command(
    storage: &Storage,
    settings: &Settings,
    row: usize,
    month: Option<MonthKey>,
    search: Option<String>,
    force: bool,
) -> GastosResult<()> {
    let month = month.unwrap_or_else(MonthKey::current);
    let service = MovementService::new(storage);
    let target = service.row(&month, row, search.as_deref())?;
    let line = format_movement_line(&target, &settings.currency_symbol);

    if !force {
        println!("This will delete from {}:", month);
        println!("  {}", line);
        println!();
        println!("Identical rows are deleted together.");
        println!("To proceed, run again with --force flag:");
        match search.as_deref().filter(|q| !q.trim().is_empty()) {
            Some(query) => println!(
                "  gastos delete {} --month {} --search \"{}\" --force",
                row,
                month,
                query.trim()
            ),
            None => println!("  gastos delete {} --month {} --force", row, month),
        }
        return Ok(());
    }

    let removed = service.delete_matching(&month, &target)?;
    println!("Deleted {} row(s) from {}:", removed, month);
    println!("  {}", line);
    Ok(())
}

/// Handle `months`
pub fn handle_months_command(storage: &Storage, settings: &Settings) -> GastosResult<()> {
    let mut rows = Vec::new();
    for month in storage.ledger.list_months()? {
        let ledger = storage.ledger.read_month(&month)?;
        rows.push((month, ledger.len(), compute_balance(&ledger.movements)));
    }

    print!("{}", format_month_list(&rows, &settings.currency_symbol));
    Ok(())
}
