//! Movement display formatting
//!
//! Tables and summaries printed by the CLI.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, MonthKey, Movement};
use crate::services::MonthSummary;

use super::format::{format_header, format_money_colored, truncate};

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct MovementRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Fecha")]
    date: String,
    #[tabled(rename = "Tipo")]
    kind: &'static str,
    #[tabled(rename = "Descripción")]
    description: String,
    #[tabled(rename = "Monto")]
    amount: String,
    #[tabled(rename = "Categoría")]
    category: String,
}

/// Format movements as a numbered table
///
/// Row numbers start at 1 and are the ones `delete` accepts with the same
/// `--search`.
pub fn format_movement_table(movements: &[Movement], symbol: &str) -> String {
    if movements.is_empty() {
        return "No movements found.\n".to_string();
    }

    let rows = movements.iter().enumerate().map(|(i, m)| MovementRow {
        number: i + 1,
        date: m.formatted_timestamp(),
        kind: m.kind.label(),
        description: truncate(&m.description, DESCRIPTION_WIDTH),
        amount: m.amount.format_with_symbol(symbol),
        category: m.category.clone(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(4), Alignment::right());

    format!("{}\n", table)
}

/// Format a single movement on one line
pub fn format_movement_line(movement: &Movement, symbol: &str) -> String {
    format!(
        "{}  {:7}  {}  {}  [{}]",
        movement.formatted_timestamp(),
        movement.kind.label(),
        movement.description,
        movement.amount.format_with_symbol(symbol),
        movement.category
    )
}

/// Format the balance line for a month
pub fn format_balance(month: &MonthKey, balance: Money, symbol: &str) -> String {
    format!(
        "Balance {}: {}\n",
        month,
        format_money_colored(balance, symbol)
    )
}

/// Format a month summary with per-category totals
pub fn format_summary(summary: &MonthSummary, symbol: &str) -> String {
    let mut output = format_header(&format!("Summary for {}", summary.month), 48);

    output.push_str(&format!(
        "Income:      {:>16}\n",
        summary.income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Withdrawals: {:>16}\n",
        summary.withdrawals.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Balance:     {}\n",
        format_money_colored(summary.balance(), symbol)
    ));
    output.push_str(&format!("Movements:   {}\n", summary.count));

    if summary.skipped > 0 {
        output.push_str(&format!(
            "Skipped:     {} unreadable row(s)\n",
            summary.skipped
        ));
    }

    if !summary.by_category.is_empty() {
        output.push('\n');
        output.push_str(&format!(
            "{:20} {:>14} {:>14} {:>5}\n",
            "Category", "Income", "Withdrawals", "Rows"
        ));
        for total in &summary.by_category {
            output.push_str(&format!(
                "{:20} {:>14} {:>14} {:>5}\n",
                truncate(&total.category, 20),
                total.income.format_with_symbol(symbol),
                total.withdrawals.format_with_symbol(symbol),
                total.count
            ));
        }
    }

    output
}

/// Format the months that have data, with their movement count and balance
pub fn format_month_list(months: &[(MonthKey, usize, Money)], symbol: &str) -> String {
    if months.is_empty() {
        return "No months with data.\n".to_string();
    }

    let mut output = String::new();
    for (month, count, balance) in months {
        output.push_str(&format!(
            "{}  {:>4} movements  {:>16}\n",
            month,
            count,
            balance.format_with_symbol(symbol)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementKind;
    use crate::storage::MonthLedger;
    use chrono::NaiveDate;

    fn movements() -> Vec<Movement> {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        vec![
            Movement::new(ts, MovementKind::Income, "Nómina", Money::from_cents(123_456), "Nómina"),
            Movement::new(ts, MovementKind::Withdrawal, "Farmacia", Money::from_cents(990), "Salud"),
        ]
    }

    #[test]
    fn test_movement_table() {
        let table = format_movement_table(&movements(), "€");
        assert!(table.contains("Descripción"));
        assert!(table.contains("1234.56 €"));
        assert!(table.contains("9.90 €"));
        assert!(table.contains("2024-03-05 10:15"));
        assert!(table.contains("Retiro"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_movement_table(&[], "€"), "No movements found.\n");
    }

    #[test]
    fn test_movement_line() {
        let line = format_movement_line(&movements()[1], "€");
        assert!(line.starts_with("2024-03-05 10:15"));
        assert!(line.ends_with("9.90 €  [Salud]"));
    }

    #[test]
    fn test_summary() {
        let mut ledger = MonthLedger::new(MonthKey::new(2024, 3).unwrap());
        for m in movements() {
            ledger.push(m);
        }
        let text = format_summary(&MonthSummary::from_ledger(&ledger), "€");
        assert!(text.starts_with("Summary for 2024-03"));
        assert!(text.contains("1224.66 €"));
        assert!(text.contains("Salud"));
        assert!(!text.contains("Skipped"));
    }

    #[test]
    fn test_month_list() {
        let march = MonthKey::new(2024, 3).unwrap();
        let text = format_month_list(&[(march, 2, Money::from_cents(-500))], "€");
        assert!(text.contains("2024-03"));
        assert!(text.contains("-5.00 €"));
        assert_eq!(format_month_list(&[], "€"), "No months with data.\n");
    }
}
