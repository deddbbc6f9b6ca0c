//! Balance calculation
//!
//! Totals for one month: income minus withdrawals, plus per-category
//! breakdown for the summary view.

use std::collections::BTreeMap;

use crate::models::{Money, MonthKey, Movement, MovementKind};
use crate::storage::MonthLedger;

/// Sum of incomes minus sum of withdrawals
pub fn compute_balance(movements: &[Movement]) -> Money {
    movements.iter().map(Movement::signed_amount).sum()
}

/// Income and withdrawal totals for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub income: Money,
    pub withdrawals: Money,
    pub count: usize,
}

impl CategoryTotal {
    pub fn net(&self) -> Money {
        self.income - self.withdrawals
    }
}

/// Totals for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub income: Money,
    pub withdrawals: Money,
    pub count: usize,
    /// Rows on disk that were not counted
    pub skipped: usize,
    /// Sorted by category name
    pub by_category: Vec<CategoryTotal>,
}

impl MonthSummary {
    /// Build the summary of a ledger
    pub fn from_ledger(ledger: &MonthLedger) -> Self {
        let mut income = Money::zero();
        let mut withdrawals = Money::zero();
        let mut categories: BTreeMap<&str, CategoryTotal> = BTreeMap::new();

        for movement in &ledger.movements {
            let total = categories
                .entry(movement.category.as_str())
                .or_insert_with(|| CategoryTotal {
                    category: movement.category.clone(),
                    income: Money::zero(),
                    withdrawals: Money::zero(),
                    count: 0,
                });
            total.count += 1;

            match movement.kind {
                MovementKind::Income => {
                    income += movement.amount;
                    total.income += movement.amount;
                }
                MovementKind::Withdrawal => {
                    withdrawals += movement.amount;
                    total.withdrawals += movement.amount;
                }
            }
        }

        Self {
            month: ledger.month,
            income,
            withdrawals,
            count: ledger.movements.len(),
            skipped: ledger.malformed.len(),
            by_category: categories.into_values().collect(),
        }
    }

    /// Income minus withdrawals
    pub fn balance(&self) -> Money {
        self.income - self.withdrawals
    }
}
