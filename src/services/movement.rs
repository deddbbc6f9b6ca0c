//! Movement service
//!
//! Adding, listing and deleting movements of a month, with audit logging.

use chrono::{Local, NaiveDateTime};

use crate::audit::EntityType;
use crate::error::{GastosError, GastosResult};
use crate::models::{Money, MonthKey, Movement, MovementKind, DEFAULT_CATEGORY};
use crate::storage::{MonthLedger, Storage};

use super::search::filter_movements;

/// Service for movement management
pub struct MovementService<'a> {
    storage: &'a Storage,
    default_category: String,
}

/// Input for creating a new movement
#[derive(Debug, Clone)]
pub struct CreateMovementInput {
    pub kind: MovementKind,
    pub amount: Money,
    pub description: String,
    pub category: Option<String>,
    /// Defaults to now
    pub timestamp: Option<NaiveDateTime>,
    /// Month file to write into; defaults to the timestamp's month
    pub month: Option<MonthKey>,
}

impl CreateMovementInput {
    pub fn new(kind: MovementKind, amount: Money, description: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            category: None,
            timestamp: None,
            month: None,
        }
    }
}

impl<'a> MovementService<'a> {
    /// Create a new movement service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Category used when an input leaves it empty
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Add a movement, returning it with the month it was written to
    pub fn add(&self, input: CreateMovementInput) -> GastosResult<(MonthKey, Movement)> {
        if !input.amount.is_positive() {
            return Err(GastosError::Validation(format!(
                "Amount must be greater than zero (got {})",
                input.amount
            )));
        }

        if input.description.trim().is_empty() {
            return Err(GastosError::Validation(
                "Description cannot be empty".into(),
            ));
        }

        let timestamp = input
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());
        let month = input
            .month
            .unwrap_or_else(|| MonthKey::of_timestamp(timestamp));
        let category = input
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.default_category.clone());

        let movement = Movement::new(
            timestamp,
            input.kind,
            input.description,
            input.amount,
            category,
        );
        movement
            .validate()
            .map_err(|e| GastosError::Validation(e.to_string()))?;

        self.storage.ledger.append(&month, &movement)?;

        self.storage.log_create(
            EntityType::Movement,
            &month,
            Some(movement.description.clone()),
            &movement,
        )?;

        log::info!("Added {} to {}", movement, month);
        Ok((month, movement))
    }

    /// Read the whole month in file order
    pub fn month(&self, month: &MonthKey) -> GastosResult<MonthLedger> {
        self.storage.ledger.read_month(month)
    }

    /// Movements of a month newest first, optionally filtered by a search query
    ///
    /// This is the order rows are numbered in for `delete_row`.
    pub fn list(&self, month: &MonthKey, query: Option<&str>) -> GastosResult<Vec<Movement>> {
        let movements = self.month(month)?.newest_first();
        Ok(match query {
            Some(query) => filter_movements(&movements, query),
            None => movements,
        })
    }

    /// Delete every movement of the month matching `target` in all fields
    ///
    /// Returns the number of rows removed. Identical duplicates are removed
    /// together.
    pub fn delete_matching(&self, month: &MonthKey, target: &Movement) -> GastosResult<usize> {
        let mut ledger = self.month(month)?;
        let removed = ledger.remove_matching(target);

        if removed == 0 {
            return Err(GastosError::movement_not_found(target.to_string()));
        }

        self.storage.ledger.overwrite(&ledger)?;

        self.storage.log_delete(
            EntityType::Movement,
            month,
            Some(format!("{} ({} rows)", target.description, removed)),
            target,
        )?;

        log::info!("Deleted {} row(s) matching {} from {}", removed, target, month);
        Ok(removed)
    }

    /// Delete the movement shown at 1-based `row` of `list(month, query)`
    pub fn delete_row(
        &self,
        month: &MonthKey,
        row: usize,
        query: Option<&str>,
    ) -> GastosResult<(Movement, usize)> {
        let target = self.row(month, row, query)?;
        let removed = self.delete_matching(month, &target)?;
        Ok((target, removed))
    }

    /// The movement shown at 1-based `row` of `list(month, query)`
    pub fn row(&self, month: &MonthKey, row: usize, query: Option<&str>) -> GastosResult<Movement> {
        let movements = self.list(month, query)?;
        row.checked_sub(1)
            .and_then(|i| movements.get(i))
            .cloned()
            .ok_or_else(|| GastosError::movement_not_found(format!("row {} of {}", row, month)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::GastosPaths;
    use crate::services::balance::compute_balance;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn input(kind: MovementKind, cents: i64, desc: &str, day: u32) -> CreateMovementInput {
        let mut input = CreateMovementInput::new(kind, Money::from_cents(cents), desc);
        input.timestamp = NaiveDate::from_ymd_opt(2024, 3, day).and_then(|d| d.and_hms_opt(12, 0, 0));
        input
    }

    #[test]
    fn test_add_writes_to_timestamp_month() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);

        let (month, movement) = service
            .add(input(MovementKind::Income, 150_000, "Salary", 1))
            .unwrap();

        assert_eq!(month, march());
        assert_eq!(movement.category, "General");
        assert_eq!(service.month(&march()).unwrap().movements, vec![movement]);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Create);
        assert_eq!(audit[0].entity_id, "2024-03");
    }

    #[test]
    fn test_add_uses_forced_month_and_default_category() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage).with_default_category("Varios");
        let april = MonthKey::new(2024, 4).unwrap();

        let mut add = input(MovementKind::Withdrawal, 500, "Coffee", 30);
        add.month = Some(april);
        let (month, movement) = service.add(add).unwrap();

        assert_eq!(month, april);
        assert_eq!(movement.category, "Varios");
        assert!(service.month(&march()).unwrap().is_empty());
        assert_eq!(service.month(&april).unwrap().len(), 1);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);

        let zero = service.add(input(MovementKind::Income, 0, "Nothing", 1));
        assert!(zero.unwrap_err().is_validation());

        let negative = service.add(input(MovementKind::Income, -100, "Refund", 1));
        assert!(negative.unwrap_err().is_validation());

        let blank = service.add(input(MovementKind::Income, 100, "  ", 1));
        assert!(blank.unwrap_err().is_validation());

        assert!(!storage.ledger.exists(&march()));
    }

    #[test]
    fn test_balance_follows_adds() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);
        service.add(input(MovementKind::Income, 100_000, "Salary", 1)).unwrap();
        let prior = compute_balance(&service.month(&march()).unwrap().movements);

        service.add(input(MovementKind::Income, 2_050, "Bizum", 2)).unwrap();
        service.add(input(MovementKind::Withdrawal, 7_525, "Luz", 3)).unwrap();

        let after = compute_balance(&service.month(&march()).unwrap().movements);
        assert_eq!(after, prior + Money::from_cents(2_050) - Money::from_cents(7_525));
    }

    #[test]
    fn test_list_newest_first_and_filtered() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);
        service.add(input(MovementKind::Income, 100_000, "Salary", 1)).unwrap();
        service.add(input(MovementKind::Withdrawal, 3_000, "Dinner", 20)).unwrap();
        service.add(input(MovementKind::Withdrawal, 1_500, "Taxi", 10)).unwrap();

        let all = service.list(&march(), None).unwrap();
        let order: Vec<_> = all.iter().map(|m| m.description.as_str()).collect();
        assert_eq!(order, vec!["Dinner", "Taxi", "Salary"]);

        let filtered = service.list(&march(), Some("taxi")).unwrap();
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_delete_row_removes_identical_duplicates() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);
        service.add(input(MovementKind::Withdrawal, 250, "Coffee", 5)).unwrap();
        service.add(input(MovementKind::Withdrawal, 250, "Coffee", 5)).unwrap();
        service.add(input(MovementKind::Withdrawal, 250, "Coffee", 4)).unwrap();

        let (deleted, removed) = service.delete_row(&march(), 1, None).unwrap();
        assert_eq!(deleted.description, "Coffee");
        assert_eq!(removed, 2);

        let left = service.month(&march()).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left.movements[0].timestamp.format("%d").to_string(), "04");

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.last().unwrap().operation, Operation::Delete);
    }

    #[test]
    fn test_delete_row_numbers_within_search() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);
        service.add(input(MovementKind::Income, 100_000, "Salary", 1)).unwrap();
        service.add(input(MovementKind::Withdrawal, 3_000, "Dinner", 20)).unwrap();
        service.add(input(MovementKind::Withdrawal, 1_500, "Taxi", 10)).unwrap();

        let (deleted, removed) = service.delete_row(&march(), 1, Some("taxi")).unwrap();
        assert_eq!(deleted.description, "Taxi");
        assert_eq!(removed, 1);

        let left: Vec<_> = service
            .list(&march(), None)
            .unwrap()
            .into_iter()
            .map(|m| m.description)
            .collect();
        assert_eq!(left, vec!["Dinner", "Salary"]);

        assert!(service
            .delete_row(&march(), 1, Some("taxi"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_row_out_of_range() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);
        service.add(input(MovementKind::Income, 100, "One", 1)).unwrap();

        assert!(service.delete_row(&march(), 0, None).unwrap_err().is_not_found());
        assert!(service.delete_row(&march(), 2, None).unwrap_err().is_not_found());
        assert_eq!(service.month(&march()).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_matching_missing() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);
        let ghost = Movement::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            MovementKind::Income,
            "Ghost",
            Money::from_cents(100),
            "General",
        );

        assert!(service.delete_matching(&march(), &ghost).unwrap_err().is_not_found());
    }
}
