//! Movement search
//!
//! Case-insensitive substring match over the visible fields of a movement.

use crate::models::Movement;

/// Whether any visible field of `movement` contains `query`
///
/// `query` must already be lowercase.
fn matches_lowercase(movement: &Movement, query: &str) -> bool {
    movement.description.to_lowercase().contains(query)
        || movement.kind.label().to_lowercase().contains(query)
        || movement.formatted_timestamp().contains(query)
        || movement.category.to_lowercase().contains(query)
}

/// Keep the movements matching `query`, in their given order
pub fn filter_movements(movements: &[Movement], query: &str) -> Vec<Movement> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return movements.to_vec();
    }

    movements
        .iter()
        .filter(|m| matches_lowercase(m, &query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MovementKind};
    use chrono::NaiveDate;

    fn sample() -> Vec<Movement> {
        let ts = |d: u32| {
            NaiveDate::from_ymd_opt(2024, 3, d)
                .unwrap()
                .and_hms_opt(18, 45, 0)
                .unwrap()
        };
        vec![
            Movement::new(ts(1), MovementKind::Income, "Nómina marzo", Money::from_cents(150_000), "Nómina"),
            Movement::new(ts(4), MovementKind::Withdrawal, "Mercadona", Money::from_cents(6_420), "Supermercado"),
            Movement::new(ts(12), MovementKind::Withdrawal, "Cine", Money::from_cents(1_800), "Ocio"),
        ]
    }

    fn descriptions(movements: &[Movement]) -> Vec<&str> {
        movements.iter().map(|m| m.description.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        assert_eq!(filter_movements(&sample(), "").len(), 3);
        assert_eq!(filter_movements(&sample(), "   ").len(), 3);
    }

    #[test]
    fn test_matches_description_case_insensitive() {
        let found = filter_movements(&sample(), "MERCA");
        assert_eq!(descriptions(&found), vec!["Mercadona"]);
    }

    #[test]
    fn test_matches_kind_label() {
        let found = filter_movements(&sample(), "retiro");
        assert_eq!(descriptions(&found), vec!["Mercadona", "Cine"]);
    }

    #[test]
    fn test_matches_formatted_date() {
        let found = filter_movements(&sample(), "2024-03-12");
        assert_eq!(descriptions(&found), vec!["Cine"]);

        assert_eq!(filter_movements(&sample(), "18:45").len(), 3);
    }

    #[test]
    fn test_matches_category_with_accents() {
        let found = filter_movements(&sample(), "NÓMINA");
        assert_eq!(descriptions(&found), vec!["Nómina marzo"]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_movements(&sample(), "gasolina").is_empty());
    }
}
