//! Expense aggregation engine
//!
//! Pure functions turning a snapshot of expenses into totals, per-category
//! sums and summary statistics. Nothing here touches storage or keeps state,
//! so the same snapshot always yields the same result.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Expense, Money};

/// Label shown when there is no top category (empty input)
pub const TOP_CATEGORY_NONE: &str = "N/A";

/// Sum of amounts for one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total: Money) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }
}

/// Summary statistics over a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseStatistics {
    pub total: Money,
    /// Mean amount in major currency units (0 for an empty snapshot)
    pub average: f64,
    pub count: usize,
    /// Category with the largest summed amount; `None` for an empty snapshot
    pub top_category: Option<String>,
}

impl ExpenseStatistics {
    /// Top category label, or `N/A` when there is none
    pub fn top_category_label(&self) -> &str {
        self.top_category.as_deref().unwrap_or(TOP_CATEGORY_NONE)
    }
}

impl Default for ExpenseStatistics {
    fn default() -> Self {
        Self {
            total: Money::zero(),
            average: 0.0,
            count: 0,
            top_category: None,
        }
    }
}

/// Sum of all amounts; zero for an empty snapshot
pub fn compute_total(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Per-category sums, one entry per label present in the input
///
/// Labels are grouped by exact match and returned in ascending label order.
/// Callers wanting another order (largest first, say) sort the result.
pub fn compute_category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.as_str()).or_default() += expense.amount;
    }

    totals
        .into_iter()
        .map(|(category, total)| CategoryTotal::new(category, total))
        .collect()
}

/// The category with the largest total
///
/// Ties go to the label that sorts first.
pub fn top_category(totals: &[CategoryTotal]) -> Option<&CategoryTotal> {
    totals.iter().fold(None, |best: Option<&CategoryTotal>, candidate| match best {
        Some(current)
            if current.total > candidate.total
                || (current.total == candidate.total && current.category <= candidate.category) =>
        {
            Some(current)
        }
        _ => Some(candidate),
    })
}

/// Total, average, count and top category of a snapshot
pub fn compute_statistics(expenses: &[Expense]) -> ExpenseStatistics {
    if expenses.is_empty() {
        return ExpenseStatistics::default();
    }

    let total = compute_total(expenses);
    let count = expenses.len();
    let totals = compute_category_totals(expenses);

    ExpenseStatistics {
        total,
        average: total.as_decimal() / count as f64,
        count,
        top_category: top_category(&totals).map(|t| t.category.clone()),
    }
}

/// Expenses dated within `[start, end]`, both bounds inclusive
pub fn filter_by_date_range(
    expenses: &[Expense],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expense(cents: i64, category: &str) -> Expense {
        Expense::new(Money::from_cents(cents), category, "test")
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(2550, "Food"),
            expense(1500, "Transport"),
            expense(5000, "Entertainment"),
        ]
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(compute_total(&[]), Money::zero());
    }

    #[test]
    fn test_total() {
        assert_eq!(compute_total(&sample()), Money::from_cents(9050));
    }

    #[test]
    fn test_total_of_extreme_amounts_does_not_wrap() {
        let huge = vec![expense(i64::MAX / 2 + 1, "Food"), expense(i64::MAX / 2 + 1, "Food")];

        let total = compute_total(&huge);
        assert_eq!(total, Money::from_cents(i64::MAX));

        let totals = compute_category_totals(&huge);
        assert_eq!(totals[0].total, Money::from_cents(i64::MAX));
        assert!(compute_statistics(&huge).average > 0.0);
    }

    #[test]
    fn test_statistics() {
        let stats = compute_statistics(&sample());
        assert_eq!(stats.total, Money::from_cents(9050));
        assert_eq!(stats.count, 3);
        assert!((stats.average - 30.166_666_666).abs() < 1e-6);
        assert_eq!(stats.top_category.as_deref(), Some("Entertainment"));
    }

    #[test]
    fn test_statistics_of_empty_input() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total, Money::zero());
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.top_category, None);
        assert_eq!(stats.top_category_label(), "N/A");
    }

    #[test]
    fn test_category_totals_partition_input() {
        let mut expenses = sample();
        expenses.push(expense(1000, "Food"));
        expenses.push(expense(725, "Health"));

        let totals = compute_category_totals(&expenses);
        let summed: Money = totals.iter().map(|t| t.total).sum();
        assert_eq!(summed, compute_total(&expenses));

        let labels: Vec<_> = totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(labels, vec!["Entertainment", "Food", "Health", "Transport"]);
        assert_eq!(totals[1], CategoryTotal::new("Food", Money::from_cents(3550)));
    }

    #[test]
    fn test_category_grouping_is_exact_match() {
        let expenses = vec![expense(100, "Food"), expense(200, "food")];
        assert_eq!(compute_category_totals(&expenses).len(), 2);
    }

    #[test]
    fn test_category_totals_of_empty_input() {
        assert!(compute_category_totals(&[]).is_empty());
    }

    #[test]
    fn test_top_category_tie_goes_to_first_label() {
        let expenses = vec![
            expense(1000, "Transport"),
            expense(1000, "Food"),
            expense(400, "Health"),
        ];
        assert_eq!(
            compute_statistics(&expenses).top_category.as_deref(),
            Some("Food")
        );

        let reversed: Vec<_> = expenses.into_iter().rev().collect();
        assert_eq!(
            compute_statistics(&reversed).top_category.as_deref(),
            Some("Food")
        );
    }

    #[test]
    fn test_top_category_of_unsorted_totals() {
        let totals = vec![
            CategoryTotal::new("Shopping", Money::from_cents(500)),
            CategoryTotal::new("Bills", Money::from_cents(500)),
            CategoryTotal::new("Food", Money::from_cents(100)),
        ];
        assert_eq!(top_category(&totals).unwrap().category, "Bills");
        assert!(top_category(&[]).is_none());
    }

    #[test]
    fn test_filter_by_date_range_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();
        let dated = |cents, date| Expense::with_date(Money::from_cents(cents), "Food", "x", date);

        let expenses = vec![
            dated(100, start),
            dated(200, end),
            dated(300, start - chrono::Duration::milliseconds(1)),
            dated(400, end + chrono::Duration::milliseconds(1)),
            dated(500, Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()),
        ];

        let filtered = filter_by_date_range(&expenses, start, end);
        let amounts: Vec<_> = filtered.iter().map(|e| e.amount.cents()).collect();
        assert_eq!(amounts, vec![100, 200, 500]);
    }

    #[test]
    fn test_filter_with_inverted_range_is_empty() {
        let start = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(filter_by_date_range(&sample(), start, end).is_empty());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let expenses = sample();
        assert_eq!(compute_total(&expenses), compute_total(&expenses));
        assert_eq!(
            compute_category_totals(&expenses),
            compute_category_totals(&expenses)
        );
        assert_eq!(compute_statistics(&expenses), compute_statistics(&expenses));
    }

    #[test]
    fn test_order_does_not_change_results() {
        let expenses = sample();
        let reversed: Vec<_> = expenses.iter().rev().cloned().collect();
        assert_eq!(compute_total(&expenses), compute_total(&reversed));
        assert_eq!(
            compute_category_totals(&expenses),
            compute_category_totals(&reversed)
        );
    }
}
