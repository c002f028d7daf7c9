//! Summary Report
//!
//! Statistics plus a per-category breakdown with each category's share of
//! the total, the data behind the summary screen's pie chart.

use crate::display::report::{format_bar, format_percentage, truncate};
use crate::models::{DefaultCategory, Expense, Money};

use super::aggregate::{compute_category_totals, compute_statistics, ExpenseStatistics};

const BAR_WIDTH: usize = 20;

/// One slice of the category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Share of the report total, 0-100
    pub percentage: f64,
}

impl CategoryShare {
    /// Chart color of this slice
    pub fn color(&self) -> &'static str {
        DefaultCategory::color_for(&self.category)
    }
}

/// Summary of a set of expenses
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// What the report covers, e.g. `March 2025` or `All time`
    pub label: String,
    pub statistics: ExpenseStatistics,
    /// Largest first; equal totals ordered by label
    pub breakdown: Vec<CategoryShare>,
}

impl SummaryReport {
    /// Build a report over `expenses`
    pub fn generate(expenses: &[Expense], label: impl Into<String>) -> Self {
        let statistics = compute_statistics(expenses);

        let mut breakdown: Vec<CategoryShare> = compute_category_totals(expenses)
            .into_iter()
            .map(|t| CategoryShare {
                count: expenses.iter().filter(|e| e.category == t.category).count(),
                percentage: t.total.percentage_of(statistics.total),
                category: t.category,
                total: t.total,
            })
            .collect();

        // Stable sort keeps the label order from the engine for equal totals
        breakdown.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            label: label.into(),
            statistics,
            breakdown,
        }
    }

    /// Largest single category total (zero when empty)
    pub fn largest_category_total(&self) -> Money {
        self.breakdown
            .first()
            .map(|s| s.total)
            .unwrap_or_else(Money::zero)
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.count == 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let stats = &self.statistics;
        let mut output = String::new();

        output.push_str(&format!("Expense Summary: {}\n", self.label));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Total:        {}\n",
            stats.total.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Average:      {}{:.2}\n",
            currency_symbol, stats.average
        ));
        output.push_str(&format!("Expenses:     {}\n", stats.count));
        output.push_str(&format!("Top category: {}\n", stats.top_category_label()));
        output.push_str(&format!(
            "Largest category total: {}\n",
            self.largest_category_total().format_with_symbol(currency_symbol)
        ));

        if self.breakdown.is_empty() {
            output.push_str("\nNo expenses recorded.\n");
            return output;
        }

        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>6} {:>6}  {}\n",
            "Category", "Amount", "Count", "%", "Share"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        let max = self.largest_category_total().cents() as f64;
        for share in &self.breakdown {
            output.push_str(&format!(
                "{:<20} {:>12} {:>6} {:>6}  {}\n",
                truncate(&share.category, 20),
                share.total.format_with_symbol(currency_symbol),
                share.count,
                format_percentage(share.percentage),
                format_bar(share.total.cents() as f64, max, BAR_WIDTH)
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>6}\n",
            "TOTAL",
            stats.total.format_with_symbol(currency_symbol),
            stats.count
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(cents: i64, category: &str) -> Expense {
        Expense::new(Money::from_cents(cents), category, "test")
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(2550, "Food"),
            expense(1500, "Transport"),
            expense(5000, "Entertainment"),
            expense(1500, "Health"),
        ]
    }

    #[test]
    fn test_breakdown_is_sorted_descending() {
        let report = SummaryReport::generate(&sample(), "All time");
        let labels: Vec<_> = report.breakdown.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(labels, vec!["Entertainment", "Food", "Health", "Transport"]);
        assert_eq!(report.largest_category_total(), Money::from_cents(5000));
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let report = SummaryReport::generate(&sample(), "All time");
        let sum: f64 = report.breakdown.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((report.breakdown[0].percentage - 47.393_364).abs() < 1e-4);
    }

    #[test]
    fn test_counts_per_category() {
        let mut expenses = sample();
        expenses.push(expense(100, "Food"));
        let report = SummaryReport::generate(&expenses, "x");
        let food = report.breakdown.iter().find(|s| s.category == "Food").unwrap();
        assert_eq!(food.count, 2);
        assert_eq!(food.total, Money::from_cents(2650));
        assert_eq!(food.color(), "#FF6B6B");
    }

    #[test]
    fn test_custom_category_uses_other_color() {
        let mut expenses = sample();
        expenses.push(expense(700, "Pets"));
        let report = SummaryReport::generate(&expenses, "x");
        let pets = report.breakdown.iter().find(|s| s.category == "Pets").unwrap();
        assert_eq!(pets.color(), DefaultCategory::Other.color());
    }

    #[test]
    fn test_empty_report() {
        let report = SummaryReport::generate(&[], "March 2025");
        assert!(report.is_empty());
        assert_eq!(report.largest_category_total(), Money::zero());

        let text = report.format_terminal("$");
        assert!(text.contains("Top category: N/A"));
        assert!(text.contains("No expenses recorded."));
    }

    #[test]
    fn test_format_terminal() {
        let report = SummaryReport::generate(&sample()[..3], "All time");
        let text = report.format_terminal("$");

        assert!(text.starts_with("Expense Summary: All time"));
        assert!(text.contains("Total:        $90.50"));
        assert!(text.contains("Average:      $30.17"));
        assert!(text.contains("Top category: Entertainment"));
        assert!(text.contains("Largest category total: $50.00"));
        assert!(text.contains("█"));
    }
}
