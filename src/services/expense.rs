//! Expense service
//!
//! Business logic for recording, editing and querying expenses. Every
//! mutation is validated, written to the store, recorded in the audit
//! journal and then published to snapshot subscribers.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::audit::{generate_diff, AuditEntry};
use crate::error::{ControlFastError, ControlFastResult};
use crate::models::expense::truncate_to_millis;
use crate::models::{normalize_category, DefaultCategory, Expense, ExpenseId, Money};
use crate::reports::aggregate::{compute_statistics, CategoryTotal, ExpenseStatistics};
use crate::reports::month::start_of_current_month;
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    default_category: String,
}

/// Options for filtering expense listings
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Exact category label
    pub category: Option<String>,
    /// Inclusive lower bound on the date
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the date
    pub end: Option<DateTime<Utc>>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Only expenses dated within `[start, end]`
    pub fn date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub description: String,
    /// Falls back to the service's default category when absent or blank
    pub category: Option<String>,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
}

impl CreateExpenseInput {
    pub fn new(amount: Money, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            category: None,
            date: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// Partial update of an existing expense; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl UpdateExpenseInput {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            default_category: DefaultCategory::Other.display_name().to_string(),
        }
    }

    /// Use `category` for expenses recorded without one
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.trim().is_empty() {
            self.default_category = normalize_category(&category);
        }
        self
    }

    /// Record a new expense
    pub fn create(&self, input: CreateExpenseInput) -> ControlFastResult<Expense> {
        let category = match input.category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => normalize_category(label),
            _ => self.default_category.clone(),
        };

        let mut expense = Expense::with_date(
            input.amount,
            category,
            input.description.trim(),
            input.date.unwrap_or_else(Utc::now),
        );

        expense
            .validate()
            .map_err(|e| ControlFastError::Validation(e.to_string()))?;

        let id = self.storage.expenses.insert(&expense)?;
        expense.id = Some(id);

        self.storage.audit.log(&AuditEntry::create(&expense))?;
        info!(%id, amount = expense.amount.cents(), category = %expense.category, "recorded expense");

        self.publish()?;
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ControlFastResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by `7` or `exp-7`
    pub fn find(&self, identifier: &str) -> ControlFastResult<Option<Expense>> {
        match identifier.parse::<ExpenseId>() {
            Ok(id) => self.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Find an expense or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> ControlFastResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| ControlFastError::expense_not_found(identifier))
    }

    /// List expenses newest first, with optional filtering
    pub fn list(&self, filter: ExpenseFilter) -> ControlFastResult<Vec<Expense>> {
        let store = &self.storage.expenses;
        let mut expenses = if let Some(category) = &filter.category {
            store.get_by_category(category)?
        } else if let (Some(start), Some(end)) = (filter.start, filter.end) {
            store.get_by_date_range(start, end)?
        } else if let Some(start) = filter.start {
            store.get_since(start)?
        } else {
            store.get_all()?
        };

        if let Some(start) = filter.start {
            expenses.retain(|e| e.date >= start);
        }
        if let Some(end) = filter.end {
            expenses.retain(|e| e.date <= end);
        }

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        debug!(count = expenses.len(), "listed expenses");
        Ok(expenses)
    }

    /// Expenses dated from the start of the current month onward
    pub fn this_month(&self) -> ControlFastResult<Vec<Expense>> {
        self.storage.expenses.get_since(start_of_current_month())
    }

    /// Apply a partial update to an expense
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> ControlFastResult<Expense> {
        let before = self
            .get(id)?
            .ok_or_else(|| ControlFastError::expense_not_found(id.to_string()))?;

        let mut expense = before.clone();
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(category) = input.category {
            expense.category = normalize_category(&category);
        }
        if let Some(description) = input.description {
            expense.description = description.trim().to_string();
        }
        if let Some(date) = input.date {
            expense.date = truncate_to_millis(date);
        }

        expense
            .validate()
            .map_err(|e| ControlFastError::Validation(e.to_string()))?;

        if !self.storage.expenses.update(&expense)? {
            return Err(ControlFastError::expense_not_found(id.to_string()));
        }

        let diff = match (serde_json::to_value(&before), serde_json::to_value(&expense)) {
            (Ok(old), Ok(new)) => generate_diff(&old, &new),
            _ => None,
        };
        self.storage
            .audit
            .log(&AuditEntry::update(&before, &expense, diff))?;
        info!(%id, "updated expense");

        self.publish()?;
        Ok(expense)
    }

    /// Delete an expense, returning what was removed
    pub fn delete(&self, id: ExpenseId) -> ControlFastResult<Expense> {
        let expense = self
            .get(id)?
            .ok_or_else(|| ControlFastError::expense_not_found(id.to_string()))?;

        if !self.storage.expenses.delete(id)? {
            return Err(ControlFastError::expense_not_found(id.to_string()));
        }

        self.storage.audit.log(&AuditEntry::delete(&expense))?;
        info!(%id, "deleted expense");

        self.publish()?;
        Ok(expense)
    }

    /// Delete every expense, returning how many were removed
    pub fn delete_all(&self) -> ControlFastResult<usize> {
        let removed = self.storage.expenses.delete_all()?;
        self.storage.audit.log(&AuditEntry::delete_all(removed))?;
        info!(removed, "deleted all expenses");

        self.publish()?;
        Ok(removed)
    }

    /// Every stored expense, newest first
    pub fn snapshot(&self) -> ControlFastResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Sum of every stored amount
    pub fn total(&self) -> ControlFastResult<Money> {
        self.storage.expenses.total()
    }

    pub fn total_for_category(&self, category: &str) -> ControlFastResult<Money> {
        self.storage
            .expenses
            .total_by_category(&normalize_category(category))
    }

    /// Per-category sums, ascending by label
    pub fn category_totals(&self) -> ControlFastResult<Vec<CategoryTotal>> {
        self.storage.expenses.category_totals()
    }

    /// Statistics over the whole store
    pub fn statistics(&self) -> ControlFastResult<ExpenseStatistics> {
        Ok(compute_statistics(&self.snapshot()?))
    }

    fn publish(&self) -> ControlFastResult<()> {
        if self.storage.feed.has_subscribers() {
            self.storage.feed.publish(self.snapshot()?);
        }
        Ok(())
    }
}
