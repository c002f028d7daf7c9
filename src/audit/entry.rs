//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId};

/// Mutations recorded in the audit journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// Every expense was removed at once
    DeleteAll,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::DeleteAll => write!(f, "DELETE ALL"),
        }
    }
}

/// A single audit journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Affected expense; absent for `DeleteAll`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<ExpenseId>,

    /// Short human-readable label of what was touched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expense as it was before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Expense as it was after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn blank(operation: Operation) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            expense_id: None,
            description: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly stored expense
    pub fn create(expense: &Expense) -> Self {
        Self {
            expense_id: expense.id,
            description: Some(expense.description.clone()),
            after: serde_json::to_value(expense).ok(),
            ..Self::blank(Operation::Create)
        }
    }

    /// Entry for a modified expense
    pub fn update(before: &Expense, after: &Expense, diff_summary: Option<String>) -> Self {
        Self {
            expense_id: after.id,
            description: Some(after.description.clone()),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::blank(Operation::Update)
        }
    }

    /// Entry for a removed expense
    pub fn delete(expense: &Expense) -> Self {
        Self {
            expense_id: expense.id,
            description: Some(expense.description.clone()),
            before: serde_json::to_value(expense).ok(),
            ..Self::blank(Operation::Delete)
        }
    }

    /// Entry for wiping the whole store
    pub fn delete_all(removed: usize) -> Self {
        Self {
            description: Some(format!("{} expense(s) removed", removed)),
            ..Self::blank(Operation::DeleteAll)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation
        );

        if let Some(id) = &self.expense_id {
            output.push_str(&format!(" {}", id));
        }

        if let Some(description) = &self.description {
            output.push_str(&format!(" ({})", description));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn saved_expense() -> Expense {
        let mut expense = Expense::new(Money::from_cents(2550), "Food", "Lunch");
        expense.id = Some(ExpenseId::from_raw(3));
        expense
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::DeleteAll.to_string(), "DELETE ALL");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(&saved_expense());
        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.expense_id, Some(ExpenseId::from_raw(3)));
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["amount"], 2550);
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&saved_expense());
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_delete_all_serialization() {
        let entry = AuditEntry::delete_all(4);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"delete_all\""));
        assert!(!json.contains("expense_id"));
    }

    #[test]
    fn test_human_readable() {
        let before = saved_expense();
        let mut after = before.clone();
        after.amount = Money::from_cents(3000);
        let entry = AuditEntry::update(&before, &after, Some("amount: 2550 -> 3000".into()));

        let text = entry.format_human_readable();
        assert!(text.contains("UPDATE exp-3 (Lunch)"));
        assert!(text.contains("Changes: amount: 2550 -> 3000"));
    }
}
