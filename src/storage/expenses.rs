//! SQLite-backed expense store
//!
//! Durable keyed collection of expenses. Amounts are stored as integer
//! cents and dates as milliseconds since the Unix epoch.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::{ControlFastError, ControlFastResult};
use crate::models::expense::datetime_from_millis;
use crate::models::{Expense, ExpenseId, Money};
use crate::reports::CategoryTotal;

const SELECT_COLUMNS: &str = "SELECT id, amount_cents, category, description, date_ms FROM expenses";

/// Repository for expense persistence
pub struct ExpenseStore {
    conn: Mutex<Connection>,
}

impl ExpenseStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> ControlFastResult<Self> {
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "opened expense database");
        Self::with_connection(conn)
    }

    /// A private, non-persistent database
    pub fn open_in_memory() -> ControlFastResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> ControlFastResult<Self> {
        setup_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> ControlFastResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ControlFastError::Storage(format!("Failed to acquire connection: {}", e)))
    }

    /// Store an expense and return its key
    ///
    /// An expense that already carries an id replaces any row with that id.
    pub fn insert(&self, expense: &Expense) -> ControlFastResult<ExpenseId> {
        let conn = self.conn()?;
        let id = match expense.id {
            Some(id) => {
                conn.execute(
                    "INSERT OR REPLACE INTO expenses (id, amount_cents, category, description, date_ms)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        id.as_raw(),
                        expense.amount.cents(),
                        expense.category,
                        expense.description,
                        expense.date_millis(),
                    ],
                )?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO expenses (amount_cents, category, description, date_ms)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        expense.amount.cents(),
                        expense.category,
                        expense.description,
                        expense.date_millis(),
                    ],
                )?;
                ExpenseId::from_raw(conn.last_insert_rowid())
            }
        };

        debug!(%id, amount = expense.amount.cents(), category = %expense.category, "inserted expense");
        Ok(id)
    }

    /// Overwrite a stored expense; `false` when no row has its id
    pub fn update(&self, expense: &Expense) -> ControlFastResult<bool> {
        let Some(id) = expense.id else {
            return Ok(false);
        };

        let changed = self.conn()?.execute(
            "UPDATE expenses SET amount_cents = ?1, category = ?2, description = ?3, date_ms = ?4
             WHERE id = ?5",
            params![
                expense.amount.cents(),
                expense.category,
                expense.description,
                expense.date_millis(),
                id.as_raw(),
            ],
        )?;

        debug!(%id, changed, "updated expense");
        Ok(changed > 0)
    }

    /// Remove an expense; `false` when it did not exist
    pub fn delete(&self, id: ExpenseId) -> ControlFastResult<bool> {
        let changed = self
            .conn()?
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.as_raw()])?;
        debug!(%id, changed, "deleted expense");
        Ok(changed > 0)
    }

    /// Remove every expense, returning how many were removed
    pub fn delete_all(&self) -> ControlFastResult<usize> {
        let removed = self.conn()?.execute("DELETE FROM expenses", [])?;
        debug!(removed, "deleted all expenses");
        Ok(removed)
    }

    pub fn get(&self, id: ExpenseId) -> ControlFastResult<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.as_raw()],
                expense_from_row,
            )
            .optional()?;
        Ok(expense)
    }

    /// Every expense, newest first
    pub fn get_all(&self) -> ControlFastResult<Vec<Expense>> {
        self.query(&format!("{} ORDER BY date_ms DESC, id DESC", SELECT_COLUMNS), [])
    }

    /// Expenses with exactly this category label, newest first
    pub fn get_by_category(&self, category: &str) -> ControlFastResult<Vec<Expense>> {
        self.query(
            &format!(
                "{} WHERE category = ?1 ORDER BY date_ms DESC, id DESC",
                SELECT_COLUMNS
            ),
            params![category],
        )
    }

    /// Expenses dated within `[start, end]`, newest first
    pub fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ControlFastResult<Vec<Expense>> {
        self.query(
            &format!(
                "{} WHERE date_ms BETWEEN ?1 AND ?2 ORDER BY date_ms DESC, id DESC",
                SELECT_COLUMNS
            ),
            params![start.timestamp_millis(), end.timestamp_millis()],
        )
    }

    /// Expenses dated at or after `start`, newest first
    pub fn get_since(&self, start: DateTime<Utc>) -> ControlFastResult<Vec<Expense>> {
        self.query(
            &format!(
                "{} WHERE date_ms >= ?1 ORDER BY date_ms DESC, id DESC",
                SELECT_COLUMNS
            ),
            params![start.timestamp_millis()],
        )
    }

    /// Sum of every stored amount
    pub fn total(&self) -> ControlFastResult<Money> {
        let cents: i64 = self.conn()?.query_row(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM expenses",
            [],
            |row| row.get(0),
        )?;
        Ok(Money::from_cents(cents))
    }

    /// Sum of stored amounts with this category label
    pub fn total_by_category(&self, category: &str) -> ControlFastResult<Money> {
        let cents: i64 = self.conn()?.query_row(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM expenses WHERE category = ?1",
            params![category],
            |row| row.get(0),
        )?;
        Ok(Money::from_cents(cents))
    }

    /// Per-category sums computed by the database, ascending by label
    pub fn category_totals(&self) -> ControlFastResult<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT category, SUM(amount_cents) FROM expenses
             GROUP BY category ORDER BY category",
        )?;
        let totals = stmt
            .query_map([], |row| {
                Ok(CategoryTotal::new(
                    row.get::<_, String>(0)?,
                    Money::from_cents(row.get(1)?),
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }

    pub fn count(&self) -> ControlFastResult<usize> {
        let count: i64 =
            self.conn()?
                .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> ControlFastResult<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let expenses = stmt
            .query_map(params, expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(expenses)
    }
}

fn setup_schema(conn: &Connection) -> ControlFastResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount_cents INTEGER NOT NULL CHECK (amount_cents > 0 AND amount_cents <= 99999999999),
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            date_ms INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date_ms)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category)",
        [],
    )?;

    Ok(())
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let date_ms: i64 = row.get(4)?;
    let date = datetime_from_millis(date_ms)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(4, date_ms))?;

    Ok(Expense {
        id: Some(ExpenseId::from_raw(row.get(0)?)),
        amount: Money::from_cents(row.get(1)?),
        category: row.get(2)?,
        description: row.get(3)?,
        date,
    })
}
