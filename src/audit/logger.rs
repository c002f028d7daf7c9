//! Append-only audit journal
//!
//! Entries are stored as line-delimited JSON (JSONL), one entry per line,
//! flushed after every write. An in-memory journal backs throwaway stores.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ControlFastError, ControlFastResult};

use super::entry::AuditEntry;

enum Sink {
    File(PathBuf),
    Memory(Mutex<Vec<AuditEntry>>),
}

/// Writes and reads audit entries
pub struct AuditLogger {
    sink: Sink,
}

impl AuditLogger {
    /// Journal backed by a JSONL file
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            sink: Sink::File(log_path),
        }
    }

    /// Journal that lives only as long as this logger
    pub fn in_memory() -> Self {
        Self {
            sink: Sink::Memory(Mutex::new(Vec::new())),
        }
    }

    /// Append an entry
    pub fn log(&self, entry: &AuditEntry) -> ControlFastResult<()> {
        match &self.sink {
            Sink::File(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ControlFastError::Io(format!("Failed to open audit log: {}", e)))?;

                let json = serde_json::to_string(entry).map_err(|e| {
                    ControlFastError::Json(format!("Failed to serialize audit entry: {}", e))
                })?;

                writeln!(file, "{}", json).map_err(|e| {
                    ControlFastError::Io(format!("Failed to write audit entry: {}", e))
                })?;

                file.flush()
                    .map_err(|e| ControlFastError::Io(format!("Failed to flush audit log: {}", e)))
            }
            Sink::Memory(entries) => {
                entries
                    .lock()
                    .map_err(|e| ControlFastError::Io(format!("Audit journal poisoned: {}", e)))?
                    .push(entry.clone());
                Ok(())
            }
        }
    }

    /// All entries, oldest first
    pub fn read_all(&self) -> ControlFastResult<Vec<AuditEntry>> {
        match &self.sink {
            Sink::File(path) => read_journal(path),
            Sink::Memory(entries) => Ok(entries
                .lock()
                .map_err(|e| ControlFastError::Io(format!("Audit journal poisoned: {}", e)))?
                .clone()),
        }
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ControlFastResult<Vec<AuditEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }

    /// Number of entries in the journal
    pub fn entry_count(&self) -> ControlFastResult<usize> {
        match &self.sink {
            Sink::File(path) => {
                if !path.exists() {
                    return Ok(0);
                }
                let file = File::open(path)
                    .map_err(|e| ControlFastError::Io(format!("Failed to open audit log: {}", e)))?;
                Ok(BufReader::new(file)
                    .lines()
                    .map_while(Result::ok)
                    .filter(|l| !l.trim().is_empty())
                    .count())
            }
            Sink::Memory(_) => Ok(self.read_all()?.len()),
        }
    }

    /// Location of the journal file, if it is file-backed
    pub fn path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File(path) => Some(path),
            Sink::Memory(_) => None,
        }
    }
}

fn read_journal(path: &Path) -> ControlFastResult<Vec<AuditEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| ControlFastError::Io(format!("Failed to open audit log: {}", e)))?;

    let mut entries = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            ControlFastError::Io(format!(
                "Failed to read audit log line {}: {}",
                line_num + 1,
                e
            ))
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
            ControlFastError::Json(format!(
                "Failed to parse audit entry at line {}: {}",
                line_num + 1,
                e
            ))
        })?;
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::{Expense, ExpenseId, Money};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn expense(id: i64) -> Expense {
        let mut expense = Expense::new(Money::from_cents(100 * id), "Food", format!("Meal {}", id));
        expense.id = Some(ExpenseId::from_raw(id));
        expense
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&AuditEntry::create(&expense(1))).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].expense_id, Some(ExpenseId::from_raw(1)));
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for i in 1..=10 {
            logger.log(&AuditEntry::create(&expense(i))).unwrap();
        }

        assert_eq!(logger.entry_count().unwrap(), 10);
        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().filter_map(|e| e.expense_id).collect();
        assert_eq!(
            ids,
            vec![
                ExpenseId::from_raw(8),
                ExpenseId::from_raw(9),
                ExpenseId::from_raw(10)
            ]
        );
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&AuditEntry::delete(&expense(2))).unwrap();
        logger.log(&AuditEntry::delete_all(5)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let entries = reopened.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::DeleteAll);
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let (logger, temp) = create_test_logger();
        logger.log(&AuditEntry::create(&expense(1))).unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(temp.path().join("audit.log"))
            .unwrap();
        writeln!(file, "{{broken").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_in_memory_journal() {
        let logger = AuditLogger::in_memory();
        assert!(logger.path().is_none());
        logger.log(&AuditEntry::create(&expense(1))).unwrap();
        logger.log(&AuditEntry::create(&expense(2))).unwrap();
        assert_eq!(logger.entry_count().unwrap(), 2);
        assert_eq!(logger.read_recent(1).unwrap().len(), 1);
    }
}
