//! Audit journal for ControlFast
//!
//! Every create, update and delete of an expense is recorded with
//! before/after values in an append-only journal.
//!
//! - `AuditEntry`: one recorded operation
//! - `AuditLogger`: JSONL file (or in-memory) journal
//! - `generate_diff`: one-line summary of changed fields

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
