//! Strongly-typed expense key
//!
//! The Expense Store assigns keys from the SQLite rowid, so the id wraps an
//! `i64`. A freshly built expense has no id until it is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Prefix used when displaying expense ids
const DISPLAY_PREFIX: &str = "exp-";

/// Unique key of a persisted expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Wrap a store-assigned rowid
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// The underlying rowid
    pub const fn as_raw(&self) -> i64 {
        self.0
    }

    /// Parse an id from `42` or `exp-42`
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        s.parse()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, self.0)
    }
}

impl From<i64> for ExpenseId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ExpenseId::from_raw(7).to_string(), "exp-7");
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        assert_eq!(ExpenseId::parse("12").unwrap(), ExpenseId::from_raw(12));
        assert_eq!(ExpenseId::parse("exp-12").unwrap(), ExpenseId::from_raw(12));
        assert_eq!(ExpenseId::parse(" exp-3 ").unwrap().as_raw(), 3);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ExpenseId::parse("txn-12").is_err());
        assert!(ExpenseId::parse("").is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&ExpenseId::from_raw(9)).unwrap();
        assert_eq!(json, "9");
    }
}
