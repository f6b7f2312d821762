//! Journal entry model
//!
//! A journal entry is a dated set of lines posting debits and credits to
//! accounts. Entries come back from the backend either from the journal
//! listing or from document extraction; both are normalized into these types
//! by `api::decode`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountCode, EntryId, LineId};
use super::money::Money;

/// Anything that carries a debit and a credit amount
pub trait LineAmounts {
    fn debit(&self) -> Money;
    fn credit(&self) -> Money;
}

/// A single line of a journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    pub id: LineId,

    /// Account the line posts to
    pub account_code: AccountCode,

    /// Display name of the account
    pub account_name: String,

    pub debit: Money,

    pub credit: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JournalEntryLine {
    /// Create a line with no description
    pub fn new(
        id: LineId,
        account_code: AccountCode,
        account_name: impl Into<String>,
        debit: Money,
        credit: Money,
    ) -> Self {
        Self {
            id,
            account_code,
            account_name: account_name.into(),
            debit,
            credit,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Signed effect on the account balance (debit positive)
    pub fn net(&self) -> Money {
        self.debit - self.credit
    }
}

impl LineAmounts for JournalEntryLine {
    fn debit(&self) -> Money {
        self.debit
    }

    fn credit(&self) -> Money {
        self.credit
    }
}

/// A journal entry with its lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,

    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Lines in the order the backend returned them
    #[serde(default)]
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// Sum of all debit amounts
    pub fn total_debit(&self) -> Money {
        self.lines.iter().map(|l| l.debit).sum()
    }

    /// Sum of all credit amounts
    pub fn total_credit(&self) -> Money {
        self.lines.iter().map(|l| l.credit).sum()
    }

    /// Reference for display, falling back to the entry id
    pub fn display_reference(&self) -> String {
        self.reference
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.display_reference(),
            self.total_debit()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> JournalEntry {
        JournalEntry {
            id: EntryId::new(1),
            date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            reference: Some("RENT-001".into()),
            description: Some("Office rent".into()),
            created_at: Utc::now(),
            lines: vec![
                JournalEntryLine::new(
                    LineId::new(1),
                    AccountCode::new(5001),
                    "Rent Expense",
                    Money::from_cents(500_000),
                    Money::zero(),
                ),
                JournalEntryLine::new(
                    LineId::new(2),
                    AccountCode::new(1001),
                    "Cash - Operating Account",
                    Money::zero(),
                    Money::from_cents(500_000),
                ),
            ],
        }
    }

    #[test]
    fn test_totals() {
        let entry = sample_entry();
        assert_eq!(entry.total_debit(), Money::from_cents(500_000));
        assert_eq!(entry.total_credit(), Money::from_cents(500_000));
    }

    #[test]
    fn test_line_net() {
        let entry = sample_entry();
        assert_eq!(entry.lines[0].net(), Money::from_cents(500_000));
        assert_eq!(entry.lines[1].net(), Money::from_cents(-500_000));
    }

    #[test]
    fn test_display_reference_falls_back_to_id() {
        let mut entry = sample_entry();
        assert_eq!(entry.display_reference(), "RENT-001");
        entry.reference = Some("  ".into());
        assert_eq!(entry.display_reference(), "JE-1");
    }

    #[test]
    fn test_empty_description_is_none() {
        let line = JournalEntryLine::new(
            LineId::new(1),
            AccountCode::new(1001),
            "Cash",
            Money::zero(),
            Money::zero(),
        )
        .with_description("");
        assert!(line.description.is_none());
    }
}
