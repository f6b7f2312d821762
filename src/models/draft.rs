//! Editable journal entry draft
//!
//! Holds the state of a journal entry while it is being composed, before it
//! is validated and sent to the backend. A draft always keeps at least two
//! lines, since a single-line entry can never balance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::AccountCode;
use super::journal::LineAmounts;
use super::money::Money;
use crate::error::{LedgerDeskError, LedgerDeskResult};

/// Minimum number of lines a draft keeps
pub const MIN_DRAFT_LINES: usize = 2;

/// A line being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLine {
    pub account_code: AccountCode,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub debit: Money,
    #[serde(default)]
    pub credit: Money,
    #[serde(default)]
    pub description: String,
}

impl DraftLine {
    /// A debit line
    pub fn new_debit(account_code: AccountCode, amount: Money) -> Self {
        Self {
            account_code,
            debit: amount,
            ..Self::default()
        }
    }

    /// A credit line
    pub fn new_credit(account_code: AccountCode, amount: Money) -> Self {
        Self {
            account_code,
            credit: amount,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl LineAmounts for DraftLine {
    fn debit(&self) -> Money {
        self.debit
    }

    fn credit(&self) -> Money {
        self.credit
    }
}

/// A journal entry under construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryDraft {
    pub date: NaiveDate,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub description: String,
    lines: Vec<DraftLine>,
}

impl JournalEntryDraft {
    /// Create an empty draft with two blank lines
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            reference: String::new(),
            description: String::new(),
            lines: vec![DraftLine::default(); MIN_DRAFT_LINES],
        }
    }

    /// Create a draft from existing lines, padding with blank lines up to the minimum
    pub fn with_lines(date: NaiveDate, lines: Vec<DraftLine>) -> Self {
        let mut draft = Self {
            date,
            reference: String::new(),
            description: String::new(),
            lines,
        };
        while draft.lines.len() < MIN_DRAFT_LINES {
            draft.lines.push(DraftLine::default());
        }
        draft
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Append a line at the end
    pub fn add_line(&mut self, line: DraftLine) {
        self.lines.push(line);
    }

    /// Apply an edit to the line at `index`
    pub fn update_line<F>(&mut self, index: usize, edit: F) -> LedgerDeskResult<()>
    where
        F: FnOnce(&mut DraftLine),
    {
        let line = self.lines.get_mut(index).ok_or_else(|| {
            LedgerDeskError::Validation(format!("No line at position {}", index + 1))
        })?;
        edit(line);
        Ok(())
    }

    /// Remove the line at `index`; refused when only the minimum remains
    pub fn remove_line(&mut self, index: usize) -> LedgerDeskResult<DraftLine> {
        if self.lines.len() <= MIN_DRAFT_LINES {
            return Err(LedgerDeskError::Validation(format!(
                "A journal entry needs at least {} lines",
                MIN_DRAFT_LINES
            )));
        }
        if index >= self.lines.len() {
            return Err(LedgerDeskError::Validation(format!(
                "No line at position {}",
                index + 1
            )));
        }
        Ok(self.lines.remove(index))
    }

    /// Drop lines that carry no account and no amounts, keeping the minimum
    pub fn compact(&mut self) {
        let mut kept: Vec<DraftLine> = self
            .lines
            .drain(..)
            .filter(|l| l.account_code.value() != 0 || !l.debit.is_zero() || !l.credit.is_zero())
            .collect();
        while kept.len() < MIN_DRAFT_LINES {
            kept.push(DraftLine::default());
        }
        self.lines = kept;
    }
}
