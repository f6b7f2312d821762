//! Journal entry balance validation
//!
//! Decides whether a journal entry may be created. Amounts are summed in
//! cents, so "balanced" means the debit and credit totals are exactly equal.
//! Every blocking reason is reported, not just the first one found.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{JournalEntry, JournalEntryDraft, LineAmounts, Money};

/// Optional rules layered on top of the balance and required-field checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Reject lines that carry both a debit and a credit
    #[serde(default)]
    pub single_sided_lines: bool,

    /// Reject negative debit or credit amounts
    #[serde(default = "default_true")]
    pub non_negative_amounts: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            single_sided_lines: false,
            non_negative_amounts: true,
        }
    }
}

/// Debit and credit totals of a set of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    pub total_debit: Money,
    pub total_credit: Money,
}

impl BalanceSummary {
    /// Sum the debits and credits of `lines`
    pub fn of<L: LineAmounts>(lines: &[L]) -> Self {
        Self {
            total_debit: lines.iter().map(LineAmounts::debit).sum(),
            total_credit: lines.iter().map(LineAmounts::credit).sum(),
        }
    }

    /// Absolute gap between the two totals
    pub fn difference(&self) -> Money {
        (self.total_debit - self.total_credit).abs()
    }

    pub fn is_balanced(&self) -> bool {
        self.difference().is_zero()
    }
}

/// A specific reason an entry cannot be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingReference,
    MissingDescription,
    Unbalanced {
        total_debit: Money,
        total_credit: Money,
    },
    /// 1-based line number
    NegativeAmount { line: usize },
    /// 1-based line number
    DoubleSidedLine { line: usize },
    /// 1-based line number
    AmountOutOfRange { line: usize },
    TotalsOutOfRange,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingReference => write!(f, "Reference is required"),
            Self::MissingDescription => write!(f, "Description is required"),
            Self::Unbalanced {
                total_debit,
                total_credit,
            } => write!(
                f,
                "Debits ({}) and credits ({}) are out of balance by {}",
                total_debit,
                total_credit,
                (*total_debit - *total_credit).abs()
            ),
            Self::NegativeAmount { line } => {
                write!(f, "Line {} has a negative amount", line)
            }
            Self::DoubleSidedLine { line } => {
                write!(f, "Line {} has both a debit and a credit", line)
            }
            Self::AmountOutOfRange { line } => {
                write!(f, "Line {} has an amount above {}", line, Money::LIMIT)
            }
            Self::TotalsOutOfRange => {
                write!(f, "Entry totals exceed {}", Money::LIMIT)
            }
        }
    }
}

/// Outcome of checking an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCheck {
    pub balance: BalanceSummary,
    pub issues: Vec<ValidationIssue>,
}

impl EntryCheck {
    /// True when nothing blocks creation
    pub fn can_create(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn is_balanced(&self) -> bool {
        self.balance.is_balanced() && !self.has_issue(&ValidationIssue::TotalsOutOfRange)
    }

    pub fn has_issue(&self, issue: &ValidationIssue) -> bool {
        self.issues.contains(issue)
    }
}

/// Check header fields and lines of an entry
pub fn check_entry<L: LineAmounts>(
    reference: &str,
    description: &str,
    lines: &[L],
    rules: &ValidationRules,
) -> EntryCheck {
    let balance = BalanceSummary::of(lines);
    let mut issues = Vec::new();

    if reference.trim().is_empty() {
        issues.push(ValidationIssue::MissingReference);
    }
    if description.trim().is_empty() {
        issues.push(ValidationIssue::MissingDescription);
    }
    // Saturated totals can compare equal, so balance is only judged in range
    if !balance.total_debit.is_within_limit() || !balance.total_credit.is_within_limit() {
        issues.push(ValidationIssue::TotalsOutOfRange);
    } else if !balance.is_balanced() {
        issues.push(ValidationIssue::Unbalanced {
            total_debit: balance.total_debit,
            total_credit: balance.total_credit,
        });
    }

    for (index, line) in lines.iter().enumerate() {
        let number = index + 1;
        if rules.non_negative_amounts && (line.debit().is_negative() || line.credit().is_negative())
        {
            issues.push(ValidationIssue::NegativeAmount { line: number });
        }
        if rules.single_sided_lines && !line.debit().is_zero() && !line.credit().is_zero() {
            issues.push(ValidationIssue::DoubleSidedLine { line: number });
        }
        if !line.debit().is_within_limit() || !line.credit().is_within_limit() {
            issues.push(ValidationIssue::AmountOutOfRange { line: number });
        }
    }

    EntryCheck { balance, issues }
}

/// Check a draft before it is submitted
pub fn check_draft(draft: &JournalEntryDraft, rules: &ValidationRules) -> EntryCheck {
    check_entry(&draft.reference, &draft.description, draft.lines(), rules)
}

/// Check an entry that came back from the backend or from extraction
pub fn check_journal_entry(entry: &JournalEntry, rules: &ValidationRules) -> EntryCheck {
    check_entry(
        entry.reference.as_deref().unwrap_or_default(),
        entry.description.as_deref().unwrap_or_default(),
        &entry.lines,
        rules,
    )
}
