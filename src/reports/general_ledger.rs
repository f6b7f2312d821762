//! General Ledger Report
//!
//! Posts every journal entry line to its account and keeps a running
//! balance per account (debits increase it, credits decrease it).

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::models::{AccountCode, EntryId, JournalEntry, LineId, Money};

/// Account class implied by the leading digit of the account code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
    Other,
}

impl AccountType {
    pub fn from_code(code: AccountCode) -> Self {
        let mut n = code.value().abs();
        while n >= 10 {
            n /= 10;
        }
        match n {
            1 => Self::Asset,
            2 => Self::Liability,
            3 => Self::Equity,
            4 => Self::Revenue,
            5..=9 => Self::Expense,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Revenue => "Revenue",
            Self::Expense => "Expense",
            Self::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// A single line posted to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerPosting {
    pub date: NaiveDate,
    pub entry_id: EntryId,
    pub line_id: LineId,
    pub reference: String,
    pub description: String,
    pub debit: Money,
    pub credit: Money,
    /// Account balance after this posting
    pub running_balance: Money,
}

/// One account with its postings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAccount {
    pub code: AccountCode,
    pub name: String,
    pub account_type: AccountType,
    pub postings: Vec<LedgerPosting>,
    pub total_debit: Money,
    pub total_credit: Money,
    /// Debits minus credits over the postings shown
    pub balance: Money,
}

/// Filter options for the ledger
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub account: Option<AccountCode>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive match on account code or name, reference or description
    pub search: Option<String>,
}

impl LedgerFilter {
    fn matches_date(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }

    fn matches_text(&self, account: &LedgerAccount, posting: &LedgerPosting) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        account.code.to_string().contains(&needle)
            || account.name.to_lowercase().contains(&needle)
            || posting.reference.to_lowercase().contains(&needle)
            || posting.description.to_lowercase().contains(&needle)
    }
}

/// General Ledger Report
#[derive(Debug, Clone, Serialize)]
pub struct GeneralLedger {
    pub accounts: Vec<LedgerAccount>,
    pub total_debit: Money,
    pub total_credit: Money,
}

impl GeneralLedger {
    /// Build the ledger from journal entries
    ///
    /// Postings are ordered by date, then entry id, then line id. Running
    /// balances are computed over the postings that pass the filter.
    pub fn generate(entries: &[JournalEntry], filter: &LedgerFilter) -> Self {
        let mut lines: Vec<(&JournalEntry, usize)> = entries
            .iter()
            .flat_map(|entry| (0..entry.lines.len()).map(move |i| (entry, i)))
            .collect();
        lines.sort_by(|(a, i), (b, j)| {
            a.date
                .cmp(&b.date)
                .then(a.id.cmp(&b.id))
                .then(a.lines[*i].id.cmp(&b.lines[*j].id))
        });

        let mut accounts: BTreeMap<AccountCode, LedgerAccount> = BTreeMap::new();

        for (entry, index) in lines {
            let line = &entry.lines[index];
            if filter.account.is_some_and(|code| code != line.account_code) {
                continue;
            }
            if !filter.matches_date(entry.date) {
                continue;
            }

            let account = accounts
                .entry(line.account_code)
                .or_insert_with(|| LedgerAccount {
                    code: line.account_code,
                    name: line.account_name.clone(),
                    account_type: AccountType::from_code(line.account_code),
                    postings: Vec::new(),
                    total_debit: Money::zero(),
                    total_credit: Money::zero(),
                    balance: Money::zero(),
                });

            let posting = LedgerPosting {
                date: entry.date,
                entry_id: entry.id,
                line_id: line.id,
                reference: entry.display_reference(),
                description: line
                    .description
                    .clone()
                    .or_else(|| entry.description.clone())
                    .unwrap_or_default(),
                debit: line.debit,
                credit: line.credit,
                running_balance: Money::zero(),
            };
            if !filter.matches_text(account, &posting) {
                continue;
            }

            account.total_debit += line.debit;
            account.total_credit += line.credit;
            account.balance += line.net();
            account.postings.push(LedgerPosting {
                running_balance: account.balance,
                ..posting
            });
        }

        let accounts: Vec<LedgerAccount> = accounts
            .into_values()
            .filter(|a| !a.postings.is_empty())
            .collect();
        let total_debit = accounts.iter().map(|a| a.total_debit).sum();
        let total_credit = accounts.iter().map(|a| a.total_credit).sum();

        Self {
            accounts,
            total_debit,
            total_credit,
        }
    }

    /// Look up one account
    pub fn account(&self, code: AccountCode) -> LedgerDeskResult<&LedgerAccount> {
        self.accounts
            .iter()
            .find(|a| a.code == code)
            .ok_or_else(|| LedgerDeskError::account_not_found(code.to_string()))
    }

    /// True when total debits equal total credits across all accounts
    pub fn is_in_balance(&self) -> bool {
        self.total_debit == self.total_credit
    }

    /// Every posting, paired with its account
    pub fn postings(&self) -> impl Iterator<Item = (&LedgerAccount, &LedgerPosting)> {
        self.accounts
            .iter()
            .flat_map(|a| a.postings.iter().map(move |p| (a, p)))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("General Ledger\n");
        output.push_str(&"=".repeat(96));
        output.push('\n');

        if self.accounts.is_empty() {
            output.push_str("No postings match.\n");
            return output;
        }

        for account in &self.accounts {
            output.push_str(&format!(
                "\n{} {} ({})\n",
                account.code, account.name, account.account_type
            ));
            output.push_str(&format!(
                "{:<12} {:<14} {:<30} {:>12} {:>12} {:>12}\n",
                "Date", "Reference", "Description", "Debit", "Credit", "Balance"
            ));
            output.push_str(&"-".repeat(96));
            output.push('\n');

            for posting in &account.postings {
                output.push_str(&format!(
                    "{:<12} {:<14} {:<30} {:>12} {:>12} {:>12}\n",
                    posting.date,
                    truncate(&posting.reference, 14),
                    truncate(&posting.description, 30),
                    amount_cell(posting.debit),
                    amount_cell(posting.credit),
                    posting.running_balance
                ));
            }

            output.push_str(&format!(
                "{:<58} {:>12} {:>12} {:>12}\n",
                "Total", account.total_debit, account.total_credit, account.balance
            ));
        }

        output.push_str(&"=".repeat(96));
        output.push('\n');
        output.push_str(&format!(
            "Total Debits: {}  |  Total Credits: {}  |  {}\n",
            self.total_debit,
            self.total_credit,
            if self.is_in_balance() {
                "In balance"
            } else {
                "OUT OF BALANCE"
            }
        ));

        output
    }
}

fn amount_cell(amount: Money) -> String {
    if amount.is_zero() {
        "-".to_string()
    } else {
        amount.to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
