//! Reports module for ledgerdesk
//!
//! Provides the general ledger: per-account postings with running
//! balances and trial-balance totals.

pub mod general_ledger;

pub use general_ledger::{AccountType, GeneralLedger, LedgerAccount, LedgerFilter, LedgerPosting};
