//! CSV Export functionality
//!
//! Exports general ledger postings, one row per posting, in a
//! spreadsheet-friendly layout.

use serde::Serialize;
use std::io::Write;

use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::reports::GeneralLedger;

#[derive(Serialize)]
struct PostingRow<'a> {
    #[serde(rename = "Account Code")]
    account_code: i64,
    #[serde(rename = "Account Name")]
    account_name: &'a str,
    #[serde(rename = "Account Type")]
    account_type: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Entry")]
    entry_id: i64,
    #[serde(rename = "Reference")]
    reference: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Debit")]
    debit: String,
    #[serde(rename = "Credit")]
    credit: String,
    #[serde(rename = "Running Balance")]
    running_balance: String,
}

/// Export ledger postings to CSV
pub fn export_ledger_csv<W: Write>(ledger: &GeneralLedger, writer: W) -> LedgerDeskResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (account, posting) in ledger.postings() {
        csv_writer
            .serialize(PostingRow {
                account_code: account.code.value(),
                account_name: &account.name,
                account_type: account.account_type.to_string(),
                date: posting.date.to_string(),
                entry_id: posting.entry_id.value(),
                reference: &posting.reference,
                description: &posting.description,
                debit: format!("{:.2}", posting.debit.to_decimal()),
                credit: format!("{:.2}", posting.credit.to_decimal()),
                running_balance: format!("{:.2}", posting.running_balance.to_decimal()),
            })
            .map_err(|e| LedgerDeskError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerDeskError::Export(e.to_string()))?;
    Ok(())
}
