//! JSON Export functionality
//!
//! Exports the journal and its general ledger to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::models::JournalEntry;
use crate::reports::{GeneralLedger, LedgerFilter};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub entries: Vec<JournalEntry>,

    pub ledger: GeneralLedger,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub entry_count: usize,
    pub account_count: usize,
    pub posting_count: usize,
    pub earliest_entry: Option<String>,
    pub latest_entry: Option<String>,
    /// Whether total debits equal total credits
    pub in_balance: bool,
}

impl LedgerExport {
    /// Build an export from entries, applying `filter` to the ledger part
    pub fn new(entries: Vec<JournalEntry>, filter: &LedgerFilter) -> Self {
        let ledger = GeneralLedger::generate(&entries, filter);

        let metadata = ExportMetadata {
            entry_count: entries.len(),
            account_count: ledger.accounts.len(),
            posting_count: ledger.postings().count(),
            earliest_entry: entries.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_entry: entries.iter().map(|e| e.date).max().map(|d| d.to_string()),
            in_balance: ledger.is_in_balance(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries,
            ledger,
            metadata,
        }
    }
}

/// Export the journal and ledger to JSON
pub fn export_ledger_json<W: Write>(
    export: &LedgerExport,
    writer: &mut W,
    pretty: bool,
) -> LedgerDeskResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| LedgerDeskError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountCode, EntryId, JournalEntryLine, LineId, Money};
    use chrono::NaiveDate;

    fn sample_entries() -> Vec<JournalEntry> {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        vec![JournalEntry {
            id: EntryId::new(1),
            date,
            reference: Some("REF001".into()),
            description: Some("Owner capital".into()),
            created_at: date.and_hms_opt(8, 0, 0).unwrap().and_utc(),
            lines: vec![
                JournalEntryLine::new(
                    LineId::new(1),
                    AccountCode::new(1001),
                    "Cash",
                    Money::from_cents(250_000),
                    Money::zero(),
                ),
                JournalEntryLine::new(
                    LineId::new(2),
                    AccountCode::new(3001),
                    "Owner's Equity",
                    Money::zero(),
                    Money::from_cents(250_000),
                ),
            ],
        }]
    }

    #[test]
    fn test_json_export() {
        let export = LedgerExport::new(sample_entries(), &LedgerFilter::default());
        let mut output = Vec::new();
        export_ledger_json(&export, &mut output, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["metadata"]["entry_count"], 1);
        assert_eq!(value["metadata"]["posting_count"], 2);
        assert_eq!(value["metadata"]["in_balance"], true);
        assert_eq!(value["metadata"]["earliest_entry"], "2025-09-01");
        assert_eq!(value["entries"][0]["lines"][0]["debit"], 250_000);
    }
}
