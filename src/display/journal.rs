//! Journal entry display formatting
//!
//! Entry lists are rendered with `tabled`; detail views and check results
//! are plain aligned text.

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::settings::is_valid_date_format;
use crate::models::{Extraction, JournalEntry, Money, NoteKind};
use crate::services::validation::{EntryCheck, ValidationRules};
use crate::services::check_journal_entry;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Credit")]
    credit: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format a list of entries as a table
pub fn format_entry_list(entries: &[JournalEntry], date_format: &str) -> String {
    if entries.is_empty() {
        return "No journal entries found.\n".to_string();
    }

    let rules = ValidationRules::default();
    let rows = entries.iter().map(|entry| {
        let check = check_journal_entry(entry, &rules);
        EntryRow {
            id: entry.id.to_string(),
            date: format_date(entry.date, date_format),
            reference: entry.reference.clone().unwrap_or_default(),
            description: truncate(entry.description.as_deref().unwrap_or_default(), 32),
            debit: entry.total_debit().to_string(),
            credit: entry.total_credit().to_string(),
            status: if check.is_balanced() {
                "Balanced"
            } else {
                "Unbalanced"
            },
        }
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(4..6), Alignment::right());

    let mut output = table.to_string();
    output.push_str(&format!("\n{} entries\n", entries.len()));
    output
}

/// Format one entry with its lines
pub fn format_entry_details(entry: &JournalEntry, date_format: &str, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Journal Entry: {}\n", entry.display_reference()));
    output.push_str(&format!("ID:          {}\n", entry.id));
    output.push_str(&format!("Date:        {}\n", format_date(entry.date, date_format)));
    if let Some(description) = &entry.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    output.push_str(&format!(
        "Created:     {}\n\n",
        entry.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output.push_str(&format!(
        "{:<8} {:<28} {:>14} {:>14}  {}\n",
        "Account", "Name", "Debit", "Credit", "Memo"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for line in &entry.lines {
        output.push_str(&format!(
            "{:<8} {:<28} {:>14} {:>14}  {}\n",
            line.account_code,
            truncate(&line.account_name, 28),
            blank_if_zero(line.debit),
            blank_if_zero(line.credit),
            line.description.as_deref().unwrap_or_default()
        ));
    }

    output.push_str(&"-".repeat(80));
    output.push('\n');
    output.push_str(&format!(
        "{:<37} {:>14} {:>14}\n",
        "Total",
        entry.total_debit(),
        entry.total_credit()
    ));

    let check = check_journal_entry(entry, &ValidationRules::default());
    output.push_str(&balance_line(&check, currency));
    output
}

/// Format the outcome of a pre-submit check
pub fn format_check(check: &EntryCheck, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Total debits:  {}\n",
        check.balance.total_debit.format_with_currency(currency)
    ));
    output.push_str(&format!(
        "Total credits: {}\n",
        check.balance.total_credit.format_with_currency(currency)
    ));
    output.push_str(&balance_line(check, currency));

    if check.can_create() {
        output.push_str("Ready to create.\n");
    } else {
        output.push_str("Cannot create:\n");
        for issue in &check.issues {
            output.push_str(&format!("  - {}\n", issue));
        }
    }
    output
}

/// Format the result of processing an uploaded document
pub fn format_extraction(extraction: &Extraction, date_format: &str, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Document key: {}\n", extraction.storage_key));

    if !extraction.notes.is_empty() {
        output.push_str("\nCompliance notes:\n");
        for note in &extraction.notes {
            let marker = match note.kind {
                NoteKind::Error => "✗",
                NoteKind::Warning => "!",
                NoteKind::Info => "i",
            };
            output.push_str(&format!("  {} {}", marker, note.title));
            if !note.description.is_empty() && note.description != note.title {
                output.push_str(&format!(": {}", note.description));
            }
            output.push('\n');
        }
    }

    if extraction.entries.is_empty() {
        output.push_str("\nNo journal entries were extracted.\n");
    }
    for entry in &extraction.entries {
        output.push('\n');
        output.push_str(&format_entry_details(entry, date_format, currency));
    }
    output
}

fn balance_line(check: &EntryCheck, currency: &str) -> String {
    if check.is_balanced() {
        "✓ Balanced\n".to_string()
    } else {
        format!(
            "✗ Out of balance by {}\n",
            check.balance.difference().format_with_currency(currency)
        )
    }
}

/// Render with `date_format`, falling back to ISO when chrono rejects it
fn format_date(date: NaiveDate, date_format: &str) -> String {
    let date_format = if is_valid_date_format(date_format) {
        date_format
    } else {
        "%Y-%m-%d"
    };
    date.format(date_format).to_string()
}

fn blank_if_zero(amount: Money) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        amount.to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountCode, EntryId, JournalEntryLine, LineId};
    use crate::services::validation::check_entry;
    use chrono::NaiveDate;

    fn entry(credit: i64) -> JournalEntry {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        JournalEntry {
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
                    Money::from_cents(credit),
                ),
            ],
        }
    }

    #[test]
    fn test_entry_list_table() {
        let output = format_entry_list(&[entry(250_000), entry(100)], "%Y-%m-%d");
        assert!(output.contains("Reference"));
        assert!(output.contains("REF001"));
        assert!(output.contains("2,500.00"));
        assert!(output.contains("Balanced"));
        assert!(output.contains("Unbalanced"));
        assert!(output.contains("2 entries"));
    }

    #[test]
    fn test_bad_date_format_falls_back_to_iso() {
        let output = format_entry_list(&[entry(250_000)], "%Q");
        assert!(output.contains("2025-09-01"));

        let details = format_entry_details(&entry(250_000), "%Y-%", "MYR");
        assert!(details.contains("Date:        2025-09-01"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_entry_list(&[], "%Y-%m-%d"), "No journal entries found.\n");
    }

    #[test]
    fn test_details_show_difference() {
        let output = format_entry_details(&entry(200_000), "%d/%m/%Y", "MYR");
        assert!(output.contains("Date:        01/09/2025"));
        assert!(output.contains("Out of balance by MYR 500.00"));
    }

    #[test]
    fn test_check_lists_reasons() {
        let e = entry(250_000);
        let check = check_entry("", "", &e.lines, &ValidationRules::default());
        let output = format_check(&check, "MYR");
        assert!(output.contains("✓ Balanced"));
        assert!(output.contains("Reference is required"));
        assert!(output.contains("Description is required"));
    }
}
