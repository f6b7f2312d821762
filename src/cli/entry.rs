//! Journal entry CLI commands
//!
//! Implements CLI commands for listing, inspecting, checking and creating
//! journal entries.

use chrono::NaiveDate;
use clap::Subcommand;
use std::path::{Path, PathBuf};

use super::AppContext;
use crate::api::decode_draft;
use crate::display::{format_check, format_entry_details, format_entry_list};
use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::models::{AccountCode, DraftLine, EntryId, JournalEntryDraft, Money};
use crate::services::validation::check_draft;
use crate::services::JournalService;

/// Journal entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// List all journal entries
    List,
    /// Show a journal entry with its lines
    Show {
        /// Entry ID (e.g. 12 or JE-12)
        id: String,
    },
    /// Check a journal entry file without submitting it
    Check {
        /// JSON file in the create-request shape
        file: PathBuf,
    },
    /// Create a journal entry
    Create {
        /// Read the entry from a JSON file instead of flags
        #[arg(short, long, conflicts_with_all = ["reference", "description", "lines"])]
        file: Option<PathBuf>,
        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Reference, e.g. an invoice number
        #[arg(short, long)]
        reference: Option<String>,
        /// Description of the entry
        #[arg(long)]
        description: Option<String>,
        /// Line as CODE:DEBIT:CREDIT[:MEMO], repeatable
        #[arg(short, long = "line", value_name = "LINE")]
        lines: Vec<String>,
    },
}

/// Handle a journal entry command
pub async fn handle_entry_command(ctx: &AppContext, cmd: EntryCommands) -> LedgerDeskResult<()> {
    let settings = &ctx.settings;
    let service = JournalService::new(&ctx.client, &settings.validation);

    match cmd {
        EntryCommands::List => {
            let entries = service.list().await?;
            print!("{}", format_entry_list(&entries, &settings.date_format));
        }

        EntryCommands::Show { id } => {
            let id: EntryId = id
                .parse()
                .map_err(|_| LedgerDeskError::Validation(format!("Invalid entry ID: '{}'", id)))?;
            let entry = service.find(id).await?;
            print!(
                "{}",
                format_entry_details(&entry, &settings.date_format, &settings.currency_code)
            );
        }

        EntryCommands::Check { file } => {
            let draft = read_draft(&file)?;
            let check = check_draft(&draft, &settings.validation);
            print!("{}", format_check(&check, &settings.currency_code));
            if !check.can_create() {
                return Err(LedgerDeskError::Rejected(check.issues));
            }
        }

        EntryCommands::Create {
            file,
            date,
            reference,
            description,
            lines,
        } => {
            let draft = match file {
                Some(path) => read_draft(&path)?,
                None => {
                    let date = match date {
                        Some(d) => parse_date(&d)?,
                        None => chrono::Local::now().date_naive(),
                    };
                    let lines = lines
                        .iter()
                        .map(|spec| parse_line_spec(spec))
                        .collect::<LedgerDeskResult<Vec<_>>>()?;
                    JournalEntryDraft::with_lines(date, lines)
                        .reference(reference.unwrap_or_default())
                        .description(description.unwrap_or_default())
                }
            };

            let entry = service.create(&draft).await?;
            println!(
                "Created journal entry {} ({})",
                entry.display_reference(),
                entry.id
            );
            println!(
                "  Debits: {}  Credits: {}",
                entry.total_debit().format_with_currency(&settings.currency_code),
                entry.total_credit().format_with_currency(&settings.currency_code)
            );
        }
    }

    Ok(())
}

fn read_draft(path: &Path) -> LedgerDeskResult<JournalEntryDraft> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LedgerDeskError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    decode_draft(&text)
}

fn parse_date(s: &str) -> LedgerDeskResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        LedgerDeskError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse `CODE:DEBIT:CREDIT[:MEMO]`; empty amounts mean zero
pub fn parse_line_spec(spec: &str) -> LedgerDeskResult<DraftLine> {
    let invalid = |why: &str| {
        LedgerDeskError::Validation(format!(
            "Invalid line '{}': {}. Use CODE:DEBIT:CREDIT[:MEMO]",
            spec, why
        ))
    };

    let mut parts = spec.splitn(4, ':');
    let code = parts.next().unwrap_or_default().trim();
    let debit = parts.next().ok_or_else(|| invalid("missing debit"))?;
    let credit = parts.next().ok_or_else(|| invalid("missing credit"))?;
    let memo = parts.next().unwrap_or_default().trim();

    let code: i64 = code.parse().map_err(|_| invalid("account code must be a number"))?;
    let amount = |text: &str| -> LedgerDeskResult<Money> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Money::zero());
        }
        Money::parse(text).map_err(|e| invalid(&e.to_string()))
    };

    Ok(DraftLine {
        account_code: AccountCode::new(code),
        account_name: String::new(),
        debit: amount(debit)?,
        credit: amount(credit)?,
        description: memo.to_string(),
    })
}
