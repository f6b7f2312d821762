//! Tolerant decoding of backend payloads
//!
//! The backend has shipped several shapes for the same data over time:
//! `data` in an upload response may be a JSON-encoded string, a single entry
//! or an array of entries; lines name the account as `account_code` or
//! `account_id`; amounts may be numbers or numeric strings. Everything is
//! normalized here into the canonical models so no caller deals with the
//! variants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::wire::{NumberLike, RawEntry, RawLine, RawNote, RawUploadResponse};
use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::models::{
    AccountCode, ComplianceNote, DraftLine, EntryId, Extraction, JournalEntry, JournalEntryDraft,
    JournalEntryLine, LineId, Money, NoteKind,
};

/// Description given to extracted entries that arrive without one
pub const EXTRACTED_DESCRIPTION: &str = "Extracted journal entry";

/// Where a payload came from, which decides how missing fields are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    /// Stored entries from the journal endpoints; missing fields stay missing
    Stored,
    /// Entries produced by document extraction; missing fields get placeholders
    Extracted,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryPayload {
    Many(Vec<RawEntry>),
    One(RawEntry),
    Encoded(String),
}

/// Decode a full upload-and-process response body
pub fn decode_upload_response(body: &str) -> LedgerDeskResult<Extraction> {
    let raw: RawUploadResponse = serde_json::from_str(body)
        .map_err(|e| LedgerDeskError::Parse(format!("Invalid upload response: {}", e)))?;

    let entries = decode_entries(raw.data, EntrySource::Extracted)?;
    let notes = raw
        .validation
        .unwrap_or_default()
        .into_iter()
        .map(decode_note)
        .collect();

    Ok(Extraction {
        storage_key: raw.s3_key,
        entries,
        notes,
    })
}

/// Decode any of the entry payload shapes into canonical entries
pub fn decode_entries(value: Value, source: EntrySource) -> LedgerDeskResult<Vec<JournalEntry>> {
    let raw = raw_entries(value)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(entry, index, source))
        .collect())
}

/// Decode a single stored entry, e.g. the body returned by a create call
pub fn decode_entry(value: Value) -> LedgerDeskResult<JournalEntry> {
    decode_entries(value, EntrySource::Stored)?
        .into_iter()
        .next()
        .ok_or_else(|| LedgerDeskError::Parse("Response did not contain a journal entry".into()))
}

/// Interpret the body returned by a create call
///
/// Backends differ in what they echo back. A full entry is used as-is; an
/// acknowledgement with at most an id is completed from the submitted draft.
pub fn decode_created(value: Value, draft: &JournalEntryDraft) -> JournalEntry {
    let echoed = decode_entries(value, EntrySource::Stored)
        .ok()
        .and_then(|entries| entries.into_iter().next());

    match echoed {
        Some(entry) if !entry.lines.is_empty() => entry,
        other => entry_from_draft(draft, other.map(|e| e.id).unwrap_or_default()),
    }
}

fn entry_from_draft(draft: &JournalEntryDraft, id: EntryId) -> JournalEntry {
    let lines = draft
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let mut normalized = JournalEntryLine::new(
                LineId::new(index as i64 + 1),
                line.account_code,
                if line.account_name.trim().is_empty() {
                    format!("Account {}", line.account_code)
                } else {
                    line.account_name.clone()
                },
                line.debit,
                line.credit,
            );
            normalized.description = non_empty(Some(line.description.clone()));
            normalized
        })
        .collect();

    JournalEntry {
        id,
        date: draft.date,
        reference: non_empty(Some(draft.reference.trim().to_string())),
        description: non_empty(Some(draft.description.trim().to_string())),
        created_at: Utc::now(),
        lines,
    }
}

/// Read a draft from JSON text in the create-request shape
///
/// Accepts the same tolerant line shapes as backend payloads, so a saved
/// extraction can be edited and resubmitted.
pub fn decode_draft(text: &str) -> LedgerDeskResult<JournalEntryDraft> {
    let raw: RawEntry = serde_json::from_str(text)
        .map_err(|e| LedgerDeskError::Parse(format!("Invalid journal entry: {}", e)))?;

    let date = match raw.date.as_deref() {
        Some(text) => parse_date(text).ok_or_else(|| {
            LedgerDeskError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", text))
        })?,
        None => today(),
    };

    let lines = raw
        .lines
        .into_iter()
        .map(|line| {
            let code = account_code(&line);
            DraftLine {
                account_code: code,
                account_name: line.account_name.unwrap_or_default(),
                debit: to_money(line.debit.as_ref()),
                credit: to_money(line.credit.as_ref()),
                description: line.description.unwrap_or_default(),
            }
        })
        .collect();

    Ok(JournalEntryDraft::with_lines(date, lines)
        .reference(raw.reference.unwrap_or_default())
        .description(raw.description.unwrap_or_default()))
}

fn raw_entries(value: Value) -> LedgerDeskResult<Vec<RawEntry>> {
    if value.is_null() {
        return Ok(Vec::new());
    }

    let payload: EntryPayload = serde_json::from_value(value)
        .map_err(|e| LedgerDeskError::Parse(format!("Unrecognized entry payload: {}", e)))?;

    match payload {
        EntryPayload::Many(entries) => Ok(entries),
        EntryPayload::One(entry) => Ok(vec![entry]),
        EntryPayload::Encoded(text) => {
            let inner: Value = serde_json::from_str(&text).map_err(|e| {
                LedgerDeskError::Parse(format!("Error parsing extracted data: {}", e))
            })?;
            if inner.is_string() {
                return Err(LedgerDeskError::Parse(
                    "Extracted data is encoded more than once".into(),
                ));
            }
            raw_entries(inner)
        }
    }
}

fn normalize_entry(raw: RawEntry, index: usize, source: EntrySource) -> JournalEntry {
    let position = index as i64 + 1;
    let id = match (source, raw.id.as_ref()) {
        (EntrySource::Stored, Some(id)) => EntryId::new(to_integer(id)),
        _ => EntryId::new(position),
    };

    let date = raw.date.as_deref().and_then(parse_date).unwrap_or_else(today);

    let (reference, description) = match source {
        EntrySource::Stored => (non_empty(raw.reference), non_empty(raw.description)),
        EntrySource::Extracted => (
            Some(non_empty(raw.reference).unwrap_or_else(|| format!("JE-{:03}", position))),
            Some(non_empty(raw.description).unwrap_or_else(|| EXTRACTED_DESCRIPTION.to_string())),
        ),
    };

    let created_at = match source {
        EntrySource::Stored => raw
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(|| start_of_day(date)),
        EntrySource::Extracted => Utc::now(),
    };

    let lines = raw
        .lines
        .into_iter()
        .enumerate()
        .map(|(line_index, line)| normalize_line(line, line_index))
        .collect();

    JournalEntry {
        id,
        date,
        reference,
        description,
        created_at,
        lines,
    }
}

fn normalize_line(raw: RawLine, index: usize) -> JournalEntryLine {
    let id = raw
        .id
        .as_ref()
        .map(to_integer)
        .filter(|id| *id != 0)
        .unwrap_or(index as i64 + 1);
    let code = account_code(&raw);
    let account_name = non_empty(raw.account_name).unwrap_or_else(|| {
        if code.value() == 0 {
            "Account Unknown".to_string()
        } else {
            format!("Account {}", code)
        }
    });

    JournalEntryLine {
        id: LineId::new(id),
        account_code: code,
        account_name,
        debit: to_money(raw.debit.as_ref()),
        credit: to_money(raw.credit.as_ref()),
        description: non_empty(raw.description),
    }
}

fn decode_note(value: Value) -> ComplianceNote {
    let raw = match serde_json::from_value::<RawNote>(value.clone()) {
        Ok(raw) => raw,
        Err(_) => RawNote {
            description: Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            }),
            ..RawNote::default()
        },
    };

    let kind = match raw
        .kind
        .as_deref()
        .or(raw.severity.as_deref())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("error") | Some("high") => NoteKind::Error,
        Some("warning") | Some("medium") => NoteKind::Warning,
        _ => NoteKind::Info,
    };

    let description = raw.description.or(raw.message).unwrap_or_default();
    let title = non_empty(raw.title).unwrap_or_else(|| description.clone());

    ComplianceNote {
        kind,
        title,
        description,
        field: raw.field,
    }
}

/// `account_code` wins over the older `account_id`
fn account_code(line: &RawLine) -> AccountCode {
    let code = line
        .account_code
        .as_ref()
        .map(to_integer)
        .filter(|c| *c != 0)
        .or_else(|| line.account_id.as_ref().map(to_integer))
        .unwrap_or(0);
    AccountCode::new(code)
}

fn to_integer(value: &NumberLike) -> i64 {
    match value {
        NumberLike::Int(n) => *n,
        NumberLike::Float(f) if f.is_finite() => f.trunc() as i64,
        NumberLike::Float(_) => 0,
        NumberLike::Text(text) => {
            let digits: String = text
                .trim()
                .chars()
                .enumerate()
                .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
                .map(|(_, c)| c)
                .collect();
            digits.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %text, "Unparsable account number, using 0");
                0
            })
        }
    }
}

fn to_money(value: Option<&NumberLike>) -> Money {
    match value {
        None => Money::zero(),
        Some(NumberLike::Int(n)) => Money::from_units(*n).unwrap_or_else(|| {
            tracing::warn!(value = n, "Amount out of range, using 0");
            Money::zero()
        }),
        Some(NumberLike::Float(f)) => Money::from_decimal(*f).unwrap_or_else(|| {
            tracing::warn!(value = f, "Amount out of range, using 0");
            Money::zero()
        }),
        Some(NumberLike::Text(text)) if text.trim().is_empty() => Money::zero(),
        Some(NumberLike::Text(text)) => Money::parse(text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unparsable amount, using 0");
            Money::zero()
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(text).map(|ts| ts.date_naive()))
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    // Backends that serialize naive UTC datetimes leave off the offset
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
