//! Request and response bodies exchanged with the backend
//!
//! Request types are strict. Response types are deliberately loose; they are
//! turned into the canonical models by `decode`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::JournalEntryDraft;

/// Body of `POST /v0/db/journal-entry`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntryRequest {
    pub date: NaiveDate,
    pub reference: String,
    pub description: String,
    pub lines: Vec<JournalLineRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalLineRequest {
    pub account_code: i64,
    pub debit: f64,
    pub credit: f64,
    pub description: String,
}

impl From<&JournalEntryDraft> for JournalEntryRequest {
    fn from(draft: &JournalEntryDraft) -> Self {
        Self {
            date: draft.date,
            reference: draft.reference.trim().to_string(),
            description: draft.description.trim().to_string(),
            lines: draft
                .lines()
                .iter()
                .map(|line| JournalLineRequest {
                    account_code: line.account_code.value(),
                    debit: line.debit.to_decimal(),
                    credit: line.credit.to_decimal(),
                    description: line.description.clone(),
                })
                .collect(),
        }
    }
}

/// Body of `POST /v0/bedrock/test`
#[derive(Debug, Clone, Serialize)]
pub struct PromptRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptResponse {
    pub response: String,
}

/// Raw body of `POST /v0/db/upload-and-process`
#[derive(Debug, Clone, Deserialize)]
pub struct RawUploadResponse {
    pub s3_key: String,
    /// Either a JSON-encoded string or the entries themselves
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub validation: Option<Vec<Value>>,
}

/// A number that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Entry as the backend (or the extractor) happens to shape it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub id: Option<NumberLike>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

/// Line in either historical shape (`account_code` or `account_id`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLine {
    #[serde(default)]
    pub id: Option<NumberLike>,
    #[serde(default)]
    pub account_code: Option<NumberLike>,
    #[serde(default)]
    pub account_id: Option<NumberLike>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub debit: Option<NumberLike>,
    #[serde(default)]
    pub credit: Option<NumberLike>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Compliance note as the backend sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNote {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountCode, DraftLine, Money};

    #[test]
    fn test_request_body_shape() {
        let draft = JournalEntryDraft::with_lines(
            NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            vec![
                DraftLine::new_debit(AccountCode::new(5001), Money::from_cents(500_050))
                    .with_description("Rent"),
                DraftLine::new_credit(AccountCode::new(1001), Money::from_cents(500_050)),
            ],
        )
        .reference(" RENT-001 ")
        .description("Office rent");

        let body = serde_json::to_value(JournalEntryRequest::from(&draft)).unwrap();
        assert_eq!(body["date"], "2025-09-10");
        assert_eq!(body["reference"], "RENT-001");
        assert_eq!(body["lines"][0]["account_code"], 5001);
        assert_eq!(body["lines"][0]["debit"], 5000.5);
        assert_eq!(body["lines"][0]["credit"], 0.0);
        assert_eq!(body["lines"][0]["description"], "Rent");
        assert_eq!(body["lines"][1]["credit"], 5000.5);
    }

    #[test]
    fn test_number_like_variants() {
        let values: Vec<NumberLike> = serde_json::from_str(r#"[1, 2.5, "3.75"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                NumberLike::Int(1),
                NumberLike::Float(2.5),
                NumberLike::Text("3.75".into())
            ]
        );
    }
}
