//! Journal entry service
//!
//! Lists stored entries and creates new ones. A draft is only sent to the
//! backend after it passes the balance check and the configured rules.

use crate::api::ApiClient;
use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::models::{EntryId, JournalEntry, JournalEntryDraft};
use crate::services::validation::{check_draft, EntryCheck, ValidationRules};

/// Service for journal entries
pub struct JournalService<'a> {
    client: &'a ApiClient,
    rules: &'a ValidationRules,
}

impl<'a> JournalService<'a> {
    /// Create a new journal service
    pub fn new(client: &'a ApiClient, rules: &'a ValidationRules) -> Self {
        Self { client, rules }
    }

    /// All stored entries, oldest first
    pub async fn list(&self) -> LedgerDeskResult<Vec<JournalEntry>> {
        let mut entries = self.client.list_journal_entries().await?;
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Find a stored entry by id
    pub async fn find(&self, id: EntryId) -> LedgerDeskResult<JournalEntry> {
        self.list()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| LedgerDeskError::entry_not_found(id.to_string()))
    }

    /// Run the pre-submit checks without sending anything
    pub fn check(&self, draft: &JournalEntryDraft) -> EntryCheck {
        check_draft(draft, self.rules)
    }

    /// Validate and submit a draft
    ///
    /// Blank lines are dropped first. A draft that fails any check is
    /// rejected with every reason and never reaches the backend.
    pub async fn create(&self, draft: &JournalEntryDraft) -> LedgerDeskResult<JournalEntry> {
        let mut draft = draft.clone();
        draft.compact();

        let check = self.check(&draft);
        if !check.can_create() {
            tracing::info!(issues = check.issues.len(), "Journal entry rejected before submit");
            return Err(LedgerDeskError::Rejected(check.issues));
        }

        let entry = self.client.create_journal_entry(&draft).await?;
        tracing::info!(id = %entry.id, reference = %entry.display_reference(), "Journal entry created");
        Ok(entry)
    }
}
