use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use super::prompts::golden_prompt;
use super::stats::{entries_on, Dashboard};
use crate::db::JournalStore;
use crate::models::{Author, Entry, Mood, NewEntry, MAX_ENTRY_CHARS};
use crate::{AppError, AppResult};

/// Unsaved input: who is writing, about which day, how it felt.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub author: Author,
    pub text: String,
    pub mood: Mood,
    pub date: NaiveDate,
}

impl Draft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            author: Author::default(),
            text: String::new(),
            mood: Mood::default(),
            date,
        }
    }

    /// The text as it would be stored: trimmed, non-empty, within the cap.
    pub fn validated_text(&self) -> AppResult<String> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Entry text must not be empty".to_string()));
        }
        let len = text.chars().count();
        if len > MAX_ENTRY_CHARS {
            return Err(AppError::Validation(format!(
                "Entry text is {} characters; the limit is {}",
                len, MAX_ENTRY_CHARS
            )));
        }
        Ok(text.to_string())
    }

    /// Forget text and mood after a save; author and date stay.
    pub fn clear(&mut self) {
        self.text.clear();
        self.mood = Mood::default();
    }
}

/// Identifies one load request. Only the most recently issued ticket may
/// replace the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One account's working view of its pair's journal.
pub struct JournalView {
    store: Arc<dyn JournalStore>,
    user_id: Uuid,
    pair_id: Option<Uuid>,
    entries: Vec<Entry>,
    draft: Draft,
    generation: u64,
}

impl JournalView {
    pub fn new(store: Arc<dyn JournalStore>, user_id: Uuid, today: NaiveDate) -> Self {
        Self {
            store,
            user_id,
            pair_id: None,
            entries: Vec::new(),
            draft: Draft::new(today),
            generation: 0,
        }
    }

    /// Resolves the caller's pair without loading entries.
    pub async fn attach(
        store: Arc<dyn JournalStore>,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Self> {
        let mut view = Self::new(store, user_id, today);
        view.discover_pair().await?;
        Ok(view)
    }

    /// Resolves the caller's pair and loads its entries.
    pub async fn open(
        store: Arc<dyn JournalStore>,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Self> {
        let mut view = Self::attach(store, user_id, today).await?;
        view.reload().await?;
        Ok(view)
    }

    /// Finds the pair this account writes into.
    ///
    /// An account is expected to belong to exactly one pair. If it belongs
    /// to several, the oldest one wins and the anomaly is logged.
    pub async fn discover_pair(&mut self) -> AppResult<Option<Uuid>> {
        let pair_ids = self.store.pair_ids_for(self.user_id).await?;

        if pair_ids.len() > 1 {
            tracing::warn!(
                user_id = %self.user_id,
                pairs = pair_ids.len(),
                "Account belongs to more than one pair; using the oldest"
            );
        }

        self.pair_id = pair_ids.first().copied();
        tracing::debug!(user_id = %self.user_id, pair_id = ?self.pair_id, "Pair discovered");
        Ok(self.pair_id)
    }

    pub fn pair_id(&self) -> Option<Uuid> {
        self.pair_id
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Applies a finished load if it is still the latest one. Returns whether
    /// the entries were replaced.
    pub fn finish_load(&mut self, ticket: LoadTicket, entries: Vec<Entry>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.generation,
                "Dropping stale entry load"
            );
            return false;
        }
        self.entries = entries;
        true
    }

    pub async fn reload(&mut self) -> AppResult<()> {
        let ticket = self.begin_load();
        let entries = match self.pair_id {
            Some(pair_id) => self.store.list_entries(pair_id).await?,
            None => Vec::new(),
        };
        self.finish_load(ticket, entries);
        Ok(())
    }

    fn require_pair(&self) -> AppResult<Uuid> {
        self.pair_id
            .ok_or_else(|| AppError::NotFound("This account is not linked to a pair yet".to_string()))
    }

    /// Stores the draft as a new entry, clears it and reloads.
    ///
    /// On failure the draft is left untouched. The result reflects the
    /// insert only.
    pub async fn save(&mut self) -> AppResult<Entry> {
        let text = self.draft.validated_text()?;
        let pair_id = self.require_pair()?;

        let entry = self
            .store
            .insert_entry(NewEntry {
                pair_id,
                user_id: self.user_id,
                date: self.draft.date,
                author: self.draft.author,
                mood: self.draft.mood,
                text,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, pair_id = %pair_id, "Failed to save entry");
                e
            })?;

        tracing::info!(entry_id = %entry.id, pair_id = %pair_id, date = %entry.date, "Entry saved");

        self.draft.clear();
        self.refresh_after_write().await;
        Ok(entry)
    }

    pub async fn delete(&mut self, entry_id: Uuid) -> AppResult<()> {
        let pair_id = self.require_pair()?;

        let removed = self
            .store
            .delete_entry(pair_id, entry_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, entry_id = %entry_id, "Failed to delete entry");
                e
            })?;

        if !removed {
            return Err(AppError::NotFound(format!("Entry {} not found", entry_id)));
        }

        tracing::info!(entry_id = %entry_id, pair_id = %pair_id, "Entry deleted");
        self.refresh_after_write().await;
        Ok(())
    }

    // The write is already committed; a failed reload only leaves the list stale.
    async fn refresh_after_write(&mut self) {
        if let Err(e) = self.reload().await {
            tracing::warn!(error = %e, user_id = %self.user_id, "Reload after write failed");
        }
    }

    /// Entries on the draft's date.
    pub fn todays_entries(&self) -> Vec<Entry> {
        entries_on(&self.entries, self.draft.date)
    }

    /// Statistics for the draft's author, anchored at `today`.
    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        Dashboard::build(&self.entries, self.draft.author, today)
    }

    pub fn golden_prompt(&self) -> Option<&'static str> {
        golden_prompt(self.draft.mood)
    }
}
