use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Author, Mood};
use crate::AppError;

/// Longest line a journal entry may hold, in characters.
pub const MAX_ENTRY_CHARS: usize = 220;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Entry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub pair_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub author: Author,
    pub mood: Mood,
    pub text: String,
}

/// Raw `entries` row; author and mood are stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub pair_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub author: String,
    pub mood: String,
    pub text: String,
}

impl TryFrom<EntryRow> for Entry {
    type Error = AppError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let author = row.author.parse().map_err(|e| {
            tracing::error!(entry_id = %row.id, author = %row.author, "Stored entry has invalid author");
            AppError::Internal(e)
        })?;
        let mood = row.mood.parse().map_err(|e| {
            tracing::error!(entry_id = %row.id, mood = %row.mood, "Stored entry has invalid mood");
            AppError::Internal(e)
        })?;

        Ok(Entry {
            id: row.id,
            created_at: row.created_at,
            pair_id: row.pair_id,
            user_id: row.user_id,
            date: row.date,
            author,
            mood,
            text: row.text,
        })
    }
}

/// A validated entry ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub pair_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub author: Author,
    pub mood: Mood,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(author: &str, mood: &str) -> EntryRow {
        EntryRow {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            pair_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            author: author.to_string(),
            mood: mood.to_string(),
            text: "walked by the river".to_string(),
        }
    }

    #[test]
    fn row_converts_to_entry() {
        let entry = Entry::try_from(row("You", "meh")).unwrap();
        assert_eq!(entry.author, Author::You);
        assert_eq!(entry.mood, Mood::Meh);
    }

    #[test]
    fn row_with_unknown_mood_is_rejected() {
        assert!(matches!(Entry::try_from(row("Me", "ecstatic")), Err(AppError::Internal(_))));
    }

    #[test]
    fn entry_serializes_date_as_calendar_day() {
        let entry = Entry::try_from(row("Me", "ok")).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025-01-02");
        assert_eq!(json["author"], "Me");
        assert_eq!(json["mood"], "ok");
    }
}
