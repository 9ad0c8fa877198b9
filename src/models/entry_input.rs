use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{Author, Mood};

/// Input for saving a journal line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryInput {
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub mood: Mood,
    /// Calendar day the line belongs to; defaults to today
    pub date: Option<NaiveDate>,
    pub text: String,
}

/// Response for entry mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Archive search filters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ArchiveQuery {
    /// Case-insensitive substring of the entry text
    pub q: Option<String>,
    pub mood: Option<Mood>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DateQuery {
    /// Calendar day, `YYYY-MM-DD`; defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Role whose personal streak is reported; defaults to `Me`
    pub author: Option<Author>,
    /// Caller's local date, `YYYY-MM-DD`; defaults to the server's local date
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PromptQuery {
    pub mood: Option<Mood>,
}
