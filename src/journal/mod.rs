//! Journal orchestration and the statistics derived from a pair's entries.
//!
//! Everything except [`view`] is pure and synchronous: functions take the
//! full entry list and a caller-supplied "today".

pub mod calendar;
pub mod prompts;
pub mod stats;
pub mod streaks;
pub mod view;
pub mod words;

pub use calendar::{monthly_counts, mood_calendar, CalendarDay, MonthCount, MoodCalendar};
pub use prompts::golden_prompt;
pub use stats::{entries_on, search, Dashboard};
pub use streaks::{joint_streak, personal_streak, MAX_STREAK_DAYS};
pub use view::{Draft, JournalView, LoadTicket};
pub use words::{word_cloud, word_counts, WordCount, WORD_CLOUD_LIMIT};

#[cfg(test)]
pub(crate) fn day(s: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[cfg(test)]
pub(crate) fn test_entry(
    date: &str,
    author: crate::models::Author,
    mood: crate::models::Mood,
    text: &str,
) -> crate::models::Entry {
    crate::models::Entry {
        id: uuid::Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        pair_id: uuid::Uuid::nil(),
        user_id: uuid::Uuid::nil(),
        date: day(date),
        author,
        mood,
        text: text.to_string(),
    }
}
