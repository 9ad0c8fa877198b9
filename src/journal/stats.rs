use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::calendar::{monthly_counts, mood_calendar, MonthCount, MoodCalendar};
use super::streaks::{joint_streak, personal_streak};
use super::words::{word_cloud, word_counts, WordCount};
use crate::models::{ArchiveQuery, Author, Entry};

/// Entries dated exactly `date`.
pub fn entries_on(entries: &[Entry], date: NaiveDate) -> Vec<Entry> {
    entries.iter().filter(|e| e.date == date).cloned().collect()
}

/// Archive search, newest day first.
pub fn search(entries: &[Entry], query: &ArchiveQuery) -> Vec<Entry> {
    let needle = query
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut found: Vec<Entry> = entries
        .iter()
        .filter(|e| query.mood.map_or(true, |m| e.mood == m))
        .filter(|e| {
            needle
                .as_deref()
                .map_or(true, |n| e.text.to_lowercase().contains(n))
        })
        .cloned()
        .collect();

    found.sort_by(|a, b| b.date.cmp(&a.date));
    found
}

/// Everything the streaks and today screens show, derived from one entry list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub author: Author,
    pub todays_entries: Vec<Entry>,
    pub personal_streak: u32,
    pub joint_streak: u32,
    pub word_cloud: Vec<WordCount>,
    pub calendar: MoodCalendar,
    pub monthly_counts: Vec<MonthCount>,
    pub total_entries: usize,
}

impl Dashboard {
    pub fn build(entries: &[Entry], author: Author, today: NaiveDate) -> Self {
        Self {
            today,
            author,
            todays_entries: entries_on(entries, today),
            personal_streak: personal_streak(entries, author, today),
            joint_streak: joint_streak(entries, today),
            word_cloud: word_cloud(&word_counts(entries)),
            calendar: mood_calendar(entries, today),
            monthly_counts: monthly_counts(entries, today.year()),
            total_entries: entries.len(),
        }
    }
}
