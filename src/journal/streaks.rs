use chrono::{Days, NaiveDate};
use std::collections::HashSet;

use crate::models::{Author, Entry};

/// Upper bound on how far back a streak walk goes (ten years of days).
pub const MAX_STREAK_DAYS: u32 = 3660;

fn days_written_by(entries: &[Entry], author: Author) -> HashSet<NaiveDate> {
    entries
        .iter()
        .filter(|e| e.author == author)
        .map(|e| e.date)
        .collect()
}

/// Counts consecutive days ending at `today` for which `written` holds.
fn run_length(today: NaiveDate, written: impl Fn(NaiveDate) -> bool) -> u32 {
    let mut streak = 0;
    while streak < MAX_STREAK_DAYS {
        let Some(day) = today.checked_sub_days(Days::new(streak.into())) else {
            break;
        };
        if !written(day) {
            break;
        }
        streak += 1;
    }
    streak
}

/// Consecutive days, counting back from `today`, on which `author` wrote.
/// Zero when there is nothing for `author` today.
pub fn personal_streak(entries: &[Entry], author: Author, today: NaiveDate) -> u32 {
    let days = days_written_by(entries, author);
    run_length(today, |d| days.contains(&d))
}

/// Consecutive days, counting back from `today`, on which both roles wrote.
pub fn joint_streak(entries: &[Entry], today: NaiveDate) -> u32 {
    let me = days_written_by(entries, Author::Me);
    let you = days_written_by(entries, Author::You);
    run_length(today, |d| me.contains(&d) && you.contains(&d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{day, test_entry};
    use crate::models::Mood;

    #[test]
    fn personal_streak_counts_through_today() {
        let entries = vec![
            test_entry("2025-01-01", Author::Me, Mood::Good, "first"),
            test_entry("2025-01-02", Author::Me, Mood::Ok, "second"),
        ];
        assert_eq!(personal_streak(&entries, Author::Me, day("2025-01-02")), 2);
    }

    #[test]
    fn personal_streak_is_zero_after_a_gap_today() {
        let entries = vec![
            test_entry("2025-01-01", Author::Me, Mood::Good, "first"),
            test_entry("2025-01-02", Author::Me, Mood::Ok, "second"),
        ];
        assert_eq!(personal_streak(&entries, Author::Me, day("2025-01-03")), 0);
    }

    #[test]
    fn personal_streak_stops_at_first_gap() {
        let entries = vec![
            test_entry("2025-03-01", Author::You, Mood::Ok, "a"),
            test_entry("2025-03-03", Author::You, Mood::Ok, "b"),
            test_entry("2025-03-04", Author::You, Mood::Ok, "c"),
            test_entry("2025-03-04", Author::You, Mood::Meh, "again"),
        ];
        assert_eq!(personal_streak(&entries, Author::You, day("2025-03-04")), 2);
    }

    #[test]
    fn personal_streak_ignores_the_other_role() {
        let entries = vec![test_entry("2025-03-04", Author::You, Mood::Ok, "mine")];
        assert_eq!(personal_streak(&entries, Author::Me, day("2025-03-04")), 0);
    }

    #[test]
    fn joint_streak_needs_both_roles_each_day() {
        let entries = vec![
            test_entry("2025-05-01", Author::Me, Mood::Ok, "a"),
            test_entry("2025-05-01", Author::You, Mood::Ok, "b"),
            test_entry("2025-05-02", Author::Me, Mood::Ok, "c"),
            test_entry("2025-05-03", Author::Me, Mood::Ok, "d"),
            test_entry("2025-05-03", Author::You, Mood::Ok, "e"),
        ];
        assert_eq!(joint_streak(&entries, day("2025-05-03")), 1);
        assert_eq!(joint_streak(&entries, day("2025-05-01")), 1);
        assert_eq!(joint_streak(&entries, day("2025-05-02")), 0);
    }

    #[test]
    fn joint_streak_crosses_month_boundaries() {
        let mut entries = Vec::new();
        for date in ["2024-02-28", "2024-02-29", "2024-03-01"] {
            entries.push(test_entry(date, Author::Me, Mood::Ok, "x"));
            entries.push(test_entry(date, Author::You, Mood::Ok, "y"));
        }
        assert_eq!(joint_streak(&entries, day("2024-03-01")), 3);
    }

    #[test]
    fn streak_walk_is_capped() {
        let today = day("2030-01-01");
        assert_eq!(run_length(today, |_| true), MAX_STREAK_DAYS);
    }

    #[test]
    fn empty_history_has_no_streaks() {
        assert_eq!(personal_streak(&[], Author::Me, day("2025-01-01")), 0);
        assert_eq!(joint_streak(&[], day("2025-01-01")), 0);
    }
}
