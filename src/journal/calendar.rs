use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::models::{Entry, MoodBucket};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub entries: usize,
    /// Mean mood score; absent when nobody wrote that day
    pub average: Option<f64>,
    pub bucket: Option<MoodBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MoodCalendar {
    pub year: i32,
    pub month: u32,
    /// Blank cells before the 1st in a Sunday-first week grid
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthCount {
    pub month: u32,
    pub label: String,
    pub count: usize,
}

/// Every calendar day of `year`/`month`, in order.
pub fn days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect()
}

/// Average mood per day of the month containing `today`, over both roles.
pub fn mood_calendar(entries: &[Entry], today: NaiveDate) -> MoodCalendar {
    let mut by_day: HashMap<NaiveDate, (i32, usize)> = HashMap::new();
    for entry in entries {
        let slot = by_day.entry(entry.date).or_insert((0, 0));
        slot.0 += entry.mood.score();
        slot.1 += 1;
    }

    let days = days_of_month(today.year(), today.month())
        .into_iter()
        .map(|date| {
            let (total, count) = by_day.get(&date).copied().unwrap_or((0, 0));
            let average = (count > 0).then(|| f64::from(total) / count as f64);
            CalendarDay {
                date,
                entries: count,
                average,
                bucket: average.map(MoodBucket::from_score),
            }
        })
        .collect::<Vec<_>>();

    let leading_blanks = days
        .first()
        .map(|d| d.date.weekday().num_days_from_sunday())
        .unwrap_or(0);

    MoodCalendar {
        year: today.year(),
        month: today.month(),
        leading_blanks,
        days,
    }
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Entry totals for each month of `year`.
pub fn monthly_counts(entries: &[Entry], year: i32) -> Vec<MonthCount> {
    let mut counts = [0usize; 12];
    for entry in entries.iter().filter(|e| e.date.year() == year) {
        counts[entry.date.month0() as usize] += 1;
    }

    counts
        .iter()
        .zip(MONTH_LABELS)
        .enumerate()
        .map(|(i, (&count, label))| MonthCount {
            month: i as u32 + 1,
            label: label.to_string(),
            count,
        })
        .collect()
}
