use rand::seq::SliceRandom;

use crate::models::Mood;

pub const GOLDEN_PROMPTS: [&str; 10] = [
    "Tell me one tiny win from today.",
    "What\u{2019}s something soft you noticed?",
    "What made you feel seen this week?",
    "Name a smell, a color, and a sound from your day.",
    "What do you want future-us to remember about right now?",
    "What\u{2019}s one thing you handled better than last time?",
    "Share a meme in words. Describe it badly.",
    "What would make tomorrow 1% easier?",
    "Who were you kind to today\u{2014}include yourself.",
    "Something small that made you smile.",
];

/// A writing nudge for a hard day; `None` unless the mood is low.
pub fn golden_prompt(mood: Mood) -> Option<&'static str> {
    if !mood.is_low() {
        return None;
    }
    GOLDEN_PROMPTS.choose(&mut rand::thread_rng()).copied()
}
