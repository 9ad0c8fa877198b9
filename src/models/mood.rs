use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// How the writer felt about the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    #[default]
    Ok,
    Meh,
    Rough,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::Ok, Mood::Meh, Mood::Rough];

    pub fn score(self) -> i32 {
        match self {
            Mood::Great => 2,
            Mood::Good => 1,
            Mood::Ok => 0,
            Mood::Meh => -1,
            Mood::Rough => -2,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Ok => "ok",
            Mood::Meh => "meh",
            Mood::Rough => "rough",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Ok => "Okay",
            Mood::Meh => "Meh",
            Mood::Rough => "Rough",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Great => "🌈",
            Mood::Good => "🙂",
            Mood::Ok => "😌",
            Mood::Meh => "😕",
            Mood::Rough => "🌧️",
        }
    }

    /// Low moods get offered a golden prompt.
    pub fn is_low(self) -> bool {
        matches!(self, Mood::Meh | Mood::Rough)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| format!("Unknown mood: {}", s))
    }
}

/// Which half of the pair an entry speaks for. Chosen per entry, independent
/// of the account that saved it, so one device can write for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Author {
    #[default]
    Me,
    You,
}

impl Author {
    pub const BOTH: [Author; 2] = [Author::Me, Author::You];

    pub fn as_str(self) -> &'static str {
        match self {
            Author::Me => "Me",
            Author::You => "You",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Author {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Me" => Ok(Author::Me),
            "You" => Ok(Author::You),
            other => Err(format!("Unknown author: {}", other)),
        }
    }
}

/// Display class for an averaged mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MoodBucket {
    StronglyPositive,
    Positive,
    Neutral,
    Negative,
    StronglyNegative,
}

impl MoodBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 1.5 {
            MoodBucket::StronglyPositive
        } else if score >= 0.5 {
            MoodBucket::Positive
        } else if score > -0.5 {
            MoodBucket::Neutral
        } else if score > -1.5 {
            MoodBucket::Negative
        } else {
            MoodBucket::StronglyNegative
        }
    }
}

/// Catalog row served to clients building a mood picker.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoodInfo {
    pub key: Mood,
    pub label: String,
    pub emoji: String,
    pub score: i32,
}

impl From<Mood> for MoodInfo {
    fn from(mood: Mood) -> Self {
        Self {
            key: mood,
            label: mood.label().to_string(),
            emoji: mood.emoji().to_string(),
            score: mood.score(),
        }
    }
}
