use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional state of the pet. Selects which strategy drives the metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Content,
    Distressed,
    Anxious,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Content, Mood::Distressed, Mood::Anxious];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Content => "content",
            Mood::Distressed => "distressed",
            Mood::Anxious => "anxious",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" | "happy" => Ok(Mood::Content),
            "distressed" | "sad" => Ok(Mood::Distressed),
            "anxious" | "anxiety" => Ok(Mood::Anxious),
            _ => Err(ParseError::UnknownMood(s.to_string())),
        }
    }
}

/// Discrete care action. `Comfort` is the hug, which only does something
/// while the pet is anxious.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Feed,
    Play,
    Clean,
    Sleep,
    Comfort,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Feed,
        Action::Play,
        Action::Clean,
        Action::Sleep,
        Action::Comfort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Feed => "feed",
            Action::Play => "play",
            Action::Clean => "clean",
            Action::Sleep => "sleep",
            Action::Comfort => "hug",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "feed" => Ok(Action::Feed),
            "p" | "play" => Ok(Action::Play),
            "c" | "clean" => Ok(Action::Clean),
            "s" | "sleep" => Ok(Action::Sleep),
            "h" | "hug" | "comfort" => Ok(Action::Comfort),
            _ => Err(ParseError::UnknownAction(s.to_string())),
        }
    }
}
