use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Guess,
    Hint,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Guess => "guess",
            EventKind::Hint => "hint",
        }
    }
}

/// A single gameplay action recorded for analytics.
///
/// Immutable once built; ownership moves into the analytics pipeline on
/// submission. `game_id` is the UTC calendar date and `player_id` is
/// client-supplied and untrusted (may be empty). Events reach the sink as
/// string rows, never as JSON.
#[derive(Debug, Clone)]
pub struct GameplayEvent {
    pub game_id: String,
    pub player_id: String,
    pub kind: EventKind,
    pub data: HashMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

impl GameplayEvent {
    pub fn guess(game_id: &str, player_id: &str, guess: &str, correct: bool) -> Self {
        let mut data = HashMap::new();
        data.insert("guess".to_string(), guess.to_string());
        data.insert("correct".to_string(), correct.to_string());
        Self {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            kind: EventKind::Guess,
            data,
            timestamp: Utc::now(),
        }
    }

    pub fn hint(game_id: &str, player_id: &str, category: &str) -> Self {
        let mut data = HashMap::new();
        data.insert("category".to_string(), category.to_string());
        Self {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            kind: EventKind::Hint,
            data,
            timestamp: Utc::now(),
        }
    }

    /// Value of an event-specific field, or empty when the field is absent.
    pub fn field(&self, key: &str) -> &str {
        self.data.get(key).map(String::as_str).unwrap_or("")
    }
}
