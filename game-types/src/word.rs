use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One day's word with its category metadata, parsed from a word-source row.
///
/// `categories` preserves the order the categories appeared in the row, which
/// drives display order. Every entry in `categories` has exactly one entry in
/// `hints`, `labels`, and `emojis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    pub answer: String,
    pub categories: Vec<String>,
    pub hints: HashMap<String, String>,
    pub labels: HashMap<String, String>,
    pub emojis: HashMap<String, String>,
}

impl WordRecord {
    /// Answer length in code points, not bytes.
    pub fn answer_len(&self) -> usize {
        self.answer.chars().count()
    }
}
