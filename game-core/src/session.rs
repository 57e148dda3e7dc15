use chrono::Utc;
use game_types::{GameError, WordRecord};
use std::collections::BTreeSet;
use std::sync::Mutex;

/// The live state for one day's word.
///
/// One session is shared by every request handler for the lifetime of the
/// process (or until the day-rollover reload swaps it out). All reads take
/// `&self`; the only mutation is the reveal-set upsert inside `check_guess`,
/// guarded by a mutex so concurrent guesses never lose updates.
#[derive(Debug)]
pub struct GameSession {
    record: WordRecord,
    revealed: Mutex<BTreeSet<usize>>,
    partial_unmasking: bool,
}

impl GameSession {
    pub fn new(record: WordRecord, partial_unmasking: bool) -> Self {
        Self {
            record,
            revealed: Mutex::new(BTreeSet::new()),
            partial_unmasking,
        }
    }

    /// Evaluate a guess against the answer.
    ///
    /// Both sides are trimmed and lowercased before comparison. An exact
    /// match reveals every position and returns `(true, [])`. A mismatch
    /// reveals nothing unless partial unmasking is enabled, in which case
    /// positions where guess and answer agree (over code points, up to the
    /// shorter length) are revealed and the newly revealed positions are
    /// returned in ascending order. Re-submitting the same wrong guess
    /// reveals nothing the second time.
    pub fn check_guess(&self, raw: &str) -> (bool, Vec<usize>) {
        let guess = raw.trim().to_lowercase();
        let answer = self.record.answer.to_lowercase();

        if guess == answer {
            let mut revealed = self.revealed.lock().unwrap();
            revealed.extend(0..self.record.answer_len());
            return (true, Vec::new());
        }

        let mut newly_revealed = Vec::new();
        if self.partial_unmasking {
            let answer_chars: Vec<char> = answer.chars().collect();
            let guess_chars: Vec<char> = guess.chars().collect();
            // Positions index the displayed answer, so the walk is bounded by
            // its code-point count as well as by both normalized lengths.
            let limit = answer_chars
                .len()
                .min(guess_chars.len())
                .min(self.record.answer_len());

            let mut revealed = self.revealed.lock().unwrap();
            for i in 0..limit {
                if guess_chars[i] == answer_chars[i] && revealed.insert(i) {
                    newly_revealed.push(i);
                }
            }
        }

        (false, newly_revealed)
    }

    /// The answer with unrevealed positions masked as `_`.
    ///
    /// Always the same code-point length as the answer, for any reveal state.
    pub fn masked_word(&self) -> String {
        let revealed = self.revealed.lock().unwrap();
        self.record
            .answer
            .chars()
            .enumerate()
            .map(|(i, c)| if revealed.contains(&i) { c } else { '_' })
            .collect()
    }

    pub fn hint(&self, category: &str) -> Result<&str, GameError> {
        self.record
            .hints
            .get(category)
            .map(String::as_str)
            .ok_or_else(|| GameError::UnknownCategory(category.to_string()))
    }

    pub fn emoji(&self, category: &str) -> Result<&str, GameError> {
        self.record
            .emojis
            .get(category)
            .map(String::as_str)
            .ok_or_else(|| GameError::MissingEmoji(category.to_string()))
    }

    pub fn label(&self, category: &str) -> Result<&str, GameError> {
        self.record
            .labels
            .get(category)
            .map(String::as_str)
            .ok_or_else(|| GameError::UnknownCategory(category.to_string()))
    }

    /// Category names in display order. Read-only view.
    pub fn categories(&self) -> &[String] {
        &self.record.categories
    }

    /// Copy of the category → emoji map, for the emoji legend.
    pub fn category_emojis(&self) -> std::collections::HashMap<String, String> {
        self.record.emojis.clone()
    }

    /// Today's UTC calendar date, the correlation key for analytics and
    /// stats lookups. Independent of which policy picked today's word.
    pub fn daily_game_id(&self) -> String {
        Utc::now().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(answer: &str) -> WordRecord {
        let mut hints = HashMap::new();
        hints.insert("fruit".to_string(), "A red or green fruit".to_string());
        let mut labels = HashMap::new();
        labels.insert("fruit".to_string(), "Category A".to_string());
        let mut emojis = HashMap::new();
        emojis.insert("fruit".to_string(), "🍎".to_string());
        WordRecord {
            answer: answer.to_string(),
            categories: vec!["fruit".to_string()],
            hints,
            labels,
            emojis,
        }
    }

    #[test]
    fn test_masked_word_starts_fully_hidden() {
        let session = GameSession::new(record("apple"), false);
        assert_eq!(session.masked_word(), "_____");
    }

    #[test]
    fn test_masked_word_length_counts_code_points() {
        let session = GameSession::new(record("café"), false);
        assert_eq!(session.masked_word().chars().count(), 4);

        let (correct, _) = session.check_guess("café");
        assert!(correct);
        assert_eq!(session.masked_word(), "café");
    }

    #[test]
    fn test_exact_match_reveals_everything() {
        let session = GameSession::new(record("apple"), false);
        let (correct, newly_revealed) = session.check_guess("  APPLE ");
        assert!(correct);
        assert!(newly_revealed.is_empty());
        assert_eq!(session.masked_word(), "apple");
    }

    #[test]
    fn test_wrong_guess_without_partial_mode_has_no_effect() {
        let session = GameSession::new(record("apple"), false);
        let (correct, newly_revealed) = session.check_guess("angle");
        assert!(!correct);
        assert!(newly_revealed.is_empty());
        assert_eq!(session.masked_word(), "_____");
    }

    #[test]
    fn test_partial_mode_reveals_matching_positions() {
        let session = GameSession::new(record("apple"), true);
        let (correct, newly_revealed) = session.check_guess("angle");
        assert!(!correct);
        // a_gle vs apple: positions 0, 3, 4 agree.
        assert_eq!(newly_revealed, vec![0, 3, 4]);
        assert_eq!(session.masked_word(), "a__le");
    }

    #[test]
    fn test_partial_reveal_is_idempotent() {
        let session = GameSession::new(record("apple"), true);
        let (_, first) = session.check_guess("a");
        assert_eq!(first, vec![0]);
        assert_eq!(session.masked_word(), "a____");

        let (_, second) = session.check_guess("a");
        assert!(second.is_empty());
        assert_eq!(session.masked_word(), "a____");
    }

    #[test]
    fn test_correct_guess_after_partial_reveals_all() {
        let session = GameSession::new(record("apple"), true);
        session.check_guess("angle");
        let (correct, _) = session.check_guess("apple");
        assert!(correct);
        assert_eq!(session.masked_word(), "apple");
    }

    #[test]
    fn test_guess_longer_than_answer() {
        let session = GameSession::new(record("apple"), true);
        let (correct, newly_revealed) = session.check_guess("applesauce");
        assert!(!correct);
        assert_eq!(newly_revealed, vec![0, 1, 2, 3, 4]);
        assert_eq!(session.masked_word(), "apple");
    }

    #[test]
    fn test_hint_lookup() {
        let session = GameSession::new(record("apple"), false);
        assert_eq!(session.hint("fruit").unwrap(), "A red or green fruit");
        assert_eq!(
            session.hint("vehicle").unwrap_err(),
            GameError::UnknownCategory("vehicle".to_string())
        );
    }

    #[test]
    fn test_emoji_lookup_has_its_own_error() {
        let session = GameSession::new(record("apple"), false);
        assert_eq!(session.emoji("fruit").unwrap(), "🍎");
        assert_eq!(
            session.emoji("vehicle").unwrap_err(),
            GameError::MissingEmoji("vehicle".to_string())
        );
    }

    #[test]
    fn test_categories_preserve_order() {
        let session = GameSession::new(record("apple"), false);
        assert_eq!(session.categories(), ["fruit"]);
        assert_eq!(session.label("fruit").unwrap(), "Category A");
    }

    #[test]
    fn test_daily_game_id_format() {
        let session = GameSession::new(record("apple"), false);
        let id = session.daily_game_id();
        assert!(chrono::NaiveDate::parse_from_str(&id, "%Y-%m-%d").is_ok());
    }
}
