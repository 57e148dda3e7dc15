use chrono::NaiveDate;
use game_core::SelectionPolicy;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compiled-in word table, in-memory event sink.
    Local,
    /// Remote spreadsheet for both words and analytics.
    Remote,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mode: Mode,
    pub word_sheet_id: String,
    pub analytics_sheet_id: String,
    pub sheets_api_token: String,
    pub partial_unmasking: bool,
    pub sequential_daily_word: bool,
    pub daily_word_epoch: NaiveDate,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            mode: match env::var("MODE").as_deref() {
                Ok("remote") => Mode::Remote,
                _ => Mode::Local,
            },
            word_sheet_id: env::var("WORD_SHEET_ID").unwrap_or_default(),
            analytics_sheet_id: env::var("ANALYTICS_SHEET_ID").unwrap_or_default(),
            sheets_api_token: env::var("SHEETS_API_TOKEN").unwrap_or_default(),
            partial_unmasking: env::var("PARTIAL_UNMASKING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .expect("Invalid PARTIAL_UNMASKING"),
            sequential_daily_word: env::var("SEQUENTIAL_DAILY_WORD")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .expect("Invalid SEQUENTIAL_DAILY_WORD"),
            daily_word_epoch: env::var("DAILY_WORD_EPOCH")
                .unwrap_or_else(|_| "2025-04-10".to_string())
                .parse()
                .expect("Invalid DAILY_WORD_EPOCH"),
        }
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        if self.sequential_daily_word {
            SelectionPolicy::Sequential {
                epoch: self.daily_word_epoch,
            }
        } else {
            SelectionPolicy::Random
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
