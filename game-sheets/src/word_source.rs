use crate::sheets_client::SheetsClient;
use crate::static_words::STATIC_WORDS;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Range holding the word rows on the remote sheet: one row per word,
/// answer in column A, category triples through column M.
pub const WORD_RANGE: &str = "Sheet1!A2:M";

/// Provider of candidate daily words. The static table and the remote
/// spreadsheet are interchangeable behind this trait.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// All candidate rows, in stable order.
    async fn rows(&self) -> Result<Vec<Vec<String>>>;
}

/// In-memory word table, used in local mode and in tests.
#[derive(Debug, Clone)]
pub struct StaticWordSource {
    rows: Vec<Vec<String>>,
}

impl StaticWordSource {
    /// The compiled-in word table.
    pub fn builtin() -> Self {
        let rows = STATIC_WORDS
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Self { rows }
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl WordSource for StaticWordSource {
    async fn rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }
}

/// Word rows read from a remote spreadsheet.
pub struct SheetWordSource {
    client: Arc<SheetsClient>,
    spreadsheet_id: String,
}

impl SheetWordSource {
    pub fn new(client: Arc<SheetsClient>, spreadsheet_id: String) -> Self {
        Self {
            client,
            spreadsheet_id,
        }
    }
}

#[async_trait]
impl WordSource for SheetWordSource {
    async fn rows(&self) -> Result<Vec<Vec<String>>> {
        self.client.get_values(&self.spreadsheet_id, WORD_RANGE).await
    }
}
