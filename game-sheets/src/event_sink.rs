use crate::sheets_client::SheetsClient;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column headers for a per-game event destination.
pub const EVENT_HEADER: [&str; 6] = [
    "Timestamp",
    "Event Type",
    "Correct",
    "Guess",
    "Category",
    "PlayerID",
];

/// Per-game append-only store plus the aggregate read surface used for
/// player statistics. The remote spreadsheet and the in-memory store are
/// interchangeable behind this trait.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Append one 6-field event row (timestamp, event type, correctness,
    /// guess text, category, player id) to a destination.
    async fn append_row(&self, destination: &str, row: Vec<String>) -> Result<()>;

    async fn destination_exists(&self, destination: &str) -> Result<bool>;

    async fn create_destination(&self, destination: &str, header: &[&str]) -> Result<()>;

    /// Read a cell range from a destination, e.g. the stats block or the
    /// solver ranking list.
    async fn read_range(&self, destination: &str, range: &str) -> Result<Vec<Vec<String>>>;
}

/// Event sink backed by a remote spreadsheet, one tab per game.
pub struct SheetEventSink {
    client: Arc<SheetsClient>,
    spreadsheet_id: String,
}

impl SheetEventSink {
    pub fn new(client: Arc<SheetsClient>, spreadsheet_id: String) -> Self {
        Self {
            client,
            spreadsheet_id,
        }
    }
}

#[async_trait]
impl EventSink for SheetEventSink {
    async fn append_row(&self, destination: &str, row: Vec<String>) -> Result<()> {
        self.client
            .append_row(&self.spreadsheet_id, &format!("{}!A1", destination), &row)
            .await
    }

    async fn destination_exists(&self, destination: &str) -> Result<bool> {
        let titles = self.client.sheet_titles(&self.spreadsheet_id).await?;
        Ok(titles.iter().any(|title| title == destination))
    }

    async fn create_destination(&self, destination: &str, header: &[&str]) -> Result<()> {
        self.client.add_sheet(&self.spreadsheet_id, destination).await?;

        let header_row: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
        self.client
            .update_values(
                &self.spreadsheet_id,
                &format!("{}!A1", destination),
                &[header_row],
            )
            .await?;

        // The sheet computes its own aggregates: a statistics block in
        // column H/I and a unique-solver ranking list in column K. The
        // stats read path only ever reads these back.
        self.client
            .update_values(
                &self.spreadsheet_id,
                &format!("{}!H1", destination),
                &[
                    vec!["STATISTICS".to_string()],
                    vec![
                        "Total Players".to_string(),
                        "=COUNTA(UNIQUE(F2:F1000))".to_string(),
                    ],
                    vec![
                        "Players Solved".to_string(),
                        "=COUNTA(UNIQUE(FILTER(F2:F, B2:B=\"guess\", C2:C=TRUE)))".to_string(),
                    ],
                    vec!["Solve Rate".to_string(), "=I3/I2".to_string()],
                ],
            )
            .await?;

        self.client
            .update_values(
                &self.spreadsheet_id,
                &format!("{}!K1", destination),
                &[
                    vec!["PLAYER RANKINGS".to_string()],
                    vec!["PlayerID".to_string()],
                ],
            )
            .await?;

        self.client
            .update_values(
                &self.spreadsheet_id,
                &format!("{}!K3", destination),
                &[vec![
                    "=UNIQUE(FILTER(F2:F, B2:B=\"guess\", C2:C=TRUE))".to_string(),
                ]],
            )
            .await
    }

    async fn read_range(&self, destination: &str, range: &str) -> Result<Vec<Vec<String>>> {
        self.client
            .get_values(&self.spreadsheet_id, &format!("{}!{}", destination, range))
            .await
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    /// destination -> appended rows (header first).
    destinations: HashMap<String, Vec<Vec<String>>>,
    /// (destination, range) -> preloaded cells for the read side.
    ranges: HashMap<(String, String), Vec<Vec<String>>>,
}

/// In-process event sink for local mode and tests. Unlike the spreadsheet
/// it computes no aggregates of its own; tests preload ranges instead.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    state: Mutex<MemoryState>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload the cells returned for a `read_range` call.
    pub async fn set_range(&self, destination: &str, range: &str, rows: Vec<Vec<String>>) {
        let mut state = self.state.lock().await;
        state
            .ranges
            .insert((destination.to_string(), range.to_string()), rows);
    }

    /// Rows appended to a destination so far, header included.
    pub async fn rows(&self, destination: &str) -> Vec<Vec<String>> {
        let state = self.state.lock().await;
        state
            .destinations
            .get(destination)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn destination_count(&self) -> usize {
        self.state.lock().await.destinations.len()
    }
}

#[async_trait]
impl EventSink for MemoryEventSink {
    async fn append_row(&self, destination: &str, row: Vec<String>) -> Result<()> {
        let mut state = self.state.lock().await;
        state
            .destinations
            .get_mut(destination)
            .ok_or_else(|| anyhow!("unknown destination: {}", destination))?
            .push(row);
        Ok(())
    }

    async fn destination_exists(&self, destination: &str) -> Result<bool> {
        let state = self.state.lock().await;
        Ok(state.destinations.contains_key(destination))
    }

    async fn create_destination(&self, destination: &str, header: &[&str]) -> Result<()> {
        let mut state = self.state.lock().await;
        let header_row = header.iter().map(|cell| cell.to_string()).collect();
        state
            .destinations
            .insert(destination.to_string(), vec![header_row]);
        Ok(())
    }

    async fn read_range(&self, destination: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let state = self.state.lock().await;
        Ok(state
            .ranges
            .get(&(destination.to_string(), range.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
